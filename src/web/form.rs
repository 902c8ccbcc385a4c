use super::WebError;
use crate::service::ServiceError;
use crate::validation::{ModelErrors, MODEL_KEY};
use axum::async_trait;
use axum::extract::rejection::FormRejection;
use axum::extract::FromRequest;
use axum::http::Request;
use axum::Form;
use tracing::debug;

/// `Form` whose rejections are answered like any other invalid model:
/// 422 with the reason filed under the model level key.
pub struct ValidForm<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidForm<T>
where
    Form<T>: FromRequest<S, B, Rejection = FormRejection>,
    T: Send,
    S: Send + Sync,
    B: Send + 'static,
{
    type Rejection = WebError;

    async fn from_request(request: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(request, state).await {
            Ok(Form(value)) => Ok(ValidForm(value)),
            Err(rejection) => {
                debug!(%rejection, "unreadable form");
                let mut errors = ModelErrors::new();
                errors.add(MODEL_KEY, rejection.body_text());
                Err(WebError::from(ServiceError::Invalid { errors }))
            }
        }
    }
}
