//! HTTP surface of the booking site.
//!
//! Handlers bind the request into the form models of `service`, run the flow on a
//! blocking worker (the SQLite connection is synchronous) and answer with the JSON
//! view model or a `303 See Other` redirect after a successful post.

pub mod admin;
mod errors;
mod form;
mod home;

pub use self::errors::{Result, WebError};

use crate::booking_db::BookingDB;
use crate::config::Config;
use crate::service::{self, Visit};
use crate::session::{self, SessionId, SessionStore};
use axum::extract::State;
use axum::http::{header, HeaderValue, Request};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};


/// Shared state of all request handlers.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<BookingDB>>,
    sessions: Arc<SessionStore>,
    booking_user_id: Option<i64>,
}

impl AppState {
    pub fn new(db: BookingDB, sessions: SessionStore, booking_user_id: Option<i64>) -> Self {
        AppState {
            db: Arc::new(Mutex::new(db)),
            sessions: Arc::new(sessions),
            booking_user_id,
        }
    }

    pub fn booking_user_id(&self) -> Option<i64> {
        self.booking_user_id
    }

    /// Runs one flow for the given session on the blocking thread pool.
    pub async fn visit<T, F>(&self, session_id: SessionId, flow: F) -> Result<T>
    where
        F: FnOnce(&Visit<'_>) -> service::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || {
            let db = state.db.lock().map_err(|_| WebError::DatabasePoisoned)?;
            let visit = Visit::new(&*db, &state.sessions, session_id);
            Ok(flow(&visit)?)
        })
        .await?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/filter", post(home::filter))
        .route("/residences/:id", get(home::details))
        .route("/reserve", post(home::reserve))
        .route("/reservations", get(home::reservations))
        .route("/reservations/cancel", post(home::cancel))
        .route("/reservations/count", get(home::reservation_count))
        .nest("/admin", admin::router())
        .layer(middleware::from_fn_with_state(state.clone(), attach_session))
        .with_state(state)
}

/// Resolves the visitor's session from the cookie, starting a new one if the
/// request carries no live session. Every response renews the cookie, so it
/// lives as long as the session stays active.
async fn attach_session<B>(
    State(state): State<AppState>,
    mut request: Request<B>,
    next: Next<B>,
) -> Response {
    let cookie_id = request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(session::session_id_from_cookie_header);

    let (session_id, created) = match state.sessions.load_or_create(cookie_id) {
        Ok(session) => session,
        Err(err) => return WebError::from(err).into_response(),
    };
    if created {
        debug!(%session_id, "started session");
    }

    request.extensions_mut().insert(session_id);
    let mut response = next.run(request).await;

    let cookie = session::session_cookie(&session_id, state.sessions.idle_timeout());
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Serves the site on the configured address until ctrl-c is received.
pub async fn serve(config: &Config, db: BookingDB) -> Result<()> {
    let sessions = SessionStore::new(config.session_timeout);
    let app = router(AppState::new(db, sessions, config.booking_user_id));

    info!(address = %config.bind_address, "listening");
    axum::Server::try_bind(&config.bind_address)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until the process is killed.
        std::future::pending::<()>().await;
    }
}
