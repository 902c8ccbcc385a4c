use super::super::form::ValidForm;
use super::super::{AppState, Result};
use super::form_response;
use crate::booking_db::User;
use crate::service::admin::users;
use crate::service::forms::UserForm;
use crate::service::views::ListView;
use crate::session::SessionId;
use axum::extract::{Path, State};
use axum::response::{Redirect, Response};
use axum::{Extension, Json};

const INDEX: &str = "/admin/users";

pub async fn index(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<ListView<User>>> {
    Ok(Json(state.visit(session_id, users::index).await?))
}

pub async fn create_form() -> Json<UserForm> {
    Json(UserForm::default())
}

pub async fn create(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    ValidForm(form): ValidForm<UserForm>,
) -> Result<Response> {
    let outcome = state
        .visit(session_id, move |visit| users::create(visit, form))
        .await?;
    Ok(form_response(outcome, INDEX))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Json<UserForm>> {
    Ok(Json(
        state
            .visit(session_id, move |visit| users::edit_form(visit, id))
            .await?,
    ))
}

pub async fn edit(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
    ValidForm(form): ValidForm<UserForm>,
) -> Result<Response> {
    let outcome = state
        .visit(session_id, move |visit| users::edit(visit, id, form))
        .await?;
    Ok(form_response(outcome, INDEX))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Json<User>> {
    Ok(Json(
        state
            .visit(session_id, move |visit| users::delete_form(visit, id))
            .await?,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state
        .visit(session_id, move |visit| users::delete(visit, id))
        .await?;
    Ok(Redirect::to(INDEX))
}
