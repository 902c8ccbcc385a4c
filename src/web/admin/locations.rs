use super::super::form::ValidForm;
use super::super::{AppState, Result};
use super::form_response;
use crate::booking_db::Location;
use crate::service::admin::locations;
use crate::service::forms::LocationForm;
use crate::service::views::ListView;
use crate::session::SessionId;
use axum::extract::{Path, State};
use axum::response::{Redirect, Response};
use axum::{Extension, Json};

const INDEX: &str = "/admin/locations";

pub async fn index(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<ListView<Location>>> {
    Ok(Json(state.visit(session_id, locations::index).await?))
}

pub async fn create_form() -> Json<LocationForm> {
    Json(LocationForm::default())
}

pub async fn create(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    ValidForm(form): ValidForm<LocationForm>,
) -> Result<Response> {
    let outcome = state
        .visit(session_id, move |visit| locations::create(visit, form))
        .await?;
    Ok(form_response(outcome, INDEX))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Json<LocationForm>> {
    Ok(Json(
        state
            .visit(session_id, move |visit| locations::edit_form(visit, id))
            .await?,
    ))
}

pub async fn edit(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
    ValidForm(form): ValidForm<LocationForm>,
) -> Result<Response> {
    let outcome = state
        .visit(session_id, move |visit| locations::edit(visit, id, form))
        .await?;
    Ok(form_response(outcome, INDEX))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Json<Location>> {
    Ok(Json(
        state
            .visit(session_id, move |visit| locations::delete_form(visit, id))
            .await?,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state
        .visit(session_id, move |visit| locations::delete(visit, id))
        .await?;
    Ok(Redirect::to(INDEX))
}
