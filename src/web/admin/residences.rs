use super::super::form::ValidForm;
use super::super::{AppState, Result};
use super::form_response;
use crate::service::admin::residences;
use crate::service::forms::ResidenceForm;
use crate::service::views::{ListView, ResidenceFormView, ResidenceOverview};
use crate::session::SessionId;
use axum::extract::{Path, State};
use axum::response::{Redirect, Response};
use axum::{Extension, Json};

const INDEX: &str = "/admin/residences";

pub async fn index(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<ListView<ResidenceOverview>>> {
    Ok(Json(state.visit(session_id, residences::index).await?))
}

pub async fn create_form(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<ResidenceFormView>> {
    Ok(Json(state.visit(session_id, residences::create_form).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    ValidForm(form): ValidForm<ResidenceForm>,
) -> Result<Response> {
    let outcome = state
        .visit(session_id, move |visit| residences::create(visit, form))
        .await?;
    Ok(form_response(outcome, INDEX))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Json<ResidenceFormView>> {
    Ok(Json(
        state
            .visit(session_id, move |visit| residences::edit_form(visit, id))
            .await?,
    ))
}

pub async fn edit(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
    ValidForm(form): ValidForm<ResidenceForm>,
) -> Result<Response> {
    let outcome = state
        .visit(session_id, move |visit| residences::edit(visit, id, form))
        .await?;
    Ok(form_response(outcome, INDEX))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Json<ResidenceOverview>> {
    Ok(Json(
        state
            .visit(session_id, move |visit| residences::delete_form(visit, id))
            .await?,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state
        .visit(session_id, move |visit| residences::delete(visit, id))
        .await?;
    Ok(Redirect::to(INDEX))
}
