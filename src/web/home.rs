//! Guest facing handlers: browsing, reserving and cancelling.

use super::form::ValidForm;
use super::{AppState, Result};
use crate::service::booking;
use crate::service::forms::{CancelForm, FilterForm, ReserveForm};
use crate::service::views::{HomeView, ReservationListView, ReserveOutcome, ResidenceDetailView};
use crate::session::SessionId;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Extension, Json};
use tracing::debug;

pub async fn index(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<HomeView>> {
    Ok(Json(state.visit(session_id, booking::index).await?))
}

pub async fn filter(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    ValidForm(form): ValidForm<FilterForm>,
) -> Result<Redirect> {
    debug!(?form, "filter submitted");
    state
        .visit(session_id, move |visit| booking::filter(visit, Some(form.into())))
        .await?;
    Ok(Redirect::to("/"))
}

pub async fn details(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Json<ResidenceDetailView>> {
    Ok(Json(
        state
            .visit(session_id, move |visit| booking::details(visit, id))
            .await?,
    ))
}

pub async fn reserve(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    ValidForm(form): ValidForm<ReserveForm>,
) -> Result<Redirect> {
    let booking_user_id = state.booking_user_id();
    let outcome = state
        .visit(session_id, move |visit| {
            booking::reserve(visit, &form, booking_user_id)
        })
        .await?;

    Ok(match outcome {
        ReserveOutcome::Reserved(_) => Redirect::to("/"),
        ReserveOutcome::Unavailable { residence_id } => {
            Redirect::to(&format!("/residences/{}", residence_id))
        }
    })
}

pub async fn reservations(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<ReservationListView>> {
    Ok(Json(state.visit(session_id, booking::reservations).await?))
}

pub async fn cancel(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    ValidForm(form): ValidForm<CancelForm>,
) -> Result<Redirect> {
    state
        .visit(session_id, move |visit| booking::cancel(visit, &form))
        .await?;
    Ok(Redirect::to("/reservations"))
}

pub async fn reservation_count(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<usize>> {
    Ok(Json(
        state.visit(session_id, booking::reservation_count).await?,
    ))
}
