//! Admin area handlers, mounted below `/admin`.

mod locations;
mod residences;
mod users;

use super::AppState;
use crate::service::views::FormOutcome;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/locations", get(locations::index))
        .route(
            "/locations/create",
            get(locations::create_form).post(locations::create),
        )
        .route(
            "/locations/:id/edit",
            get(locations::edit_form).post(locations::edit),
        )
        .route(
            "/locations/:id/delete",
            get(locations::delete_form).post(locations::delete),
        )
        .route("/users", get(users::index))
        .route("/users/create", get(users::create_form).post(users::create))
        .route("/users/:id/edit", get(users::edit_form).post(users::edit))
        .route(
            "/users/:id/delete",
            get(users::delete_form).post(users::delete),
        )
        .route("/residences", get(residences::index))
        .route(
            "/residences/create",
            get(residences::create_form).post(residences::create),
        )
        .route(
            "/residences/:id/edit",
            get(residences::edit_form).post(residences::edit),
        )
        .route(
            "/residences/:id/delete",
            get(residences::delete_form).post(residences::delete),
        )
}

/// Saved forms go back to the list, rejected ones are answered with their errors.
fn form_response<T, F: Serialize>(outcome: FormOutcome<T, F>, index: &str) -> Response {
    match outcome {
        FormOutcome::Saved(_) => Redirect::to(index).into_response(),
        FormOutcome::Invalid(invalid) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(invalid)).into_response()
        }
    }
}
