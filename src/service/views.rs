//! View models handed to the presentation layer.

use super::forms::{LocationForm, ResidenceForm, UserForm};
use crate::availability::FilterCriteria;
use crate::booking_db::{Location, Reservation, Residence, User};
use crate::validation::ModelErrors;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidenceListing {
    pub residence: Residence,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub filter: FilterCriteria,
    pub residences: Vec<ResidenceListing>,
    pub locations: Vec<Location>,
    pub message: Option<String>,
}

/// Pre-filled reservation offered on the details page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationDraft {
    pub residence_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub nights: i64,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidenceDetailView {
    pub residence: Residence,
    pub location: Location,
    pub filter: FilterCriteria,
    pub reservation: ReservationDraft,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookedReservation {
    pub reservation: Reservation,
    pub residence: Residence,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationListView {
    pub reservations: Vec<BookedReservation>,
    pub filter: FilterCriteria,
    pub message: Option<String>,
}

/// Where a reservation attempt sends the visitor next.
#[derive(Debug, Clone, PartialEq)]
pub enum ReserveOutcome {
    Reserved(Reservation),
    Unavailable { residence_id: i64 },
}

// Admin area

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidenceOverview {
    pub residence: Residence,
    pub location: Location,
    pub owner: User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub message: Option<String>,
}

/// Choices offered by the residence create/edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidenceChoices {
    pub locations: Vec<Location>,
    pub owners: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidenceFormView {
    pub residence: ResidenceForm,
    pub choices: ResidenceChoices,
}

/// A rejected form submission, sent back together with what was submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidForm<F> {
    pub form: F,
    pub errors: ModelErrors,
    pub message: String,
}

pub const FIX_VALIDATION_ERRORS: &str = "Please fix the validation errors.";

impl<F> InvalidForm<F> {
    pub fn new(form: F, errors: ModelErrors) -> Self {
        InvalidForm {
            form,
            errors,
            message: FIX_VALIDATION_ERRORS.to_string(),
        }
    }
}

/// Result of a create or edit submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome<T, F> {
    Saved(T),
    Invalid(InvalidForm<F>),
}

pub type LocationOutcome = FormOutcome<Location, LocationForm>;
pub type UserOutcome = FormOutcome<User, UserForm>;
pub type ResidenceOutcome = FormOutcome<Residence, ResidenceFormView>;
