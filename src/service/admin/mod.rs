//! Admin area flows: create, edit and delete locations, users and residences.
//!
//! Every successful change leaves a flash message for the next index page.

pub mod locations;
pub mod residences;
pub mod users;

use super::{Result, ServiceError, Visit};

/// Runs a store operation, turning consistency conflicts into a validation error on `field`.
fn store_or_invalid<T, F>(field: &str, message: &str, store: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    match store() {
        Err(ServiceError::Conflict { .. }) => {
            let mut errors = crate::validation::ModelErrors::new();
            errors.add(field, message);
            Err(ServiceError::Invalid { errors })
        }
        other => other,
    }
}

/// Edits must target the entity named in the path. A form without id names no entity.
fn check_form_id(path_id: i64, form_id: Option<i64>) -> Result<()> {
    match form_id {
        Some(form_id) if form_id == path_id => Ok(()),
        _ => Err(ServiceError::NotFound),
    }
}

fn flash_saved(visit: &Visit, entity: &str, action: &str) -> Result<()> {
    visit.set_flash(&format!("{} {} successfully!", entity, action))
}
