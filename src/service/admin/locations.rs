use super::super::forms::LocationForm;
use super::super::views::*;
use super::*;
use crate::booking_db::{Location, QueryOptions};
use crate::validation;
use tracing::debug;

const ENTITY: &str = "Location";
const DUPLICATE_NAME: &str = "A location with this name already exists.";

pub fn index(visit: &Visit) -> Result<ListView<Location>> {
    Ok(ListView {
        items: visit.db.get_locations(&QueryOptions::default())?,
        message: visit.take_flash()?,
    })
}

pub fn edit_form(visit: &Visit, id: i64) -> Result<LocationForm> {
    let location = visit.db.get_location(id)?.ok_or(ServiceError::NotFound)?;
    Ok(LocationForm::from(&location))
}

pub fn create(visit: &Visit, form: LocationForm) -> Result<LocationOutcome> {
    let new_location = form.to_insert();
    let errors = validation::validate_location(&new_location);
    if !errors.is_valid() {
        debug!(%errors, "rejected location");
        return Ok(FormOutcome::Invalid(InvalidForm::new(form, errors)));
    }

    let stored = store_or_invalid("name", DUPLICATE_NAME, || {
        Ok(visit.db.add_location(&new_location)?)
    });
    match stored {
        Ok(location) => {
            flash_saved(visit, ENTITY, "created")?;
            Ok(FormOutcome::Saved(location))
        }
        Err(ServiceError::Invalid { errors }) => Ok(FormOutcome::Invalid(InvalidForm::new(form, errors))),
        Err(err) => Err(err),
    }
}

pub fn edit(visit: &Visit, id: i64, form: LocationForm) -> Result<LocationOutcome> {
    check_form_id(id, form.id)?;

    let changed = form.to_insert();
    let errors = validation::validate_location(&changed);
    if !errors.is_valid() {
        debug!(%errors, "rejected location");
        return Ok(FormOutcome::Invalid(InvalidForm::new(form, errors)));
    }

    let location = Location {
        id,
        name: changed.name,
    };
    let stored = store_or_invalid("name", DUPLICATE_NAME, || {
        Ok(visit.db.update_location(&location)?)
    });
    match stored {
        Ok(()) => {
            flash_saved(visit, ENTITY, "updated")?;
            Ok(FormOutcome::Saved(location))
        }
        Err(ServiceError::Invalid { errors }) => Ok(FormOutcome::Invalid(InvalidForm::new(form, errors))),
        Err(err) => Err(err),
    }
}

pub fn delete_form(visit: &Visit, id: i64) -> Result<Location> {
    visit.db.get_location(id)?.ok_or(ServiceError::NotFound)
}

/// Deletes the location if it exists. Locations still holding residences are a conflict.
pub fn delete(visit: &Visit, id: i64) -> Result<bool> {
    let deleted = visit.db.delete_location(id)?;
    if deleted {
        flash_saved(visit, ENTITY, "deleted")?;
    }
    Ok(deleted)
}
