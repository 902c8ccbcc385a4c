use super::super::forms::ResidenceForm;
use super::super::views::*;
use super::*;
use crate::booking_db::{residence, QueryOptions, Residence};
use crate::validation::{self, ModelErrors};
use chrono::Datelike;
use tracing::debug;

const ENTITY: &str = "Residence";

pub fn index(visit: &Visit) -> Result<ListView<ResidenceOverview>> {
    let items = visit
        .db
        .get_residences_with_details(&QueryOptions::default())?
        .into_iter()
        .map(|(residence, location, owner)| ResidenceOverview {
            residence,
            location,
            owner,
        })
        .collect();

    Ok(ListView {
        items,
        message: visit.take_flash()?,
    })
}

pub fn choices(visit: &Visit) -> Result<ResidenceChoices> {
    Ok(ResidenceChoices {
        locations: visit.db.get_locations(&QueryOptions::by_name())?,
        owners: visit.db.get_owners()?,
    })
}

pub fn create_form(visit: &Visit) -> Result<ResidenceFormView> {
    Ok(ResidenceFormView {
        residence: ResidenceForm::default(),
        choices: choices(visit)?,
    })
}

pub fn edit_form(visit: &Visit, id: i64) -> Result<ResidenceFormView> {
    let residence = visit.db.get_residence(id)?.ok_or(ServiceError::NotFound)?;
    Ok(ResidenceFormView {
        residence: ResidenceForm::from(&residence),
        choices: choices(visit)?,
    })
}

fn validate(visit: &Visit, form: &ResidenceForm) -> Result<(residence::InsertFull, ModelErrors)> {
    let (residence, mut errors) = form.to_insert();
    let owner_exists = visit.db.user_exists(residence.owner_id)?;
    let location_exists = visit.db.location_exists(residence.location_id)?;
    errors.merge(validation::validate_residence(
        &residence,
        visit.today.year(),
        owner_exists,
        location_exists,
    ));
    Ok((residence, errors))
}

fn invalid(visit: &Visit, form: ResidenceForm, errors: ModelErrors) -> Result<ResidenceOutcome> {
    debug!(%errors, "rejected residence");
    let view = ResidenceFormView {
        residence: form,
        choices: choices(visit)?,
    };
    Ok(FormOutcome::Invalid(InvalidForm::new(view, errors)))
}

pub fn create(visit: &Visit, form: ResidenceForm) -> Result<ResidenceOutcome> {
    let (new_residence, errors) = validate(visit, &form)?;
    if !errors.is_valid() {
        return invalid(visit, form, errors);
    }

    let residence = visit.db.add_residence(&new_residence)?;
    flash_saved(visit, ENTITY, "created")?;
    Ok(FormOutcome::Saved(residence))
}

pub fn edit(visit: &Visit, id: i64, form: ResidenceForm) -> Result<ResidenceOutcome> {
    check_form_id(id, form.id)?;

    let (changed, errors) = validate(visit, &form)?;
    if !errors.is_valid() {
        return invalid(visit, form, errors);
    }

    let residence = Residence {
        id,
        name: changed.name,
        residence_picture: changed.residence_picture,
        location_id: changed.location_id,
        owner_id: changed.owner_id,
        guest_number: changed.guest_number,
        bedroom_number: changed.bedroom_number,
        bathroom_number: changed.bathroom_number,
        built_year: changed.built_year,
        price_per_night: changed.price_per_night,
    };
    visit.db.update_residence(&residence)?;
    flash_saved(visit, ENTITY, "updated")?;
    Ok(FormOutcome::Saved(residence))
}

pub fn delete_form(visit: &Visit, id: i64) -> Result<ResidenceOverview> {
    let (residence, location, owner) = visit
        .db
        .get_residence_with_details(id)?
        .ok_or(ServiceError::NotFound)?;
    Ok(ResidenceOverview {
        residence,
        location,
        owner,
    })
}

/// Deletes the residence (and its reservations) if it exists.
pub fn delete(visit: &Visit, id: i64) -> Result<bool> {
    let deleted = visit.db.delete_residence(id)?;
    if deleted {
        flash_saved(visit, ENTITY, "deleted")?;
    }
    Ok(deleted)
}
