use super::super::forms::UserForm;
use super::super::views::*;
use super::*;
use crate::booking_db::{QueryOptions, User};
use crate::validation::{self, ModelErrors};
use tracing::debug;

const ENTITY: &str = "User";

pub fn index(visit: &Visit) -> Result<ListView<User>> {
    Ok(ListView {
        items: visit.db.get_users(&QueryOptions::default())?,
        message: visit.take_flash()?,
    })
}

pub fn edit_form(visit: &Visit, id: i64) -> Result<UserForm> {
    let user = visit.db.get_user(id)?.ok_or(ServiceError::NotFound)?;
    Ok(UserForm::from(&user))
}

fn validate(visit: &Visit, form: &UserForm) -> (crate::booking_db::user::InsertFull, ModelErrors) {
    let (user, mut errors) = form.to_insert();
    errors.merge(validation::validate_user(&user, visit.today));
    (user, errors)
}

pub fn create(visit: &Visit, form: UserForm) -> Result<UserOutcome> {
    let (new_user, errors) = validate(visit, &form);
    if !errors.is_valid() {
        debug!(%errors, "rejected user");
        return Ok(FormOutcome::Invalid(InvalidForm::new(form, errors)));
    }

    let user = visit.db.add_user(&new_user)?;
    flash_saved(visit, ENTITY, "created")?;
    Ok(FormOutcome::Saved(user))
}

pub fn edit(visit: &Visit, id: i64, form: UserForm) -> Result<UserOutcome> {
    check_form_id(id, form.id)?;

    let (changed, errors) = validate(visit, &form);
    if !errors.is_valid() {
        debug!(%errors, "rejected user");
        return Ok(FormOutcome::Invalid(InvalidForm::new(form, errors)));
    }

    let user = User {
        id,
        name: changed.name,
        phone_number: changed.phone_number,
        email: changed.email,
        ssn: changed.ssn,
        user_type: changed.user_type,
        dob: changed.dob,
    };
    visit.db.update_user(&user)?;
    flash_saved(visit, ENTITY, "updated")?;
    Ok(FormOutcome::Saved(user))
}

pub fn delete_form(visit: &Visit, id: i64) -> Result<User> {
    visit.db.get_user(id)?.ok_or(ServiceError::NotFound)
}

/// Deletes the user if it exists. Users still owning residences are a conflict.
pub fn delete(visit: &Visit, id: i64) -> Result<bool> {
    let deleted = visit.db.delete_user(id)?;
    if deleted {
        flash_saved(visit, ENTITY, "deleted")?;
    }
    Ok(deleted)
}
