//! Submitted form models and the conversion into database models.
//!
//! Browsers send empty inputs as empty strings, so optional fields are bound
//! through `empty_as_none` instead of serde's default `Option` handling.

use crate::availability::FilterCriteria;
use crate::booking_db::{location, residence, user, UserType};
use crate::validation::ModelErrors;
use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binds a missing or blank value to None and parses everything else with `FromStr`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub location_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub guest_number: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub check_in_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub check_out_date: Option<NaiveDate>,
}

impl From<FilterForm> for FilterCriteria {
    fn from(form: FilterForm) -> Self {
        FilterCriteria {
            location_id: form.location_id,
            guest_number: form.guest_number,
            check_in_date: form.check_in_date,
            check_out_date: form.check_out_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveForm {
    pub residence_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub reservation_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub residence_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
}

impl LocationForm {
    pub fn to_insert(&self) -> location::InsertFull {
        location::InsertFull {
            name: self.name.trim().to_string(),
        }
    }
}

/// Parses a submitted value that must be present.
fn required_field<T: FromStr>(
    errors: &mut ModelErrors,
    field: &str,
    value: Option<&str>,
    label: &str,
) -> Option<T> {
    match value {
        Some(value) => optional_field(errors, field, Some(value), label),
        None => {
            errors.add(field, format!("Please enter the {}.", label));
            None
        }
    }
}

/// Parses a submitted value, reporting values that do not parse on `field`.
fn optional_field<T: FromStr>(
    errors: &mut ModelErrors,
    field: &str,
    value: Option<&str>,
    label: &str,
) -> Option<T> {
    let value = value?;
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(
                field,
                format!("The value '{}' is not valid for {}.", value, label),
            );
            None
        }
    }
}

/// Admin forms keep what was typed: values are parsed when converting, so a
/// rejected form can be sent back as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub ssn: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_type: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub dob: Option<String>,
}

impl UserForm {
    /// Converts the form, reporting missing and unreadable fields.
    pub fn to_insert(&self) -> (user::InsertFull, ModelErrors) {
        let mut errors = ModelErrors::new();
        let user_type = match self.user_type.as_deref() {
            Some(user_type) => {
                optional_field::<UserType>(&mut errors, "user_type", Some(user_type), "user type")
            }
            None => {
                errors.add("user_type", "Please select a user type.");
                None
            }
        };
        let dob = optional_field::<NaiveDate>(
            &mut errors,
            "dob",
            self.dob.as_deref(),
            "date of birth",
        );

        let user = user::InsertFull {
            name: self.name.trim().to_string(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            ssn: self.ssn.clone(),
            user_type: user_type.unwrap_or_default(),
            dob,
        };
        (user, errors)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResidenceForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub residence_picture: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub location_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub guest_number: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub bedroom_number: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub bathroom_number: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub built_year: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub price_per_night: Option<String>,
}

impl ResidenceForm {
    /// Converts the form, reporting missing and unreadable fields.
    /// Unset location and owner ids convert to 0 and are caught by the existence checks.
    pub fn to_insert(&self) -> (residence::InsertFull, ModelErrors) {
        let mut errors = ModelErrors::new();
        let location_id = optional_field(
            &mut errors,
            "location_id",
            self.location_id.as_deref(),
            "location",
        );
        let owner_id = optional_field(&mut errors, "owner_id", self.owner_id.as_deref(), "owner");
        let guest_number = required_field(
            &mut errors,
            "guest_number",
            self.guest_number.as_deref(),
            "guest number",
        );
        let bedroom_number = required_field(
            &mut errors,
            "bedroom_number",
            self.bedroom_number.as_deref(),
            "bedroom number",
        );
        let bathroom_number = required_field(
            &mut errors,
            "bathroom_number",
            self.bathroom_number.as_deref(),
            "bathroom number",
        );
        let built_year = required_field(
            &mut errors,
            "built_year",
            self.built_year.as_deref(),
            "built year",
        );
        let price_per_night = required_field(
            &mut errors,
            "price_per_night",
            self.price_per_night.as_deref(),
            "price per night",
        );

        let residence = residence::InsertFull {
            name: self.name.trim().to_string(),
            residence_picture: self.residence_picture.trim().to_string(),
            location_id: location_id.unwrap_or(0),
            owner_id: owner_id.unwrap_or(0),
            guest_number: guest_number.unwrap_or(0),
            bedroom_number: bedroom_number.unwrap_or(0),
            bathroom_number: bathroom_number.unwrap_or(0),
            built_year: built_year.unwrap_or(0),
            price_per_night: price_per_night.unwrap_or(0.0),
        };
        (residence, errors)
    }
}

impl From<&crate::booking_db::Location> for LocationForm {
    fn from(location: &crate::booking_db::Location) -> Self {
        LocationForm {
            id: Some(location.id),
            name: location.name.clone(),
        }
    }
}

impl From<&crate::booking_db::User> for UserForm {
    fn from(user: &crate::booking_db::User) -> Self {
        UserForm {
            id: Some(user.id),
            name: user.name.clone(),
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
            ssn: user.ssn.clone(),
            user_type: Some(user.user_type.to_string()),
            dob: user.dob.map(|dob| dob.to_string()),
        }
    }
}

impl From<&crate::booking_db::Residence> for ResidenceForm {
    fn from(residence: &crate::booking_db::Residence) -> Self {
        ResidenceForm {
            id: Some(residence.id),
            name: residence.name.clone(),
            residence_picture: residence.residence_picture.clone(),
            location_id: Some(residence.location_id.to_string()),
            owner_id: Some(residence.owner_id.to_string()),
            guest_number: Some(residence.guest_number.to_string()),
            bedroom_number: Some(residence.bedroom_number.to_string()),
            bathroom_number: Some(residence.bathroom_number.to_string()),
            built_year: Some(residence.built_year.to_string()),
            price_per_night: Some(residence.price_per_night.to_string()),
        }
    }
}
