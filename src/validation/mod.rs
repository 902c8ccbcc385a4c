//! Model validation for submitted locations, users, residences and reservations.
//!
//! Validation never touches the database by itself, checks that need stored state
//! (e.g. 'does the owner exist') are passed in by the caller.

use crate::availability::DateRange;
use crate::booking_db::{location, residence, user};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[cfg(test)]
mod tests;

pub const MAX_LOCATION_NAME_LEN: usize = 100;
pub const MAX_NAME_LEN: usize = 200;
pub const MIN_BUILT_YEAR: i32 = 1800;

/// Key used for errors concerning the whole model instead of a single field.
pub const MODEL_KEY: &str = "";

/// Field name -> error messages, collected while validating one submitted model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(Vec::new)
            .push(message.into());
    }

    /// Appends all errors of `other`.
    pub fn merge(&mut self, other: ModelErrors) {
        for (field, messages) in other.errors {
            self.errors
                .entry(field)
                .or_insert_with(Vec::new)
                .extend(messages);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_error(&self, field: &str) -> bool {
        !self.field(field).is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.values().map(|messages| messages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.values().flatten().map(|message| message.as_str())
    }

    /// Ok(()) if no error was recorded.
    pub fn into_result(self) -> Result<(), ModelErrors> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ModelErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.messages().collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl std::error::Error for ModelErrors {}

fn is_blank(value: &Option<String>) -> bool {
    value.as_ref().map_or(true, |value| value.trim().is_empty())
}

fn require_name(errors: &mut ModelErrors, field: &str, label: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.add(field, format!("Please enter a {}.", label));
    } else if value.chars().count() > max_len {
        errors.add(
            field,
            format!("{} must be at most {} characters long.", capitalize(label), max_len),
        );
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Matches a pattern where '#' stands for one ASCII digit and every other char for itself.
fn matches_digit_pattern(value: &str, pattern: &str) -> bool {
    value.len() == pattern.len()
        && value.chars().zip(pattern.chars()).all(|(c, p)| match p {
            '#' => c.is_ascii_digit(),
            p => c == p,
        })
}

/// Loose e-mail check: one '@', non-empty local part and a dotted domain.
fn is_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => (local, domain),
        _ => return false,
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

pub fn validate_location(location: &location::InsertFull) -> ModelErrors {
    let mut errors = ModelErrors::new();
    require_name(&mut errors, "name", "location name", &location.name, MAX_LOCATION_NAME_LEN);
    errors
}

/// Validates a submitted user. `today` is the reference date for the date of birth.
pub fn validate_user(user: &user::InsertFull, today: NaiveDate) -> ModelErrors {
    let mut errors = ModelErrors::new();
    require_name(&mut errors, "name", "name", &user.name, MAX_NAME_LEN);

    if is_blank(&user.phone_number) && is_blank(&user.email) {
        errors.add(
            MODEL_KEY,
            "Either Phone Number or Email must be provided as a means of contact.",
        );
    }
    if let Some(phone_number) = user.phone_number.as_deref().filter(|v| !v.trim().is_empty()) {
        if !matches_digit_pattern(phone_number.trim(), "###-###-####") {
            errors.add("phone_number", "Phone number must be in the format 999-999-9999.");
        }
    }
    if let Some(email) = user.email.as_deref().filter(|v| !v.trim().is_empty()) {
        if !is_email(email.trim()) {
            errors.add("email", "Please enter a valid email address.");
        }
    }
    if let Some(ssn) = user.ssn.as_deref().filter(|v| !v.trim().is_empty()) {
        if !matches_digit_pattern(ssn.trim(), "###-##-####") {
            errors.add("ssn", "SSN must be in the format 999-99-9999.");
        }
    }
    if let Some(dob) = user.dob {
        if dob >= today {
            errors.add("dob", "Date of birth must be in the past.");
        }
    }

    errors
}

/// Validates a submitted residence. Whether the referenced owner and location exist
/// is looked up by the caller.
pub fn validate_residence(
    residence: &residence::InsertFull,
    current_year: i32,
    owner_exists: bool,
    location_exists: bool,
) -> ModelErrors {
    let mut errors = ModelErrors::new();
    require_name(&mut errors, "name", "residence name", &residence.name, MAX_NAME_LEN);
    if residence.residence_picture.trim().is_empty() {
        errors.add("residence_picture", "Please enter a picture file name.");
    }

    if !location_exists {
        errors.add("location_id", "Please select a valid location.");
    }
    if !owner_exists {
        errors.add(
            "owner_id",
            "Owner (User) does not exist. Please select a valid owner.",
        );
    }

    if residence.guest_number < 1 {
        errors.add("guest_number", "Guest number must be at least 1.");
    }
    if residence.bedroom_number < 1 {
        errors.add("bedroom_number", "Bedroom number must be at least 1.");
    }
    if residence.bathroom_number < 1 {
        errors.add("bathroom_number", "Bathroom number must be at least 1.");
    }
    if residence.built_year < MIN_BUILT_YEAR || residence.built_year > current_year {
        errors.add(
            "built_year",
            format!(
                "Built year must be between {} and {}.",
                MIN_BUILT_YEAR, current_year
            ),
        );
    }
    if !(residence.price_per_night > 0.0) {
        errors.add("price_per_night", "Price per night must be greater than 0.");
    }

    errors
}

pub fn validate_stay(stay: &DateRange) -> ModelErrors {
    let mut errors = ModelErrors::new();
    if !stay.is_valid() {
        errors.add(
            "end_date",
            "Check-out date must be after the check-in date.",
        );
    }
    errors
}
