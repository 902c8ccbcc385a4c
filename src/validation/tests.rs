use super::*;
use crate::booking_db::UserType;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

fn valid_user() -> user::InsertFull {
    user::InsertFull {
        name: "Ada".to_string(),
        phone_number: Some("312-555-0100".to_string()),
        email: Some("ada@example.com".to_string()),
        ssn: Some("123-45-6789".to_string()),
        user_type: UserType::Owner,
        dob: NaiveDate::from_ymd_opt(1985, 12, 10),
    }
}

fn valid_residence() -> residence::InsertFull {
    residence::InsertFull {
        name: "Loft".to_string(),
        residence_picture: "loft.jpg".to_string(),
        location_id: 1,
        owner_id: 1,
        guest_number: 2,
        bedroom_number: 1,
        bathroom_number: 1,
        built_year: 2001,
        price_per_night: 99.5,
    }
}

#[test]
fn location_names() {
    let ok = location::InsertFull {
        name: "Chicago".to_string(),
    };
    assert!(validate_location(&ok).is_valid());

    let blank = location::InsertFull {
        name: "   ".to_string(),
    };
    assert!(validate_location(&blank).has_error("name"));

    let long = location::InsertFull {
        name: "x".repeat(MAX_LOCATION_NAME_LEN + 1),
    };
    assert!(validate_location(&long).has_error("name"));
}

#[test]
fn valid_user_passes() {
    assert!(validate_user(&valid_user(), today()).is_valid());
}

#[test]
fn user_needs_a_means_of_contact() {
    let mut user = valid_user();
    user.phone_number = None;
    user.email = Some("  ".to_string());

    let errors = validate_user(&user, today());
    assert_eq!(
        errors.field(MODEL_KEY),
        &["Either Phone Number or Email must be provided as a means of contact.".to_string()]
    );

    // One of both is enough.
    user.email = Some("ada@example.com".to_string());
    assert!(validate_user(&user, today()).is_valid());
}

#[test]
fn user_field_formats() {
    let mut user = valid_user();
    user.phone_number = Some("3125550100".to_string());
    user.email = Some("not-an-email".to_string());
    user.ssn = Some("12-345-6789".to_string());
    user.dob = Some(today());
    user.name = String::new();

    let errors = validate_user(&user, today());
    assert!(errors.has_error("phone_number"));
    assert!(errors.has_error("email"));
    assert!(errors.has_error("ssn"));
    assert!(errors.has_error("dob"));
    assert!(errors.has_error("name"));
    assert_eq!(errors.len(), 5);
}

#[test]
fn email_shapes() {
    assert!(is_email("a@b.co"));
    assert!(is_email("first.last@mail.example.com"));
    assert!(!is_email("a@b"));
    assert!(!is_email("@b.com"));
    assert!(!is_email("a@@b.com"));
    assert!(!is_email("a@b..com"));
    assert!(!is_email("a b@c.com"));
}

#[test]
fn valid_residence_passes() {
    assert!(validate_residence(&valid_residence(), 2025, true, true).is_valid());
}

#[test]
fn residence_rules() {
    let mut residence = valid_residence();
    residence.guest_number = 0;
    residence.bedroom_number = -1;
    residence.bathroom_number = 0;
    residence.built_year = 2026;
    residence.price_per_night = 0.0;
    residence.residence_picture = String::new();

    let errors = validate_residence(&residence, 2025, false, false);
    for field in &[
        "guest_number",
        "bedroom_number",
        "bathroom_number",
        "built_year",
        "price_per_night",
        "residence_picture",
        "owner_id",
        "location_id",
    ] {
        assert!(errors.has_error(field), "expected error on {}", field);
    }
    assert_eq!(
        errors.field("owner_id"),
        &["Owner (User) does not exist. Please select a valid owner.".to_string()]
    );

    residence.built_year = 1799;
    assert!(validate_residence(&residence, 2025, true, true).has_error("built_year"));
    residence.built_year = 1800;
    assert!(!validate_residence(&residence, 2025, true, true).has_error("built_year"));
}

#[test]
fn stays_need_at_least_one_night() {
    let day = today();
    assert!(validate_stay(&DateRange::new(day, day.succ_opt().unwrap())).is_valid());
    assert!(validate_stay(&DateRange::new(day, day)).has_error("end_date"));
}

#[test]
fn errors_convert_into_results() {
    assert_eq!(ModelErrors::new().into_result(), Ok(()));

    let mut errors = ModelErrors::new();
    errors.add("name", "broken");
    assert_eq!(errors.to_string(), "broken");
    assert!(errors.into_result().is_err());
}
