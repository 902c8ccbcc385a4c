use super::booking::*;
use super::forms::{CancelForm, ReserveForm};
use super::views::ReserveOutcome;
use super::*;
use crate::availability::FilterCriteria;
use crate::booking_db::{location, residence, user, Residence, UserType};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, month, day).unwrap()
}

struct Fixture {
    db: BookingDB,
    sessions: SessionStore,
    session_id: SessionId,
    loft: Residence,
    house: Residence,
}

impl Fixture {
    fn new() -> Self {
        let db = BookingDB::open(":memory:").unwrap();
        let chicago = db
            .add_location(&location::InsertFull {
                name: "Chicago".to_string(),
            })
            .unwrap();
        let boston = db
            .add_location(&location::InsertFull {
                name: "Boston".to_string(),
            })
            .unwrap();
        let owner = db
            .add_user(&user::InsertFull {
                name: "Owner".to_string(),
                email: Some("owner@example.com".to_string()),
                user_type: UserType::Owner,
                ..Default::default()
            })
            .unwrap();
        let add_residence = |name: &str, location_id: i64, guests: i32| {
            db.add_residence(&residence::InsertFull {
                name: name.to_string(),
                residence_picture: "picture.jpg".to_string(),
                location_id,
                owner_id: owner.id,
                guest_number: guests,
                bedroom_number: 1,
                bathroom_number: 1,
                built_year: 2000,
                price_per_night: 100.0,
            })
            .unwrap()
        };
        let loft = add_residence("Loft", chicago.id, 2);
        let house = add_residence("House", boston.id, 6);

        let sessions = SessionStore::default();
        let (session_id, _) = sessions.load_or_create(None).unwrap();
        Fixture {
            db,
            sessions,
            session_id,
            loft,
            house,
        }
    }

    fn visit(&self) -> Visit {
        Visit {
            db: &self.db,
            sessions: &self.sessions,
            session_id: self.session_id,
            today: date(6, 1),
        }
    }

    fn reserve(&self, residence: &Residence, start: NaiveDate, end: NaiveDate) -> ReserveOutcome {
        reserve(
            &self.visit(),
            &ReserveForm {
                residence_id: residence.id,
                start_date: start,
                end_date: end,
            },
            None,
        )
        .unwrap()
    }
}

#[test]
fn index_applies_the_session_filter() {
    let fixture = Fixture::new();
    let visit = fixture.visit();

    let view = index(&visit).unwrap();
    assert_eq!(view.residences.len(), 2);
    // Locations are offered by name.
    let names: Vec<_> = view.locations.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Boston", "Chicago"]);

    filter(
        &visit,
        Some(FilterCriteria {
            guest_number: Some(4),
            ..Default::default()
        }),
    )
    .unwrap();
    let view = index(&visit).unwrap();
    assert_eq!(view.filter.guest_number, Some(4));
    assert_eq!(view.residences.len(), 1);
    assert_eq!(view.residences[0].residence, fixture.house);
    assert_eq!(view.residences[0].location.name, "Boston");

    // A missing filter resets to 'everything'.
    filter(&visit, None).unwrap();
    assert_eq!(index(&visit).unwrap().residences.len(), 2);
}

#[test]
fn details_offer_a_draft_for_the_filtered_stay() {
    let fixture = Fixture::new();
    let visit = fixture.visit();

    let view = details(&visit, fixture.loft.id).unwrap();
    assert_eq!(view.reservation.start_date, date(6, 1));
    assert_eq!(view.reservation.end_date, date(6, 2));
    assert_eq!(view.reservation.nights, 1);
    assert_eq!(view.location.name, "Chicago");

    filter(
        &visit,
        Some(FilterCriteria {
            check_in_date: Some(date(7, 1)),
            check_out_date: Some(date(7, 4)),
            ..Default::default()
        }),
    )
    .unwrap();
    let view = details(&visit, fixture.loft.id).unwrap();
    assert_eq!(view.reservation.start_date, date(7, 1));
    assert_eq!(view.reservation.end_date, date(7, 4));
    assert_eq!(view.reservation.nights, 3);
    assert!((view.reservation.total_price - 300.0).abs() < 1e-9);

    match details(&visit, 4711) {
        Err(ServiceError::NotFound) => (),
        _ => panic!("Unknown residences must not be found!"),
    }
}

#[test]
fn reserve_and_flash_the_outcome() {
    let fixture = Fixture::new();
    let visit = fixture.visit();

    let reservation = match fixture.reserve(&fixture.loft, date(7, 1), date(7, 5)) {
        ReserveOutcome::Reserved(reservation) => reservation,
        other => panic!("Expected a reservation, got {:?}", other),
    };
    assert_eq!(reservation_count(&visit).unwrap(), 1);
    assert_eq!(index(&visit).unwrap().message.as_deref(), Some(RESERVATION_COMPLETED));
    // Flash messages are only shown once.
    assert_eq!(index(&visit).unwrap().message, None);

    assert_eq!(
        fixture.reserve(&fixture.loft, date(7, 3), date(7, 8)),
        ReserveOutcome::Unavailable {
            residence_id: fixture.loft.id
        }
    );
    assert_eq!(
        details(&visit, fixture.loft.id).unwrap().message.as_deref(),
        Some(RESERVATION_UNAVAILABLE)
    );
    assert_eq!(reservation_count(&visit).unwrap(), 1);

    // The stored reservation hides the residence when browsing that stay.
    filter(
        &visit,
        Some(FilterCriteria {
            check_in_date: Some(date(7, 4)),
            check_out_date: Some(date(7, 6)),
            ..Default::default()
        }),
    )
    .unwrap();
    let view = index(&visit).unwrap();
    assert_eq!(view.residences.len(), 1);
    assert_eq!(view.residences[0].residence.id, fixture.house.id);

    let listed = reservations(&visit).unwrap();
    assert_eq!(listed.reservations.len(), 1);
    assert_eq!(listed.reservations[0].reservation, reservation);
    assert_eq!(listed.reservations[0].residence, fixture.loft);
}

#[test]
fn reserve_rejects_bad_requests() {
    let fixture = Fixture::new();
    let visit = fixture.visit();

    let empty_stay = ReserveForm {
        residence_id: fixture.loft.id,
        start_date: date(7, 5),
        end_date: date(7, 5),
    };
    match reserve(&visit, &empty_stay, None) {
        Err(ServiceError::Invalid { errors }) => assert!(errors.has_error("end_date")),
        other => panic!("Expected a validation error, got {:?}", other),
    }

    let unknown = ReserveForm {
        residence_id: 4711,
        start_date: date(7, 1),
        end_date: date(7, 5),
    };
    match reserve(&visit, &unknown, None) {
        Err(ServiceError::NotFound) => (),
        other => panic!("Expected not found, got {:?}", other),
    }
}

#[test]
fn reservations_are_attributed_to_existing_booking_users() {
    let fixture = Fixture::new();
    let visit = fixture.visit();
    let owner_id = fixture.db.get_owners().unwrap()[0].id;

    let request = ReserveForm {
        residence_id: fixture.loft.id,
        start_date: date(7, 1),
        end_date: date(7, 2),
    };
    match reserve(&visit, &request, Some(owner_id)).unwrap() {
        ReserveOutcome::Reserved(reservation) => assert_eq!(reservation.user_id, Some(owner_id)),
        other => panic!("Expected a reservation, got {:?}", other),
    }

    let request = ReserveForm {
        residence_id: fixture.loft.id,
        start_date: date(8, 1),
        end_date: date(8, 2),
    };
    match reserve(&visit, &request, Some(4711)).unwrap() {
        ReserveOutcome::Reserved(reservation) => assert_eq!(reservation.user_id, None),
        other => panic!("Expected a reservation, got {:?}", other),
    }
}

#[test]
fn cancel_by_reservation_or_residence() {
    let fixture = Fixture::new();
    let visit = fixture.visit();

    fixture.reserve(&fixture.loft, date(7, 1), date(7, 5));
    fixture.reserve(&fixture.house, date(7, 1), date(7, 5));
    let booked = reservations(&visit).unwrap().reservations;
    assert_eq!(booked.len(), 2);

    // By id
    let first_id = booked[0].reservation.id;
    assert!(cancel(
        &visit,
        &CancelForm {
            reservation_id: Some(first_id),
            residence_id: None,
        }
    )
    .unwrap());
    assert!(!fixture.db.reservation_exists(first_id).unwrap());
    assert_eq!(
        reservations(&visit).unwrap().message.as_deref(),
        Some(RESERVATION_CANCELLED)
    );

    // By residence as fallback
    assert!(cancel(
        &visit,
        &CancelForm {
            reservation_id: Some(0),
            residence_id: Some(fixture.house.id),
        }
    )
    .unwrap());
    assert_eq!(reservation_count(&visit).unwrap(), 0);

    // Nothing left to cancel
    assert!(!cancel(
        &visit,
        &CancelForm {
            reservation_id: Some(first_id),
            residence_id: Some(fixture.house.id),
        }
    )
    .unwrap());
}

#[test]
fn cancel_only_touches_own_reservations() {
    let fixture = Fixture::new();
    let visit = fixture.visit();
    fixture.reserve(&fixture.loft, date(7, 1), date(7, 5));
    let reservation_id = fixture.sessions.get(&fixture.session_id).unwrap().reservation_ids[0];

    let (other_session, _) = fixture.sessions.load_or_create(None).unwrap();
    let other_visit = Visit {
        session_id: other_session,
        ..fixture.visit()
    };
    assert!(!cancel(
        &other_visit,
        &CancelForm {
            reservation_id: Some(reservation_id),
            residence_id: Some(fixture.loft.id),
        }
    )
    .unwrap());
    assert!(fixture.db.reservation_exists(reservation_id).unwrap());
    assert_eq!(reservation_count(&visit).unwrap(), 1);
}

#[test]
fn cancel_falls_back_to_the_residence_for_foreign_ids() {
    let fixture = Fixture::new();
    let visit = fixture.visit();
    fixture.reserve(&fixture.loft, date(7, 1), date(7, 5));
    let own_id = fixture.sessions.get(&fixture.session_id).unwrap().reservation_ids[0];

    let (other_session, _) = fixture.sessions.load_or_create(None).unwrap();
    let other_visit = Visit {
        session_id: other_session,
        ..fixture.visit()
    };
    let foreign = match reserve(
        &other_visit,
        &ReserveForm {
            residence_id: fixture.loft.id,
            start_date: date(8, 1),
            end_date: date(8, 5),
        },
        None,
    )
    .unwrap()
    {
        ReserveOutcome::Reserved(reservation) => reservation,
        other => panic!("Expected a reservation, got {:?}", other),
    };

    // The foreign id is ignored, the residence picks our own booking.
    assert!(cancel(
        &visit,
        &CancelForm {
            reservation_id: Some(foreign.id),
            residence_id: Some(fixture.loft.id),
        }
    )
    .unwrap());
    assert!(!fixture.db.reservation_exists(own_id).unwrap());
    assert!(fixture.db.reservation_exists(foreign.id).unwrap());
    assert_eq!(reservation_count(&visit).unwrap(), 0);
    assert_eq!(reservation_count(&other_visit).unwrap(), 1);
}

#[test]
fn details_fill_in_a_missing_filter_date() {
    let fixture = Fixture::new();
    let visit = fixture.visit();

    filter(
        &visit,
        Some(FilterCriteria {
            check_out_date: Some(date(6, 4)),
            ..Default::default()
        }),
    )
    .unwrap();
    let view = details(&visit, fixture.loft.id).unwrap();
    assert_eq!(view.reservation.start_date, date(6, 1));
    assert_eq!(view.reservation.end_date, date(6, 4));
    assert_eq!(view.reservation.nights, 3);
    assert!((view.reservation.total_price - 300.0).abs() < 1e-9);

    // A check-in after tomorrow leaves a draft without nights.
    filter(
        &visit,
        Some(FilterCriteria {
            check_in_date: Some(date(7, 1)),
            ..Default::default()
        }),
    )
    .unwrap();
    let view = details(&visit, fixture.loft.id).unwrap();
    assert_eq!(view.reservation.start_date, date(7, 1));
    assert_eq!(view.reservation.end_date, date(6, 2));
    assert_eq!(view.reservation.nights, 0);
    assert!(view.reservation.total_price.abs() < 1e-9);
}

#[test]
fn vanished_reservations_are_forgotten() {
    let fixture = Fixture::new();
    let visit = fixture.visit();
    fixture.reserve(&fixture.loft, date(7, 1), date(7, 5));
    fixture.reserve(&fixture.house, date(7, 1), date(7, 5));

    fixture.db.delete_residence(fixture.loft.id).unwrap();

    let listed = reservations(&visit).unwrap();
    assert_eq!(listed.reservations.len(), 1);
    assert_eq!(listed.reservations[0].residence, fixture.house);
    assert_eq!(reservation_count(&visit).unwrap(), 1);
}
