use super::*;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

fn range(start: u32, end: u32) -> DateRange {
    DateRange::new(date(start), date(end))
}

fn reservation(residence_id: i64, start: u32, end: u32) -> Reservation {
    Reservation {
        id: 0,
        residence_id,
        user_id: None,
        reservation_start_date: date(start),
        reservation_end_date: date(end),
    }
}

#[test]
fn overlapping_ranges() {
    assert!(range(1, 5).overlaps(&range(3, 8)));
    assert!(range(3, 8).overlaps(&range(1, 5)));
    // Containment in both directions
    assert!(range(1, 10).overlaps(&range(3, 4)));
    assert!(range(3, 4).overlaps(&range(1, 10)));
    assert!(range(2, 6).overlaps(&range(2, 6)));
}

#[test]
fn back_to_back_stays_do_not_overlap() {
    assert!(!range(1, 5).overlaps(&range(5, 8)));
    assert!(!range(5, 8).overlaps(&range(1, 5)));
    assert!(!range(1, 2).overlaps(&range(10, 12)));
}

#[test]
fn range_validity_and_nights() {
    assert!(range(1, 2).is_valid());
    assert!(!range(2, 2).is_valid());
    assert!(!range(3, 2).is_valid());

    assert_eq!(range(1, 5).nights(), 4);
    assert_eq!(range(5, 1).nights(), 0);
}

#[test]
fn availability_against_reservations() {
    let reservations = vec![reservation(1, 3, 6), reservation(1, 10, 12)];

    assert!(is_available(&reservations, &range(6, 10)));
    assert!(is_available(&reservations, &range(1, 3)));
    assert!(!is_available(&reservations, &range(5, 7)));
    assert!(!is_available(&reservations, &range(1, 20)));
    assert!(is_available(&Vec::new(), &range(1, 20)));
}

#[test]
fn filter_ignores_unset_and_non_positive_values() {
    let criteria = FilterCriteria {
        location_id: Some(0),
        guest_number: Some(-2),
        check_in_date: Some(date(1)),
        check_out_date: None,
    };
    assert_eq!(criteria.location_filter(), None);
    assert_eq!(criteria.guest_filter(), None);
    assert_eq!(criteria.stay(), None);
    assert!(criteria.is_empty());
    assert!(FilterCriteria::default().is_empty());
}

#[test]
fn filter_with_all_criteria() {
    let criteria = FilterCriteria {
        location_id: Some(3),
        guest_number: Some(4),
        check_in_date: Some(date(1)),
        check_out_date: Some(date(4)),
    };
    assert_eq!(criteria.location_filter(), Some(3));
    assert_eq!(criteria.guest_filter(), Some(4));
    assert_eq!(criteria.stay(), Some(range(1, 4)));
    assert!(!criteria.is_empty());
}
