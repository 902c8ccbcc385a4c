//! Guest facing flows: browsing, residence details, reserving and cancelling.

use super::forms::{CancelForm, ReserveForm};
use super::views::*;
use super::{Result, ServiceError, Visit};
use crate::availability::{DateRange, FilterCriteria};
use crate::booking_db::{reservation, QueryOptions};
use crate::validation;
use tracing::debug;

pub const RESERVATION_COMPLETED: &str = "Reservation completed successfully!";
pub const RESERVATION_UNAVAILABLE: &str =
    "Sorry, this residence is not available for the selected dates.";
pub const RESERVATION_CANCELLED: &str = "Reservation cancelled successfully!";

/// Residences matching the visitor's stored filter, plus all locations to filter by.
pub fn index(visit: &Visit) -> Result<HomeView> {
    let filter = visit.session()?.filter;
    debug!(?filter, "listing residences with session filter");

    let residences = visit
        .db
        .find_residences(&filter)?
        .into_iter()
        .map(|(residence, location)| ResidenceListing {
            residence,
            location,
        })
        .collect();
    let locations = visit.db.get_locations(&QueryOptions::by_name())?;

    Ok(HomeView {
        filter,
        residences,
        locations,
        message: visit.take_flash()?,
    })
}

/// Stores new browse criteria in the visitor's session.
pub fn filter(visit: &Visit, criteria: Option<FilterCriteria>) -> Result<()> {
    let criteria = criteria.unwrap_or_default();
    debug!(?criteria, active = !criteria.is_empty(), "filter received");

    visit.update_session(|data| data.filter = criteria)
}

/// The residence with its location and a reservation draft for the filtered stay
/// (today until tomorrow if the filter does not name one).
pub fn details(visit: &Visit, residence_id: i64) -> Result<ResidenceDetailView> {
    let (residence, location) = visit
        .db
        .get_residence_with_location(residence_id)?
        .ok_or(ServiceError::NotFound)?;

    let filter = visit.session()?.filter;
    let start_date = filter.check_in_date.unwrap_or(visit.today);
    let end_date = filter
        .check_out_date
        .unwrap_or_else(|| visit.today + chrono::Duration::days(1));
    let nights = DateRange::new(start_date, end_date).nights();

    Ok(ResidenceDetailView {
        reservation: ReservationDraft {
            residence_id,
            start_date,
            end_date,
            nights,
            total_price: residence.price_per_night * nights as f64,
        },
        residence,
        location,
        filter,
        message: visit.take_flash()?,
    })
}

/// Books the residence for the requested stay if no stored reservation overlaps it.
///
/// Either way the outcome is reported to the visitor through the flash message.
pub fn reserve(visit: &Visit, request: &ReserveForm, booking_user_id: Option<i64>) -> Result<ReserveOutcome> {
    let stay = DateRange::new(request.start_date, request.end_date);
    validation::validate_stay(&stay).into_result()?;
    if !visit.db.residence_exists(request.residence_id)? {
        return Err(ServiceError::NotFound);
    }

    let user_id = match booking_user_id {
        Some(user_id) if visit.db.user_exists(user_id)? => Some(user_id),
        _ => None,
    };
    let stored = visit.db.reserve_if_available(&reservation::InsertFull {
        residence_id: request.residence_id,
        user_id,
        reservation_start_date: stay.start,
        reservation_end_date: stay.end,
    })?;

    match stored {
        Some(reservation) => {
            debug!(
                reservation_id = reservation.id,
                residence_id = reservation.residence_id,
                "reservation stored"
            );
            let reservation_id = reservation.id;
            visit.update_session(|data| {
                data.add_reservation(reservation_id);
                data.set_flash(RESERVATION_COMPLETED);
            })?;
            Ok(ReserveOutcome::Reserved(reservation))
        }
        None => {
            debug!(
                residence_id = request.residence_id,
                start = %stay.start,
                end = %stay.end,
                "residence not available"
            );
            visit.set_flash(RESERVATION_UNAVAILABLE)?;
            Ok(ReserveOutcome::Unavailable {
                residence_id: request.residence_id,
            })
        }
    }
}

/// The reservations made in this session, each with its residence.
/// Reservations that were removed in the meantime are forgotten.
pub fn reservations(visit: &Visit) -> Result<ReservationListView> {
    let session = visit.session()?;
    let booked = visit
        .db
        .get_reservations_with_residence(&session.reservation_ids)?;

    if booked.len() != session.reservation_ids.len() {
        let known: Vec<i64> = booked.iter().map(|(reservation, _)| reservation.id).collect();
        visit.update_session(|data| data.reservation_ids.retain(|id| known.contains(id)))?;
    }

    Ok(ReservationListView {
        reservations: booked
            .into_iter()
            .map(|(reservation, residence)| BookedReservation {
                reservation,
                residence,
            })
            .collect(),
        filter: session.filter,
        message: visit.take_flash()?,
    })
}

/// Cancels one of this session's reservations, looked up by its id or (if no id is
/// given) as the first reservation of the given residence.
///
/// Returns false if nothing matched, which is not an error.
pub fn cancel(visit: &Visit, request: &CancelForm) -> Result<bool> {
    let session = visit.session()?;

    let mut target = request
        .reservation_id
        .filter(|id| *id > 0 && session.reservation_ids.contains(id));
    if target.is_none() {
        if let Some(residence_id) = request.residence_id.filter(|id| *id > 0) {
            let booked = visit
                .db
                .get_reservations_with_residence(&session.reservation_ids)?;
            target = session.reservation_ids.iter().copied().find(|id| {
                booked.iter().any(|(reservation, _)| {
                    reservation.id == *id && reservation.residence_id == residence_id
                })
            });
        }
    }

    let reservation_id = match target {
        Some(reservation_id) => reservation_id,
        None => return Ok(false),
    };

    visit.db.delete_reservation(reservation_id)?;
    visit.update_session(|data| {
        data.remove_reservation(reservation_id);
        data.set_flash(RESERVATION_CANCELLED);
    })?;
    debug!(reservation_id, "reservation cancelled");

    Ok(true)
}

pub fn reservation_count(visit: &Visit) -> Result<usize> {
    Ok(visit.session()?.reservation_count())
}
