//! Residence availability: stay ranges, overlap checks and the browse filter.

use crate::booking_db::Reservation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// A stay from the check-in day up to (excluding) the checkout day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// A range must cover at least one night.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }

    /// Checkout and check-in on the same day do not collide.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// True if none of the given reservations overlaps the requested stay.
pub fn is_available<'a, I>(reservations: I, stay: &DateRange) -> bool
where
    I: IntoIterator<Item = &'a Reservation>,
{
    !reservations
        .into_iter()
        .any(|reservation| reservation.stay().overlaps(stay))
}

/// Criteria used to browse residences. Every criterion is optional and
/// unset (or non-positive) values do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub location_id: Option<i64>,
    pub guest_number: Option<i32>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn location_filter(&self) -> Option<i64> {
        self.location_id.filter(|id| *id > 0)
    }

    pub fn guest_filter(&self) -> Option<i32> {
        self.guest_number.filter(|guests| *guests > 0)
    }

    /// The requested stay, only present if both dates are given.
    pub fn stay(&self) -> Option<DateRange> {
        match (self.check_in_date, self.check_out_date) {
            (Some(check_in), Some(check_out)) => Some(DateRange::new(check_in, check_out)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.location_filter().is_none() && self.guest_filter().is_none() && self.stay().is_none()
    }
}
