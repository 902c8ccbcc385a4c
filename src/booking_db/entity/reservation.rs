use super::schema::reservations;
use crate::availability::DateRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Queryable, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub residence_id: i64,
    pub user_id: Option<i64>,

    pub reservation_start_date: NaiveDate,
    pub reservation_end_date: NaiveDate,
}

#[derive(Debug, Insertable, Clone)]
#[table_name = "reservations"]
pub struct InsertFull {
    pub residence_id: i64,
    pub user_id: Option<i64>,

    pub reservation_start_date: NaiveDate,
    pub reservation_end_date: NaiveDate,
}

impl Reservation {
    /// The stay covered by this reservation (checkout day excluded).
    pub fn stay(&self) -> DateRange {
        DateRange::new(self.reservation_start_date, self.reservation_end_date)
    }
}
