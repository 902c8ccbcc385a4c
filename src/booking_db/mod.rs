mod db_migration;
pub use self::db_migration::{DBVersion, MigrationError, REQUIRED_DB_VERSION};
// Database schema - must be kept up to date manually
mod entity;
pub use self::entity::*;
mod errors;
pub use self::errors::*;
#[macro_use]
mod query_options;
pub use self::query_options::{OrderBy, QueryOptions};
mod schema;
mod seed;


use crate::availability::{self, DateRange, FilterCriteria};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;

no_arg_sql_function!(
    last_insert_rowid,
    diesel::sql_types::BigInt,
    "Row id of the most recent successful INSERT on this connection."
);

/// Repository over the booking database.
/// Wraps exactly one SQLite connection, callers that share it across threads must
/// serialize access themselves.
pub struct BookingDB {
    conn: SqliteConnection,
}

impl BookingDB {
    /// Opens the booking db file located at the given path and performs data migrations to
    /// the current application version if required.
    pub fn open(path: &str) -> Result<BookingDB> {
        let result = BookingDB {
            conn: SqliteConnection::establish(path)?,
        };

        result.default_db_settings()?;
        result.upgrade_db()?;

        Ok(result)
    }

    /// The schema version of the open database.
    pub fn db_version(&self) -> Result<DBVersion> {
        Ok(db_migration::read_db_version(&self.conn)?)
    }

    // Locations

    pub fn get_locations(&self, options: &QueryOptions) -> Result<Vec<Location>> {
        use self::schema::locations;

        let query = locations::table.into_boxed();
        let query = apply_query_options!(query, options, locations::id, locations::name);
        Ok(query.load(&self.conn)?)
    }

    pub fn get_location(&self, id: i64) -> Result<Option<Location>> {
        use self::schema::locations;

        Ok(locations::table
            .find(id)
            .first::<Location>(&self.conn)
            .optional()?)
    }

    pub fn add_location(&self, new_location: &location::InsertFull) -> Result<Location> {
        use self::schema::locations;

        self.conn.transaction(|| {
            diesel::insert_into(locations::table)
                .values(new_location)
                .execute(&self.conn)?;

            let id = self.last_insert_id()?;
            Ok(locations::table.find(id).first(&self.conn)?)
        })
    }

    /// Overwrites the stored location with the same id.
    /// Reports NotFound if the location vanished in the meantime.
    pub fn update_location(&self, location: &Location) -> Result<()> {
        use self::schema::locations;

        let changed = diesel::update(locations::table.find(location.id))
            .set(location::UpdateLocation {
                name: &location.name,
            })
            .execute(&self.conn)?;
        expect_one_row(changed)
    }

    /// Deletes the location, returns false if there was nothing to delete.
    /// Fails with a consistency error while residences still reference the location.
    pub fn delete_location(&self, id: i64) -> Result<bool> {
        use self::schema::locations;

        let deleted = diesel::delete(locations::table.find(id)).execute(&self.conn)?;
        Ok(deleted > 0)
    }

    pub fn location_exists(&self, id: i64) -> Result<bool> {
        use self::schema::locations;
        use diesel::dsl::*;

        Ok(select(exists(locations::table.find(id))).get_result(&self.conn)?)
    }

    // Users

    pub fn get_users(&self, options: &QueryOptions) -> Result<Vec<User>> {
        use self::schema::users;

        let query = users::table.into_boxed();
        let query = apply_query_options!(query, options, users::id, users::name);
        Ok(query.load(&self.conn)?)
    }

    /// All users that can own residences, ordered by name.
    pub fn get_owners(&self) -> Result<Vec<User>> {
        use self::schema::users;

        Ok(users::table
            .filter(users::user_type.eq(UserType::Owner))
            .order((users::name.asc(), users::id.asc()))
            .load(&self.conn)?)
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        use self::schema::users;

        Ok(users::table.find(id).first::<User>(&self.conn).optional()?)
    }

    pub fn add_user(&self, new_user: &user::InsertFull) -> Result<User> {
        use self::schema::users;

        self.conn.transaction(|| {
            diesel::insert_into(users::table)
                .values(new_user)
                .execute(&self.conn)?;

            let id = self.last_insert_id()?;
            Ok(users::table.find(id).first(&self.conn)?)
        })
    }

    pub fn update_user(&self, user: &User) -> Result<()> {
        use self::schema::users;

        let changed = diesel::update(users::table.find(user.id))
            .set(user::UpdateUser {
                name: &user.name,
                phone_number: user.phone_number.as_deref(),
                email: user.email.as_deref(),
                ssn: user.ssn.as_deref(),
                user_type: user.user_type,
                dob: user.dob,
            })
            .execute(&self.conn)?;
        expect_one_row(changed)
    }

    /// Deletes the user. Their reservations stay, but are no longer attributed to anyone.
    /// Fails with a consistency error while the user still owns residences.
    pub fn delete_user(&self, id: i64) -> Result<bool> {
        use self::schema::users;

        let deleted = diesel::delete(users::table.find(id)).execute(&self.conn)?;
        Ok(deleted > 0)
    }

    pub fn user_exists(&self, id: i64) -> Result<bool> {
        use self::schema::users;
        use diesel::dsl::*;

        Ok(select(exists(users::table.find(id))).get_result(&self.conn)?)
    }

    // Residences

    pub fn get_residences(&self, options: &QueryOptions) -> Result<Vec<Residence>> {
        use self::schema::residences;

        let query = residences::table.into_boxed();
        let query = apply_query_options!(query, options, residences::id, residences::name);
        Ok(query.load(&self.conn)?)
    }

    /// Lists residences joined with their location and owner (admin overview).
    pub fn get_residences_with_details(
        &self,
        options: &QueryOptions,
    ) -> Result<Vec<(Residence, Location, User)>> {
        use self::schema::{locations, residences, users};

        let query = residences::table
            .inner_join(locations::table)
            .inner_join(users::table)
            .into_boxed();
        let query = apply_query_options!(query, options, residences::id, residences::name);
        Ok(query.load(&self.conn)?)
    }

    pub fn get_residence(&self, id: i64) -> Result<Option<Residence>> {
        use self::schema::residences;

        Ok(residences::table
            .find(id)
            .first::<Residence>(&self.conn)
            .optional()?)
    }

    pub fn get_residence_with_location(&self, id: i64) -> Result<Option<(Residence, Location)>> {
        use self::schema::{locations, residences};

        Ok(residences::table
            .inner_join(locations::table)
            .filter(residences::id.eq(id))
            .first::<(Residence, Location)>(&self.conn)
            .optional()?)
    }

    pub fn get_residence_with_details(
        &self,
        id: i64,
    ) -> Result<Option<(Residence, Location, User)>> {
        use self::schema::{locations, residences, users};

        Ok(residences::table
            .inner_join(locations::table)
            .inner_join(users::table)
            .filter(residences::id.eq(id))
            .first::<(Residence, Location, User)>(&self.conn)
            .optional()?)
    }

    /// Queries all residences (joined with their location) matching the given criteria.
    ///
    /// Location and guest filters are evaluated by the database, the availability filter
    /// drops residences holding any reservation that overlaps the requested stay.
    pub fn find_residences(&self, criteria: &FilterCriteria) -> Result<Vec<(Residence, Location)>> {
        use self::schema::{locations, residences};

        let mut query = residences::table.inner_join(locations::table).into_boxed();
        if let Some(location_id) = criteria.location_filter() {
            query = query.filter(residences::location_id.eq(location_id));
        }
        if let Some(guest_number) = criteria.guest_filter() {
            query = query.filter(residences::guest_number.ge(guest_number));
        }
        let candidates: Vec<(Residence, Location)> =
            query.order(residences::id.asc()).load(&self.conn)?;

        let stay = match criteria.stay() {
            Some(stay) => stay,
            None => return Ok(candidates),
        };

        let candidate_ids: Vec<i64> = candidates.iter().map(|(res, _)| res.id).collect();
        let reservations = self.get_reservations_overlapping(&candidate_ids, &stay)?;

        Ok(candidates
            .into_iter()
            .filter(|(res, _)| {
                availability::is_available(
                    reservations.iter().filter(|r| r.residence_id == res.id),
                    &stay,
                )
            })
            .collect())
    }

    pub fn add_residence(&self, new_residence: &residence::InsertFull) -> Result<Residence> {
        use self::schema::residences;

        self.conn.transaction(|| {
            diesel::insert_into(residences::table)
                .values(new_residence)
                .execute(&self.conn)?;

            let id = self.last_insert_id()?;
            Ok(residences::table.find(id).first(&self.conn)?)
        })
    }

    pub fn update_residence(&self, residence: &Residence) -> Result<()> {
        use self::schema::residences;

        let changed = diesel::update(residences::table.find(residence.id))
            .set(residence::UpdateResidence::from(residence))
            .execute(&self.conn)?;
        expect_one_row(changed)
    }

    /// Deletes the residence together with all its reservations.
    pub fn delete_residence(&self, id: i64) -> Result<bool> {
        use self::schema::residences;

        let deleted = diesel::delete(residences::table.find(id)).execute(&self.conn)?;
        Ok(deleted > 0)
    }

    pub fn residence_exists(&self, id: i64) -> Result<bool> {
        use self::schema::residences;
        use diesel::dsl::*;

        Ok(select(exists(residences::table.find(id))).get_result(&self.conn)?)
    }

    // Reservations

    pub fn get_reservations(&self, options: &QueryOptions) -> Result<Vec<Reservation>> {
        use self::schema::reservations;

        let query = reservations::table.into_boxed();
        let query = apply_query_options!(
            query,
            options,
            reservations::id,
            reservations::reservation_start_date
        );
        Ok(query.load(&self.conn)?)
    }

    pub fn get_reservation(&self, id: i64) -> Result<Option<Reservation>> {
        use self::schema::reservations;

        Ok(reservations::table
            .find(id)
            .first::<Reservation>(&self.conn)
            .optional()?)
    }

    /// All reservations of one residence, ordered by start date.
    pub fn get_residence_reservations(&self, residence_id: i64) -> Result<Vec<Reservation>> {
        use self::schema::reservations;

        Ok(reservations::table
            .filter(reservations::residence_id.eq(residence_id))
            .order(reservations::reservation_start_date.asc())
            .load(&self.conn)?)
    }

    /// Loads the given reservations joined with their residence, ordered by start date.
    /// Ids without a stored reservation are silently skipped.
    pub fn get_reservations_with_residence(
        &self,
        ids: &[i64],
    ) -> Result<Vec<(Reservation, Residence)>> {
        use self::schema::{reservations, residences};

        Ok(reservations::table
            .inner_join(residences::table)
            .filter(reservations::id.eq_any(ids))
            .order((
                reservations::reservation_start_date.asc(),
                reservations::id.asc(),
            ))
            .load(&self.conn)?)
    }

    /// Stores the reservation if the residence is free for the whole stay.
    /// Returns None (and stores nothing) if another reservation overlaps.
    ///
    /// The check and the insert run in one transaction, so two overlapping requests
    /// on the same connection can never both succeed.
    pub fn reserve_if_available(
        &self,
        new_reservation: &reservation::InsertFull,
    ) -> Result<Option<Reservation>> {
        use self::schema::reservations;

        let stay = DateRange::new(
            new_reservation.reservation_start_date,
            new_reservation.reservation_end_date,
        );
        self.conn.transaction(|| {
            let existing = self.get_residence_reservations(new_reservation.residence_id)?;
            if !availability::is_available(existing.iter(), &stay) {
                return Ok(None);
            }

            diesel::insert_into(reservations::table)
                .values(new_reservation)
                .execute(&self.conn)?;

            let id = self.last_insert_id()?;
            Ok(Some(reservations::table.find(id).first(&self.conn)?))
        })
    }

    pub fn delete_reservation(&self, id: i64) -> Result<bool> {
        use self::schema::reservations;

        let deleted = diesel::delete(reservations::table.find(id)).execute(&self.conn)?;
        Ok(deleted > 0)
    }

    pub fn reservation_exists(&self, id: i64) -> Result<bool> {
        use self::schema::reservations;
        use diesel::dsl::*;

        Ok(select(exists(reservations::table.find(id))).get_result(&self.conn)?)
    }

    /// Reservations of the given residences that overlap the given stay.
    fn get_reservations_overlapping(
        &self,
        residence_ids: &[i64],
        stay: &DateRange,
    ) -> Result<Vec<Reservation>> {
        use self::schema::reservations;

        Ok(reservations::table
            .filter(reservations::residence_id.eq_any(residence_ids))
            .filter(reservations::reservation_start_date.lt(stay.end))
            .filter(reservations::reservation_end_date.gt(stay.start))
            .load(&self.conn)?)
    }

    fn last_insert_id(&self) -> Result<i64> {
        Ok(diesel::select(last_insert_rowid).get_result::<i64>(&self.conn)?)
    }

    fn upgrade_db(&self) -> db_migration::Result<()> {
        self.conn
            .transaction(|| db_migration::upgrade_db(&self.conn))?;

        Ok(())
    }

    fn default_db_settings(&self) -> Result<()> {
        sql_query("PRAGMA journal_mode = WAL").execute(&self.conn)?;
        sql_query("PRAGMA foreign_keys = 1").execute(&self.conn)?;

        Ok(())
    }
}

fn expect_one_row(changed: usize) -> Result<()> {
    if changed == 0 {
        Err(BookingDBError::NotFound)
    } else {
        Ok(())
    }
}
