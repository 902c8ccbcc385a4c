use super::*;

pub fn migrate(conn: &SqliteConnection) -> QueryResult<()> {
    create_table_locations(&conn)?;
    create_table_users(&conn)?;
    create_table_residences(&conn)?;
    create_table_reservations(&conn)?;

    Ok(())
}

// A location is a city or area residences are grouped by when browsing.
fn create_table_locations(conn: &SqliteConnection) -> QueryResult<()> {
    sql_query(
        "CREATE TABLE locations(
                id              INTEGER PRIMARY KEY NOT NULL,
                name            TEXT NOT NULL UNIQUE COLLATE NOCASE
             )",
    )
    .execute(conn)?;

    Ok(())
}

// Users are owners of residences, clients booking them or administrators.
// The user_type column holds the integer value of the UserType enum.
fn create_table_users(conn: &SqliteConnection) -> QueryResult<()> {
    sql_query(
        "CREATE TABLE users(
                id              INTEGER PRIMARY KEY NOT NULL,
                name            TEXT NOT NULL,
                phone_number    TEXT,
                email           TEXT,
                ssn             TEXT,
                user_type       INTEGER NOT NULL,
                dob             TEXT
             )",
    )
    .execute(conn)?;

    Ok(())
}

// A residence is a bookable property. It lives in exactly one location and is owned
// by exactly one user. Locations and owners can not be removed while still referenced.
fn create_table_residences(conn: &SqliteConnection) -> QueryResult<()> {
    sql_query(
        "CREATE TABLE residences(
                id                  INTEGER PRIMARY KEY NOT NULL,
                name                TEXT NOT NULL,
                residence_picture   TEXT NOT NULL DEFAULT '',

                location_id         INTEGER NOT NULL,
                owner_id            INTEGER NOT NULL,

                guest_number        INTEGER NOT NULL,
                bedroom_number      INTEGER NOT NULL,
                bathroom_number     INTEGER NOT NULL,
                built_year          INTEGER NOT NULL,
                price_per_night     REAL NOT NULL,

                FOREIGN KEY(location_id)    REFERENCES locations(id) ON DELETE RESTRICT,
                FOREIGN KEY(owner_id)       REFERENCES users(id) ON DELETE RESTRICT
             )",
    )
    .execute(conn)?;

    Ok(())
}

// A reservation blocks a residence for the half open range [start, end).
// Reservations go away with their residence, but outlive the user that booked them.
fn create_table_reservations(conn: &SqliteConnection) -> QueryResult<()> {
    sql_query(
        "CREATE TABLE reservations(
                id                      INTEGER PRIMARY KEY NOT NULL,
                residence_id            INTEGER NOT NULL,
                user_id                 INTEGER,

                reservation_start_date  TEXT NOT NULL,
                reservation_end_date    TEXT NOT NULL,

                CHECK(reservation_start_date < reservation_end_date),
                FOREIGN KEY(residence_id)   REFERENCES residences(id) ON DELETE CASCADE,
                FOREIGN KEY(user_id)        REFERENCES users(id) ON DELETE SET NULL
             )",
    )
    .execute(conn)?;

    Ok(())
}
