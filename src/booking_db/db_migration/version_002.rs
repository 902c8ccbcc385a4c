use super::*;

pub fn migrate(conn: &SqliteConnection) -> QueryResult<()> {
    create_index_residence_location(&conn)?;
    create_index_residence_owner(&conn)?;
    create_index_reservation_residence(&conn)?;

    Ok(())
}

// Browsing filters residences by location first.
fn create_index_residence_location(conn: &SqliteConnection) -> QueryResult<()> {
    sql_query("CREATE INDEX residence_location_idx ON residences(location_id)").execute(conn)?;
    Ok(())
}

// Needed for the owner foreign key check when deleting users.
fn create_index_residence_owner(conn: &SqliteConnection) -> QueryResult<()> {
    sql_query("CREATE INDEX residence_owner_idx ON residences(owner_id)").execute(conn)?;
    Ok(())
}

// Availability checks load all reservations of a residence.
fn create_index_reservation_residence(conn: &SqliteConnection) -> QueryResult<()> {
    sql_query(
        "CREATE INDEX reservation_residence_idx
            ON reservations(residence_id, reservation_start_date)",
    )
    .execute(conn)?;
    Ok(())
}
