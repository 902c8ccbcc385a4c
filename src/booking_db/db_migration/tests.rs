use super::*;

#[derive(QueryableByName)]
struct TableName {
    #[sql_type = "diesel::sql_types::Text"]
    name: String,
}

fn open_connection() -> SqliteConnection {
    SqliteConnection::establish(":memory:").unwrap()
}

fn query_table_names(conn: &SqliteConnection) -> Vec<String> {
    sql_query("SELECT name FROM sqlite_master WHERE type = 'table'")
        .load::<TableName>(conn)
        .unwrap()
        .into_iter()
        .map(|table| table.name)
        .collect()
}

#[test]
fn read_and_write_db_version() {
    let conn = open_connection();

    assert_eq!(read_db_version(&conn).unwrap(), 0);
    write_db_version(&conn, 42).unwrap();
    assert_eq!(read_db_version(&conn).unwrap(), 42);
}

#[test]
fn properly_upgrade_to_version_1() {
    let conn = open_connection();

    migrate_up_from(&conn, 0).unwrap();

    let table_names = query_table_names(&conn);
    assert!(table_names.contains(&"locations".to_string()));
    assert!(table_names.contains(&"users".to_string()));
    assert!(table_names.contains(&"residences".to_string()));
    assert!(table_names.contains(&"reservations".to_string()));

    assert_eq!(read_db_version(&conn).unwrap(), 1);
}

#[test]
fn properly_upgrade_to_required_version() {
    let conn = open_connection();

    assert_eq!(upgrade_db(&conn).unwrap(), REQUIRED_DB_VERSION);
    assert_eq!(read_db_version(&conn).unwrap(), REQUIRED_DB_VERSION);

    // Upgrading an up to date database is a no-op.
    assert_eq!(upgrade_db(&conn).unwrap(), REQUIRED_DB_VERSION);
}

#[test]
fn refuse_newer_db_versions() {
    let conn = open_connection();
    write_db_version(&conn, REQUIRED_DB_VERSION + 1).unwrap();

    match upgrade_db(&conn) {
        Err(err @ MigrationError::NewerDBVersion { .. }) => assert_eq!(
            err.to_string(),
            format!(
                "Database schema version {} is newer than the supported version {}",
                REQUIRED_DB_VERSION + 1,
                REQUIRED_DB_VERSION
            )
        ),
        _ => panic!("Must not open databases written by newer versions!"),
    }
}

#[test]
fn failed_steps_keep_the_db_version() {
    let conn = open_connection();
    sql_query("CREATE TABLE locations(id INTEGER PRIMARY KEY NOT NULL)")
        .execute(&conn)
        .unwrap();

    match migrate_up_from(&conn, 0) {
        Err(MigrationError::StepFailed { to_version, .. }) => assert_eq!(to_version, 1),
        _ => panic!("Creating an existing table must fail!"),
    }
    assert_eq!(read_db_version(&conn).unwrap(), 0);

    match migrate_up_from(&conn, -1) {
        Err(MigrationError::NoMigrationFrom { version }) => assert_eq!(version, -1),
        _ => panic!("There is no step starting below version 0!"),
    }
}
