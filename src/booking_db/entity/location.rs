use super::schema::locations;
use serde::{Deserialize, Serialize};

#[derive(Debug, Queryable, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Insertable, Clone, Default, Serialize, Deserialize)]
#[table_name = "locations"]
pub struct InsertFull {
    pub name: String,
}

#[derive(AsChangeset)]
#[table_name = "locations"]
pub struct UpdateLocation<'a> {
    pub name: &'a str,
}
