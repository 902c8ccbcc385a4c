use super::schema::users;
use super::UserType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Queryable, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub ssn: Option<String>,
    pub user_type: UserType,
    pub dob: Option<NaiveDate>,
}

#[derive(Debug, Insertable, Clone, Default, Serialize, Deserialize)]
#[table_name = "users"]
pub struct InsertFull {
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub ssn: Option<String>,
    pub user_type: UserType,
    pub dob: Option<NaiveDate>,
}

// Cleared contact fields must be written as NULL, not skipped.
#[derive(AsChangeset)]
#[table_name = "users"]
#[changeset_options(treat_none_as_null = "true")]
pub struct UpdateUser<'a> {
    pub name: &'a str,
    pub phone_number: Option<&'a str>,
    pub email: Option<&'a str>,
    pub ssn: Option<&'a str>,
    pub user_type: UserType,
    pub dob: Option<NaiveDate>,
}
