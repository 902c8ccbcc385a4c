use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

#[repr(i32)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromSqlRow, AsExpression, Serialize, Deserialize,
)]
#[sql_type = "Integer"]
pub enum UserType {
    Owner = 1,
    Client = 2,
    Admin = 3,
}

impl Default for UserType {
    fn default() -> Self {
        Self::Client
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Owner => "Owner",
            Self::Client => "Client",
            Self::Admin => "Admin",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "client" => Ok(Self::Client),
            "admin" => Ok(Self::Admin),
            other => Err(format!("Unrecognized user type '{}'", other)),
        }
    }
}

impl<DB> FromSql<Integer, DB> for UserType
where
    DB: Backend,
    i32: FromSql<Integer, DB>,
{
    fn from_sql(bytes: Option<&DB::RawValue>) -> deserialize::Result<Self> {
        match i32::from_sql(bytes)? {
            x if x == Self::Owner as i32 => Ok(Self::Owner),
            x if x == Self::Client as i32 => Ok(Self::Client),
            x if x == Self::Admin as i32 => Ok(Self::Admin),
            x => Err(format!("Unrecognized variant {}", x).into()),
        }
    }
}

impl<DB> ToSql<Integer, DB> for UserType
where
    DB: Backend,
    i32: ToSql<Integer, DB>,
{
    fn to_sql<W: Write>(&self, out: &mut Output<W, DB>) -> serialize::Result {
        (*self as i32).to_sql(out)
    }
}
