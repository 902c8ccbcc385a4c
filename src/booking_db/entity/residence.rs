use super::schema::residences;
use serde::{Deserialize, Serialize};

#[derive(Debug, Queryable, Clone, PartialEq, Serialize, Deserialize)]
pub struct Residence {
    pub id: i64,
    pub name: String,
    pub residence_picture: String,

    pub location_id: i64,
    pub owner_id: i64,

    pub guest_number: i32,
    pub bedroom_number: i32,
    pub bathroom_number: i32,
    pub built_year: i32,
    pub price_per_night: f64,
}

#[derive(Debug, Insertable, Clone, Default, Serialize, Deserialize)]
#[table_name = "residences"]
pub struct InsertFull {
    pub name: String,
    pub residence_picture: String,

    pub location_id: i64,
    pub owner_id: i64,

    pub guest_number: i32,
    pub bedroom_number: i32,
    pub bathroom_number: i32,
    pub built_year: i32,
    pub price_per_night: f64,
}

#[derive(AsChangeset)]
#[table_name = "residences"]
pub struct UpdateResidence<'a> {
    pub name: &'a str,
    pub residence_picture: &'a str,

    pub location_id: i64,
    pub owner_id: i64,

    pub guest_number: i32,
    pub bedroom_number: i32,
    pub bathroom_number: i32,
    pub built_year: i32,
    pub price_per_night: f64,
}

impl<'a> From<&'a Residence> for UpdateResidence<'a> {
    fn from(residence: &'a Residence) -> Self {
        UpdateResidence {
            name: &residence.name,
            residence_picture: &residence.residence_picture,
            location_id: residence.location_id,
            owner_id: residence.owner_id,
            guest_number: residence.guest_number,
            bedroom_number: residence.bedroom_number,
            bathroom_number: residence.bathroom_number,
            built_year: residence.built_year,
            price_per_night: residence.price_per_night,
        }
    }
}
