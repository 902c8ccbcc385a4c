use super::*;
use chrono::NaiveDate;

/// Sample data set for fresh installations and demos.
const LOCATIONS: &[&str] = &["Chicago", "New York", "Boston", "Miami"];

struct SampleResidence {
    name: &'static str,
    picture: &'static str,
    location: usize,
    owner: usize,
    guests: i32,
    bedrooms: i32,
    bathrooms: i32,
    built_year: i32,
    price: f64,
}

const RESIDENCES: &[SampleResidence] = &[
    SampleResidence {
        name: "Chicago Loop Apartment",
        picture: "chicago_loop.jpg",
        location: 0,
        owner: 0,
        guests: 4,
        bedrooms: 2,
        bathrooms: 1,
        built_year: 2005,
        price: 189.0,
    },
    SampleResidence {
        name: "Wrigleyville House",
        picture: "wrigleyville.jpg",
        location: 0,
        owner: 1,
        guests: 8,
        bedrooms: 4,
        bathrooms: 2,
        built_year: 1924,
        price: 320.0,
    },
    SampleResidence {
        name: "Brooklyn Loft",
        picture: "brooklyn_loft.jpg",
        location: 1,
        owner: 0,
        guests: 2,
        bedrooms: 1,
        bathrooms: 1,
        built_year: 1998,
        price: 240.0,
    },
    SampleResidence {
        name: "Back Bay Townhouse",
        picture: "back_bay.jpg",
        location: 2,
        owner: 1,
        guests: 6,
        bedrooms: 3,
        bathrooms: 2,
        built_year: 1890,
        price: 410.0,
    },
    SampleResidence {
        name: "South Beach Condo",
        picture: "south_beach.jpg",
        location: 3,
        owner: 0,
        guests: 5,
        bedrooms: 2,
        bathrooms: 2,
        built_year: 2015,
        price: 275.0,
    },
];

impl BookingDB {
    /// Fills an empty database with a small sample data set (locations, owners, a client,
    /// residences and two reservations).
    ///
    /// Returns false without touching anything if the database already holds locations.
    pub fn seed_sample_data(&self) -> Result<bool> {
        use self::schema::locations;
        use diesel::dsl::*;

        self.conn.transaction(|| {
            let has_locations: bool = select(exists(locations::table.select(locations::id)))
                .get_result(&self.conn)?;
            if has_locations {
                return Ok(false);
            }

            let locations = LOCATIONS
                .iter()
                .map(|name| {
                    self.add_location(&location::InsertFull {
                        name: name.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let owners = vec![
                self.add_user(&user::InsertFull {
                    name: "Ada Owner".to_string(),
                    email: Some("ada@example.com".to_string()),
                    user_type: UserType::Owner,
                    ..Default::default()
                })?,
                self.add_user(&user::InsertFull {
                    name: "Bob Owner".to_string(),
                    phone_number: Some("312-555-0100".to_string()),
                    user_type: UserType::Owner,
                    ..Default::default()
                })?,
            ];
            let client = self.add_user(&user::InsertFull {
                name: "Carla Client".to_string(),
                email: Some("carla@example.com".to_string()),
                user_type: UserType::Client,
                dob: NaiveDate::from_ymd_opt(1990, 4, 12),
                ..Default::default()
            })?;

            let mut residences = Vec::with_capacity(RESIDENCES.len());
            for sample in RESIDENCES {
                residences.push(self.add_residence(&residence::InsertFull {
                    name: sample.name.to_string(),
                    residence_picture: sample.picture.to_string(),
                    location_id: locations[sample.location].id,
                    owner_id: owners[sample.owner].id,
                    guest_number: sample.guests,
                    bedroom_number: sample.bedrooms,
                    bathroom_number: sample.bathrooms,
                    built_year: sample.built_year,
                    price_per_night: sample.price,
                })?);
            }

            let bookings = [(0, (2030, 7, 1), (2030, 7, 5)), (2, (2030, 8, 10), (2030, 8, 14))];
            for (residence, start, end) in bookings.iter() {
                let (start, end) = match (
                    NaiveDate::from_ymd_opt(start.0, start.1, start.2),
                    NaiveDate::from_ymd_opt(end.0, end.1, end.2),
                ) {
                    (Some(start), Some(end)) => (start, end),
                    _ => continue,
                };
                self.reserve_if_available(&reservation::InsertFull {
                    residence_id: residences[*residence].id,
                    user_id: Some(client.id),
                    reservation_start_date: start,
                    reservation_end_date: end,
                })?;
            }

            Ok(true)
        })
    }
}
