table! {
    locations (id) {
        id -> BigInt,
        name -> Text,
    }
}

table! {
    users (id) {
        id -> BigInt,
        name -> Text,
        phone_number -> Nullable<Text>,
        email -> Nullable<Text>,
        ssn -> Nullable<Text>,
        user_type -> Integer,
        dob -> Nullable<Date>,
    }
}

table! {
    residences (id) {
        id -> BigInt,
        name -> Text,
        residence_picture -> Text,

        location_id -> BigInt,
        owner_id -> BigInt,

        guest_number -> Integer,
        bedroom_number -> Integer,
        bathroom_number -> Integer,
        built_year -> Integer,
        price_per_night -> Double,
    }
}

table! {
    reservations (id) {
        id -> BigInt,
        residence_id -> BigInt,
        user_id -> Nullable<BigInt>,

        reservation_start_date -> Date,
        reservation_end_date -> Date,
    }
}

allow_tables_to_appear_in_same_query!(locations, users, residences, reservations,);

joinable!(residences -> locations(location_id));
joinable!(residences -> users(owner_id));
joinable!(reservations -> residences(residence_id));
