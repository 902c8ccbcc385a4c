use super::schema;

// Basic entity mappings on database tables (Should be mostly 1:1 copies of our schema and helpers).
pub mod location;
pub use self::location::Location;
pub mod user;
pub use self::user::User;
pub mod user_type_enum;
pub use self::user_type_enum::UserType;
pub mod residence;
pub use self::residence::Residence;
pub mod reservation;
pub use self::reservation::Reservation;
