use super::*;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum BookingDBError {
    DBMigrationError {
        source: db_migration::MigrationError,
    },
    DBConnectionError {
        source: diesel::result::ConnectionError,
    },
    GenericSQLError {
        source: diesel::result::Error,
    },
    NotFound,
    /// A write was rejected by a UNIQUE, FOREIGN KEY or CHECK constraint.
    ViolatesDBConsistency {
        message: String,
    },
}
pub type Result<T> = std::result::Result<T, BookingDBError>;

// Error Boilerplate (Error display, conversion and source)
impl fmt::Display for BookingDBError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error During Booking Database Interaction({:?})", self)
    }
}
impl From<db_migration::MigrationError> for BookingDBError {
    fn from(error: db_migration::MigrationError) -> Self {
        Self::DBMigrationError { source: error }
    }
}
impl From<diesel::result::Error> for BookingDBError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind::*;
        use diesel::result::Error::DatabaseError;

        match error {
            diesel::result::Error::NotFound => Self::NotFound,
            DatabaseError(kind, info) => match kind {
                UniqueViolation | ForeignKeyViolation => Self::ViolatesDBConsistency {
                    message: info.message().to_string(),
                },
                // SQLite reports CHECK failures with a generic constraint code.
                _ if info.message().contains("constraint failed") => {
                    Self::ViolatesDBConsistency {
                        message: info.message().to_string(),
                    }
                }
                _ => Self::GenericSQLError {
                    source: DatabaseError(kind, info),
                },
            },
            error => Self::GenericSQLError { source: error },
        }
    }
}
impl From<diesel::result::ConnectionError> for BookingDBError {
    fn from(error: diesel::result::ConnectionError) -> Self {
        Self::DBConnectionError { source: error }
    }
}
impl Error for BookingDBError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DBMigrationError { ref source } => Some(source),
            Self::DBConnectionError { ref source } => Some(source),
            Self::GenericSQLError { ref source } => Some(source),
            Self::ViolatesDBConsistency { .. } => None,
            Self::NotFound => None,
        }
    }
}
