use super::*;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum MigrationError {
    ReadWriteDBVersion {
        source: diesel::result::Error,
    },
    /// The file was written by a newer build than this one.
    NewerDBVersion {
        version: DBVersion,
    },
    /// There is no migration step starting at this version.
    NoMigrationFrom {
        version: DBVersion,
    },
    /// The step upgrading the schema to `to_version` failed.
    StepFailed {
        to_version: DBVersion,
        source: diesel::result::Error,
    },
    /// Opening or committing the transaction wrapping the upgrade failed.
    TransactionFailed {
        source: diesel::result::Error,
    },
}
pub type Result<T> = std::result::Result<T, MigrationError>;

impl fmt::Display for MigrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadWriteDBVersion { source } => {
                write!(f, "Could not access the database schema version: {}", source)
            }
            Self::NewerDBVersion { version } => write!(
                f,
                "Database schema version {} is newer than the supported version {}",
                version, REQUIRED_DB_VERSION
            ),
            Self::NoMigrationFrom { version } => write!(
                f,
                "No migration from database schema version {} to version {}",
                version, REQUIRED_DB_VERSION
            ),
            Self::StepFailed { to_version, source } => write!(
                f,
                "Migration to database schema version {} failed: {}",
                to_version, source
            ),
            Self::TransactionFailed { source } => {
                write!(f, "Database migration transaction failed: {}", source)
            }
        }
    }
}
impl From<diesel::result::Error> for MigrationError {
    fn from(error: diesel::result::Error) -> Self {
        Self::TransactionFailed { source: error }
    }
}
impl Error for MigrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadWriteDBVersion { ref source } => Some(source),
            Self::StepFailed { ref source, .. } => Some(source),
            Self::TransactionFailed { ref source } => Some(source),
            Self::NewerDBVersion { .. } | Self::NoMigrationFrom { .. } => None,
        }
    }
}
