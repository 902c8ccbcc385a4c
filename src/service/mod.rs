//! Request level flows of the booking site, independent of the HTTP transport.
//!
//! Every flow runs against one `Visit`: the database, the session table and the
//! session of the visitor issuing the request.

pub mod admin;
pub mod booking;
pub mod forms;
pub mod views;

use crate::booking_db::{self, BookingDB};
use crate::session::{self, SessionData, SessionId, SessionStore};
use crate::validation::ModelErrors;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    BookingDBError { source: booking_db::BookingDBError },
    SessionError { source: session::SessionError },
    /// The requested entity does not exist (anymore).
    NotFound,
    /// The submitted model failed validation.
    Invalid { errors: ModelErrors },
    /// The change conflicts with stored data (e.g. deleting a referenced location).
    Conflict { message: String },
}
pub type Result<T> = std::result::Result<T, ServiceError>;

pub struct Visit<'a> {
    pub db: &'a BookingDB,
    pub sessions: &'a SessionStore,
    pub session_id: SessionId,
    /// Reference date for defaults and date validation.
    pub today: NaiveDate,
}

impl<'a> Visit<'a> {
    pub fn new(db: &'a BookingDB, sessions: &'a SessionStore, session_id: SessionId) -> Self {
        Visit {
            db,
            sessions,
            session_id,
            today: chrono::Local::now().date_naive(),
        }
    }

    pub fn session(&self) -> Result<SessionData> {
        Ok(self.sessions.get(&self.session_id)?)
    }

    pub fn update_session<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SessionData) -> T,
    {
        Ok(self.sessions.update(&self.session_id, f)?)
    }

    pub fn set_flash(&self, message: &str) -> Result<()> {
        self.update_session(|data| data.set_flash(message))
    }

    /// Reads and clears the pending flash message.
    pub fn take_flash(&self) -> Result<Option<String>> {
        self.update_session(|data| data.take_flash())
    }
}

// Error Boilerplate (Error display, conversion and source)
impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { errors } => write!(f, "Invalid input: {}", errors),
            Self::Conflict { message } => write!(f, "Conflicting change: {}", message),
            other => write!(f, "Error During Request Handling ({:?})", other),
        }
    }
}
impl From<booking_db::BookingDBError> for ServiceError {
    fn from(error: booking_db::BookingDBError) -> Self {
        match error {
            booking_db::BookingDBError::NotFound => Self::NotFound,
            booking_db::BookingDBError::ViolatesDBConsistency { message } => {
                Self::Conflict { message }
            }
            error => Self::BookingDBError { source: error },
        }
    }
}
impl From<session::SessionError> for ServiceError {
    fn from(error: session::SessionError) -> Self {
        Self::SessionError { source: error }
    }
}
impl From<ModelErrors> for ServiceError {
    fn from(errors: ModelErrors) -> Self {
        Self::Invalid { errors }
    }
}
impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BookingDBError { ref source } => Some(source),
            Self::SessionError { ref source } => Some(source),
            Self::Invalid { ref errors } => Some(errors),
            Self::NotFound => None,
            Self::Conflict { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests;
