//! Server side session state, keyed by an id carried in a cookie.
//!
//! A session holds the transient state of one visitor: the last submitted browse
//! filter, the reservations made during the visit and a one-shot flash message that
//! is shown (and cleared) by the next page view.

use crate::availability::FilterCriteria;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[cfg(test)]
mod tests;

pub type SessionId = Uuid;

pub const SESSION_COOKIE: &str = "airbb_session";
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
pub enum SessionError {
    /// A thread panicked while holding the session table.
    StorePoisoned,
}
pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub filter: FilterCriteria,
    /// Reservations made in this session, in booking order.
    pub reservation_ids: Vec<i64>,
    flash: Option<String>,
}

impl SessionData {
    pub fn set_flash<S: Into<String>>(&mut self, message: S) {
        self.flash = Some(message.into());
    }

    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }

    pub fn peek_flash(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    pub fn add_reservation(&mut self, reservation_id: i64) {
        if !self.reservation_ids.contains(&reservation_id) {
            self.reservation_ids.push(reservation_id);
        }
    }

    pub fn remove_reservation(&mut self, reservation_id: i64) -> bool {
        let before = self.reservation_ids.len();
        self.reservation_ids.retain(|id| *id != reservation_id);
        self.reservation_ids.len() != before
    }

    pub fn reservation_count(&self) -> usize {
        self.reservation_ids.len()
    }
}

struct SessionEntry {
    data: SessionData,
    last_access: Instant,
}

/// In-memory table of live sessions. Sessions idle for longer than the
/// configured timeout are dropped the next time the table is touched.
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        SessionStore {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Returns the id of a live session and whether it was newly created.
    /// Unknown or expired ids are replaced by a fresh session.
    pub fn load_or_create(&self, id: Option<SessionId>) -> Result<(SessionId, bool)> {
        self.load_or_create_at(id, Instant::now())
    }

    /// Snapshot of the session's data. Unknown sessions read as empty.
    pub fn get(&self, id: &SessionId) -> Result<SessionData> {
        self.update(id, |data| data.clone())
    }

    /// Runs `f` on the session's data while holding the session table.
    /// Unknown sessions are started empty.
    pub fn update<T, F>(&self, id: &SessionId, f: F) -> Result<T>
    where
        F: FnOnce(&mut SessionData) -> T,
    {
        self.update_at(id, Instant::now(), f)
    }

    pub fn remove(&self, id: &SessionId) -> Result<bool> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::StorePoisoned)?;
        Ok(sessions.remove(id).is_some())
    }

    /// Number of sessions currently held (including not yet swept ones).
    pub fn len(&self) -> Result<usize> {
        let sessions = self.sessions.lock().map_err(|_| SessionError::StorePoisoned)?;
        Ok(sessions.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn load_or_create_at(&self, id: Option<SessionId>, now: Instant) -> Result<(SessionId, bool)> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::StorePoisoned)?;
        self.sweep_expired(&mut sessions, now);

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_access = now;
                return Ok((id, false));
            }
        }

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            SessionEntry {
                data: SessionData::default(),
                last_access: now,
            },
        );
        Ok((id, true))
    }

    fn update_at<T, F>(&self, id: &SessionId, now: Instant, f: F) -> Result<T>
    where
        F: FnOnce(&mut SessionData) -> T,
    {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::StorePoisoned)?;
        let entry = sessions.entry(*id).or_insert_with(|| SessionEntry {
            data: SessionData::default(),
            last_access: now,
        });
        entry.last_access = now;
        Ok(f(&mut entry.data))
    }

    fn sweep_expired(&self, sessions: &mut HashMap<SessionId, SessionEntry>, now: Instant) {
        let idle_timeout = self.idle_timeout;
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_access) <= idle_timeout);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

/// Extracts the session id from a `Cookie` request header value.
pub fn session_id_from_cookie_header(header: &str) -> Option<SessionId> {
    header
        .split(';')
        .filter_map(|pair| {
            let mut parts = pair.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(name), Some(value)) if name == SESSION_COOKIE => Some(value),
                _ => None,
            }
        })
        .find_map(|value| Uuid::parse_str(value.trim_matches('"')).ok())
}

/// `Set-Cookie` header value handing the session id to the browser.
pub fn session_cookie(id: &SessionId, idle_timeout: Duration) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE,
        id,
        idle_timeout.as_secs()
    )
}

// Error Boilerplate (Error display and source)
impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error During Session Access ({:?})", self)
    }
}
impl Error for SessionError {}
