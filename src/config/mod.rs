//! Runtime configuration, resolved from command line arguments with
//! environment variable fallbacks.

use clap::ArgMatches;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

pub const ARG_DATABASE: &str = "database";
pub const ARG_BIND: &str = "bind";
pub const ARG_SESSION_TIMEOUT: &str = "session-timeout";
pub const ARG_BOOKING_USER: &str = "booking-user";

pub const ENV_DATABASE: &str = "SQLITE_PATH";
pub const ENV_BIND: &str = "AIRBB_BIND";
pub const ENV_SESSION_TIMEOUT: &str = "AIRBB_SESSION_TIMEOUT";
pub const ENV_BOOKING_USER: &str = "AIRBB_BOOKING_USER";

pub const DEFAULT_DATABASE: &str = "AirBB.db";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_SESSION_TIMEOUT_MINUTES: u64 = 30;

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue {
        setting: &'static str,
        value: String,
        message: String,
    },
}
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: String,
    pub bind_address: SocketAddr,
    pub session_timeout: Duration,
    /// User new reservations are attributed to, reservations stay anonymous if unset.
    pub booking_user_id: Option<i64>,
}

impl Config {
    /// Resolves the configuration from parsed command line arguments and the
    /// process environment.
    pub fn from_matches(matches: &ArgMatches) -> Result<Config> {
        Self::from_sources(
            |name| matches.value_of(name).map(String::from),
            |key| std::env::var(key).ok(),
        )
    }

    /// Resolves every setting from (in this order) `arg`, `env` and the built in default.
    pub fn from_sources<A, E>(arg: A, env: E) -> Result<Config>
    where
        A: Fn(&str) -> Option<String>,
        E: Fn(&str) -> Option<String>,
    {
        let lookup = |arg_name: &str, env_key: &str| {
            arg(arg_name)
                .or_else(|| env(env_key))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_path = normalize_database_path(
            &lookup(ARG_DATABASE, ENV_DATABASE).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        );

        let bind = lookup(ARG_BIND, ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_address = bind.parse::<SocketAddr>().map_err(|err| ConfigError::InvalidValue {
            setting: "bind address",
            value: bind.clone(),
            message: err.to_string(),
        })?;

        let session_timeout = match lookup(ARG_SESSION_TIMEOUT, ENV_SESSION_TIMEOUT) {
            Some(minutes) => match minutes.parse::<u64>() {
                Ok(parsed) if parsed > 0 => Duration::from_secs(parsed * 60),
                Ok(_) => {
                    return Err(ConfigError::InvalidValue {
                        setting: "session timeout",
                        value: minutes,
                        message: "must be at least one minute".to_string(),
                    })
                }
                Err(err) => {
                    return Err(ConfigError::InvalidValue {
                        setting: "session timeout",
                        value: minutes,
                        message: err.to_string(),
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_SESSION_TIMEOUT_MINUTES * 60),
        };

        let booking_user_id = match lookup(ARG_BOOKING_USER, ENV_BOOKING_USER) {
            Some(user) => Some(user.parse::<i64>().map_err(|err| ConfigError::InvalidValue {
                setting: "booking user",
                value: user.clone(),
                message: err.to_string(),
            })?),
            None => None,
        };

        Ok(Config {
            database_path,
            bind_address,
            session_timeout,
            booking_user_id,
        })
    }
}

/// Accepts both plain paths and connection strings of the form `Data Source=AirBB.db;`.
pub fn normalize_database_path(value: &str) -> String {
    let value = value.trim();
    let prefix = "data source=";
    let path = if value.len() >= prefix.len()
        && value.is_char_boundary(prefix.len())
        && value[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        &value[prefix.len()..]
    } else {
        value
    };
    path.trim().trim_end_matches(';').trim().to_string()
}

// Error Boilerplate (Error display and source)
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue {
                setting,
                value,
                message,
            } => write!(f, "Invalid {} '{}': {}", setting, value, message),
        }
    }
}
impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(args: &[(&str, &str)], env: &[(&str, &str)]) -> Result<Config> {
        let args: HashMap<String, String> = args
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_sources(|name| args.get(name).cloned(), |key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = resolve(&[], &[]).unwrap();
        assert_eq!(config.database_path, DEFAULT_DATABASE);
        assert_eq!(config.bind_address, DEFAULT_BIND.parse().unwrap());
        assert_eq!(config.session_timeout, Duration::from_secs(30 * 60));
        assert_eq!(config.booking_user_id, None);
    }

    #[test]
    fn arguments_win_over_environment() {
        let config = resolve(
            &[(ARG_DATABASE, "cli.db"), (ARG_SESSION_TIMEOUT, "5")],
            &[
                (ENV_DATABASE, "env.db"),
                (ENV_BIND, "0.0.0.0:8080"),
                (ENV_BOOKING_USER, "1"),
            ],
        )
        .unwrap();
        assert_eq!(config.database_path, "cli.db");
        assert_eq!(config.bind_address, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.session_timeout, Duration::from_secs(5 * 60));
        assert_eq!(config.booking_user_id, Some(1));
    }

    #[test]
    fn invalid_values() {
        assert!(resolve(&[(ARG_BIND, "localhost")], &[]).is_err());
        assert!(resolve(&[(ARG_SESSION_TIMEOUT, "0")], &[]).is_err());
        assert!(resolve(&[(ARG_SESSION_TIMEOUT, "soon")], &[]).is_err());
        assert!(resolve(&[], &[(ENV_BOOKING_USER, "admin")]).is_err());
    }

    #[test]
    fn connection_strings_are_accepted() {
        assert_eq!(normalize_database_path("Data Source=AirBB.db"), "AirBB.db");
        assert_eq!(
            normalize_database_path("data source=/home/data/AirBB.db;"),
            "/home/data/AirBB.db"
        );
        assert_eq!(normalize_database_path(" plain.db "), "plain.db");
        assert_eq!(normalize_database_path(":memory:"), ":memory:");
    }
}
