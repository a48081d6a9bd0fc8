use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

/// Application-level constants
pub const APP_NAME: &str = "CareRecords";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Listening port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3001;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const PORT_VAR: &str = "PORT";
pub const PUBLIC_DIR_VAR: &str = "PUBLIC_DIR";

/// Tracing filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "care_records=info,tower_http=info"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("Invalid DATABASE_URL value: {0:?}")]
    InvalidDatabaseUrl(String),

    #[error("Invalid PORT value {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },
}

/// Where the record store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// Accepts a bare path, `sqlite://<path>`, `sqlite:<path>`, or `:memory:`.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let trimmed = url.trim();
        let path = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);

        match path {
            "" => Err(ConfigError::InvalidDatabaseUrl(url.to_string())),
            ":memory:" => Ok(Self::Memory),
            p => Ok(Self::File(PathBuf::from(p))),
        }
    }
}

impl fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str(":memory:"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseLocation,
    pub port: u16,
    pub public_dir: Option<PathBuf>,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = var(DATABASE_URL_VAR)
            .ok_or(ConfigError::MissingDatabaseUrl)
            .and_then(|url| DatabaseLocation::parse(&url))?;

        let port = match var(PORT_VAR) {
            Some(value) => value.trim().parse::<u16>().map_err(|e| {
                warn!("Invalid {PORT_VAR} value: {e}");
                ConfigError::InvalidPort {
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => {
                info!("{PORT_VAR} not set, using default: {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        let public_dir = var(PUBLIC_DIR_VAR).map(PathBuf::from);

        Ok(Self {
            database,
            port,
            public_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn port_defaults_to_3001() {
        let config = Config::from_lookup(lookup(&[(DATABASE_URL_VAR, "records.db")])).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.database, DatabaseLocation::File("records.db".into()));
        assert!(config.public_dir.is_none());
    }

    #[test]
    fn explicit_port_and_public_dir() {
        let config = Config::from_lookup(lookup(&[
            (DATABASE_URL_VAR, ":memory:"),
            (PORT_VAR, "8080"),
            (PUBLIC_DIR_VAR, "public"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database, DatabaseLocation::Memory);
        assert_eq!(config.public_dir, Some(PathBuf::from("public")));
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = Config::from_lookup(lookup(&[(PORT_VAR, "8080")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingDatabaseUrl);
    }

    #[test]
    fn blank_database_url_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[(DATABASE_URL_VAR, "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingDatabaseUrl);
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            (DATABASE_URL_VAR, "records.db"),
            (PORT_VAR, "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "eighty"));
    }

    #[test]
    fn sqlite_scheme_prefixes_are_stripped() {
        assert_eq!(
            DatabaseLocation::parse("sqlite:///var/lib/care.db").unwrap(),
            DatabaseLocation::File("/var/lib/care.db".into())
        );
        assert_eq!(
            DatabaseLocation::parse("sqlite:care.db").unwrap(),
            DatabaseLocation::File("care.db".into())
        );
        assert_eq!(
            DatabaseLocation::parse("sqlite::memory:").unwrap(),
            DatabaseLocation::Memory
        );
    }

    #[test]
    fn scheme_without_path_is_invalid() {
        assert!(matches!(
            DatabaseLocation::parse("sqlite://"),
            Err(ConfigError::InvalidDatabaseUrl(_))
        ));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
