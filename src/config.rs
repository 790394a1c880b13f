//! Environment-driven configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Every key has a default so a bare `school-api serve` runs against a
//! local SQLite file.

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("unsupported database type '{0}' (expected sqlite, postgres or mysql)")]
    UnsupportedDatabase(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// `DB_TYPE`: sqlite, postgres or mysql
    pub db_type: String,
    pub db_user: String,
    pub db_password: String,
    pub db_host: String,
    /// `DB_PORT`; the driver default when unset
    pub db_port: Option<u16>,
    /// `DB_NAME`: database name, or the file path for SQLite
    pub db_name: String,
    /// `DATABASE_URL`: full connection string, overrides the `DB_*` values
    pub database_url: Option<String>,
    pub bind_address: String,
    pub frontend_origin: String,
}

impl Settings {
    /// Load settings from `.env` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::from_environment(::config::Environment::default())
    }

    fn from_environment(environment: ::config::Environment) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .set_default("db_type", "sqlite")?
            .set_default("db_user", "")?
            .set_default("db_password", "")?
            .set_default("db_host", "localhost")?
            .set_default("db_name", "school.db")?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("frontend_origin", DEFAULT_FRONTEND_ORIGIN)?
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Settings {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_environment(::config::Environment::default().source(Some(source)))
            .expect("settings should load")
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]);
        assert_eq!(settings.db_type, "sqlite");
        assert_eq!(settings.db_name, "school.db");
        assert_eq!(settings.db_host, "localhost");
        assert_eq!(settings.db_port, None);
        assert_eq!(settings.database_url, None);
        assert_eq!(settings.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.frontend_origin, DEFAULT_FRONTEND_ORIGIN);
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let settings = settings_from(&[
            ("DB_TYPE", "postgres"),
            ("DB_USER", "admin"),
            ("DB_PASSWORD", "0123"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "school"),
            ("FRONTEND_ORIGIN", "https://school.example.com"),
        ]);
        assert_eq!(settings.db_type, "postgres");
        assert_eq!(settings.db_user, "admin");
        assert_eq!(settings.db_password, "0123");
        assert_eq!(settings.db_host, "db.internal");
        assert_eq!(settings.db_port, Some(6543));
        assert_eq!(settings.db_name, "school");
        assert_eq!(settings.frontend_origin, "https://school.example.com");
    }

    #[test]
    fn test_invalid_port_is_a_load_error() {
        let source: HashMap<String, String> =
            HashMap::from([("DB_PORT".to_string(), "not-a-port".to_string())]);
        let result = Settings::from_environment(::config::Environment::default().source(Some(source)));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
