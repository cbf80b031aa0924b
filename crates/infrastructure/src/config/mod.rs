//! Application configuration
//!
//! Split into focused sub-modules:
//! - `logging`: log filter and output format
//! - `resolver`: debounce and lookup tuning for the address fields
//! - `database`: SQLite ride storage
//!
//! Map service sections reuse the client configs from `integration_maps` and
//! the tariff reuses `domain::FareSchedule`.

mod database;
mod logging;
mod resolver;

use std::fmt;
use std::path::Path;

use domain::value_objects::FareSchedule;
use integration_maps::{NominatimConfig, OsrmConfig, PhotonConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use database::DatabaseConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use resolver::ResolverAppConfig;

/// Prefix for environment overrides, e.g. `RIDEQUOTE_FARE__BASE_FARE=3.0`
pub const ENV_PREFIX: &str = "RIDEQUOTE";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Signed-in user for commands that need a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// User id to sign in as
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Photon typing suggestions
    #[serde(default)]
    pub photon: PhotonConfig,

    /// Nominatim address lookup
    #[serde(default)]
    pub nominatim: NominatimConfig,

    /// OSRM driving routes
    #[serde(default)]
    pub osrm: OsrmConfig,

    /// Address field debounce and lookup settings
    #[serde(default)]
    pub resolver: ResolverAppConfig,

    /// Tariff
    #[serde(default)]
    pub fare: FareSchedule,

    /// Ride storage
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or does not match the
    /// expected structure.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file, then the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            // Nested keys use a double underscore: RIDEQUOTE_OSRM__BASE_URL
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        debug!(environment = %app_config.environment, "Configuration loaded");
        Ok(app_config)
    }

    /// Check every section, reporting all problems at once
    ///
    /// # Errors
    ///
    /// Returns one message per invalid setting, joined by `; `.
    pub fn validate(&self) -> Result<(), String> {
        let errors: Vec<String> = [
            self.photon.validate(),
            self.nominatim.validate(),
            self.osrm.validate(),
            self.resolver.validate(),
            self.fare.validate().map_err(|e| e.to_string()),
            self.database.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.resolver.auto_resolve);
        assert!(config.session.user_id.is_none());
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let file = write_config(
            r#"
            environment = "production"

            [logging]
            filter = "debug"
            format = "json"

            [osrm]
            base_url = "http://osrm.internal:5000"

            [resolver]
            suggest_delay_ms = 150
            auto_resolve = false

            [fare]
            base_fare = 3.0
            "#,
        );

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.osrm.base_url, "http://osrm.internal:5000");
        assert_eq!(config.resolver.suggest_delay_ms, 150);
        assert_eq!(config.resolver.resolve_delay_ms, 800);
        assert!(!config.resolver.auto_resolve);
        assert!((config.fare.base_fare - 3.0).abs() < f64::EPSILON);
        assert!((config.fare.per_km_rate - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn resolver_section_converts_to_durations() {
        let resolver = ResolverAppConfig {
            suggest_delay_ms: 120,
            ..ResolverAppConfig::default()
        }
        .to_resolver_config();
        assert_eq!(resolver.suggest_delay, std::time::Duration::from_millis(120));
        assert_eq!(resolver.resolve_delay, std::time::Duration::from_millis(800));
        assert_eq!(resolver.min_query_chars, 3);
        assert_eq!(resolver.suggestion_limit, 5);
    }

    #[test]
    fn validate_collects_every_problem() {
        let mut config = AppConfig::default();
        config.osrm.base_url = String::new();
        config.fare.per_km_rate = -1.0;
        config.resolver.suggestion_limit = 0;

        let message = config.validate().unwrap_err();
        assert!(message.contains("per_km_rate"));
        assert!(message.contains("suggestion_limit"));
        assert_eq!(message.matches("; ").count(), 2);
    }

    #[test]
    fn validate_rejects_empty_database_path() {
        let mut config = AppConfig::default();
        config.database.path = "  ".to_string();
        assert!(config.validate().unwrap_err().contains("database.path"));
    }

    #[test]
    fn environment_parsing() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("Development".parse::<Environment>(), Ok(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
