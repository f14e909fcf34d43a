use std::{env, fmt::Display, net::IpAddr, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::info;
use voyage_accounts::mongo_store::{DEFAULT_DATABASE, DEFAULT_MONGO_URI};
use voyage_narrative::gemini_api::{GEMINI_API_URL, GEMINI_DEFAULT_MODEL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountsBackend {
    Mongo,
    Memory,
}

impl FromStr for AccountsBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(AccountsBackend::Mongo),
            "memory" => Ok(AccountsBackend::Memory),
            other => Err(format!("expected `mongo` or `memory`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub generation_timeout: Duration,
    pub accounts_backend: AccountsBackend,
    pub mongo_uri: String,
    pub mongo_database: String,
    pub stops_file: Option<PathBuf>,
    /// Largest `stops` override a request may carry
    pub max_request_stops: usize,
}

pub const DEFAULT_MAX_REQUEST_STOPS: usize = 12;

/// Reads settings through `lookup`, so tests do not touch the process environment.
struct Settings<F> {
    lookup: F,
}

impl<F> Settings<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.var(key).ok_or(ConfigError::Missing(key))
    }

    fn string_or(&self, key: &'static str, default: &str) -> String {
        self.var(key).unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        match self.var(key) {
            Some(value) => value.trim().parse().map_err(|error: T::Err| ConfigError::Invalid {
                key,
                value,
                reason: error.to_string(),
            }),
            None => {
                info!("{key} not set, using default: {default}");
                Ok(default)
            }
        }
    }
}

impl Config {
    /// Loads from the environment, `.env` files are read beforehand by `main`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = Settings { lookup };

        let accounts_backend = match settings.var("VOYAGE_ACCOUNTS_BACKEND") {
            Some(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                key: "VOYAGE_ACCOUNTS_BACKEND",
                value,
                reason,
            })?,
            None => AccountsBackend::Mongo,
        };

        Ok(Config {
            host: settings.parse_or("VOYAGE_HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: settings.parse_or("VOYAGE_PORT", 8000)?,
            gemini_api_key: settings.required("GEMINI_API_KEY")?,
            gemini_model: settings.string_or("GEMINI_MODEL", GEMINI_DEFAULT_MODEL),
            gemini_base_url: settings.string_or("GEMINI_BASE_URL", GEMINI_API_URL),
            generation_timeout: Duration::from_secs(
                settings.parse_or("GENERATION_TIMEOUT_SECS", 60)?,
            ),
            accounts_backend,
            mongo_uri: settings.string_or("MONGO_URI", DEFAULT_MONGO_URI),
            mongo_database: settings.string_or("MONGO_DATABASE", DEFAULT_DATABASE),
            stops_file: settings.var("VOYAGE_STOPS_FILE").map(PathBuf::from),
            max_request_stops: settings
                .parse_or("VOYAGE_MAX_REQUEST_STOPS", DEFAULT_MAX_REQUEST_STOPS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "abc")])).unwrap();

        assert_eq!(config.gemini_api_key, "abc");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.generation_timeout, Duration::from_secs(60));
        assert_eq!(config.accounts_backend, AccountsBackend::Mongo);
        assert_eq!(config.mongo_uri, "mongodb://localhost:27017/");
        assert_eq!(config.mongo_database, "trip-planner");
        assert!(config.stops_file.is_none());
        assert_eq!(config.max_request_stops, 12);
    }

    #[test]
    fn test_missing_api_key_fails() {
        let result = Config::from_lookup(lookup(&[("VOYAGE_PORT", "9000")]));

        assert!(matches!(result, Err(ConfigError::Missing("GEMINI_API_KEY"))));
    }

    #[test]
    fn test_blank_api_key_fails() {
        let result = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")]));

        assert!(matches!(result, Err(ConfigError::Missing("GEMINI_API_KEY"))));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "abc"),
            ("VOYAGE_PORT", "9000"),
            ("VOYAGE_HOST", "127.0.0.1"),
            ("VOYAGE_ACCOUNTS_BACKEND", "memory"),
            ("GENERATION_TIMEOUT_SECS", "5"),
            ("VOYAGE_STOPS_FILE", "stops.json"),
            ("VOYAGE_MAX_REQUEST_STOPS", "20"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.accounts_backend, AccountsBackend::Memory);
        assert_eq!(config.generation_timeout, Duration::from_secs(5));
        assert_eq!(config.stops_file, Some(PathBuf::from("stops.json")));
        assert_eq!(config.max_request_stops, 20);
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "abc"),
            ("VOYAGE_PORT", "not-a-port"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "VOYAGE_PORT",
                ..
            })
        ));
    }
}
