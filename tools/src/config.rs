//! Backend configuration
//!
//! The tools talk to a single backend whose base URL comes from the
//! environment:
//!
//! - `RENTAL_DESK_ENDPOINT` (required): base URL, e.g. `https://desk.example.com/api`
//!
//! # Example
//!
//! ```no_run
//! use rental_desk_tools::config::BackendConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BackendConfig::from_env()?;
//! println!("Backend: {}", config.endpoint());
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Environment variable holding the backend base URL
pub const ENDPOINT_VAR: &str = "RENTAL_DESK_ENDPOINT";

/// Configuration error
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Endpoint is empty or not an http(s) URL
    #[error("Invalid endpoint '{0}': must start with http:// or https://")]
    InvalidEndpoint(String),
}

/// Backend connection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    endpoint: String,
}

impl BackendConfig {
    /// Create a configuration for an explicit endpoint
    ///
    /// Surrounding whitespace and trailing slashes are removed so routes can
    /// be appended with a single `/`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEndpoint` unless the endpoint starts with
    /// `http://` or `https://` and names a host.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = endpoint.into();
        let endpoint = raw.trim().trim_end_matches('/');

        let host = endpoint
            .strip_prefix("https://")
            .or_else(|| endpoint.strip_prefix("http://"));

        match host {
            Some(host) if !host.is_empty() => Ok(Self {
                endpoint: endpoint.to_string(),
            }),
            _ => Err(ConfigError::InvalidEndpoint(raw)),
        }
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvVarNotSet` if `RENTAL_DESK_ENDPOINT` is not
    /// set, or `ConfigError::InvalidEndpoint` if its value is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    ///
    /// # Errors
    ///
    /// Same as [`BackendConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint =
            lookup(ENDPOINT_VAR).ok_or_else(|| ConfigError::EnvVarNotSet(ENDPOINT_VAR.to_string()))?;
        Self::new(endpoint)
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = BackendConfig::new("https://desk.example.com/api/").unwrap();
        assert_eq!(config.endpoint(), "https://desk.example.com/api");

        let config = BackendConfig::new("  http://localhost:8000//  ").unwrap();
        assert_eq!(config.endpoint(), "http://localhost:8000");
    }

    #[test]
    fn test_new_rejects_non_http() {
        assert_eq!(
            BackendConfig::new("ftp://desk.example.com"),
            Err(ConfigError::InvalidEndpoint("ftp://desk.example.com".to_string()))
        );
        assert!(BackendConfig::new("desk.example.com").is_err());
        assert!(BackendConfig::new("https://").is_err());
        assert!(BackendConfig::new("").is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = BackendConfig::from_lookup(|key| {
            (key == ENDPOINT_VAR).then(|| "http://127.0.0.1:9000".to_string())
        })
        .unwrap();
        assert_eq!(config.endpoint(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_from_lookup_missing() {
        assert_eq!(
            BackendConfig::from_lookup(|_| None),
            Err(ConfigError::EnvVarNotSet(ENDPOINT_VAR.to_string()))
        );
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::EnvVarNotSet(ENDPOINT_VAR.to_string());
        assert_eq!(
            error.to_string(),
            "Environment variable not set: RENTAL_DESK_ENDPOINT"
        );
    }
}
