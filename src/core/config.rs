//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

use crate::core::api::DEFAULT_FIELD_LIMIT;

/// Salesforce API version used for SOAP login and REST describe calls
pub const DEFAULT_API_VERSION: &str = "60.0";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Salesforce API version, e.g. "60.0"
    pub api_version: String,

    /// Timeout for every request to Salesforce
    pub request_timeout_secs: u64,

    /// Lifetime of a server-side session after the last request
    pub session_ttl_minutes: i64,

    /// Mark the session cookie `Secure` (serve over HTTPS)
    pub cookie_secure: bool,

    /// Field limit used when a `/generate_erd` request omits `field_limit`.
    /// The bundled editor always sends the limit picked in its selector.
    pub default_field_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::defaults();
        Self {
            api_version: lookup("SF_API_VERSION")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_version),
            request_timeout_secs: lookup("SF_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            session_ttl_minutes: lookup("SESSION_TTL_MINUTES")
                .and_then(|v| v.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(defaults.session_ttl_minutes),
            cookie_secure: lookup("SESSION_COOKIE_SECURE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.cookie_secure),
            default_field_limit: lookup("DEFAULT_FIELD_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_field_limit),
        }
    }

    /// Built-in defaults, independent of the environment
    pub fn defaults() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout_secs: 30,
            session_ttl_minutes: 120,
            cookie_secure: false,
            default_field_limit: DEFAULT_FIELD_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[]));

        assert_eq!(config.api_version, "60.0");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.session_ttl_minutes, 120);
        assert!(!config.cookie_secure);
        assert_eq!(config.default_field_limit, 5);
    }

    #[test]
    fn test_values_read_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("SF_API_VERSION", "61.0"),
            ("SF_REQUEST_TIMEOUT_SECS", "10"),
            ("SESSION_TTL_MINUTES", "15"),
            ("SESSION_COOKIE_SECURE", "true"),
            ("DEFAULT_FIELD_LIMIT", "20"),
        ]));

        assert_eq!(config.api_version, "61.0");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.session_ttl_minutes, 15);
        assert!(config.cookie_secure);
        assert_eq!(config.default_field_limit, 20);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("SF_API_VERSION", "  "),
            ("SF_REQUEST_TIMEOUT_SECS", "soon"),
            ("SESSION_TTL_MINUTES", "-3"),
            ("SESSION_COOKIE_SECURE", "nope"),
        ]));

        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.session_ttl_minutes, 120);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_config_from_env_returns_config() {
        // Actual values depend on environment, so we don't assert specific values
        let config = Config::from_env();
        assert!(!config.api_version.is_empty());
    }

    #[test]
    fn test_config_debug() {
        let debug_str = format!("{:?}", Config::defaults());
        assert!(debug_str.contains("Config"));
        assert!(debug_str.contains("api_version"));
    }
}
