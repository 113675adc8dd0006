//! Configuration module for the gallery backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

use crate::errors::AppError;

/// Images per page when the client does not ask for a size.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Default number of images per gallery page
    pub page_size: usize,
    /// Load the bundled sample gallery at startup
    pub seed_fixtures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            seed_fixtures: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("GALLERY_BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|_| {
                AppError::Config(format!("Invalid GALLERY_BIND_ADDR format: {}", raw))
            })?,
            None => defaults.bind_addr,
        };

        let log_level = lookup("GALLERY_LOG_LEVEL").unwrap_or(defaults.log_level);

        let page_size = match lookup("GALLERY_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(AppError::Config(format!(
                        "GALLERY_PAGE_SIZE must be a positive integer, got {}",
                        raw
                    )))
                }
            },
            None => defaults.page_size,
        };

        let seed_fixtures = match lookup("GALLERY_SEED_FIXTURES") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!("Invalid GALLERY_SEED_FIXTURES value: {}", raw))
            })?,
            None => defaults.seed_fixtures,
        };

        Ok(Self {
            bind_addr,
            log_level,
            page_size,
            seed_fixtures,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
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
    fn test_default_config() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.page_size, 8);
        assert!(config.seed_fixtures);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GALLERY_BIND_ADDR", "0.0.0.0:9000"),
            ("GALLERY_LOG_LEVEL", "debug"),
            ("GALLERY_PAGE_SIZE", "12"),
            ("GALLERY_SEED_FIXTURES", "off"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9000");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.page_size, 12);
        assert!(!config.seed_fixtures);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = Config::from_lookup(lookup_from(&[("GALLERY_BIND_ADDR", "nowhere")]))
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        assert!(Config::from_lookup(lookup_from(&[("GALLERY_PAGE_SIZE", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("GALLERY_SEED_FIXTURES", "maybe")])).is_err());
    }
}
