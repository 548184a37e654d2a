//! Configuration management for the microlending backend
//!
//! This module handles loading and validating configuration from environment variables,
//! with support for different environments (development, staging, production).

use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::loan::TransitionPolicy;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Application environment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Get the environment name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Current environment
    pub environment: Environment,

    /// Server port
    pub port: u16,

    /// CORS allowed origins
    pub cors_allowed_origins: Option<String>,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// Artificial delay applied to submissions and repayments
    pub simulated_latency: Duration,

    /// Rate applied when an application does not name one (percent)
    pub default_interest_rate: f64,

    /// Which status changes the registry accepts
    pub transition_policy: TransitionPolicy,

    /// Load the demo loan book at startup
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            port: 3001,
            cors_allowed_origins: None,
            log_level: "info".to_string(),
            simulated_latency: Duration::from_millis(2000),
            default_interest_rate: 5.5,
            transition_policy: TransitionPolicy::Strict,
            seed_demo_data: true,
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!(
            "{} must be a boolean, got '{}'",
            name, value
        ))),
    }
}

fn parse_latency(value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| {
            ConfigError::InvalidValue(format!(
                "SIMULATED_LATENCY_MS must be a whole number of milliseconds, got '{}'",
                value
            ))
        })
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let environment = env::var("ENVIRONMENT")
            .map(|s| Environment::from_str(&s))
            .unwrap_or(Ok(Environment::Development))?;

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS").ok();

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let simulated_latency = match env::var("SIMULATED_LATENCY_MS") {
            Ok(v) => parse_latency(&v)?,
            Err(_) => defaults.simulated_latency,
        };

        let default_interest_rate = match env::var("DEFAULT_INTEREST_RATE") {
            Ok(v) => {
                let rate = v.parse::<f64>().map_err(|_| {
                    ConfigError::InvalidValue(format!(
                        "DEFAULT_INTEREST_RATE must be a number, got '{}'",
                        v
                    ))
                })?;
                if !(0.0..=100.0).contains(&rate) {
                    return Err(ConfigError::InvalidValue(format!(
                        "DEFAULT_INTEREST_RATE must be between 0 and 100, got {}",
                        rate
                    )));
                }
                rate
            }
            Err(_) => defaults.default_interest_rate,
        };

        let transition_policy = match env::var("LOAN_TRANSITION_POLICY") {
            Ok(v) => v.parse::<TransitionPolicy>().map_err(ConfigError::InvalidValue)?,
            Err(_) => defaults.transition_policy,
        };

        let seed_demo_data = match env::var("SEED_DEMO_DATA") {
            Ok(v) => parse_bool("SEED_DEMO_DATA", &v)?,
            Err(_) => defaults.seed_demo_data,
        };

        Ok(Config {
            environment,
            port,
            cors_allowed_origins,
            log_level,
            simulated_latency,
            default_interest_rate,
            transition_policy,
            seed_demo_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!(
            Environment::from_str("dev").unwrap(),
            Environment::Development
        );
        assert_eq!(
            Environment::from_str("staging").unwrap(),
            Environment::Staging
        );
        assert_eq!(
            Environment::from_str("production").unwrap(),
            Environment::Production
        );

        // Case insensitive
        assert_eq!(
            Environment::from_str("PROD").unwrap(),
            Environment::Production
        );

        // Invalid
        assert!(Environment::from_str("invalid").is_err());
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.simulated_latency, Duration::from_millis(2000));
        assert_eq!(config.default_interest_rate, 5.5);
        assert_eq!(config.transition_policy, TransitionPolicy::Strict);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        let err = parse_bool("SEED_DEMO_DATA", "maybe").unwrap_err();
        assert!(err.to_string().contains("SEED_DEMO_DATA"));
    }

    #[test]
    fn test_parse_latency() {
        assert_eq!(parse_latency("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_latency("250").unwrap(), Duration::from_millis(250));

        let err = parse_latency("2s").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
        assert!(err.to_string().contains("SIMULATED_LATENCY_MS"));
        assert!(parse_latency("-5").is_err());
    }

    #[test]
    fn test_config_error_types() {
        let err = ConfigError::InvalidPort("invalid".to_string());
        assert!(err.to_string().contains("invalid"));
    }
}
