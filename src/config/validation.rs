//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every endpoint is an absolute http(s) URL
//! - Validate value ranges (attempts > 0, intervals and timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WalletConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::WalletConfig;
use crate::rpc::is_web_uri;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human readable description.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &WalletConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let urls = [
        ("swap.base_url", &config.swap.base_url),
        ("endpoints.hive_rpc", &config.endpoints.hive_rpc),
        ("endpoints.hive_engine_rpc", &config.endpoints.hive_engine_rpc),
        ("endpoints.account_history_api", &config.endpoints.account_history_api),
    ];
    for (field, value) in urls {
        if !is_web_uri(value) {
            errors.push(ValidationError::new(
                field,
                format!("'{}' is not an http(s) URL", value),
            ));
        }
    }

    if config.confirmation.max_attempts == 0 {
        errors.push(ValidationError::new(
            "confirmation.max_attempts",
            "must be greater than 0",
        ));
    }
    if config.confirmation.interval_ms == 0 {
        errors.push(ValidationError::new(
            "confirmation.interval_ms",
            "must be greater than 0",
        ));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.storage.path.trim().is_empty() {
        errors.push(ValidationError::new("storage.path", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&WalletConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = WalletConfig::default();
        config.swap.base_url = "ftp://swap.example".to_string();
        config.confirmation.max_attempts = 0;
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].field, "swap.base_url");
        assert!(errors.iter().any(|e| e.field == "confirmation.max_attempts"));
    }
}
