//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (durations positive and finite, limits non-zero)
//! - Check that the base URL is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PollerConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::PollerConfig;

/// A single rejected setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check every setting and report all violations.
pub fn validate_config(config: &PollerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.base_url.trim().is_empty() {
        errors.push(ValidationError::new("base_url", "is required"));
    } else {
        match Url::parse(&config.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new("base_url", e.to_string())),
        }
    }

    if let Some(param) = &config.job_id_param {
        if param.trim().is_empty() {
            errors.push(ValidationError::new("job_id_param", "must not be empty when set"));
        }
    }

    let polling = &config.polling;
    check_seconds(&mut errors, "polling.initial_delay_secs", polling.initial_delay_secs);
    check_seconds(&mut errors, "polling.max_delay_secs", polling.max_delay_secs);
    check_seconds(&mut errors, "polling.overall_timeout_secs", polling.overall_timeout_secs);
    if polling.max_delay_secs < polling.initial_delay_secs {
        errors.push(ValidationError::new(
            "polling.max_delay_secs",
            "must be at least polling.initial_delay_secs",
        ));
    }
    if polling.max_concurrent_calls == 0 {
        errors.push(ValidationError::new("polling.max_concurrent_calls", "must be at least 1"));
    }
    if polling.consecutive_error_limit == 0 {
        errors.push(ValidationError::new("polling.consecutive_error_limit", "must be at least 1"));
    }

    check_seconds(&mut errors, "timeouts.request_secs", config.timeouts.request_secs);
    check_seconds(&mut errors, "cache.ttl_secs", config.cache.ttl_secs);

    if config.circuit_breaker.failure_threshold == 0 {
        errors.push(ValidationError::new("circuit_breaker.failure_threshold", "must be at least 1"));
    }
    check_seconds(
        &mut errors,
        "circuit_breaker.reset_timeout_secs",
        config.circuit_breaker.reset_timeout_secs,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_seconds(errors: &mut Vec<ValidationError>, field: &'static str, value: f64) {
    // Duration::from_secs_f64 panics on negative, NaN or overflowing input.
    if !value.is_finite() || value <= 0.0 || value > u32::MAX as f64 {
        errors.push(ValidationError::new(
            field,
            format!("must be a positive number of seconds, got {value}"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_with_url_is_valid() {
        let config = PollerConfig::new("http://localhost:8000");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_base_url() {
        let errors = validate_config(&PollerConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "base_url");
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = PollerConfig::new("ftp://example.com");
        config.polling.initial_delay_secs = 4.0;
        config.polling.max_delay_secs = 2.0;
        config.polling.max_concurrent_calls = 0;
        config.cache.ttl_secs = f64::NAN;
        config.circuit_breaker.failure_threshold = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "base_url",
                "polling.max_delay_secs",
                "polling.max_concurrent_calls",
                "cache.ttl_secs",
                "circuit_breaker.failure_threshold",
            ]
        );
        assert!(errors[0].to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_negative_durations_rejected() {
        let mut config = PollerConfig::new("https://example.com");
        config.timeouts.request_secs = -1.0;
        config.polling.overall_timeout_secs = 0.0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
