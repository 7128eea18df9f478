//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, addresses parseable)
//! - Check the geocoder endpoint is a well-formed URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: TriageConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::TriageConfig;

/// A single semantic violation found in a configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    InvalidGeocoderUrl(String),
    EmptyFallbackLocation,
    ZeroRateLimitWindow,
    ZeroRateLimit(&'static str),
    MaxResultsOutOfRange(u32),
    ZeroSessionTtl,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address is not a socket address: {}", addr)
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(
                    f,
                    "observability.metrics_address is not a socket address: {}",
                    addr
                )
            }
            ValidationError::InvalidGeocoderUrl(url) => {
                write!(f, "geocoder.base_url is not a valid URL: {}", url)
            }
            ValidationError::EmptyFallbackLocation => {
                write!(f, "geocoder.fallback_location must not be empty")
            }
            ValidationError::ZeroRateLimitWindow => {
                write!(f, "rate_limit.window_secs must be greater than zero")
            }
            ValidationError::ZeroRateLimit(field) => {
                write!(f, "rate_limit.{} must be greater than zero", field)
            }
            ValidationError::MaxResultsOutOfRange(n) => {
                write!(f, "geocoder.max_results must be in 1..=10, got {}", n)
            }
            ValidationError::ZeroSessionTtl => {
                write!(f, "session.ttl_secs must be greater than zero")
            }
        }
    }
}

/// Check a deserialized configuration for semantic violations.
///
/// Collects every violation instead of stopping at the first.
pub fn validate_config(config: &TriageConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if Url::parse(&config.geocoder.base_url).is_err() {
        errors.push(ValidationError::InvalidGeocoderUrl(
            config.geocoder.base_url.clone(),
        ));
    }

    if config.geocoder.fallback_location.trim().is_empty() {
        errors.push(ValidationError::EmptyFallbackLocation);
    }

    if !(1..=10).contains(&config.geocoder.max_results) {
        errors.push(ValidationError::MaxResultsOutOfRange(
            config.geocoder.max_results,
        ));
    }

    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError::ZeroRateLimitWindow);
    }
    if config.rate_limit.service_per_window == 0 {
        errors.push(ValidationError::ZeroRateLimit("service_per_window"));
    }
    if config.rate_limit.chat_per_window == 0 {
        errors.push(ValidationError::ZeroRateLimit("chat_per_window"));
    }

    if config.session.ttl_secs == 0 {
        errors.push(ValidationError::ZeroSessionTtl);
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
    fn default_config_is_valid() {
        assert!(validate_config(&TriageConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_violations() {
        let mut config = TriageConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.geocoder.base_url = "::also not a url::".to_string();
        config.geocoder.fallback_location = "   ".to_string();
        config.rate_limit.chat_per_window = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::EmptyFallbackLocation));
        assert!(errors.contains(&ValidationError::ZeroRateLimit("chat_per_window")));
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = TriageConfig::default();
        config.observability.metrics_enabled = false;
        config.observability.metrics_address = "nonsense".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
