//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the triage service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TriageConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request admission (rate limiting) configuration.
    pub rate_limit: RateLimitConfig,

    /// External geocoding service configuration.
    pub geocoder: GeocoderConfig,

    /// Session handling configuration.
    pub session: SessionConfig,

    /// Request hardening settings.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request admission configuration.
///
/// Two independent limits share one window length: a coarse service-wide
/// limit applied to every route, and a stricter one applied to the diagnosis
/// endpoint only.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable request admission control.
    pub enabled: bool,

    /// Counting window length in seconds.
    pub window_secs: u64,

    /// Requests per window per client across the whole service.
    pub service_per_window: u32,

    /// Requests per window per client on the diagnosis endpoint.
    pub chat_per_window: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_secs: 60,
            service_per_window: 10,
            chat_per_window: 5,
        }
    }
}

/// External geocoding service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Base URL of the geocoding service.
    pub base_url: String,

    /// User-Agent header sent with lookups (the public service requires one).
    pub user_agent: String,

    /// Lookup timeout in seconds. Bounds the only high-latency call in the
    /// request path.
    pub timeout_secs: u64,

    /// Maximum facility candidates requested per lookup.
    pub max_results: u32,

    /// Location used when the client supplies none.
    pub fallback_location: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("triage-bot/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 5,
            max_results: 3,
            fallback_location: "New York".to_string(),
        }
    }
}

/// Session handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session lifetime in seconds.
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

/// Request hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: TriageConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.rate_limit.service_per_window, 10);
        assert_eq!(config.rate_limit.chat_per_window, 5);
        assert_eq!(config.geocoder.fallback_location, "New York");
        assert_eq!(config.geocoder.max_results, 3);
    }

    #[test]
    fn empty_toml_is_fully_defaulted() {
        let config: TriageConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.window_secs, 60);
    }
}
