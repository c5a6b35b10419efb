//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::forwarder::{EmptyHostPolicy, HeaderForwarder};

/// Root configuration for the host forwarder.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration for `serve` mode.
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Host forwarding behaviour.
    pub forwarding: ForwardingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8888").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8888".to_string(),
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

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Whether an empty `host` value is forwarded or treated as missing.
    pub empty_host: EmptyHostPolicy,
}

impl ForwardingConfig {
    pub fn forwarder(&self) -> HeaderForwarder {
        HeaderForwarder::new(self.empty_host)
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
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8888");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.forwarding.empty_host, EmptyHostPolicy::Forward);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn partial_sections() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [forwarding]
            empty_host = "skip"

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.forwarding.empty_host, EmptyHostPolicy::Skip);
        assert_eq!(
            config.forwarding.forwarder().empty_host_policy(),
            EmptyHostPolicy::Skip
        );
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.metrics_address, "127.0.0.1:9090");
    }

    #[test]
    fn unknown_policy_rejected() {
        let result: Result<ServiceConfig, _> = toml::from_str(
            r#"
            [forwarding]
            empty_host = "sometimes"
            "#,
        );
        assert!(result.is_err());
    }
}
