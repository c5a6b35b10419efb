//! Host header forwarding.
//!
//! # Responsibilities
//! - Copy the `host` header into `x-forwarded-host`
//! - Leave requests without a host untouched
//! - Apply the same rule to edge events and to live HTTP requests
//!
//! # Design Decisions
//! - The host always wins: an upstream `x-forwarded-host` is overwritten
//! - Header names are taken as lower-case; no normalization happens here
//! - A `null` host record counts as absent
//! - An empty host value is forwarded unless [`EmptyHostPolicy::Skip`] is set

use axum::http::header::{HeaderMap, HOST};
use axum::http::HeaderName;
use serde::{Deserialize, Serialize};

use crate::edge::{EdgeRequest, HeaderRecord, ViewerRequestEvent};
use crate::observability::metrics;

/// Header map key holding the requested host.
pub const HOST_KEY: &str = "host";

/// Header map key the host is copied into.
pub const X_FORWARDED_HOST_KEY: &str = "x-forwarded-host";

/// `X-Forwarded-Host` as a typed header name.
pub static X_FORWARDED_HOST: HeaderName = HeaderName::from_static(X_FORWARDED_HOST_KEY);

/// What to do with a `host` header whose value is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyHostPolicy {
    /// Treat an empty host as missing.
    Skip,
    /// Copy the empty value like any other.
    #[default]
    Forward,
}

/// Result of running the forwarder over one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// `x-forwarded-host` was written.
    Forwarded,
    /// No usable host; the request is unchanged.
    NoHost,
}

impl ForwardOutcome {
    /// Metric label for this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            ForwardOutcome::Forwarded => "forwarded",
            ForwardOutcome::NoHost => "no_host",
        }
    }
}

/// Copies the request host into `x-forwarded-host`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderForwarder {
    empty_host: EmptyHostPolicy,
}

impl HeaderForwarder {
    pub fn new(empty_host: EmptyHostPolicy) -> Self {
        Self { empty_host }
    }

    pub fn empty_host_policy(&self) -> EmptyHostPolicy {
        self.empty_host
    }

    /// Run the forwarder over `request` in place and hand the same request back.
    pub fn process<'a>(&self, request: &'a mut EdgeRequest) -> &'a mut EdgeRequest {
        self.forward(request);
        request
    }

    /// Unwrap a viewer-request event and return its (possibly mutated) request.
    pub fn handle(&self, event: ViewerRequestEvent) -> EdgeRequest {
        let mut request = event.request;
        self.forward(&mut request);
        request
    }

    /// Apply the forwarding rule to an edge request.
    ///
    /// A request with no header mapping at all, or whose `host` entry is
    /// `null`, is treated as having no host. Neither is rewritten.
    pub fn forward(&self, request: &mut EdgeRequest) -> ForwardOutcome {
        let host = request
            .headers
            .as_ref()
            .and_then(|headers| headers.get(HOST_KEY))
            .and_then(Option::as_ref)
            .map(|record| record.value.clone())
            .filter(|value| self.accepts(value.as_bytes()));

        let outcome = match (host, request.headers.as_mut()) {
            (Some(host), Some(headers)) => {
                tracing::debug!(host = %host, "Forwarding host");
                headers.insert(
                    X_FORWARDED_HOST_KEY.to_string(),
                    Some(HeaderRecord::new(host)),
                );
                ForwardOutcome::Forwarded
            }
            _ => {
                tracing::trace!("No host header, passing request through");
                ForwardOutcome::NoHost
            }
        };

        metrics::record_forward(outcome);
        outcome
    }

    /// Apply the forwarding rule to a live HTTP header map.
    ///
    /// Only the first `Host` value is consulted and any existing
    /// `X-Forwarded-Host` values are replaced by a single one.
    pub fn forward_http(&self, headers: &mut HeaderMap) -> ForwardOutcome {
        let host = headers
            .get(HOST)
            .filter(|value| self.accepts(value.as_bytes()))
            .cloned();

        let outcome = match host {
            Some(host) => {
                tracing::debug!(host = ?host, "Forwarding host");
                headers.insert(X_FORWARDED_HOST.clone(), host);
                ForwardOutcome::Forwarded
            }
            None => {
                tracing::trace!("No host header, passing request through");
                ForwardOutcome::NoHost
            }
        };

        metrics::record_forward(outcome);
        outcome
    }

    fn accepts(&self, host: &[u8]) -> bool {
        !host.is_empty() || self.empty_host == EmptyHostPolicy::Forward
    }
}
