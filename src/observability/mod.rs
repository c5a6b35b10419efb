//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! forwarder / http server produce:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → Log aggregation (stderr of the edge runtime or server process)
//!     → Metrics endpoint (Prometheus scrape, serve mode only)
//! ```

pub mod logging;
pub mod metrics;
