//! Edge handler that mirrors the `Host` header into `X-Forwarded-Host`.

pub mod config;
pub mod edge;
pub mod forwarder;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use edge::{EdgeRequest, HeaderRecord, ViewerRequestEvent};
pub use forwarder::{EmptyHostPolicy, ForwardOutcome, HeaderForwarder};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
