//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign / propagate x-request-id)
//!     → forwarded_host.rs (copy Host → X-Forwarded-Host)
//!     → echo handler (reports what the upstream would receive)
//! ```

pub mod forwarded_host;
pub mod request;
pub mod server;

pub use forwarded_host::{ForwardedHost, ForwardedHostLayer};
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{EchoedRequest, HttpServer};
