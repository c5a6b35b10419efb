//! Edge platform event model.
//!
//! # Data Flow
//! ```text
//! viewer-request event (JSON)
//!     → event.rs (decode into ViewerRequestEvent)
//!     → forwarder (copy host → x-forwarded-host)
//!     → event.rs (encode the returned EdgeRequest)
//!     → back to the platform
//! ```
//!
//! # Design Decisions
//! - Header maps are keyed by lower-case names, as delivered by the platform
//! - Fields the handler never touches are kept verbatim
//! - A missing header map stays missing on the way out

pub mod event;

pub use event::{
    decode_event, encode_request, handle_event_json, read_event, EdgeRequest, EventError,
    HeaderRecord, Headers, ViewerRequestEvent,
};
