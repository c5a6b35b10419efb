//! Viewer-request event types and JSON codec.

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::forwarder::HeaderForwarder;

/// Header map of an edge request, keyed by lower-case header name.
///
/// The platform may mark a header as absent with `null`; such entries
/// decode to `None` and are written back as `null`.
pub type Headers = BTreeMap<String, Option<HeaderRecord>>;

/// Error type for decoding and encoding edge events.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("failed to read event: {0}")]
    Read(#[from] std::io::Error),
    #[error("malformed event: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A single header as the platform represents it.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct HeaderRecord {
    pub value: String,

    /// Attributes other than `value`, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HeaderRecord {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            extra: Map::new(),
        }
    }
}

/// The request carried by a viewer-request event.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct EdgeRequest {
    /// `None` when the platform sent no header map at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,

    /// `method`, `uri`, `querystring`, `cookies` and anything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EdgeRequest {
    pub fn with_headers(headers: Headers) -> Self {
        Self {
            headers: Some(headers),
            extra: Map::new(),
        }
    }
}

/// Event handed to the handler by the edge platform.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewerRequestEvent {
    pub request: EdgeRequest,

    /// `version`, `context`, `viewer` and friends.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn decode_event(input: &str) -> Result<ViewerRequestEvent, EventError> {
    serde_json::from_str(input).map_err(EventError::Decode)
}

pub fn read_event<R: Read>(mut reader: R) -> Result<ViewerRequestEvent, EventError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    decode_event(&input)
}

pub fn encode_request(request: &EdgeRequest) -> Result<String, EventError> {
    serde_json::to_string_pretty(request).map_err(EventError::Encode)
}

/// Decode an event, run the forwarder and encode the resulting request.
pub fn handle_event_json(forwarder: &HeaderForwarder, input: &str) -> Result<String, EventError> {
    let event = decode_event(input)?;
    let request = forwarder.handle(event);
    encode_request(&request)
}
