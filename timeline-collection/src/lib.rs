//! Remote collection adapter: request URLs, transport seam, payload decoding
//! and a [`CollectionSource`](timeline_core::CollectionSource) over HTTP.

use serde_json::Value;
use timeline_core::{Collection, TimelineError};

pub mod client;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;
pub mod request;
pub mod transport;

pub use client::{fragment_selector, CollectionClient, FragmentExtractor};
#[cfg(not(target_arch = "wasm32"))]
pub use http::ReqwestTransport;
pub use request::CollectionRequest;
pub use transport::{FetchError, HttpResponse, Transport};

/// Decodes a collection payload from a JSON string.
pub fn parse_collection_str(payload: &str) -> Result<Collection, TimelineError> {
    serde_json::from_str(payload).map_err(|err| TimelineError::Parse(err.to_string()))
}

/// Decodes a collection payload from a `serde_json::Value`.
pub fn parse_collection_value(payload: Value) -> Result<Collection, TimelineError> {
    if !payload.is_object() {
        return Err(TimelineError::Parse(
            "expected a JSON object with an `items` array".to_string(),
        ));
    }
    serde_json::from_value(payload).map_err(|err| TimelineError::Parse(err.to_string()))
}
