//! Serialized form of an edit script.
//!
//! A payload is a JSON array of `{"type", "position", "text"}` objects in
//! application order, with `type` one of `"INSERT"` or `"DELETE"`. Stored
//! payloads must stay readable, so unknown fields are ignored on decode.

use crate::edit::EditScript;
use crate::error::{DiffError, DiffResult};

/// Payload of a script with no operations. Decodes to a no-op.
pub const EMPTY_PAYLOAD: &str = "[]";

/// Encode a script as a compact JSON payload.
pub fn encode(script: &EditScript) -> DiffResult<String> {
    serde_json::to_string(script).map_err(|e| DiffError::Serialization(e.to_string()))
}

/// Decode a payload produced by [`encode`].
pub fn decode(payload: &str) -> DiffResult<EditScript> {
    serde_json::from_str(payload).map_err(|e| DiffError::Serialization(e.to_string()))
}
