//! Raw bytes → `serde_json::Value`, plus optional sub-document selection.
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// Deserialize with JSON-path context in error messages.
fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        Error::Malformed {
            path,
            message: err.into_inner().to_string(),
        }
    })
}

/// Decode a whole document. Trailing garbage after the value is rejected.
pub fn parse_document(bytes: &[u8]) -> Result<Value> {
    from_slice_with_path(bytes)
}

/// Narrow the document to the value at `pointer` (RFC 6901), e.g. `/Config`
/// for the `{"Config": {...}}` envelope served by the configuration API.
pub fn select(document: Value, pointer: Option<&str>) -> Result<Value> {
    match pointer {
        None | Some("") => Ok(document),
        Some(ptr) => {
            let mut document = document;
            document
                .pointer_mut(ptr)
                .map(Value::take)
                .ok_or_else(|| Error::PointerNotFound(ptr.to_string()))
        }
    }
}
