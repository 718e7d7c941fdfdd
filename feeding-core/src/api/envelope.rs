//! List response normalization.
//!
//! The backend answers list endpoints either with a bare JSON array or with
//! an object wrapping the array. Precedence is `items`, then `data`; any
//! other shape reads as an empty list. Records that do not decode are
//! skipped, not fatal to the list.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extracts the record array from a list response.
pub fn normalize_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut envelope) => {
            for key in ["items", "data"] {
                if let Some(Value::Array(items)) = envelope.remove(key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Normalizes and decodes a list response. Order is preserved; items that
/// fail to decode are logged and dropped.
pub fn decode_list<T: DeserializeOwned>(body: Value) -> Vec<T> {
    normalize_list(body)
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping list item {}: {}", index, e);
                None
            }
        })
        .collect()
}
