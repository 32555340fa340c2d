//! List-payload normalization.
//!
//! Pump.fun wraps list responses inconsistently: some endpoints return a bare
//! array, others nest it under `data`, `trades`, `items` or `tokens`. The
//! helpers here flatten that into a plain item vec without validating the
//! item shape, which is owned by the remote API.

use serde_json::Value;

/// Envelope keys checked by the endpoint helpers, in priority order.
pub const LIST_KEYS: &[&str] = &["data", "trades", "items", "tokens"];

/// Extracts the item array from a list-shaped payload.
///
/// Returns the first array found under any of `keys`, the payload itself if
/// it is already an array, or an empty vec for `null` payloads. Any other
/// shape yields an empty vec as well, matching end-of-data semantics for
/// pagination.
pub fn extract_items(value: Value, keys: &[&str]) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in keys {
                if let Some(Value::Array(items)) = map.remove(*key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}
