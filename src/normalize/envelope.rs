//! Envelope resolution.

use serde_json::Value;

use crate::models::RawRecord;

/// Keys checked, in order, for a wrapped payload.
///
/// `d` comes first: the legacy envelope can itself carry nested result
/// containers.
const ENVELOPE_KEYS: [&str; 2] = ["d", "value"];

/// Returns the payload carried by a top-level response value.
///
/// The first envelope key that is present with a non-null value wins;
/// otherwise the top-level value itself is the payload.
pub fn resolve_payload(envelope: &Value) -> &Value {
    if let Value::Object(map) = envelope {
        for key in ENVELOPE_KEYS {
            match map.get(key) {
                Some(Value::Null) | None => continue,
                Some(inner) => return inner,
            }
        }
    }
    envelope
}

/// Extracts the raw record list from a top-level response value.
///
/// A payload that is not an array yields an empty list; absence of data is not
/// an error. Array elements that are not objects become empty records so the
/// record count still matches the response.
pub fn resolve_records(envelope: &Value) -> Vec<RawRecord> {
    match resolve_payload(envelope) {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => map.clone(),
                _ => RawRecord::new(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
