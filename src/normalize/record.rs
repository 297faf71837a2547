//! Record normalization.

use serde_json::Value;

use super::aliases::{aliases_for, Field};
use crate::models::{NormalizedRecord, RawRecord, StatisticKind};

/// Maps one raw row into a canonical record for `kind`.
///
/// Total and pure: missing or unparsable fields become zero (or an empty
/// label), so the worst case is an all-zero record.
///
/// # Examples
///
/// ```
/// use bing_webmaster::normalize::normalize;
/// use bing_webmaster::StatisticKind;
/// use serde_json::json;
///
/// let raw = json!({"PageUrl": "https://example.com/", "clicks": "12", "CTR": 0.04});
/// let record = normalize(StatisticKind::Page, raw.as_object().unwrap());
/// assert_eq!(record.label, "https://example.com/");
/// assert_eq!(record.clicks, 12);
/// assert_eq!(record.impressions, 0);
/// assert_eq!(record.ctr, 0.04);
/// ```
pub fn normalize(kind: StatisticKind, raw: &RawRecord) -> NormalizedRecord {
    let value_of = |field: Field| lookup(raw, aliases_for(kind, field));

    NormalizedRecord {
        label: value_of(Field::Label).map(coerce_label).unwrap_or_default(),
        clicks: value_of(Field::Clicks).map(coerce_integer).unwrap_or(0),
        impressions: value_of(Field::Impressions).map(coerce_integer).unwrap_or(0),
        average_position: value_of(Field::AveragePosition)
            .map(coerce_float)
            .unwrap_or(0.0)
            .max(0.0),
        ctr: value_of(Field::Ctr).map(coerce_float).unwrap_or(0.0),
    }
}

/// First alias present in `raw` with a non-null value.
fn lookup<'a>(raw: &'a RawRecord, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| raw.get(*alias))
        .find(|value| !value.is_null())
}

/// Coerces a JSON value to a non-negative count.
///
/// Fractions are truncated; negative, non-numeric and unparsable values are 0.
pub fn coerce_integer(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(truncate_count))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(truncate_count))
                .unwrap_or(0)
        }
        Value::Bool(b) => u64::from(*b),
        _ => 0,
    }
}

/// Coerces a JSON value to a finite float; anything else is 0.0.
pub fn coerce_float(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// Coerces a JSON value to a label string.
pub fn coerce_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_count(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 {
        // Saturating float-to-int cast; truncation toward zero is intended
        f.trunc() as u64
    } else {
        0
    }
}
