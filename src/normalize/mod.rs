//! Response normalization.
//!
//! The API answers in several shapes: a legacy OData envelope (`{"d": ...}`),
//! a modern envelope (`{"value": ...}`) or a bare array, and each row may spell
//! its field names differently. This module turns any of those into a list of
//! `NormalizedRecord`s:
//!
//! - `envelope`: finds the record list inside the top-level JSON value
//! - `aliases`: ordered field-name alias tables per statistic kind
//! - `record`: maps one raw row to a canonical record

mod aliases;
mod envelope;
mod record;

pub use aliases::{aliases_for, Field};
pub use envelope::{resolve_payload, resolve_records};
pub use record::{coerce_float, coerce_integer, coerce_label, normalize};
