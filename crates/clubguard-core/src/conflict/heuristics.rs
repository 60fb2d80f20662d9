//! Per-field merge heuristics for values edited on both sides.

use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use tracing::warn;

use crate::conflict::equality::{compare_numbers, values_equal};
use crate::util::parse_instant_millis;

/// The merge rule that applies to a pair of conflicting values.
///
/// Selected by value kind first; the timestamp rule only applies when the
/// kinds did not pick anything and the field name follows the `...At` /
/// `...Time` convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldMerge<'a> {
    /// Larger number wins
    Numeric(&'a Number, &'a Number),
    /// Longer string wins, local on ties
    Text(&'a str, &'a str),
    /// Ordered set union, local elements first
    List(&'a [Value], &'a [Value]),
    /// Shallow merge, local keys override remote keys
    Object(&'a Map<String, Value>, &'a Map<String, Value>),
    /// Later instant wins
    Timestamp(&'a Value, Option<&'a Value>),
    Unmergeable,
}

impl<'a> FieldMerge<'a> {
    pub fn select(field: &str, local: &'a Value, remote: Option<&'a Value>) -> Self {
        match (local, remote) {
            (Value::Number(l), Some(Value::Number(r))) => Self::Numeric(l, r),
            (Value::String(l), Some(Value::String(r))) => Self::Text(l, r),
            (Value::Array(l), Some(Value::Array(r))) => Self::List(l, r),
            (Value::Object(l), Some(Value::Object(r))) => Self::Object(l, r),
            _ if is_timestamp_field(field) => Self::Timestamp(local, remote),
            _ => Self::Unmergeable,
        }
    }

    /// Apply the rule; `None` means the conflict could not be settled.
    pub fn apply(self, field: &str) -> Option<Value> {
        match self {
            Self::Numeric(l, r) => {
                let keep_local = compare_numbers(l, r).is_some_and(Ordering::is_ge);
                let larger = if keep_local { l } else { r };
                Some(Value::Number(larger.clone()))
            }
            Self::Text(l, r) => {
                let longer = if utf16_len(l) >= utf16_len(r) { l } else { r };
                Some(Value::String(longer.to_string()))
            }
            Self::List(l, r) => {
                let mut merged = l.to_vec();
                for item in r {
                    if !merged.iter().any(|existing| values_equal(existing, item)) {
                        merged.push(item.clone());
                    }
                }
                Some(Value::Array(merged))
            }
            Self::Object(l, r) => {
                let mut merged = r.clone();
                for (key, value) in l {
                    merged.insert(key.clone(), value.clone());
                }
                Some(Value::Object(merged))
            }
            Self::Timestamp(l, r) => {
                let (Some(local_at), Some(remote_at)) =
                    (instant_of(l), r.and_then(instant_of))
                else {
                    warn!(field, "unparseable timestamp, leaving conflict unresolved");
                    return None;
                };
                let later = if local_at > remote_at { Some(l) } else { r };
                later.cloned()
            }
            Self::Unmergeable => None,
        }
    }
}

/// Try the heuristics on a field edited on both sides.
pub fn resolve_field_conflict(field: &str, local: &Value, remote: Option<&Value>) -> Option<Value> {
    FieldMerge::select(field, local, remote).apply(field)
}

fn is_timestamp_field(field: &str) -> bool {
    field.contains("At") || field.contains("Time")
}

// Length in UTF-16 code units, the unit browser clients measure strings in.
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

// Strings are parsed as dates, numbers read as Unix milliseconds.
fn instant_of(value: &Value) -> Option<i64> {
    match value {
        Value::String(raw) => parse_instant_millis(raw),
        Value::Number(number) => number.as_i64().or_else(|| millis_from_float(number.as_f64()?)),
        _ => None,
    }
}

// Fractional milliseconds truncate toward zero; out-of-range values fail.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn millis_from_float(millis: f64) -> Option<i64> {
    let truncated = millis.trunc();
    (truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
        .then(|| truncated as i64)
}
