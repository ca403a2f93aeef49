//! Idempotent appends into the document's record lists.
//!
//! Every list the update touches (line history, story units, promise
//! reinforcements, thematic contributions) is keyed by a unit: either its
//! identifier or its number. A candidate is appended only when no element
//! already carries that key, so re-running an update never duplicates records.

use serde_json::Value;

/// The key that tags a record as belonging to one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitKey<'a> {
    Id(&'a str),
    Number(u32),
}

impl UnitKey<'_> {
    /// Whether `value` is this key.
    ///
    /// Numbers compare by value, so `19` and `19.0` are the same unit.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            UnitKey::Id(id) => value.as_str() == Some(*id),
            UnitKey::Number(n) => value.as_f64() == Some(f64::from(*n)),
        }
    }
}

/// Append `candidate` unless some element of `records` satisfies `is_same`.
///
/// Returns whether the candidate was appended.
pub fn append_if_absent<T, F>(records: &mut Vec<T>, candidate: T, is_same: F) -> bool
where
    F: FnMut(&T) -> bool,
{
    if records.iter().any(is_same) {
        return false;
    }
    records.push(candidate);
    true
}

/// Append `candidate` unless a record's `field` already holds `key`.
pub fn append_keyed(
    records: &mut Vec<Value>,
    field: &str,
    key: UnitKey<'_>,
    candidate: Value,
) -> bool {
    append_if_absent(records, candidate, |record| {
        record.get(field).is_some_and(|v| key.matches(v))
    })
}

/// Append the key itself to a plain list of unit markers unless present.
pub fn append_marker(markers: &mut Vec<Value>, key: UnitKey<'_>) -> bool {
    let candidate = match key {
        UnitKey::Id(id) => Value::from(id),
        UnitKey::Number(n) => Value::from(n),
    };
    append_if_absent(markers, candidate, |v| key.matches(v))
}
