//! Structural equality over JSON values.

use serde_json::{Number, Value};

/// Compares two JSON values structurally.
///
/// Arrays compare element by element in order; objects compare by key set
/// and per-key value regardless of key order. Numbers compare by numeric
/// value, so `1` equals `1.0` even though their representations differ.
#[must_use]
pub fn json_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(lhs), Value::Number(rhs)) => numbers_eq(lhs, rhs),
        (Value::Array(lhs), Value::Array(rhs)) => {
            lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(a, b)| json_eq(a, b))
        }
        (Value::Object(lhs), Value::Object(rhs)) => {
            lhs.len() == rhs.len()
                && lhs
                    .iter()
                    .all(|(key, value)| rhs.get(key).is_some_and(|other| json_eq(value, other)))
        }
        _ => left == right,
    }
}

#[expect(clippy::float_cmp, reason = "JSON numbers match on exact value")]
fn numbers_eq(lhs: &Number, rhs: &Number) -> bool {
    if let (Some(a), Some(b)) = (lhs.as_i64(), rhs.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (lhs.as_u64(), rhs.as_u64()) {
        return a == b;
    }
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
