use serde_json::Number;

use crate::schema::ScalarKind;

/// JSON numbers carry no int/float distinction: whole values that fit in an
/// `i64` are integers, everything else is a float.
pub fn classify(n: &Number) -> ScalarKind {
    if n.is_i64() {
        return ScalarKind::Int64;
    }
    match n.as_f64() {
        Some(f) if is_whole_i64(f) => ScalarKind::Int64,
        _ => ScalarKind::Float64,
    }
}

pub fn is_whole_i64(f: f64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}
