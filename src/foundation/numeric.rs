//! Coercion of raw control-surface input into values that are safe to feed into geometry,
//! interpolation and pacing. Nothing here returns `NaN` or infinity.

/// Parse a finite number, ignoring surrounding whitespace.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Frames-per-second floor: missing, non-finite, or sub-1 rates become `1`.
pub fn coerce_rate(raw: Option<f64>) -> f64 {
    match raw {
        Some(v) if v.is_finite() => v.max(1.0),
        _ => 1.0,
    }
}

/// Counts (layers, roots) clamp into `0..=u32::MAX`.
pub fn coerce_count(raw: i64) -> u32 {
    raw.clamp(0, i64::from(u32::MAX)) as u32
}

/// Parse a count from text; anything non-numeric floors to `0`. Fractions truncate toward zero.
pub fn parse_count(raw: &str) -> u32 {
    match parse_number(raw) {
        Some(v) => coerce_count(v.trunc() as i64),
        None => 0,
    }
}

/// Angles in degrees; non-finite input becomes `0`.
pub fn coerce_degrees(raw: f64) -> f64 {
    if raw.is_finite() { raw } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/numeric.rs"]
mod tests;
