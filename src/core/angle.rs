//! Degree Arithmetic
//!
//! Rotations are plain `f64` degrees. They grow without bound while a spin
//! accumulates full turns and are only reduced when segment membership is
//! needed.

/// Degrees in one full turn.
pub const FULL_TURN: f64 = 360.0;

/// Reduce an angle to `[0, 360)`.
///
/// Non-finite input reduces to `0.0` so callers never see NaN leak into
/// segment arithmetic.
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let reduced = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if reduced >= FULL_TURN {
        0.0
    } else {
        reduced
    }
}

/// Width of one arc in degrees for a wheel of `count` entries.
#[inline]
pub fn arc_span(count: usize) -> f64 {
    FULL_TURN / count.max(1) as f64
}
