//! Segment Locator
//!
//! The pointer is fixed and the wheel turns underneath it. Arc `i` covers
//! `[i·span, (i+1)·span)` measured from the pointer's reference direction, so
//! rotating the wheel forward by `θ` brings the arc at `360 − θ` under the
//! pointer.

use crate::core::angle::{arc_span, normalize_degrees, FULL_TURN};

/// Index of the segment under the pointer for a wheel rotated by `angle`.
///
/// Total for every `f64` and every `count`: the result is always in
/// `[0, count)` (and `0` when `count` is 0). Non-finite angles behave like 0°.
#[inline]
pub fn segment_at(angle: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }

    let effective = normalize_degrees(FULL_TURN - normalize_degrees(angle));
    let index = (effective / arc_span(count)).floor() as usize;
    index % count
}
