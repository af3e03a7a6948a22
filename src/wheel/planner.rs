//! Rotation Planner
//!
//! Converts a winning index into the absolute angle the wheel should stop at.
//! The target always lies ahead of the current angle by a whole number of
//! extra turns plus the forward correction that centres the winning arc
//! under the pointer.

use serde::{Deserialize, Serialize};

use crate::core::angle::{arc_span, normalize_degrees, FULL_TURN};
use crate::core::rng::RandomSource;

/// A planned spin target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationPlan {
    /// Absolute angle to stop at.
    pub target_angle: f64,
    /// Whole extra turns added for visual effect.
    pub extra_turns: u32,
    /// Centre of the winning arc, measured from the pointer.
    pub pointer_center: f64,
}

/// Plans spin targets with a bounded random number of extra turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationPlanner {
    min_extra_turns: u32,
    max_extra_turns: u32,
}

impl Default for RotationPlanner {
    fn default() -> Self {
        Self::new(3, 5)
    }
}

impl RotationPlanner {
    /// Create a planner drawing extra turns from `[min, max]`.
    ///
    /// `min` is raised to 1 so a spin always moves forward; `max` is raised
    /// to `min` if smaller.
    pub fn new(min_extra_turns: u32, max_extra_turns: u32) -> Self {
        let min_extra_turns = min_extra_turns.max(1);
        Self {
            min_extra_turns,
            max_extra_turns: max_extra_turns.max(min_extra_turns),
        }
    }

    /// Plan a spin landing on `index` of `count` entries, starting from
    /// `current_angle`.
    pub fn plan<R: RandomSource + ?Sized>(
        &self,
        index: usize,
        count: usize,
        current_angle: f64,
        rng: &mut R,
    ) -> RotationPlan {
        let extra_turns = rng.next_in_range(self.min_extra_turns, self.max_extra_turns);
        RotationPlan {
            target_angle: target_angle(index, count, current_angle, extra_turns),
            extra_turns,
            pointer_center: pointer_center_angle(index, count),
        }
    }
}

/// Centre of arc `index`, measured from the pointer's reference direction.
#[inline]
pub fn pointer_center_angle(index: usize, count: usize) -> f64 {
    let span = arc_span(count);
    index as f64 * span + span / 2.0
}

/// Absolute target angle landing arc `index` under the pointer.
///
/// With the wheel rotated by `θ` the pointer sees `360 − θ (mod 360)`, so the
/// wheel must stop where `θ ≡ −centre (mod 360)`. The result is
/// `current + extra_turns·360 + alignment` with `alignment ∈ [0, 360)`.
pub fn target_angle(index: usize, count: usize, current_angle: f64, extra_turns: u32) -> f64 {
    let current = if current_angle.is_finite() {
        current_angle
    } else {
        0.0
    };

    let desired = normalize_degrees(-pointer_center_angle(index, count));
    let alignment = normalize_degrees(desired - normalize_degrees(current));

    current + extra_turns as f64 * FULL_TURN + alignment
}
