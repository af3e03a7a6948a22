//! Spin Animation
//!
//! State machine data and the ease-out tween that moves the wheel from its
//! start angle to the planned target.

use serde::{Deserialize, Serialize};

use super::entries::EntrySet;
use super::scheduler::Millis;

/// Cubic ease-out: fast start, gentle stop. Monotone on `[0, 1]`.
#[inline]
pub fn ease_out_cubic(progress: f64) -> f64 {
    let inverse = 1.0 - progress;
    1.0 - inverse * inverse * inverse
}

/// A tween from `start_angle` to `target_angle` over `duration` ms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinTween {
    /// Angle when the spin started (already reduced to `[0, 360)`).
    pub start_angle: f64,
    /// Angle the spin stops at.
    pub target_angle: f64,
    /// Scheduler time the spin started.
    pub start_time: Millis,
    /// Tween length in ms.
    pub duration: Millis,
}

impl SpinTween {
    /// Linear progress in `[0, 1]` at time `now`.
    pub fn progress(&self, now: Millis) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let progress = (now - self.start_time) / self.duration;
        if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        }
    }

    /// Eased angle at time `now`.
    ///
    /// Never passes the target, and returns it exactly once progress reaches 1.
    pub fn sample(&self, now: Millis) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.target_angle;
        }
        let angle = self.start_angle + (self.target_angle - self.start_angle) * ease_out_cubic(progress);
        if self.target_angle >= self.start_angle {
            angle.min(self.target_angle)
        } else {
            angle.max(self.target_angle)
        }
    }

    /// Whether the tween has finished at time `now`.
    #[inline]
    pub fn is_complete(&self, now: Millis) -> bool {
        self.progress(now) >= 1.0
    }
}

/// A spin in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSpin {
    /// Sequence number of this spin.
    pub spin_id: u32,
    /// Entries captured when the spin started.
    pub entries: EntrySet,
    /// Tween being played.
    pub tween: SpinTween,
    /// Index drawn by the selection engine.
    pub expected_index: usize,
    /// Segment seen on the previous frame, for tick detection.
    pub last_segment: Option<usize>,
}

/// A spin that has come to rest.
#[derive(Clone, Debug, PartialEq)]
pub struct SettledSpin {
    /// Sequence number of the spin.
    pub spin_id: u32,
    /// Entries the spin ran over.
    pub entries: EntrySet,
    /// Angle the wheel stopped at.
    pub final_angle: f64,
    /// Segment under the pointer at rest.
    pub winner_index: usize,
    /// Index the selection engine drew.
    pub expected_index: usize,
    /// When the winner cue is due; `None` once it has fired.
    pub winner_cue_at: Option<Millis>,
}

impl SettledSpin {
    /// Name of the winning entry.
    pub fn winner(&self) -> &str {
        self.entries.name(self.winner_index).unwrap_or_default()
    }
}

/// Engine animation state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AnimationState {
    /// Slowly rotating, no winner held.
    #[default]
    Idle,
    /// Tweening toward a target.
    Spinning(ActiveSpin),
    /// At rest on a winner.
    Settled(SettledSpin),
}

impl AnimationState {
    /// Discriminant without payload.
    pub fn phase(&self) -> WheelPhase {
        match self {
            AnimationState::Idle => WheelPhase::Idle,
            AnimationState::Spinning(_) => WheelPhase::Spinning,
            AnimationState::Settled(_) => WheelPhase::Settled,
        }
    }
}

/// Observable phase of the wheel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelPhase {
    /// Idle rotation.
    #[default]
    Idle,
    /// Spin in flight.
    Spinning,
    /// Resting on a winner.
    Settled,
}
