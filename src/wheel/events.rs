//! Wheel Events
//!
//! Emitted by the engine as the wheel moves. Cue events (`Tick`,
//! `WinnerCue`) are where a host plugs in sound.

use serde::{Deserialize, Serialize};

use super::scheduler::Millis;

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WheelEventData {
    /// A spin began.
    SpinStarted {
        entry_count: usize,
        expected_index: usize,
        target_angle: f64,
        extra_turns: u32,
    },

    /// The supplied weights were unusable; the spin fell back to uniform.
    WeightsRejected { reason: String },

    /// A new segment passed under the pointer.
    Tick { segment: usize },

    /// The wheel came to rest. `winner` is the segment under the pointer.
    Settled {
        winner: String,
        winner_index: usize,
        expected_index: usize,
        final_angle: f64,
    },

    /// Delayed winner cue after settling.
    WinnerCue { winner: String },

    /// A spin was cancelled before settling.
    SpinCancelled { angle: f64 },

    /// A settled winner was cleared.
    WinnerCleared,
}

/// An event with its timestamp and spin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Scheduler time the event occurred.
    pub at: Millis,
    /// Spin the event belongs to.
    pub spin_id: u32,
    /// Event data.
    pub data: WheelEventData,
}

impl WheelEvent {
    /// Create a new event.
    pub fn new(at: Millis, spin_id: u32, data: WheelEventData) -> Self {
        Self { at, spin_id, data }
    }

    /// Create spin started event.
    pub fn spin_started(
        at: Millis,
        spin_id: u32,
        entry_count: usize,
        expected_index: usize,
        target_angle: f64,
        extra_turns: u32,
    ) -> Self {
        Self::new(
            at,
            spin_id,
            WheelEventData::SpinStarted {
                entry_count,
                expected_index,
                target_angle,
                extra_turns,
            },
        )
    }

    /// Create tick event.
    pub fn tick(at: Millis, spin_id: u32, segment: usize) -> Self {
        Self::new(at, spin_id, WheelEventData::Tick { segment })
    }

    /// Create settled event.
    pub fn settled(
        at: Millis,
        spin_id: u32,
        winner: impl Into<String>,
        winner_index: usize,
        expected_index: usize,
        final_angle: f64,
    ) -> Self {
        Self::new(
            at,
            spin_id,
            WheelEventData::Settled {
                winner: winner.into(),
                winner_index,
                expected_index,
                final_angle,
            },
        )
    }

    /// Create winner cue event.
    pub fn winner_cue(at: Millis, spin_id: u32, winner: impl Into<String>) -> Self {
        Self::new(at, spin_id, WheelEventData::WinnerCue { winner: winner.into() })
    }

    /// Winner name if this is a settled event.
    pub fn settled_winner(&self) -> Option<&str> {
        match &self.data {
            WheelEventData::Settled { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// Whether this settle disagreed with the sampled index.
    pub fn is_discrepancy(&self) -> bool {
        matches!(
            self.data,
            WheelEventData::Settled { winner_index, expected_index, .. } if winner_index != expected_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_helpers() {
        let agree = WheelEvent::settled(10.0, 1, "C", 2, 2, 1395.0);
        assert_eq!(agree.settled_winner(), Some("C"));
        assert!(!agree.is_discrepancy());

        let disagree = WheelEvent::settled(10.0, 1, "B", 1, 2, 1395.0);
        assert!(disagree.is_discrepancy());

        assert_eq!(WheelEvent::tick(1.0, 1, 3).settled_winner(), None);
    }

    #[test]
    fn test_event_json_shape() {
        let event = WheelEvent::tick(16.0, 4, 2);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["spin_id"], 4);
        assert_eq!(json["data"]["type"], "tick");
        assert_eq!(json["data"]["segment"], 2);
    }
}
