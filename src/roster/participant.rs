//! Participant records and selection history types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::policy::BASE_WEIGHT;

/// A named participant with selection statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name (unique among participants).
    pub name: String,
    /// Times this participant has won.
    pub times_selected: u32,
    /// Relative odds for the next spin.
    pub probability_weight: f64,
    /// When the participant was first added.
    pub created_at: DateTime<Utc>,
    /// When the participant last won.
    pub last_selected_at: Option<DateTime<Utc>>,
    /// Inactive participants are kept for history but not listed.
    pub active: bool,
}

impl Participant {
    /// New active participant with base weight.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            times_selected: 0,
            probability_weight: BASE_WEIGHT,
            created_at: Utc::now(),
            last_selected_at: None,
            active: true,
        }
    }

    /// Clear statistics back to a fresh participant.
    pub fn reset_stats(&mut self) {
        self.times_selected = 0;
        self.probability_weight = BASE_WEIGHT;
        self.last_selected_at = None;
    }
}

/// One recorded win.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Winner's identifier.
    pub participant_id: Uuid,
    /// Winner's name at the time.
    pub name: String,
    /// Entries on the wheel for this spin.
    pub total_participants: usize,
    /// Winner's normalized odds before the win was applied.
    pub probability_at_selection: f64,
    /// When the win was recorded.
    pub selected_at: DateTime<Utc>,
}

/// Odds of one participant at selection time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticipantOdds {
    /// Participant name.
    pub name: String,
    /// Normalized probability before the win was applied.
    pub probability: f64,
    /// Wins including this one.
    pub times_selected: u32,
}

/// What the recorder returns for a win.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinnerReceipt {
    /// Winner name.
    pub winner: String,
    /// Probability the winner held at selection time.
    pub probability: f64,
    /// Odds of every entry at selection time, in entry order.
    pub participants: Vec<ParticipantOdds>,
    /// When the win was recorded.
    pub selected_at: DateTime<Utc>,
}
