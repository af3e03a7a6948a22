//! Participant Roster
//!
//! Named participants, their win statistics, and the adaptive weights fed
//! back into the wheel.
//!
//! ## Module Structure
//!
//! - `participant`: Participant and selection history records
//! - `policy`: Adaptive weight policy
//! - `memory`: In-memory store

pub mod memory;
pub mod participant;
pub mod policy;

pub use memory::InMemoryRoster;
pub use participant::{Participant, ParticipantOdds, SelectionRecord, WinnerReceipt};
pub use policy::{WeightPolicy, BASE_WEIGHT};

use crate::wheel::entries::WeightMap;

/// Roster errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RosterError {
    /// Name is empty after trimming.
    #[error("Participant name cannot be empty")]
    InvalidName,

    /// An active participant already has this name.
    #[error("Participant already exists: {0}")]
    AlreadyExists(String),

    /// No active participant has this name.
    #[error("Participant not found: {0}")]
    NotFound(String),

    /// Recorded winner is not one of the spin's entries.
    #[error("Winner {0} is not among the entries")]
    WinnerNotInEntries(String),
}

/// Storage for participants.
pub trait ParticipantStore {
    /// Active participants in insertion order.
    fn list(&self) -> Vec<Participant>;

    /// Look up an active participant by name.
    fn find(&self, name: &str) -> Option<Participant>;

    /// Add a participant, reactivating a removed one with the same name.
    fn add(&mut self, name: &str) -> Result<Participant, RosterError>;

    /// Deactivate a participant. History is kept.
    fn remove(&mut self, name: &str) -> Result<(), RosterError>;

    /// Reset every participant's statistics and weight.
    fn reset_stats(&mut self);

    /// Current weights for `entries`. Unknown names are left out and spin
    /// at the default weight.
    fn weight_map(&self, entries: &[String]) -> WeightMap;
}

/// Sink for settled winners.
pub trait WinnerRecorder {
    /// Record a win for `winner` among `entries` and adapt weights.
    fn record_winner(&mut self, winner: &str, entries: &[String]) -> Result<WinnerReceipt, RosterError>;

    /// Selections made within the last `days` days, oldest first.
    fn recent_history(&self, days: u32) -> Vec<SelectionRecord>;
}

/// Reachability of a roster backend.
///
/// While unavailable, spins fall back to uniform odds and winners are not
/// recorded.
pub trait HealthProbe {
    /// Whether the backend can serve requests right now.
    fn is_available(&self) -> bool;
}

/// Trim a participant name and reject empty ones.
pub fn normalize_name(name: &str) -> Result<&str, RosterError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RosterError::InvalidName);
    }
    Ok(trimmed)
}
