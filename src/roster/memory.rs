//! In-memory participant roster.

use chrono::{Duration, Utc};
use tracing::{debug, info};

use super::participant::{Participant, ParticipantOdds, SelectionRecord, WinnerReceipt};
use super::policy::WeightPolicy;
use super::{normalize_name, HealthProbe, ParticipantStore, RosterError, WinnerRecorder};
use crate::wheel::entries::WeightMap;

/// Participants and selection history held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryRoster {
    /// All participants ever added, in insertion order.
    participants: Vec<Participant>,
    /// Every recorded selection, oldest first.
    history: Vec<SelectionRecord>,
    /// Weight adaptation after each win.
    policy: WeightPolicy,
    available: bool,
}

impl Default for InMemoryRoster {
    fn default() -> Self {
        Self::new(WeightPolicy::default())
    }
}

impl InMemoryRoster {
    /// Empty roster using `policy`.
    pub fn new(policy: WeightPolicy) -> Self {
        Self {
            participants: Vec::new(),
            history: Vec::new(),
            policy,
            available: true,
        }
    }

    /// Roster pre-filled with `names`. Blank and duplicate names are skipped.
    pub fn with_names<I, S>(policy: WeightPolicy, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::new(policy);
        for name in names {
            if let Err(err) = roster.add(name.as_ref()) {
                debug!("Skipping roster name {:?}: {}", name.as_ref(), err);
            }
        }
        roster
    }

    /// Active participant names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.active().map(|p| p.name.clone()).collect()
    }

    /// Weight policy in use.
    pub fn policy(&self) -> &WeightPolicy {
        &self.policy
    }

    /// Full selection history, oldest first.
    pub fn history(&self) -> &[SelectionRecord] {
        &self.history
    }

    /// Mark the roster reachable or not, for exercising local mode.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    fn active(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.active)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.name == name)
    }

    /// Index of the participant named `name`, creating or reactivating it.
    fn get_or_create(&mut self, name: &str) -> usize {
        match self.position(name) {
            Some(idx) => {
                let participant = &mut self.participants[idx];
                if !participant.active {
                    participant.active = true;
                    debug!("Reactivated participant {} for spin", name);
                }
                idx
            }
            None => {
                self.participants.push(Participant::new(name));
                info!("Created participant {} from spin entries", name);
                self.participants.len() - 1
            }
        }
    }
}

impl ParticipantStore for InMemoryRoster {
    fn list(&self) -> Vec<Participant> {
        self.active().cloned().collect()
    }

    fn find(&self, name: &str) -> Option<Participant> {
        let name = name.trim();
        self.active().find(|p| p.name == name).cloned()
    }

    fn add(&mut self, name: &str) -> Result<Participant, RosterError> {
        let name = normalize_name(name)?;

        match self.position(name) {
            Some(idx) if self.participants[idx].active => Err(RosterError::AlreadyExists(name.to_string())),
            Some(idx) => {
                let participant = &mut self.participants[idx];
                participant.active = true;
                info!("Reactivated participant {}", name);
                Ok(participant.clone())
            }
            None => {
                let participant = Participant::new(name);
                self.participants.push(participant.clone());
                info!("Added participant {}", name);
                Ok(participant)
            }
        }
    }

    fn remove(&mut self, name: &str) -> Result<(), RosterError> {
        let name = normalize_name(name)?;

        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.active && p.name == name)
            .ok_or_else(|| RosterError::NotFound(name.to_string()))?;
        participant.active = false;
        info!("Removed participant {}", name);
        Ok(())
    }

    fn reset_stats(&mut self) {
        for participant in &mut self.participants {
            participant.reset_stats();
        }
        info!("Reset statistics for {} participants", self.participants.len());
    }

    fn weight_map(&self, entries: &[String]) -> WeightMap {
        entries
            .iter()
            .filter_map(|name| {
                self.active()
                    .find(|p| &p.name == name)
                    .map(|p| (p.name.clone(), p.probability_weight))
            })
            .collect()
    }
}

impl HealthProbe for InMemoryRoster {
    fn is_available(&self) -> bool {
        self.available
    }
}

impl WinnerRecorder for InMemoryRoster {
    fn record_winner(&mut self, winner: &str, entries: &[String]) -> Result<WinnerReceipt, RosterError> {
        let winner = normalize_name(winner)?;

        let mut names: Vec<&str> = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry = entry.trim();
            if !entry.is_empty() && !names.contains(&entry) {
                names.push(entry);
            }
        }
        if !names.contains(&winner) {
            return Err(RosterError::WinnerNotInEntries(winner.to_string()));
        }

        let indices: Vec<usize> = names.iter().map(|name| self.get_or_create(name)).collect();

        // Odds are taken before this win moves any weights.
        let total: f64 = indices.iter().map(|&i| self.participants[i].probability_weight).sum();
        let odds: Vec<f64> = indices
            .iter()
            .map(|&i| {
                if total > 0.0 {
                    self.participants[i].probability_weight / total
                } else {
                    1.0 / indices.len() as f64
                }
            })
            .collect();

        let now = Utc::now();
        let mut winner_probability = 0.0;
        for (&idx, &probability) in indices.iter().zip(&odds) {
            let participant = &mut self.participants[idx];
            if participant.name == winner {
                participant.times_selected += 1;
                participant.last_selected_at = Some(now);
                winner_probability = probability;
                self.history.push(SelectionRecord {
                    participant_id: participant.id,
                    name: participant.name.clone(),
                    total_participants: indices.len(),
                    probability_at_selection: probability,
                    selected_at: now,
                });
            }
        }

        let participants = indices
            .iter()
            .zip(&odds)
            .map(|(&idx, &probability)| {
                let participant = &self.participants[idx];
                ParticipantOdds {
                    name: participant.name.clone(),
                    probability,
                    times_selected: participant.times_selected,
                }
            })
            .collect();

        for &idx in &indices {
            let participant = &mut self.participants[idx];
            participant.probability_weight = if participant.name == winner {
                self.policy.winner_weight(participant.probability_weight)
            } else {
                self.policy.other_weight(participant.probability_weight)
            };
        }

        info!(
            "Recorded winner {} ({:.2}% of {} entries)",
            winner,
            winner_probability * 100.0,
            indices.len()
        );

        Ok(WinnerReceipt {
            winner: winner.to_string(),
            probability: winner_probability,
            participants,
            selected_at: now,
        })
    }

    fn recent_history(&self, days: u32) -> Vec<SelectionRecord> {
        // A window reaching past the earliest representable time covers everything
        let Some(since) = Utc::now().checked_sub_signed(Duration::days(i64::from(days))) else {
            return self.history.clone();
        };
        self.history
            .iter()
            .filter(|record| record.selected_at >= since)
            .cloned()
            .collect()
    }
}
