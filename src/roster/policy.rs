//! Adaptive weight policy.
//!
//! After each recorded win the winner's weight shrinks and everyone else's
//! grows, so repeat winners become less likely without anyone ever dropping
//! to zero odds.

use serde::{Deserialize, Serialize};

/// Weight a new or reset participant starts with.
pub const BASE_WEIGHT: f64 = 1.0;

/// How weights move after a win.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightPolicy {
    /// Multiplier applied to the winner.
    pub winner_factor: f64,
    /// Multiplier applied to every other entry.
    pub others_factor: f64,
    /// Floor for any weight.
    pub min_weight: f64,
    /// Ceiling for any weight.
    pub max_weight: f64,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            winner_factor: 0.5,
            others_factor: 1.1,
            min_weight: 0.1,
            max_weight: 3.0,
        }
    }
}

impl WeightPolicy {
    /// Check the policy keeps weights finite and positive.
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            ("winner_factor", self.winner_factor),
            ("others_factor", self.others_factor),
            ("min_weight", self.min_weight),
            ("max_weight", self.max_weight),
        ];
        for (name, value) in values {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be finite and positive, got {value}"));
            }
        }
        if self.min_weight > self.max_weight {
            return Err(format!(
                "min_weight {} exceeds max_weight {}",
                self.min_weight, self.max_weight
            ));
        }
        Ok(())
    }

    /// New weight for the winner.
    #[inline]
    pub fn winner_weight(&self, current: f64) -> f64 {
        (current * self.winner_factor).max(self.min_weight)
    }

    /// New weight for a non-winner.
    #[inline]
    pub fn other_weight(&self, current: f64) -> f64 {
        (current * self.others_factor).min(self.max_weight)
    }
}
