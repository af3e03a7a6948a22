//! Weight Normalizer
//!
//! Turns an optional per-name weight map into a cumulative probability
//! distribution over entry indices.

use super::entries::WeightMap;
use super::error::{WeightFault, WheelError};

/// Weight used for entries missing from the map.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Cumulative probability distribution over entry indices.
///
/// `cumulative[i]` is the probability mass of indices `0..=i`. The last value
/// is exactly `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
    cumulative: Vec<f64>,
}

impl Distribution {
    /// Uniform distribution over `count` entries.
    pub fn uniform(count: usize) -> Result<Self, WheelError> {
        if count == 0 {
            return Err(WheelError::InsufficientEntries { count, required: 1 });
        }

        let mut cumulative: Vec<f64> = (1..=count).map(|i| i as f64 / count as f64).collect();
        pin_last(&mut cumulative);
        Ok(Self { cumulative })
    }

    /// Build a distribution for `entries` from an optional weight map.
    ///
    /// An absent or empty map yields the uniform distribution. Otherwise each
    /// entry's weight is looked up by name (missing names weigh
    /// [`DEFAULT_WEIGHT`]) and validated.
    pub fn from_weights(entries: &[String], weights: Option<&WeightMap>) -> Result<Self, WheelError> {
        let weights = match weights {
            Some(w) if !w.is_empty() => w,
            _ => return Self::uniform(entries.len()),
        };

        if entries.is_empty() {
            return Err(WheelError::InsufficientEntries { count: 0, required: 1 });
        }

        let mut resolved = Vec::with_capacity(entries.len());
        for entry in entries {
            let weight = weights.get(entry).copied().unwrap_or(DEFAULT_WEIGHT);
            if !weight.is_finite() {
                return Err(WeightFault::NonFinite { entry: entry.clone(), weight }.into());
            }
            if weight < 0.0 {
                return Err(WeightFault::Negative { entry: entry.clone(), weight }.into());
            }
            resolved.push(weight);
        }

        // Relative to the largest weight the sum stays within (0, N]
        let largest = resolved.iter().copied().fold(0.0_f64, f64::max);
        if largest <= 0.0 {
            return Err(WeightFault::BadTotal { total: 0.0 }.into());
        }
        for weight in &mut resolved {
            *weight /= largest;
        }
        let total: f64 = resolved.iter().sum();

        let mut running = 0.0;
        let mut cumulative: Vec<f64> = resolved
            .iter()
            .map(|w| {
                running += w / total;
                running
            })
            .collect();
        pin_last(&mut cumulative);

        Ok(Self { cumulative })
    }

    /// Number of entries covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Always false; a distribution covers at least one entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Cumulative values in entry order.
    #[inline]
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Probability of a single index (0 for out-of-range).
    pub fn probability(&self, index: usize) -> f64 {
        match index {
            i if i >= self.cumulative.len() => 0.0,
            0 => self.cumulative[0],
            i => self.cumulative[i] - self.cumulative[i - 1],
        }
    }
}

/// Force the tail to exactly 1.0. Trailing zero-mass entries keep the same
/// boundary as their predecessor.
fn pin_last(cumulative: &mut [f64]) {
    let Some(&last) = cumulative.last() else {
        return;
    };
    for value in cumulative.iter_mut().rev() {
        if *value == last {
            *value = 1.0;
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_uniform_four() {
        let dist = Distribution::from_weights(&names(&["A", "B", "C", "D"]), None).unwrap();
        assert_eq!(dist.cumulative(), &[0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_empty_map_is_uniform() {
        let map = WeightMap::new();
        let dist = Distribution::from_weights(&names(&["A", "B"]), Some(&map)).unwrap();
        assert_eq!(dist.cumulative(), &[0.5, 1.0]);
    }

    #[test]
    fn test_weighted_normalization() {
        let map = WeightMap::from([("A".to_string(), 3.0), ("B".to_string(), 1.0)]);
        let dist = Distribution::from_weights(&names(&["A", "B"]), Some(&map)).unwrap();
        assert_eq!(dist.cumulative(), &[0.75, 1.0]);
        assert_eq!(dist.probability(0), 0.75);
        assert_eq!(dist.probability(1), 0.25);
    }

    #[test]
    fn test_missing_names_default_to_one() {
        let map = WeightMap::from([("A".to_string(), 2.0)]);
        let dist = Distribution::from_weights(&names(&["A", "B", "C"]), Some(&map)).unwrap();
        assert_eq!(dist.probability(0), 0.5);
        assert!((dist.probability(1) - 0.25).abs() < 1e-12);
        assert!((dist.probability(2) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let map = WeightMap::from([("B".to_string(), -1.0)]);
        let err = Distribution::from_weights(&names(&["A", "B"]), Some(&map)).unwrap_err();
        assert!(matches!(
            err,
            WheelError::InvalidWeight(WeightFault::Negative { ref entry, .. }) if entry == "B"
        ));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let map = WeightMap::from([("A".to_string(), bad)]);
            let err = Distribution::from_weights(&names(&["A", "B"]), Some(&map)).unwrap_err();
            assert!(matches!(err, WheelError::InvalidWeight(WeightFault::NonFinite { .. })));
        }
    }

    #[test]
    fn test_all_zero_rejected() {
        let map = WeightMap::from([("A".to_string(), 0.0), ("B".to_string(), 0.0)]);
        let err = Distribution::from_weights(&names(&["A", "B"]), Some(&map)).unwrap_err();
        assert!(matches!(err, WheelError::InvalidWeight(WeightFault::BadTotal { .. })));
    }

    #[test]
    fn test_huge_weights_keep_their_ratio() {
        let map = WeightMap::from([("A".to_string(), 1.5e308), ("B".to_string(), 0.5e308)]);
        let dist = Distribution::from_weights(&names(&["A", "B"]), Some(&map)).unwrap();
        assert!((dist.probability(0) - 0.75).abs() < 1e-12);
        assert!((dist.probability(1) - 0.25).abs() < 1e-12);

        let map = WeightMap::from([("A".to_string(), f64::MAX), ("B".to_string(), f64::MAX)]);
        let dist = Distribution::from_weights(&names(&["A", "B"]), Some(&map)).unwrap();
        assert_eq!(dist.cumulative(), &[0.5, 1.0]);
    }

    #[test]
    fn test_no_entries() {
        assert!(matches!(
            Distribution::uniform(0),
            Err(WheelError::InsufficientEntries { count: 0, .. })
        ));
    }

    #[test]
    fn test_trailing_zero_weight_pinned() {
        let map = WeightMap::from([("C".to_string(), 0.0)]);
        let dist = Distribution::from_weights(&names(&["A", "B", "C"]), Some(&map)).unwrap();
        assert_eq!(dist.cumulative()[1], 1.0);
        assert_eq!(dist.cumulative()[2], 1.0);
        assert_eq!(dist.probability(2), 0.0);
    }

    #[test]
    fn test_odds_sum_to_one() {
        let map = WeightMap::from([
            ("A".to_string(), 0.1),
            ("B".to_string(), 2.7),
            ("C".to_string(), 1.3),
        ]);
        let dist = Distribution::from_weights(&names(&["A", "B", "C"]), Some(&map)).unwrap();
        let sum: f64 = (0..dist.len()).map(|i| dist.probability(i)).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
