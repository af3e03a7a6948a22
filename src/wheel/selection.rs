//! Selection Engine
//!
//! Draws a winning index from a [`Distribution`]. Runs in `O(log n)` with no
//! allocation so simulations can call it millions of times.

use crate::core::rng::RandomSource;

use super::weights::Distribution;

/// Draw a winning index from `dist`.
#[inline]
pub fn select_index<R: RandomSource + ?Sized>(dist: &Distribution, rng: &mut R) -> usize {
    index_for_draw(dist, rng.next_unit())
}

/// Map a draw `r ∈ [0, 1)` to the first index whose cumulative value is `≥ r`.
///
/// Zero-probability entries sitting on the same boundary are skipped, so an
/// entry with no mass can never win. If `r` lies above every cumulative value
/// the last index is returned.
pub fn index_for_draw(dist: &Distribution, r: f64) -> usize {
    let cumulative = dist.cumulative();
    let last = cumulative.len().saturating_sub(1);

    let mut index = cumulative.partition_point(|&c| c < r).min(last);

    // Step past entries with zero mass that share this boundary
    while index < last && dist.probability(index) == 0.0 {
        index += 1;
    }

    index
}

/// Uniform draw over `count` entries without building a distribution.
#[inline]
pub fn select_uniform<R: RandomSource + ?Sized>(count: usize, rng: &mut R) -> usize {
    if count == 0 {
        return 0;
    }
    ((rng.next_unit() * count as f64) as usize).min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{DeterministicRng, ReplaySource};
    use crate::wheel::entries::WeightMap;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_draw_060_selects_c() {
        let entries = names(&["A", "B", "C", "D"]);
        let dist = Distribution::from_weights(&entries, None).unwrap();

        let mut source = ReplaySource::new(vec![0.60]);
        let index = select_index(&dist, &mut source);

        assert_eq!(index, 2);
        assert_eq!(entries[index], "C");
    }

    #[test]
    fn test_boundary_draw_belongs_to_lower_index() {
        let dist = Distribution::uniform(4).unwrap();
        assert_eq!(index_for_draw(&dist, 0.0), 0);
        assert_eq!(index_for_draw(&dist, 0.25), 0);
        assert_eq!(index_for_draw(&dist, 0.2500001), 1);
        assert_eq!(index_for_draw(&dist, 0.9999999), 3);
    }

    #[test]
    fn test_draw_above_all_returns_last() {
        let dist = Distribution::uniform(3).unwrap();
        assert_eq!(index_for_draw(&dist, 1.5), 2);
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let entries = names(&["A", "B", "C"]);
        let map = WeightMap::from([("A".to_string(), 0.0)]);
        let dist = Distribution::from_weights(&entries, Some(&map)).unwrap();

        // r = 0 lands on A's (empty) boundary
        assert_eq!(index_for_draw(&dist, 0.0), 1);

        let mut rng = DeterministicRng::new(3);
        for _ in 0..10_000 {
            assert_ne!(select_index(&dist, &mut rng), 0);
        }
    }

    #[test]
    fn test_uniform_frequencies() {
        let dist = Distribution::uniform(4).unwrap();
        let mut rng = DeterministicRng::new(2024);
        let mut counts = [0u32; 4];
        let draws = 100_000;

        for _ in 0..draws {
            counts[select_index(&dist, &mut rng)] += 1;
        }

        for count in counts {
            let freq = count as f64 / draws as f64;
            assert!((freq - 0.25).abs() < 0.02, "frequency {freq} too far from 0.25");
        }
    }

    #[test]
    fn test_weighted_frequencies() {
        let entries = names(&["A", "B"]);
        let map = WeightMap::from([("A".to_string(), 3.0), ("B".to_string(), 1.0)]);
        let dist = Distribution::from_weights(&entries, Some(&map)).unwrap();

        let mut rng = DeterministicRng::new(77);
        let draws = 100_000;
        let a_wins = (0..draws).filter(|_| select_index(&dist, &mut rng) == 0).count();

        let freq = a_wins as f64 / draws as f64;
        assert!((freq - 0.75).abs() < 0.02, "frequency {freq} too far from 0.75");
    }

    #[test]
    fn test_select_uniform_bounds() {
        let mut rng = DeterministicRng::new(11);
        for _ in 0..1000 {
            assert!(select_uniform(5, &mut rng) < 5);
        }
        assert_eq!(select_uniform(0, &mut rng), 0);

        let mut top = ReplaySource::new(vec![0.999_999_999]);
        assert_eq!(select_uniform(3, &mut top), 2);
    }
}
