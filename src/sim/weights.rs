//! Level-dependent enemy mix and weighted sampling
//!
//! Weights are percentages. Past the shift threshold Basic gives up 5% per
//! level step and each of the other five variants gains 1%, until Basic is
//! exhausted. Sampling expands each entry into `round(weight * 100)` copies
//! and draws uniformly from the result.

use rand::Rng;

use super::enemy::EnemyKind;
use crate::tuning::Tuning;

/// Basic's share lost per step, and each other variant's gain
const BASIC_DRAIN_PCT: u32 = 5;
const VARIANT_GAIN_PCT: u32 = 1;

/// Enemy variant weights for `level`, each in `0.0..=1.0`, summing to 1
pub fn enemy_weights(level: i32, tuning: &Tuning) -> Vec<(EnemyKind, f32)> {
    let steps = if level > tuning.weight_shift_level {
        ((level - 2).max(0) as u32).min(100 / BASIC_DRAIN_PCT)
    } else {
        0
    };
    let basic_pct = 100 - steps * BASIC_DRAIN_PCT;
    let other_pct = steps * VARIANT_GAIN_PCT;

    EnemyKind::ALL
        .iter()
        .map(|&kind| {
            let pct = if kind == EnemyKind::Basic { basic_pct } else { other_pct };
            (kind, pct as f32 / 100.0)
        })
        .collect()
}

/// A frequency-expanded list for O(1) weighted draws
#[derive(Debug, Clone)]
pub struct WeightedPool<T> {
    entries: Vec<T>,
}

impl<T: Clone + PartialEq> WeightedPool<T> {
    /// Expand `weights` into a pool. Negative weights count as zero.
    pub fn from_weights(weights: &[(T, f32)]) -> Self {
        let mut entries = Vec::new();
        for (value, weight) in weights {
            let copies = (weight.max(0.0) * 100.0).round() as usize;
            entries.extend(std::iter::repeat_n(value.clone(), copies));
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies of `value` in the pool
    pub fn count(&self, value: &T) -> usize {
        self.entries.iter().filter(|e| *e == value).count()
    }

    /// Uniform draw from the pool; `None` only if every weight was zero
    pub fn sample(&self, rng: &mut impl Rng) -> Option<&T> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(rng.random_range(0..self.entries.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn weight_of(weights: &[(EnemyKind, f32)], kind: EnemyKind) -> f32 {
        weights.iter().find(|(k, _)| *k == kind).map(|(_, w)| *w).unwrap()
    }

    #[test]
    fn test_early_levels_are_all_basic() {
        let tuning = Tuning::default();
        for level in [-3, 0, 1, 5] {
            let w = enemy_weights(level, &tuning);
            assert_eq!(weight_of(&w, EnemyKind::Basic), 1.0);
            assert_eq!(weight_of(&w, EnemyKind::Charger), 0.0);
        }
    }

    #[test]
    fn test_weights_shift_past_threshold() {
        let tuning = Tuning::default();
        let w = enemy_weights(6, &tuning);
        assert!((weight_of(&w, EnemyKind::Basic) - 0.80).abs() < 1e-6);
        for kind in EnemyKind::ALL.iter().skip(1) {
            assert!((weight_of(&w, *kind) - 0.04).abs() < 1e-6);
        }
    }

    #[test]
    fn test_basic_exhausted_transfer_halts() {
        let tuning = Tuning::default();
        for level in [22, 30, 100] {
            let w = enemy_weights(level, &tuning);
            assert_eq!(weight_of(&w, EnemyKind::Basic), 0.0);
            assert!((weight_of(&w, EnemyKind::Centipede) - 0.20).abs() < 1e-6);
        }
    }

    #[test]
    fn test_pool_sampling_only_yields_weighted_values() {
        let pool = WeightedPool::from_weights(&[("a", 0.0), ("b", 0.3), ("c", 0.7)]);
        assert_eq!(pool.len(), 100);
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..500 {
            assert_ne!(*pool.sample(&mut rng).unwrap(), "a");
        }
    }

    #[test]
    fn test_empty_pool() {
        let pool = WeightedPool::from_weights(&[(1u8, 0.0), (2u8, -0.5)]);
        assert!(pool.is_empty());
        let mut rng = Pcg32::seed_from_u64(5);
        assert!(pool.sample(&mut rng).is_none());
    }

    proptest! {
        #[test]
        fn prop_pool_counts_match_weights(level in -50i32..120) {
            let tuning = Tuning::default();
            let weights = enemy_weights(level, &tuning);
            let pool = WeightedPool::from_weights(&weights);
            let total: f32 = weights.iter().map(|(_, w)| *w).sum();
            prop_assert!((total - 1.0).abs() < 1e-4);
            for (kind, weight) in &weights {
                prop_assert!(*weight >= 0.0);
                prop_assert_eq!(pool.count(kind), (weight * 100.0).round() as usize);
            }
            prop_assert_eq!(pool.len(), 100);
        }
    }
}
