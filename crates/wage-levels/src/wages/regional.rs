use super::domain::LevelThresholds;
use crate::reference;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::trace;

/// Width of the sub-area adjustment: variation 0 → −10%, variation 1 → +10%.
const SUB_AREA_SPREAD: f64 = 0.2;

/// Supplies the per-sub-area perturbation, a value in `[0, 1)`.
pub trait VariationSource: Send + Sync {
    fn draw(&self) -> f64;
}

/// Uniform draw from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomVariation;

impl VariationSource for RandomVariation {
    fn draw(&self) -> f64 {
        rand::random::<f64>()
    }
}

/// Always yields the same value; useful for reproducible renders and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedVariation(pub f64);

impl VariationSource for FixedVariation {
    fn draw(&self) -> f64 {
        self.0
    }
}

/// Synthetic threshold generator used when the wage table has no entry for a
/// location.
///
/// Each sub-area gets one variation value on first access; the value is kept
/// for the lifetime of the model so repeated lookups never jitter.
pub struct RegionalModel {
    base: LevelThresholds,
    multipliers: HashMap<String, f64>,
    variations: Mutex<HashMap<String, f64>>,
    source: Box<dyn VariationSource>,
}

impl std::fmt::Debug for RegionalModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionalModel")
            .field("base", &self.base)
            .field("multipliers", &self.multipliers.len())
            .field("memoized_sub_areas", &self.memoized_count())
            .finish()
    }
}

impl RegionalModel {
    pub fn new<S>(base: LevelThresholds, multipliers: HashMap<String, f64>, source: S) -> Self
    where
        S: VariationSource + 'static,
    {
        Self {
            base,
            multipliers,
            variations: Mutex::new(HashMap::new()),
            source: Box::new(source),
        }
    }

    /// Bundled base schedule and state multipliers with random sub-area draws.
    pub fn standard() -> Self {
        Self::with_source(RandomVariation)
    }

    pub fn with_source<S>(source: S) -> Self
    where
        S: VariationSource + 'static,
    {
        Self::new(
            reference::BASE_THRESHOLDS,
            reference::regional_multipliers().clone(),
            source,
        )
    }

    /// Pre-seeds a sub-area. Existing entries are left untouched.
    pub fn with_variation(self, sub_area_id: impl Into<String>, variation: f64) -> Self {
        let variation = clamp_variation(variation);
        self.lock_variations()
            .entry(sub_area_id.into())
            .or_insert(variation);
        self
    }

    /// State multiplier, matched case-insensitively; unknown states are 1.0.
    pub fn multiplier(&self, state_code: &str) -> f64 {
        let state_code = state_code.trim();
        self.multipliers
            .get(state_code)
            .or_else(|| self.multipliers.get(&state_code.to_ascii_uppercase()))
            .copied()
            .unwrap_or(1.0)
    }

    /// Memoized variation for `sub_area_id`, drawing it on first access.
    pub fn variation_for(&self, sub_area_id: &str) -> f64 {
        let mut variations = self.lock_variations();
        if let Some(existing) = variations.get(sub_area_id) {
            return *existing;
        }
        let drawn = clamp_variation(self.source.draw());
        trace!(sub_area_id, variation = drawn, "assigned sub-area variation");
        variations.insert(sub_area_id.to_string(), drawn);
        drawn
    }

    pub fn adjusted_multiplier(&self, state_code: &str, sub_area_id: &str) -> f64 {
        let sub_area = 1.0 + (self.variation_for(sub_area_id) - 0.5) * SUB_AREA_SPREAD;
        self.multiplier(state_code) * sub_area
    }

    pub fn thresholds(&self, state_code: &str, sub_area_id: &str) -> LevelThresholds {
        let adjusted = self.adjusted_multiplier(state_code, sub_area_id);
        LevelThresholds {
            level1: scale(self.base.level1, adjusted),
            level2: scale(self.base.level2, adjusted),
            level3: scale(self.base.level3, adjusted),
        }
    }

    pub fn memoized_count(&self) -> usize {
        self.lock_variations().len()
    }

    // The cache only ever grows, so a poisoned lock still holds consistent data.
    fn lock_variations(&self) -> std::sync::MutexGuard<'_, HashMap<String, f64>> {
        self.variations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn scale(base: u64, multiplier: f64) -> u64 {
    (base as f64 * multiplier).round().max(0.0) as u64
}

fn clamp_variation(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0 - f64::EPSILON)
    } else {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        draws: Arc<AtomicUsize>,
    }

    impl VariationSource for CountingSource {
        fn draw(&self) -> f64 {
            let n = self.draws.fetch_add(1, Ordering::SeqCst);
            [0.1, 0.9, 0.4][n % 3]
        }
    }

    #[test]
    fn neutral_variation_uses_state_multiplier_only() {
        let model = RegionalModel::with_source(FixedVariation(0.5));
        let thresholds = model.thresholds("CA", "06075");
        assert_eq!(
            thresholds,
            LevelThresholds {
                level1: 81_000,
                level2: 114_750,
                level3: 148_500,
            }
        );
    }

    #[test]
    fn state_codes_match_regardless_of_case() {
        let model = RegionalModel::with_source(FixedVariation(0.5));
        assert_eq!(model.multiplier("ca"), 1.35);
        assert_eq!(model.multiplier(" Ca "), 1.35);
        assert_eq!(model.thresholds("ca", "06075"), model.thresholds("CA", "06075"));
    }

    #[test]
    fn unknown_state_defaults_to_unit_multiplier() {
        let model = RegionalModel::with_source(FixedVariation(0.5));
        assert_eq!(model.thresholds("ZZ", "99001"), reference::BASE_THRESHOLDS);
    }

    #[test]
    fn variation_bounds_adjustment_to_ten_percent() {
        let low = RegionalModel::with_source(FixedVariation(0.0));
        assert_eq!(low.thresholds("FL", "12086").level1, 54_000);

        let high = RegionalModel::with_source(FixedVariation(0.999_999));
        let level1 = high.thresholds("FL", "12086").level1;
        assert!((65_999..=66_000).contains(&level1), "got {level1}");
    }

    #[test]
    fn variation_is_drawn_once_per_sub_area() {
        let draws = Arc::new(AtomicUsize::new(0));
        let model = RegionalModel::with_source(CountingSource {
            draws: draws.clone(),
        });

        let first = model.thresholds("TX", "48201");
        let second = model.thresholds("TX", "48201");
        assert_eq!(first, second);
        assert_eq!(draws.load(Ordering::SeqCst), 1);

        model.thresholds("TX", "48113");
        assert_eq!(draws.load(Ordering::SeqCst), 2);
        assert_eq!(model.memoized_count(), 2);
    }

    #[test]
    fn preseeded_variation_is_never_overwritten() {
        let model = RegionalModel::with_source(FixedVariation(0.9))
            .with_variation("36061", 0.25)
            .with_variation("36061", 0.75);
        assert_eq!(model.variation_for("36061"), 0.25);
    }

    #[test]
    fn out_of_range_draws_are_clamped() {
        let model = RegionalModel::with_source(FixedVariation(7.0));
        assert!(model.variation_for("01001") < 1.0);
        let model = RegionalModel::with_source(FixedVariation(f64::NAN));
        assert_eq!(model.variation_for("01001"), 0.5);
    }
}
