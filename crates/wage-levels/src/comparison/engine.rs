use super::col::CostOfLivingIndex;
use crate::tax::{round_tenth, TaxBreakdown, TaxEngine};
use crate::wages::WageThresholds;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Dollars still needed to reach each of the four table levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelGaps {
    pub level1: u64,
    pub level2: u64,
    pub level3: u64,
    pub level4: u64,
}

/// Gap analysis over the full four-level table entry. `current_level` runs
/// 0–4 and is independent of the 0–3 map classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalaryGaps {
    pub gaps: LevelGaps,
    pub current_level: u8,
    pub thresholds: WageThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColAdjustment {
    pub original: i64,
    pub adjusted: i64,
    pub from_index: f64,
    pub to_index: f64,
    /// Change of the target index relative to the source, one decimal place.
    pub percent_change: f64,
}

/// A location as seen by the comparison: survey area for the cost-of-living
/// index, state for income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSite {
    pub area_code: String,
    pub state_code: String,
}

impl ComparisonSite {
    pub fn new(area_code: impl Into<String>, state_code: impl Into<String>) -> Self {
        Self {
            area_code: area_code.into(),
            state_code: state_code.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationTakeHome {
    #[serde(flatten)]
    pub breakdown: TaxBreakdown,
    pub col_index: f64,
    pub purchasing_power: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TakeHomeComparison {
    pub location1: LocationTakeHome,
    pub location2: LocationTakeHome,
    /// Purchasing power of location 2 minus location 1.
    pub difference: i64,
    pub percent_difference: f64,
}

#[derive(Debug, Clone)]
pub struct ComparisonEngine {
    tax: TaxEngine,
    cost_of_living: Arc<CostOfLivingIndex>,
}

impl ComparisonEngine {
    pub fn new(tax: TaxEngine, cost_of_living: Arc<CostOfLivingIndex>) -> Self {
        Self {
            tax,
            cost_of_living,
        }
    }

    pub fn tax(&self) -> &TaxEngine {
        &self.tax
    }

    pub fn salary_gaps(&self, current_salary: i64, thresholds: &WageThresholds) -> SalaryGaps {
        salary_gaps(current_salary, thresholds)
    }

    pub fn adjust_for_col(&self, salary: i64, from_area: &str, to_area: &str) -> ColAdjustment {
        let from_index = self.cost_of_living.index(from_area);
        let to_index = self.cost_of_living.index(to_area);

        ColAdjustment {
            original: salary,
            adjusted: (salary as f64 * (to_index / from_index)).round() as i64,
            from_index,
            to_index,
            percent_change: round_tenth((to_index - from_index) / from_index * 100.0),
        }
    }

    pub fn compare_take_home(
        &self,
        salary: i64,
        first: &ComparisonSite,
        second: &ComparisonSite,
    ) -> TakeHomeComparison {
        let (location1, power1) = self.located_take_home(salary, first);
        let (location2, power2) = self.located_take_home(salary, second);

        let delta = power2 - power1;
        let percent_difference = if power1 > 0.0 {
            round_tenth(delta / power1 * 100.0)
        } else {
            0.0
        };

        TakeHomeComparison {
            location1,
            location2,
            difference: delta.round() as i64,
            percent_difference,
        }
    }

    fn located_take_home(&self, salary: i64, site: &ComparisonSite) -> (LocationTakeHome, f64) {
        let breakdown = self.tax.take_home(salary, &site.state_code);
        let col_index = self.cost_of_living.index(&site.area_code);
        let power = breakdown.take_home as f64 / col_index * 100.0;

        (
            LocationTakeHome {
                breakdown,
                col_index,
                purchasing_power: power.round() as i64,
            },
            power,
        )
    }
}

/// Gap to each level (never negative) and the highest level already met.
pub fn salary_gaps(current_salary: i64, thresholds: &WageThresholds) -> SalaryGaps {
    let salary = current_salary.max(0) as u64;
    let levels = thresholds.as_array();
    let gap = |threshold: u64| threshold.saturating_sub(salary);

    SalaryGaps {
        gaps: LevelGaps {
            level1: gap(levels[0]),
            level2: gap(levels[1]),
            level3: gap(levels[2]),
            level4: gap(levels[3]),
        },
        current_level: levels.iter().filter(|&&threshold| salary >= threshold).count() as u8,
        thresholds: *thresholds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ComparisonEngine {
        let mut index = CostOfLivingIndex::new();
        index.insert("41860", 180.0);
        index.insert("19100", 90.0);
        ComparisonEngine::new(TaxEngine::default(), Arc::new(index))
    }

    fn thresholds() -> WageThresholds {
        WageThresholds::new([41_413, 70_138, 98_842, 127_566]).expect("ordered")
    }

    #[test]
    fn gaps_are_clamped_at_zero() {
        let result = salary_gaps(80_000, &thresholds());
        assert_eq!(result.current_level, 2);
        assert_eq!(
            result.gaps,
            LevelGaps {
                level1: 0,
                level2: 0,
                level3: 18_842,
                level4: 47_566,
            }
        );
    }

    #[test]
    fn current_level_spans_zero_through_four() {
        assert_eq!(salary_gaps(-10, &thresholds()).current_level, 0);
        assert_eq!(salary_gaps(41_412, &thresholds()).current_level, 0);
        assert_eq!(salary_gaps(41_413, &thresholds()).current_level, 1);
        assert_eq!(salary_gaps(127_566, &thresholds()).current_level, 4);
    }

    #[test]
    fn col_adjustment_scales_by_index_ratio() {
        let adjustment = engine().adjust_for_col(100_000, "19100", "41860");
        assert_eq!(adjustment.adjusted, 200_000);
        assert_eq!(adjustment.percent_change, 100.0);

        let unknown = engine().adjust_for_col(100_000, "00000", "19100");
        assert_eq!(unknown.from_index, 100.0);
        assert_eq!(unknown.adjusted, 90_000);
        assert_eq!(unknown.percent_change, -10.0);
    }

    #[test]
    fn purchasing_power_normalizes_take_home() {
        let comparison = engine().compare_take_home(
            108_000,
            &ComparisonSite::new("19100", "TX"),
            &ComparisonSite::new("41860", "CA"),
        );
        assert_eq!(comparison.location1.breakdown.take_home, 84_137);
        assert_eq!(comparison.location1.purchasing_power, 93_486);
        assert_eq!(comparison.location2.col_index, 180.0);
        assert!(comparison.difference < 0);
        assert!(comparison.percent_difference < 0.0);
    }

    #[test]
    fn swapping_locations_negates_difference() {
        let engine = engine();
        let a = ComparisonSite::new("19100", "TX");
        let b = ComparisonSite::new("41860", "CA");
        for salary in [0, 45_000, 108_000, 250_000] {
            let forward = engine.compare_take_home(salary, &a, &b);
            let backward = engine.compare_take_home(salary, &b, &a);
            assert_eq!(forward.difference, -backward.difference);
        }
    }

    #[test]
    fn missing_data_degrades_to_defaults() {
        let comparison = engine().compare_take_home(
            0,
            &ComparisonSite::new("nowhere", "ZZ"),
            &ComparisonSite::new("elsewhere", "ZZ"),
        );
        assert_eq!(comparison.difference, 0);
        assert_eq!(comparison.percent_difference, 0.0);
        assert_eq!(comparison.location1.col_index, 100.0);
    }
}
