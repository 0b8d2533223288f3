use super::domain::{LevelThresholds, WageLevel};
use super::regional::RegionalModel;
use crate::geography::CountyLocation;
use serde::Serialize;
use std::sync::Arc;

/// Highest level whose threshold `salary` meets; a salary equal to a
/// threshold qualifies for it. Negative salaries count as zero.
pub fn classify(salary: i64, thresholds: &LevelThresholds) -> WageLevel {
    let salary = salary.max(0) as u64;
    if salary >= thresholds.level3 {
        WageLevel::Level3
    } else if salary >= thresholds.level2 {
        WageLevel::Level2
    } else if salary >= thresholds.level1 {
        WageLevel::Level1
    } else {
        WageLevel::BelowLevel1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub level: WageLevel,
    pub label: &'static str,
    pub thresholds: LevelThresholds,
}

impl Classification {
    pub fn new(salary: i64, thresholds: LevelThresholds) -> Self {
        let level = classify(salary, &thresholds);
        Self {
            level,
            label: level.label(),
            thresholds,
        }
    }
}

/// Classifies salaries against regional-model thresholds for a county.
///
/// Both [`LevelClassifier::thresholds_for`] and
/// [`LevelClassifier::classify_location`] read from the same model, so the
/// thresholds shown for a county always agree with the level it is colored
/// with.
#[derive(Debug, Clone)]
pub struct LevelClassifier {
    model: Arc<RegionalModel>,
}

impl LevelClassifier {
    pub fn new(model: Arc<RegionalModel>) -> Self {
        Self { model }
    }

    pub fn thresholds_for(&self, location: &CountyLocation) -> LevelThresholds {
        self.model
            .thresholds(location.state_code(), location.sub_area_id())
    }

    pub fn classify_location(&self, salary: i64, location: &CountyLocation) -> Classification {
        Classification::new(salary, self.thresholds_for(location))
    }
}
