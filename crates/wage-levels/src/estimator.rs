use crate::geography::CountyLocation;
use crate::wages::{Classification, LevelClassifier, LevelThresholds, WageLevel, WageTable};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WageQuery {
    pub salary: i64,
    pub occupation_code: Option<String>,
    pub area_code: Option<String>,
    pub county: CountyLocation,
}

impl WageQuery {
    pub fn new(salary: i64, county: CountyLocation) -> Self {
        Self {
            salary,
            occupation_code: None,
            area_code: None,
            county,
        }
    }

    pub fn with_occupation(mut self, occupation_code: impl Into<String>) -> Self {
        self.occupation_code = Some(occupation_code.into());
        self
    }

    pub fn with_area(mut self, area_code: impl Into<String>) -> Self {
        self.area_code = Some(area_code.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    WageTable,
    RegionalModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WageEstimate {
    pub level: WageLevel,
    pub level_value: u8,
    pub label: &'static str,
    pub thresholds: LevelThresholds,
    /// Only known when the thresholds came from the wage table.
    pub level4: Option<u64>,
    pub source: ThresholdSource,
    pub state_code: Option<String>,
    pub state_name: Option<&'static str>,
}

/// Picks the thresholds for a query: the published table entry for the
/// area and occupation when present, otherwise the county's regional model.
#[derive(Debug, Clone)]
pub struct WageLevelEstimator {
    table: Arc<WageTable>,
    classifier: LevelClassifier,
}

impl WageLevelEstimator {
    pub fn new(table: Arc<WageTable>, classifier: LevelClassifier) -> Self {
        Self { table, classifier }
    }

    pub fn table(&self) -> &WageTable {
        &self.table
    }

    pub fn classifier(&self) -> &LevelClassifier {
        &self.classifier
    }

    pub fn estimate(&self, query: &WageQuery) -> WageEstimate {
        let table_entry = match (&query.area_code, &query.occupation_code) {
            (Some(area), Some(occupation)) => self.table.get(area, occupation),
            _ => None,
        };

        let (classification, level4, source) = match table_entry {
            Some(entry) => (
                Classification::new(query.salary, entry.classification_thresholds()),
                Some(entry.level4()),
                ThresholdSource::WageTable,
            ),
            None => {
                debug!(
                    county = %query.county.fips,
                    area = ?query.area_code,
                    occupation = ?query.occupation_code,
                    "no wage table entry; using regional model"
                );
                (
                    self.classifier.classify_location(query.salary, &query.county),
                    None,
                    ThresholdSource::RegionalModel,
                )
            }
        };

        WageEstimate {
            level: classification.level,
            level_value: classification.level.value(),
            label: classification.label,
            thresholds: classification.thresholds,
            level4,
            source,
            state_code: query.county.state_code.clone(),
            state_name: query.county.state_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wages::{FixedVariation, RegionalModel, WageThresholds};

    fn estimator() -> WageLevelEstimator {
        let mut table = WageTable::new();
        table.insert(
            "19100",
            "15-1252",
            WageThresholds::new([81_000, 110_000, 139_000, 168_000]).expect("ordered"),
        );
        let model = RegionalModel::with_source(FixedVariation(0.5));
        WageLevelEstimator::new(
            Arc::new(table),
            LevelClassifier::new(Arc::new(model)),
        )
    }

    #[test]
    fn table_entry_wins_when_present() {
        let query = WageQuery::new(120_000, CountyLocation::from_fips("48113"))
            .with_occupation("15-1252")
            .with_area("19100");
        let estimate = estimator().estimate(&query);
        assert_eq!(estimate.source, ThresholdSource::WageTable);
        assert_eq!(estimate.level, WageLevel::Level2);
        assert_eq!(estimate.level4, Some(168_000));
        assert_eq!(estimate.thresholds.level3, 139_000);
        assert_eq!(estimate.state_name, Some("Texas"));
    }

    #[test]
    fn falls_back_to_regional_model() {
        let query = WageQuery::new(120_000, CountyLocation::from_fips("48113"))
            .with_occupation("29-1141")
            .with_area("19100");
        let estimate = estimator().estimate(&query);
        assert_eq!(estimate.source, ThresholdSource::RegionalModel);
        assert_eq!(estimate.level4, None);

        let classifier = estimator();
        let expected = classifier
            .classifier()
            .thresholds_for(&CountyLocation::from_fips("48113"));
        assert_eq!(estimate.thresholds, expected);
    }

    #[test]
    fn area_without_occupation_uses_regional_model() {
        let query = WageQuery::new(50_000, CountyLocation::from_fips("06075")).with_area("19100");
        let estimate = estimator().estimate(&query);
        assert_eq!(estimate.source, ThresholdSource::RegionalModel);
        assert_eq!(estimate.state_code.as_deref(), Some("CA"));
    }
}
