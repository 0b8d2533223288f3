use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use tracing::warn;

/// National average cost of living.
pub const NATIONAL_AVERAGE: f64 = 100.0;

/// Cost-of-living index by wage-survey area code, base 100.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostOfLivingIndex {
    by_area: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct AreaEntry {
    #[serde(rename = "colIndex", alias = "col_index")]
    col_index: Option<f64>,
}

impl CostOfLivingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only positive, finite indices; anything else would divide by
    /// zero or flip the sign of an adjustment.
    pub fn insert(&mut self, area_code: impl Into<String>, index: f64) -> bool {
        if index.is_finite() && index > 0.0 {
            self.by_area.insert(area_code.into(), index);
            true
        } else {
            false
        }
    }

    /// Reads `{"<area>": {"colIndex": 123.4, ...}, ...}`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, AreaEntry> = serde_json::from_reader(reader)?;
        let mut index = Self::new();
        for (area_code, entry) in raw {
            match entry.col_index {
                Some(value) if index.insert(area_code.clone(), value) => {}
                other => {
                    warn!(%area_code, value = ?other, "ignoring unusable cost-of-living index")
                }
            }
        }
        Ok(index)
    }

    /// Index for `area_code`, or the national average when unknown.
    pub fn index(&self, area_code: &str) -> f64 {
        self.by_area
            .get(area_code)
            .copied()
            .unwrap_or(NATIONAL_AVERAGE)
    }

    pub fn contains(&self, area_code: &str) -> bool {
        self.by_area.contains_key(area_code)
    }

    pub fn len(&self) -> usize {
        self.by_area.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_area.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_area_uses_national_average() {
        let index = CostOfLivingIndex::new();
        assert_eq!(index.index("41860"), 100.0);
    }

    #[test]
    fn loader_skips_missing_and_non_positive_indices() {
        let json = r#"{
            "41860": {"colIndex": 178.2, "name": "San Francisco"},
            "10180": {"colIndex": 0},
            "12060": {"colIndex": -5.0},
            "19100": {"name": "Dallas"}
        }"#;
        let index = CostOfLivingIndex::from_reader(json.as_bytes()).expect("parse");
        assert_eq!(index.len(), 1);
        assert_eq!(index.index("41860"), 178.2);
        assert_eq!(index.index("10180"), 100.0);
        assert!(!index.contains("19100"));
    }
}
