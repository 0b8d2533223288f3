use super::domain::WageThresholds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Read-only index of prevailing wages: area code → SOC code → thresholds.
///
/// Ordered maps keep the serialized form stable across pipeline runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WageTable {
    areas: BTreeMap<String, BTreeMap<String, WageThresholds>>,
}

impl WageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins for a repeated `(area, occupation)` pair.
    pub fn insert(
        &mut self,
        area_code: impl Into<String>,
        occupation_code: impl Into<String>,
        thresholds: WageThresholds,
    ) -> Option<WageThresholds> {
        self.areas
            .entry(area_code.into())
            .or_default()
            .insert(occupation_code.into(), thresholds)
    }

    pub fn get(&self, area_code: &str, occupation_code: &str) -> Option<&WageThresholds> {
        self.areas.get(area_code)?.get(occupation_code)
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    pub fn entry_count(&self) -> usize {
        self.areas.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.areas.keys().map(String::as_str)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Compact JSON; the table is by far the largest artifact.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer(writer, self)
    }
}
