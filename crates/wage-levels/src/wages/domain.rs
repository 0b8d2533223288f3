use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Entry in the occupation catalog, keyed by SOC code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationRecord {
    pub code: String,
    pub title: String,
}

impl OccupationRecord {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    #[error("wage thresholds must be non-decreasing (found {0:?})")]
    Unordered([u64; 4]),
}

/// The four annual prevailing-wage thresholds for one area and occupation.
///
/// Always complete and non-decreasing; serialized as `[w1, w2, w3, w4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WageThresholds([u64; 4]);

impl WageThresholds {
    pub fn new(levels: [u64; 4]) -> Result<Self, ThresholdError> {
        if levels.windows(2).all(|pair| pair[0] <= pair[1]) {
            Ok(Self(levels))
        } else {
            Err(ThresholdError::Unordered(levels))
        }
    }

    pub fn level1(&self) -> u64 {
        self.0[0]
    }

    pub fn level2(&self) -> u64 {
        self.0[1]
    }

    pub fn level3(&self) -> u64 {
        self.0[2]
    }

    pub fn level4(&self) -> u64 {
        self.0[3]
    }

    pub fn as_array(&self) -> [u64; 4] {
        self.0
    }

    /// The three thresholds that drive the 0–3 classification.
    pub fn classification_thresholds(&self) -> LevelThresholds {
        LevelThresholds {
            level1: self.0[0],
            level2: self.0[1],
            level3: self.0[2],
        }
    }
}

impl Serialize for WageThresholds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WageThresholds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let levels = <[u64; 4]>::deserialize(deserializer)?;
        WageThresholds::new(levels).map_err(serde::de::Error::custom)
    }
}

/// Level 1–3 thresholds as consumed by the classifier and shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub level1: u64,
    pub level2: u64,
    pub level3: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageLevel {
    BelowLevel1,
    Level1,
    Level2,
    Level3,
}

impl WageLevel {
    pub const fn value(self) -> u8 {
        match self {
            Self::BelowLevel1 => 0,
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BelowLevel1 => "Below Level 1",
            Self::Level1 => "Level 1",
            Self::Level2 => "Level 2",
            Self::Level3 => "Level 3",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_reject_descending_levels() {
        assert!(WageThresholds::new([41413, 70138, 98842, 127566]).is_ok());
        assert!(WageThresholds::new([50000, 50000, 50000, 50000]).is_ok());
        assert_eq!(
            WageThresholds::new([70000, 60000, 80000, 90000]),
            Err(ThresholdError::Unordered([70000, 60000, 80000, 90000]))
        );
    }

    #[test]
    fn thresholds_serialize_as_plain_array() {
        let thresholds = WageThresholds::new([1, 2, 3, 4]).expect("ordered");
        assert_eq!(serde_json::to_string(&thresholds).unwrap(), "[1,2,3,4]");

        let parsed: Result<WageThresholds, _> = serde_json::from_str("[4,3,2,1]");
        assert!(parsed.is_err());
    }
}
