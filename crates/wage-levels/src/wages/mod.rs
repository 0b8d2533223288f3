mod classifier;
mod domain;
mod regional;
mod table;

pub use classifier::{classify, Classification, LevelClassifier};
pub use domain::{LevelThresholds, OccupationRecord, ThresholdError, WageLevel, WageThresholds};
pub use regional::{FixedVariation, RandomVariation, RegionalModel, VariationSource};
pub use table::WageTable;
