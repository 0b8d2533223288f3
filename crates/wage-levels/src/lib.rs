pub mod comparison;
pub mod config;
pub mod dataset;
pub mod error;
pub mod estimator;
pub mod geography;
pub mod pipeline;
pub mod reference;
pub mod salary;
pub mod tax;
pub mod telemetry;
pub mod wages;

pub use comparison::{ComparisonEngine, CostOfLivingIndex};
pub use dataset::Dataset;
pub use estimator::{WageEstimate, WageLevelEstimator, WageQuery};
pub use pipeline::DataPipeline;
pub use tax::{TaxBreakdown, TaxEngine, TaxSchedule};
pub use wages::{LevelClassifier, RegionalModel, WageLevel, WageTable, WageThresholds};
