mod col;
mod engine;

pub use col::{CostOfLivingIndex, NATIONAL_AVERAGE};
pub use engine::{
    salary_gaps, ColAdjustment, ComparisonEngine, ComparisonSite, LevelGaps, LocationTakeHome,
    SalaryGaps, TakeHomeComparison,
};
