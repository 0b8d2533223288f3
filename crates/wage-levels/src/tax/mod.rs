mod engine;
mod schedule;

pub(crate) use engine::round_tenth;
pub use engine::{TaxBreakdown, TaxEngine};
pub use schedule::{TaxBracket, TaxSchedule, TaxScheduleError};
