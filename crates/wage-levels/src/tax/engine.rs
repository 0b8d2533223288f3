use super::schedule::TaxSchedule;
use serde::Serialize;
use std::sync::Arc;

/// Itemized annual taxes for one gross salary, in whole dollars.
///
/// `total_tax` is rounded from the unrounded components and `take_home` is
/// derived from it, so `take_home + total_tax == gross` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TaxBreakdown {
    pub gross: i64,
    pub taxable_income: i64,
    pub federal_tax: i64,
    pub state_tax: i64,
    pub payroll_tax: i64,
    pub total_tax: i64,
    pub take_home: i64,
    pub state_rate: f64,
    /// Percentage of gross, one decimal place.
    pub effective_rate: f64,
}

#[derive(Debug, Clone)]
pub struct TaxEngine {
    schedule: Arc<TaxSchedule>,
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self::new(Arc::new(TaxSchedule::standard_2024()))
    }
}

impl TaxEngine {
    pub fn new(schedule: Arc<TaxSchedule>) -> Self {
        Self { schedule }
    }

    /// Progressive federal tax; each rate applies only to the slice of
    /// income inside its bracket.
    pub fn federal_tax(&self, taxable_income: f64) -> f64 {
        if taxable_income.is_nan() || taxable_income <= 0.0 {
            return 0.0;
        }

        let mut tax = 0.0;
        let mut previous = 0.0;
        for bracket in self.schedule.federal_brackets() {
            if taxable_income <= previous {
                break;
            }
            let ceiling = bracket.upper_bound.unwrap_or(f64::INFINITY);
            tax += (taxable_income.min(ceiling) - previous) * bracket.rate;
            previous = ceiling;
        }
        tax
    }

    /// Non-positive gross yields an all-zero breakdown.
    pub fn take_home(&self, gross_salary: i64, state_code: &str) -> TaxBreakdown {
        if gross_salary <= 0 {
            return TaxBreakdown::default();
        }

        let gross = gross_salary as f64;
        let taxable = (gross - self.schedule.standard_deduction()).max(0.0);
        let federal = self.federal_tax(taxable);
        let state_rate = self.schedule.state_rate(state_code);
        let state = taxable * state_rate;
        let payroll = gross * self.schedule.payroll_rate();

        let total_tax = round_dollars(federal + state + payroll);
        TaxBreakdown {
            gross: gross_salary,
            taxable_income: round_dollars(taxable),
            federal_tax: round_dollars(federal),
            state_tax: round_dollars(state),
            payroll_tax: round_dollars(payroll),
            total_tax,
            take_home: gross_salary - total_tax,
            state_rate,
            effective_rate: round_tenth(total_tax as f64 / gross * 100.0),
        }
    }
}

fn round_dollars(amount: f64) -> i64 {
    amount.round() as i64
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TaxEngine {
        TaxEngine::default()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn federal_tax_is_continuous_at_bracket_edges() {
        let engine = engine();
        assert_eq!(engine.federal_tax(0.0), 0.0);
        assert_eq!(engine.federal_tax(-500.0), 0.0);
        assert_close(engine.federal_tax(11_600.0), 1_160.00);
        assert_close(engine.federal_tax(11_601.0), 1_160.12);
        assert_close(engine.federal_tax(47_150.0), 1_160.0 + 35_550.0 * 0.12);
    }

    #[test]
    fn federal_tax_is_non_decreasing() {
        let engine = engine();
        let mut previous = 0.0;
        for income in (0..700_000).step_by(997) {
            let tax = engine.federal_tax(income as f64);
            assert!(tax >= previous);
            previous = tax;
        }
    }

    #[test]
    fn texas_has_no_state_tax_and_totals_balance() {
        let breakdown = engine().take_home(108_000, "TX");
        assert_eq!(breakdown.state_tax, 0);
        assert_eq!(breakdown.taxable_income, 93_400);
        assert_eq!(breakdown.federal_tax, 15_601);
        assert_eq!(breakdown.payroll_tax, 8_262);
        assert_eq!(breakdown.total_tax, 23_863);
        assert_eq!(breakdown.take_home + breakdown.total_tax, breakdown.gross);
        assert_eq!(breakdown.effective_rate, 22.1);
    }

    #[test]
    fn state_tax_applies_to_taxable_income() {
        let breakdown = engine().take_home(108_000, "CA");
        assert_eq!(breakdown.state_tax, 8_686);
        assert_eq!(breakdown.state_rate, 0.093);
        assert_eq!(breakdown.take_home + breakdown.total_tax, 108_000);
    }

    #[test]
    fn payroll_tax_ignores_standard_deduction() {
        let breakdown = engine().take_home(10_000, "NY");
        assert_eq!(breakdown.taxable_income, 0);
        assert_eq!(breakdown.federal_tax, 0);
        assert_eq!(breakdown.state_tax, 0);
        assert_eq!(breakdown.payroll_tax, 765);
        assert_eq!(breakdown.take_home, 9_235);
    }

    #[test]
    fn non_positive_gross_is_all_zero() {
        assert_eq!(engine().take_home(0, "CA"), TaxBreakdown::default());
        assert_eq!(engine().take_home(-42, "CA"), TaxBreakdown::default());
    }
}
