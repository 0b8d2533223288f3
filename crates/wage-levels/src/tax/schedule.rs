use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One federal bracket: income up to `upper_bound` is taxed at `rate`.
/// `None` marks the open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<f64>,
    pub rate: f64,
}

impl TaxBracket {
    pub const fn capped(upper_bound: f64, rate: f64) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub const fn open(rate: f64) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaxScheduleError {
    #[error("at least one federal bracket is required")]
    NoBrackets,
    #[error("bracket {index} bound {bound} does not exceed the previous bound")]
    NonIncreasingBound { index: usize, bound: f64 },
    #[error("only the final bracket may be unbounded (bracket {0})")]
    UnboundedBeforeEnd(usize),
    #[error("the final bracket must be unbounded")]
    BoundedFinalBracket,
    #[error("rate {rate} for {subject} must lie within [0, 1]")]
    RateOutOfRange { subject: String, rate: f64 },
    #[error("standard deduction must be a non-negative amount")]
    NegativeDeduction,
}

/// Federal brackets, deduction, payroll rate and flat state rates for one
/// filing year. Illustrative figures, not a complete tax code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxSchedule {
    tax_year: u16,
    federal: Vec<TaxBracket>,
    standard_deduction: f64,
    payroll_rate: f64,
    state_rates: HashMap<String, f64>,
}

impl TaxSchedule {
    pub fn new(
        tax_year: u16,
        federal: Vec<TaxBracket>,
        standard_deduction: f64,
        payroll_rate: f64,
        state_rates: HashMap<String, f64>,
    ) -> Result<Self, TaxScheduleError> {
        validate_brackets(&federal)?;
        if !(standard_deduction.is_finite() && standard_deduction >= 0.0) {
            return Err(TaxScheduleError::NegativeDeduction);
        }
        check_rate("payroll", payroll_rate)?;
        for (state, rate) in &state_rates {
            check_rate(state, *rate)?;
        }

        Ok(Self {
            tax_year,
            federal,
            standard_deduction,
            payroll_rate,
            state_rates,
        })
    }

    /// 2024 single-filer brackets with combined Social Security and Medicare.
    pub fn standard_2024() -> Self {
        Self {
            tax_year: 2024,
            federal: vec![
                TaxBracket::capped(11_600.0, 0.10),
                TaxBracket::capped(47_150.0, 0.12),
                TaxBracket::capped(100_525.0, 0.22),
                TaxBracket::capped(191_950.0, 0.24),
                TaxBracket::capped(243_725.0, 0.32),
                TaxBracket::capped(609_350.0, 0.35),
                TaxBracket::open(0.37),
            ],
            standard_deduction: 14_600.0,
            payroll_rate: 0.0765,
            state_rates: STATE_RATES_2024
                .iter()
                .map(|(state, rate)| (state.to_string(), *rate))
                .collect(),
        }
    }

    pub fn tax_year(&self) -> u16 {
        self.tax_year
    }

    pub fn federal_brackets(&self) -> &[TaxBracket] {
        &self.federal
    }

    pub fn standard_deduction(&self) -> f64 {
        self.standard_deduction
    }

    pub fn payroll_rate(&self) -> f64 {
        self.payroll_rate
    }

    /// Flat state rate; unknown and no-income-tax states are 0.
    pub fn state_rate(&self, state_code: &str) -> f64 {
        self.state_rates
            .get(state_code.trim())
            .or_else(|| self.state_rates.get(&state_code.trim().to_ascii_uppercase()))
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self::standard_2024()
    }
}

// Simplified marginal rates for typical professional salaries.
const STATE_RATES_2024: &[(&str, f64)] = &[
    ("AL", 0.05), ("AK", 0.0), ("AZ", 0.045), ("AR", 0.059), ("CA", 0.093),
    ("CO", 0.0455), ("CT", 0.0699), ("DE", 0.066), ("FL", 0.0), ("GA", 0.0575),
    ("HI", 0.11), ("ID", 0.06), ("IL", 0.0495), ("IN", 0.0323), ("IA", 0.0853),
    ("KS", 0.057), ("KY", 0.05), ("LA", 0.0425), ("ME", 0.0715), ("MD", 0.0575),
    ("MA", 0.05), ("MI", 0.0425), ("MN", 0.0985), ("MS", 0.05), ("MO", 0.054),
    ("MT", 0.0675), ("NE", 0.0684), ("NV", 0.0), ("NH", 0.0), ("NJ", 0.1075),
    ("NM", 0.059), ("NY", 0.0685), ("NC", 0.0499), ("ND", 0.029), ("OH", 0.0399),
    ("OK", 0.05), ("OR", 0.099), ("PA", 0.0307), ("RI", 0.0599), ("SC", 0.07),
    ("SD", 0.0), ("TN", 0.0), ("TX", 0.0), ("UT", 0.0495), ("VT", 0.0875),
    ("VA", 0.0575), ("WA", 0.0), ("WV", 0.065), ("WI", 0.0765), ("WY", 0.0),
    ("DC", 0.0895),
];

fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), TaxScheduleError> {
    let Some(last) = brackets.last() else {
        return Err(TaxScheduleError::NoBrackets);
    };
    if last.upper_bound.is_some() {
        return Err(TaxScheduleError::BoundedFinalBracket);
    }

    let mut previous = 0.0;
    for (index, bracket) in brackets.iter().enumerate() {
        check_rate(&format!("bracket {index}"), bracket.rate)?;
        match bracket.upper_bound {
            Some(bound) if !(bound.is_finite() && bound > previous) => {
                return Err(TaxScheduleError::NonIncreasingBound { index, bound });
            }
            Some(bound) => previous = bound,
            None if index + 1 != brackets.len() => {
                return Err(TaxScheduleError::UnboundedBeforeEnd(index));
            }
            None => {}
        }
    }
    Ok(())
}

fn check_rate(subject: &str, rate: f64) -> Result<(), TaxScheduleError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(TaxScheduleError::RateOutOfRange {
            subject: subject.to_string(),
            rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_schedule_passes_validation() {
        let standard = TaxSchedule::standard_2024();
        let rebuilt = TaxSchedule::new(
            standard.tax_year(),
            standard.federal_brackets().to_vec(),
            standard.standard_deduction(),
            standard.payroll_rate(),
            standard.state_rates.clone(),
        )
        .expect("standard schedule is valid");
        assert_eq!(rebuilt, standard);
    }

    #[test]
    fn rejects_malformed_bracket_lists() {
        let no_rates = HashMap::new();
        assert_eq!(
            TaxSchedule::new(2024, vec![], 0.0, 0.0, no_rates.clone()),
            Err(TaxScheduleError::NoBrackets)
        );
        assert_eq!(
            TaxSchedule::new(
                2024,
                vec![TaxBracket::capped(100.0, 0.1)],
                0.0,
                0.0,
                no_rates.clone()
            ),
            Err(TaxScheduleError::BoundedFinalBracket)
        );
        assert_eq!(
            TaxSchedule::new(
                2024,
                vec![
                    TaxBracket::capped(100.0, 0.1),
                    TaxBracket::capped(100.0, 0.2),
                    TaxBracket::open(0.3),
                ],
                0.0,
                0.0,
                no_rates.clone()
            ),
            Err(TaxScheduleError::NonIncreasingBound {
                index: 1,
                bound: 100.0
            })
        );
        assert_eq!(
            TaxSchedule::new(
                2024,
                vec![TaxBracket::open(0.1), TaxBracket::open(0.2)],
                0.0,
                0.0,
                no_rates
            ),
            Err(TaxScheduleError::UnboundedBeforeEnd(0))
        );
    }

    #[test]
    fn rejects_rates_outside_unit_interval() {
        let mut rates = HashMap::new();
        rates.insert("ZZ".to_string(), 1.5);
        let error = TaxSchedule::new(2024, vec![TaxBracket::open(0.1)], 0.0, 0.0765, rates)
            .expect_err("state rate out of range");
        assert!(matches!(error, TaxScheduleError::RateOutOfRange { .. }));
    }

    #[test]
    fn state_rate_defaults_to_zero() {
        let schedule = TaxSchedule::standard_2024();
        assert_eq!(schedule.state_rate("CA"), 0.093);
        assert_eq!(schedule.state_rate("ca"), 0.093);
        assert_eq!(schedule.state_rate("TX"), 0.0);
        assert_eq!(schedule.state_rate("PR"), 0.0);
    }
}
