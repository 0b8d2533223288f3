use serde::{Deserialize, Serialize};
use std::fmt;

/// Sanitizes salary text typed by a user: `$`, `,` and whitespace are
/// dropped and any fractional part is truncated. Empty, negative or
/// otherwise non-numeric input has no value.
pub fn parse_salary(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };
    let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !digits(whole) || !digits(fraction) {
        return None;
    }
    whole.parse().ok()
}

/// A salary as it arrives over the wire: either a JSON number or raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SalaryInput {
    Amount(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SalaryError {
    #[error("salary '{0}' is not a non-negative amount")]
    Unparseable(String),
    #[error("salary {0} must be a finite, non-negative amount")]
    OutOfRange(f64),
}

impl SalaryInput {
    /// Whole dollars, truncating cents like [`parse_salary`].
    pub fn dollars(&self) -> Result<i64, SalaryError> {
        match self {
            SalaryInput::Amount(amount) if amount.is_finite() && *amount >= 0.0 => {
                Ok(amount.trunc() as i64)
            }
            SalaryInput::Amount(amount) => Err(SalaryError::OutOfRange(*amount)),
            SalaryInput::Text(text) => {
                parse_salary(text).ok_or_else(|| SalaryError::Unparseable(text.clone()))
            }
        }
    }
}

impl From<i64> for SalaryInput {
    fn from(value: i64) -> Self {
        SalaryInput::Amount(value as f64)
    }
}

impl From<&str> for SalaryInput {
    fn from(value: &str) -> Self {
        SalaryInput::Text(value.to_string())
    }
}

impl fmt::Display for SalaryInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalaryInput::Amount(amount) => write!(f, "{amount}"),
            SalaryInput::Text(text) => f.write_str(text),
        }
    }
}
