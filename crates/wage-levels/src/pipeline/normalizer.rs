/// Standard annual work hours: 40 hours × 52 weeks.
pub(crate) const ANNUAL_WORK_HOURS: f64 = 2080.0;

pub(crate) fn annualize(hourly: f64) -> u64 {
    (hourly * ANNUAL_WORK_HOURS).round() as u64
}

/// Parses an hourly wage field; `None` unless the value is a finite number.
pub(crate) fn parse_hourly(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

pub(crate) fn clean_field(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annualizes_with_round_half_up() {
        assert_eq!(annualize(19.91), 41_413);
        assert_eq!(annualize(47.73), 99_278);
        assert_eq!(annualize(0.0), 0);
    }

    #[test]
    fn rejects_non_numeric_wages() {
        assert_eq!(parse_hourly(" 33.72 "), Some(33.72));
        assert_eq!(parse_hourly("N/A"), None);
        assert_eq!(parse_hourly(""), None);
        assert_eq!(parse_hourly("inf"), None);
        assert_eq!(parse_hourly("NaN"), None);
        assert_eq!(parse_hourly("-4.00"), Some(-4.0));
    }

    #[test]
    fn clean_field_strips_bom_and_padding() {
        assert_eq!(clean_field("\u{feff}11-1011 "), "11-1011");
    }
}
