//! Turning numbers into operand text that fits the display.
//!
//! Tries, in order: the shortest round-trip representation, a reduced
//! number of significant digits, then exponential notation with fewer and
//! fewer mantissa digits. A value that still does not fit is an error.

use super::error::CalcError;
use crate::config::CalculatorConfig;

/// Round to `digits` significant digits to drop floating-point noise
/// such as `0.1 + 0.2 = 0.30000000000000004`.
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let digits = digits.clamp(1, 17);
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}

/// Format a result for the operand slot of the display.
pub fn format_number(value: f64, config: &CalculatorConfig) -> Result<String, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::NonFiniteResult);
    }

    // Adding zero turns -0 into 0.
    let value = round_significant(value, config.significant_digits) + 0.0;
    let fits = |s: &str| s.chars().count() <= config.max_operand_len;

    let plain = value.to_string();
    if fits(&plain) {
        return Ok(plain);
    }

    let reduced = to_precision(value, config.reduced_precision);
    if fits(&reduced) {
        return Ok(reduced);
    }

    for digits in (0..config.reduced_precision).rev() {
        let exponential = to_exponential(value, digits);
        if fits(&exponential) {
            return Ok(exponential);
        }
    }

    Err(CalcError::NonFiniteResult)
}

/// `precision` significant digits, switching to exponential notation for
/// very large or very small magnitudes. Trailing zeros are dropped.
pub fn to_precision(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let exponent = scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse::<i32>().ok())
        .unwrap_or(0);

    if exponent < -6 || exponent >= precision as i32 {
        to_exponential(value, precision - 1)
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Exponential notation with at most `digits` fractional mantissa digits.
pub fn to_exponential(value: f64, digits: usize) -> String {
    let scientific = format!("{:.*e}", digits, value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{}", trim_fraction(mantissa), exponent),
        None => scientific,
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(value: f64) -> Result<String, CalcError> {
        format_number(value, &CalculatorConfig::default())
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(format(13.0).unwrap(), "13");
        assert_eq!(format(-5.0).unwrap(), "-5");
        assert_eq!(format(2.5).unwrap(), "2.5");
        assert_eq!(format(0.1 + 0.2).unwrap(), "0.3");
        assert_eq!(format(-0.0).unwrap(), "0");
    }

    #[test]
    fn test_constants_fit() {
        assert_eq!(format(std::f64::consts::PI).unwrap(), "3.14159265358979");
        assert_eq!(format(std::f64::consts::E).unwrap(), "2.71828182845905");
    }

    #[test]
    fn test_reduced_precision() {
        assert_eq!(format(1.0 / 3.0).unwrap(), "0.3333333333");
        assert_eq!(format(123456.789012345678).unwrap(), "123456.789012346");
        assert_eq!(format(1e21).unwrap(), "1e21");
        assert_eq!(format(1234567890123456789.0).unwrap(), "1.23456789e18");
    }

    #[test]
    fn test_exponential_fallback() {
        assert_eq!(format(1.5e300).unwrap(), "1.5e300");
        assert_eq!(format(-1.23456789e-200).unwrap(), "-1.23456789e-200");
        assert_eq!(format(1e-7).unwrap(), "0.0000001");
    }

    #[test]
    fn test_non_finite_is_error() {
        assert_eq!(format(f64::INFINITY), Err(CalcError::NonFiniteResult));
        assert_eq!(format(f64::NAN), Err(CalcError::NonFiniteResult));
    }

    #[test]
    fn test_overflowing_display_is_error() {
        let config = CalculatorConfig {
            max_operand_len: 4,
            ..CalculatorConfig::default()
        };
        assert_eq!(format_number(12.0, &config).unwrap(), "12");
        assert_eq!(format_number(-1.5e300, &config), Err(CalcError::NonFiniteResult));
    }

    #[test]
    fn test_to_precision() {
        assert_eq!(to_precision(1234.5678, 6), "1234.57");
        assert_eq!(to_precision(0.000123456, 3), "0.000123");
        assert_eq!(to_precision(1.5e-9, 4), "1.5e-9");
        assert_eq!(to_precision(99999.0, 2), "1e5");
    }
}
