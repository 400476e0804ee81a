//! Growth-rate arithmetic for display statistics
//!
//! The dashboard reports changes as percentages rounded to one decimal,
//! with an explicit `+` for increases.

use crate::MathError;

/// Percentage change from `base` to `value`.
///
/// # Examples
///
/// ```
/// use energy_series::growth::growth_percent;
///
/// assert_eq!(growth_percent(1000.0, 1050.0).unwrap(), 5.0);
/// ```
pub fn growth_percent(base: f64, value: f64) -> Result<f64, MathError> {
    if !base.is_finite() || !value.is_finite() {
        return Err(MathError::InvalidInput(format!(
            "growth between {} and {} is undefined",
            base, value
        )));
    }

    if base == 0.0 {
        return Err(MathError::DivisionByZero(
            "growth rate from a zero base value".to_string(),
        ));
    }

    Ok((value - base) / base * 100.0)
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format a percentage with one decimal and a leading `+` when positive
///
/// ```
/// use energy_series::growth::signed_percent;
///
/// assert_eq!(signed_percent(5.0), "+5.0%");
/// assert_eq!(signed_percent(-2.34), "-2.3%");
/// assert_eq!(signed_percent(0.0), "0.0%");
/// ```
pub fn signed_percent(percent: f64) -> String {
    let rounded = round_to(percent, 1);
    // avoid printing "-0.0%"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if rounded > 0.0 {
        format!("+{:.1}%", rounded)
    } else {
        format!("{:.1}%", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_growth_percent() {
        assert_relative_eq!(growth_percent(1000.0, 1030.0).unwrap(), 3.0, epsilon = 1e-9);
        assert_relative_eq!(growth_percent(200.0, 150.0).unwrap(), -25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_growth_percent_zero_base() {
        assert!(matches!(
            growth_percent(0.0, 10.0),
            Err(MathError::DivisionByZero(_))
        ));
        assert!(matches!(
            growth_percent(f64::NAN, 10.0),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(4.96, 1), 5.0);
        assert_eq!(round_to(-1.25, 1), -1.3);
        assert_eq!(round_to(12.346, 2), 12.35);
    }

    #[test]
    fn test_signed_percent_negative_zero() {
        assert_eq!(signed_percent(-0.01), "0.0%");
        assert_eq!(signed_percent(12.04), "+12.0%");
    }
}
