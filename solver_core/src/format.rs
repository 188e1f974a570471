//! # Derivation Formatter
//!
//! One numeric formatting convention, applied uniformly across every formula
//! and derivation step (the calculators this engine replaces each had their
//! own). Values with magnitude below 1e-4 or at least 1e6 render in
//! exponential notation with 4 significant decimals; everything else renders
//! fixed with 4 decimals and trailing zeros trimmed.
//!
//! ## Example
//!
//! ```rust
//! use solver_core::format::format_value;
//!
//! assert_eq!(format_value(50.0), "50");
//! assert_eq!(format_value(1.019716), "1.0197");
//! assert_eq!(format_value(0.00001), "1.0000e-5");
//! ```

use crate::formulas::descriptor::FormulaDescriptor;
use crate::units;

/// Threshold below which (nonzero) values switch to exponential notation
const SMALL_THRESHOLD: f64 = 1e-4;
/// Threshold at or above which values switch to exponential notation
const LARGE_THRESHOLD: f64 = 1e6;

/// Format a value per the uniform convention.
///
/// Non-finite values render as "Invalid" rather than propagating NaN text
/// into derivation strings.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "Invalid".to_string();
    }
    let magnitude = value.abs();
    if (magnitude < SMALL_THRESHOLD && value != 0.0) || magnitude >= LARGE_THRESHOLD {
        return format!("{:.4e}", value);
    }
    let fixed = format!("{:.4}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Format a value with its unit symbol, omitting the space for unitless
/// symbols.
pub fn format_quantity(value: f64, symbol: &str) -> String {
    if symbol.is_empty() {
        format_value(value)
    } else {
        format!("{} {}", format_value(value), symbol)
    }
}

/// Build the ordered derivation steps for a solved formula.
///
/// Steps are assembled from the exact base-unit values the solver computed
/// with, so the displayed derivation always matches the displayed answer:
///
/// 1. the formula statement,
/// 2. the rearranged form for the target variable,
/// 3. substitution of every known in base units,
/// 4. numeric evaluation of the target in its base unit,
/// 5. conversion to the display unit (only when it differs),
/// 6. any formula-specific notes (e.g. net-force direction).
pub fn derivation_steps(
    descriptor: &FormulaDescriptor,
    target: &str,
    solved_form: &str,
    base_values: &[(String, f64)],
    base_result: f64,
    display_result: f64,
    display_unit: &str,
    notes: &[String],
) -> Vec<String> {
    let mut steps = Vec::new();

    steps.push(descriptor.expression.to_string());
    if solved_form != descriptor.expression {
        steps.push(solved_form.to_string());
    }

    let substitutions: Vec<String> = base_values
        .iter()
        .map(|(name, value)| {
            let base = descriptor
                .variable(name)
                .map(|spec| units::base_unit(spec.quantity).symbol)
                .unwrap_or("");
            format!("{} = {}", name, format_quantity(*value, base))
        })
        .collect();
    if !substitutions.is_empty() {
        steps.push(substitutions.join(", "));
    }

    let base_symbol = descriptor
        .variable(target)
        .map(|spec| units::base_unit(spec.quantity).symbol)
        .unwrap_or("");
    steps.push(format!(
        "{} = {}",
        target,
        format_quantity(base_result, base_symbol)
    ));

    if display_unit != base_symbol {
        steps.push(format!(
            "{} = {}",
            target,
            format_quantity(display_result, display_unit)
        ));
    }

    steps.extend(notes.iter().cloned());
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_with_trim() {
        assert_eq!(format_value(50.0), "50");
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(1.019716), "1.0197");
        assert_eq!(format_value(49.5), "49.5");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn test_exponential_small() {
        assert_eq!(format_value(0.00001), "1.0000e-5");
        assert_eq!(format_value(0.000099), "9.9000e-5");
        // 1e-4 itself stays fixed
        assert_eq!(format_value(0.0001), "0.0001");
    }

    #[test]
    fn test_exponential_large() {
        assert_eq!(format_value(1_000_000.0), "1.0000e6");
        assert_eq!(format_value(123_456_789.0), "1.2346e8");
        // just under the threshold stays fixed
        assert_eq!(format_value(999_999.0), "999999");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_value(-50.0), "-50");
        assert_eq!(format_value(-0.00001), "-1.0000e-5");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_value(f64::NAN), "Invalid");
        assert_eq!(format_value(f64::INFINITY), "Invalid");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(50.0, "Pa"), "50 Pa");
        assert_eq!(format_quantity(3.0, ""), "3");
    }
}
