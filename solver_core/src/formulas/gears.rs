//! # Gear Ratio Formulas
//!
//! Two variants of `GR = driven / driving`:
//!
//! - by tooth count, where both counts must be exact positive integers and a
//!   solved count that comes out fractional is rejected outright
//! - by shaft speed (`GR = input / output`), in angular-velocity units
//!
//! ## Tooth-count rejection rule
//!
//! A solved tooth count is accepted only when it is a mathematically exact
//! integer (`fract() == 0.0`). Ratio 3 with 15 driving teeth gives 45 and is
//! accepted; ratio 3.3 with 15 driving teeth gives 49.5 and is rejected.
//! This rule is strict by intent and is kept as observed in the calculators
//! this engine replaces.

use crate::errors::{SolveError, SolveResult};
use crate::format::format_value;
use crate::units::QuantityKind;

use super::descriptor::{Constraints, FormulaDescriptor, VariableSpec};
use super::{known, BaseSolution, BaseValues};

// ============================================================================
// Gear Ratio (teeth)
// ============================================================================

static TEETH_VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "GR",
        "Gear ratio",
        QuantityKind::Dimensionless,
        Constraints::positive(),
        Some("GR = driven / driving"),
    ),
    VariableSpec::new(
        "driving",
        "Driving gear teeth",
        QuantityKind::Dimensionless,
        Constraints::positive_integer(),
        Some("driving = driven / GR"),
    ),
    VariableSpec::new(
        "driven",
        "Driven gear teeth",
        QuantityKind::Dimensionless,
        Constraints::positive_integer(),
        Some("driven = GR · driving"),
    ),
];

pub static GEAR_RATIO_TEETH: FormulaDescriptor = FormulaDescriptor {
    id: "gear-ratio-teeth",
    name: "Gear Ratio (tooth counts)",
    expression: "GR = driven / driving",
    variables: TEETH_VARIABLES,
};

/// Reject solved tooth counts that are not exact positive integers
fn check_integral_teeth(variable: &str, value: f64) -> SolveResult<()> {
    if value.fract() != 0.0 || value <= 0.0 {
        return Err(SolveError::domain(
            variable,
            format!(
                "calculated teeth must be a positive integer, got {}",
                format_value(value)
            ),
        ));
    }
    Ok(())
}

/// Solve `GR = driven / driving` over tooth counts
pub(crate) fn solve_teeth(values: &BaseValues, target: &str) -> SolveResult<BaseSolution> {
    let value = match target {
        "GR" => known(values, "driven")? / known(values, "driving")?,
        "driven" => {
            let driven = known(values, "GR")? * known(values, "driving")?;
            check_integral_teeth("driven", driven)?;
            driven
        }
        "driving" => {
            let driving = known(values, "driven")? / known(values, "GR")?;
            check_integral_teeth("driving", driving)?;
            driving
        }
        other => {
            return Err(SolveError::internal(format!(
                "gear ratio (teeth) cannot solve for '{}'",
                other
            )))
        }
    };
    Ok(BaseSolution::plain(value))
}

// ============================================================================
// Gear Ratio (speed)
// ============================================================================

static SPEED_VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "GR",
        "Gear ratio",
        QuantityKind::Dimensionless,
        Constraints::positive(),
        Some("GR = input / output"),
    ),
    VariableSpec::new(
        "input",
        "Input shaft speed",
        QuantityKind::AngularVelocity,
        Constraints::positive(),
        Some("input = output · GR"),
    ),
    VariableSpec::new(
        "output",
        "Output shaft speed",
        QuantityKind::AngularVelocity,
        Constraints::positive(),
        Some("output = input / GR"),
    ),
];

pub static GEAR_RATIO_SPEED: FormulaDescriptor = FormulaDescriptor {
    id: "gear-ratio-speed",
    name: "Gear Ratio (shaft speeds)",
    expression: "GR = input / output",
    variables: SPEED_VARIABLES,
};

/// Solve `GR = input / output` over shaft speeds
pub(crate) fn solve_speed(values: &BaseValues, target: &str) -> SolveResult<BaseSolution> {
    let value = match target {
        "GR" => known(values, "input")? / known(values, "output")?,
        "input" => known(values, "output")? * known(values, "GR")?,
        "output" => known(values, "input")? / known(values, "GR")?,
        other => {
            return Err(SolveError::internal(format!(
                "gear ratio (speed) cannot solve for '{}'",
                other
            )))
        }
    };
    Ok(BaseSolution::plain(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(values: &[(&str, f64)]) -> BaseValues {
        values
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_ratio_worked_example() {
        // driving = 20, driven = 60 -> ratio = 3.0 exactly
        let values = base(&[("driving", 20.0), ("driven", 60.0)]);
        let ratio = solve_teeth(&values, "GR").unwrap().value;
        assert_eq!(ratio, 3.0);
    }

    #[test]
    fn test_integral_driven_accepted() {
        // ratio = 3, driving = 15 -> driven = 45, integral, accepted
        let values = base(&[("GR", 3.0), ("driving", 15.0)]);
        let driven = solve_teeth(&values, "driven").unwrap().value;
        assert_eq!(driven, 45.0);
    }

    #[test]
    fn test_fractional_driven_rejected() {
        // ratio = 3.3, driving = 15 -> driven = 49.5, rejected
        let values = base(&[("GR", 3.3), ("driving", 15.0)]);
        let err = solve_teeth(&values, "driven").unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN");
        assert!(err.to_string().contains("49.5"));
    }

    #[test]
    fn test_fractional_driving_rejected() {
        // driven = 50, ratio = 3 -> driving = 16.666..., rejected
        let values = base(&[("GR", 3.0), ("driven", 50.0)]);
        assert!(solve_teeth(&values, "driving").is_err());
    }

    #[test]
    fn test_integral_driving_accepted() {
        let values = base(&[("GR", 3.0), ("driven", 45.0)]);
        let driving = solve_teeth(&values, "driving").unwrap().value;
        assert_eq!(driving, 15.0);
    }

    #[test]
    fn test_speed_ratio() {
        // 3000 rpm in, 1000 rpm out -> ratio 3
        let values = base(&[("input", 3000.0), ("output", 1000.0)]);
        let ratio = solve_speed(&values, "GR").unwrap().value;
        assert_eq!(ratio, 3.0);
    }

    #[test]
    fn test_speed_inverses() {
        let values = base(&[("GR", 3.0), ("input", 3000.0)]);
        assert_eq!(solve_speed(&values, "output").unwrap().value, 1000.0);

        let values = base(&[("GR", 3.0), ("output", 1000.0)]);
        assert_eq!(solve_speed(&values, "input").unwrap().value, 3000.0);
    }
}
