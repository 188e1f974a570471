//! # Formula Descriptors
//!
//! Declarative, data-only records describing a physical formula: its
//! variables, each variable's quantity kind and constraints, and the
//! rearranged expression used when solving for that variable. The generic
//! solver consumes descriptors; the per-formula modules provide the math.

use crate::errors::{SolveError, SolveResult};
use crate::units::QuantityKind;

// ============================================================================
// Constraints
// ============================================================================

/// Domain constraints on a supplied variable, checked on the raw value
/// before unit normalization.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Constraints {
    /// Lower bound, if any
    pub min: Option<f64>,
    /// Whether the lower bound itself is excluded (strict inequality)
    pub exclusive_min: bool,
    /// Upper bound, if any (inclusive)
    pub max: Option<f64>,
    /// Whether the value must be a mathematically exact integer
    pub integer: bool,
}

impl Constraints {
    /// No constraints beyond being a finite number
    pub const fn none() -> Self {
        Constraints {
            min: None,
            exclusive_min: false,
            max: None,
            integer: false,
        }
    }

    /// Strictly positive (> 0)
    pub const fn positive() -> Self {
        Constraints {
            min: Some(0.0),
            exclusive_min: true,
            max: None,
            integer: false,
        }
    }

    /// Non-negative (>= 0)
    pub const fn non_negative() -> Self {
        Constraints {
            min: Some(0.0),
            exclusive_min: false,
            max: None,
            integer: false,
        }
    }

    /// Strictly positive exact integer (tooth counts)
    pub const fn positive_integer() -> Self {
        Constraints {
            min: Some(0.0),
            exclusive_min: true,
            max: None,
            integer: true,
        }
    }

    /// A percentage in [0, 100]
    pub const fn percentage() -> Self {
        Constraints {
            min: Some(0.0),
            exclusive_min: false,
            max: Some(100.0),
            integer: false,
        }
    }

    /// Validate a parsed value against these constraints
    pub fn check(&self, field: &str, value: f64) -> SolveResult<()> {
        if let Some(min) = self.min {
            let violated = if self.exclusive_min {
                value <= min
            } else {
                value < min
            };
            if violated {
                let bound = if self.exclusive_min {
                    format!("must be greater than {}", min)
                } else {
                    format!("must be at least {}", min)
                };
                return Err(SolveError::validation(field, value.to_string(), bound));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(SolveError::validation(
                    field,
                    value.to_string(),
                    format!("must be at most {}", max),
                ));
            }
        }
        // Mirrors Number.isInteger: exact representation only, no rounding slack
        if self.integer && value.fract() != 0.0 {
            return Err(SolveError::validation(
                field,
                value.to_string(),
                "must be a whole number",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Variable Specification
// ============================================================================

/// One named variable of a formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableSpec {
    /// Short name used in requests and derivation steps (e.g. "P", "F_net")
    pub name: &'static str,
    /// Human-readable label (e.g. "Pressure")
    pub label: &'static str,
    /// Which unit table the variable draws from
    pub quantity: QuantityKind,
    /// Input constraints
    pub constraints: Constraints,
    /// May be left out of the request entirely; absent optionals default to 0
    pub optional: bool,
    /// Rearranged expression shown when solving for this variable.
    /// `None` marks a variable that can only ever be an input.
    pub solved_form: Option<&'static str>,
}

impl VariableSpec {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        quantity: QuantityKind,
        constraints: Constraints,
        solved_form: Option<&'static str>,
    ) -> Self {
        VariableSpec {
            name,
            label,
            quantity,
            constraints,
            optional: false,
            solved_form,
        }
    }

    /// Mark the variable as optional (second force/angle pair of the
    /// multi-force net-force formula)
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Whether this variable is a valid solve target
    pub fn solvable(&self) -> bool {
        self.solved_form.is_some()
    }
}

// ============================================================================
// Formula Descriptor
// ============================================================================

/// Complete declarative description of one formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormulaDescriptor {
    /// Stable catalogue id (e.g. "ideal-gas-law")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// The formula statement as displayed (e.g. "P·V = n·R·T")
    pub expression: &'static str,
    /// Variable specifications, in display order
    pub variables: &'static [VariableSpec],
}

impl FormulaDescriptor {
    /// Look up a variable spec by name
    pub fn variable(&self, name: &str) -> Option<&VariableSpec> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Number of required (non-optional) variables
    pub fn required_count(&self) -> usize {
        self.variables.iter().filter(|v| !v.optional).count()
    }

    /// Names of the variables that may be solved for
    pub fn solvable_variables(&self) -> Vec<&'static str> {
        self.variables
            .iter()
            .filter(|v| v.solvable())
            .map(|v| v.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_constraint() {
        let c = Constraints::positive();
        assert!(c.check("x", 1.0).is_ok());
        assert!(c.check("x", 0.0).is_err());
        assert!(c.check("x", -1.0).is_err());
    }

    #[test]
    fn test_non_negative_constraint() {
        let c = Constraints::non_negative();
        assert!(c.check("x", 0.0).is_ok());
        assert!(c.check("x", -0.1).is_err());
    }

    #[test]
    fn test_integer_constraint() {
        let c = Constraints::positive_integer();
        assert!(c.check("teeth", 20.0).is_ok());
        let err = c.check("teeth", 20.5).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION");
        assert!(err.to_string().contains("teeth"));
    }

    #[test]
    fn test_percentage_constraint() {
        let c = Constraints::percentage();
        assert!(c.check("RH", 0.0).is_ok());
        assert!(c.check("RH", 100.0).is_ok());
        assert!(c.check("RH", 100.1).is_err());
        assert!(c.check("RH", -5.0).is_err());
    }

    #[test]
    fn test_descriptor_lookup() {
        static VARS: &[VariableSpec] = &[
            VariableSpec::new(
                "A",
                "Area",
                QuantityKind::Area,
                Constraints::positive(),
                Some("A = R · P"),
            ),
            VariableSpec::new(
                "F2",
                "Second force",
                QuantityKind::Force,
                Constraints::none(),
                None,
            )
            .optional(),
        ];
        let descriptor = FormulaDescriptor {
            id: "test",
            name: "Test",
            expression: "A = R · P",
            variables: VARS,
        };
        assert!(descriptor.variable("A").unwrap().solvable());
        assert!(!descriptor.variable("F2").unwrap().solvable());
        assert_eq!(descriptor.required_count(), 1);
        assert_eq!(descriptor.solvable_variables(), vec!["A"]);
    }
}
