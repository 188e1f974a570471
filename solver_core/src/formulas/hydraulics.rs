//! # Hydraulic Radius
//!
//! `R = A / P` for an open-channel flow cross-section: flow area divided by
//! wetted perimeter. All three variables are solvable; the positive
//! constraints keep every division well-defined.

use crate::errors::{SolveError, SolveResult};
use crate::units::QuantityKind;

use super::descriptor::{Constraints, FormulaDescriptor, VariableSpec};
use super::{known, BaseSolution, BaseValues};

static VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "R",
        "Hydraulic radius",
        QuantityKind::Length,
        Constraints::positive(),
        Some("R = A / P"),
    ),
    VariableSpec::new(
        "A",
        "Flow area",
        QuantityKind::Area,
        Constraints::positive(),
        Some("A = R · P"),
    ),
    VariableSpec::new(
        "P",
        "Wetted perimeter",
        QuantityKind::Length,
        Constraints::positive(),
        Some("P = A / R"),
    ),
];

pub static HYDRAULIC_RADIUS: FormulaDescriptor = FormulaDescriptor {
    id: "hydraulic-radius",
    name: "Hydraulic Radius",
    expression: "R = A / P",
    variables: VARIABLES,
};

/// Solve `R = A / P`
pub(crate) fn solve(values: &BaseValues, target: &str) -> SolveResult<BaseSolution> {
    let value = match target {
        "R" => known(values, "A")? / known(values, "P")?,
        "A" => known(values, "R")? * known(values, "P")?,
        "P" => known(values, "A")? / known(values, "R")?,
        other => {
            return Err(SolveError::internal(format!(
                "hydraulic radius cannot solve for '{}'",
                other
            )))
        }
    };
    Ok(BaseSolution::plain(value))
}
