//! # Solver Engine
//!
//! The generic solve pipeline shared by every formula in the catalogue.
//! Each solve is a pure function of its request:
//!
//! 1. input-count check (exactly the N-1 non-target variables supplied)
//! 2. per-field parse + constraint validation
//! 3. normalization to base units via the unit registry
//! 4. closed-form inverse, or the bounded iterative solver where none exists
//! 5. domain validation of the result
//! 6. conversion to the requested display unit
//! 7. derivation steps built from the same base-unit values used above
//!
//! Requests are stateless and independent; nothing here holds state between
//! calls, so concurrent solves need no coordination.
//!
//! ## Example
//!
//! ```rust
//! use solver_core::solver::{solve, SolveRequest};
//! use solver_core::formulas::Formula;
//!
//! let request = SolveRequest::new(Formula::Pressure, "P")
//!     .with_field("F", "100", "N")
//!     .with_field("A", "2", "m²");
//!
//! let solution = solve(&request).unwrap();
//! assert_eq!(solution.value, 50.0);
//! assert_eq!(solution.unit, "Pa");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{SolveError, SolveResult};
use crate::format;
use crate::formulas::{BaseValues, Formula, UnitChoices};
use crate::units;

// ============================================================================
// Request / Solution Types
// ============================================================================

/// One supplied field: the raw text the user typed plus the unit they chose.
///
/// ## JSON Example
///
/// ```json
/// { "raw": "22.4", "unit": "L" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInput {
    /// Raw text as entered, parsed during validation
    pub raw: String,
    /// Unit symbol, must be registered for the variable's quantity kind
    pub unit: String,
}

impl FieldInput {
    pub fn new(raw: impl Into<String>, unit: impl Into<String>) -> Self {
        FieldInput {
            raw: raw.into(),
            unit: unit.into(),
        }
    }
}

/// A single solve invocation. Constructed fresh per calculation, discarded
/// after rendering.
///
/// The variable to solve for is named explicitly in `solve_for`; `fields`
/// holds the supplied variables only. This replaces the "leave one text box
/// empty" convention with a first-class value.
///
/// ## JSON Example
///
/// ```json
/// {
///   "formula": "ideal-gas-law",
///   "solve_for": "n",
///   "result_unit": "mol",
///   "fields": {
///     "P": { "raw": "1", "unit": "atm" },
///     "V": { "raw": "22.4", "unit": "L" },
///     "T": { "raw": "273.15", "unit": "K" }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Which formula to solve
    pub formula: Formula,
    /// The variable to solve for
    pub solve_for: String,
    /// Display unit for the result; defaults to the base unit of the
    /// target's quantity kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_unit: Option<String>,
    /// Supplied variables (everything except `solve_for`)
    #[serde(default)]
    pub fields: BTreeMap<String, FieldInput>,
}

impl SolveRequest {
    /// Start a request solving `solve_for`, result in the base unit
    pub fn new(formula: Formula, solve_for: impl Into<String>) -> Self {
        SolveRequest {
            formula,
            solve_for: solve_for.into(),
            result_unit: None,
            fields: BTreeMap::new(),
        }
    }

    /// Add a supplied field (builder style, handy in tests and the CLI)
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        raw: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        self.fields.insert(name.into(), FieldInput::new(raw, unit));
        self
    }

    /// Request the result in a specific display unit
    pub fn with_result_unit(mut self, unit: impl Into<String>) -> Self {
        self.result_unit = Some(unit.into());
        self
    }
}

/// A successful solve: the value of the target variable in its display unit
/// plus the derivation trace.
///
/// ## JSON Example
///
/// ```json
/// {
///   "variable": "P",
///   "value": 50.0,
///   "unit": "Pa",
///   "steps": ["P = F / A", "F = 100 N, A = 2 m²", "P = 50 Pa"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Name of the solved variable
    pub variable: String,
    /// Result in `unit`
    pub value: f64,
    /// Display unit of the result
    pub unit: String,
    /// Human-readable derivation, one step per entry
    pub steps: Vec<String>,
}

// ============================================================================
// Solve Pipeline
// ============================================================================

/// Solve a request end to end.
///
/// Errors are returned as data (`SolveError`), never panicked, so the caller
/// can surface `error.to_string()` directly in place of a result panel.
pub fn solve(request: &SolveRequest) -> SolveResult<Solution> {
    let descriptor = request.formula.descriptor();

    // Step 1: exactly one variable - the target - may be missing
    let target_spec = descriptor.variable(&request.solve_for).ok_or_else(|| {
        SolveError::validation(
            &request.solve_for,
            "",
            format!("not a variable of formula '{}'", descriptor.id),
        )
    })?;
    if !target_spec.solvable() {
        return Err(SolveError::validation(
            &request.solve_for,
            "",
            "this variable is an input only and cannot be solved for",
        ));
    }
    check_input_count(request, descriptor)?;

    // Steps 2-3: parse, constrain, normalize
    let mut base_values = BaseValues::new();
    let mut unit_choices = UnitChoices::new();
    for spec in descriptor.variables {
        if spec.name == request.solve_for {
            continue;
        }
        let field = match request.fields.get(spec.name) {
            Some(field) => field,
            None => continue, // absent optionals default to zero downstream
        };
        let raw = field.raw.trim();
        if raw.is_empty() {
            return Err(SolveError::validation(
                spec.name,
                &field.raw,
                "value is empty; name the variable to solve in 'solve_for' instead",
            ));
        }
        let parsed: f64 = raw.parse().map_err(|_| {
            SolveError::validation(spec.name, raw, "not a valid number")
        })?;
        if !parsed.is_finite() {
            return Err(SolveError::validation(spec.name, raw, "not a finite number"));
        }
        spec.constraints.check(spec.name, parsed)?;
        let base = units::to_base_unit(spec.quantity, &field.unit, parsed)?;
        base_values.insert(spec.name.to_string(), base);
        unit_choices.insert(spec.name.to_string(), field.unit.clone());
    }

    // The target's display unit participates in unit-keyed constants (ideal
    // gas) and in the final conversion
    let base_symbol = units::base_unit(target_spec.quantity).symbol;
    let display_unit = request
        .result_unit
        .clone()
        .unwrap_or_else(|| base_symbol.to_string());
    units::find_unit(target_spec.quantity, &display_unit)?;
    unit_choices.insert(request.solve_for.clone(), display_unit.clone());

    // Steps 4-5: invert (domain checks live with each formula's math)
    let base_solution = request
        .formula
        .solve_base(&base_values, &unit_choices, &request.solve_for)?;
    if !base_solution.value.is_finite() {
        return Err(SolveError::domain(
            &request.solve_for,
            "computation did not produce a finite value",
        ));
    }

    // Step 6: convert to the display unit
    let display_value =
        units::from_base_unit(target_spec.quantity, &display_unit, base_solution.value)?;

    // Step 7: derivation from the very same base values
    let ordered_values: Vec<(String, f64)> = descriptor
        .variables
        .iter()
        .filter_map(|spec| {
            base_values
                .get(spec.name)
                .map(|value| (spec.name.to_string(), *value))
        })
        .collect();
    let solved_form = target_spec
        .solved_form
        .unwrap_or(descriptor.expression);
    let steps = format::derivation_steps(
        descriptor,
        &request.solve_for,
        solved_form,
        &ordered_values,
        base_solution.value,
        display_value,
        &display_unit,
        &base_solution.notes,
    );

    Ok(Solution {
        variable: request.solve_for.clone(),
        value: display_value,
        unit: display_unit,
        steps,
    })
}

/// Enforce the exactly-one-missing precondition: every required variable
/// except the target supplied, no unknown or extra fields.
fn check_input_count(
    request: &SolveRequest,
    descriptor: &crate::formulas::FormulaDescriptor,
) -> SolveResult<()> {
    let expected = descriptor
        .variables
        .iter()
        .filter(|spec| !spec.optional && spec.name != request.solve_for)
        .count();

    if request.fields.contains_key(request.solve_for.as_str()) {
        return Err(SolveError::input_count(expected, request.fields.len()));
    }
    for name in request.fields.keys() {
        if descriptor.variable(name).is_none() {
            return Err(SolveError::validation(
                name,
                "",
                format!("not a variable of formula '{}'", descriptor.id),
            ));
        }
    }

    let supplied_required = descriptor
        .variables
        .iter()
        .filter(|spec| !spec.optional && spec.name != request.solve_for)
        .filter(|spec| request.fields.contains_key(spec.name))
        .count();
    if supplied_required != expected {
        let supplied = request.fields.len();
        return Err(SolveError::input_count(expected, supplied));
    }
    Ok(())
}
