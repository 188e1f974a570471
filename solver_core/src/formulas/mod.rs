//! # Formula Catalogue
//!
//! Every formula the engine can solve, each expressed as a declarative
//! [`descriptor::FormulaDescriptor`] plus a pure solve function over
//! base-unit values. Having the catalogue in one place enables:
//! - one generic solver instead of one hand-rolled calculator per formula
//! - consistent validation, normalization and derivation formatting
//! - easy verification of each rearrangement against the formula statement
//!
//! ## Modules
//!
//! - [`descriptor`] - Descriptor, variable and constraint types
//! - [`gas`] - Ideal Gas Law with the unit-keyed gas constant table
//! - [`mechanics`] - G-force, kinetic energy, pressure, net force
//! - [`gears`] - Gear ratio by tooth count and by shaft speed
//! - [`hydraulics`] - Hydraulic radius of a flow channel
//! - [`humidity`] - Absolute humidity (Magnus formula, iterative inverse)

pub mod descriptor;
pub mod gas;
pub mod gears;
pub mod humidity;
pub mod hydraulics;
pub mod mechanics;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{SolveError, SolveResult};

pub use descriptor::{Constraints, FormulaDescriptor, VariableSpec};
pub use gas::GasConstant;

/// Variable name -> value in the base unit of its quantity kind
pub(crate) type BaseValues = BTreeMap<String, f64>;

/// Variable name -> chosen display unit symbol (including the target's
/// requested result unit)
pub(crate) type UnitChoices = BTreeMap<String, String>;

/// Outcome of a base-unit solve: the value of the target variable plus any
/// formula-specific derivation notes (net-force direction, saturation
/// pressure, iteration summary).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BaseSolution {
    pub value: f64,
    pub notes: Vec<String>,
}

impl BaseSolution {
    pub fn plain(value: f64) -> Self {
        BaseSolution {
            value,
            notes: Vec::new(),
        }
    }
}

/// Fetch a known base value; absence at this stage is an engine bug, not a
/// user error.
pub(crate) fn known(values: &BaseValues, name: &str) -> SolveResult<f64> {
    values
        .get(name)
        .copied()
        .ok_or_else(|| SolveError::internal(format!("missing normalized value for '{}'", name)))
}

/// Fetch an optional base value, defaulting to 0.0 when absent.
pub(crate) fn known_or_zero(values: &BaseValues, name: &str) -> f64 {
    values.get(name).copied().unwrap_or(0.0)
}

// ============================================================================
// Formula Enum
// ============================================================================

/// Type-safe identifier for every formula in the catalogue.
///
/// The serialized form equals the catalogue id (e.g. `"ideal-gas-law"`),
/// so a `SolveRequest` round-trips cleanly through JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Formula {
    IdealGasLaw,
    GForceLinear,
    GForceCircular,
    GearRatioTeeth,
    GearRatioSpeed,
    KineticEnergy,
    NetForceComponents,
    NetForceAngled,
    HydraulicRadius,
    Pressure,
    AbsoluteHumidity,
}

impl Formula {
    /// Every formula in catalogue order
    pub fn all() -> &'static [Formula] {
        &[
            Formula::IdealGasLaw,
            Formula::GForceLinear,
            Formula::GForceCircular,
            Formula::GearRatioTeeth,
            Formula::GearRatioSpeed,
            Formula::KineticEnergy,
            Formula::NetForceComponents,
            Formula::NetForceAngled,
            Formula::HydraulicRadius,
            Formula::Pressure,
            Formula::AbsoluteHumidity,
        ]
    }

    /// The declarative descriptor for this formula
    pub fn descriptor(&self) -> &'static FormulaDescriptor {
        match self {
            Formula::IdealGasLaw => &gas::IDEAL_GAS_LAW,
            Formula::GForceLinear => &mechanics::G_FORCE_LINEAR,
            Formula::GForceCircular => &mechanics::G_FORCE_CIRCULAR,
            Formula::GearRatioTeeth => &gears::GEAR_RATIO_TEETH,
            Formula::GearRatioSpeed => &gears::GEAR_RATIO_SPEED,
            Formula::KineticEnergy => &mechanics::KINETIC_ENERGY,
            Formula::NetForceComponents => &mechanics::NET_FORCE_COMPONENTS,
            Formula::NetForceAngled => &mechanics::NET_FORCE_ANGLED,
            Formula::HydraulicRadius => &hydraulics::HYDRAULIC_RADIUS,
            Formula::Pressure => &mechanics::PRESSURE,
            Formula::AbsoluteHumidity => &humidity::ABSOLUTE_HUMIDITY,
        }
    }

    /// Stable catalogue id
    pub fn id(&self) -> &'static str {
        self.descriptor().id
    }

    /// Look a formula up by its catalogue id
    pub fn from_id(id: &str) -> SolveResult<Formula> {
        Formula::all()
            .iter()
            .find(|f| f.id() == id)
            .copied()
            .ok_or_else(|| SolveError::unknown_formula(id))
    }

    /// Solve for `target` given base-unit values for the other variables.
    ///
    /// `units` carries the display unit chosen per variable; only the
    /// ideal-gas formula inspects it (to key its gas constant).
    pub(crate) fn solve_base(
        &self,
        values: &BaseValues,
        units: &UnitChoices,
        target: &str,
    ) -> SolveResult<BaseSolution> {
        match self {
            Formula::IdealGasLaw => gas::solve(values, units, target),
            Formula::GForceLinear => mechanics::solve_g_force_linear(values, target),
            Formula::GForceCircular => mechanics::solve_g_force_circular(values, target),
            Formula::GearRatioTeeth => gears::solve_teeth(values, target),
            Formula::GearRatioSpeed => gears::solve_speed(values, target),
            Formula::KineticEnergy => mechanics::solve_kinetic_energy(values, target),
            Formula::NetForceComponents => mechanics::solve_net_force_components(values, target),
            Formula::NetForceAngled => mechanics::solve_net_force_angled(values, target),
            Formula::HydraulicRadius => hydraulics::solve(values, target),
            Formula::Pressure => mechanics::solve_pressure(values, target),
            Formula::AbsoluteHumidity => humidity::solve(values, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_roundtrip() {
        for &formula in Formula::all() {
            assert_eq!(Formula::from_id(formula.id()).unwrap(), formula);
        }
    }

    #[test]
    fn test_unknown_id() {
        let err = Formula::from_id("perpetual-motion").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FORMULA");
    }

    #[test]
    fn test_serde_matches_ids() {
        for &formula in Formula::all() {
            let json = serde_json::to_string(&formula).unwrap();
            assert_eq!(json, format!("\"{}\"", formula.id()));
        }
    }

    #[test]
    fn test_descriptors_are_solvable() {
        // Every formula must expose at least one solvable variable, and
        // every solvable variable needs a rearranged form for derivations.
        for &formula in Formula::all() {
            let descriptor = formula.descriptor();
            assert!(
                !descriptor.solvable_variables().is_empty(),
                "{} has no solvable variables",
                descriptor.id
            );
        }
    }
}
