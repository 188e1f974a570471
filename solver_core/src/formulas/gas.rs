//! # Ideal Gas Law
//!
//! `P·V = n·R·T`, solvable for any one of the four variables given the other
//! three. The gas constant R is keyed to the pressure/volume unit
//! combination the caller chose, matching common chemistry practice:
//! atm + L works in 0.0821 L·atm/(mol·K), torr + L in 62.364 L·torr/(mol·K),
//! anything else in SI.
//!
//! Temperature is always handled in Kelvin and must stay above absolute
//! zero, whether supplied or solved.

use crate::errors::{SolveError, SolveResult};
use crate::format::format_value;

use super::descriptor::{Constraints, FormulaDescriptor, VariableSpec};
use super::{known, BaseSolution, BaseValues, UnitChoices};
use crate::units::QuantityKind;

// ============================================================================
// Gas Constant Table
// ============================================================================

/// The gas constant in one unit system, together with the scale of its
/// native pressure/volume units against SI base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasConstant {
    /// 8.314 J/(mol·K) - SI units (Pa, m³)
    Si,
    /// 0.0821 L·atm/(mol·K) - common chemistry units
    LitreAtm,
    /// 62.364 L·torr/(mol·K)
    LitreTorr,
    /// 8.314 m³·Pa/(mol·K) - numerically identical to SI
    CubicMetrePascal,
    /// 1.987 cal/(mol·K)
    Calorie,
}

impl GasConstant {
    /// Numeric value of R in this unit system
    pub fn value(&self) -> f64 {
        match self {
            GasConstant::Si => 8.314,
            GasConstant::LitreAtm => 0.0821,
            GasConstant::LitreTorr => 62.364,
            GasConstant::CubicMetrePascal => 8.314,
            GasConstant::Calorie => 1.987,
        }
    }

    /// Unit label for display
    pub fn label(&self) -> &'static str {
        match self {
            GasConstant::Si => "J/(mol·K)",
            GasConstant::LitreAtm => "L·atm/(mol·K)",
            GasConstant::LitreTorr => "L·torr/(mol·K)",
            GasConstant::CubicMetrePascal => "m³·Pa/(mol·K)",
            GasConstant::Calorie => "cal/(mol·K)",
        }
    }

    /// Pascals per native pressure unit
    fn pressure_scale(&self) -> f64 {
        match self {
            GasConstant::Si | GasConstant::CubicMetrePascal => 1.0,
            GasConstant::LitreAtm => 101_325.0,
            GasConstant::LitreTorr => 133.322,
            // R in cal absorbs the joule-to-calorie scale on the PV side
            GasConstant::Calorie => 4.184,
        }
    }

    /// Cubic meters per native volume unit
    fn volume_scale(&self) -> f64 {
        match self {
            GasConstant::Si | GasConstant::CubicMetrePascal | GasConstant::Calorie => 1.0,
            GasConstant::LitreAtm | GasConstant::LitreTorr => 0.001,
        }
    }

    /// Pick the constant matching the chosen pressure and volume units
    pub fn for_units(pressure_unit: &str, volume_unit: &str) -> GasConstant {
        match (pressure_unit, volume_unit) {
            ("atm", "L") => GasConstant::LitreAtm,
            ("torr", "L") => GasConstant::LitreTorr,
            _ => GasConstant::Si,
        }
    }
}

// ============================================================================
// Descriptor
// ============================================================================

static VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "P",
        "Pressure",
        QuantityKind::Pressure,
        Constraints::positive(),
        Some("P = n·R·T / V"),
    ),
    VariableSpec::new(
        "V",
        "Volume",
        QuantityKind::Volume,
        Constraints::positive(),
        Some("V = n·R·T / P"),
    ),
    VariableSpec::new(
        "n",
        "Number of moles",
        QuantityKind::Dimensionless,
        Constraints::positive(),
        Some("n = P·V / (R·T)"),
    ),
    VariableSpec::new(
        "T",
        "Temperature",
        QuantityKind::Temperature,
        Constraints::none(),
        Some("T = P·V / (n·R)"),
    ),
];

pub static IDEAL_GAS_LAW: FormulaDescriptor = FormulaDescriptor {
    id: "ideal-gas-law",
    name: "Ideal Gas Law",
    expression: "P·V = n·R·T",
    variables: VARIABLES,
};

// ============================================================================
// Solve
// ============================================================================

/// Solve the ideal gas law for `target` given SI base values of the others.
///
/// Computation runs in the native units of the keyed gas constant and the
/// result is scaled back to SI base, so the chosen R is the one that
/// actually appears in the arithmetic (and in the derivation note).
pub(crate) fn solve(
    values: &BaseValues,
    units: &UnitChoices,
    target: &str,
) -> SolveResult<BaseSolution> {
    let pressure_unit = units.get("P").map(String::as_str).unwrap_or("Pa");
    let volume_unit = units.get("V").map(String::as_str).unwrap_or("m³");
    let r = GasConstant::for_units(pressure_unit, volume_unit);

    // Supplied temperature must be above absolute zero
    if let Some(&t_kelvin) = values.get("T") {
        if t_kelvin <= 0.0 {
            return Err(SolveError::domain(
                "T",
                "temperature must be greater than absolute zero (0 K, -273.15 °C, -459.67 °F)",
            ));
        }
    }

    let value = match target {
        "P" => {
            let v = known(values, "V")? / r.volume_scale();
            let n = known(values, "n")?;
            let t = known(values, "T")?;
            let p_native = n * r.value() * t / v;
            p_native * r.pressure_scale()
        }
        "V" => {
            let p = known(values, "P")? / r.pressure_scale();
            let n = known(values, "n")?;
            let t = known(values, "T")?;
            let v_native = n * r.value() * t / p;
            v_native * r.volume_scale()
        }
        "n" => {
            let p = known(values, "P")? / r.pressure_scale();
            let v = known(values, "V")? / r.volume_scale();
            let t = known(values, "T")?;
            let n = p * v / (r.value() * t);
            if n <= 0.0 {
                return Err(SolveError::domain("n", "calculated moles must be positive"));
            }
            n
        }
        "T" => {
            let p = known(values, "P")? / r.pressure_scale();
            let v = known(values, "V")? / r.volume_scale();
            let n = known(values, "n")?;
            let t = p * v / (n * r.value());
            if t <= 0.0 {
                return Err(SolveError::domain(
                    "T",
                    "calculated temperature must be greater than absolute zero",
                ));
            }
            t
        }
        other => {
            return Err(SolveError::internal(format!(
                "ideal gas law cannot solve for '{}'",
                other
            )))
        }
    };

    Ok(BaseSolution {
        value,
        notes: vec![format!("R = {} {}", format_value(r.value()), r.label())],
    })
}
