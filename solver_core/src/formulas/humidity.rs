//! # Absolute Humidity
//!
//! Psychrometric relation between absolute humidity, air temperature and
//! relative humidity:
//!
//! ```text
//! AH = (RH / 100) · es(T) · Mw / (R · T)
//! ```
//!
//! with `es(T) = 611.2 · exp(17.67·T / (T + 243.5))` (Magnus formula, T in
//! °C, es in Pa), Mw = 18.01528 g/mol and R = 8.314462618 J/(mol·K). AH is
//! carried in g/m³.
//!
//! Solving for AH or RH is closed-form. Solving for T has no closed-form
//! inverse (T appears both linearly and inside the Magnus exponential) and
//! uses a damped fixed-point iteration with a hard budget; the damping
//! factor, iteration cap, tolerance and clamp range are kept exactly as the
//! original calculator shipped them, since changing any of them changes
//! observable behavior at the boundary.

use crate::constants::{magnus, GAS_CONSTANT_SI, WATER_MOLAR_MASS};
use crate::errors::{SolveError, SolveResult};
use crate::format::format_value;
use crate::units::QuantityKind;

use super::descriptor::{Constraints, FormulaDescriptor, VariableSpec};
use super::{known, BaseSolution, BaseValues};

/// Iteration budget for the temperature inverse
pub const MAX_ITERATIONS: u32 = 100;
/// Convergence tolerance on |AH_calc - AH_target| in g/m³
const TOLERANCE: f64 = 0.001;
/// Fixed damping divisor of the correction step
const DAMPING: f64 = 0.05;
/// Temperature clamp range in °C
const CLAMP_MIN_C: f64 = -50.0;
const CLAMP_MAX_C: f64 = 100.0;
/// Initial guess in °C
const INITIAL_GUESS_C: f64 = 20.0;

static VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "AH",
        "Absolute humidity",
        QuantityKind::AbsoluteHumidity,
        Constraints::positive(),
        Some("AH = (RH/100) · es(T) · Mw / (R · T)"),
    ),
    VariableSpec::new(
        "T",
        "Temperature",
        QuantityKind::Temperature,
        Constraints::none(),
        Some("T solved iteratively from AH = (RH/100) · es(T) · Mw / (R · T)"),
    ),
    VariableSpec::new(
        "RH",
        "Relative humidity",
        QuantityKind::Dimensionless,
        Constraints::percentage(),
        Some("RH = AH · R · T / (es(T) · Mw) · 100"),
    ),
];

pub static ABSOLUTE_HUMIDITY: FormulaDescriptor = FormulaDescriptor {
    id: "absolute-humidity",
    name: "Absolute Humidity",
    expression: "AH = (RH/100) · es(T) · Mw / (R · T)",
    variables: VARIABLES,
};

/// Saturation vapor pressure of water in Pa (Magnus formula, T in °C)
pub fn saturation_vapor_pressure(temp_celsius: f64) -> f64 {
    magnus::A * (magnus::B * temp_celsius / (temp_celsius + magnus::C)).exp()
}

/// Forward evaluation: absolute humidity in g/m³ from T (°C) and RH (%)
fn absolute_humidity(temp_celsius: f64, rh_percent: f64) -> f64 {
    let temp_kelvin = temp_celsius + 273.15;
    let partial_pressure = (rh_percent / 100.0) * saturation_vapor_pressure(temp_celsius);
    partial_pressure * WATER_MOLAR_MASS / (GAS_CONSTANT_SI * temp_kelvin)
}

/// Iteratively find the temperature (°C) producing `ah_target` g/m³ at
/// `rh_percent`, returning the converged value and the iteration count.
///
/// Damped fixed-point step: `ΔT = (AH_calc - AH_target) / (AH_calc · 0.05)`,
/// T clamped to [-50, 100] °C after each step, at most 100 iterations.
pub(crate) fn solve_temperature_celsius(
    ah_target: f64,
    rh_percent: f64,
) -> SolveResult<(f64, u32)> {
    if rh_percent <= 0.0 {
        return Err(SolveError::domain(
            "T",
            "relative humidity must be positive to solve for temperature",
        ));
    }

    let mut temp_c = INITIAL_GUESS_C;
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        let calculated = absolute_humidity(temp_c, rh_percent);
        if (calculated - ah_target).abs() < TOLERANCE {
            return Ok((temp_c, iterations));
        }
        let delta_t = (calculated - ah_target) / (calculated * DAMPING);
        temp_c = (temp_c - delta_t).clamp(CLAMP_MIN_C, CLAMP_MAX_C);
        iterations += 1;
    }
    Err(SolveError::convergence("T", MAX_ITERATIONS))
}

/// Solve the psychrometric relation for `target`.
///
/// Base units: AH in g/m³, T in K, RH in %.
pub(crate) fn solve(values: &BaseValues, target: &str) -> SolveResult<BaseSolution> {
    match target {
        "AH" => {
            let temp_kelvin = known(values, "T")?;
            if temp_kelvin <= 0.0 {
                return Err(SolveError::domain(
                    "T",
                    "temperature must be greater than absolute zero",
                ));
            }
            let rh = known(values, "RH")?;
            let temp_c = temp_kelvin - 273.15;
            let es = saturation_vapor_pressure(temp_c);
            let partial = (rh / 100.0) * es;
            let ah = partial * WATER_MOLAR_MASS / (GAS_CONSTANT_SI * temp_kelvin);
            Ok(BaseSolution {
                value: ah,
                notes: vec![
                    format!("es(T) = {} Pa", format_value(es)),
                    format!("e = (RH/100) · es(T) = {} Pa", format_value(partial)),
                ],
            })
        }
        "RH" => {
            let temp_kelvin = known(values, "T")?;
            if temp_kelvin <= 0.0 {
                return Err(SolveError::domain(
                    "T",
                    "temperature must be greater than absolute zero",
                ));
            }
            let ah = known(values, "AH")?;
            let temp_c = temp_kelvin - 273.15;
            let es = saturation_vapor_pressure(temp_c);
            let rh = ah * GAS_CONSTANT_SI * temp_kelvin / (es * WATER_MOLAR_MASS) * 100.0;
            if rh > 100.0 {
                return Err(SolveError::domain(
                    "RH",
                    format!(
                        "calculated relative humidity {}% exceeds 100%",
                        format_value(rh)
                    ),
                ));
            }
            if rh < 0.0 {
                return Err(SolveError::domain(
                    "RH",
                    "calculated relative humidity is negative",
                ));
            }
            Ok(BaseSolution {
                value: rh,
                notes: vec![format!("es(T) = {} Pa", format_value(es))],
            })
        }
        "T" => {
            let ah = known(values, "AH")?;
            let rh = known(values, "RH")?;
            let (temp_c, iterations) = solve_temperature_celsius(ah, rh)?;
            Ok(BaseSolution {
                value: temp_c + 273.15,
                notes: vec![format!("converged after {} iterations", iterations)],
            })
        }
        other => Err(SolveError::internal(format!(
            "absolute humidity cannot solve for '{}'",
            other
        ))),
    }
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
    fn test_saturation_pressure_known_points() {
        // es(0 °C) = 611.2 Pa by construction
        assert!((saturation_vapor_pressure(0.0) - 611.2).abs() < 1e-9);
        // es(20 °C) ≈ 2338 Pa
        let es20 = saturation_vapor_pressure(20.0);
        assert!((es20 - 2338.0).abs() < 10.0, "es(20) = {}", es20);
    }

    #[test]
    fn test_absolute_humidity_at_room_conditions() {
        // 20 °C (293.15 K), 50% RH -> about 8.6 g/m³
        let values = base(&[("T", 293.15), ("RH", 50.0)]);
        let solution = solve(&values, "AH").unwrap();
        assert!(
            (solution.value - 8.6).abs() < 0.2,
            "AH = {}",
            solution.value
        );
        assert!(solution.notes[0].starts_with("es(T)"));
    }

    #[test]
    fn test_relative_humidity_inverse() {
        // Forward to AH, then back to RH
        let values = base(&[("T", 293.15), ("RH", 50.0)]);
        let ah = solve(&values, "AH").unwrap().value;

        let values = base(&[("T", 293.15), ("AH", ah)]);
        let rh = solve(&values, "RH").unwrap().value;
        assert!((rh - 50.0).abs() < 1e-9, "RH = {}", rh);
    }

    #[test]
    fn test_rh_above_100_rejected() {
        // Far more water than saturation allows at 20 °C
        let values = base(&[("T", 293.15), ("AH", 50.0)]);
        let err = solve(&values, "RH").unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN");
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_temperature_inverse_recovers_forward_value() {
        let ah = absolute_humidity(25.0, 60.0);
        let (temp_c, iterations) = solve_temperature_celsius(ah, 60.0).unwrap();
        assert!(iterations <= MAX_ITERATIONS);
        // Tolerance is on AH, not T; half a degree is well within it
        assert!((temp_c - 25.0).abs() < 0.5, "T = {} °C", temp_c);
    }

    #[test]
    fn test_temperature_solve_in_base_units() {
        let ah = absolute_humidity(25.0, 60.0);
        let values = base(&[("AH", ah), ("RH", 60.0)]);
        let solution = solve(&values, "T").unwrap();
        assert!((solution.value - 298.15).abs() < 0.5);
        assert!(solution.notes[0].contains("iterations"));
    }

    #[test]
    fn test_temperature_iteration_is_bounded() {
        // An unreachable target exhausts the budget and errors instead of
        // spinning; iteration count is capped at MAX_ITERATIONS by the loop
        let result = solve_temperature_celsius(10_000.0, 1.0);
        match result {
            Err(SolveError::Convergence { iterations, .. }) => {
                assert_eq!(iterations, MAX_ITERATIONS);
            }
            Err(other) => panic!("unexpected error: {:?}", other),
            Ok((temp_c, iterations)) => panic!(
                "unexpectedly converged at {} °C after {} iterations",
                temp_c, iterations
            ),
        }
    }

    #[test]
    fn test_zero_rh_cannot_invert_temperature() {
        let err = solve_temperature_celsius(5.0, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN");
    }
}
