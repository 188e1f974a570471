//! # Mechanics Formulas
//!
//! The classical-mechanics members of the catalogue:
//!
//! - G-force, linear (`G = a / g₀`) and circular (`G = v² / (r·g₀)`)
//! - Kinetic energy (`E = ½·m·v²`), the bullet-energy calculator
//! - Pressure (`P = F / A`)
//! - Net force from components (`F_net = √(Fx² + Fy²)`) and from one or two
//!   angled forces
//!
//! All solve functions operate on base-unit values (N, m, m/s, m/s², J, Pa,
//! rad) and guard the handful of divisions and square roots that their
//! constraints cannot rule out.

use crate::constants::STANDARD_GRAVITY;
use crate::errors::{SolveError, SolveResult};
use crate::format::format_value;
use crate::units::QuantityKind;

use super::descriptor::{Constraints, FormulaDescriptor, VariableSpec};
use super::{known, known_or_zero, BaseSolution, BaseValues};

// ============================================================================
// G-Force (linear)
// ============================================================================

static G_FORCE_LINEAR_VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "G",
        "G-force",
        QuantityKind::Dimensionless,
        Constraints::positive(),
        Some("G = a / g₀"),
    ),
    VariableSpec::new(
        "a",
        "Acceleration",
        QuantityKind::Acceleration,
        Constraints::positive(),
        Some("a = G · g₀"),
    ),
];

pub static G_FORCE_LINEAR: FormulaDescriptor = FormulaDescriptor {
    id: "g-force-linear",
    name: "G-Force (linear acceleration)",
    expression: "G = a / g₀",
    variables: G_FORCE_LINEAR_VARIABLES,
};

/// Solve `G = a / g₀` with g₀ = 9.80665 m/s²
pub(crate) fn solve_g_force_linear(values: &BaseValues, target: &str) -> SolveResult<BaseSolution> {
    let value = match target {
        "G" => known(values, "a")? / STANDARD_GRAVITY,
        "a" => known(values, "G")? * STANDARD_GRAVITY,
        other => {
            return Err(SolveError::internal(format!(
                "linear g-force cannot solve for '{}'",
                other
            )))
        }
    };
    Ok(BaseSolution::plain(value))
}

// ============================================================================
// G-Force (circular)
// ============================================================================

static G_FORCE_CIRCULAR_VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "G",
        "G-force",
        QuantityKind::Dimensionless,
        Constraints::positive(),
        Some("G = v² / (r · g₀)"),
    ),
    VariableSpec::new(
        "v",
        "Velocity",
        QuantityKind::Velocity,
        Constraints::positive(),
        Some("v = √(G · r · g₀)"),
    ),
    VariableSpec::new(
        "r",
        "Radius",
        QuantityKind::Length,
        Constraints::positive(),
        Some("r = v² / (G · g₀)"),
    ),
];

pub static G_FORCE_CIRCULAR: FormulaDescriptor = FormulaDescriptor {
    id: "g-force-circular",
    name: "G-Force (circular motion)",
    expression: "G = v² / (r · g₀)",
    variables: G_FORCE_CIRCULAR_VARIABLES,
};

/// Solve `G = v² / (r·g₀)`.
///
/// The radicand of the v-inverse cannot go negative with the positive
/// constraints in force, but the guard stays anyway.
pub(crate) fn solve_g_force_circular(
    values: &BaseValues,
    target: &str,
) -> SolveResult<BaseSolution> {
    let value = match target {
        "G" => {
            let v = known(values, "v")?;
            let r = known(values, "r")?;
            v * v / (r * STANDARD_GRAVITY)
        }
        "v" => {
            let g = known(values, "G")?;
            let r = known(values, "r")?;
            let radicand = g * r * STANDARD_GRAVITY;
            if radicand < 0.0 {
                return Err(SolveError::domain("v", "square root of a negative value"));
            }
            radicand.sqrt()
        }
        "r" => {
            let g = known(values, "G")?;
            let v = known(values, "v")?;
            v * v / (g * STANDARD_GRAVITY)
        }
        other => {
            return Err(SolveError::internal(format!(
                "circular g-force cannot solve for '{}'",
                other
            )))
        }
    };
    Ok(BaseSolution::plain(value))
}

// ============================================================================
// Kinetic Energy
// ============================================================================

static KINETIC_ENERGY_VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "E",
        "Kinetic energy",
        QuantityKind::Energy,
        Constraints::positive(),
        Some("E = ½ · m · v²"),
    ),
    VariableSpec::new(
        "m",
        "Mass",
        QuantityKind::Mass,
        Constraints::positive(),
        Some("m = 2·E / v²"),
    ),
    VariableSpec::new(
        "v",
        "Velocity",
        QuantityKind::Velocity,
        Constraints::positive(),
        Some("v = √(2·E / m)"),
    ),
];

pub static KINETIC_ENERGY: FormulaDescriptor = FormulaDescriptor {
    id: "kinetic-energy",
    name: "Kinetic Energy",
    expression: "E = ½ · m · v²",
    variables: KINETIC_ENERGY_VARIABLES,
};

/// Solve `E = ½·m·v²`
pub(crate) fn solve_kinetic_energy(values: &BaseValues, target: &str) -> SolveResult<BaseSolution> {
    let value = match target {
        "E" => {
            let m = known(values, "m")?;
            let v = known(values, "v")?;
            0.5 * m * v * v
        }
        "m" => {
            let e = known(values, "E")?;
            let v = known(values, "v")?;
            if v == 0.0 {
                return Err(SolveError::domain("m", "velocity cannot be zero"));
            }
            2.0 * e / (v * v)
        }
        "v" => {
            let e = known(values, "E")?;
            let m = known(values, "m")?;
            if m == 0.0 {
                return Err(SolveError::domain("v", "mass cannot be zero"));
            }
            if e < 0.0 {
                return Err(SolveError::domain("v", "energy cannot be negative"));
            }
            (2.0 * e / m).sqrt()
        }
        other => {
            return Err(SolveError::internal(format!(
                "kinetic energy cannot solve for '{}'",
                other
            )))
        }
    };
    Ok(BaseSolution::plain(value))
}

// ============================================================================
// Pressure
// ============================================================================

static PRESSURE_VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "P",
        "Pressure",
        QuantityKind::Pressure,
        Constraints::positive(),
        Some("P = F / A"),
    ),
    VariableSpec::new(
        "F",
        "Force",
        QuantityKind::Force,
        Constraints::positive(),
        Some("F = P · A"),
    ),
    VariableSpec::new(
        "A",
        "Area",
        QuantityKind::Area,
        Constraints::positive(),
        Some("A = F / P"),
    ),
];

pub static PRESSURE: FormulaDescriptor = FormulaDescriptor {
    id: "pressure",
    name: "Pressure",
    expression: "P = F / A",
    variables: PRESSURE_VARIABLES,
};

/// Solve `P = F / A`
pub(crate) fn solve_pressure(values: &BaseValues, target: &str) -> SolveResult<BaseSolution> {
    let value = match target {
        "P" => known(values, "F")? / known(values, "A")?,
        "F" => known(values, "P")? * known(values, "A")?,
        "A" => known(values, "F")? / known(values, "P")?,
        other => {
            return Err(SolveError::internal(format!(
                "pressure cannot solve for '{}'",
                other
            )))
        }
    };
    Ok(BaseSolution::plain(value))
}

// ============================================================================
// Net Force (components)
// ============================================================================

static NET_FORCE_COMPONENTS_VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "Fx",
        "Force along x",
        QuantityKind::Force,
        Constraints::none(),
        None,
    ),
    VariableSpec::new(
        "Fy",
        "Force along y",
        QuantityKind::Force,
        Constraints::none(),
        None,
    ),
    VariableSpec::new(
        "F_net",
        "Net force",
        QuantityKind::Force,
        Constraints::non_negative(),
        Some("F_net = √(Fx² + Fy²)"),
    ),
];

pub static NET_FORCE_COMPONENTS: FormulaDescriptor = FormulaDescriptor {
    id: "net-force-components",
    name: "Net Force (components)",
    expression: "F_net = √(Fx² + Fy²)",
    variables: NET_FORCE_COMPONENTS_VARIABLES,
};

/// Direction note shared by both net-force formulas
fn direction_note(fx: f64, fy: f64) -> String {
    let theta_deg = fy.atan2(fx).to_degrees();
    format!("θ = atan2(Fy, Fx) = {} deg", format_value(theta_deg))
}

/// Evaluate `F_net = √(Fx² + Fy²)`; direction is derived, never an input.
pub(crate) fn solve_net_force_components(
    values: &BaseValues,
    target: &str,
) -> SolveResult<BaseSolution> {
    if target != "F_net" {
        return Err(SolveError::internal(format!(
            "net force cannot solve for '{}'",
            target
        )));
    }
    let fx = known(values, "Fx")?;
    let fy = known(values, "Fy")?;
    let magnitude = (fx * fx + fy * fy).sqrt();
    Ok(BaseSolution {
        value: magnitude,
        notes: vec![direction_note(fx, fy)],
    })
}

// ============================================================================
// Net Force (angled, 1-2 forces)
// ============================================================================

static NET_FORCE_ANGLED_VARIABLES: &[VariableSpec] = &[
    VariableSpec::new(
        "F1",
        "First force",
        QuantityKind::Force,
        Constraints::non_negative(),
        None,
    ),
    VariableSpec::new(
        "θ1",
        "First force angle",
        QuantityKind::Angle,
        Constraints::none(),
        None,
    ),
    VariableSpec::new(
        "F2",
        "Second force",
        QuantityKind::Force,
        Constraints::non_negative(),
        None,
    )
    .optional(),
    VariableSpec::new(
        "θ2",
        "Second force angle",
        QuantityKind::Angle,
        Constraints::none(),
        None,
    )
    .optional(),
    VariableSpec::new(
        "F_net",
        "Net force",
        QuantityKind::Force,
        Constraints::non_negative(),
        Some("F_net = √((ΣF·cos θ)² + (ΣF·sin θ)²)"),
    ),
];

pub static NET_FORCE_ANGLED: FormulaDescriptor = FormulaDescriptor {
    id: "net-force-angled",
    name: "Net Force (angled forces)",
    expression: "F_net = √((ΣF·cos θ)² + (ΣF·sin θ)²)",
    variables: NET_FORCE_ANGLED_VARIABLES,
};

/// Sum one or two angled forces componentwise, then take magnitude and
/// direction. Absent optional pairs contribute nothing.
pub(crate) fn solve_net_force_angled(
    values: &BaseValues,
    target: &str,
) -> SolveResult<BaseSolution> {
    if target != "F_net" {
        return Err(SolveError::internal(format!(
            "net force cannot solve for '{}'",
            target
        )));
    }
    let f1 = known(values, "F1")?;
    let theta1 = known(values, "θ1")?;
    let f2 = known_or_zero(values, "F2");
    let theta2 = known_or_zero(values, "θ2");

    let fx = f1 * theta1.cos() + f2 * theta2.cos();
    let fy = f1 * theta1.sin() + f2 * theta2.sin();
    let magnitude = (fx * fx + fy * fy).sqrt();

    Ok(BaseSolution {
        value: magnitude,
        notes: vec![
            format!(
                "ΣFx = {} N, ΣFy = {} N",
                format_value(fx),
                format_value(fy)
            ),
            direction_note(fx, fy),
        ],
    })
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
    fn test_g_force_circular_worked_example() {
        // v = 30 m/s, r = 90 m -> G = 900 / (90 × 9.80665) = 1.0197
        let values = base(&[("v", 30.0), ("r", 90.0)]);
        let g = solve_g_force_circular(&values, "G").unwrap().value;
        assert!((g - 1.019716).abs() < 1e-5, "G = {}", g);
    }

    #[test]
    fn test_g_force_circular_inverse_consistency() {
        let values = base(&[("v", 30.0), ("r", 90.0)]);
        let g = solve_g_force_circular(&values, "G").unwrap().value;

        let values = base(&[("G", g), ("r", 90.0)]);
        let v = solve_g_force_circular(&values, "v").unwrap().value;
        assert!((v - 30.0).abs() < 1e-9);

        let values = base(&[("G", g), ("v", 30.0)]);
        let r = solve_g_force_circular(&values, "r").unwrap().value;
        assert!((r - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_g_force_linear_roundtrip() {
        let values = base(&[("G", 3.0)]);
        let a = solve_g_force_linear(&values, "a").unwrap().value;
        assert!((a - 29.41995).abs() < 1e-9);

        let values = base(&[("a", a)]);
        let g = solve_g_force_linear(&values, "G").unwrap().value;
        assert!((g - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_kinetic_energy_worked_example() {
        // 150 grains ≈ 0.00971984 kg at 823 m/s -> ≈ 3292 J
        let values = base(&[("m", 0.00971984), ("v", 823.0)]);
        let e = solve_kinetic_energy(&values, "E").unwrap().value;
        assert!((e - 3291.8).abs() < 1.0, "E = {}", e);
    }

    #[test]
    fn test_kinetic_energy_inverses() {
        let values = base(&[("E", 3291.8), ("v", 823.0)]);
        let m = solve_kinetic_energy(&values, "m").unwrap().value;
        assert!((m - 0.00972).abs() < 1e-5);

        let values = base(&[("E", 3291.8), ("m", 0.00972)]);
        let v = solve_kinetic_energy(&values, "v").unwrap().value;
        assert!((v - 823.0).abs() < 0.1);
    }

    #[test]
    fn test_pressure_worked_example() {
        // F = 100 N, A = 2 m² -> P = 50 Pa exactly
        let values = base(&[("F", 100.0), ("A", 2.0)]);
        let p = solve_pressure(&values, "P").unwrap().value;
        assert_eq!(p, 50.0);
    }

    #[test]
    fn test_pressure_inverses() {
        let values = base(&[("P", 50.0), ("A", 2.0)]);
        assert_eq!(solve_pressure(&values, "F").unwrap().value, 100.0);

        let values = base(&[("P", 50.0), ("F", 100.0)]);
        assert_eq!(solve_pressure(&values, "A").unwrap().value, 2.0);
    }

    #[test]
    fn test_net_force_components() {
        let values = base(&[("Fx", 3.0), ("Fy", 4.0)]);
        let solution = solve_net_force_components(&values, "F_net").unwrap();
        assert!((solution.value - 5.0).abs() < 1e-12);
        assert!(solution.notes[0].contains("53.1301"));
    }

    #[test]
    fn test_net_force_vertical_direction() {
        // Fx = 0 must still give a well-defined ±90° direction
        let values = base(&[("Fx", 0.0), ("Fy", 10.0)]);
        let solution = solve_net_force_components(&values, "F_net").unwrap();
        assert!((solution.value - 10.0).abs() < 1e-12);
        assert!(solution.notes[0].contains("90"));
    }

    #[test]
    fn test_net_force_angled_single_force() {
        // One force at 0 rad is its own net
        let values = base(&[("F1", 10.0), ("θ1", 0.0)]);
        let solution = solve_net_force_angled(&values, "F_net").unwrap();
        assert!((solution.value - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_net_force_angled_opposing_forces() {
        // Equal and opposite forces cancel
        let values = base(&[
            ("F1", 10.0),
            ("θ1", 0.0),
            ("F2", 10.0),
            ("θ2", std::f64::consts::PI),
        ]);
        let solution = solve_net_force_angled(&values, "F_net").unwrap();
        assert!(solution.value.abs() < 1e-9);
    }

    #[test]
    fn test_net_force_perpendicular_pair() {
        let values = base(&[
            ("F1", 3.0),
            ("θ1", 0.0),
            ("F2", 4.0),
            ("θ2", std::f64::consts::FRAC_PI_2),
        ]);
        let solution = solve_net_force_angled(&values, "F_net").unwrap();
        assert!((solution.value - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_kinetic_energy_guards() {
        let values = base(&[("E", 100.0), ("v", 0.0)]);
        let err = solve_kinetic_energy(&values, "m").unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN");
    }
}
