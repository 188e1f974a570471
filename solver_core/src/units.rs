//! # Unit Registry
//!
//! Named unit tables per physical quantity, each unit mapping to one
//! canonical base unit for its kind (meters for length, Kelvin for
//! temperature, and so on).
//!
//! ## Design Philosophy
//!
//! Every solve normalizes its inputs through this registry, computes in base
//! units, and converts the result back to the caller's display unit. The
//! tables are `'static` and immutable; a lazily built symbol index makes
//! lookup O(1). Symbols are unique only within their quantity kind ("g" is
//! gram under mass and standard-gravity under dimensionless).
//!
//! Most units are pure scale factors. Temperature is affine:
//! `to_base(v) = (v + offset) * factor`, so °F → K is `(v + 459.67) * 5/9`.
//!
//! ## Example
//!
//! ```rust
//! use solver_core::units::{to_base_unit, from_base_unit, QuantityKind};
//!
//! let meters = to_base_unit(QuantityKind::Length, "ft", 10.0).unwrap();
//! assert!((meters - 3.048).abs() < 1e-12);
//!
//! let kelvin = to_base_unit(QuantityKind::Temperature, "°C", 25.0).unwrap();
//! assert!((kelvin - 298.15).abs() < 1e-12);
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{SolveError, SolveResult};

// ============================================================================
// Quantity Kinds
// ============================================================================

/// A category of physical measurement. Units are interchangeable only within
/// their kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    Length,
    Mass,
    Force,
    Pressure,
    Area,
    Volume,
    Temperature,
    Angle,
    Velocity,
    Energy,
    Acceleration,
    AngularVelocity,
    AbsoluteHumidity,
    /// Pure numbers, counts and named-but-unconverted quantities
    /// (ratios, mol, teeth, %, g-force)
    Dimensionless,
}

impl QuantityKind {
    /// Display name for error messages and UI labels
    pub fn display_name(&self) -> &'static str {
        match self {
            QuantityKind::Length => "length",
            QuantityKind::Mass => "mass",
            QuantityKind::Force => "force",
            QuantityKind::Pressure => "pressure",
            QuantityKind::Area => "area",
            QuantityKind::Volume => "volume",
            QuantityKind::Temperature => "temperature",
            QuantityKind::Angle => "angle",
            QuantityKind::Velocity => "velocity",
            QuantityKind::Energy => "energy",
            QuantityKind::Acceleration => "acceleration",
            QuantityKind::AngularVelocity => "angular velocity",
            QuantityKind::AbsoluteHumidity => "absolute humidity",
            QuantityKind::Dimensionless => "dimensionless",
        }
    }

    /// All registered kinds, for iteration in tests and catalogue listings
    pub fn all() -> &'static [QuantityKind] {
        &[
            QuantityKind::Length,
            QuantityKind::Mass,
            QuantityKind::Force,
            QuantityKind::Pressure,
            QuantityKind::Area,
            QuantityKind::Volume,
            QuantityKind::Temperature,
            QuantityKind::Angle,
            QuantityKind::Velocity,
            QuantityKind::Energy,
            QuantityKind::Acceleration,
            QuantityKind::AngularVelocity,
            QuantityKind::AbsoluteHumidity,
            QuantityKind::Dimensionless,
        ]
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Unit Definition
// ============================================================================

/// A registered unit: a symbol plus an affine conversion against the base
/// unit of its quantity kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Symbol as shown in the UI (e.g. "kPa", "°F", "ft-lb")
    pub symbol: &'static str,
    /// Human-readable name (e.g. "Kilopascals")
    pub name: &'static str,
    /// Multiplicative factor against the base unit
    pub factor: f64,
    /// Pre-scale offset, nonzero only for temperature
    pub offset: f64,
}

impl Unit {
    /// Define a purely multiplicative unit
    pub const fn linear(symbol: &'static str, name: &'static str, factor: f64) -> Self {
        Unit {
            symbol,
            name,
            factor,
            offset: 0.0,
        }
    }

    /// Define an affine unit: `to_base(v) = (v + offset) * factor`
    pub const fn affine(
        symbol: &'static str,
        name: &'static str,
        factor: f64,
        offset: f64,
    ) -> Self {
        Unit {
            symbol,
            name,
            factor,
            offset,
        }
    }

    /// Convert a value in this unit to the base unit of its kind
    pub fn to_base(&self, value: f64) -> f64 {
        (value + self.offset) * self.factor
    }

    /// Convert a base-unit value to this unit
    pub fn from_base(&self, value: f64) -> f64 {
        value / self.factor - self.offset
    }
}

// ============================================================================
// Unit Tables
// ============================================================================
//
// First entry of each table is the base unit (factor 1, offset 0).

const LENGTH_UNITS: &[Unit] = &[
    Unit::linear("m", "Meters", 1.0),
    Unit::linear("cm", "Centimeters", 0.01),
    Unit::linear("mm", "Millimeters", 0.001),
    Unit::linear("km", "Kilometers", 1000.0),
    Unit::linear("ft", "Feet", 0.3048),
    Unit::linear("in", "Inches", 0.0254),
    Unit::linear("yd", "Yards", 0.9144),
    Unit::linear("mi", "Miles", 1609.34),
];

const MASS_UNITS: &[Unit] = &[
    Unit::linear("kg", "Kilograms", 1.0),
    Unit::linear("g", "Grams", 0.001),
    Unit::linear("lb", "Pounds", 0.453592),
    Unit::linear("oz", "Ounces", 0.0283495),
    // 1 grain = 64.7989 mg
    Unit::linear("grain", "Grains", 0.0000647989),
];

const FORCE_UNITS: &[Unit] = &[
    Unit::linear("N", "Newtons", 1.0),
    Unit::linear("kN", "Kilonewtons", 1000.0),
    Unit::linear("mN", "Millinewtons", 0.001),
    Unit::linear("lbf", "Pounds-force", 4.44822),
    Unit::linear("oz-f", "Ounce-force", 0.278014),
    Unit::linear("dyn", "Dynes", 0.00001),
    Unit::linear("kgf", "Kilogram-force", 9.80665),
];

const PRESSURE_UNITS: &[Unit] = &[
    Unit::linear("Pa", "Pascals", 1.0),
    Unit::linear("kPa", "Kilopascals", 1000.0),
    Unit::linear("MPa", "Megapascals", 1_000_000.0),
    Unit::linear("bar", "Bar", 100_000.0),
    Unit::linear("atm", "Atmospheres", 101_325.0),
    Unit::linear("psi", "Pounds per square inch", 6894.76),
    Unit::linear("torr", "Torr", 133.322),
    Unit::linear("mmHg", "Millimeters of mercury", 133.322),
];

const AREA_UNITS: &[Unit] = &[
    Unit::linear("m²", "Square meters", 1.0),
    Unit::linear("cm²", "Square centimeters", 0.0001),
    Unit::linear("mm²", "Square millimeters", 0.000001),
    Unit::linear("km²", "Square kilometers", 1_000_000.0),
    Unit::linear("ft²", "Square feet", 0.092903),
    Unit::linear("in²", "Square inches", 0.00064516),
    Unit::linear("yd²", "Square yards", 0.836127),
    Unit::linear("ac", "Acres", 4046.86),
];

const VOLUME_UNITS: &[Unit] = &[
    Unit::linear("m³", "Cubic meters", 1.0),
    Unit::linear("L", "Liters", 0.001),
    Unit::linear("mL", "Milliliters", 0.000001),
    Unit::linear("cm³", "Cubic centimeters", 0.000001),
    Unit::linear("ft³", "Cubic feet", 0.0283168),
    Unit::linear("in³", "Cubic inches", 0.0000163871),
    Unit::linear("gal", "US gallons", 0.00378541),
];

const TEMPERATURE_UNITS: &[Unit] = &[
    Unit::linear("K", "Kelvin", 1.0),
    Unit::affine("°C", "Celsius", 1.0, 273.15),
    Unit::affine("°F", "Fahrenheit", 5.0 / 9.0, 459.67),
];

const ANGLE_UNITS: &[Unit] = &[
    Unit::linear("rad", "Radians", 1.0),
    Unit::linear("deg", "Degrees", std::f64::consts::PI / 180.0),
];

const VELOCITY_UNITS: &[Unit] = &[
    Unit::linear("m/s", "Meters per second", 1.0),
    Unit::linear("km/h", "Kilometers per hour", 0.277778),
    Unit::linear("mph", "Miles per hour", 0.44704),
    Unit::linear("ft/s", "Feet per second", 0.3048),
    Unit::linear("fps", "Feet per second", 0.3048),
    Unit::linear("knots", "Knots", 0.514444),
];

const ENERGY_UNITS: &[Unit] = &[
    Unit::linear("J", "Joules", 1.0),
    Unit::linear("kJ", "Kilojoules", 1000.0),
    Unit::linear("cal", "Calories", 4.184),
    Unit::linear("kcal", "Kilocalories", 4184.0),
    Unit::linear("ft-lb", "Foot-pounds", 1.35582),
];

const ACCELERATION_UNITS: &[Unit] = &[
    Unit::linear("m/s²", "Meters per second squared", 1.0),
    Unit::linear("ft/s²", "Feet per second squared", 0.3048),
    Unit::linear("g", "Standard gravity", crate::constants::STANDARD_GRAVITY),
];

// Base unit is rpm; factors match the published gear-speed tables.
const ANGULAR_VELOCITY_UNITS: &[Unit] = &[
    Unit::linear("rpm", "Revolutions per minute", 1.0),
    Unit::linear("rps", "Revolutions per second", 60.0),
    Unit::linear("rad/s", "Radians per second", 9.5493),
    Unit::linear("deg/s", "Degrees per second", 0.166667),
];

const ABSOLUTE_HUMIDITY_UNITS: &[Unit] = &[
    Unit::linear("g/m³", "Grams per cubic meter", 1.0),
    Unit::linear("kg/m³", "Kilograms per cubic meter", 1000.0),
    // Sea-level approximation: 1 m³ of air ≈ 1.225 kg
    Unit::linear("g/kg", "Grams per kilogram of air", 1.0 / 1.225),
];

const DIMENSIONLESS_UNITS: &[Unit] = &[
    Unit::linear("", "Unitless", 1.0),
    Unit::linear("mol", "Moles", 1.0),
    Unit::linear("teeth", "Teeth", 1.0),
    Unit::linear("%", "Percent", 1.0),
    Unit::linear("g", "G-force", 1.0),
];

/// All units registered under a quantity kind (base unit first)
pub fn units_for(kind: QuantityKind) -> &'static [Unit] {
    match kind {
        QuantityKind::Length => LENGTH_UNITS,
        QuantityKind::Mass => MASS_UNITS,
        QuantityKind::Force => FORCE_UNITS,
        QuantityKind::Pressure => PRESSURE_UNITS,
        QuantityKind::Area => AREA_UNITS,
        QuantityKind::Volume => VOLUME_UNITS,
        QuantityKind::Temperature => TEMPERATURE_UNITS,
        QuantityKind::Angle => ANGLE_UNITS,
        QuantityKind::Velocity => VELOCITY_UNITS,
        QuantityKind::Energy => ENERGY_UNITS,
        QuantityKind::Acceleration => ACCELERATION_UNITS,
        QuantityKind::AngularVelocity => ANGULAR_VELOCITY_UNITS,
        QuantityKind::AbsoluteHumidity => ABSOLUTE_HUMIDITY_UNITS,
        QuantityKind::Dimensionless => DIMENSIONLESS_UNITS,
    }
}

/// The canonical base unit of a quantity kind
pub fn base_unit(kind: QuantityKind) -> &'static Unit {
    &units_for(kind)[0]
}

// Symbol index built once at first use
static UNIT_INDEX: Lazy<HashMap<(QuantityKind, &'static str), &'static Unit>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for &kind in QuantityKind::all() {
        for unit in units_for(kind) {
            index.insert((kind, unit.symbol), unit);
        }
    }
    index
});

/// Look up a unit by symbol within a quantity kind
pub fn find_unit(kind: QuantityKind, symbol: &str) -> SolveResult<&'static Unit> {
    UNIT_INDEX
        .get(&(kind, symbol))
        .copied()
        .ok_or_else(|| SolveError::unknown_unit(kind.display_name(), symbol))
}

/// Convert a value from the given unit to the base unit of the kind
pub fn to_base_unit(kind: QuantityKind, symbol: &str, value: f64) -> SolveResult<f64> {
    Ok(find_unit(kind, symbol)?.to_base(value))
}

/// Convert a base-unit value to the given display unit
pub fn from_base_unit(kind: QuantityKind, symbol: &str, value: f64) -> SolveResult<f64> {
    Ok(find_unit(kind, symbol)?.from_base(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_units() {
        // from_base(to_base(x)) ≈ x for every unit at representative magnitudes
        for &kind in QuantityKind::all() {
            for unit in units_for(kind) {
                for &x in &[0.0, 1.0, 0.0001, 12345.678, 1.0e9] {
                    let roundtrip = unit.from_base(unit.to_base(x));
                    let tolerance = 1e-9 * x.abs().max(1.0);
                    assert!(
                        (roundtrip - x).abs() < tolerance,
                        "roundtrip failed for {} {} ({}): {} -> {}",
                        kind,
                        unit.symbol,
                        unit.name,
                        x,
                        roundtrip
                    );
                }
            }
        }
    }

    #[test]
    fn test_base_units_are_identity() {
        for &kind in QuantityKind::all() {
            let base = base_unit(kind);
            assert_eq!(base.factor, 1.0, "base unit of {} must have factor 1", kind);
            assert_eq!(base.offset, 0.0, "base unit of {} must have offset 0", kind);
        }
    }

    #[test]
    fn test_length_conversions() {
        let m = to_base_unit(QuantityKind::Length, "ft", 1.0).unwrap();
        assert!((m - 0.3048).abs() < 1e-12);
        let mi = from_base_unit(QuantityKind::Length, "mi", 1609.34).unwrap();
        assert!((mi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_temperature_affine() {
        let k = to_base_unit(QuantityKind::Temperature, "°C", 0.0).unwrap();
        assert!((k - 273.15).abs() < 1e-12);

        let k = to_base_unit(QuantityKind::Temperature, "°F", 32.0).unwrap();
        assert!((k - 273.15).abs() < 1e-9);

        let k = to_base_unit(QuantityKind::Temperature, "°F", 212.0).unwrap();
        assert!((k - 373.15).abs() < 1e-9);

        let f = from_base_unit(QuantityKind::Temperature, "°F", 255.372222).unwrap();
        assert!((f - 0.0).abs() < 1e-5);
    }

    #[test]
    fn test_grain_mass() {
        // 150 grains ≈ 9.72 g, the bullet-energy worked example
        let kg = to_base_unit(QuantityKind::Mass, "grain", 150.0).unwrap();
        assert!((kg - 0.00971984).abs() < 1e-7);
    }

    #[test]
    fn test_symbol_namespacing() {
        // "g" is gram under mass, g-force under dimensionless
        let gram = find_unit(QuantityKind::Mass, "g").unwrap();
        assert_eq!(gram.factor, 0.001);
        let gforce = find_unit(QuantityKind::Dimensionless, "g").unwrap();
        assert_eq!(gforce.factor, 1.0);
    }

    #[test]
    fn test_unknown_unit() {
        let err = find_unit(QuantityKind::Pressure, "furlong").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_UNIT");
        assert!(err.to_string().contains("furlong"));
    }
}
