//! # Physical Constants
//!
//! Constants shared across formula modules. Values are fixed at the ones the
//! calculators were published with, so results stay reproducible; the gas-law
//! constant table lives in [`crate::formulas::gas`] because it is keyed to
//! the unit combination chosen there.

/// Standard gravity g0 in m/s²
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Universal gas constant in J/(mol·K), as used by the psychrometric
/// formulas. The ideal-gas-law table rounds this to 8.314; both values are
/// kept as published.
pub const GAS_CONSTANT_SI: f64 = 8.314462618;

/// Molar mass of water in g/mol
pub const WATER_MOLAR_MASS: f64 = 18.01528;

/// Magnus formula coefficients for saturation vapor pressure of water:
/// `es(T) = A * exp(B * T / (T + C))` with T in °C and es in Pa.
pub mod magnus {
    /// Scale coefficient in Pa
    pub const A: f64 = 611.2;
    /// Exponent numerator coefficient
    pub const B: f64 = 17.67;
    /// Exponent denominator offset in °C
    pub const C: f64 = 243.5;
}
