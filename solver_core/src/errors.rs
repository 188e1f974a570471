//! # Error Types
//!
//! Structured error types for solver_core. Every failure mode of a solve is
//! returned as data, never thrown across the caller boundary, so a UI (or an
//! LLM) can handle each case programmatically.
//!
//! ## Example
//!
//! ```rust
//! use solver_core::errors::{SolveError, SolveResult};
//!
//! fn validate_radius(radius_m: f64) -> SolveResult<()> {
//!     if radius_m <= 0.0 {
//!         return Err(SolveError::validation(
//!             "radius",
//!             radius_m.to_string(),
//!             "Radius must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for solver_core operations
pub type SolveResult<T> = Result<T, SolveError>;

/// Structured error type for solve operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by the consuming view layer.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SolveError {
    /// Wrong number of fields supplied (not exactly N-1 filled)
    #[error("Expected exactly {expected} supplied variables (leave one to solve for), got {supplied}")]
    InputCount { expected: usize, supplied: usize },

    /// A supplied field failed to parse or violates its declared constraints
    #[error("Invalid input for '{field}': {value} - {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    /// A descriptor references a unit that is not registered for the quantity
    #[error("Unknown unit '{symbol}' for quantity {quantity}")]
    UnknownUnit { quantity: String, symbol: String },

    /// Mathematically valid computation produced a physically invalid result
    #[error("Result out of domain for '{variable}': {reason}")]
    Domain { variable: String, reason: String },

    /// Iterative solver exceeded its iteration budget without converging
    #[error("Could not find a solution for '{variable}' within {iterations} iterations; check inputs")]
    Convergence { variable: String, iterations: u32 },

    /// Formula id not present in the catalogue
    #[error("Unknown formula: {id}")]
    UnknownFormula { id: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SolveError {
    /// Create an InputCount error
    pub fn input_count(expected: usize, supplied: usize) -> Self {
        SolveError::InputCount { expected, supplied }
    }

    /// Create a Validation error
    pub fn validation(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SolveError::Validation {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(quantity: impl Into<String>, symbol: impl Into<String>) -> Self {
        SolveError::UnknownUnit {
            quantity: quantity.into(),
            symbol: symbol.into(),
        }
    }

    /// Create a Domain error
    pub fn domain(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        SolveError::Domain {
            variable: variable.into(),
            reason: reason.into(),
        }
    }

    /// Create a Convergence error
    pub fn convergence(variable: impl Into<String>, iterations: u32) -> Self {
        SolveError::Convergence {
            variable: variable.into(),
            iterations,
        }
    }

    /// Create an UnknownFormula error
    pub fn unknown_formula(id: impl Into<String>) -> Self {
        SolveError::UnknownFormula { id: id.into() }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        SolveError::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable by the user adjusting inputs.
    ///
    /// UnknownUnit and Internal indicate a misconfigured descriptor, not a
    /// bad input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            SolveError::UnknownUnit { .. } | SolveError::Internal { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SolveError::InputCount { .. } => "INPUT_COUNT",
            SolveError::Validation { .. } => "VALIDATION",
            SolveError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            SolveError::Domain { .. } => "DOMAIN",
            SolveError::Convergence { .. } => "CONVERGENCE",
            SolveError::UnknownFormula { .. } => "UNKNOWN_FORMULA",
            SolveError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SolveError::validation("mass", "-5.0", "Mass must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SolveError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SolveError::input_count(3, 1).error_code(), "INPUT_COUNT");
        assert_eq!(
            SolveError::unknown_formula("frobnicate").error_code(),
            "UNKNOWN_FORMULA"
        );
        assert_eq!(SolveError::convergence("T", 100).error_code(), "CONVERGENCE");
    }

    #[test]
    fn test_recoverability() {
        assert!(SolveError::domain("RH", "exceeds 100%").is_recoverable());
        assert!(SolveError::input_count(3, 4).is_recoverable());
        assert!(!SolveError::unknown_unit("pressure", "furlong").is_recoverable());
        assert!(!SolveError::internal("oops").is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let error = SolveError::convergence("temperature", 100);
        let message = error.to_string();
        assert!(message.contains("check inputs"));
        assert!(message.contains("100"));
    }
}
