//! # solver_core - Physical Formula Solving Engine
//!
//! `solver_core` is the computational heart of Solvify, a catalogue of
//! physical formulas each solvable for any of its variables from the
//! remaining ones, with unit normalization and a step-by-step derivation
//! trace. All inputs and outputs are JSON-serializable, making it ideal for
//! embedding in web backends, CLIs, or AI assistants.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Every solve is a pure function of its request
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Declarative Catalogue**: Formulas are data (descriptors) plus a pure
//!   solve function; one generic engine handles validation, units and
//!   derivations for all of them
//!
//! ## Quick Start
//!
//! ```rust
//! use solver_core::{solve, Formula, SolveRequest};
//!
//! // How many moles in 22.4 L at 1 atm and 0 °C?
//! let request = SolveRequest::new(Formula::IdealGasLaw, "n")
//!     .with_field("P", "1", "atm")
//!     .with_field("V", "22.4", "L")
//!     .with_field("T", "0", "°C")
//!     .with_result_unit("mol");
//!
//! let solution = solve(&request).unwrap();
//! assert!((solution.value - 1.0).abs() < 0.01);
//! for step in &solution.steps {
//!     println!("{}", step);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`formulas`] - The formula catalogue (descriptors + per-formula math)
//! - [`solver`] - The generic solve pipeline
//! - [`units`] - Unit registry and base-unit normalization
//! - [`format`] - Display formatting and derivation assembly
//! - [`errors`] - Structured error types
//! - [`constants`] - Shared physical constants

pub mod constants;
pub mod errors;
pub mod format;
pub mod formulas;
pub mod solver;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{SolveError, SolveResult};
pub use formulas::{Formula, FormulaDescriptor, VariableSpec};
pub use solver::{solve, FieldInput, SolveRequest, Solution};
pub use units::QuantityKind;
