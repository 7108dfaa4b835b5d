//! # rod_core - Hydraulic Piston Rod Buckling Engine
//!
//! `rod_core` computes the buckling safety of a hydraulic cylinder's piston
//! rod from its geometry, material and mounting. All inputs and outputs are
//! JSON-serializable so the same engine serves the CLI, files and scripts.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Validated once**: A [`RodConfiguration`] can only exist if every input is sane
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Traceable**: Every formula is registered and can be tracked per evaluation
//!
//! ## Quick Start
//!
//! ```rust
//! use rod_core::calculations::{evaluate, RodConfiguration, RodInput};
//!
//! let config = RodConfiguration::new(RodInput::reference())?;
//! let result = evaluate(&config);
//!
//! println!("Fk = {:.1} kN, S = {:.2}", result.buckling_force, result.existing_safety_factor);
//! println!("{}", result.regime.message());
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! # Ok::<(), rod_core::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Configuration, mounting conditions and the buckling pipeline
//! - [`equations`] - Formulas and the equation registry
//! - [`report`] - Result rows with units and display precision
//! - [`materials`] - Rod steel constants
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Loading and atomically saving configuration files

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    calculate, evaluate, evaluate_traced, BucklingCalculator, BucklingResult, MountingCondition, PressureUnit,
    Regime, RodConfiguration, RodInput, SafetyCheck, SafetyFactor,
};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_rod_input, parse_rod_input, save_rod_input};
pub use report::ReportRow;
