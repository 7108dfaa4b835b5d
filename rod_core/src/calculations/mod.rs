//! # Rod Calculations
//!
//! Everything needed to go from raw user input to a buckling result.
//! The calculation follows the pattern:
//!
//! - [`RodInput`] - Input parameters (JSON-serializable, unvalidated)
//! - [`RodConfiguration`] - Validated input; only this can be evaluated
//! - [`BucklingResult`] - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<BucklingResult, CalcError>` - Validate and evaluate
//!
//! ## Modules
//!
//! - [`config`] - Input record, pressure units and validation
//! - [`mounting`] - Mounting end conditions and their end factors
//! - [`buckling`] - The evaluation pipeline, regime and safety check

pub mod buckling;
pub mod config;
pub mod mounting;

// Re-export commonly used types
pub use buckling::{
    calculate, evaluate, evaluate_traced, BucklingCalculator, BucklingResult, Regime, SafetyCheck, SafetyFactor,
};
pub use config::{PressureUnit, RodConfiguration, RodInput};
pub use mounting::MountingCondition;
