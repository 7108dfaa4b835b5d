//! # Materials
//!
//! Material constants for piston rods. Only rod steel is modelled; the
//! elasticity modulus and proof stress of a configuration may still be
//! overridden per rod.
//!
//! ## Example
//!
//! ```rust
//! use rod_core::materials::{steel_specific_weight, RodSteel};
//!
//! let steel = RodSteel::default();
//! println!("E = {} N/mm², sS = {} N/mm²", steel.elasticity_modulus_nmm2, steel.proof_stress_nmm2);
//! assert!(steel_specific_weight() > 0.0);
//! ```

pub mod rod_steel;

pub use rod_steel::{
    steel_specific_weight, RodSteel, GRAVITY_M_PER_S2, STEEL_DENSITY_KG_PER_MM3, STEEL_ELASTICITY_MODULUS_NMM2,
    STEEL_PROOF_STRESS_NMM2,
};
