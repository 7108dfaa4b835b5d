//! # Piston Rod Equations
//!
//! This module contains every formula used by the rod buckling calculation.
//! Having equations in one place enables:
//! - Easy verification against hand calculations
//! - Documentation of assumptions and unit conventions
//! - A single audit trail (see [`registry`])
//!
//! ## Modules
//!
//! - [`section`] - Circular section properties (A, I, Wb, i)
//! - [`buckling`] - Forces, stresses, buckling length, Euler force, slenderness
//! - [`registry`] - Equation metadata and tracking for reports and EQUATIONS.md
//!
//! ## Units
//!
//! - Lengths in mm, areas in mm², I in mm⁴, Wb in mm³
//! - Pressure and stress in N/mm²
//! - Forces in kN

pub mod buckling;
pub mod registry;
pub mod section;

// Re-export commonly used items
pub use buckling::{
    bending_stress,
    boundary_line,
    euler_buckling_force_kn,
    free_buckling_length,
    ideal_rod_diameter,
    line_load,
    press_stress,
    push_force_kn,
    required_rod_diameter,
    safety_factor,
    slenderness_ratio,
};

pub use section::{
    piston_annulus_area,
    radius_of_gyration,
    rod_area,
    rod_moment_of_inertia,
    rod_resistance_moment,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
