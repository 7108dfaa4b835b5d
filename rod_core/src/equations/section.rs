//! # Cross-Section Property Formulas
//!
//! Geometric properties of the circular sections found in a hydraulic
//! cylinder: the (optionally hollow) piston rod and the piston annulus.
//!
//! ## Notation
//!
//! - `Dk` = Piston diameter
//! - `Ds` = Rod outer diameter
//! - `Dho` = Rod bore (inner) diameter, 0 for a solid rod
//! - `A` = Cross-sectional area
//! - `I` = Moment of inertia (second moment of area)
//! - `Wb` = Resistance moment (section modulus, I/c with c = Ds/2)
//! - `i` = Radius of gyration (√(I/A))
//!
//! All functions take millimetres and return mm-based units.

use std::f64::consts::PI;

// =============================================================================
// CYLINDER AREAS
// =============================================================================

/// Annulus area between piston bore and rod
///
/// ```text
///    ┌───────────────┐
///    │▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒│
///    │▒▒▒┌───────┐▒▒▒│
///    │▒▒▒│  rod  │▒▒▒│ Dk
///    │▒▒▒└───────┘▒▒▒│
///    │▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒│
///    └───────────────┘
/// ```
///
/// # Formula
/// A = π/4 × (Dk² − Ds²)
///
/// # Example
/// ```rust
/// use rod_core::equations::section::piston_annulus_area;
///
/// let a = piston_annulus_area(90.0, 50.0);
/// assert!((a - 4398.23).abs() < 0.01);
/// ```
#[inline]
pub fn piston_annulus_area(piston_diameter: f64, rod_diameter: f64) -> f64 {
    PI / 4.0 * (piston_diameter.powi(2) - rod_diameter.powi(2))
}

/// Cross-sectional area of a solid or hollow rod
///
/// # Formula
/// A_rod = π/4 × (Ds² − Dho²)
///
/// Reduces to π·Ds²/4 for a solid rod (Dho = 0).
///
/// # Example
/// ```rust
/// use rod_core::equations::section::rod_area;
///
/// let a = rod_area(50.0, 0.0);
/// assert!((a - 1963.50).abs() < 0.01);
/// ```
#[inline]
pub fn rod_area(rod_diameter: f64, inner_diameter: f64) -> f64 {
    PI / 4.0 * (rod_diameter.powi(2) - inner_diameter.powi(2))
}

// =============================================================================
// BENDING PROPERTIES
// =============================================================================

/// Moment of inertia of a circular tube about a diameter
///
/// # Formula
/// I = π × (Ds⁴ − Dho⁴) / 64
///
/// # Example
/// ```rust
/// use rod_core::equations::section::rod_moment_of_inertia;
///
/// let i = rod_moment_of_inertia(50.0, 0.0);
/// assert!((i - 306_796.16).abs() < 0.01);
/// ```
#[inline]
pub fn rod_moment_of_inertia(rod_diameter: f64, inner_diameter: f64) -> f64 {
    PI * (rod_diameter.powi(4) - inner_diameter.powi(4)) / 64.0
}

/// Resistance moment (section modulus) of the rod
///
/// The solid and hollow cases are evaluated with separate formulas so a
/// solid rod never carries a residual bore term.
///
/// # Formula
/// - Solid (Dho = 0): Wb = π × Ds³ / 32
/// - Hollow: Wb = π × (Ds⁴ − Dho⁴) / (32 × Ds)
///
/// # Example
/// ```rust
/// use rod_core::equations::section::rod_resistance_moment;
///
/// let wb = rod_resistance_moment(50.0, 0.0);
/// assert!((wb - 12_271.85).abs() < 0.01);
/// ```
#[inline]
pub fn rod_resistance_moment(rod_diameter: f64, inner_diameter: f64) -> f64 {
    if inner_diameter == 0.0 {
        PI * rod_diameter.powi(3) / 32.0
    } else {
        PI * (rod_diameter.powi(4) - inner_diameter.powi(4)) / (32.0 * rod_diameter)
    }
}

/// Radius of gyration i = √(I/A)
///
/// Used for the slenderness ratio λ = Lk / i. For a solid rod this
/// reduces to Ds/4.
#[inline]
pub fn radius_of_gyration(moment_of_inertia: f64, area: f64) -> f64 {
    (moment_of_inertia / area).sqrt()
}

// =============================================================================
// UNIT TESTS
// =============================================================================
