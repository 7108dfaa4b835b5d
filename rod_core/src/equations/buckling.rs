//! # Piston Rod Load and Buckling Formulas
//!
//! Force, stress and stability equations for a hydraulic piston rod loaded
//! in compression by the cylinder pressure and in bending by its own weight.
//!
//! ## Notation
//!
//! - `pS` = System pressure (N/mm²)
//! - `A` = Piston annulus area (mm²)
//! - `A_rod` = Rod cross-section (mm²)
//! - `Fd` = Push force (kN)
//! - `q` = Line load from rod self-weight (N/mm)
//! - `L` = Mounting distance (mm)
//! - `H` = Stroke (mm)
//! - `k` = Mounting end factor
//! - `α` = Installation angle
//! - `Lk` = Free buckling length (mm)
//! - `E` = Modulus of elasticity (N/mm²)
//! - `I` = Moment of inertia (mm⁴)
//! - `Fk` = Euler buckling force (kN)
//! - `sS` = Proof stress (N/mm²)
//! - `λ` = Slenderness ratio
//!
//! ## Sign Conventions
//!
//! - Push force and stresses are compressive magnitudes (always ≥ 0)
//! - The self-weight line load is taken as a magnitude; its direction only
//!   decides which fibre is in compression, not the stress value
//!
//! ## References
//!
//! - Euler column theory (pinned-pinned base case, k scales the length)
//! - Angle-corrected buckling length for inclined cylinder installations

use std::f64::consts::PI;

use crate::units::{KiloNewtons, Newtons, Radians};

// =============================================================================
// FORCES AND STRESSES
// =============================================================================

/// Push force of the cylinder in kN
///
/// # Formula
/// Fd = pS × A / 1000
///
/// # Example
/// ```rust
/// use rod_core::equations::buckling::push_force_kn;
///
/// // 200 N/mm² on a 4398.23 mm² annulus
/// let fd = push_force_kn(200.0, 4398.23);
/// assert!((fd - 879.646).abs() < 0.001);
/// ```
#[inline]
pub fn push_force_kn(pressure_nmm2: f64, area: f64) -> f64 {
    KiloNewtons::from(Newtons(pressure_nmm2 * area)).value()
}

/// Axial compressive stress in the rod
///
/// # Formula
/// sd = Fd × 1000 / A_rod
#[inline]
pub fn press_stress(push_force_kn: f64, rod_area: f64) -> f64 {
    Newtons::from(KiloNewtons(push_force_kn)).value() / rod_area
}

/// Line load from the rod's own weight (N/mm)
///
/// # Formula
/// q = |ρ × g × A_rod|
#[inline]
pub fn line_load(specific_weight: f64, rod_area: f64) -> f64 {
    (specific_weight * rod_area).abs()
}

/// Maximum bending stress of a simply supported rod under its line load
///
/// # Formula
/// sb = q × L² / (8 × Wb)
#[inline]
pub fn bending_stress(line_load: f64, span: f64, resistance_moment: f64) -> f64 {
    line_load * span.powi(2) / (8.0 * resistance_moment)
}

// =============================================================================
// BUCKLING
// =============================================================================

/// Free buckling length corrected for an inclined installation
///
/// ```text
///            ╱ rod (extended by H)
///           ╱
///   ───────●───────  mounting distance L
///          α
/// ```
///
/// # Formula
/// Lk = L × k × √(1 + (H/L)² × sin²(α))
///
/// The angle is supplied already converted to radians.
///
/// # Example
/// ```rust
/// use rod_core::equations::buckling::free_buckling_length;
/// use rod_core::units::{Degrees, Radians};
///
/// // Horizontal installation: no correction
/// let lk = free_buckling_length(1100.0, 1.0, 950.0, Radians::from(Degrees(0.0)));
/// assert_eq!(lk, 1100.0);
/// ```
#[inline]
pub fn free_buckling_length(mounting_distance: f64, end_factor: f64, stroke: f64, angle: Radians) -> f64 {
    let ratio = stroke / mounting_distance;
    mounting_distance * end_factor * (1.0 + ratio.powi(2) * angle.sin().powi(2)).sqrt()
}

/// Euler buckling force in kN
///
/// # Formula
/// Fk = π² × E × I / Lk² / 1000
#[inline]
pub fn euler_buckling_force_kn(elasticity_modulus: f64, moment_of_inertia: f64, buckling_length: f64) -> f64 {
    let newtons = PI.powi(2) * elasticity_modulus * moment_of_inertia / buckling_length.powi(2);
    KiloNewtons::from(Newtons(newtons)).value()
}

/// Existing safety factor against buckling
///
/// # Formula
/// S = Fk / Fd
///
/// Returns `None` when no push force acts (Fd = 0), or when Fd is so small
/// that the ratio is not a finite number.
#[inline]
pub fn safety_factor(buckling_force_kn: f64, push_force_kn: f64) -> Option<f64> {
    if push_force_kn == 0.0 {
        return None;
    }
    let ratio = buckling_force_kn / push_force_kn;
    ratio.is_finite().then_some(ratio)
}

/// Slenderness ratio λ = Lk / i
#[inline]
pub fn slenderness_ratio(buckling_length: f64, radius_of_gyration: f64) -> f64 {
    buckling_length / radius_of_gyration
}

/// Euler/Johnson transition slenderness
///
/// # Formula
/// λ_boundary = 2π × √(E / (2 × sS))
///
/// # Example
/// ```rust
/// use rod_core::equations::buckling::boundary_line;
///
/// let lambda = boundary_line(210_000.0, 350.0);
/// assert!((lambda - 108.83).abs() < 0.01);
/// ```
#[inline]
pub fn boundary_line(elasticity_modulus: f64, proof_stress: f64) -> f64 {
    2.0 * PI * (elasticity_modulus / (2.0 * proof_stress)).sqrt()
}

/// Solid rod diameter whose Euler force equals `buckling_force_kn`
///
/// Back-solve of Fk = π²EI/Lk² with I = πd⁴/64:
///
/// # Formula
/// d = (64 × Fk × 1000 × Lk² / (π³ × E))^(1/4)
#[inline]
pub fn ideal_rod_diameter(buckling_force_kn: f64, buckling_length: f64, elasticity_modulus: f64) -> f64 {
    let newtons = Newtons::from(KiloNewtons(buckling_force_kn)).value();
    (64.0 * newtons * buckling_length.powi(2) / (PI.powi(3) * elasticity_modulus)).powf(0.25)
}

/// Solid rod diameter needed to reach a target safety factor
///
/// # Formula
/// d_req = (64 × S × Fd × 1000 × Lk² / (π³ × E))^(1/4)
///
/// Zero when no push force acts.
#[inline]
pub fn required_rod_diameter(
    push_force_kn: f64,
    safety_factor_target: f64,
    buckling_length: f64,
    elasticity_modulus: f64,
) -> f64 {
    ideal_rod_diameter(safety_factor_target * push_force_kn, buckling_length, elasticity_modulus)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
