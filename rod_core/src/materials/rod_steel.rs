//! Piston Rod Steel
//!
//! Physical constants and reference design values for the steel a
//! hydraulic piston rod is made of. Units follow the rest of rod_core:
//! millimetres, newtons, N/mm².

use serde::{Deserialize, Serialize};

/// Steel density in kg/mm³ (7850 kg/m³)
pub const STEEL_DENSITY_KG_PER_MM3: f64 = 7.85e-6;

/// Gravitational acceleration in m/s²
pub const GRAVITY_M_PER_S2: f64 = 9.81;

/// Reference modulus of elasticity for rod steel (N/mm²)
pub const STEEL_ELASTICITY_MODULUS_NMM2: f64 = 210_000.0;

/// Reference proof stress for rod steel (N/mm²)
pub const STEEL_PROOF_STRESS_NMM2: f64 = 350.0;

/// Specific weight of rod steel in N/mm³.
///
/// ρ·g with ρ in kg/mm³ and g in m/s², matching the line-load convention
/// `q = ρ·g·A` in N/mm.
#[inline]
pub fn steel_specific_weight() -> f64 {
    STEEL_DENSITY_KG_PER_MM3 * GRAVITY_M_PER_S2
}

/// Elastic and strength values of a rod steel.
///
/// ## JSON Example
///
/// ```json
/// { "elasticity_modulus_nmm2": 210000.0, "proof_stress_nmm2": 350.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RodSteel {
    /// Modulus of elasticity E (N/mm²)
    pub elasticity_modulus_nmm2: f64,
    /// Proof stress sS (N/mm²)
    pub proof_stress_nmm2: f64,
}

impl Default for RodSteel {
    fn default() -> Self {
        RodSteel {
            elasticity_modulus_nmm2: STEEL_ELASTICITY_MODULUS_NMM2,
            proof_stress_nmm2: STEEL_PROOF_STRESS_NMM2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_weight() {
        // 7.85e-6 * 9.81 = 7.70085e-5 N/mm³
        assert!((steel_specific_weight() - 7.70085e-5).abs() < 1e-12);
    }

    #[test]
    fn test_default_steel() {
        let steel = RodSteel::default();
        assert_eq!(steel.elasticity_modulus_nmm2, 210_000.0);
        assert_eq!(steel.proof_stress_nmm2, 350.0);
    }
}
