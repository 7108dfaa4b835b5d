//! # Unit Types
//!
//! Type-safe wrappers for the handful of unit conversions the rod calculation
//! needs. These are plain f64 newtypes, serialized transparently.
//!
//! ## Metric Units
//!
//! rod_core works in millimetres and newtons internally:
//! - Length: millimetres (mm)
//! - Force: newtons (N), kilonewtons (kN = 1000 N)
//! - Stress / pressure: N/mm² (= MPa); bar is accepted at the input boundary
//! - Angle: degrees at the boundary, radians only inside trigonometry
//!
//! Only three conversions exist: bar → N/mm², degrees → radians and N ↔ kN.
//!
//! ## Example
//!
//! ```rust
//! use rod_core::units::{Bar, Degrees, NPerMm2, Radians};
//!
//! let pressure: NPerMm2 = Bar(200.0).into();
//! assert!((pressure.0 - 20.0).abs() < 1e-12);
//!
//! let angle: Radians = Degrees(180.0).into();
//! assert!((angle.0 - std::f64::consts::PI).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// 1 bar = 0.1 N/mm²
pub const NMM2_PER_BAR: f64 = 0.1;

// ============================================================================
// Pressure / Stress Units
// ============================================================================

/// Pressure or stress in N/mm² (MPa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NPerMm2(pub f64);

/// Pressure in bar
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bar(pub f64);

impl From<Bar> for NPerMm2 {
    fn from(bar: Bar) -> Self {
        NPerMm2(bar.0 * NMM2_PER_BAR)
    }
}

impl From<NPerMm2> for Bar {
    fn from(p: NPerMm2) -> Self {
        Bar(p.0 / NMM2_PER_BAR)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons (1 kN = 1000 N)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl Radians {
    /// Sine of the angle
    pub fn sin(self) -> f64 {
        self.0.sin()
    }
}

macro_rules! impl_value {
    ($type:ty) => {
        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_value!(NPerMm2);
impl_value!(Bar);
impl_value!(Newtons);
impl_value!(KiloNewtons);
impl_value!(Degrees);
impl_value!(Radians);
