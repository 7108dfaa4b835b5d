//! # Mounting End Conditions
//!
//! How the cylinder is held at both ends decides the effective buckling
//! length. Each condition carries a fixed end factor `k` that multiplies
//! the mounting distance.
//!
//! ## Example
//!
//! ```rust
//! use rod_core::calculations::MountingCondition;
//!
//! let mounting: MountingCondition = "fixed-free".parse().unwrap();
//! assert_eq!(mounting.end_factor(), 2.0);
//! assert_eq!(mounting.label(), "fixed-free");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// End condition of the cylinder mounting.
///
/// Serializes as its kebab-case label (`"bearing-bearing"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MountingCondition {
    /// Pivot bearing at both ends (k = 1.0)
    #[default]
    BearingBearing,
    /// Rigidly fixed at one end, pivot bearing at the other (k = 0.7)
    FixedBearing,
    /// Rigidly fixed at one end, free rod end (k = 2.0)
    FixedFree,
    /// Rigidly fixed at both ends (k = 4.0)
    FixedFixed,
}

impl MountingCondition {
    /// All mounting conditions, for iteration in menus and help text
    pub const ALL: [MountingCondition; 4] = [
        MountingCondition::BearingBearing,
        MountingCondition::FixedBearing,
        MountingCondition::FixedFree,
        MountingCondition::FixedFixed,
    ];

    /// End factor k applied to the mounting distance
    pub fn end_factor(&self) -> f64 {
        match self {
            MountingCondition::BearingBearing => 1.0,
            MountingCondition::FixedBearing => 0.7,
            MountingCondition::FixedFree => 2.0,
            MountingCondition::FixedFixed => 4.0,
        }
    }

    /// Stable label used for parsing and serialization
    pub fn label(&self) -> &'static str {
        match self {
            MountingCondition::BearingBearing => "bearing-bearing",
            MountingCondition::FixedBearing => "fixed-bearing",
            MountingCondition::FixedFree => "fixed-free",
            MountingCondition::FixedFixed => "fixed-fixed",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MountingCondition::BearingBearing => "Bearing - Bearing",
            MountingCondition::FixedBearing => "Fixed - Bearing",
            MountingCondition::FixedFree => "Fixed - Free",
            MountingCondition::FixedFixed => "Fixed - Fixed",
        }
    }
}

impl fmt::Display for MountingCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MountingCondition {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        MountingCondition::ALL
            .iter()
            .copied()
            .find(|m| m.label() == normalized)
            .ok_or_else(|| {
                CalcError::invalid_configuration(
                    "mounting",
                    s,
                    "Expected one of bearing-bearing, fixed-bearing, fixed-free, fixed-fixed",
                )
            })
    }
}
