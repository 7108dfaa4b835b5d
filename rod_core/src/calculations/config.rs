//! # Rod Configuration
//!
//! Input record for a piston rod evaluation. Raw values arrive as a
//! [`RodInput`] (what a form, CLI or JSON document supplies) and become a
//! [`RodConfiguration`] only after every invariant has been checked. A
//! configuration can not be built any other way, including through serde.
//!
//! ## Pressure Units
//!
//! The calculation works in N/mm². A `RodInput` may carry its pressure in
//! bar; the conversion (1 bar = 0.1 N/mm²) happens exactly once, here.
//!
//! ## Example
//!
//! ```rust
//! use rod_core::calculations::{PressureUnit, RodConfiguration, RodInput};
//!
//! let mut input = RodInput::reference();
//! input.system_pressure = 2000.0;
//! input.pressure_unit = PressureUnit::Bar;
//!
//! let config = RodConfiguration::new(input).unwrap();
//! assert!((config.system_pressure_nmm2() - 200.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::mounting::MountingCondition;
use crate::equations::buckling::{
    boundary_line, euler_buckling_force_kn, free_buckling_length, ideal_rod_diameter, push_force_kn,
    required_rod_diameter,
};
use crate::equations::section::{piston_annulus_area, rod_area, rod_moment_of_inertia, rod_resistance_moment};
use crate::errors::{CalcError, CalcResult};
use crate::materials::rod_steel::RodSteel;
use crate::units::{Bar, Degrees, NPerMm2};

/// Unit the system pressure is given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureUnit {
    /// N/mm² (MPa)
    #[default]
    Nmm2,
    /// bar (0.1 N/mm²)
    Bar,
}

impl PressureUnit {
    /// Unit symbol for display
    pub fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::Nmm2 => "N/mm²",
            PressureUnit::Bar => "bar",
        }
    }

    /// Convert a pressure given in this unit to N/mm²
    pub fn to_nmm2(&self, value: f64) -> NPerMm2 {
        match self {
            PressureUnit::Nmm2 => NPerMm2(value),
            PressureUnit::Bar => Bar(value).into(),
        }
    }
}

/// Raw input parameters for a piston rod, before validation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Boom cylinder",
///   "system_pressure": 200.0,
///   "pressure_unit": "nmm2",
///   "piston_diameter_mm": 90.0,
///   "rod_diameter_mm": 50.0,
///   "hollow_rod_inner_diameter_mm": 0.0,
///   "outside_barrel_diameter_mm": 110.0,
///   "proof_stress_nmm2": 350.0,
///   "safety_factor_target": 2.5,
///   "stroke_mm": 950.0,
///   "mounting_distance_mm": 1100.0,
///   "elasticity_modulus_nmm2": 210000.0,
///   "installation_angle_deg": 23.0,
///   "mounting": "bearing-bearing"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RodInput {
    /// User label for this rod (e.g., "Boom cylinder")
    #[serde(default)]
    pub label: String,

    /// System pressure, in `pressure_unit`
    pub system_pressure: f64,

    /// Unit of `system_pressure` (defaults to N/mm²)
    #[serde(default)]
    pub pressure_unit: PressureUnit,

    /// Piston diameter Dk (mm)
    pub piston_diameter_mm: f64,

    /// Rod outer diameter Ds (mm)
    pub rod_diameter_mm: f64,

    /// Rod bore diameter Dho (mm), 0 for a solid rod
    #[serde(default)]
    pub hollow_rod_inner_diameter_mm: f64,

    /// Barrel outer diameter (mm), informational only
    #[serde(default)]
    pub outside_barrel_diameter_mm: f64,

    /// Proof stress sS (N/mm²)
    pub proof_stress_nmm2: f64,

    /// Target safety factor against buckling
    pub safety_factor_target: f64,

    /// Stroke H (mm)
    pub stroke_mm: f64,

    /// Mounting distance L (mm)
    pub mounting_distance_mm: f64,

    /// Modulus of elasticity E (N/mm²)
    pub elasticity_modulus_nmm2: f64,

    /// Installation angle α from horizontal (degrees)
    pub installation_angle_deg: f64,

    /// Mounting end condition
    #[serde(default)]
    pub mounting: MountingCondition,
}

impl RodInput {
    /// Reference configuration: 90/50 cylinder at 200 N/mm², 950 mm stroke,
    /// 1100 mm mounting distance, 23° installation, bearing at both ends.
    pub fn reference() -> Self {
        let steel = RodSteel::default();
        RodInput {
            label: String::new(),
            system_pressure: 200.0,
            pressure_unit: PressureUnit::Nmm2,
            piston_diameter_mm: 90.0,
            rod_diameter_mm: 50.0,
            hollow_rod_inner_diameter_mm: 0.0,
            outside_barrel_diameter_mm: 110.0,
            proof_stress_nmm2: steel.proof_stress_nmm2,
            safety_factor_target: 2.5,
            stroke_mm: 950.0,
            mounting_distance_mm: 1100.0,
            elasticity_modulus_nmm2: steel.elasticity_modulus_nmm2,
            installation_angle_deg: 23.0,
            mounting: MountingCondition::BearingBearing,
        }
    }

    /// Validate and convert into a [`RodConfiguration`]
    pub fn validate(self) -> CalcResult<RodConfiguration> {
        RodConfiguration::new(self)
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 11] {
        [
            ("system_pressure", self.system_pressure),
            ("piston_diameter_mm", self.piston_diameter_mm),
            ("rod_diameter_mm", self.rod_diameter_mm),
            ("hollow_rod_inner_diameter_mm", self.hollow_rod_inner_diameter_mm),
            ("outside_barrel_diameter_mm", self.outside_barrel_diameter_mm),
            ("proof_stress_nmm2", self.proof_stress_nmm2),
            ("safety_factor_target", self.safety_factor_target),
            ("stroke_mm", self.stroke_mm),
            ("mounting_distance_mm", self.mounting_distance_mm),
            ("elasticity_modulus_nmm2", self.elasticity_modulus_nmm2),
            ("installation_angle_deg", self.installation_angle_deg),
        ]
    }
}

impl Default for RodInput {
    fn default() -> Self {
        RodInput::reference()
    }
}

/// Validated, immutable rod configuration.
///
/// Pressure is stored in N/mm² regardless of the unit it was supplied in.
/// Serializes back to a [`RodInput`] with `pressure_unit = "nmm2"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RodInput", into = "RodInput")]
pub struct RodConfiguration {
    label: String,
    system_pressure: NPerMm2,
    piston_diameter: f64,
    rod_diameter: f64,
    hollow_rod_inner_diameter: f64,
    outside_barrel_diameter: f64,
    proof_stress: f64,
    safety_factor_target: f64,
    stroke: f64,
    mounting_distance: f64,
    elasticity_modulus: f64,
    installation_angle: Degrees,
    mounting: MountingCondition,
}

fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_configuration(field, value.to_string(), reason))
    }
}

fn require_non_negative(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_configuration(field, value.to_string(), reason))
    }
}

/// A derived quantity must be finite and, for section properties, positive.
fn require_derived(field: &str, input: f64, derived: f64, positive: bool, what: &str) -> CalcResult<()> {
    if derived.is_finite() && (!positive || derived > 0.0) {
        Ok(())
    } else {
        Err(CalcError::invalid_configuration(
            field,
            input.to_string(),
            format!("{} is not representable for this value ({})", what, derived),
        ))
    }
}

impl RodConfiguration {
    /// Validate raw input and build a configuration.
    ///
    /// # Errors
    ///
    /// `CalcError::InvalidConfiguration` naming the first offending field.
    pub fn new(input: RodInput) -> CalcResult<Self> {
        for (field, value) in input.numeric_fields() {
            if !value.is_finite() {
                return Err(CalcError::invalid_configuration(
                    field,
                    value.to_string(),
                    "Value must be a finite number",
                ));
            }
        }

        let system_pressure = input.pressure_unit.to_nmm2(input.system_pressure);
        require_non_negative("system_pressure", input.system_pressure, "Pressure cannot be negative")?;

        require_positive("rod_diameter_mm", input.rod_diameter_mm, "Rod diameter must be positive")?;

        let bore = input.hollow_rod_inner_diameter_mm;
        require_non_negative("hollow_rod_inner_diameter_mm", bore, "Bore diameter cannot be negative")?;
        if bore != 0.0 && bore >= input.rod_diameter_mm {
            return Err(CalcError::invalid_configuration(
                "hollow_rod_inner_diameter_mm",
                bore.to_string(),
                format!("Bore diameter must be smaller than the rod diameter ({} mm)", input.rod_diameter_mm),
            ));
        }

        if input.piston_diameter_mm <= input.rod_diameter_mm {
            return Err(CalcError::invalid_configuration(
                "piston_diameter_mm",
                input.piston_diameter_mm.to_string(),
                format!("Piston diameter must exceed the rod diameter ({} mm)", input.rod_diameter_mm),
            ));
        }

        require_non_negative(
            "outside_barrel_diameter_mm",
            input.outside_barrel_diameter_mm,
            "Barrel diameter cannot be negative",
        )?;
        require_positive("proof_stress_nmm2", input.proof_stress_nmm2, "Proof stress must be positive")?;
        require_positive(
            "safety_factor_target",
            input.safety_factor_target,
            "Safety factor target must be positive",
        )?;
        require_non_negative("stroke_mm", input.stroke_mm, "Stroke cannot be negative")?;
        require_positive(
            "mounting_distance_mm",
            input.mounting_distance_mm,
            "Mounting distance must be positive",
        )?;
        require_positive(
            "elasticity_modulus_nmm2",
            input.elasticity_modulus_nmm2,
            "Modulus of elasticity must be positive",
        )?;

        if !(0.0..=90.0).contains(&input.installation_angle_deg) {
            return Err(CalcError::invalid_configuration(
                "installation_angle_deg",
                input.installation_angle_deg.to_string(),
                "Installation angle must be between 0 and 90 degrees",
            ));
        }

        let config = RodConfiguration {
            label: input.label,
            system_pressure,
            piston_diameter: input.piston_diameter_mm,
            rod_diameter: input.rod_diameter_mm,
            hollow_rod_inner_diameter: bore,
            outside_barrel_diameter: input.outside_barrel_diameter_mm,
            proof_stress: input.proof_stress_nmm2,
            safety_factor_target: input.safety_factor_target,
            stroke: input.stroke_mm,
            mounting_distance: input.mounting_distance_mm,
            elasticity_modulus: input.elasticity_modulus_nmm2,
            installation_angle: Degrees(input.installation_angle_deg),
            mounting: input.mounting,
        };
        config.check_derived()?;
        Ok(config)
    }

    /// Reject inputs that are individually valid but overflow, underflow or
    /// cancel in the formulas, so evaluation never yields NaN or infinity.
    fn check_derived(&self) -> CalcResult<()> {
        let (dk, ds, dho) = (self.piston_diameter, self.rod_diameter, self.hollow_rod_inner_diameter);

        let area = piston_annulus_area(dk, ds);
        require_derived("piston_diameter_mm", dk, area, true, "Piston annulus area")?;
        require_derived("rod_diameter_mm", ds, rod_area(ds, dho), true, "Rod cross-section area")?;
        let inertia = rod_moment_of_inertia(ds, dho);
        require_derived("rod_diameter_mm", ds, inertia, true, "Moment of inertia")?;
        let wb = rod_resistance_moment(ds, dho);
        require_derived("rod_diameter_mm", ds, wb, true, "Resistance moment")?;

        let pressure = self.system_pressure.value();
        let push_force = push_force_kn(pressure, area);
        require_derived("system_pressure", pressure, push_force, false, "Push force")?;

        let span = self.mounting_distance;
        require_derived("mounting_distance_mm", span, span * span, false, "Squared mounting distance")?;
        let lk = free_buckling_length(span, self.mounting.end_factor(), self.stroke, self.installation_angle.into());
        require_derived("mounting_distance_mm", span, lk, true, "Free buckling length")?;
        require_derived("mounting_distance_mm", span, lk * lk, true, "Squared buckling length")?;

        let e = self.elasticity_modulus;
        let fk = euler_buckling_force_kn(e, inertia, lk);
        require_derived("elasticity_modulus_nmm2", e, fk, false, "Euler buckling force")?;
        require_derived(
            "proof_stress_nmm2",
            self.proof_stress,
            boundary_line(e, self.proof_stress),
            true,
            "Boundary line",
        )?;
        require_derived("elasticity_modulus_nmm2", e, ideal_rod_diameter(fk, lk, e), false, "Ideal rod diameter")?;
        require_derived(
            "safety_factor_target",
            self.safety_factor_target,
            required_rod_diameter(push_force, self.safety_factor_target, lk, e),
            false,
            "Required rod diameter",
        )?;
        Ok(())
    }

    /// User label (may be empty)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// System pressure pS (N/mm²)
    pub fn system_pressure_nmm2(&self) -> f64 {
        self.system_pressure.value()
    }

    /// Piston diameter Dk (mm)
    pub fn piston_diameter_mm(&self) -> f64 {
        self.piston_diameter
    }

    /// Rod outer diameter Ds (mm)
    pub fn rod_diameter_mm(&self) -> f64 {
        self.rod_diameter
    }

    /// Rod bore diameter Dho (mm)
    pub fn hollow_rod_inner_diameter_mm(&self) -> f64 {
        self.hollow_rod_inner_diameter
    }

    /// True when the rod has a bore
    pub fn is_hollow(&self) -> bool {
        self.hollow_rod_inner_diameter > 0.0
    }

    /// Barrel outer diameter (mm), not used by the calculation
    pub fn outside_barrel_diameter_mm(&self) -> f64 {
        self.outside_barrel_diameter
    }

    /// Proof stress sS (N/mm²)
    pub fn proof_stress_nmm2(&self) -> f64 {
        self.proof_stress
    }

    /// Target safety factor
    pub fn safety_factor_target(&self) -> f64 {
        self.safety_factor_target
    }

    /// Stroke H (mm)
    pub fn stroke_mm(&self) -> f64 {
        self.stroke
    }

    /// Mounting distance L (mm)
    pub fn mounting_distance_mm(&self) -> f64 {
        self.mounting_distance
    }

    /// Modulus of elasticity E (N/mm²)
    pub fn elasticity_modulus_nmm2(&self) -> f64 {
        self.elasticity_modulus
    }

    /// Installation angle α
    pub fn installation_angle(&self) -> Degrees {
        self.installation_angle
    }

    /// Mounting end condition
    pub fn mounting(&self) -> MountingCondition {
        self.mounting
    }
}

impl TryFrom<RodInput> for RodConfiguration {
    type Error = CalcError;

    fn try_from(input: RodInput) -> Result<Self, Self::Error> {
        RodConfiguration::new(input)
    }
}

impl From<RodConfiguration> for RodInput {
    fn from(config: RodConfiguration) -> Self {
        RodInput {
            label: config.label,
            system_pressure: config.system_pressure.value(),
            pressure_unit: PressureUnit::Nmm2,
            piston_diameter_mm: config.piston_diameter,
            rod_diameter_mm: config.rod_diameter,
            hollow_rod_inner_diameter_mm: config.hollow_rod_inner_diameter,
            outside_barrel_diameter_mm: config.outside_barrel_diameter,
            proof_stress_nmm2: config.proof_stress,
            safety_factor_target: config.safety_factor_target,
            stroke_mm: config.stroke,
            mounting_distance_mm: config.mounting_distance,
            elasticity_modulus_nmm2: config.elasticity_modulus,
            installation_angle_deg: config.installation_angle.value(),
            mounting: config.mounting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(input: RodInput) -> String {
        match RodConfiguration::new(input) {
            Err(CalcError::InvalidConfiguration { field, .. }) => field,
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_is_valid() {
        let config = RodConfiguration::new(RodInput::reference()).unwrap();
        assert_eq!(config.rod_diameter_mm(), 50.0);
        assert_eq!(config.mounting(), MountingCondition::BearingBearing);
        assert!(!config.is_hollow());
    }

    #[test]
    fn test_zero_rod_diameter_rejected() {
        let mut input = RodInput::reference();
        input.rod_diameter_mm = 0.0;
        assert_eq!(rejected_field(input), "rod_diameter_mm");
    }

    #[test]
    fn test_bore_must_be_smaller_than_rod() {
        let mut input = RodInput::reference();
        input.hollow_rod_inner_diameter_mm = 50.0;
        assert_eq!(rejected_field(input), "hollow_rod_inner_diameter_mm");

        let mut input = RodInput::reference();
        input.hollow_rod_inner_diameter_mm = 30.0;
        assert!(RodConfiguration::new(input).unwrap().is_hollow());
    }

    #[test]
    fn test_piston_must_exceed_rod() {
        let mut input = RodInput::reference();
        input.piston_diameter_mm = 50.0;
        assert_eq!(rejected_field(input), "piston_diameter_mm");
    }

    #[test]
    fn test_non_positive_divisors_rejected() {
        let mut input = RodInput::reference();
        input.mounting_distance_mm = 0.0;
        assert_eq!(rejected_field(input), "mounting_distance_mm");

        let mut input = RodInput::reference();
        input.elasticity_modulus_nmm2 = -1.0;
        assert_eq!(rejected_field(input), "elasticity_modulus_nmm2");

        let mut input = RodInput::reference();
        input.proof_stress_nmm2 = 0.0;
        assert_eq!(rejected_field(input), "proof_stress_nmm2");
    }

    #[test]
    fn test_negative_lengths_rejected() {
        let mut input = RodInput::reference();
        input.stroke_mm = -1.0;
        assert_eq!(rejected_field(input), "stroke_mm");

        let mut input = RodInput::reference();
        input.system_pressure = -5.0;
        assert_eq!(rejected_field(input), "system_pressure");

        let mut input = RodInput::reference();
        input.hollow_rod_inner_diameter_mm = -1.0;
        assert_eq!(rejected_field(input), "hollow_rod_inner_diameter_mm");

        let mut input = RodInput::reference();
        input.outside_barrel_diameter_mm = -110.0;
        assert_eq!(rejected_field(input), "outside_barrel_diameter_mm");
    }

    #[test]
    fn test_overflowing_section_rejected() {
        // Each value is finite and ordered, but Ds⁴ − Dho⁴ is inf − inf
        let mut input = RodInput::reference();
        input.piston_diameter_mm = 2e78;
        input.rod_diameter_mm = 1e78;
        input.hollow_rod_inner_diameter_mm = 9e77;
        assert_eq!(rejected_field(input), "rod_diameter_mm");

        let mut input = RodInput::reference();
        input.piston_diameter_mm = 1e200;
        assert_eq!(rejected_field(input), "piston_diameter_mm");
    }

    #[test]
    fn test_overflowing_span_and_material_rejected() {
        let mut input = RodInput::reference();
        input.mounting_distance_mm = 1e200;
        assert_eq!(rejected_field(input), "mounting_distance_mm");

        let mut input = RodInput::reference();
        input.elasticity_modulus_nmm2 = 1e306;
        assert_eq!(rejected_field(input), "elasticity_modulus_nmm2");

        let mut input = RodInput::reference();
        input.proof_stress_nmm2 = 1e-320;
        assert_eq!(rejected_field(input), "proof_stress_nmm2");
    }

    #[test]
    fn test_large_but_representable_rod_accepted() {
        let mut input = RodInput::reference();
        input.piston_diameter_mm = 2e40;
        input.rod_diameter_mm = 1e40;
        input.hollow_rod_inner_diameter_mm = 9e39;
        input.mounting_distance_mm = 1e40;
        let config = RodConfiguration::new(input).unwrap();
        assert!(config.is_hollow());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut input = RodInput::reference();
        input.stroke_mm = f64::NAN;
        assert_eq!(rejected_field(input), "stroke_mm");

        let mut input = RodInput::reference();
        input.system_pressure = f64::INFINITY;
        assert_eq!(rejected_field(input), "system_pressure");
    }

    #[test]
    fn test_angle_range() {
        let mut input = RodInput::reference();
        input.installation_angle_deg = 91.0;
        assert_eq!(rejected_field(input), "installation_angle_deg");

        let mut input = RodInput::reference();
        input.installation_angle_deg = 90.0;
        assert!(RodConfiguration::new(input).is_ok());
    }

    #[test]
    fn test_bar_converted_once() {
        let mut input = RodInput::reference();
        input.system_pressure = 2000.0;
        input.pressure_unit = PressureUnit::Bar;
        let config = RodConfiguration::new(input).unwrap();
        assert!((config.system_pressure_nmm2() - 200.0).abs() < 1e-9);

        // Serializing back normalizes to N/mm²
        let back = RodInput::from(config);
        assert_eq!(back.pressure_unit, PressureUnit::Nmm2);
        assert!((back.system_pressure - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "system_pressure": 200.0,
            "piston_diameter_mm": 90.0,
            "rod_diameter_mm": 0.0,
            "proof_stress_nmm2": 350.0,
            "safety_factor_target": 2.5,
            "stroke_mm": 950.0,
            "mounting_distance_mm": 1100.0,
            "elasticity_modulus_nmm2": 210000.0,
            "installation_angle_deg": 23.0
        }"#;
        let err = serde_json::from_str::<RodConfiguration>(json).unwrap_err();
        assert!(err.to_string().contains("rod_diameter_mm"), "{}", err);

        // Same document with a valid rod parses, defaults filled in
        let fixed = json.replace("\"rod_diameter_mm\": 0.0", "\"rod_diameter_mm\": 50.0");
        let config: RodConfiguration = serde_json::from_str(&fixed).unwrap();
        assert_eq!(config.hollow_rod_inner_diameter_mm(), 0.0);
        assert_eq!(config.mounting(), MountingCondition::BearingBearing);
    }

    #[test]
    fn test_input_serialization_roundtrip() {
        let input = RodInput::reference();
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"mounting\": \"bearing-bearing\""));
        assert!(json.contains("\"pressure_unit\": \"nmm2\""));
        let roundtrip: RodInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
