//! # Piston Rod Buckling Calculation
//!
//! Evaluates a validated [`RodConfiguration`] in one straight pass:
//! section properties, push force, stresses, angle-corrected buckling
//! length, Euler force, safety factor, slenderness and the Euler/Johnson
//! regime flag, followed by the ideal and required rod diameters.
//!
//! ## Assumptions
//!
//! - Pressure acts on the piston annulus (Dk² − Ds²)
//! - Self-weight bends the rod as a simply supported span of length L
//! - Euler theory for the buckling force; Johnson is only flagged, never computed
//! - Circular rod, solid or with a concentric bore
//!
//! ## Example
//!
//! ```rust
//! use rod_core::calculations::{calculate, Regime, RodInput};
//!
//! let result = calculate(&RodInput::reference()).unwrap();
//!
//! println!("Push force: {:.1} kN", result.push_force);
//! println!("Buckling force: {:.1} kN", result.buckling_force);
//! println!("Safety factor: {}", result.existing_safety_factor);
//! assert_eq!(result.regime, Regime::Euler);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use super::config::{RodConfiguration, RodInput};
use crate::equations::buckling::{
    bending_stress, boundary_line, euler_buckling_force_kn, free_buckling_length, ideal_rod_diameter,
    line_load, press_stress, push_force_kn, required_rod_diameter, safety_factor, slenderness_ratio,
};
use crate::equations::registry::{Equation, EquationTracker};
use crate::equations::section::{
    piston_annulus_area, radius_of_gyration, rod_area, rod_moment_of_inertia, rod_resistance_moment,
};
use crate::errors::CalcResult;
use crate::materials::rod_steel::steel_specific_weight;
use crate::units::Radians;

/// Buckling theory applicable to the rod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// Euler result is valid
    Euler,
    /// Euler result is not valid, Johnson theory should be applied
    Johnson,
}

impl Regime {
    /// Threshold comparison: `Euler` iff `slenderness < boundary`.
    pub fn classify(slenderness: f64, boundary: f64) -> Self {
        if slenderness < boundary {
            Regime::Euler
        } else {
            Regime::Johnson
        }
    }

    /// Boolean regime flag consumed by presentation layers
    pub fn is_euler(&self) -> bool {
        matches!(self, Regime::Euler)
    }

    /// Success or warning message for the regime
    pub fn message(&self) -> &'static str {
        match self {
            Regime::Euler => "Euler buckling theory is valid",
            Regime::Johnson => "Euler result not valid, apply Johnson theory",
        }
    }
}

/// Existing safety factor against buckling.
///
/// `Undefined` when no push force acts; the ratio Fk/Fd has no value then.
///
/// ## JSON
///
/// ```json
/// { "value": 0.536 }
/// "undefined"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyFactor {
    /// Finite ratio Fk / Fd
    Value(f64),
    /// Push force is zero
    Undefined,
}

impl SafetyFactor {
    fn from_ratio(ratio: Option<f64>) -> Self {
        match ratio {
            Some(v) if v.is_finite() => SafetyFactor::Value(v),
            _ => SafetyFactor::Undefined,
        }
    }

    /// Numeric value, if defined
    pub fn value(&self) -> Option<f64> {
        match self {
            SafetyFactor::Value(v) => Some(*v),
            SafetyFactor::Undefined => None,
        }
    }

    /// Numeric value with `f64::INFINITY` standing in for `Undefined`
    pub fn as_f64(&self) -> f64 {
        self.value().unwrap_or(f64::INFINITY)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, SafetyFactor::Undefined)
    }
}

impl fmt::Display for SafetyFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyFactor::Value(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            SafetyFactor::Undefined => f.write_str("undefined (no push force)"),
        }
    }
}

/// Outcome of comparing the existing safety factor to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyCheck {
    Pass,
    Fail,
}

impl SafetyCheck {
    /// `Pass` when S ≥ target, or when S is undefined (no load)
    pub fn assess(existing: SafetyFactor, target: f64) -> Self {
        match existing {
            SafetyFactor::Value(s) if s < target => SafetyCheck::Fail,
            _ => SafetyCheck::Pass,
        }
    }

    pub fn passes(&self) -> bool {
        matches!(self, SafetyCheck::Pass)
    }
}

/// Results from a rod buckling evaluation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "piston_annulus_area": 4398.23,
///   "rod_cross_section_area": 1963.50,
///   "line_load": 0.1512,
///   "push_force": 879.65,
///   "press_stress": 448.0,
///   "resistance_moment": 12271.85,
///   "bending_stress": 1.86,
///   "buckling_stress": 449.86,
///   "free_buckling_length": 1160.94,
///   "moment_of_inertia": 306796.16,
///   "buckling_force": 471.82,
///   "existing_safety_factor": { "value": 0.536 },
///   "radius_of_gyration": 12.5,
///   "slenderness_ratio": 92.88,
///   "boundary_line": 108.83,
///   "ideal_rod_diameter": 50.0,
///   "required_rod_diameter": 73.47,
///   "regime": "Euler",
///   "safety_check": "Fail"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucklingResult {
    /// Piston annulus area A (mm²)
    pub piston_annulus_area: f64,

    /// Rod cross-section A_rod (mm²)
    pub rod_cross_section_area: f64,

    /// Self-weight line load q (N/mm)
    pub line_load: f64,

    /// Push force Fd (kN)
    pub push_force: f64,

    /// Axial press stress sd (N/mm²)
    pub press_stress: f64,

    /// Resistance moment Wb (mm³)
    pub resistance_moment: f64,

    /// Self-weight bending stress sb (N/mm²)
    pub bending_stress: f64,

    /// Combined buckling stress sk = sd + sb (N/mm²)
    pub buckling_stress: f64,

    /// Free buckling length Lk (mm)
    pub free_buckling_length: f64,

    /// Moment of inertia I (mm⁴)
    pub moment_of_inertia: f64,

    /// Euler buckling force Fk (kN)
    pub buckling_force: f64,

    /// Existing safety factor Fk / Fd
    pub existing_safety_factor: SafetyFactor,

    /// Radius of gyration i (mm)
    pub radius_of_gyration: f64,

    /// Slenderness ratio λ
    pub slenderness_ratio: f64,

    /// Euler/Johnson transition slenderness
    pub boundary_line: f64,

    /// Solid diameter with the same Euler force (mm)
    pub ideal_rod_diameter: f64,

    /// Solid diameter reaching the target safety factor (mm)
    pub required_rod_diameter: f64,

    /// Applicable buckling theory
    pub regime: Regime,

    /// Existing vs. target safety factor
    pub safety_check: SafetyCheck,
}

impl BucklingResult {
    /// Check if the Euler result is valid for this rod
    pub fn euler_valid(&self) -> bool {
        self.regime.is_euler()
    }

    /// Check if the rod meets its target safety factor
    pub fn passes(&self) -> bool {
        self.safety_check.passes()
    }
}

/// The rod buckling pipeline.
///
/// Stateless; every call is independent and deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BucklingCalculator;

impl BucklingCalculator {
    /// Evaluate a configuration.
    pub fn evaluate(&self, config: &RodConfiguration) -> BucklingResult {
        self.evaluate_traced(config, &mut EquationTracker::new())
    }

    /// Evaluate a configuration, recording every equation applied.
    pub fn evaluate_traced(&self, config: &RodConfiguration, tracker: &mut EquationTracker) -> BucklingResult {
        let _span = debug_span!("evaluate", label = config.label()).entered();
        let mut record = |equation: Equation, context: &str| {
            if config.label().is_empty() {
                tracker.record(equation, context);
            } else {
                tracker.record_for_member(equation, context, config.label());
            }
        };

        let dk = config.piston_diameter_mm();
        let ds = config.rod_diameter_mm();
        let dho = config.hollow_rod_inner_diameter_mm();
        let span = config.mounting_distance_mm();
        let e = config.elasticity_modulus_nmm2();

        // Geometry
        let area = piston_annulus_area(dk, ds);
        let area_rod = rod_area(ds, dho);
        record(Equation::PistonAnnulusArea, "piston annulus");
        record(Equation::RodCrossSectionArea, "rod section");

        // Force and stress chain
        let push_force = push_force_kn(config.system_pressure_nmm2(), area);
        record(Equation::PushForce, "system pressure on annulus");
        let sd = press_stress(push_force, area_rod);
        record(Equation::PressStress, "axial stress");

        let wb = rod_resistance_moment(ds, dho);
        if config.is_hollow() {
            record(Equation::ResistanceMomentHollow, "hollow rod");
        } else {
            record(Equation::ResistanceMomentSolid, "solid rod");
        }

        let q = line_load(steel_specific_weight(), area_rod);
        record(Equation::LineLoad, "rod self-weight");
        let sb = bending_stress(q, span, wb);
        record(Equation::BendingStress, "self-weight over mounting distance");
        let sk = sd + sb;
        record(Equation::CombinedBucklingStress, "axial + bending");
        debug!(area, area_rod, push_force, sd, sb, sk, "stress chain");

        // Buckling
        let angle = Radians::from(config.installation_angle());
        let lk = free_buckling_length(span, config.mounting().end_factor(), config.stroke_mm(), angle);
        record(Equation::FreeBucklingLength, config.mounting().label());

        let inertia = rod_moment_of_inertia(ds, dho);
        record(Equation::MomentOfInertia, "rod section");
        let fk = euler_buckling_force_kn(e, inertia, lk);
        record(Equation::EulerBucklingForce, "Euler");

        let existing = SafetyFactor::from_ratio(safety_factor(fk, push_force));
        record(Equation::ExistingSafetyFactor, "Fk / Fd");
        if existing.is_undefined() {
            debug!(push_force, "no usable push force, safety factor undefined");
        }

        let radius = radius_of_gyration(inertia, area_rod);
        record(Equation::RadiusOfGyration, "rod section");
        let lambda = slenderness_ratio(lk, radius);
        record(Equation::SlendernessRatio, "rod");
        let boundary = boundary_line(e, config.proof_stress_nmm2());
        record(Equation::BoundaryLine, "Euler/Johnson transition");
        let regime = Regime::classify(lambda, boundary);
        record(Equation::RegimeClassification, regime.message());
        debug!(lk, inertia, fk, lambda, boundary, ?regime, "buckling");

        // Diameters and checks
        let ideal = ideal_rod_diameter(fk, lk, e);
        record(Equation::IdealRodDiameter, "back-solve of Fk");
        let required = required_rod_diameter(push_force, config.safety_factor_target(), lk, e);
        record(Equation::RequiredRodDiameter, "target safety factor");
        let safety_check = SafetyCheck::assess(existing, config.safety_factor_target());
        record(Equation::SafetyCheck, "existing vs. target");

        if !regime.is_euler() {
            warn!(lambda, boundary, "slenderness at or above boundary line, Euler result not valid");
        }
        if !safety_check.passes() {
            warn!(
                existing = existing.as_f64(),
                target = config.safety_factor_target(),
                required_rod_diameter = required,
                "safety factor below target"
            );
        }

        BucklingResult {
            piston_annulus_area: area,
            rod_cross_section_area: area_rod,
            line_load: q,
            push_force,
            press_stress: sd,
            resistance_moment: wb,
            bending_stress: sb,
            buckling_stress: sk,
            free_buckling_length: lk,
            moment_of_inertia: inertia,
            buckling_force: fk,
            existing_safety_factor: existing,
            radius_of_gyration: radius,
            slenderness_ratio: lambda,
            boundary_line: boundary,
            ideal_rod_diameter: ideal,
            required_rod_diameter: required,
            regime,
            safety_check,
        }
    }
}

/// Evaluate a validated configuration.
pub fn evaluate(config: &RodConfiguration) -> BucklingResult {
    BucklingCalculator.evaluate(config)
}

/// Evaluate a validated configuration, recording the equations applied.
pub fn evaluate_traced(config: &RodConfiguration, tracker: &mut EquationTracker) -> BucklingResult {
    BucklingCalculator.evaluate_traced(config, tracker)
}

/// Validate raw input and evaluate it.
///
/// # Returns
///
/// * `Ok(BucklingResult)` - Calculation results
/// * `Err(CalcError::InvalidConfiguration)` - If inputs are invalid; nothing is computed
pub fn calculate(input: &RodInput) -> CalcResult<BucklingResult> {
    let config = RodConfiguration::new(input.clone())?;
    Ok(evaluate(&config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::config::PressureUnit;
    use crate::calculations::mounting::MountingCondition;
    use crate::errors::CalcError;
    use std::f64::consts::PI;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn reference() -> RodConfiguration {
        RodConfiguration::new(RodInput::reference()).unwrap()
    }

    fn with(edit: impl FnOnce(&mut RodInput)) -> RodConfiguration {
        let mut input = RodInput::reference();
        edit(&mut input);
        RodConfiguration::new(input).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let r = evaluate(&reference());

        assert!(approx_eq(r.piston_annulus_area, 4398.2, 0.1), "A = {}", r.piston_annulus_area);
        assert!(approx_eq(r.push_force, 879.6, 0.1), "Fd = {}", r.push_force);
        assert!(approx_eq(r.moment_of_inertia, 306_796.0, 1.0), "I = {}", r.moment_of_inertia);
        assert!(
            r.free_buckling_length > 1100.0 && r.free_buckling_length < 1300.0,
            "Lk = {}",
            r.free_buckling_length
        );
        assert!(approx_eq(r.boundary_line, 108.8, 0.1), "boundary = {}", r.boundary_line);

        // λ = 1160.94 / 12.5 = 92.88 < 108.83
        assert!(approx_eq(r.radius_of_gyration, 12.5, 1e-9));
        assert!(approx_eq(r.slenderness_ratio, 92.88, 0.01), "λ = {}", r.slenderness_ratio);
        assert_eq!(r.regime, Regime::Euler);
    }

    #[test]
    fn test_reference_stresses_and_forces() {
        let r = evaluate(&reference());

        assert!(approx_eq(r.press_stress, 448.0, 0.01), "sd = {}", r.press_stress);
        assert!(approx_eq(r.resistance_moment, 12_271.85, 0.01));
        assert!(approx_eq(r.line_load, 0.15121, 1e-4), "q = {}", r.line_load);
        assert!(approx_eq(r.bending_stress, 1.8635, 1e-3), "sb = {}", r.bending_stress);
        assert_eq!(r.buckling_stress, r.press_stress + r.bending_stress);

        // Fk = π² · 210000 · 306796.16 / 1160.94² / 1000
        assert!(approx_eq(r.buckling_force, 471.80, 0.05), "Fk = {}", r.buckling_force);
        let s = r.existing_safety_factor.value().unwrap();
        assert!(approx_eq(s, 0.5364, 1e-3), "S = {}", s);
        assert_eq!(r.safety_check, SafetyCheck::Fail);
    }

    #[test]
    fn test_ideal_diameter_of_solid_rod_is_rod_diameter() {
        let r = evaluate(&reference());
        assert!(approx_eq(r.ideal_rod_diameter, 50.0, 1e-6), "d = {}", r.ideal_rod_diameter);
    }

    #[test]
    fn test_ideal_diameter_of_hollow_rod() {
        let r = evaluate(&with(|i| i.hollow_rod_inner_diameter_mm = 30.0));
        let expected = (50.0_f64.powi(4) - 30.0_f64.powi(4)).powf(0.25);
        assert!(approx_eq(r.ideal_rod_diameter, expected, 1e-6));
    }

    #[test]
    fn test_required_diameter_reaches_target() {
        let config = reference();
        let r = evaluate(&config);
        let i_req = PI * r.required_rod_diameter.powi(4) / 64.0;
        let fk_req = euler_buckling_force_kn(config.elasticity_modulus_nmm2(), i_req, r.free_buckling_length);
        assert!(approx_eq(fk_req, 2.5 * r.push_force, 1e-6), "Fk_req = {}", fk_req);
        assert!(r.required_rod_diameter > config.rod_diameter_mm());
    }

    #[test]
    fn test_positive_area_and_inertia() {
        let configs = [
            reference(),
            with(|i| i.hollow_rod_inner_diameter_mm = 49.0),
            with(|i| {
                i.piston_diameter_mm = 45.5;
                i.rod_diameter_mm = 45.0;
            }),
            with(|i| i.mounting = MountingCondition::FixedFixed),
        ];
        for config in &configs {
            let r = evaluate(config);
            assert!(r.piston_annulus_area > 0.0);
            assert!(r.moment_of_inertia > 0.0);
        }
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let config = with(|i| {
            i.hollow_rod_inner_diameter_mm = 20.0;
            i.installation_angle_deg = 45.0;
        });
        let a = evaluate(&config);
        let b = evaluate(&config);
        assert_eq!(a, b);
        assert_eq!(a.buckling_force.to_bits(), b.buckling_force.to_bits());
        assert_eq!(a.free_buckling_length.to_bits(), b.free_buckling_length.to_bits());
    }

    #[test]
    fn test_modulus_monotonicity() {
        let mut previous: Option<BucklingResult> = None;
        for e in [70_000.0, 110_000.0, 210_000.0, 230_000.0] {
            let r = evaluate(&with(|i| i.elasticity_modulus_nmm2 = e));
            if let Some(prev) = &previous {
                assert!(r.buckling_force > prev.buckling_force);
                assert!(r.existing_safety_factor.as_f64() > prev.existing_safety_factor.as_f64());
            }
            previous = Some(r);
        }
    }

    #[test]
    fn test_regime_consistent_with_comparison() {
        let cases = [
            reference(),
            with(|i| i.mounting = MountingCondition::FixedFree),
            with(|i| i.mounting = MountingCondition::FixedBearing),
            with(|i| i.rod_diameter_mm = 30.0),
            with(|i| i.proof_stress_nmm2 = 900.0),
        ];
        let mut seen_johnson = false;
        for config in &cases {
            let r = evaluate(config);
            assert_eq!(r.regime == Regime::Euler, r.slenderness_ratio < r.boundary_line);
            assert_eq!(r.euler_valid(), r.slenderness_ratio < r.boundary_line);
            seen_johnson |= r.regime == Regime::Johnson;
        }
        assert!(seen_johnson, "expected at least one Johnson case");
    }

    #[test]
    fn test_regime_classify_boundary() {
        assert_eq!(Regime::classify(100.0, 100.0), Regime::Johnson);
        assert_eq!(Regime::classify(99.999, 100.0), Regime::Euler);
        assert!(Regime::Euler.is_euler());
        assert!(Regime::Johnson.message().contains("Johnson"));
    }

    #[test]
    fn test_solid_rod_reduction() {
        let r = evaluate(&reference());
        let ds: f64 = 50.0;
        assert!(approx_eq(r.resistance_moment, PI * ds.powi(3) / 32.0, 1e-6));
        assert!(approx_eq(r.moment_of_inertia, PI * ds.powi(4) / 64.0, 1e-6));
    }

    #[test]
    fn test_zero_pressure() {
        let r = evaluate(&with(|i| i.system_pressure = 0.0));
        assert_eq!(r.push_force, 0.0);
        assert_eq!(r.existing_safety_factor, SafetyFactor::Undefined);
        assert!(r.existing_safety_factor.as_f64().is_infinite());
        assert_eq!(r.required_rod_diameter, 0.0);
        assert_eq!(r.safety_check, SafetyCheck::Pass);
        assert!(r.buckling_force > 0.0);
    }

    #[test]
    fn test_vanishing_pressure_is_undefined_and_round_trips() {
        let r = evaluate(&with(|i| i.system_pressure = 1e-310));
        assert!(r.push_force > 0.0);
        assert!(r.existing_safety_factor.is_undefined());
        assert_eq!(r.safety_check, SafetyCheck::Pass);

        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"existing_safety_factor\":\"undefined\""));
        let roundtrip: BucklingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.existing_safety_factor, SafetyFactor::Undefined);
    }

    #[test]
    fn test_huge_rod_stays_finite() {
        let r = evaluate(&with(|i| {
            i.piston_diameter_mm = 2e40;
            i.rod_diameter_mm = 1e40;
            i.hollow_rod_inner_diameter_mm = 9e39;
            i.mounting_distance_mm = 1e40;
        }));
        assert!(r.moment_of_inertia.is_finite() && r.moment_of_inertia > 0.0);
        assert!(r.slenderness_ratio.is_finite());
        assert!(r.existing_safety_factor.as_f64().is_finite());
        assert_eq!(r.regime, Regime::classify(r.slenderness_ratio, r.boundary_line));
    }

    #[test]
    fn test_zero_rod_diameter_rejected_before_evaluation() {
        let mut input = RodInput::reference();
        input.rod_diameter_mm = 0.0;
        match calculate(&input) {
            Err(CalcError::InvalidConfiguration { field, .. }) => assert_eq!(field, "rod_diameter_mm"),
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_bar_input_matches_nmm2_input() {
        let nmm2 = evaluate(&reference());
        let bar = evaluate(&with(|i| {
            i.system_pressure = 2000.0;
            i.pressure_unit = PressureUnit::Bar;
        }));
        assert!(approx_eq(bar.push_force, nmm2.push_force, 1e-9));
        assert_eq!(bar.regime, nmm2.regime);
    }

    #[test]
    fn test_angle_increases_buckling_length() {
        let flat = evaluate(&with(|i| i.installation_angle_deg = 0.0));
        let steep = evaluate(&with(|i| i.installation_angle_deg = 45.0));
        assert_eq!(flat.free_buckling_length, 1100.0);
        assert!(steep.free_buckling_length > flat.free_buckling_length);
        assert!(steep.buckling_force < flat.buckling_force);
    }

    #[test]
    fn test_tracker_records_hollow_branch() {
        let mut tracker = EquationTracker::new();
        let config = with(|i| {
            i.label = "R-7".to_string();
            i.hollow_rod_inner_diameter_mm = 25.0;
        });
        evaluate_traced(&config, &mut tracker);

        let used = tracker.unique_equations();
        assert!(used.contains(&Equation::ResistanceMomentHollow));
        assert!(!used.contains(&Equation::ResistanceMomentSolid));
        assert_eq!(used.len(), 19);
        assert!(tracker.usages().iter().all(|u| u.member_label.as_deref() == Some("R-7")));
    }

    #[test]
    fn test_safety_factor_serialization() {
        let json = serde_json::to_string(&SafetyFactor::Undefined).unwrap();
        assert_eq!(json, "\"undefined\"");
        let json = serde_json::to_string(&SafetyFactor::Value(2.5)).unwrap();
        assert_eq!(json, "{\"value\":2.5}");
        assert_eq!(format!("{:.2}", SafetyFactor::Value(2.5)), "2.50");
    }

    #[test]
    fn test_result_serialization() {
        let r = evaluate(&reference());
        let json = serde_json::to_string_pretty(&r).unwrap();
        assert!(json.contains("\"regime\": \"Euler\""));
        let roundtrip: BucklingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r.push_force, roundtrip.push_force);
        assert_eq!(r.regime, roundtrip.regime);
    }
}
