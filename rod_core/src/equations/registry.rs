//! # Equation Registry
//!
//! Central registry of every formula used in the rod buckling calculation.
//! Each equation has metadata including a reference, a plain-text formula
//! and variable definitions with units.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for reports and audit trails
//! - Usage tracking during an evaluation (`EquationTracker`)
//! - Markdown generation for EQUATIONS.md
//!
//! ## Usage
//!
//! ```rust
//! use rod_core::equations::registry::{Equation, EquationUsage};
//!
//! // Track equation usage during calculation
//! let usage = EquationUsage::new(Equation::EulerBucklingForce, "Rod R-1");
//!
//! // Get metadata for the report
//! let meta = Equation::EulerBucklingForce.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Source a formula is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// Fundamental mechanics (geometry, statics, beam bending)
    Mechanics,
    /// Euler column buckling theory
    EulerColumn,
    /// Euler-Johnson transition slenderness
    JohnsonTransition,
    /// Hydraulic cylinder design practice (pressure, mounting, installation)
    CylinderPractice,
    /// Design check derived from other results
    DesignCheck,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> &'static str {
        match self {
            CodeReference::Mechanics => "Fundamental Mechanics",
            CodeReference::EulerColumn => "Euler Column Theory",
            CodeReference::JohnsonTransition => "Euler-Johnson Transition",
            CodeReference::CylinderPractice => "Hydraulic Cylinder Design Practice",
            CodeReference::DesignCheck => "Design Check",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Section properties (A, I, Wb, i)
    SectionProperties,
    /// External loads (push force, self-weight)
    Loads,
    /// Stress calculations
    Stresses,
    /// Buckling length, force and slenderness
    Buckling,
    /// Safety factor, regime and diameter checks
    DesignChecks,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::SectionProperties => "Section Properties",
            EquationCategory::Loads => "Loads",
            EquationCategory::Stresses => "Stresses",
            EquationCategory::Buckling => "Buckling",
            EquationCategory::DesignChecks => "Design Checks",
        }
    }

    /// Sort order for reports (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::SectionProperties => 1,
            EquationCategory::Loads => 2,
            EquationCategory::Stresses => 3,
            EquationCategory::Buckling => 4,
            EquationCategory::DesignChecks => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "Fd", "Lk")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "kN", "mm")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a formula.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Euler Buckling Force")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text (human-readable)
    pub formula_plain: &'static str,
    /// Reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All formulas used by the rod buckling calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Section Properties
    // -------------------------------------------------------------------------
    /// A = π/4 (Dk² − Ds²)
    PistonAnnulusArea,
    /// A_rod = π/4 (Ds² − Dho²)
    RodCrossSectionArea,
    /// I = π (Ds⁴ − Dho⁴) / 64
    MomentOfInertia,
    /// Wb = π Ds³ / 32
    ResistanceMomentSolid,
    /// Wb = π (Ds⁴ − Dho⁴) / (32 Ds)
    ResistanceMomentHollow,
    /// i = √(I / A_rod)
    RadiusOfGyration,

    // -------------------------------------------------------------------------
    // Loads
    // -------------------------------------------------------------------------
    /// Fd = pS A / 1000
    PushForce,
    /// q = ρ g A_rod
    LineLoad,

    // -------------------------------------------------------------------------
    // Stresses
    // -------------------------------------------------------------------------
    /// sd = Fd 1000 / A_rod
    PressStress,
    /// sb = q L² / (8 Wb)
    BendingStress,
    /// sk = sd + sb
    CombinedBucklingStress,

    // -------------------------------------------------------------------------
    // Buckling
    // -------------------------------------------------------------------------
    /// Lk = L k √(1 + (H/L)² sin²α)
    FreeBucklingLength,
    /// Fk = π² E I / Lk² / 1000
    EulerBucklingForce,
    /// λ = Lk / i
    SlendernessRatio,
    /// λ_boundary = 2π √(E / (2 sS))
    BoundaryLine,

    // -------------------------------------------------------------------------
    // Design Checks
    // -------------------------------------------------------------------------
    /// S = Fk / Fd
    ExistingSafetyFactor,
    /// Euler if λ < λ_boundary
    RegimeClassification,
    /// d = (64 Fk 1000 Lk² / (π³ E))^(1/4)
    IdealRodDiameter,
    /// d_req = (64 S Fd 1000 Lk² / (π³ E))^(1/4)
    RequiredRodDiameter,
    /// S ≥ S_target
    SafetyCheck,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::PistonAnnulusArea => EquationMetadata {
                name: "Piston Annulus Area",
                description: "Pressurised area between the piston bore and the rod",
                formula_plain: "A = pi/4 * (Dk^2 - Ds^2)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("A", "Piston annulus area", "mm²"),
                    Variable::new("Dk", "Piston diameter", "mm"),
                    Variable::new("Ds", "Rod diameter", "mm"),
                ],
                assumptions: vec!["Dk > Ds"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "piston_annulus_area",
            },

            Equation::RodCrossSectionArea => EquationMetadata {
                name: "Rod Cross-Section Area",
                description: "Area of a solid or hollow circular rod",
                formula_plain: "A_rod = pi/4 * (Ds^2 - Dho^2)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("A_rod", "Rod cross-section area", "mm²"),
                    Variable::new("Ds", "Rod diameter", "mm"),
                    Variable::new("Dho", "Rod bore diameter (0 = solid)", "mm"),
                ],
                assumptions: vec!["Concentric bore"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "rod_area",
            },

            Equation::MomentOfInertia => EquationMetadata {
                name: "Moment of Inertia",
                description: "Second moment of area of the rod about a diameter",
                formula_plain: "I = pi * (Ds^4 - Dho^4) / 64",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("I", "Moment of inertia", "mm⁴"),
                    Variable::new("Ds", "Rod diameter", "mm"),
                    Variable::new("Dho", "Rod bore diameter", "mm"),
                ],
                assumptions: vec!["Circular section, same in every bending direction"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "rod_moment_of_inertia",
            },

            Equation::ResistanceMomentSolid => EquationMetadata {
                name: "Resistance Moment (Solid Rod)",
                description: "Section modulus of a solid circular rod",
                formula_plain: "Wb = pi * Ds^3 / 32",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("Wb", "Resistance moment", "mm³"),
                    Variable::new("Ds", "Rod diameter", "mm"),
                ],
                assumptions: vec!["Dho = 0"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "rod_resistance_moment",
            },

            Equation::ResistanceMomentHollow => EquationMetadata {
                name: "Resistance Moment (Hollow Rod)",
                description: "Section modulus of a hollow circular rod",
                formula_plain: "Wb = pi * (Ds^4 - Dho^4) / (32 * Ds)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("Wb", "Resistance moment", "mm³"),
                    Variable::new("Ds", "Rod diameter", "mm"),
                    Variable::new("Dho", "Rod bore diameter", "mm"),
                ],
                assumptions: vec!["0 < Dho < Ds"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "rod_resistance_moment",
            },

            Equation::RadiusOfGyration => EquationMetadata {
                name: "Radius of Gyration",
                description: "Distribution of the rod area about the bending axis",
                formula_plain: "i = sqrt(I / A_rod)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("i", "Radius of gyration", "mm"),
                    Variable::new("I", "Moment of inertia", "mm⁴"),
                    Variable::new("A_rod", "Rod cross-section area", "mm²"),
                ],
                assumptions: vec!["Equals Ds/4 for a solid rod"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "radius_of_gyration",
            },

            Equation::PushForce => EquationMetadata {
                name: "Push Force",
                description: "Axial force delivered by the system pressure on the annulus",
                formula_plain: "Fd = pS * A / 1000",
                reference: CodeReference::CylinderPractice,
                variables: vec![
                    Variable::new("Fd", "Push force", "kN"),
                    Variable::new("pS", "System pressure", "N/mm²"),
                    Variable::new("A", "Piston annulus area", "mm²"),
                ],
                assumptions: vec!["Pressure in N/mm² (bar converted once at input, 1 bar = 0.1 N/mm²)"],
                category: EquationCategory::Loads,
                source_module: "equations/buckling.rs",
                source_function: "push_force_kn",
            },

            Equation::LineLoad => EquationMetadata {
                name: "Self-Weight Line Load",
                description: "Distributed load from the rod's own weight",
                formula_plain: "q = |rho * g * A_rod|",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("q", "Line load", "N/mm"),
                    Variable::new("rho", "Steel density (7.85e-6)", "kg/mm³"),
                    Variable::new("g", "Gravitational acceleration (9.81)", "m/s²"),
                    Variable::new("A_rod", "Rod cross-section area", "mm²"),
                ],
                assumptions: vec!["Magnitude only, direction does not change the stress value"],
                category: EquationCategory::Loads,
                source_module: "equations/buckling.rs",
                source_function: "line_load",
            },

            Equation::PressStress => EquationMetadata {
                name: "Press Stress",
                description: "Axial compressive stress in the rod",
                formula_plain: "sd = Fd * 1000 / A_rod",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("sd", "Press stress", "N/mm²"),
                    Variable::new("Fd", "Push force", "kN"),
                    Variable::new("A_rod", "Rod cross-section area", "mm²"),
                ],
                assumptions: vec!["Uniform stress over the section"],
                category: EquationCategory::Stresses,
                source_module: "equations/buckling.rs",
                source_function: "press_stress",
            },

            Equation::BendingStress => EquationMetadata {
                name: "Bending Stress",
                description: "Maximum bending stress from self-weight over the mounting distance",
                formula_plain: "sb = q * L^2 / (8 * Wb)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("sb", "Bending stress", "N/mm²"),
                    Variable::new("q", "Line load", "N/mm"),
                    Variable::new("L", "Mounting distance", "mm"),
                    Variable::new("Wb", "Resistance moment", "mm³"),
                ],
                assumptions: vec!["Simply supported between mountings", "Maximum at midspan"],
                category: EquationCategory::Stresses,
                source_module: "equations/buckling.rs",
                source_function: "bending_stress",
            },

            Equation::CombinedBucklingStress => EquationMetadata {
                name: "Combined Buckling Stress",
                description: "Axial plus bending stress on the compressed fibre",
                formula_plain: "sk = sd + sb",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("sk", "Buckling stress", "N/mm²"),
                    Variable::new("sd", "Press stress", "N/mm²"),
                    Variable::new("sb", "Bending stress", "N/mm²"),
                ],
                assumptions: vec!["Linear superposition"],
                category: EquationCategory::Stresses,
                source_module: "calculations/buckling.rs",
                source_function: "evaluate",
            },

            Equation::FreeBucklingLength => EquationMetadata {
                name: "Free Buckling Length",
                description: "Effective column length from mounting condition and installation angle",
                formula_plain: "Lk = L * k * sqrt(1 + (H/L)^2 * sin^2(alpha))",
                reference: CodeReference::CylinderPractice,
                variables: vec![
                    Variable::new("Lk", "Free buckling length", "mm"),
                    Variable::new("L", "Mounting distance", "mm"),
                    Variable::new("k", "Mounting end factor (1.0, 0.7, 2.0, 4.0)", "-"),
                    Variable::new("H", "Stroke", "mm"),
                    Variable::new("alpha", "Installation angle", "rad"),
                ],
                assumptions: vec!["Angle given in degrees and converted once before use"],
                category: EquationCategory::Buckling,
                source_module: "equations/buckling.rs",
                source_function: "free_buckling_length",
            },

            Equation::EulerBucklingForce => EquationMetadata {
                name: "Euler Buckling Force",
                description: "Critical axial load of an elastic column",
                formula_plain: "Fk = pi^2 * E * I / Lk^2 / 1000",
                reference: CodeReference::EulerColumn,
                variables: vec![
                    Variable::new("Fk", "Buckling force", "kN"),
                    Variable::new("E", "Modulus of elasticity", "N/mm²"),
                    Variable::new("I", "Moment of inertia", "mm⁴"),
                    Variable::new("Lk", "Free buckling length", "mm"),
                ],
                assumptions: vec!["Linear elastic material", "Straight, centrally loaded rod"],
                category: EquationCategory::Buckling,
                source_module: "equations/buckling.rs",
                source_function: "euler_buckling_force_kn",
            },

            Equation::SlendernessRatio => EquationMetadata {
                name: "Slenderness Ratio",
                description: "Buckling length relative to radius of gyration",
                formula_plain: "lambda = Lk / i",
                reference: CodeReference::EulerColumn,
                variables: vec![
                    Variable::new("lambda", "Slenderness ratio", "-"),
                    Variable::new("Lk", "Free buckling length", "mm"),
                    Variable::new("i", "Radius of gyration", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::Buckling,
                source_module: "equations/buckling.rs",
                source_function: "slenderness_ratio",
            },

            Equation::BoundaryLine => EquationMetadata {
                name: "Boundary Line",
                description: "Slenderness at the Euler/Johnson transition",
                formula_plain: "lambda_boundary = 2 * pi * sqrt(E / (2 * sS))",
                reference: CodeReference::JohnsonTransition,
                variables: vec![
                    Variable::new("lambda_boundary", "Transition slenderness", "-"),
                    Variable::new("E", "Modulus of elasticity", "N/mm²"),
                    Variable::new("sS", "Proof stress", "N/mm²"),
                ],
                assumptions: vec!["Transition at half the proof stress"],
                category: EquationCategory::Buckling,
                source_module: "equations/buckling.rs",
                source_function: "boundary_line",
            },

            Equation::ExistingSafetyFactor => EquationMetadata {
                name: "Existing Safety Factor",
                description: "Ratio of buckling force to push force",
                formula_plain: "S = Fk / Fd",
                reference: CodeReference::DesignCheck,
                variables: vec![
                    Variable::new("S", "Existing safety factor", "-"),
                    Variable::new("Fk", "Buckling force", "kN"),
                    Variable::new("Fd", "Push force", "kN"),
                ],
                assumptions: vec!["Undefined when Fd = 0"],
                category: EquationCategory::DesignChecks,
                source_module: "equations/buckling.rs",
                source_function: "safety_factor",
            },

            Equation::RegimeClassification => EquationMetadata {
                name: "Regime Classification",
                description: "Threshold comparison selecting the applicable buckling theory",
                formula_plain: "Euler if lambda < lambda_boundary, else Johnson",
                reference: CodeReference::JohnsonTransition,
                variables: vec![
                    Variable::new("lambda", "Slenderness ratio", "-"),
                    Variable::new("lambda_boundary", "Transition slenderness", "-"),
                ],
                assumptions: vec!["No Johnson stress is computed, only the flag"],
                category: EquationCategory::DesignChecks,
                source_module: "calculations/buckling.rs",
                source_function: "Regime::classify",
            },

            Equation::IdealRodDiameter => EquationMetadata {
                name: "Ideal Rod Diameter",
                description: "Solid diameter with the same Euler force as the rod",
                formula_plain: "d = (64 * Fk * 1000 * Lk^2 / (pi^3 * E))^(1/4)",
                reference: CodeReference::EulerColumn,
                variables: vec![
                    Variable::new("d", "Ideal rod diameter", "mm"),
                    Variable::new("Fk", "Buckling force", "kN"),
                    Variable::new("Lk", "Free buckling length", "mm"),
                    Variable::new("E", "Modulus of elasticity", "N/mm²"),
                ],
                assumptions: vec!["Solid circular section"],
                category: EquationCategory::DesignChecks,
                source_module: "equations/buckling.rs",
                source_function: "ideal_rod_diameter",
            },

            Equation::RequiredRodDiameter => EquationMetadata {
                name: "Required Rod Diameter",
                description: "Solid diameter whose Euler force reaches the target safety factor",
                formula_plain: "d_req = (64 * S_target * Fd * 1000 * Lk^2 / (pi^3 * E))^(1/4)",
                reference: CodeReference::EulerColumn,
                variables: vec![
                    Variable::new("d_req", "Required rod diameter", "mm"),
                    Variable::new("S_target", "Target safety factor", "-"),
                    Variable::new("Fd", "Push force", "kN"),
                    Variable::new("Lk", "Free buckling length", "mm"),
                    Variable::new("E", "Modulus of elasticity", "N/mm²"),
                ],
                assumptions: vec!["Solid circular section", "Zero when Fd = 0"],
                category: EquationCategory::DesignChecks,
                source_module: "equations/buckling.rs",
                source_function: "required_rod_diameter",
            },

            Equation::SafetyCheck => EquationMetadata {
                name: "Safety Check",
                description: "Existing safety factor against the target",
                formula_plain: "S >= S_target",
                reference: CodeReference::DesignCheck,
                variables: vec![
                    Variable::new("S", "Existing safety factor", "-"),
                    Variable::new("S_target", "Target safety factor", "-"),
                ],
                assumptions: vec!["Passes when no push force acts"],
                category: EquationCategory::DesignChecks,
                source_module: "calculations/buckling.rs",
                source_function: "SafetyCheck::assess",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> &'static [Equation] {
        BY_CATEGORY.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get all categories, sorted for reports
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![SectionProperties, Loads, Stresses, Buckling, DesignChecks];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    // Section properties
    Equation::PistonAnnulusArea,
    Equation::RodCrossSectionArea,
    Equation::MomentOfInertia,
    Equation::ResistanceMomentSolid,
    Equation::ResistanceMomentHollow,
    Equation::RadiusOfGyration,
    // Loads
    Equation::PushForce,
    Equation::LineLoad,
    // Stresses
    Equation::PressStress,
    Equation::BendingStress,
    Equation::CombinedBucklingStress,
    // Buckling
    Equation::FreeBucklingLength,
    Equation::EulerBucklingForce,
    Equation::SlendernessRatio,
    Equation::BoundaryLine,
    // Design checks
    Equation::ExistingSafetyFactor,
    Equation::RegimeClassification,
    Equation::IdealRodDiameter,
    Equation::RequiredRodDiameter,
    Equation::SafetyCheck,
];

static BY_CATEGORY: Lazy<HashMap<EquationCategory, Vec<Equation>>> = Lazy::new(|| {
    let mut map: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
    for eq in ALL_EQUATIONS {
        map.entry(eq.metadata().category).or_default().push(*eq);
    }
    map
});

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Context describing where/why it was used (e.g., "hollow rod section")
    pub context: String,
    /// Optional: the rod label this equation was applied to
    pub member_label: Option<String>,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: None,
        }
    }

    /// Create usage record with member label
    pub fn for_member(equation: Equation, context: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: Some(label.into()),
        }
    }
}

/// Collector for equation usage during a calculation.
///
/// Pass this to [`evaluate_traced`](crate::calculations::buckling::evaluate_traced)
/// to track which equations are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Record equation usage for a specific member
    pub fn record_for_member(&mut self, equation: Equation, context: impl Into<String>, label: impl Into<String>) {
        self.usages.push(EquationUsage::for_member(equation, context, label));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used (deduplicated, first-use order)
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();

        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md file for documentation.
///
/// # Example
///
/// ```rust
/// use rod_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Rod Buckling Equations Reference"));
/// assert!(markdown.contains("Section Properties"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Rod Buckling Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the piston rod buckling calculation.
Each equation includes its formula, reference, source location, and assumptions.

## Units and Conventions

| Quantity | Unit / Convention |
|----------|-------------------|
| Lengths, diameters | mm |
| Pressure, stress | N/mm² (bar converted once at input) |
| Forces | kN |
| Installation angle | degrees at input, radians inside trigonometry |
| Stresses | Compressive magnitudes, always positive |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 20);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(!meta.source_module.is_empty(), "Equation {:?} missing source_module", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} missing source_function", eq);
        }

        let euler = Equation::EulerBucklingForce.metadata();
        assert!(euler.formula_plain.contains("pi^2 * E * I / Lk^2"), "Euler force formula wrong");
    }

    #[test]
    fn test_every_equation_in_exactly_one_category() {
        let total: usize = Equation::all_categories()
            .iter()
            .map(|c| Equation::in_category(*c).len())
            .sum();
        assert_eq!(total, ALL_EQUATIONS.len());
        assert_eq!(Equation::in_category(EquationCategory::SectionProperties).len(), 6);
    }

    #[test]
    fn test_equation_tracker() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::PushForce, "rod 1");
        tracker.record(Equation::EulerBucklingForce, "rod 1");
        tracker.record(Equation::PushForce, "rod 2");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(tracker.unique_equations(), vec![Equation::PushForce, Equation::EulerBucklingForce]);
    }

    #[test]
    fn test_by_category() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::BoundaryLine, "test");
        tracker.record(Equation::PushForce, "test");
        tracker.record_for_member(Equation::MomentOfInertia, "test", "R-1");

        let by_cat = tracker.by_category();
        let categories: Vec<_> = by_cat.iter().map(|(cat, _)| *cat).collect();
        assert_eq!(
            categories,
            vec![EquationCategory::SectionProperties, EquationCategory::Loads, EquationCategory::Buckling]
        );
    }

    #[test]
    fn test_categories_sorted() {
        let cats = Equation::all_categories();
        let orders: Vec<u8> = cats.iter().map(|c| c.sort_order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted, "Categories should be sorted by sort_order");
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();

        assert!(markdown.contains("# Rod Buckling Equations Reference"), "Missing title");
        assert!(markdown.contains("Auto-generated from source code"), "Missing auto-gen notice");
        assert!(markdown.contains("## Units and Conventions"), "Missing conventions");

        for cat in Equation::all_categories() {
            assert!(
                markdown.contains(&format!("## {}", cat.display_name())),
                "Missing category {}",
                cat.display_name()
            );
        }

        assert!(markdown.contains("### Free Buckling Length"));
        assert!(markdown.contains("`Fd = pS * A / 1000`"));
        assert!(markdown.contains("Euler Column Theory"));
        assert!(markdown.contains("equations/buckling.rs"));
        assert!(markdown.contains("**Total Equations:** 20"));
        assert!(markdown.contains("**Categories:** 5"));
    }
}
