//! # Result Report Table
//!
//! Flattens a [`BucklingResult`] into labelled rows with unit and display
//! precision so every front end prints the same table.
//!
//! ```rust
//! use rod_core::calculations::{calculate, RodInput};
//!
//! let result = calculate(&RodInput::reference()).unwrap();
//! for row in result.report_rows() {
//!     println!("{:<32} {:>6} = {:>14} {}", row.label, row.symbol, row.formatted(), row.unit);
//! }
//! ```

use serde::Serialize;

use crate::calculations::buckling::BucklingResult;

/// One line of the result report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Stable snake_case key, matches the `BucklingResult` field name
    pub key: &'static str,
    pub label: &'static str,
    pub symbol: &'static str,
    /// `None` for an undefined value (safety factor without push force)
    pub value: Option<f64>,
    pub unit: &'static str,
    /// Decimal places for display
    pub precision: usize,
}

impl ReportRow {
    fn new(
        key: &'static str,
        label: &'static str,
        symbol: &'static str,
        value: f64,
        unit: &'static str,
        precision: usize,
    ) -> Self {
        ReportRow {
            key,
            label,
            symbol,
            value: Some(value),
            unit,
            precision,
        }
    }

    /// Value rounded to the row precision, or "undefined"
    pub fn formatted(&self) -> String {
        match self.value {
            Some(v) => format!("{:.*}", self.precision, v),
            None => "undefined".to_string(),
        }
    }
}

impl BucklingResult {
    /// Report rows in calculation order.
    pub fn report_rows(&self) -> Vec<ReportRow> {
        let mut safety = ReportRow::new(
            "existing_safety_factor",
            "Existing safety factor",
            "Svorh",
            0.0,
            "-",
            3,
        );
        safety.value = self.existing_safety_factor.value();

        vec![
            ReportRow::new("piston_annulus_area", "Piston annulus area", "A", self.piston_annulus_area, "mm²", 2),
            ReportRow::new(
                "rod_cross_section_area",
                "Rod cross-section area",
                "A_rod",
                self.rod_cross_section_area,
                "mm²",
                2,
            ),
            ReportRow::new("line_load", "Line load (self-weight)", "q", self.line_load, "N/mm", 6),
            ReportRow::new("push_force", "Push force", "Fd", self.push_force, "kN", 2),
            ReportRow::new("press_stress", "Press stress", "sd", self.press_stress, "N/mm²", 2),
            ReportRow::new("resistance_moment", "Resistance moment", "Wb", self.resistance_moment, "mm³", 2),
            ReportRow::new("bending_stress", "Bending stress", "sb", self.bending_stress, "N/mm²", 4),
            ReportRow::new("buckling_stress", "Buckling stress", "sk", self.buckling_stress, "N/mm²", 2),
            ReportRow::new(
                "free_buckling_length",
                "Free buckling length",
                "Lk",
                self.free_buckling_length,
                "mm",
                2,
            ),
            ReportRow::new("moment_of_inertia", "Moment of inertia", "I", self.moment_of_inertia, "mm⁴", 2),
            ReportRow::new("buckling_force", "Buckling force (Euler)", "Fk", self.buckling_force, "kN", 2),
            safety,
            ReportRow::new("radius_of_gyration", "Radius of gyration", "i", self.radius_of_gyration, "mm", 3),
            ReportRow::new("slenderness_ratio", "Slenderness ratio", "λ", self.slenderness_ratio, "-", 2),
            ReportRow::new("boundary_line", "Boundary line", "λb", self.boundary_line, "-", 2),
            ReportRow::new("ideal_rod_diameter", "Ideal rod diameter", "d", self.ideal_rod_diameter, "mm", 2),
            ReportRow::new(
                "required_rod_diameter",
                "Required rod diameter",
                "d_req",
                self.required_rod_diameter,
                "mm",
                2,
            ),
        ]
    }
}
