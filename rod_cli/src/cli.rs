use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rod_core::calculations::{MountingCondition, PressureUnit, RodInput};

#[derive(Parser, Debug)]
#[command(name = "rod_cli", version, about = "Hydraulic piston rod buckling calculator")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Log filter (e.g. debug, rod_core=trace); overrides RUST_LOG")]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a rod from flags and/or a JSON configuration file
    Evaluate(EvaluateArgs),
    /// Prompt for every value, then evaluate
    Interactive,
    /// Print the equation reference
    Equations,
    /// Print the reference configuration as JSON
    Defaults {
        #[arg(long, help = "Write to a file instead of stdout")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PressureUnitArg {
    Nmm2,
    Bar,
}

impl From<PressureUnitArg> for PressureUnit {
    fn from(arg: PressureUnitArg) -> Self {
        match arg {
            PressureUnitArg::Nmm2 => PressureUnit::Nmm2,
            PressureUnitArg::Bar => PressureUnit::Bar,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct EvaluateArgs {
    #[arg(long, help = "RodInput JSON file; flags override its values")]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long, help = "System pressure pS")]
    pub pressure: Option<f64>,
    #[arg(long, value_enum)]
    pub pressure_unit: Option<PressureUnitArg>,
    #[arg(long, help = "Piston diameter Dk (mm)")]
    pub piston_diameter: Option<f64>,
    #[arg(long, help = "Rod diameter Ds (mm)")]
    pub rod_diameter: Option<f64>,
    #[arg(long, help = "Hollow rod inner diameter Dho (mm), 0 for solid")]
    pub hollow_diameter: Option<f64>,
    #[arg(long, help = "Outside barrel diameter (mm)")]
    pub barrel_diameter: Option<f64>,
    #[arg(long, help = "Proof stress sS (N/mm²)")]
    pub proof_stress: Option<f64>,
    #[arg(long, help = "Target safety factor S")]
    pub safety_factor: Option<f64>,
    #[arg(long, help = "Stroke H (mm)")]
    pub stroke: Option<f64>,
    #[arg(long, help = "Mounting distance L (mm)")]
    pub mounting_distance: Option<f64>,
    #[arg(long, help = "Modulus of elasticity E (N/mm²)")]
    pub modulus: Option<f64>,
    #[arg(long, help = "Installation angle α (degrees)")]
    pub angle: Option<f64>,
    #[arg(long, help = "bearing-bearing, fixed-bearing, fixed-free or fixed-fixed")]
    pub mounting: Option<MountingCondition>,
}

impl EvaluateArgs {
    /// Overlay every flag that was given onto `input`.
    pub fn apply(&self, input: &mut RodInput) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set(&mut input.label, &self.label);
        set(&mut input.system_pressure, &self.pressure);
        if let Some(unit) = self.pressure_unit {
            input.pressure_unit = unit.into();
        }
        set(&mut input.piston_diameter_mm, &self.piston_diameter);
        set(&mut input.rod_diameter_mm, &self.rod_diameter);
        set(&mut input.hollow_rod_inner_diameter_mm, &self.hollow_diameter);
        set(&mut input.outside_barrel_diameter_mm, &self.barrel_diameter);
        set(&mut input.proof_stress_nmm2, &self.proof_stress);
        set(&mut input.safety_factor_target, &self.safety_factor);
        set(&mut input.stroke_mm, &self.stroke);
        set(&mut input.mounting_distance_mm, &self.mounting_distance);
        set(&mut input.elasticity_modulus_nmm2, &self.modulus);
        set(&mut input.installation_angle_deg, &self.angle);
        set(&mut input.mounting, &self.mounting);
    }
}
