//! # Rod Buckling CLI
//!
//! Terminal front end for `rod_core`: gathers a rod configuration from flags,
//! a JSON file or interactive prompts, evaluates it and prints either a report
//! table or a JSON envelope.
//!
//! Exit codes: 0 success, 2 invalid configuration, 1 any other failure.

mod cli;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, EvaluateArgs};
use rod_core::calculations::{
    evaluate_traced, BucklingResult, MountingCondition, PressureUnit, RodConfiguration, RodInput,
};
use rod_core::equations::{generate_equations_markdown, EquationTracker, EquationUsage};
use rod_core::file_io::{load_rod_input, save_rod_input};
use rod_core::units::{Bar, NPerMm2};
use rod_core::CalcError;

#[derive(Serialize)]
struct EvaluationOut<'a> {
    ok: bool,
    evaluated_at: DateTime<Utc>,
    input: RodInput,
    result: &'a BucklingResult,
    equations: &'a [EquationUsage],
}

#[derive(Serialize)]
struct ErrorOut<'a> {
    ok: bool,
    code: &'static str,
    field: Option<&'a str>,
    error: &'a CalcError,
}

/// Install the stderr log subscriber: `--log-level`, then `RUST_LOG`, then `warn`.
fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<CalcError>() {
            Some(calc) if matches!(calc, CalcError::InvalidConfiguration { .. }) => {
                let out = ErrorOut {
                    ok: false,
                    code: calc.error_code(),
                    field: calc.field(),
                    error: calc,
                };
                match serde_json::to_string_pretty(&out) {
                    Ok(json) if cli.json => eprintln!("{}", json),
                    _ => eprintln!("Error: {:#}", err),
                }
                ExitCode::from(2)
            }
            _ => {
                eprintln!("Error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Evaluate(args) => {
            let input = gather_input(args)?;
            evaluate_and_print(input, cli.json)
        }
        Commands::Interactive => {
            let input = prompt_input();
            evaluate_and_print(input, cli.json)
        }
        Commands::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
        Commands::Defaults { output } => {
            let input = RodInput::reference();
            match output {
                Some(path) => {
                    save_rod_input(&input, path)
                        .with_context(|| format!("failed to write defaults to {}", path.display()))?;
                    if !cli.json {
                        println!("Wrote reference configuration to {}", path.display());
                    }
                }
                None => println!("{}", serde_json::to_string_pretty(&input)?),
            }
            Ok(())
        }
    }
}

/// Flags > config file > reference defaults
fn gather_input(args: &EvaluateArgs) -> Result<RodInput> {
    let mut input = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration file");
            load_rod_input(path).with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => RodInput::reference(),
    };
    args.apply(&mut input);
    Ok(input)
}

fn evaluate_and_print(input: RodInput, json: bool) -> Result<()> {
    let config = RodConfiguration::new(input)?;
    let mut tracker = EquationTracker::new();
    let result = evaluate_traced(&config, &mut tracker);
    info!(equations = tracker.usages().len(), "evaluation complete");

    if json {
        let out = EvaluationOut {
            ok: true,
            evaluated_at: Utc::now(),
            input: config.clone().into(),
            result: &result,
            equations: tracker.usages(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_report(&config, &result, &tracker);
    }
    Ok(())
}

fn print_report(config: &RodConfiguration, result: &BucklingResult, tracker: &EquationTracker) {
    println!("═══════════════════════════════════════════════════════════");
    println!("  PISTON ROD BUCKLING RESULTS");
    if !config.label().is_empty() {
        println!("  {}", config.label());
    }
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Pressure:          {:.2} N/mm²", config.system_pressure_nmm2());
    println!(
        "  Piston / rod:      {:.1} / {:.1} mm{}",
        config.piston_diameter_mm(),
        config.rod_diameter_mm(),
        if config.is_hollow() {
            format!(" (bore {:.1} mm)", config.hollow_rod_inner_diameter_mm())
        } else {
            String::new()
        }
    );
    println!(
        "  Stroke / mounting: {:.1} / {:.1} mm at {:.1}°",
        config.stroke_mm(),
        config.mounting_distance_mm(),
        config.installation_angle().value()
    );
    println!(
        "  Mounting:          {} (k = {})",
        config.mounting().display_name(),
        config.mounting().end_factor()
    );
    println!(
        "  Material:          E = {:.0} N/mm², sS = {:.0} N/mm²",
        config.elasticity_modulus_nmm2(),
        config.proof_stress_nmm2()
    );
    println!();
    println!("Results:");
    for row in result.report_rows() {
        println!("  {:<26} {:>6} = {:>14} {}", row.label, row.symbol, row.formatted(), row.unit);
    }
    println!();
    println!("Checks:");
    println!("  Regime:        {} {}", result.regime.message(), status_icon(result.euler_valid()));
    println!(
        "  Safety factor: {:.3} vs target {:.2} {}",
        result.existing_safety_factor,
        config.safety_factor_target(),
        status_icon(result.passes())
    );
    println!();
    println!("Equations applied:");
    for (category, equations) in tracker.by_category() {
        println!("  {:<20} {}", category.display_name(), equations.len());
    }
    println!();
    println!("═══════════════════════════════════════════════════════════");
    println!("  RESULT: {}", if result.passes() { "PASS" } else { "FAIL" });
    println!("═══════════════════════════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

// =============================================================================
// Interactive prompts
// =============================================================================

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok()?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    read_line(&format!("{} [{}]: ", prompt, default))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_input() -> RodInput {
    let defaults = RodInput::reference();

    println!("Piston Rod Buckling Calculator");
    println!("==============================");
    println!("Press Enter to keep the value in brackets.");
    println!();

    let label = read_line("Label []: ").unwrap_or_default();
    let pressure_unit = read_line("Pressure unit (nmm2/bar) [nmm2]: ")
        .and_then(|s| parse_pressure_unit(&s))
        .unwrap_or_default();
    let pressure_default = pressure_in_unit(defaults.system_pressure, pressure_unit);
    let system_pressure = prompt_f64(&format!("System pressure pS ({})", pressure_unit.symbol()), pressure_default);
    let piston_diameter_mm = prompt_f64("Piston diameter Dk (mm)", defaults.piston_diameter_mm);
    let rod_diameter_mm = prompt_f64("Rod diameter Ds (mm)", defaults.rod_diameter_mm);
    let hollow_rod_inner_diameter_mm =
        prompt_f64("Hollow rod inner diameter Dho (mm)", defaults.hollow_rod_inner_diameter_mm);
    let outside_barrel_diameter_mm = prompt_f64("Outside barrel diameter (mm)", defaults.outside_barrel_diameter_mm);
    let proof_stress_nmm2 = prompt_f64("Proof stress sS (N/mm²)", defaults.proof_stress_nmm2);
    let safety_factor_target = prompt_f64("Target safety factor S", defaults.safety_factor_target);
    let stroke_mm = prompt_f64("Stroke H (mm)", defaults.stroke_mm);
    let mounting_distance_mm = prompt_f64("Mounting distance L (mm)", defaults.mounting_distance_mm);
    let elasticity_modulus_nmm2 = prompt_f64("Modulus of elasticity E (N/mm²)", defaults.elasticity_modulus_nmm2);
    let installation_angle_deg = prompt_f64("Installation angle α (°)", defaults.installation_angle_deg);

    let labels: Vec<&str> = MountingCondition::ALL.iter().map(|m| m.label()).collect();
    let mounting = read_line(&format!("Mounting ({}) [{}]: ", labels.join("/"), defaults.mounting))
        .and_then(|s| s.parse().ok())
        .unwrap_or(defaults.mounting);
    println!();

    RodInput {
        label,
        system_pressure,
        pressure_unit,
        piston_diameter_mm,
        rod_diameter_mm,
        hollow_rod_inner_diameter_mm,
        outside_barrel_diameter_mm,
        proof_stress_nmm2,
        safety_factor_target,
        stroke_mm,
        mounting_distance_mm,
        elasticity_modulus_nmm2,
        installation_angle_deg,
        mounting,
    }
}

/// Case-insensitive pressure unit name
fn parse_pressure_unit(s: &str) -> Option<PressureUnit> {
    match s.trim().to_lowercase().as_str() {
        "bar" => Some(PressureUnit::Bar),
        "nmm2" | "n/mm2" | "n/mm²" | "mpa" => Some(PressureUnit::Nmm2),
        _ => None,
    }
}

/// Express a N/mm² pressure in the unit the user picked
fn pressure_in_unit(nmm2: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Bar => Bar::from(NPerMm2(nmm2)).value(),
        PressureUnit::Nmm2 => nmm2,
    }
}
