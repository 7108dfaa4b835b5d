//! # File I/O Module
//!
//! Reads and writes rod configuration files.
//!
//! ## File Format
//!
//! A configuration file is a single [`RodInput`] JSON document. Omitted
//! optional fields (`label`, `pressure_unit`, `hollow_rod_inner_diameter_mm`,
//! `outside_barrel_diameter_mm`, `mounting`) take their defaults.
//!
//! Saves are atomic: write to `.tmp`, sync, rename.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rod_core::calculations::RodInput;
//! use rod_core::file_io::{load_rod_input, save_rod_input};
//! use std::path::Path;
//!
//! let path = Path::new("boom_cylinder.json");
//! save_rod_input(&RodInput::reference(), path).unwrap();
//!
//! let input = load_rod_input(path).unwrap();
//! let config = input.validate().unwrap();
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::calculations::config::RodInput;
use crate::errors::{CalcError, CalcResult};

/// Parse a rod configuration from a JSON string.
///
/// Only the shape of the document is checked here; value validation happens
/// in [`RodInput::validate`].
///
/// # Example
///
/// ```rust
/// use rod_core::file_io::parse_rod_input;
///
/// let input = parse_rod_input(r#"{
///     "system_pressure": 160.0,
///     "piston_diameter_mm": 100.0,
///     "rod_diameter_mm": 60.0,
///     "proof_stress_nmm2": 350.0,
///     "safety_factor_target": 3.0,
///     "stroke_mm": 500.0,
///     "mounting_distance_mm": 900.0,
///     "elasticity_modulus_nmm2": 210000.0,
///     "installation_angle_deg": 0.0
/// }"#).unwrap();
/// assert_eq!(input.rod_diameter_mm, 60.0);
/// ```
pub fn parse_rod_input(json: &str) -> CalcResult<RodInput> {
    serde_json::from_str(json).map_err(|e| CalcError::serialization(format!("Invalid rod configuration: {}", e)))
}

/// Load a rod configuration from a file.
///
/// # Returns
///
/// * `Ok(RodInput)` - Parsed, not yet validated
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_rod_input(path: &Path) -> CalcResult<RodInput> {
    let mut file =
        File::open(path).map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let input: RodInput = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    debug!(path = %path.display(), label = %input.label, "loaded rod configuration");
    Ok(input)
}

/// Save a rod configuration with atomic write semantics.
///
/// 1. Serialize to pretty JSON
/// 2. Write to `<path>.tmp` and fsync
/// 3. Rename over the target
pub fn save_rod_input(input: &RodInput, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(input)?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = json.len(), "saved rod configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::config::PressureUnit;
    use crate::calculations::mounting::MountingCondition;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_config_path(name: &str) -> PathBuf {
        temp_dir().join(format!("rod_core_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_config_path("roundtrip");

        let mut input = RodInput::reference();
        input.label = "Boom".to_string();
        input.mounting = MountingCondition::FixedBearing;
        save_rod_input(&input, &path).unwrap();

        let loaded = load_rod_input(&path).unwrap();
        assert_eq!(loaded, input);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_config_path("atomic");
        let tmp_path = path.with_extension("json.tmp");

        save_rod_input(&RodInput::reference(), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_optional_fields_default() {
        let input = parse_rod_input(
            r#"{
                "system_pressure": 2000.0,
                "pressure_unit": "bar",
                "piston_diameter_mm": 90.0,
                "rod_diameter_mm": 50.0,
                "proof_stress_nmm2": 350.0,
                "safety_factor_target": 2.5,
                "stroke_mm": 950.0,
                "mounting_distance_mm": 1100.0,
                "elasticity_modulus_nmm2": 210000.0,
                "installation_angle_deg": 23.0
            }"#,
        )
        .unwrap();
        assert_eq!(input.pressure_unit, PressureUnit::Bar);
        assert_eq!(input.hollow_rod_inner_diameter_mm, 0.0);
        assert_eq!(input.mounting, MountingCondition::BearingBearing);
        assert!(input.label.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_rod_input("{ \"rod_diameter_mm\": }").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let err = load_rod_input(&temp_config_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
