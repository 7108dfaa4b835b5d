use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("rod_cli").unwrap()
}

#[test]
fn evaluate_reference_report() {
    cmd()
        .arg("evaluate")
        .assert()
        .success()
        .stdout(contains("PISTON ROD BUCKLING RESULTS"))
        .stdout(contains("879.65"))
        .stdout(contains("4398.23"))
        .stdout(contains("Euler buckling theory is valid"))
        .stdout(contains("RESULT: FAIL"));
}

#[test]
fn evaluate_json_envelope() {
    let output = cmd().args(["--json", "evaluate"]).output().unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["ok"], true);
    assert!(v["evaluated_at"].is_string());
    assert_eq!(v["result"]["regime"], "Euler");
    assert_eq!(v["result"]["safety_check"], "Fail");
    assert_eq!(v["input"]["mounting"], "bearing-bearing");
    assert!(v["equations"].as_array().map_or(false, |a| !a.is_empty()));
}

#[test]
fn bar_pressure_matches_nmm2() {
    let output = cmd()
        .args(["--json", "evaluate", "--pressure", "2000", "--pressure-unit", "bar"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let fd = v["result"]["push_force"].as_f64().unwrap();
    assert!((fd - 879.646).abs() < 1e-3, "Fd = {}", fd);
    assert_eq!(v["input"]["pressure_unit"], "nmm2");
}

#[test]
fn zero_rod_diameter_exits_with_code_2() {
    cmd()
        .args(["evaluate", "--rod-diameter", "0"])
        .assert()
        .code(2)
        .stderr(contains("rod_diameter_mm"));
}

#[test]
fn invalid_configuration_json_error() {
    cmd()
        .args(["--json", "evaluate", "--piston-diameter", "40"])
        .assert()
        .code(2)
        .stderr(contains("INVALID_CONFIGURATION"))
        .stderr(contains("piston_diameter_mm"));
}

#[test]
fn config_file_with_flag_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boom.json");
    std::fs::write(
        &path,
        r#"{
            "label": "Boom cylinder",
            "system_pressure": 200.0,
            "piston_diameter_mm": 90.0,
            "rod_diameter_mm": 50.0,
            "proof_stress_nmm2": 350.0,
            "safety_factor_target": 2.5,
            "stroke_mm": 950.0,
            "mounting_distance_mm": 1100.0,
            "elasticity_modulus_nmm2": 210000.0,
            "installation_angle_deg": 23.0,
            "mounting": "fixed-free"
        }"#,
    )
    .unwrap();

    cmd()
        .args(["evaluate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Boom cylinder"))
        .stdout(contains("Fixed - Free"))
        .stdout(contains("Euler result not valid, apply Johnson theory"));

    cmd()
        .args(["evaluate", "--mounting", "bearing-bearing", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Bearing - Bearing"));
}

#[test]
fn missing_config_file_exits_with_code_1() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["evaluate", "--config"])
        .arg(dir.path().join("nope.json"))
        .assert()
        .code(1)
        .stderr(contains("failed to load configuration"));
}

#[test]
fn zero_pressure_reports_undefined_safety_factor() {
    cmd()
        .args(["evaluate", "--pressure", "0"])
        .assert()
        .success()
        .stdout(contains("undefined"))
        .stdout(contains("RESULT: PASS"));
}

#[test]
fn equations_reference() {
    cmd()
        .arg("equations")
        .assert()
        .success()
        .stdout(contains("Rod Buckling Equations Reference"))
        .stdout(contains("Design Checks"));
}

#[test]
fn defaults_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.json");

    cmd().args(["defaults", "--output"]).arg(&path).assert().success();
    assert!(path.exists());

    cmd()
        .args(["evaluate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("879.65"));
}

#[test]
fn defaults_to_stdout() {
    cmd()
        .arg("defaults")
        .assert()
        .success()
        .stdout(contains("\"piston_diameter_mm\": 90.0").and(contains("\"mounting\": \"bearing-bearing\"")));
}

#[test]
fn interactive_keeps_defaults_on_empty_input() {
    cmd()
        .arg("interactive")
        .write_stdin("\n".repeat(16))
        .assert()
        .success()
        .stdout(contains("879.65"))
        .stdout(contains("Bearing - Bearing"));
}

#[test]
fn interactive_reads_values() {
    // label, unit, pressure, then Dk/Ds; the rest falls back to defaults
    cmd()
        .arg("interactive")
        .write_stdin("R-2\nbar\n1600\n100\n60\n")
        .assert()
        .success()
        .stdout(contains("R-2"))
        .stdout(contains("160.00 N/mm²"));
}

#[test]
fn json_invalid_configuration_stderr_is_pure_json() {
    let output = cmd().args(["--json", "evaluate", "--rod-diameter", "0"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));

    let v: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(v["ok"], false);
    assert_eq!(v["code"], "INVALID_CONFIGURATION");
    assert_eq!(v["field"], "rod_diameter_mm");
}

#[test]
fn interactive_unit_is_case_insensitive() {
    cmd()
        .arg("interactive")
        .write_stdin("R-3\nBAR\n1600\n")
        .assert()
        .success()
        .stdout(contains("System pressure pS (bar) [2000]"))
        .stdout(contains("160.00 N/mm²"));
}

#[test]
fn report_lists_equation_categories() {
    cmd()
        .arg("evaluate")
        .assert()
        .success()
        .stdout(contains("Equations applied:"))
        .stdout(contains("Design Checks"));
}
