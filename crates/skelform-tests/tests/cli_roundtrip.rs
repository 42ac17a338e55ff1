//! CLI round-trip tests.
//!
//! Writes a fixture spec to disk and drives the CLI command
//! implementations against it.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p skelform-tests --test cli_roundtrip
//! ```

use std::fs;

use skelform_cli::commands;
use skelform_spec::BuildReport;
use skelform_tests::fixtures;

fn write_spec(dir: &tempfile::TempDir) -> String {
    let spec = fixtures::dragon_spec();
    let path = dir.path().join("emberwyrm.json");
    fs::write(&path, spec.to_json_pretty().unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_validate_command_accepts_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = write_spec(&dir);
    let result = commands::validate::run(&spec_path, true);
    assert!(result.is_ok());
}

#[test]
fn test_build_command_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = write_spec(&dir);
    let report_path = dir.path().join("emberwyrm.report.json");

    commands::build::run(&spec_path, Some(&report_path.to_string_lossy()), true).unwrap();

    let report = BuildReport::from_json(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert!(report.ok);
    assert_eq!(report.character_id, "emberwyrm-01");
    assert_eq!(report.modules.len(), 20);
    assert_eq!(report.pose_digest.len(), 64);
}

#[test]
fn test_inspect_command_runs() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = write_spec(&dir);
    let result = commands::inspect::run(&spec_path, true);
    assert!(result.is_ok());
}

#[test]
fn test_build_command_reports_assembly_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut spec = fixtures::dragon_spec();
    // An unknown producer survives parsing but fails validation at build time
    spec.modules[1].attachments[0].producer = "Torzo".to_string();
    let path = dir.path().join("broken.json");
    fs::write(&path, spec.to_json_pretty().unwrap()).unwrap();

    // The command reports the failure without returning an Err
    let result = commands::build::run(&path.to_string_lossy(), None, true);
    assert!(result.is_ok());
    assert!(!dir.path().join("emberwyrm-01.report.json").exists());
}

#[test]
fn test_unreadable_spec_is_an_error() {
    let result = commands::validate::run("/nonexistent/spec.json", true);
    assert!(result.is_err());
}
