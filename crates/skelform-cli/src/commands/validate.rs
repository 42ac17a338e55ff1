//! Validate command implementation.
//!
//! Validates a character spec file without assembling anything.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use skelform_spec::validate_spec;

use crate::input::load_spec;

/// Runs the validate command.
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid.
pub fn run(spec_path: &str, json_output: bool) -> Result<ExitCode> {
    let loaded = load_spec(Path::new(spec_path))?;
    let result = validate_spec(&loaded.spec);

    if json_output {
        let envelope = serde_json::json!({
            "ok": result.is_ok(),
            "character_id": loaded.spec.character_id,
            "spec_hash": loaded.spec_hash,
            "errors": result.errors.iter().map(|e| serde_json::json!({
                "code": e.code.code(),
                "message": e.message,
                "path": e.path,
            })).collect::<Vec<_>>(),
            "warnings": result.warnings.iter().map(|w| serde_json::json!({
                "code": w.code.code(),
                "message": w.message,
                "path": w.path,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(if result.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    println!("{} {}", "Validating:".cyan().bold(), spec_path);
    println!(
        "{} {} ({})",
        "Character:".dimmed(),
        loaded.spec.character_id,
        &loaded.spec_hash[..16]
    );

    for warning in &result.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
    for error in &result.errors {
        println!("  {} {}", "x".red(), error);
    }

    if result.is_ok() {
        println!(
            "{} {} module(s), {} warning(s)",
            "Valid:".green().bold(),
            loaded.spec.modules.len(),
            result.warnings.len()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} {} error(s), {} warning(s)",
            "Invalid:".red().bold(),
            result.errors.len(),
            result.warnings.len()
        );
        Ok(ExitCode::from(1))
    }
}
