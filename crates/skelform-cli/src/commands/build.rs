//! Build command implementation.
//!
//! Assembles a character rig from a spec file and writes the build
//! report.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use skelform_rig::orchestrator::Orchestrator;

use crate::input::load_spec;

/// Runs the build command.
///
/// # Arguments
/// * `spec_path` - Path to the character spec file
/// * `out` - Report output path (default: `<character_id>.report.json`)
/// * `json_output` - Whether to print the report JSON to stdout instead
///   of human-readable summary lines
///
/// # Returns
/// Exit code: 0 on success, 1 on assembly failure.
pub fn run(spec_path: &str, out: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let loaded = load_spec(Path::new(spec_path))?;

    if !json_output {
        println!("{} {}", "Building:".cyan().bold(), spec_path);
    }

    let rig = match Orchestrator::new().build(&loaded.spec) {
        Ok(rig) => rig,
        Err(err) => {
            if json_output {
                let envelope = serde_json::json!({
                    "ok": false,
                    "error": { "code": err.code(), "message": err.to_string() },
                });
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                eprintln!("{} [{}] {}", "Build failed:".red().bold(), err.code(), err);
            }
            return Ok(ExitCode::from(1));
        }
    };

    let report_json = rig.report.to_json_pretty()?;
    let out_path = out
        .map(|p| p.to_string())
        .unwrap_or_else(|| format!("{}.report.json", loaded.spec.character_id));
    fs::write(&out_path, &report_json)
        .with_context(|| format!("failed to write report: {out_path}"))?;

    if json_output {
        println!("{report_json}");
    } else {
        println!(
            "{} {} module(s), {} node(s)",
            "Assembled:".green().bold(),
            rig.report.modules.len(),
            rig.report.node_count
        );
        for module in &rig.report.modules {
            println!(
                "  {} {} [{}] joints={} ctrls={} in={} out={}{}",
                "-".dimmed(),
                module.ident,
                module.kind,
                module.bind_joints,
                module.controls,
                module.space_ins,
                module.space_outs,
                if module.dynamics { " +dyn" } else { "" }
            );
        }
        println!("{} {}", "Report:".dimmed(), out_path);
        println!("{} {}", "Pose digest:".dimmed(), &rig.report.pose_digest[..16]);
    }

    Ok(ExitCode::SUCCESS)
}
