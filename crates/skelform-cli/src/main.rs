//! Skelform CLI - Command-line interface for character rig assembly
//!
//! This binary provides commands for validating character specs,
//! assembling rigs, and inspecting the resulting module wiring.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use skelform_cli::commands;

/// Skelform - Modular Character Rig Assembly
#[derive(Parser)]
#[command(name = "skelform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a character spec file without assembling anything
    Validate {
        /// Path to the spec file (JSON)
        #[arg(short, long)]
        spec: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Assemble a character rig from a spec file and write the report
    Build {
        /// Path to the spec file (JSON)
        #[arg(short, long)]
        spec: String,

        /// Report output path (default: <character_id>.report.json)
        #[arg(short, long)]
        out: Option<String>,

        /// Print the report JSON to stdout (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Assemble a spec in memory and print the module/socket wiring
    Inspect {
        /// Path to the spec file (JSON)
        #[arg(short, long)]
        spec: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { spec, json } => commands::validate::run(&spec, json),
        Commands::Build { spec, out, json } => commands::build::run(&spec, out.as_deref(), json),
        Commands::Inspect { spec, json } => commands::inspect::run(&spec, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
