//! Inspect command implementation.
//!
//! Assembles a spec in memory and prints the resulting module tree and
//! socket wiring.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use skelform_rig::orchestrator::Orchestrator;
use skelform_rig::socket::SocketKind;

use crate::input::load_spec;

/// Runs the inspect command.
pub fn run(spec_path: &str, json_output: bool) -> Result<ExitCode> {
    let loaded = load_spec(Path::new(spec_path))?;
    let rig = match Orchestrator::new().build(&loaded.spec) {
        Ok(rig) => rig,
        Err(err) => {
            eprintln!("{} [{}] {}", "Build failed:".red().bold(), err.code(), err);
            return Ok(ExitCode::from(1));
        }
    };

    if json_output {
        let modules: Vec<_> = rig
            .modules
            .iter()
            .map(|m| {
                let sockets: Vec<_> = rig
                    .registry
                    .sockets_of(&m.ident)
                    .map(|s| {
                        serde_json::json!({
                            "name": s.key.name,
                            "kind": match s.kind {
                                SocketKind::SpaceIn => "space_in",
                                SocketKind::SpaceOut => "space_out",
                            },
                            "node": rig.scene.name(s.node),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "ident": m.ident,
                    "state": m.state.to_string(),
                    "root": rig.scene.name(m.rig.root),
                    "sockets": sockets,
                    "dynamics": m.dynamics.is_some(),
                })
            })
            .collect();
        let envelope = serde_json::json!({
            "ok": true,
            "character_id": loaded.spec.character_id,
            "node_count": rig.scene.node_count(),
            "modules": modules,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} ({} nodes)",
        "Character:".cyan().bold(),
        loaded.spec.character_id,
        rig.scene.node_count()
    );
    for module in &rig.modules {
        println!(
            "{} {} [{}]",
            "Module:".bold(),
            module.ident,
            module.state.to_string().green()
        );
        for socket in rig.registry.sockets_of(&module.ident) {
            let arrow = match socket.kind {
                SocketKind::SpaceIn => "<-".yellow(),
                SocketKind::SpaceOut => "->".cyan(),
            };
            println!(
                "    {} {} ({})",
                arrow,
                socket.key.name,
                rig.scene.name(socket.node).dimmed()
            );
        }
        if let Some(dynamics) = &module.dynamics {
            println!(
                "    {} {}",
                "~".magenta(),
                rig.scene.name(dynamics.node()).dimmed()
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
