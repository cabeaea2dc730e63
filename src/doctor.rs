use anyhow::Result;

use crate::config::{RuntimeConfig, display_orchestrator_command};
use crate::theme::status_word;

/// Whether the orchestrator program resolves to an executable.
pub fn orchestrator_binary_available(cfg: &RuntimeConfig) -> Option<bool> {
    let argv = cfg.orchestrator_command.as_ref()?;
    let program = argv.first()?;
    let resolved = match cfg.working_dir.as_ref() {
        Some(dir) if program.contains(std::path::MAIN_SEPARATOR) => {
            which::which(dir.join(program)).is_ok() || which::which(program).is_ok()
        }
        _ => which::which(program).is_ok(),
    };
    Some(resolved)
}

pub fn run_doctor(cfg: &RuntimeConfig) -> Result<()> {
    println!(
        "Active profile: '{}' (config: {})",
        cfg.profile, cfg.config_path
    );
    println!(
        "Orchestrator command: {}",
        display_orchestrator_command(cfg)
    );

    match orchestrator_binary_available(cfg) {
        Some(ok) => println!("Orchestrator binary: {}", status_word(ok, cfg.color)),
        None => {
            println!("Orchestrator binary: {}", status_word(false, cfg.color));
            println!(
                "Tip: set --orchestrator-command or add orchestrator_command to [profiles.{}]",
                cfg.profile
            );
        }
    }

    println!(
        "Working dir: {}",
        cfg.working_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "<current directory>".to_string())
    );
    println!(
        "Defaults: task={} hitl={} prompt_chars={}",
        cfg.task_type.label(),
        cfg.hitl,
        cfg.prompt.chars().count()
    );
    println!(
        "Limits: timeout_secs={} max_output_chars={}",
        cfg.timeout_secs, cfg.max_output_chars
    );
    println!(
        "Telemetry: enabled={} path={}",
        cfg.telemetry_enabled, cfg.telemetry_path
    );

    Ok(())
}
