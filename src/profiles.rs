use anyhow::Result;

use crate::config::{ProfilesFile, RuntimeConfig, display_orchestrator_command};

pub fn profile_names(profiles: &ProfilesFile) -> Vec<String> {
    let mut names = profiles.profiles.keys().cloned().collect::<Vec<String>>();
    if !names.iter().any(|name| name == "default") {
        names.push("default".to_string());
    }
    names.sort();
    names
}

pub fn run_profiles_list(profiles: &ProfilesFile, cfg: &RuntimeConfig) -> Result<()> {
    println!("Configured profiles (active='{}'):", cfg.profile);
    for name in profile_names(profiles) {
        let marker = if name == cfg.profile { "*" } else { " " };
        let source = if profiles.profiles.contains_key(&name) {
            "configured"
        } else {
            "implicit"
        };
        println!("{marker} {name} ({source})");
    }

    Ok(())
}

pub fn run_profiles_show(cfg: &RuntimeConfig) -> Result<()> {
    println!("Active profile: {}", cfg.profile);
    println!("Config path: {}", cfg.config_path);
    println!("Prompt: {}", cfg.prompt);
    println!("Task: {}", cfg.task_type.label());
    println!("Human-in-the-loop: {}", cfg.hitl);
    println!(
        "Orchestrator command: {}",
        display_orchestrator_command(cfg)
    );
    println!(
        "Working dir: {}",
        cfg.working_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "<current directory>".to_string())
    );
    println!("Timeout secs: {}", cfg.timeout_secs);
    println!("Max output chars: {}", cfg.max_output_chars);
    println!("Color: {}", cfg.color);
    println!("Telemetry enabled: {}", cfg.telemetry_enabled);
    println!("Telemetry path: {}", cfg.telemetry_path);
    Ok(())
}
