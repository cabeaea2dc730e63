use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::{Cli, DEFAULT_PROMPT, TaskType};

pub const DEFAULT_TIMEOUT_SECS: u64 = 1800;
pub const DEFAULT_MAX_OUTPUT_CHARS: usize = 20_000;
pub const MIN_MAX_OUTPUT_CHARS: usize = 256;
pub const DEFAULT_TELEMETRY_PATH: &str = ".orchestrator/telemetry/events.jsonl";

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub profile: String,
    pub config_path: String,
    pub prompt: String,
    pub task_type: TaskType,
    pub hitl: bool,
    pub orchestrator_command: Option<Vec<String>>,
    pub working_dir: Option<PathBuf>,
    pub timeout_secs: u64,
    pub max_output_chars: usize,
    pub color: bool,
    pub telemetry_enabled: bool,
    pub telemetry_path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub prompt: Option<String>,
    pub task: Option<TaskType>,
    pub hitl: Option<bool>,
    pub orchestrator_command: Option<String>,
    pub working_dir: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_output_chars: Option<usize>,
    pub color: Option<bool>,
    pub telemetry_enabled: Option<bool>,
    pub telemetry_path: Option<String>,
}

pub fn load_profiles(config_path: &str) -> Result<ProfilesFile> {
    let path = Path::new(config_path);
    if !path.exists() {
        return Ok(ProfilesFile::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile config file at '{}'", path.display()))?;
    toml::from_str::<ProfilesFile>(&content).with_context(|| {
        format!(
            "invalid profile configuration in '{}'. Check task values and field names.",
            path.display()
        )
    })
}

/// Splits an orchestrator command line into argv using shell quoting rules.
pub fn parse_orchestrator_command(raw: &str) -> Result<Vec<String>> {
    let argv = shlex::split(raw.trim()).ok_or_else(|| {
        anyhow::anyhow!("invalid orchestrator command '{raw}': unbalanced quotes")
    })?;
    if argv.is_empty() {
        return Err(anyhow::anyhow!("orchestrator command cannot be empty"));
    }
    Ok(argv)
}

pub fn resolve_runtime_config(cli: &Cli, profiles: &ProfilesFile) -> Result<RuntimeConfig> {
    let selected = cli.profile.trim();
    if selected.is_empty() {
        return Err(anyhow::anyhow!(
            "profile name cannot be empty. Set --profile <name>."
        ));
    }

    let profile = if selected == "default" && !profiles.profiles.contains_key("default") {
        ProfileConfig::default()
    } else {
        profiles.profiles.get(selected).cloned().ok_or_else(|| {
            let mut names = profiles.profiles.keys().cloned().collect::<Vec<String>>();
            names.sort();
            if names.is_empty() {
                anyhow::anyhow!(
                    "profile '{}' not found in '{}'. No profiles are defined yet.",
                    selected,
                    cli.config_path
                )
            } else {
                anyhow::anyhow!(
                    "profile '{}' not found in '{}'. Available profiles: {}",
                    selected,
                    cli.config_path,
                    names.join(", ")
                )
            }
        })?
    };

    let prompt = cli
        .prompt
        .clone()
        .or(profile.prompt)
        .unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    if prompt.trim().is_empty() {
        return Err(anyhow::anyhow!(
            "invalid value for --prompt: prompt cannot be empty"
        ));
    }

    let orchestrator_command = cli
        .orchestrator_command
        .clone()
        .or(profile.orchestrator_command)
        .map(|raw| parse_orchestrator_command(&raw))
        .transpose()?;

    Ok(RuntimeConfig {
        profile: selected.to_string(),
        config_path: cli.config_path.clone(),
        prompt,
        task_type: cli.task.or(profile.task).unwrap_or_default(),
        hitl: cli.hitl || (!cli.no_hitl && profile.hitl.unwrap_or(false)),
        orchestrator_command,
        working_dir: cli
            .working_dir
            .clone()
            .or(profile.working_dir)
            .map(PathBuf::from),
        timeout_secs: cli
            .timeout_secs
            .or(profile.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1),
        max_output_chars: cli
            .max_output_chars
            .or(profile.max_output_chars)
            .unwrap_or(DEFAULT_MAX_OUTPUT_CHARS)
            .max(MIN_MAX_OUTPUT_CHARS),
        color: !cli.no_color && profile.color.unwrap_or(true),
        telemetry_enabled: cli
            .telemetry_enabled
            .or(profile.telemetry_enabled)
            .unwrap_or(true),
        telemetry_path: cli
            .telemetry_path
            .clone()
            .or(profile.telemetry_path)
            .unwrap_or_else(|| DEFAULT_TELEMETRY_PATH.to_string()),
    })
}

pub fn display_orchestrator_command(cfg: &RuntimeConfig) -> String {
    match cfg.orchestrator_command.as_deref() {
        Some(argv) => shlex::try_join(argv.iter().map(String::as_str))
            .unwrap_or_else(|_| argv.join(" ")),
        None => "<not configured>".to_string(),
    }
}
