use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROMPT: &str = "Tell me about yourself";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Research,
    Execute,
    Analyze,
    #[default]
    Both,
}

impl TaskType {
    pub fn label(self) -> &'static str {
        match self {
            TaskType::Research => "research",
            TaskType::Execute => "execute",
            TaskType::Analyze => "analyze",
            TaskType::Both => "both",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    #[command(about = "List configured profiles and highlight the active profile")]
    List,
    #[command(about = "Show the active profile's resolved runtime settings")]
    Show,
}

#[derive(Debug, Subcommand)]
pub enum TelemetryCommands {
    #[command(about = "Summarize orchestration events from a JSONL stream")]
    Report {
        #[arg(long)]
        path: Option<String>,
        #[arg(long, default_value_t = 5000)]
        limit: usize,
    },
}

const CLI_EXAMPLES: &str = "Examples:\n\
  llm-orchestrator --prompt \"Summarize the state of Rust async runtimes\" --task research\n\
  llm-orchestrator --task execute --hitl\n\
  llm-orchestrator --orchestrator-command \"python -m agent.crew\" --task analyze\n\
  llm-orchestrator --profile staging doctor\n\
  llm-orchestrator profiles list\n\
  llm-orchestrator telemetry report --limit 2000\n\
\n\
Without a subcommand the prompt is handed to the configured orchestrator.";

#[derive(Debug, Parser)]
#[command(name = "llm-orchestrator")]
#[command(version)]
#[command(about = "LLM Task Orchestrator - Autonomous ReACT Agent System")]
#[command(after_long_help = CLI_EXAMPLES)]
pub struct Cli {
    #[arg(long, help = "Prompt for the AI system [default: Tell me about yourself]")]
    pub prompt: Option<String>,

    #[arg(
        long,
        value_enum,
        help = "Task to perform: research, execute, analyze, or both [default: both]"
    )]
    pub task: Option<TaskType>,

    #[arg(long, default_value_t = false, help = "Enable human-in-the-loop mode")]
    pub hitl: bool,

    #[arg(
        long,
        default_value_t = false,
        conflicts_with = "hitl",
        help = "Disable human-in-the-loop mode even when the profile enables it"
    )]
    pub no_hitl: bool,

    #[arg(long, env = "ORCHESTRATOR_PROFILE", default_value = "default")]
    pub profile: String,

    #[arg(
        long,
        env = "ORCHESTRATOR_CONFIG",
        default_value = ".orchestrator/config.toml"
    )]
    pub config_path: String,

    #[arg(long, env = "ORCHESTRATOR_COMMAND")]
    pub orchestrator_command: Option<String>,

    #[arg(long, env = "ORCHESTRATOR_WORKING_DIR")]
    pub working_dir: Option<String>,

    #[arg(long, env = "ORCHESTRATOR_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[arg(long, env = "ORCHESTRATOR_MAX_OUTPUT_CHARS")]
    pub max_output_chars: Option<usize>,

    #[arg(
        long,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[arg(long, env = "ORCHESTRATOR_TELEMETRY_ENABLED", action = clap::ArgAction::Set)]
    pub telemetry_enabled: Option<bool>,

    #[arg(long, env = "ORCHESTRATOR_TELEMETRY_PATH")]
    pub telemetry_path: Option<String>,

    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Validate orchestrator command and telemetry configuration")]
    Doctor,
    #[command(about = "Inspect profile configuration and active resolved profile state")]
    Profiles {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    #[command(about = "Telemetry utilities and reporting")]
    Telemetry {
        #[command(subcommand)]
        command: TelemetryCommands,
    },
}

pub fn command_label(command: Option<&Commands>) -> String {
    match command {
        None => "run".to_string(),
        Some(Commands::Doctor) => "doctor".to_string(),
        Some(Commands::Profiles { command }) => match command {
            ProfileCommands::List => "profiles.list".to_string(),
            ProfileCommands::Show => "profiles.show".to_string(),
        },
        Some(Commands::Telemetry { command }) => match command {
            TelemetryCommands::Report { .. } => "telemetry.report".to_string(),
        },
    }
}
