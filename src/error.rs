#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Orchestrator,
    Config,
    Input,
    Internal,
}

impl ErrorCategory {
    pub fn code(self) -> &'static str {
        match self {
            ErrorCategory::Orchestrator => "ORCHESTRATOR",
            ErrorCategory::Config => "CONFIG",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Internal => "INTERNAL",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            ErrorCategory::Orchestrator => {
                "Set --orchestrator-command (or profile orchestrator_command) to an executable crew entry point, then run llm-orchestrator doctor."
            }
            ErrorCategory::Config => {
                "Check --config-path and the [profiles.<name>] tables for unknown fields or invalid values."
            }
            ErrorCategory::Input => "Run llm-orchestrator --help and correct command arguments.",
            ErrorCategory::Internal => {
                "Retry with RUST_LOG=debug. If it persists, capture logs and open an issue."
            }
        }
    }
}

pub fn categorize_error(err: &anyhow::Error) -> ErrorCategory {
    let msg = format!("{err:#}").to_ascii_lowercase();

    if msg.contains("invalid value")
        || msg.contains("unknown argument")
        || msg.contains("profile name")
        || msg.contains("not found in")
    {
        return ErrorCategory::Input;
    }

    if msg.contains("profile config") || msg.contains("telemetry") {
        return ErrorCategory::Config;
    }

    if msg.contains("orchestrator") {
        return ErrorCategory::Orchestrator;
    }

    ErrorCategory::Internal
}

pub fn format_cli_error(err: &anyhow::Error) -> String {
    let category = categorize_error(err);
    format!("[{}] {:#}\nHint: {}", category.code(), err, category.hint())
}
