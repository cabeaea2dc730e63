use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use llm_task_orchestrator::cli::{Cli, Commands, ProfileCommands, TelemetryCommands, command_label};
use llm_task_orchestrator::config::{load_profiles, resolve_runtime_config};
use llm_task_orchestrator::doctor::run_doctor;
use llm_task_orchestrator::error::{categorize_error, format_cli_error};
use llm_task_orchestrator::orchestrator::{ExternalOrchestrator, OrchestrationRequest};
use llm_task_orchestrator::profiles::{run_profiles_list, run_profiles_show};
use llm_task_orchestrator::runner::run_orchestration;
use llm_task_orchestrator::telemetry::{TelemetrySink, run_telemetry_report};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = run_cli(cli).await {
        eprintln!("{}", format_cli_error(&err));
        tracing::error!(category = %categorize_error(&err).code(), error = %err, "command failed");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_cli(cli: Cli) -> Result<()> {
    init_tracing(&cli.log_filter)?;
    let profiles = load_profiles(&cli.config_path)?;
    let cfg = resolve_runtime_config(&cli, &profiles)?;
    let telemetry = TelemetrySink::new(&cfg, command_label(cli.command.as_ref()));

    match cli.command {
        None => {
            let orchestrator = ExternalOrchestrator::from_config(&cfg)?;
            let request = OrchestrationRequest {
                prompt: cfg.prompt.clone(),
                task_type: cfg.task_type,
                hitl: cfg.hitl,
            };
            let mut stdout = io::stdout();
            run_orchestration(
                &orchestrator,
                &request,
                cfg.color,
                &telemetry,
                &mut stdout,
                shutdown_signal(),
            )
            .await?;
        }
        Some(Commands::Doctor) => run_doctor(&cfg)?,
        Some(Commands::Profiles { command }) => match command {
            ProfileCommands::List => run_profiles_list(&profiles, &cfg)?,
            ProfileCommands::Show => run_profiles_show(&cfg)?,
        },
        Some(Commands::Telemetry { command }) => match command {
            TelemetryCommands::Report { path, limit } => run_telemetry_report(&cfg, path, limit)?,
        },
    }

    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed the run is never
/// cancelled.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn init_tracing(log_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))
}
