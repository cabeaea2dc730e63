use std::future::Future;
use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::json;

use crate::orchestrator::{OrchestrationOutcome, OrchestrationRequest, TaskOrchestrator};
use crate::telemetry::{
    EVENT_COMPLETED, EVENT_FAILED, EVENT_INTERRUPTED, EVENT_STARTED, TelemetrySink,
};
use crate::theme;

pub const CANCELLED_REASON: &str = "cancelled by user";

/// Runs one orchestration end to end: startup banner, delegated run, closing
/// banner chosen by the outcome's truthiness.
///
/// `shutdown` resolving before the orchestrator finishes counts as an
/// interruption; the orchestrator future is dropped at that point.
pub async fn run_orchestration<W, F>(
    orchestrator: &dyn TaskOrchestrator,
    request: &OrchestrationRequest,
    color: bool,
    telemetry: &TelemetrySink,
    out: &mut W,
    shutdown: F,
) -> Result<OrchestrationOutcome>
where
    W: Write,
    F: Future<Output = ()>,
{
    write!(out, "{}", theme::startup_banner()).context("failed to write startup banner")?;
    out.flush().context("failed to flush console output")?;

    tracing::info!(
        orchestrator = orchestrator.name(),
        task = request.task_type.label(),
        hitl = request.hitl,
        prompt_chars = request.prompt.chars().count(),
        "Starting orchestration"
    );
    telemetry.emit(
        EVENT_STARTED,
        json!({
            "orchestrator": orchestrator.name(),
            "hitl": request.hitl,
            "prompt_chars": request.prompt.chars().count(),
        }),
    );

    let start = Instant::now();
    let result = tokio::select! {
        result = orchestrator.run(request) => result,
        _ = shutdown => {
            tracing::warn!("shutdown requested; abandoning orchestration");
            Ok(OrchestrationOutcome::interrupted(CANCELLED_REASON))
        }
    };
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            telemetry.emit(
                EVENT_FAILED,
                json!({ "error": format!("{err:#}"), "duration_ms": elapsed_ms }),
            );
            return Err(err);
        }
    };

    if let Some(output) = outcome.output.as_deref() {
        writeln!(out, "{output}").context("failed to write orchestrator output")?;
    }
    write!(out, "{}", theme::outcome_banner(&outcome, color))
        .context("failed to write closing banner")?;
    out.flush().context("failed to flush console output")?;

    if outcome.is_success() {
        tracing::info!(duration_ms = elapsed_ms, "Orchestration complete");
        telemetry.emit(
            EVENT_COMPLETED,
            json!({ "duration_ms": elapsed_ms, "exit_code": outcome.exit_code }),
        );
    } else {
        let reason = outcome.reason().unwrap_or("unknown");
        tracing::warn!(reason, duration_ms = elapsed_ms, "Orchestration interrupted");
        telemetry.emit(
            EVENT_INTERRUPTED,
            json!({
                "reason": reason,
                "duration_ms": elapsed_ms,
                "exit_code": outcome.exit_code,
            }),
        );
    }

    Ok(outcome)
}
