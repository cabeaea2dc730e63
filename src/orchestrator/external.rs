use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::{OrchestrationOutcome, OrchestrationRequest, OutcomeStatus, TaskOrchestrator};
use crate::config::RuntimeConfig;

pub const ENV_PROMPT: &str = "ORCHESTRATOR_PROMPT";
pub const ENV_TASK: &str = "ORCHESTRATOR_TASK";
pub const ENV_HITL: &str = "ORCHESTRATOR_HITL";

/// Largest prompt, in bytes, passed inline as an argument and environment
/// variable. Kernels cap a single argv or env string at 128 KiB.
pub const MAX_INLINE_PROMPT_BYTES: usize = 32 * 1024;

/// Runs an external crew entry point as the orchestrator.
///
/// The request travels as trailing `--prompt/--task/--hitl` arguments and as
/// `ORCHESTRATOR_*` environment variables. Without HITL the request is also
/// written to stdin as one JSON object and stdout is captured as the result.
/// Prompts above [`MAX_INLINE_PROMPT_BYTES`] only travel on stdin.
/// With HITL all stdio is inherited so a human can answer the crew directly.
#[derive(Debug, Clone)]
pub struct ExternalOrchestrator {
    argv: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Duration,
    max_output_chars: usize,
}

impl ExternalOrchestrator {
    pub fn new(argv: Vec<String>) -> Result<Self> {
        if argv.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(anyhow::anyhow!("orchestrator command cannot be empty"));
        }
        Ok(Self {
            argv,
            working_dir: None,
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
            max_output_chars: crate::config::DEFAULT_MAX_OUTPUT_CHARS,
        })
    }

    pub fn from_config(cfg: &RuntimeConfig) -> Result<Self> {
        let argv = cfg.orchestrator_command.clone().ok_or_else(|| {
            anyhow::anyhow!(
                "no orchestrator command configured for profile '{}'",
                cfg.profile
            )
        })?;
        Ok(Self::new(argv)?
            .with_working_dir(cfg.working_dir.clone())
            .with_timeout(Duration::from_secs(cfg.timeout_secs))
            .with_max_output_chars(cfg.max_output_chars))
    }

    pub fn with_working_dir(mut self, working_dir: Option<PathBuf>) -> Self {
        self.working_dir = working_dir;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_chars(mut self, max_output_chars: usize) -> Self {
        self.max_output_chars = max_output_chars;
        self
    }

    pub fn binary(&self) -> &str {
        &self.argv[0]
    }

    /// Full argv for a request, program first.
    pub fn command_line(&self, request: &OrchestrationRequest) -> Vec<String> {
        let mut argv = self.argv.clone();
        if prompt_fits_inline(request) {
            argv.push("--prompt".to_string());
            argv.push(request.prompt.clone());
        }
        argv.push("--task".to_string());
        argv.push(request.task_type.label().to_string());
        if request.hitl {
            argv.push("--hitl".to_string());
        }
        argv
    }

    fn build_command(&self, request: &OrchestrationRequest) -> tokio::process::Command {
        let argv = self.command_line(request);
        let mut cmd = tokio::process::Command::new(&argv[0]);
        cmd.args(&argv[1..])
            .env(ENV_TASK, request.task_type.label())
            .env(ENV_HITL, if request.hitl { "1" } else { "0" })
            .kill_on_drop(true);
        if prompt_fits_inline(request) {
            cmd.env(ENV_PROMPT, &request.prompt);
        } else {
            cmd.env_remove(ENV_PROMPT);
        }
        if let Some(dir) = self.working_dir.as_ref() {
            cmd.current_dir(dir);
        }
        cmd
    }

    async fn run_interactive(&self, request: &OrchestrationRequest) -> Result<OrchestrationOutcome> {
        if !prompt_fits_inline(request) {
            return Err(anyhow::anyhow!(
                "invalid value for --prompt: {} bytes exceeds the {} byte limit for --hitl runs",
                request.prompt.len(),
                MAX_INLINE_PROMPT_BYTES
            ));
        }

        let mut child = self
            .build_command(request)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to launch orchestrator command '{}'", self.binary()))?;

        match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(status) => {
                let status = status.context("failed to wait for orchestrator process")?;
                Ok(interpret_exit(status.success(), status.code(), None))
            }
            Err(_) => {
                let _ = child.start_kill();
                Ok(timed_out(self.timeout))
            }
        }
    }

    async fn run_captured(&self, request: &OrchestrationRequest) -> Result<OrchestrationOutcome> {
        let payload =
            serde_json::to_vec(request).context("failed to serialize orchestrator request")?;

        let mut child = self
            .build_command(request)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to launch orchestrator command '{}'", self.binary()))?;

        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                // A crew that ignores stdin may exit before reading; that is not an error.
                if let Err(err) = stdin.write_all(&payload).await {
                    tracing::debug!(error = %err, "orchestrator closed stdin early");
                }
                let _ = stdin.shutdown().await;
            }
        };
        // stdout is drained while stdin is fed so neither pipe can fill up and stall.
        let exchange = async move {
            let ((), output) = tokio::join!(feed, child.wait_with_output());
            output
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(output) => {
                let output = output.context("failed to collect orchestrator output")?;
                let stdout = String::from_utf8_lossy(&output.stdout);
                let (stdout, truncated) = truncate_text(&stdout, self.max_output_chars);
                if truncated {
                    tracing::warn!(
                        max_output_chars = self.max_output_chars,
                        "orchestrator output truncated"
                    );
                }
                Ok(interpret_exit(
                    output.status.success(),
                    output.status.code(),
                    Some(&stdout),
                ))
            }
            Err(_) => Ok(timed_out(self.timeout)),
        }
    }
}

#[async_trait]
impl TaskOrchestrator for ExternalOrchestrator {
    fn name(&self) -> &str {
        self.binary()
    }

    async fn run(&self, request: &OrchestrationRequest) -> Result<OrchestrationOutcome> {
        let start = Instant::now();
        tracing::info!(
            command = %self.binary(),
            task = request.task_type.label(),
            hitl = request.hitl,
            timeout_secs = self.timeout.as_secs(),
            "Launching orchestrator"
        );

        let outcome = if request.hitl {
            self.run_interactive(request).await?
        } else {
            self.run_captured(request).await?
        };

        tracing::info!(
            command = %self.binary(),
            success = outcome.is_success(),
            exit_code = ?outcome.exit_code,
            duration_ms = start.elapsed().as_millis() as u64,
            "Orchestrator finished"
        );
        Ok(outcome)
    }
}

/// Maps a finished process onto a truthy or falsy outcome.
///
/// `stdout` is `None` when output was not captured (interactive runs); a
/// captured but blank stdout counts as an empty result.
pub fn interpret_exit(
    success: bool,
    exit_code: Option<i32>,
    stdout: Option<&str>,
) -> OrchestrationOutcome {
    if !success {
        let reason = match exit_code {
            Some(code) => format!("orchestrator exited with status {code}"),
            None => "orchestrator terminated by signal".to_string(),
        };
        return OrchestrationOutcome::interrupted(reason).with_exit_code(exit_code);
    }

    match stdout.map(str::trim) {
        Some("") => OrchestrationOutcome::interrupted("orchestrator returned an empty result")
            .with_exit_code(exit_code),
        Some(text) => OrchestrationOutcome::completed(text).with_exit_code(exit_code),
        None => OrchestrationOutcome {
            status: OutcomeStatus::Completed,
            output: None,
            exit_code,
        },
    }
}

fn prompt_fits_inline(request: &OrchestrationRequest) -> bool {
    request.prompt.len() <= MAX_INLINE_PROMPT_BYTES
}

fn timed_out(timeout: Duration) -> OrchestrationOutcome {
    tracing::warn!(timeout_secs = timeout.as_secs(), "orchestrator timed out");
    OrchestrationOutcome::interrupted(format!("timed out after {}s", timeout.as_secs()))
}

pub fn truncate_text(text: &str, max_chars: usize) -> (String, bool) {
    let mut iter = text.chars();
    let truncated = iter.by_ref().take(max_chars).collect::<String>();
    if iter.next().is_some() {
        (truncated, true)
    } else {
        (text.to_string(), false)
    }
}
