//! Orchestrator seam - the boundary between the CLI and the agent crew.
//!
//! The CLI never reasons about tasks itself. It builds an
//! [`OrchestrationRequest`], hands it to a [`TaskOrchestrator`], and only looks
//! at whether the returned [`OrchestrationOutcome`] is a success.

pub mod external;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::cli::TaskType;

pub use external::ExternalOrchestrator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrchestrationRequest {
    pub prompt: String,
    #[serde(rename = "task")]
    pub task_type: TaskType,
    pub hitl: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Completed,
    Interrupted { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationOutcome {
    pub status: OutcomeStatus,
    /// Final answer text, when the orchestrator produced one on stdout.
    pub output: Option<String>,
    pub exit_code: Option<i32>,
}

impl OrchestrationOutcome {
    pub fn completed(output: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Completed,
            output: Some(output.into()),
            exit_code: Some(0),
        }
    }

    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Interrupted {
                reason: reason.into(),
            },
            output: None,
            exit_code: None,
        }
    }

    pub fn with_exit_code(mut self, exit_code: Option<i32>) -> Self {
        self.exit_code = exit_code;
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Completed)
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.status {
            OutcomeStatus::Completed => None,
            OutcomeStatus::Interrupted { reason } => Some(reason),
        }
    }
}

#[async_trait]
pub trait TaskOrchestrator: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, request: &OrchestrationRequest) -> Result<OrchestrationOutcome>;
}
