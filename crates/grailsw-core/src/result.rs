use crate::process::ProcessOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Success,
    Failed,
}

impl TaskStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskStatus::Success)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Success => write!(f, "success"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Terminal result of one task execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub run_id: String,
    pub status: TaskStatus,
    /// Exit code of the last attempted command, if any process was spawned.
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl TaskResult {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "run_id": self.run_id,
            "status": self.status,
            "exit_code": self.exit_code,
            "started_at": self.started_at.to_rfc3339(),
            "finished_at": self.finished_at.to_rfc3339(),
        })
    }
}

/// Accumulates the verdict over one execution: starts successful, turns
/// failed on the first precondition error or bad return code, never turns
/// back.
#[derive(Debug)]
pub struct TaskResultBuilder {
    run_id: String,
    status: TaskStatus,
    exit_code: Option<i32>,
    started_at: DateTime<Utc>,
}

impl TaskResultBuilder {
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            status: TaskStatus::Success,
            exit_code: None,
            started_at: Utc::now(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Mark the task failed without having run any process.
    pub fn failed_with_error(&mut self) -> &mut Self {
        self.status = TaskStatus::Failed;
        self
    }

    /// Record a finished process against the task verdict. A non-zero exit
    /// or an unsuccessful handler fails the task but is not an error.
    pub fn check_return_code(&mut self, outcome: &ProcessOutcome) -> &mut Self {
        self.exit_code = Some(outcome.exit_code);
        if !outcome.passed() {
            self.status = TaskStatus::Failed;
        }
        self
    }

    pub fn build(self) -> TaskResult {
        TaskResult {
            run_id: self.run_id,
            status: self.status,
            exit_code: self.exit_code,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}

impl Default for TaskResultBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_success_with_no_exit_code() {
        let result = TaskResultBuilder::new().build();
        assert!(result.is_success());
        assert_eq!(result.exit_code, None);
    }

    #[test]
    fn failed_with_error_is_terminal() {
        let mut builder = TaskResultBuilder::new();
        builder.failed_with_error();
        builder.check_return_code(&ProcessOutcome { succeeded: true, exit_code: 0 });
        let result = builder.build();
        assert_eq!(result.status, TaskStatus::Failed);
    }

    #[test]
    fn non_zero_exit_fails_and_is_recorded() {
        let mut builder = TaskResultBuilder::new();
        builder.check_return_code(&ProcessOutcome { succeeded: true, exit_code: 0 });
        builder.check_return_code(&ProcessOutcome { succeeded: true, exit_code: 7 });
        let result = builder.build();
        assert_eq!(result.status, TaskStatus::Failed);
        assert_eq!(result.exit_code, Some(7));
    }

    #[test]
    fn unsuccessful_handler_fails_even_with_zero_exit() {
        let mut builder = TaskResultBuilder::new();
        builder.check_return_code(&ProcessOutcome { succeeded: false, exit_code: 0 });
        assert_eq!(builder.build().status, TaskStatus::Failed);
    }

    #[test]
    fn json_projection_carries_status_and_exit_code() {
        let mut builder = TaskResultBuilder::new();
        builder.check_return_code(&ProcessOutcome { succeeded: true, exit_code: 0 });
        let json = builder.build().to_json();
        assert_eq!(json["status"], "success");
        assert_eq!(json["exit_code"], 0);
    }
}
