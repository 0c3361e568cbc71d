use crate::error::TaskError;
use std::collections::HashMap;
use std::path::PathBuf;

/// Everything needed to launch one external process.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    /// Full argument vector; the first element is the executable.
    pub command: Vec<String>,
    pub working_directory: PathBuf,
    pub environment: HashMap<String, String>,
}

impl ProcessSpec {
    /// The command as a single display string, tokens joined with spaces.
    pub fn display_command(&self) -> String {
        self.command.join(" ")
    }
}

/// Outcome of a finished external process.
///
/// `succeeded` is the handler-level verdict (the process ran to completion
/// and could be waited on); `exit_code` is what it returned. Both must be
/// good for a command to count as passed.
#[derive(Debug, Clone, Copy)]
pub struct ProcessOutcome {
    pub succeeded: bool,
    pub exit_code: i32,
}

impl ProcessOutcome {
    pub fn passed(&self) -> bool {
        self.succeeded && self.exit_code == 0
    }
}

/// External-process execution service. The executor runs every planned
/// command through this seam; tests substitute a scripted implementation.
#[async_trait::async_trait]
pub trait ProcessService: Send + Sync {
    /// Launch the process and block until it terminates.
    async fn execute(&self, spec: ProcessSpec) -> Result<ProcessOutcome, TaskError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_passes_only_on_clean_zero_exit() {
        assert!(ProcessOutcome { succeeded: true, exit_code: 0 }.passed());
        assert!(!ProcessOutcome { succeeded: true, exit_code: 1 }.passed());
        assert!(!ProcessOutcome { succeeded: false, exit_code: 0 }.passed());
    }

    #[test]
    fn display_command_joins_tokens() {
        let spec = ProcessSpec {
            command: vec!["./grailsw".into(), "-plain-output".into(), "clean".into()],
            working_directory: PathBuf::from("/work"),
            environment: HashMap::new(),
        };
        assert_eq!(spec.display_command(), "./grailsw -plain-output clean");
    }
}
