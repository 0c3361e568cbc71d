use grailsw_core::error::TaskError;
use grailsw_core::process::{ProcessOutcome, ProcessService, ProcessSpec};
use tokio::process::Command;
use tracing::debug;

/// Process service backed by the operating system: spawns the command in
/// the requested working directory with exactly the requested environment,
/// then waits for it to terminate.
pub struct OsProcessService;

#[async_trait::async_trait]
impl ProcessService for OsProcessService {
    async fn execute(&self, spec: ProcessSpec) -> Result<ProcessOutcome, TaskError> {
        let (program, args) = spec
            .command
            .split_first()
            .ok_or_else(|| TaskError::Process("Empty command vector".to_string()))?;

        debug!("Spawning: {}", spec.display_command());
        let status = Command::new(program)
            .args(args)
            .current_dir(&spec.working_directory)
            .env_clear()
            .envs(&spec.environment)
            .status()
            .await
            .map_err(|e| {
                TaskError::Process(format!("Failed to spawn '{}': {}", spec.display_command(), e))
            })?;

        // A missing exit code means the process was killed by a signal; the
        // handler did not see a clean completion.
        let outcome = match status.code() {
            Some(code) => ProcessOutcome { succeeded: true, exit_code: code },
            None => ProcessOutcome { succeeded: false, exit_code: -1 },
        };
        debug!("Process finished with exit code {}", outcome.exit_code);
        Ok(outcome)
    }
}
