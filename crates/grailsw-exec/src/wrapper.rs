use crate::environment::build_environment;
use grailsw_core::config::{COMMANDS, COMMON_OPTIONS};
use grailsw_core::context::TaskContext;
use grailsw_core::error::TaskError;
use grailsw_core::plan;
use grailsw_core::process::{ProcessService, ProcessSpec};
use grailsw_core::result::{TaskResult, TaskResultBuilder};
use std::path::Path;
use tracing::{debug, info};

/// Platform-appropriate wrapper executable name, resolved relative to the
/// task working directory.
pub fn wrapper_executable_name() -> &'static str {
    if cfg!(windows) {
        "grailsw.bat"
    } else {
        "./grailsw"
    }
}

/// Runs a task's planned commands against the project's Grails wrapper
/// script, one at a time, stopping at the first failure.
pub struct WrapperTask<P: ProcessService> {
    process_service: P,
}

impl<P: ProcessService> WrapperTask<P> {
    pub fn new(process_service: P) -> Self {
        Self { process_service }
    }

    /// Execute the task described by `ctx`.
    ///
    /// Precondition failures and command failures produce an `Ok` result
    /// marked failed; spawn failures and malformed command text are fatal
    /// and propagate as `Err`.
    pub async fn execute(&self, ctx: &TaskContext) -> Result<TaskResult, TaskError> {
        let mut builder = TaskResultBuilder::new();
        info!(run_id = %builder.run_id(), "Starting Grails wrapper task");

        let working_directory = &ctx.working_directory;
        if !working_directory.is_dir() {
            ctx.logger.error(&format!(
                "Working directory {} does not exist.",
                working_directory.display()
            ));
            builder.failed_with_error();
            return Ok(builder.build());
        }

        let wrapper = wrapper_executable_name();
        let wrapper_file = working_directory.join(wrapper);
        if !wrapper_file.is_file() {
            ctx.logger.error(&format!(
                "Could not locate {} in working directory {}",
                wrapper,
                working_directory.display()
            ));
            builder.failed_with_error();
            return Ok(builder.build());
        }
        if !is_executable(&wrapper_file) {
            ctx.logger.error(&format!(
                "{} in working directory {} is not executable",
                wrapper,
                working_directory.display()
            ));
            builder.failed_with_error();
            return Ok(builder.build());
        }

        let plan = plan::plan(
            ctx.config.get_or_empty(COMMANDS),
            ctx.config.get_or_empty(COMMON_OPTIONS),
        )?;
        let environment =
            build_environment(std::env::vars().collect(), &ctx.config, ctx.capabilities.as_ref());
        debug!("Executing {} command(s) in {}", plan.len(), working_directory.display());

        for mut command in plan {
            command.insert(0, wrapper.to_string());
            let spec = ProcessSpec {
                command,
                working_directory: working_directory.clone(),
                environment: environment.clone(),
            };
            let display = spec.display_command();
            ctx.logger.info(&format!("Running {}", display));

            let outcome = self.process_service.execute(spec).await?;
            builder.check_return_code(&outcome);
            if !outcome.passed() {
                ctx.logger.error(&format!(
                    "Grails wrapper command '{}' failed; skipping any subsequent commands",
                    display
                ));
                break;
            }
        }

        Ok(builder.build())
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

// Windows has no executable bit; existing as a regular file is enough.
#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(windows)]
    #[test]
    fn wrapper_name_is_the_batch_file_on_windows() {
        assert_eq!(wrapper_executable_name(), "grailsw.bat");
    }

    #[cfg(not(windows))]
    #[test]
    fn wrapper_name_is_the_shell_script_elsewhere() {
        assert_eq!(wrapper_executable_name(), "./grailsw");
    }
}

