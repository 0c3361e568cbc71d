use crate::commands::load_agent_config;
use crate::logger::CliBuildLogger;
use grailsw_core::config::WORKING_SUB_DIRECTORY;
use grailsw_core::context::MapCapabilities;
use grailsw_core::{configurator, TaskConfig, TaskContext, TaskResult};
use grailsw_exec::{OsProcessService, WrapperTask};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub async fn run(
    task_file: &Path,
    working_dir: Option<PathBuf>,
    agent_config: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let agent = load_agent_config(agent_config.as_deref())?;
    let config = TaskConfig::load_from(task_file)?.to_map();
    let capabilities = MapCapabilities::from_jdks(&agent.jdks);

    let errors = configurator::validate(&config, &capabilities);
    if errors.has_errors() {
        for (field, message) in errors.iter() {
            eprintln!("{}: {}", field, message);
        }
        anyhow::bail!("Task configuration in {} is invalid", task_file.display());
    }

    let base = match working_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let working_directory = match config.get_non_empty(WORKING_SUB_DIRECTORY) {
        Some(sub) => base.join(sub),
        None => base,
    };

    let ctx = TaskContext {
        config,
        working_directory,
        logger: Arc::new(CliBuildLogger),
        capabilities: Arc::new(capabilities),
    };

    let result = WrapperTask::new(OsProcessService).execute(&ctx).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.to_json())?);
    } else {
        print_result(&result);
    }

    if !result.is_success() {
        let code = match result.exit_code {
            Some(code) if code > 0 => code,
            _ => 1,
        };
        std::process::exit(code);
    }
    Ok(())
}

fn print_result(result: &TaskResult) {
    println!("Run:      {}", result.run_id);
    println!("Status:   {}", result.status);
    println!(
        "Exit:     {}",
        result
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".into())
    );
    println!("Started:  {}", result.started_at);
    println!("Finished: {}", result.finished_at);
}
