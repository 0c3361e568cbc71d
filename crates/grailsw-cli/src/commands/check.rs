use crate::commands::load_agent_config;
use grailsw_core::context::MapCapabilities;
use grailsw_core::{configurator, TaskConfig};
use std::path::{Path, PathBuf};

pub fn run(task_file: &Path, agent_config: Option<PathBuf>) -> anyhow::Result<()> {
    let agent = load_agent_config(agent_config.as_deref())?;
    let config = TaskConfig::load_from(task_file)?.to_map();
    let capabilities = MapCapabilities::from_jdks(&agent.jdks);

    let errors = configurator::validate(&config, &capabilities);
    if errors.has_errors() {
        println!("Task file {} has problems:", task_file.display());
        for (field, message) in errors.iter() {
            println!("  {}: {}", field, message);
        }
        anyhow::bail!("Validation failed");
    }

    println!("Task file {} is valid.", task_file.display());
    let requirements = configurator::calculate_requirements(&config);
    if requirements.is_empty() {
        println!("Requirements: none");
    } else {
        println!("Requirements:");
        for requirement in &requirements {
            println!("  - {}", requirement.key);
        }
    }
    Ok(())
}
