use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logger;

#[derive(Parser)]
#[command(name = "grailsw-runner")]
#[command(about = "Run Grails wrapper commands as a build task", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute the task described by a task file
    Run {
        /// Task definition file (YAML)
        #[arg(short, long, default_value = "grailsw-task.yaml")]
        task: PathBuf,

        /// Base working directory (defaults to the current directory)
        #[arg(short, long)]
        working_dir: Option<PathBuf>,

        /// Agent configuration file (defaults to the platform config dir)
        #[arg(long)]
        agent_config: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a task file and list its agent requirements
    Check {
        /// Task definition file (YAML)
        #[arg(short, long, default_value = "grailsw-task.yaml")]
        task: PathBuf,

        /// Agent configuration file (defaults to the platform config dir)
        #[arg(long)]
        agent_config: Option<PathBuf>,
    },

    /// Show or initialize the agent configuration
    Config {
        /// Print the config file path
        #[arg(long)]
        path: bool,

        /// Write a sample config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { task, working_dir, agent_config, json } => {
            commands::run::run(&task, working_dir, agent_config, json).await?;
        }
        Commands::Check { task, agent_config } => {
            commands::check::run(&task, agent_config)?;
        }
        Commands::Config { path, init } => {
            commands::config::run(path, init)?;
        }
    }

    Ok(())
}
