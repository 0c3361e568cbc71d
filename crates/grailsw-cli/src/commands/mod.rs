pub mod check;
pub mod config;
pub mod run;

/// Load the agent configuration, from an explicit path or the default
/// location (an absent default file means an empty JDK registry).
pub fn load_agent_config(
    path: Option<&std::path::Path>,
) -> anyhow::Result<grailsw_core::AgentConfig> {
    match path {
        Some(path) => grailsw_core::AgentConfig::load_from(path),
        None => grailsw_core::AgentConfig::load_default(),
    }
}
