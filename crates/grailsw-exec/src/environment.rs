use grailsw_core::config::{ConfigMap, JDK_LABEL, JVM_OPTIONS};
use grailsw_core::context::{CapabilityResolver, JDK_CAPABILITY_PREFIX};
use std::collections::HashMap;
use tracing::debug;

/// Build the child-process environment for one execution: the ambient
/// environment overlaid with JAVA_HOME (from the agent's JDK capability)
/// and JAVA_OPTS (from the task's JVM options). Absent or empty values
/// leave the corresponding variable untouched.
pub fn build_environment(
    ambient: HashMap<String, String>,
    config: &ConfigMap,
    capabilities: &dyn CapabilityResolver,
) -> HashMap<String, String> {
    let mut environment = ambient;

    if let Some(java_home) = resolve_java_home(config, capabilities) {
        debug!("Resolved JAVA_HOME to {}", java_home);
        environment.insert("JAVA_HOME".to_string(), java_home);
    }
    if let Some(java_opts) = config.get_non_empty(JVM_OPTIONS) {
        environment.insert("JAVA_OPTS".to_string(), java_opts.to_string());
    }

    environment
}

/// Look up the configured JDK label in the capability registry. An empty
/// capability value counts as unresolved.
fn resolve_java_home(config: &ConfigMap, capabilities: &dyn CapabilityResolver) -> Option<String> {
    let label = config.get(JDK_LABEL)?;
    capabilities
        .capability(&format!("{}{}", JDK_CAPABILITY_PREFIX, label))
        .filter(|path| !path.is_empty())
}
