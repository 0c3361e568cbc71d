use crate::config::{
    ConfigMap, COMMANDS, COMMON_OPTIONS, DEFAULT_COMMANDS, DEFAULT_COMMON_OPTIONS, FIELD_SET,
    JDK_LABEL,
};
use crate::context::{CapabilityResolver, JDK_CAPABILITY_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Field-keyed validation errors, accumulated rather than short-circuited
/// so the form can show every problem at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorCollection(BTreeMap<String, Vec<String>>);

impl ErrorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn field_errors(&self, field: &str) -> &[String] {
        self.0.get(field).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| (field.as_str(), m.as_str())))
    }
}

/// A named resource this task demands from the executing agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requirement {
    pub key: String,
}

/// Validate submitted task parameters. Execution never starts while this
/// reports errors.
pub fn validate(params: &ConfigMap, capabilities: &dyn CapabilityResolver) -> ErrorCollection {
    let mut errors = ErrorCollection::new();

    if params.get_or_empty(COMMANDS).trim().is_empty() {
        errors.add_error(COMMANDS, "At least one command must be provided.");
    }

    match params.get_non_empty(JDK_LABEL) {
        None => {
            errors.add_error(JDK_LABEL, "A JDK must be selected.");
        }
        Some(label) => {
            let key = format!("{}{}", JDK_CAPABILITY_PREFIX, label);
            if capabilities.capability(&key).is_none() {
                errors.add_error(
                    JDK_LABEL,
                    format!("JDK '{}' is not defined on this agent.", label),
                );
            }
        }
    }

    errors
}

/// Persist the recognized field set from submitted parameters; everything
/// else is dropped.
pub fn generate_task_config(params: &ConfigMap) -> ConfigMap {
    let mut config = ConfigMap::new();
    for &field in FIELD_SET {
        if let Some(value) = params.get(field) {
            config.insert(field, value);
        }
    }
    debug!("Persisted {} task configuration field(s)", config.len());
    config
}

/// Default field values for a freshly created task.
pub fn defaults_for_create() -> ConfigMap {
    let mut config = ConfigMap::new();
    config.insert(COMMANDS, DEFAULT_COMMANDS);
    config.insert(COMMON_OPTIONS, DEFAULT_COMMON_OPTIONS);
    config
}

/// Agent requirements implied by the configuration: one JDK capability per
/// selected label.
pub fn calculate_requirements(config: &ConfigMap) -> Vec<Requirement> {
    let mut requirements = Vec::new();
    if let Some(label) = config.get_non_empty(JDK_LABEL) {
        requirements.push(Requirement {
            key: format!("{}{}", JDK_CAPABILITY_PREFIX, label),
        });
    }
    requirements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ENVIRONMENT_VARIABLES, JVM_OPTIONS, WORKING_SUB_DIRECTORY};
    use crate::context::MapCapabilities;

    fn capabilities_with(label: &str, path: &str) -> MapCapabilities {
        let mut capabilities = MapCapabilities::new();
        capabilities.insert(&format!("{}{}", JDK_CAPABILITY_PREFIX, label), path);
        capabilities
    }

    fn valid_params() -> ConfigMap {
        let mut params = ConfigMap::new();
        params.insert(COMMANDS, "clean\ntest-app");
        params.insert(JDK_LABEL, "jdk17");
        params
    }

    #[test]
    fn valid_params_pass() {
        let errors = validate(&valid_params(), &capabilities_with("jdk17", "/opt/jdk17"));
        assert!(!errors.has_errors());
    }

    #[test]
    fn blank_commands_are_rejected() {
        let mut params = valid_params();
        params.insert(COMMANDS, "   \n  ");
        let errors = validate(&params, &capabilities_with("jdk17", "/opt/jdk17"));
        assert_eq!(
            errors.field_errors(COMMANDS),
            &["At least one command must be provided."]
        );
    }

    #[test]
    fn missing_jdk_selection_is_rejected() {
        let mut params = ConfigMap::new();
        params.insert(COMMANDS, "clean");
        let errors = validate(&params, &MapCapabilities::new());
        assert_eq!(errors.field_errors(JDK_LABEL), &["A JDK must be selected."]);
    }

    #[test]
    fn unresolvable_jdk_label_is_rejected() {
        let errors = validate(&valid_params(), &capabilities_with("jdk8", "/opt/jdk8"));
        assert_eq!(
            errors.field_errors(JDK_LABEL),
            &["JDK 'jdk17' is not defined on this agent."]
        );
    }

    #[test]
    fn errors_accumulate_across_fields() {
        let params = ConfigMap::new();
        let errors = validate(&params, &MapCapabilities::new());
        assert_eq!(errors.iter().count(), 2);
    }

    #[test]
    fn generate_task_config_keeps_only_recognized_fields() {
        let mut params = valid_params();
        params.insert(JVM_OPTIONS, "-Xmx512m");
        params.insert(ENVIRONMENT_VARIABLES, "FOO=bar");
        params.insert(WORKING_SUB_DIRECTORY, "app");
        params.insert("csrfToken", "abc123");
        let config = generate_task_config(&params);
        assert_eq!(config.len(), 5);
        assert_eq!(config.get(ENVIRONMENT_VARIABLES), Some("FOO=bar"));
        assert_eq!(config.get("csrfToken"), None);
    }

    #[test]
    fn create_defaults_match_the_stock_task() {
        let defaults = defaults_for_create();
        assert_eq!(defaults.get(COMMANDS), Some("clean\ntest-app"));
        assert_eq!(
            defaults.get(COMMON_OPTIONS),
            Some("-non-interactive -plain-output")
        );
    }

    #[test]
    fn requirements_carry_the_jdk_capability_key() {
        let requirements = calculate_requirements(&valid_params());
        assert_eq!(
            requirements,
            vec![Requirement { key: "system.jdk.jdk17".to_string() }]
        );
    }

    #[test]
    fn no_jdk_label_means_no_requirements() {
        let mut params = ConfigMap::new();
        params.insert(COMMANDS, "clean");
        assert!(calculate_requirements(&params).is_empty());
    }
}
