use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration field keys, as persisted by the configurator.
pub const COMMANDS: &str = "commands";
pub const COMMON_OPTIONS: &str = "commonOptions";
pub const JVM_OPTIONS: &str = "jvmOptions";
pub const ENVIRONMENT_VARIABLES: &str = "environmentVariables";
pub const JDK_LABEL: &str = "jdkLabel";
pub const WORKING_SUB_DIRECTORY: &str = "workingSubDirectory";

/// The full set of fields the configurator recognizes and persists.
pub const FIELD_SET: &[&str] = &[
    COMMANDS,
    COMMON_OPTIONS,
    JVM_OPTIONS,
    ENVIRONMENT_VARIABLES,
    JDK_LABEL,
    WORKING_SUB_DIRECTORY,
];

pub const DEFAULT_COMMANDS: &str = "clean\ntest-app";
pub const DEFAULT_COMMON_OPTIONS: &str = "-non-interactive -plain-output";

/// String key/value task configuration, the shape the host hands to the
/// executor. Immutable once execution begins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigMap(HashMap<String, String>);

impl ConfigMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    /// Value for `key`, or `""` when absent.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Value for `key`, treating absent and empty identically.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ConfigMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Typed task definition backing the YAML task file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Newline-separated Grails commands, run in order.
    pub commands: String,
    /// Options prepended to every command.
    #[serde(default)]
    pub common_options: Option<String>,
    /// Exported to the wrapper as JAVA_OPTS.
    #[serde(default)]
    pub jvm_options: Option<String>,
    /// Reserved; persisted but not consumed by the executor.
    #[serde(default)]
    pub environment_variables: Option<String>,
    /// Agent JDK label resolved to JAVA_HOME.
    #[serde(default)]
    pub jdk_label: Option<String>,
    /// Subdirectory of the build directory to run in.
    #[serde(default)]
    pub working_sub_directory: Option<String>,
}

impl TaskConfig {
    /// Load a task definition from a YAML file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: TaskConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Flatten into the string map the configurator and executor consume.
    pub fn to_map(&self) -> ConfigMap {
        let mut map = ConfigMap::new();
        map.insert(COMMANDS, self.commands.clone());
        if let Some(opts) = &self.common_options {
            map.insert(COMMON_OPTIONS, opts.clone());
        }
        if let Some(opts) = &self.jvm_options {
            map.insert(JVM_OPTIONS, opts.clone());
        }
        if let Some(vars) = &self.environment_variables {
            map.insert(ENVIRONMENT_VARIABLES, vars.clone());
        }
        if let Some(label) = &self.jdk_label {
            map.insert(JDK_LABEL, label.clone());
        }
        if let Some(dir) = &self.working_sub_directory {
            map.insert(WORKING_SUB_DIRECTORY, dir.clone());
        }
        map
    }
}

/// Agent-level configuration: the JDK installations available on this
/// machine, keyed by label. Loaded from ~/.config/grailsw-runner/agent.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub jdks: HashMap<String, String>,
}

impl AgentConfig {
    /// Load config from the default path, or an empty config if absent.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AgentConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/etc"))
            .join("grailsw-runner")
            .join("agent.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_config_round_trips_through_map() {
        let task = TaskConfig {
            commands: "clean\ntest-app".to_string(),
            common_options: Some("-non-interactive".to_string()),
            jvm_options: Some("-Xmx512m".to_string()),
            environment_variables: None,
            jdk_label: Some("jdk17".to_string()),
            working_sub_directory: Some("app".to_string()),
        };
        let map = task.to_map();
        assert_eq!(map.get(COMMANDS), Some("clean\ntest-app"));
        assert_eq!(map.get(COMMON_OPTIONS), Some("-non-interactive"));
        assert_eq!(map.get(JVM_OPTIONS), Some("-Xmx512m"));
        assert_eq!(map.get(ENVIRONMENT_VARIABLES), None);
        assert_eq!(map.get(JDK_LABEL), Some("jdk17"));
        assert_eq!(map.get(WORKING_SUB_DIRECTORY), Some("app"));
    }

    #[test]
    fn unset_fields_are_absent_from_map() {
        let task = TaskConfig {
            commands: "clean".to_string(),
            common_options: None,
            jvm_options: None,
            environment_variables: None,
            jdk_label: None,
            working_sub_directory: None,
        };
        let map = task.to_map();
        assert_eq!(map.len(), 1);
        assert!(!map.contains(JVM_OPTIONS));
    }

    #[test]
    fn get_non_empty_treats_empty_as_absent() {
        let mut map = ConfigMap::new();
        map.insert(JVM_OPTIONS, "");
        assert_eq!(map.get(JVM_OPTIONS), Some(""));
        assert_eq!(map.get_non_empty(JVM_OPTIONS), None);
    }

    #[test]
    fn agent_config_parses_jdks() {
        let yaml = "jdks:\n  jdk8: /usr/lib/jvm/java-8\n  jdk17: /usr/lib/jvm/java-17\n";
        let config: AgentConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.jdks.len(), 2);
        assert_eq!(
            config.jdks.get("jdk17").map(|s| s.as_str()),
            Some("/usr/lib/jvm/java-17")
        );
    }
}
