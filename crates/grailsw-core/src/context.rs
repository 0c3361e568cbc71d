use crate::config::ConfigMap;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Capability key prefix under which JDK installations are registered.
pub const JDK_CAPABILITY_PREFIX: &str = "system.jdk.";

/// Append-only build log, line oriented. The host decides where lines go.
pub trait BuildLogger: Send + Sync {
    fn info(&self, line: &str);
    fn error(&self, line: &str);
}

/// Resolves agent capability keys (e.g. "system.jdk.jdk17") to values.
///
/// A resolver with no registered capabilities simply answers `None` for
/// every key; that is not an error.
pub trait CapabilityResolver: Send + Sync {
    fn capability(&self, key: &str) -> Option<String>;
}

/// Map-backed capability registry.
#[derive(Debug, Clone, Default)]
pub struct MapCapabilities(HashMap<String, String>);

impl MapCapabilities {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Build a registry from agent JDK labels, prefixing each with
    /// `system.jdk.`.
    pub fn from_jdks(jdks: &HashMap<String, String>) -> Self {
        Self(
            jdks.iter()
                .map(|(label, path)| (format!("{}{}", JDK_CAPABILITY_PREFIX, label), path.clone()))
                .collect(),
        )
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }
}

impl CapabilityResolver for MapCapabilities {
    fn capability(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Everything the executor needs from the host for one task execution:
/// configuration, working directory, build log, and capability lookup.
pub struct TaskContext {
    pub config: ConfigMap,
    pub working_directory: PathBuf,
    pub logger: Arc<dyn BuildLogger>,
    pub capabilities: Arc<dyn CapabilityResolver>,
}

/// In-memory build logger, used by tests and embedders that want to
/// inspect the log after the fact.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    infos: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().expect("log lock poisoned").clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("log lock poisoned").clone()
    }
}

impl BuildLogger for MemoryLogger {
    fn info(&self, line: &str) {
        self.infos.lock().expect("log lock poisoned").push(line.to_string());
    }

    fn error(&self, line: &str) {
        self.errors.lock().expect("log lock poisoned").push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_jdks_prefixes_labels() {
        let mut jdks = HashMap::new();
        jdks.insert("jdk17".to_string(), "/opt/jdk17".to_string());
        let capabilities = MapCapabilities::from_jdks(&jdks);
        assert_eq!(
            capabilities.capability("system.jdk.jdk17"),
            Some("/opt/jdk17".to_string())
        );
        assert_eq!(capabilities.capability("jdk17"), None);
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let capabilities = MapCapabilities::new();
        assert_eq!(capabilities.capability("system.jdk.default"), None);
    }

    #[test]
    fn memory_logger_records_by_level() {
        let logger = MemoryLogger::new();
        logger.info("starting");
        logger.error("boom");
        assert_eq!(logger.infos(), vec!["starting".to_string()]);
        assert_eq!(logger.errors(), vec!["boom".to_string()]);
    }
}
