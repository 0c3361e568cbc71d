pub mod config;
pub mod configurator;
pub mod context;
pub mod error;
pub mod plan;
pub mod process;
pub mod result;

pub use config::{AgentConfig, ConfigMap, TaskConfig};
pub use context::{BuildLogger, CapabilityResolver, TaskContext};
pub use error::TaskError;
pub use plan::ExecutionPlan;
pub use process::{ProcessOutcome, ProcessService, ProcessSpec};
pub use result::{TaskResult, TaskResultBuilder, TaskStatus};
