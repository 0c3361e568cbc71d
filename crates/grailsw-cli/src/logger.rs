use grailsw_core::context::BuildLogger;
use tracing::{error, info};

/// Build logger that forwards task log lines to the tracing subscriber.
pub struct CliBuildLogger;

impl BuildLogger for CliBuildLogger {
    fn info(&self, line: &str) {
        info!(target: "build", "{}", line);
    }

    fn error(&self, line: &str) {
        error!(target: "build", "{}", line);
    }
}
