use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// Forwards business log lines to `tracing` under one target, so the
/// subscriber's filter can silence or raise them together.
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "Bazar -- ", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "Bazar -- ", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "Bazar -- ", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "Bazar -- ", "{}", message);
    }
}
