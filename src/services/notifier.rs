use tracing::{info, warn};

/// User-facing toasts raised by the course table.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sends toasts to the log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!("toast: {}", message);
    }

    fn error(&self, message: &str) {
        warn!("toast: {}", message);
    }
}
