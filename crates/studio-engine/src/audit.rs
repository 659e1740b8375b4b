//! Fire-and-forget audit logging.
//!
//! Every pipeline phase reports here. Events land in `tracing` output and,
//! best-effort, in the persisted security log; a failed insert is logged
//! and never propagated, so audit trouble cannot fail a generation.

use tracing::{error, info, warn};

use studio_models::{SecurityEvent, Severity};
use studio_store::SecurityLogRepository;

/// Audit sink combining tracing output with the persisted security log.
#[derive(Clone)]
pub struct AuditLog {
    store: SecurityLogRepository,
}

impl AuditLog {
    pub fn new(store: SecurityLogRepository) -> Self {
        Self { store }
    }

    /// Record an event.
    pub async fn log(&self, event_type: &str, description: &str, severity: Severity) {
        match severity {
            Severity::Info => info!(event_type, "{}", description),
            Severity::Warning => warn!(event_type, "{}", description),
            Severity::Error | Severity::Critical => error!(event_type, "{}", description),
        }

        let event = SecurityEvent::new(event_type, description, severity);
        if let Err(e) = self.store.append(&event).await {
            warn!("Failed to persist audit event {}: {}", event_type, e);
        }
    }
}
