//! Security/audit event types.
//!
//! Events are produced by every pipeline phase and consumed by the audit
//! logging collaborator; the core never reads them back.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Audit severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Requester identity attached to externally triggered events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

/// One append-only audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SecurityEvent {
    /// Short machine-readable event type, e.g. "LYRICS_GENERATED"
    pub event_type: String,
    /// Human-readable description
    pub description: String,
    pub severity: Severity,
    /// Requester identity, absent for system-originated events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientInfo>,
    pub recorded_at: DateTime<Utc>,
}

impl SecurityEvent {
    pub fn new(
        event_type: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            description: description.into(),
            severity,
            client: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_client(mut self, client: ClientInfo) -> Self {
        self.client = Some(client);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.as_str(), "INFO");
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn test_event_construction() {
        let event = SecurityEvent::new("LYRICS_GENERATED", "Theme: Epic", Severity::Info);
        assert_eq!(event.event_type, "LYRICS_GENERATED");
        assert!(event.client.is_none());

        let event = event.with_client(ClientInfo {
            ip_address: "127.0.0.1".to_string(),
            user_agent: "test".to_string(),
        });
        assert!(event.client.is_some());
    }
}
