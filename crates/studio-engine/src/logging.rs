//! Structured per-generation logging.

use tracing::{error, info, warn};

use studio_models::GenerationId;

/// Logger attaching generation ID and phase context to every line.
#[derive(Debug, Clone)]
pub struct GenerationLogger {
    generation_id: String,
}

impl GenerationLogger {
    pub fn new(generation_id: &GenerationId) -> Self {
        Self {
            generation_id: generation_id.to_string(),
        }
    }

    /// Log the start of a phase.
    pub fn phase_start(&self, phase: &str) {
        info!(
            generation_id = %self.generation_id,
            phase,
            "Phase started"
        );
    }

    /// Log phase completion with a detail message.
    pub fn phase_done(&self, phase: &str, detail: &str) {
        info!(
            generation_id = %self.generation_id,
            phase,
            "Phase completed: {}", detail
        );
    }

    /// Log a degraded-mode fallback.
    pub fn fallback(&self, phase: &str, reason: &str) {
        warn!(
            generation_id = %self.generation_id,
            phase,
            "Falling back: {}", reason
        );
    }

    /// Log a fatal error.
    pub fn failed(&self, message: &str) {
        error!(
            generation_id = %self.generation_id,
            "Generation failed: {}", message
        );
    }

    pub fn generation_id(&self) -> &str {
        &self.generation_id
    }
}
