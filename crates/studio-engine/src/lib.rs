//! Generation orchestration for CodeCraft Studio.
//!
//! The pipeline drives lyric generation, style selection, audio synthesis,
//! mixing, scene planning, and video rendering in a strict phase order,
//! persisting the generation record at every boundary. External failures
//! degrade to deterministic fallbacks; only validation and storage errors
//! surface to the caller.

pub mod audit;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod scenes;
pub mod styles;

pub use audit::AuditLog;
pub use config::EngineConfig;
pub use context::StudioContext;
pub use error::{EngineError, EngineResult};
pub use logging::GenerationLogger;
pub use pipeline::{GenerationOutcome, GenerationPipeline};
pub use scenes::plan_scenes;
pub use styles::{select_music_style, select_voice_style};
