//! Audio engine for CodeCraft Studio.
//!
//! Everything here is pure-CPU sample arithmetic on mono f32 tracks:
//! - [`AudioTrack`] with overlay/gain/resample/filter primitives
//! - voice effect chains keyed by [`studio_models::VoiceStyle`]
//! - the sine-sum background composer
//! - the voice/background mixer
//! - WAV encode/decode via `hound`

pub mod effects;
pub mod error;
pub mod mixer;
pub mod synth;
pub mod track;

pub use effects::apply_effect_chain;
pub use error::{AudioError, AudioResult};
pub use mixer::mix;
pub use synth::{build_background, fallback_voice, tone};
pub use track::{AudioTrack, SAMPLE_RATE};
