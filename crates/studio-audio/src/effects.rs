//! Voice effect implementations.
//!
//! Each effect mirrors the studio's original processing chain: simple
//! overlay/gain/resample arithmetic, not studio-grade DSP. Effects are not
//! idempotent; re-applying reverb keeps stacking delayed copies.

use studio_models::{VoiceEffect, VoiceStyle};
use tracing::debug;

use crate::track::AudioTrack;

/// Apply a single named effect.
pub fn apply_effect(track: &AudioTrack, effect: VoiceEffect) -> AudioTrack {
    match effect {
        // Delayed attenuated copy
        VoiceEffect::Reverb => track.overlay(track, 100, -10.0),
        VoiceEffect::SoftReverb => track.overlay(track, 150, -15.0),
        // Reversed first half layered near the start
        VoiceEffect::Chorus => {
            let half = track.truncated(track.len_ms() / 2).reversed();
            track.overlay(&half, 50, 0.0)
        }
        VoiceEffect::BassBoost => track.gain_db(3.0),
        // Resample-based speed change standing in for pitch (tempo shifts too)
        VoiceEffect::PitchShift => track.resampled(1.1),
        VoiceEffect::Harmony => track.overlay(track, 25, -5.0),
        VoiceEffect::Intimate => track.gain_db(-5.0).low_pass(3000.0),
    }
}

/// Apply a style's full effect chain in its fixed order.
pub fn apply_effect_chain(track: AudioTrack, voice_style: VoiceStyle) -> AudioTrack {
    let effects = voice_style.effects();
    debug!("Applying {} effects for style {}", effects.len(), voice_style);

    effects
        .iter()
        .fold(track, |acc, effect| apply_effect(&acc, *effect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::tone;

    #[test]
    fn test_reverb_preserves_length() {
        let track = tone(440.0, 1000, 0.3);
        let processed = apply_effect(&track, VoiceEffect::Reverb);
        assert_eq!(processed.num_samples(), track.num_samples());
    }

    #[test]
    fn test_pitch_shift_shortens() {
        let track = tone(440.0, 1100, 0.3);
        let processed = apply_effect(&track, VoiceEffect::PitchShift);
        assert!(processed.num_samples() < track.num_samples());
    }

    #[test]
    fn test_bass_boost_raises_peak() {
        let track = tone(440.0, 500, 0.3);
        let processed = apply_effect(&track, VoiceEffect::BassBoost);
        assert!(processed.peak() > track.peak());
    }

    #[test]
    fn test_intimate_lowers_peak() {
        let track = tone(440.0, 500, 0.5);
        let processed = apply_effect(&track, VoiceEffect::Intimate);
        assert!(processed.peak() < track.peak());
    }

    #[test]
    fn test_chain_for_each_style() {
        for style in VoiceStyle::ALL {
            let track = tone(440.0, 1000, 0.3);
            let processed = apply_effect_chain(track, *style);
            assert!(!processed.is_empty(), "style {} emptied the track", style);
        }
    }

    #[test]
    fn test_reverb_stacks_when_reapplied() {
        // Reverb is not idempotent: each pass adds another delayed copy.
        let track = tone(200.0, 1000, 0.2);
        let once = apply_effect(&track, VoiceEffect::Reverb);
        let twice = apply_effect(&once, VoiceEffect::Reverb);
        assert_ne!(once.samples, twice.samples);
    }
}
