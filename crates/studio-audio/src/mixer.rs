//! Voice/background mixer.

use studio_models::MusicStyle;
use tracing::debug;

use crate::track::AudioTrack;

/// Per-style attenuation applied to the background so vocals stay
/// prominent. Epic styles keep the orchestra closer to the voice.
pub fn background_gain_db(style: MusicStyle) -> f32 {
    match style {
        MusicStyle::Epic => -12.0,
        MusicStyle::Emotional => -13.0,
        MusicStyle::Dark => -14.0,
        _ => -15.0,
    }
}

/// Mix a voice track over a background track.
///
/// The shorter track is padded with silence to the longer track's length,
/// the background is attenuated by the style's fixed offset, and the voice
/// is overlaid on top. The output length equals
/// `max(len(voice), len(background))`; nothing is truncated.
pub fn mix(voice: &AudioTrack, background: &AudioTrack, style: MusicStyle) -> AudioTrack {
    let target_ms = voice.len_ms().max(background.len_ms());
    debug!(
        "Mixing voice ({}ms) over {} background ({}ms) -> {}ms",
        voice.len_ms(),
        style,
        background.len_ms(),
        target_ms
    );

    let voice = voice.pad_to(target_ms);
    let background = background.pad_to(target_ms).gain_db(background_gain_db(style));

    background.overlay(&voice, 0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::tone;
    use crate::track::SAMPLE_RATE;

    #[test]
    fn test_mix_length_is_max() {
        let voice = tone(330.0, 2000, 0.5);
        let background = tone(130.0, 1000, 0.5);

        let mixed = mix(&voice, &background, MusicStyle::Epic);
        assert_eq!(mixed.num_samples(), voice.num_samples());

        let mixed = mix(&background, &voice, MusicStyle::Epic);
        assert_eq!(mixed.num_samples(), voice.num_samples());
    }

    #[test]
    fn test_mix_zero_length_edges() {
        let empty = AudioTrack::default();
        let background = tone(130.0, 500, 0.5);

        let mixed = mix(&empty, &background, MusicStyle::Dark);
        assert_eq!(mixed.num_samples(), background.num_samples());

        let mixed = mix(&background, &empty, MusicStyle::Dark);
        assert_eq!(mixed.num_samples(), background.num_samples());

        let mixed = mix(&empty, &empty, MusicStyle::Dark);
        assert_eq!(mixed.num_samples(), 0);
    }

    #[test]
    fn test_background_is_attenuated() {
        let voice = AudioTrack::silent(1000);
        let background = tone(130.0, 1000, 0.5);

        let mixed = mix(&voice, &background, MusicStyle::Gregorian);
        // -15dB on a 0.5 peak
        assert!(mixed.peak() < 0.12);
    }

    #[test]
    fn test_style_offsets_ordered() {
        assert!(background_gain_db(MusicStyle::Epic) > background_gain_db(MusicStyle::Pop));
        assert_eq!(background_gain_db(MusicStyle::Gladiator), -15.0);
    }

    #[test]
    fn test_voice_survives_mix() {
        let voice = tone(330.0, 1000, 0.5);
        let background = AudioTrack::silent(1000);
        let mixed = mix(&voice, &background, MusicStyle::Pop);

        // Voice passes through at unity gain
        assert!((mixed.peak() - 0.5).abs() < 0.01);
        assert_eq!(mixed.num_samples(), SAMPLE_RATE as usize);
    }
}
