//! Waveform synthesis: pure tones, the fallback voice, and the
//! style-parameterized background composer.

use studio_models::{MusicStyle, VoiceStyle};
use tracing::debug;

use crate::track::{AudioTrack, SAMPLE_RATE};

/// Peak amplitude the summed background is normalized to before export.
pub const BACKGROUND_PEAK: f32 = 0.7;

/// Fallback voice duration bounds.
const FALLBACK_MIN_MS: u64 = 3_000;
const FALLBACK_MAX_MS: u64 = 30_000;
/// Estimated speech pacing used to size the fallback tone.
const MS_PER_CHAR: u64 = 100;

/// Generate a sine tone.
pub fn tone(freq: f32, duration_ms: u64, amplitude: f32) -> AudioTrack {
    let count = (duration_ms * SAMPLE_RATE as u64 / 1000) as usize;
    let samples = (0..count)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()
        })
        .collect();
    AudioTrack::from_samples(samples)
}

/// Synthesize the deterministic fallback voice used when TTS is
/// unavailable: a faded pure tone whose length tracks the text length,
/// bounded to 3-30 seconds.
pub fn fallback_voice(text: &str, voice_style: VoiceStyle) -> AudioTrack {
    let duration_ms = (text.chars().count() as u64 * MS_PER_CHAR).clamp(FALLBACK_MIN_MS, FALLBACK_MAX_MS);

    let base_freq = match voice_style {
        VoiceStyle::Soprano => 523.25,   // C5
        VoiceStyle::HeroicMale => 329.63, // E4
        VoiceStyle::Whisper => 220.0,    // A3
        VoiceStyle::Choir => 440.0,      // A4
    };

    debug!(
        "Synthesizing fallback voice: {}ms at {}Hz for style {}",
        duration_ms, base_freq, voice_style
    );

    tone(base_freq, duration_ms, 0.8)
        .fade_in(500)
        .fade_out(500)
        .gain_db(-10.0)
}

/// One sine component of a background arrangement.
struct Component {
    /// Frequency as a ratio of the style's base frequency
    ratio: f32,
    amplitude: f32,
    /// Raise the sine to this even power for a pulse; 1 = plain sine
    power: i32,
    /// Pulses use an absolute rate in Hz instead of a base-frequency ratio
    absolute_hz: Option<f32>,
}

impl Component {
    const fn voice(ratio: f32, amplitude: f32) -> Self {
        Self {
            ratio,
            amplitude,
            power: 1,
            absolute_hz: None,
        }
    }

    const fn pulse(rate_hz: f32, power: i32, amplitude: f32) -> Self {
        Self {
            ratio: 1.0,
            amplitude,
            power,
            absolute_hz: Some(rate_hz),
        }
    }
}

/// Per-style arrangement: base frequency from a small musical-key table
/// plus the component stack summed over it.
struct Arrangement {
    base_freq: f32,
    components: &'static [Component],
}

// C3 with a perfect fifth and a slow rhythmic pulse
const EPIC: &[Component] = &[
    Component::voice(1.0, 0.3),
    Component::voice(1.5, 0.2),
    Component::pulse(2.0, 8, 0.1),
];
// A2 with a sub-octave drone
const DARK: &[Component] = &[Component::voice(1.0, 0.4), Component::voice(0.5, 0.3)];
// C4 with a major third
const EMOTIONAL: &[Component] = &[Component::voice(1.0, 0.3), Component::voice(1.25, 0.2)];
// G2 with a fifth and hard battle pulse
const GLADIATOR: &[Component] = &[
    Component::voice(1.0, 0.35),
    Component::voice(1.5, 0.15),
    Component::pulse(2.0, 8, 0.2),
];
// D3 with a perfect fourth, chant-like
const GREGORIAN: &[Component] = &[Component::voice(1.0, 0.3), Component::voice(4.0 / 3.0, 0.2)];
// F3 with a third and a high shimmer
const FANTASY: &[Component] = &[
    Component::voice(1.0, 0.3),
    Component::voice(1.25, 0.2),
    Component::voice(4.0, 0.05),
];
// A3 with a third and a light beat
const POP: &[Component] = &[
    Component::voice(1.0, 0.3),
    Component::voice(1.25, 0.2),
    Component::pulse(2.0, 4, 0.1),
];

fn arrangement_for(style: MusicStyle) -> Arrangement {
    match style {
        MusicStyle::Epic => Arrangement {
            base_freq: 130.81,
            components: EPIC,
        },
        MusicStyle::Dark => Arrangement {
            base_freq: 110.0,
            components: DARK,
        },
        MusicStyle::Emotional => Arrangement {
            base_freq: 261.63,
            components: EMOTIONAL,
        },
        MusicStyle::Gladiator => Arrangement {
            base_freq: 98.0,
            components: GLADIATOR,
        },
        MusicStyle::Gregorian => Arrangement {
            base_freq: 146.83,
            components: GREGORIAN,
        },
        MusicStyle::Fantasy => Arrangement {
            base_freq: 174.61,
            components: FANTASY,
        },
        MusicStyle::Pop => Arrangement {
            base_freq: 220.0,
            components: POP,
        },
    }
}

/// Build the background track for a style: a weighted sum of sine
/// components, normalized to [`BACKGROUND_PEAK`]. The output length equals
/// `duration_ms` to within one sample.
pub fn build_background(style: MusicStyle, duration_ms: u64) -> AudioTrack {
    let arrangement = arrangement_for(style);
    let count = (duration_ms * SAMPLE_RATE as u64 / 1000) as usize;

    debug!(
        "Building {} background: {}ms, base {}Hz, {} components",
        style,
        duration_ms,
        arrangement.base_freq,
        arrangement.components.len()
    );

    let mut samples = vec![0.0f32; count];
    for component in arrangement.components {
        let freq = component
            .absolute_hz
            .unwrap_or(arrangement.base_freq * component.ratio);
        for (i, sample) in samples.iter_mut().enumerate() {
            let t = i as f32 / SAMPLE_RATE as f32;
            let value = (2.0 * std::f32::consts::PI * freq * t).sin();
            *sample += component.amplitude * value.powi(component.power);
        }
    }

    AudioTrack::from_samples(samples).normalized(BACKGROUND_PEAK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_properties() {
        let track = tone(440.0, 1000, 0.5);
        assert_eq!(track.len_ms(), 1000);
        assert!((track.peak() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_background_length_for_all_styles() {
        for style in MusicStyle::ALL {
            let track = build_background(*style, 2000);
            // Within one sample-rate-quantization unit of the request
            let expected = 2 * SAMPLE_RATE as usize;
            assert!(
                (track.num_samples() as i64 - expected as i64).abs() <= 1,
                "style {} produced {} samples",
                style,
                track.num_samples()
            );
        }
    }

    #[test]
    fn test_background_peak_ceiling() {
        for style in MusicStyle::ALL {
            let track = build_background(*style, 1000);
            assert!(
                track.peak() <= BACKGROUND_PEAK + 1e-4,
                "style {} peaked at {}",
                style,
                track.peak()
            );
        }
    }

    #[test]
    fn test_background_zero_duration() {
        let track = build_background(MusicStyle::Epic, 0);
        assert_eq!(track.num_samples(), 0);
    }

    #[test]
    fn test_background_is_deterministic() {
        let a = build_background(MusicStyle::Dark, 500);
        let b = build_background(MusicStyle::Dark, 500);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_voice_duration_bounds() {
        // Short text hits the 3s floor
        let short = fallback_voice("hi", VoiceStyle::HeroicMale);
        assert_eq!(short.len_ms(), 3000);

        // Long text hits the 30s ceiling
        let long_text = "x".repeat(1000);
        let long = fallback_voice(&long_text, VoiceStyle::Soprano);
        assert_eq!(long.len_ms(), 30_000);

        // In between scales with text length
        let mid = fallback_voice(&"x".repeat(100), VoiceStyle::Choir);
        assert_eq!(mid.len_ms(), 10_000);
    }

    #[test]
    fn test_fallback_voice_fades() {
        let track = fallback_voice("hello world", VoiceStyle::Whisper);
        assert_eq!(track.samples[0], 0.0);
        assert!(track.samples.last().unwrap().abs() < 0.01);
    }
}
