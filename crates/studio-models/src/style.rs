//! Voice and music style definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named audio effects applied to a synthesized voice track.
///
/// The concrete signal processing lives in the audio engine; this enum is
/// the shared vocabulary between styles and that engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoiceEffect {
    /// Overlay a delayed, attenuated copy
    Reverb,
    /// Gentler variant of reverb for intimate styles
    SoftReverb,
    /// Overlay the reversed first half of the track
    Chorus,
    /// Flat low-end gain increase
    BassBoost,
    /// Resample-based speed change used as a pitch proxy (also changes tempo)
    PitchShift,
    /// Overlay an attenuated copy at a small offset
    Harmony,
    /// Flat gain decrease plus low-pass
    Intimate,
}

/// Available voice presentation styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VoiceStyle {
    /// Deep, powerful male voice with heroic resonance
    #[default]
    HeroicMale,
    /// High, clear female soprano with ethereal quality
    Soprano,
    /// Full choir harmonies with Latin pronunciation
    Choir,
    /// Intimate whisper voice for dramatic effect
    Whisper,
}

impl VoiceStyle {
    pub const ALL: &'static [VoiceStyle] = &[
        VoiceStyle::HeroicMale,
        VoiceStyle::Soprano,
        VoiceStyle::Choir,
        VoiceStyle::Whisper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceStyle::HeroicMale => "heroic_male",
            VoiceStyle::Soprano => "soprano",
            VoiceStyle::Choir => "choir",
            VoiceStyle::Whisper => "whisper",
        }
    }

    /// The effect chain applied after synthesis, in order.
    pub fn effects(&self) -> &'static [VoiceEffect] {
        match self {
            VoiceStyle::HeroicMale => &[VoiceEffect::Reverb, VoiceEffect::BassBoost],
            VoiceStyle::Soprano => &[VoiceEffect::Reverb, VoiceEffect::PitchShift],
            VoiceStyle::Choir => &[
                VoiceEffect::Reverb,
                VoiceEffect::Chorus,
                VoiceEffect::Harmony,
            ],
            VoiceStyle::Whisper => &[VoiceEffect::Intimate, VoiceEffect::SoftReverb],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            VoiceStyle::HeroicMale => "Deep, powerful male voice with heroic resonance",
            VoiceStyle::Soprano => "High, clear female soprano with ethereal quality",
            VoiceStyle::Choir => "Full choir harmonies with Latin pronunciation",
            VoiceStyle::Whisper => "Intimate whisper voice for dramatic effect",
        }
    }
}

impl fmt::Display for VoiceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VoiceStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heroic_male" => Ok(VoiceStyle::HeroicMale),
            "soprano" => Ok(VoiceStyle::Soprano),
            "choir" => Ok(VoiceStyle::Choir),
            "whisper" => Ok(VoiceStyle::Whisper),
            _ => Err(StyleParseError(s.to_string())),
        }
    }
}

/// Available music arrangement styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MusicStyle {
    /// Epic orchestral with full symphony and choir
    #[default]
    Epic,
    /// Modern pop arrangement with orchestral elements
    Pop,
    /// Dark, brooding orchestral with minor keys
    Dark,
    /// Medieval Gregorian chant with sacred atmosphere
    Gregorian,
    /// Fantasy orchestral with magical elements
    Fantasy,
    /// Gladiator-style epic with battle drums
    Gladiator,
    /// Emotional ballad with strings and piano
    Emotional,
}

impl MusicStyle {
    pub const ALL: &'static [MusicStyle] = &[
        MusicStyle::Epic,
        MusicStyle::Pop,
        MusicStyle::Dark,
        MusicStyle::Gregorian,
        MusicStyle::Fantasy,
        MusicStyle::Gladiator,
        MusicStyle::Emotional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicStyle::Epic => "epic",
            MusicStyle::Pop => "pop",
            MusicStyle::Dark => "dark",
            MusicStyle::Gregorian => "gregorian",
            MusicStyle::Fantasy => "fantasy",
            MusicStyle::Gladiator => "gladiator",
            MusicStyle::Emotional => "emotional",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MusicStyle::Epic => "Epic orchestral with full symphony and choir",
            MusicStyle::Pop => "Modern pop arrangement with orchestral elements",
            MusicStyle::Dark => "Dark, brooding orchestral with minor keys",
            MusicStyle::Gregorian => "Medieval Gregorian chant with sacred atmosphere",
            MusicStyle::Fantasy => "Fantasy orchestral with magical elements",
            MusicStyle::Gladiator => "Gladiator-style epic with battle drums",
            MusicStyle::Emotional => "Emotional ballad with strings and piano",
        }
    }
}

impl fmt::Display for MusicStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MusicStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "epic" => Ok(MusicStyle::Epic),
            "pop" => Ok(MusicStyle::Pop),
            "dark" => Ok(MusicStyle::Dark),
            "gregorian" => Ok(MusicStyle::Gregorian),
            "fantasy" => Ok(MusicStyle::Fantasy),
            "gladiator" => Ok(MusicStyle::Gladiator),
            "emotional" => Ok(MusicStyle::Emotional),
            _ => Err(StyleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown style: {0}")]
pub struct StyleParseError(pub(crate) String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_style_parse() {
        assert_eq!(
            "heroic_male".parse::<VoiceStyle>().unwrap(),
            VoiceStyle::HeroicMale
        );
        assert_eq!("WHISPER".parse::<VoiceStyle>().unwrap(), VoiceStyle::Whisper);
        assert!("unknown".parse::<VoiceStyle>().is_err());
    }

    #[test]
    fn test_music_style_parse() {
        assert_eq!("epic".parse::<MusicStyle>().unwrap(), MusicStyle::Epic);
        assert_eq!(
            "gregorian".parse::<MusicStyle>().unwrap(),
            MusicStyle::Gregorian
        );
        assert!("metal".parse::<MusicStyle>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for style in MusicStyle::ALL {
            assert_eq!(style.to_string().parse::<MusicStyle>().unwrap(), *style);
        }
        for style in VoiceStyle::ALL {
            assert_eq!(style.to_string().parse::<VoiceStyle>().unwrap(), *style);
        }
    }

    #[test]
    fn test_effect_chains() {
        assert_eq!(
            VoiceStyle::HeroicMale.effects(),
            &[VoiceEffect::Reverb, VoiceEffect::BassBoost]
        );
        assert_eq!(VoiceStyle::Choir.effects().len(), 3);
    }
}
