//! Scene types for video rendering.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::lyrics::VerseKind;
use crate::style::StyleParseError;
use crate::timing::SongTiming;

/// A fixed RGB color triple used as a scene palette.
pub type Palette = [[u8; 3]; 3];

/// Fixed catalogue of visual scene categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SceneCategory {
    /// Battle with warriors, golden light, triumphant atmosphere
    EpicBattle,
    /// Temple with golden light rays, divine presence
    SacredTemple,
    /// Close-up with dramatic lighting, intimate atmosphere
    EmotionalCloseup,
    /// Journey with movement, epic landscape, rising action
    CinematicJourney,
    /// Vista with epic scale, dramatic lighting, triumphant mood
    GrandVista,
    /// Dramatic backlighting and heroic atmosphere
    HeroicScene,
    /// Ritual with mysterious atmosphere
    DarkRitual,
    /// Realm with magical elements
    FantasyRealm,
}

impl SceneCategory {
    pub const ALL: &'static [SceneCategory] = &[
        SceneCategory::EpicBattle,
        SceneCategory::SacredTemple,
        SceneCategory::EmotionalCloseup,
        SceneCategory::CinematicJourney,
        SceneCategory::GrandVista,
        SceneCategory::HeroicScene,
        SceneCategory::DarkRitual,
        SceneCategory::FantasyRealm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneCategory::EpicBattle => "epic_battle",
            SceneCategory::SacredTemple => "sacred_temple",
            SceneCategory::EmotionalCloseup => "emotional_closeup",
            SceneCategory::CinematicJourney => "cinematic_journey",
            SceneCategory::GrandVista => "grand_vista",
            SceneCategory::HeroicScene => "heroic_scene",
            SceneCategory::DarkRitual => "dark_ritual",
            SceneCategory::FantasyRealm => "fantasy_realm",
        }
    }

    /// Fixed textual description attached to planned scenes.
    pub fn description(&self) -> &'static str {
        match self {
            SceneCategory::EpicBattle => {
                "Epic battle scene with warriors, golden light, and triumphant atmosphere"
            }
            SceneCategory::SacredTemple => {
                "Sacred temple with golden light rays, ethereal atmosphere, divine presence"
            }
            SceneCategory::EmotionalCloseup => {
                "Emotional close-up with dramatic lighting, intimate atmosphere"
            }
            SceneCategory::CinematicJourney => {
                "Cinematic journey scene with movement, epic landscape, rising action"
            }
            SceneCategory::GrandVista => {
                "Grand cinematic vista with epic scale, dramatic lighting, triumphant mood"
            }
            SceneCategory::HeroicScene => {
                "Epic cinematic scene with dramatic lighting and heroic atmosphere"
            }
            SceneCategory::DarkRitual => "Dark ritual scene with mysterious atmosphere",
            SceneCategory::FantasyRealm => "Fantasy realm with magical elements",
        }
    }

    /// Three-color palette used by the frame renderer.
    pub fn palette(&self) -> Palette {
        match self {
            SceneCategory::EpicBattle => [[0x8b, 0x00, 0x00], [0xff, 0xd7, 0x00], [0x2f, 0x4f, 0x4f]],
            SceneCategory::SacredTemple => {
                [[0xda, 0xa5, 0x20], [0xf5, 0xde, 0xb3], [0x8b, 0x45, 0x13]]
            }
            SceneCategory::EmotionalCloseup => {
                [[0x46, 0x82, 0xb4], [0xff, 0xe4, 0xb5], [0xdd, 0xa0, 0xdd]]
            }
            SceneCategory::CinematicJourney => {
                [[0x46, 0x82, 0xb4], [0xff, 0xd7, 0x00], [0x22, 0x8b, 0x22]]
            }
            SceneCategory::GrandVista => [[0x87, 0xce, 0xeb], [0xff, 0xd7, 0x00], [0x2f, 0x4f, 0x4f]],
            SceneCategory::HeroicScene => [[0xff, 0xd7, 0x00], [0x8b, 0x00, 0x00], [0x46, 0x82, 0xb4]],
            SceneCategory::DarkRitual => [[0x00, 0x00, 0x00], [0x8b, 0x00, 0x00], [0x4b, 0x00, 0x82]],
            SceneCategory::FantasyRealm => {
                [[0x93, 0x70, 0xdb], [0x20, 0xb2, 0xaa], [0x98, 0xfb, 0x98]]
            }
        }
    }
}

impl fmt::Display for SceneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SceneCategory {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneCategory::ALL
            .iter()
            .find(|c| c.as_str() == s.to_lowercase())
            .copied()
            .ok_or_else(|| StyleParseError(s.to_string()))
    }
}

/// One planned visual unit, attached to a single verse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// Position in the scene sequence
    pub index: usize,
    /// Visual category
    pub category: SceneCategory,
    /// The category's fixed description
    pub description: String,
    /// Kind of the verse this scene illustrates
    pub verse_kind: VerseKind,
    /// Lyric line shown as the scene's text overlay
    pub lyrics: String,
    /// Span within the song
    pub timing: SongTiming,
}
