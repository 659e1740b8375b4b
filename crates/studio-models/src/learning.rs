//! Recorded style combinations.
//!
//! The "learning" table is a bounded, append-only association list of past
//! theme-to-style choices: no model, just a most-recent-match lookup. The
//! store keeps at most [`LEARNING_CAPACITY`] rows, evicting oldest-first.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::style::{MusicStyle, VoiceStyle};

/// Maximum retained combinations; older entries are evicted first.
pub const LEARNING_CAPACITY: usize = 100;

/// One recorded theme-to-style association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StyleCombination {
    /// Theme keyword the combination was recorded under
    pub theme: String,
    pub music_style: MusicStyle,
    pub voice_style: VoiceStyle,
    /// Success rating 1-5; only ratings >= 4 are recorded
    pub rating: u8,
    pub recorded_at: DateTime<Utc>,
}

impl StyleCombination {
    pub fn new(
        theme: impl Into<String>,
        music_style: MusicStyle,
        voice_style: VoiceStyle,
        rating: u8,
    ) -> Self {
        Self {
            theme: theme.into(),
            music_style,
            voice_style,
            rating: rating.min(5),
            recorded_at: Utc::now(),
        }
    }

    /// True if this combination's theme keyword occurs in the given theme.
    pub fn matches_theme(&self, theme: &str) -> bool {
        theme.to_lowercase().contains(&self.theme.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_match_is_substring_and_case_insensitive() {
        let combo = StyleCombination::new("battle", MusicStyle::Gladiator, VoiceStyle::HeroicMale, 5);
        assert!(combo.matches_theme("Epic Battle of Champions"));
        assert!(combo.matches_theme("BATTLE"));
        assert!(!combo.matches_theme("Sacred Prayer"));
    }

    #[test]
    fn test_rating_is_capped() {
        let combo = StyleCombination::new("x", MusicStyle::Epic, VoiceStyle::Choir, 9);
        assert_eq!(combo.rating, 5);
    }
}
