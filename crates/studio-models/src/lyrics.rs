//! Lyric document types.
//!
//! A [`LyricDocument`] is a transient value object produced by the lyric
//! generator (or its fallback) and serialized into the generation record's
//! `lyrics_data` column. It is never persisted on its own.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::style::StyleParseError;
use crate::timing::{self, SongTiming};

/// Verse classification within a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerseKind {
    #[default]
    Verse,
    Chorus,
    Bridge,
}

impl VerseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerseKind::Verse => "verse",
            VerseKind::Chorus => "chorus",
            VerseKind::Bridge => "bridge",
        }
    }
}

impl fmt::Display for VerseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerseKind {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verse" => Ok(VerseKind::Verse),
            "chorus" => Ok(VerseKind::Chorus),
            "bridge" => Ok(VerseKind::Bridge),
            other => Err(StyleParseError(other.to_string())),
        }
    }
}

/// One timed section of lyrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Verse {
    /// Section classification
    #[serde(rename = "type")]
    pub kind: VerseKind,
    /// Lyric text for this section
    pub lyrics: String,
    /// Span within the song
    pub timing: SongTiming,
}

/// A complete generated lyric document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LyricDocument {
    pub title: String,
    pub theme: String,
    /// Complete lyrics as one text
    pub full_text: String,
    /// Ordered timed sections; non-empty after successful generation
    pub verses: Vec<Verse>,
}

impl LyricDocument {
    /// True if the document has text and at least one verse.
    pub fn is_well_formed(&self) -> bool {
        !self.full_text.trim().is_empty() && !self.verses.is_empty()
    }

    /// True if verse spans are ordered by start time.
    pub fn has_monotonic_timing(&self) -> bool {
        let timings: Vec<SongTiming> = self.verses.iter().map(|v| v.timing).collect();
        timing::is_monotonic(&timings)
    }

    /// Total span covered by the verses, in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.verses
            .last()
            .map(|v| (v.timing.end_secs * 1000.0) as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> LyricDocument {
        LyricDocument {
            title: "Invictus Aeternum".to_string(),
            theme: "Epic Battle".to_string(),
            full_text: "Warriors gather in the dawn\nSteel and courage pressing on".to_string(),
            verses: vec![
                Verse {
                    kind: VerseKind::Verse,
                    lyrics: "Warriors gather in the dawn".to_string(),
                    timing: SongTiming::new(0.0, 30.0).unwrap(),
                },
                Verse {
                    kind: VerseKind::Chorus,
                    lyrics: "Steel and courage pressing on".to_string(),
                    timing: SongTiming::new(30.0, 60.0).unwrap(),
                },
            ],
        }
    }

    #[test]
    fn test_json_roundtrip_preserves_structure() {
        let doc = sample_document();
        let json = serde_json::to_string(&doc).unwrap();
        let back: LyricDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(back.verses.len(), doc.verses.len());
        assert_eq!(back.verses[0].kind, VerseKind::Verse);
        assert_eq!(back.verses[1].kind, VerseKind::Chorus);
        assert_eq!(back.verses[0].timing, doc.verses[0].timing);
        assert_eq!(back, doc);
    }

    #[test]
    fn test_verse_kind_serializes_as_type() {
        let doc = sample_document();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"type\":\"verse\""));
        assert!(json.contains("\"type\":\"chorus\""));
    }

    #[test]
    fn test_well_formed() {
        let doc = sample_document();
        assert!(doc.is_well_formed());
        assert!(doc.has_monotonic_timing());

        let empty = LyricDocument {
            title: "t".to_string(),
            theme: "t".to_string(),
            full_text: String::new(),
            verses: Vec::new(),
        };
        assert!(!empty.is_well_formed());
    }

    #[test]
    fn test_total_duration() {
        assert_eq!(sample_document().total_duration_ms(), 60_000);
    }
}
