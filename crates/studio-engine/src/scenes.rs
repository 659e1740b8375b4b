//! Scene planning.
//!
//! Each verse is classified into a scene category by an explicit ordered
//! keyword table, first match wins. A verse matching nothing falls through
//! to the chorus default (refrains get the grand vista) and finally to a
//! default derived from the music style, so every style's visual identity
//! is reachable.

use studio_models::{LyricDocument, MusicStyle, Scene, SceneCategory, VerseKind, VoiceStyle};
use tracing::debug;

/// Ordered verse classification rules.
const SCENE_RULES: &[(&[&str], SceneCategory)] = &[
    (
        &["battle", "fight", "war", "sword", "victory"],
        SceneCategory::EpicBattle,
    ),
    (
        &["divine", "sacred", "eternal", "heaven", "glory"],
        SceneCategory::SacredTemple,
    ),
    (
        &["heart", "love", "soul", "emotion"],
        SceneCategory::EmotionalCloseup,
    ),
    (
        &["rise", "ascend", "journey", "path", "forward"],
        SceneCategory::CinematicJourney,
    ),
];

/// Default category when no keyword and no chorus rule applies.
fn style_default(music_style: MusicStyle) -> SceneCategory {
    match music_style {
        MusicStyle::Dark => SceneCategory::DarkRitual,
        MusicStyle::Fantasy => SceneCategory::FantasyRealm,
        MusicStyle::Gregorian => SceneCategory::SacredTemple,
        MusicStyle::Emotional => SceneCategory::EmotionalCloseup,
        MusicStyle::Pop => SceneCategory::CinematicJourney,
        MusicStyle::Gladiator => SceneCategory::EpicBattle,
        MusicStyle::Epic => SceneCategory::HeroicScene,
    }
}

/// Classify one verse.
pub fn classify_verse(
    lyrics: &str,
    verse_kind: VerseKind,
    music_style: MusicStyle,
) -> SceneCategory {
    let lyrics_lower = lyrics.to_lowercase();

    if let Some((_, category)) = SCENE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lyrics_lower.contains(k)))
    {
        return *category;
    }

    if verse_kind == VerseKind::Chorus {
        return SceneCategory::GrandVista;
    }

    style_default(music_style)
}

/// Plan the ordered scene list for a lyric document.
pub fn plan_scenes(
    document: &LyricDocument,
    _voice_style: VoiceStyle,
    music_style: MusicStyle,
) -> Vec<Scene> {
    let scenes: Vec<Scene> = document
        .verses
        .iter()
        .enumerate()
        .map(|(index, verse)| {
            let category = classify_verse(&verse.lyrics, verse.kind, music_style);
            Scene {
                index,
                category,
                description: category.description().to_string(),
                verse_kind: verse.kind,
                lyrics: verse.lyrics.clone(),
                timing: verse.timing,
            }
        })
        .collect();

    debug!(
        "Planned {} scenes for '{}' ({})",
        scenes.len(),
        document.title,
        music_style
    );
    scenes
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_models::{SongTiming, Verse};

    fn document(verses: Vec<Verse>) -> LyricDocument {
        LyricDocument {
            title: "Title".to_string(),
            theme: "Theme".to_string(),
            full_text: verses
                .iter()
                .map(|v| v.lyrics.clone())
                .collect::<Vec<_>>()
                .join("\n"),
            verses,
        }
    }

    fn verse(kind: VerseKind, lyrics: &str, start: f64) -> Verse {
        Verse {
            kind,
            lyrics: lyrics.to_string(),
            timing: SongTiming::new(start, start + 30.0).unwrap(),
        }
    }

    #[test]
    fn test_keyword_classification() {
        assert_eq!(
            classify_verse("the battle rages on", VerseKind::Verse, MusicStyle::Epic),
            SceneCategory::EpicBattle
        );
        assert_eq!(
            classify_verse("divine light above", VerseKind::Verse, MusicStyle::Epic),
            SceneCategory::SacredTemple
        );
        assert_eq!(
            classify_verse("my heart is yours", VerseKind::Verse, MusicStyle::Epic),
            SceneCategory::EmotionalCloseup
        );
        assert_eq!(
            classify_verse("the journey begins", VerseKind::Verse, MusicStyle::Epic),
            SceneCategory::CinematicJourney
        );
    }

    #[test]
    fn test_battle_outranks_divine() {
        // Both keyword sets match; the earlier rule wins.
        assert_eq!(
            classify_verse(
                "battle under divine skies",
                VerseKind::Verse,
                MusicStyle::Epic
            ),
            SceneCategory::EpicBattle
        );
    }

    #[test]
    fn test_chorus_default() {
        assert_eq!(
            classify_verse("la la la", VerseKind::Chorus, MusicStyle::Epic),
            SceneCategory::GrandVista
        );
    }

    #[test]
    fn test_style_defaults() {
        for (style, expected) in [
            (MusicStyle::Dark, SceneCategory::DarkRitual),
            (MusicStyle::Fantasy, SceneCategory::FantasyRealm),
            (MusicStyle::Gregorian, SceneCategory::SacredTemple),
            (MusicStyle::Epic, SceneCategory::HeroicScene),
        ] {
            assert_eq!(classify_verse("la la la", VerseKind::Verse, style), expected);
        }
    }

    #[test]
    fn test_plan_preserves_order_and_timing() {
        let doc = document(vec![
            verse(VerseKind::Verse, "battle cry", 0.0),
            verse(VerseKind::Chorus, "la la la", 30.0),
        ]);

        let scenes = plan_scenes(&doc, VoiceStyle::HeroicMale, MusicStyle::Epic);
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].index, 0);
        assert_eq!(scenes[0].category, SceneCategory::EpicBattle);
        assert_eq!(scenes[1].category, SceneCategory::GrandVista);
        assert_eq!(scenes[1].timing.start_secs, 30.0);
        assert_eq!(scenes[0].description, SceneCategory::EpicBattle.description());
    }

    #[test]
    fn test_planning_is_deterministic() {
        let doc = document(vec![verse(VerseKind::Verse, "shadow and battle", 0.0)]);
        let first = plan_scenes(&doc, VoiceStyle::Whisper, MusicStyle::Dark);
        let second = plan_scenes(&doc, VoiceStyle::Whisper, MusicStyle::Dark);
        assert_eq!(first, second);
    }
}
