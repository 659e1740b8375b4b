//! Style selection rule tables.
//!
//! Both selectors are explicit ordered (keywords, result) tables scanned
//! first-match-wins, so the tie-break order is visible and testable. The
//! music selector consults the recorded combinations first; the most
//! recently appended match wins.

use studio_models::{MusicStyle, StyleCombination, VoiceStyle};

/// Ordered voice selection rules.
const VOICE_RULES: &[(&[&str], VoiceStyle)] = &[
    (&["battle", "war", "champion"], VoiceStyle::HeroicMale),
    (&["sacred", "divine", "eternal"], VoiceStyle::Choir),
    (&["emotional", "love", "heart"], VoiceStyle::Soprano),
    (&["mystery", "secret"], VoiceStyle::Whisper),
];

/// Ordered music selection rules, applied when no recorded combination
/// matches.
const MUSIC_RULES: &[(&[&str], MusicStyle)] = &[
    (&["gladiator", "arena"], MusicStyle::Gladiator),
    (&["sacred", "prayer"], MusicStyle::Gregorian),
    (&["dark", "shadow"], MusicStyle::Dark),
    (&["magic", "fantasy"], MusicStyle::Fantasy),
    (&["emotional"], MusicStyle::Emotional),
    (&["modern", "pop"], MusicStyle::Pop),
];

/// Select a voice style for a theme.
pub fn select_voice_style(theme: &str) -> VoiceStyle {
    let theme_lower = theme.to_lowercase();
    VOICE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| theme_lower.contains(k)))
        .map(|(_, style)| *style)
        .unwrap_or(VoiceStyle::HeroicMale)
}

/// Select a music style for a theme.
///
/// `recorded` is expected newest-first (as returned by the learning
/// repository); the first theme match wins before the keyword table runs.
pub fn select_music_style(theme: &str, recorded: &[StyleCombination]) -> MusicStyle {
    if let Some(combination) = recorded.iter().find(|c| c.matches_theme(theme)) {
        return combination.music_style;
    }

    let theme_lower = theme.to_lowercase();
    MUSIC_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| theme_lower.contains(k)))
        .map(|(_, style)| *style)
        .unwrap_or(MusicStyle::Epic)
}
