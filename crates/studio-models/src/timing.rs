//! Verse timing parsing and formatting.
//!
//! Lyric services emit timing in two shapes: timestamp ranges like
//! `"0:30-1:00"` (minutes:seconds) and bare second pairs like `"30:60"`.
//! Both parse into a [`SongTiming`]; the canonical display form is the
//! timestamp range.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum reasonable song position (1 hour in seconds).
pub const MAX_SONG_POSITION_SECS: f64 = 3600.0;

/// A start/end span within a song, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, JsonSchema)]
pub struct SongTiming {
    pub start_secs: f64,
    pub end_secs: f64,
}

impl SongTiming {
    /// Create a timing span, validating ordering and bounds.
    pub fn new(start_secs: f64, end_secs: f64) -> Result<Self, TimingError> {
        if start_secs < 0.0 || end_secs < 0.0 {
            return Err(TimingError::Negative);
        }
        if start_secs > end_secs {
            return Err(TimingError::StartAfterEnd);
        }
        if end_secs > MAX_SONG_POSITION_SECS {
            return Err(TimingError::ExceedsMaxPosition(MAX_SONG_POSITION_SECS));
        }
        Ok(Self {
            start_secs,
            end_secs,
        })
    }

    /// Span length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }

    /// Span length in milliseconds, rounded down.
    pub fn duration_ms(&self) -> u64 {
        (self.duration_secs() * 1000.0) as u64
    }
}

impl fmt::Display for SongTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_position(self.start_secs),
            format_position(self.end_secs)
        )
    }
}

impl FromStr for SongTiming {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimingError::Empty);
        }

        // Timestamp range: "M:SS-M:SS" (or bare seconds on either side).
        if let Some((start, end)) = s.split_once('-') {
            return Self::new(parse_position(start)?, parse_position(end)?);
        }

        // Bare second pair: "30:60".
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 2 {
            let start: f64 = parts[0]
                .parse()
                .map_err(|_| TimingError::InvalidValue(parts[0].to_string()))?;
            let end: f64 = parts[1]
                .parse()
                .map_err(|_| TimingError::InvalidValue(parts[1].to_string()))?;
            // A pair reading like a clock position ("0:30") is start..start+30;
            // a pair with end > 59 can only be a seconds pair.
            if end >= 60.0 || end > start {
                return Self::new(start, end);
            }
            let start_secs = start * 60.0 + end;
            return Self::new(start_secs, start_secs);
        }

        Err(TimingError::InvalidFormat(s.to_string()))
    }
}

impl Serialize for SongTiming {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SongTiming {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a single position: `M:SS`, `H:MM:SS`, or bare seconds.
pub fn parse_position(s: &str) -> Result<f64, TimingError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimingError::Empty);
    }

    let parts: Vec<&str> = s.split(':').collect();
    let mut secs = 0.0;
    if parts.len() > 3 {
        return Err(TimingError::InvalidFormat(s.to_string()));
    }
    for part in &parts {
        let value: f64 = part
            .parse()
            .map_err(|_| TimingError::InvalidValue(part.to_string()))?;
        if value < 0.0 {
            return Err(TimingError::Negative);
        }
        secs = secs * 60.0 + value;
    }
    Ok(secs)
}

/// Format a position as `M:SS` (or `H:MM:SS` past the hour).
pub fn format_position(total_secs: f64) -> String {
    let total = total_secs.round() as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// True if every span starts no earlier than the previous span's start.
pub fn is_monotonic(timings: &[SongTiming]) -> bool {
    timings
        .windows(2)
        .all(|pair| pair[0].start_secs <= pair[1].start_secs)
}

/// Timing parsing/validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimingError {
    #[error("Timing cannot be empty")]
    Empty,
    #[error("Timing cannot be negative")]
    Negative,
    #[error("Invalid timing value: {0}")]
    InvalidValue(String),
    #[error("Invalid timing format '{0}', expected 'M:SS-M:SS' or 'S:E'")]
    InvalidFormat(String),
    #[error("Start time is after end time")]
    StartAfterEnd,
    #[error("Timing exceeds maximum song position ({0} seconds)")]
    ExceedsMaxPosition(f64),
}
