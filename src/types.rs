use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alignment::report::AlignmentReport;
use crate::error::AlignmentError;

/// Token timestamps are counted in 100 ns ticks.
pub const TICKS_PER_SECOND: u64 = 10_000_000;
pub const TICKS_PER_MILLISECOND: u64 = 10_000;

/// One word-boundary event from the speech engine.
///
/// Deserializes both the field names used here and the `offset`/`duration`
/// names emitted by word-boundary streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(alias = "offset", alias = "Offset")]
    pub start_ticks: u64,
    #[serde(alias = "duration", alias = "Duration")]
    pub duration_ticks: u64,
    #[serde(alias = "Text")]
    pub text: String,
}

impl Token {
    pub fn new(text: impl Into<String>, start_ticks: u64, duration_ticks: u64) -> Self {
        Self {
            start_ticks,
            duration_ticks,
            text: text.into(),
        }
    }

    pub fn end_ticks(&self) -> u64 {
        self.start_ticks.saturating_add(self.duration_ticks)
    }
}

/// A single subtitle entry.
///
/// `index` is 1-based and dense across an emitted cue list; the tick interval
/// is `[start_ticks, end_ticks)` with `start_ticks < end_ticks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub index: u32,
    pub start_ticks: u64,
    pub end_ticks: u64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleStyle {
    #[default]
    Srt,
    Vtt,
}

impl SubtitleStyle {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }

    pub(crate) fn millis_separator(self) -> char {
        match self {
            Self::Srt => ',',
            Self::Vtt => '.',
        }
    }
}

/// How decoded token fragments are joined while buffering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenSpacing {
    /// Word tokens of a space-delimited script; fragments are trimmed and
    /// joined with a single space.
    #[default]
    SpaceDelimited,
    /// Scripts without inter-word spacing; fragments are appended as-is.
    Concatenate,
}

impl TokenSpacing {
    pub fn from_space_delimited(is_space_delimited: bool) -> Self {
        if is_space_delimited {
            Self::SpaceDelimited
        } else {
            Self::Concatenate
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlignmentInput {
    pub script: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone)]
pub struct AlignmentOutput {
    /// Width-corrected line set the cues were matched against.
    pub lines: Vec<String>,
    pub cues: Vec<Cue>,
    pub report: AlignmentReport,
}

impl AlignmentOutput {
    /// False when too few cues were produced to be worth writing.
    pub fn is_usable(&self) -> bool {
        !self.report.has_shortfall()
    }
}

/// End of the last spoken token, i.e. the narration length.
pub fn speech_duration_ticks(tokens: &[Token]) -> u64 {
    tokens.iter().map(Token::end_ticks).max().unwrap_or(0)
}

pub fn load_tokens(path: &Path) -> Result<Vec<Token>, AlignmentError> {
    let data =
        std::fs::read_to_string(path).map_err(|e| AlignmentError::io("read token stream", e))?;
    parse_tokens(&data)
}

pub fn parse_tokens(json: &str) -> Result<Vec<Token>, AlignmentError> {
    serde_json::from_str(json).map_err(|e| AlignmentError::json("parse token stream", e))
}
