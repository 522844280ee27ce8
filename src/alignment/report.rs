use std::fmt;

use serde::Serialize;

use crate::alignment::cues::CueAssembly;
use crate::types::Cue;

/// Warning-level findings about an alignment. None of these abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Too few cues to trust the alignment; the subtitle artifact is left empty.
    AlignmentShortfall {
        cue_count: usize,
        min_cue_count: usize,
    },
    /// Some script lines never matched the spoken tokens.
    CountMismatch { cue_count: usize, line_count: usize },
    /// Spoken text buffered after the last match and dropped.
    UnmatchedTail {
        text: String,
        token_count: usize,
        start_ticks: u64,
    },
}

impl Diagnostic {
    pub fn is_shortfall(&self) -> bool {
        matches!(self, Self::AlignmentShortfall { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlignmentShortfall {
                cue_count,
                min_cue_count,
            } => write!(
                f,
                "alignment shortfall: {cue_count} cue(s) produced, at least {min_cue_count} required"
            ),
            Self::CountMismatch {
                cue_count,
                line_count,
            } => write!(
                f,
                "cue count {cue_count} differs from script line count {line_count}"
            ),
            Self::UnmatchedTail {
                text,
                token_count,
                start_ticks,
            } => write!(
                f,
                "{token_count} trailing token(s) from tick {start_ticks} never matched a script line: {text:?}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignmentReport {
    pub script_line_count: usize,
    pub corrected_line_count: usize,
    pub speakable_line_count: usize,
    pub token_count: usize,
    pub cue_count: usize,
    pub over_width_cue_count: usize,
    pub speech_duration_ticks: u64,
    pub diagnostics: Vec<Diagnostic>,
}

impl AlignmentReport {
    pub fn has_shortfall(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_shortfall)
    }
}

/// Post-conditions of the cue-assembly pass.
pub fn evaluate_assembly(
    assembly: &CueAssembly,
    speakable_line_count: usize,
    min_cue_count: usize,
) -> Vec<Diagnostic> {
    let cue_count = assembly.cues.len();
    let mut diagnostics = Vec::new();

    if cue_count < min_cue_count {
        diagnostics.push(Diagnostic::AlignmentShortfall {
            cue_count,
            min_cue_count,
        });
    }
    if cue_count != speakable_line_count {
        diagnostics.push(Diagnostic::CountMismatch {
            cue_count,
            line_count: speakable_line_count,
        });
    }
    if let Some(tail) = &assembly.unmatched_tail {
        diagnostics.push(Diagnostic::UnmatchedTail {
            text: tail.text.clone(),
            token_count: tail.token_count,
            start_ticks: tail.start_ticks,
        });
    }

    diagnostics
}

pub fn count_over_width(cues: &[Cue], max_width: usize) -> usize {
    cues.iter()
        .filter(|cue| cue.text.chars().count() > max_width)
        .count()
}
