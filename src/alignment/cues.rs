use crate::alignment::buffer::TokenBuffer;
use crate::alignment::matching::{
    decode_token_text, fuzzy_eq, is_blank_line, strip_boundary_punctuation,
};
use crate::types::{Cue, Token, TokenSpacing};

/// Result of walking the token stream against the corrected lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueAssembly {
    pub cues: Vec<Cue>,
    /// Buffered speech that never matched a line before the stream ended.
    pub unmatched_tail: Option<UnmatchedTail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedTail {
    pub text: String,
    pub token_count: usize,
    pub start_ticks: u64,
}

struct Accumulator {
    buffer: TokenBuffer,
    pending_start_ticks: Option<u64>,
    pending_tokens: usize,
    cursor: usize,
}

impl Accumulator {
    fn new(spacing: TokenSpacing, cursor: usize) -> Self {
        Self {
            buffer: TokenBuffer::new(spacing),
            pending_start_ticks: None,
            pending_tokens: 0,
            cursor,
        }
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.pending_start_ticks = None;
        self.pending_tokens = 0;
    }
}

pub fn assemble_cues(tokens: &[Token], lines: &[String], spacing: TokenSpacing) -> CueAssembly {
    assemble_cues_by(tokens, lines, spacing, fuzzy_eq)
}

/// Emits one cue per line, spanning from the first token buffered for the
/// line to the end of the token that completed the match.
pub fn assemble_cues_by<F>(
    tokens: &[Token],
    lines: &[String],
    spacing: TokenSpacing,
    matches: F,
) -> CueAssembly
where
    F: Fn(&str, &str) -> bool,
{
    let mut cues: Vec<Cue> = Vec::new();
    let mut acc = Accumulator::new(spacing, next_speakable(lines, 0));

    for token in tokens {
        let start_ticks = *acc.pending_start_ticks.get_or_insert(token.start_ticks);
        acc.pending_tokens += 1;
        acc.buffer.push(&decode_token_text(&token.text));

        let Some(line) = lines.get(acc.cursor) else {
            continue;
        };
        if acc.buffer.is_empty() || !matches(line, acc.buffer.text()) {
            continue;
        }

        // A zero-length final token must not produce an empty interval.
        let end_ticks = token.end_ticks().max(start_ticks.saturating_add(1));
        cues.push(Cue {
            index: cues.len() as u32 + 1,
            start_ticks,
            end_ticks,
            text: strip_boundary_punctuation(line).to_string(),
        });
        acc.cursor = next_speakable(lines, acc.cursor + 1);
        acc.reset();
    }

    let unmatched_tail = if acc.buffer.is_empty() {
        None
    } else {
        Some(UnmatchedTail {
            text: acc.buffer.text().to_string(),
            token_count: acc.pending_tokens,
            start_ticks: acc.pending_start_ticks.unwrap_or(0),
        })
    };

    CueAssembly {
        cues,
        unmatched_tail,
    }
}

/// Index of the first line at or after `from` with something to speak, or
/// `lines.len()` when none is left.
pub(crate) fn next_speakable<L: AsRef<str>>(lines: &[L], from: usize) -> usize {
    (from..lines.len())
        .find(|&idx| !is_blank_line(lines[idx].as_ref()))
        .unwrap_or(lines.len())
}

pub(crate) fn speakable_line_count(lines: &[String]) -> usize {
    lines.iter().filter(|line| !is_blank_line(line)).count()
}
