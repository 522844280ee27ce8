use crate::alignment::matching::decode_token_text;
use crate::error::AlignmentError;
use crate::types::{Cue, Token};

pub const DEFAULT_WORDS_PER_CUE: usize = 10;
pub const DEFAULT_WRAP_WIDTH: usize = 79;

/// Builds cues straight from the token stream, `words_per_cue` tokens at a
/// time, for narrations that have no script to align against.
///
/// Cue text is wrapped into rows of at most `wrap_width` characters; a row
/// that breaks inside a word ends with a hyphen.
pub fn group_word_cues(
    tokens: &[Token],
    words_per_cue: usize,
    wrap_width: usize,
) -> Result<Vec<Cue>, AlignmentError> {
    if words_per_cue == 0 {
        return Err(AlignmentError::invalid_input(
            "words_per_cue must be greater than 0",
        ));
    }
    if wrap_width == 0 {
        return Err(AlignmentError::invalid_input(
            "wrap_width must be greater than 0",
        ));
    }

    let mut cues = Vec::with_capacity(tokens.len().div_ceil(words_per_cue));
    for chunk in tokens.chunks(words_per_cue) {
        let words: Vec<String> = chunk
            .iter()
            .map(|t| unescape_entities(&decode_token_text(&t.text)).trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            continue;
        }
        let (Some(first), Some(last)) = (chunk.first(), chunk.last()) else {
            continue;
        };
        let start_ticks = first.start_ticks;
        let end_ticks = last.end_ticks().max(start_ticks.saturating_add(1));
        cues.push(Cue {
            index: cues.len() as u32 + 1,
            start_ticks,
            end_ticks,
            text: wrap_rows(&words.join(" "), wrap_width).join("\n"),
        });
    }
    Ok(cues)
}

fn wrap_rows(text: &str, wrap_width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let chunks: Vec<&[char]> = chars.chunks(wrap_width).collect();
    let mut rows = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let mut row: String = chunk.iter().collect::<String>().trim().to_string();
        if row.is_empty() {
            continue;
        }
        let splits_word = chunks.get(i + 1).is_some_and(|next| {
            chunk.last().is_some_and(|c| !c.is_whitespace())
                && next.first().is_some_and(|c| !c.is_whitespace())
        });
        if splits_word {
            row.push('-');
        }
        rows.push(row);
    }
    rows
}

/// Word-boundary text arrives XML-escaped from some engines.
fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
