use crate::alignment::buffer::TokenBuffer;
use crate::alignment::cues::next_speakable;
use crate::alignment::matching::{decode_token_text, fuzzy_eq};
use crate::types::{Token, TokenSpacing};

/// A candidate line together with the split points planned for it.
///
/// Offsets are character offsets into `text`, strictly increasing. The line is
/// only cut once every offset is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CandidateLine {
    text: String,
    split_offsets: Vec<usize>,
}

impl AsRef<str> for CandidateLine {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl CandidateLine {
    fn new(text: String) -> Self {
        Self {
            text,
            split_offsets: Vec::new(),
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }

    fn explode(self) -> Vec<String> {
        if self.split_offsets.is_empty() {
            return vec![self.text];
        }

        let mut byte_bounds = Vec::with_capacity(self.split_offsets.len() + 1);
        let mut offsets = self.split_offsets.iter().copied().peekable();
        for (char_idx, (byte_idx, _)) in self.text.char_indices().enumerate() {
            if offsets.peek() == Some(&char_idx) {
                byte_bounds.push(byte_idx);
                offsets.next();
            }
        }
        byte_bounds.push(self.text.len());

        let mut pieces = Vec::with_capacity(byte_bounds.len());
        let mut start = 0usize;
        for end in byte_bounds {
            let piece = self.text[start..end].trim();
            if !piece.is_empty() {
                pieces.push(piece.to_string());
            }
            start = end;
        }
        pieces
    }
}

/// Re-splits lines wider than `max_width`, using the widths of the spoken
/// fragments that matched each line as split candidates.
pub fn correct_widths(
    tokens: &[Token],
    lines: Vec<String>,
    max_width: usize,
    spacing: TokenSpacing,
) -> Vec<String> {
    correct_widths_by(tokens, lines, max_width, spacing, fuzzy_eq)
}

pub fn correct_widths_by<F>(
    tokens: &[Token],
    lines: Vec<String>,
    max_width: usize,
    spacing: TokenSpacing,
    matches: F,
) -> Vec<String>
where
    F: Fn(&str, &str) -> bool,
{
    let mut planned: Vec<CandidateLine> = lines.into_iter().map(CandidateLine::new).collect();
    let mut cursor = next_speakable(&planned, 0);
    let mut buffer = TokenBuffer::new(spacing);

    for token in tokens {
        if cursor >= planned.len() {
            break;
        }
        buffer.push(&decode_token_text(&token.text));
        if buffer.is_empty() || !matches(&planned[cursor].text, buffer.text()) {
            continue;
        }

        let line = &mut planned[cursor];
        if line.width() > max_width {
            line.split_offsets = plan_splits(&line.text, buffer.fragments(), max_width, &matches);
            if line.split_offsets.is_empty() {
                tracing::debug!(
                    line_index = cursor,
                    width = line.width(),
                    max_width,
                    "width correction: spoken prefix does not match line; keeping over-width line"
                );
            } else {
                tracing::debug!(
                    line_index = cursor,
                    splits = line.split_offsets.len(),
                    "width correction: planned line splits"
                );
            }
        }

        cursor = next_speakable(&planned, cursor + 1);
        buffer.clear();
    }

    planned
        .into_iter()
        .flat_map(CandidateLine::explode)
        .collect()
}

/// Greedily carves the line into chunks of whole spoken fragments no wider
/// than `max_width`. Planning stops at the first chunk whose text does not
/// match the line at the same offset.
fn plan_splits<F>(line: &str, fragments: &[String], max_width: usize, matches: &F) -> Vec<usize>
where
    F: Fn(&str, &str) -> bool,
{
    let chars: Vec<char> = line.chars().collect();
    let mut offsets = Vec::new();
    let mut offset = 0usize;
    let mut next_fragment = 0usize;

    while chars.len() - offset > max_width && next_fragment < fragments.len() {
        let prefix = widest_prefix(&fragments[next_fragment..], max_width);
        if prefix.fragment_count < 2 || offset + prefix.width >= chars.len() {
            break;
        }
        let line_slice: String = chars[offset..offset + prefix.width].iter().collect();
        if !matches(&line_slice, &prefix.text) {
            break;
        }
        offset += prefix.width;
        next_fragment += prefix.fragment_count;
        offsets.push(offset);
    }

    offsets
}

struct FragmentPrefix {
    fragment_count: usize,
    width: usize,
    text: String,
}

/// Longest run of leading fragments whose combined width fits `max_width`.
fn widest_prefix(fragments: &[String], max_width: usize) -> FragmentPrefix {
    let mut prefix = FragmentPrefix {
        fragment_count: 0,
        width: 0,
        text: String::new(),
    };
    for fragment in fragments {
        let width = fragment.chars().count();
        if prefix.width + width > max_width {
            break;
        }
        prefix.width += width;
        prefix.text.push_str(fragment);
        prefix.fragment_count += 1;
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_tokens(words: &[&str], step: u64) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i as u64 * step, step))
            .collect()
    }

    #[test]
    fn narrow_lines_are_untouched() {
        let tokens = uniform_tokens(&["Hello", "world"], 10);
        let lines = vec!["Hello".to_string(), "world".to_string()];
        let out = correct_widths(&tokens, lines.clone(), 20, TokenSpacing::SpaceDelimited);
        assert_eq!(out, lines);
    }

    #[test]
    fn wide_concatenated_line_is_split_into_bounded_pieces() {
        let words: Vec<String> = (0..40).map(|i| format!("w{:03}x", i)).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let tokens = uniform_tokens(&refs, 10);
        let line = words.concat();
        assert_eq!(line.chars().count(), 200);

        let out = correct_widths(&tokens, vec![line], 50, TokenSpacing::Concatenate);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|l| l.chars().count() <= 50));
        assert_eq!(out.concat(), words.concat());
    }

    #[test]
    fn wide_spaced_line_splits_between_words() {
        let tokens = uniform_tokens(&["alpha", "beta", "gamma", "delta", "epsilon"], 10);
        let line = "alpha beta gamma delta epsilon".to_string();
        let out = correct_widths(&tokens, vec![line], 12, TokenSpacing::SpaceDelimited);
        assert_eq!(out, vec!["alpha beta", "gamma delta", "epsilon"]);
    }

    #[test]
    fn prefix_mismatch_leaves_line_over_width() {
        // The spoken text matches only once punctuation is ignored, so the
        // fragment widths no longer line up with the script characters.
        let tokens = uniform_tokens(&["aa", "bb", "cc", "dd"], 10);
        let line = "a-a-b-b-c-c-d-d".to_string();
        let out = correct_widths(&tokens, vec![line.clone()], 4, TokenSpacing::Concatenate);
        assert_eq!(out, vec![line]);
    }

    #[test]
    fn single_fragment_prefix_is_not_split() {
        let tokens = uniform_tokens(&["abcdefgh", "ij"], 10);
        let line = "abcdefghij".to_string();
        let out = correct_widths(&tokens, vec![line.clone()], 8, TokenSpacing::Concatenate);
        assert_eq!(out, vec![line]);
    }

    #[test]
    fn blank_lines_are_skipped_but_kept() {
        let tokens = uniform_tokens(&["a", "b"], 10);
        let lines = vec!["a".to_string(), String::new(), "b".to_string()];
        let out = correct_widths(&tokens, lines.clone(), 10, TokenSpacing::SpaceDelimited);
        assert_eq!(out, lines);
    }

    #[test]
    fn explode_discards_empty_pieces() {
        let line = CandidateLine {
            text: "ab cd ".to_string(),
            split_offsets: vec![2, 3],
        };
        assert_eq!(line.explode(), vec!["ab", "cd"]);
    }

    #[test]
    fn explode_uses_character_offsets() {
        let line = CandidateLine {
            text: "你好世界".to_string(),
            split_offsets: vec![2],
        };
        assert_eq!(line.explode(), vec!["你好", "世界"]);
    }
}
