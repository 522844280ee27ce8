use std::borrow::Cow;

/// Fullwidth and CJK punctuation, quotes and brackets ignored when comparing
/// script lines with spoken text. ASCII punctuation is handled separately.
const CJK_PUNCTUATION: &[char] = &[
    '，', '。', '！', '？', '、', '；', '：', '“', '”', '‘', '’', '（', '）', '《', '》', '【',
    '】', '〈', '〉', '「', '」', '『', '』', '〔', '〕', '〖', '〗', '﹝', '﹞', '［', '］', '｛',
    '｝', '＜', '＞', '﹤', '﹥', '…',
];

/// Sentence punctuation trimmed from the ends of cue text.
const BOUNDARY_PUNCTUATION: &[char] = &['，', '。', '！', '？', ',', '.', '!', '?', '…'];

pub fn is_ignorable_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || CJK_PUNCTUATION.contains(&c)
}

/// Removes punctuation, quotes and brackets; whitespace is kept.
pub fn depunctuate(s: &str) -> String {
    s.chars().filter(|&c| !is_ignorable_punctuation(c)).collect()
}

/// Equality between a script line and accumulated spoken text that tolerates
/// punctuation the speech engine dropped or added.
pub fn fuzzy_eq(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    a.chars()
        .filter(|&c| !is_ignorable_punctuation(c))
        .eq(b.chars().filter(|&c| !is_ignorable_punctuation(c)))
}

/// Lines with nothing speakable in them never match a non-empty buffer.
pub fn is_blank_line(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_whitespace() || is_ignorable_punctuation(c))
}

/// Percent-decodes a token fragment, keeping the raw text when the escape
/// sequence does not decode to valid UTF-8.
pub fn decode_token_text(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::debug!(raw, error = %err, "token text is not percent-decodable; using raw text");
            Cow::Borrowed(raw)
        }
    }
}

pub fn strip_boundary_punctuation(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || BOUNDARY_PUNCTUATION.contains(&c))
}
