/// Characters that end a candidate subtitle line.
pub const LINE_DELIMITERS: [char; 14] = [
    '?', ',', '.', ';', ':', '!', '…', '？', '，', '。', '、', '；', '：', '！',
];

/// Closing quotes and brackets that belong to the line before a delimiter,
/// as in `“Really?” she asked`.
const CLOSING_MARKS: [char; 11] = [')', ']', '”', '’', '）', '」', '』', '》', '】', '〕', '〗'];

pub fn is_line_delimiter(c: char) -> bool {
    LINE_DELIMITERS.contains(&c)
}

/// Collapses every whitespace run (ideographic space included) into one ASCII
/// space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits script text into candidate lines at punctuation delimiters.
///
/// Delimiters are dropped. When `max_width` is set, a line is also closed once
/// it holds `max_width` characters; the overflowing character starts the next
/// line. A width of zero means no limit. A closing quote or bracket right after
/// a delimiter is moved back onto the line it closes. Empty lines between
/// adjacent delimiters are kept, an empty tail after the final delimiter is
/// not.
pub fn segment(text: &str, max_width: Option<usize>) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    let max_width = max_width.filter(|&w| w > 0).unwrap_or(usize::MAX);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    let mut after_delimiter = false;

    for c in normalized.chars() {
        if is_line_delimiter(c) {
            lines.push(close_line(&current));
            current.clear();
            current_width = 0;
            after_delimiter = true;
            continue;
        }
        if after_delimiter && current.is_empty() && CLOSING_MARKS.contains(&c) {
            if let Some(previous) = lines
                .last_mut()
                .filter(|line: &&mut String| line.chars().count() < max_width)
            {
                previous.push(c);
                continue;
            }
        }
        after_delimiter = false;
        if current_width >= max_width {
            lines.push(close_line(&current));
            current.clear();
            current_width = 0;
        }
        current.push(c);
        current_width += 1;
    }
    if !current.trim().is_empty() {
        lines.push(close_line(&current));
    }

    lines
}

fn close_line(buffer: &str) -> String {
    normalize_whitespace(buffer)
}
