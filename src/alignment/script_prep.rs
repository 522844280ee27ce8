use crate::alignment::segmentation::normalize_whitespace;

const CJK_SENTENCE_END: [char; 5] = ['，', '。', '？', '！', '；'];
const BRACKETS: [char; 6] = ['[', ']', '(', ')', '{', '}'];

/// Replaces line breaks and brackets with spaces and collapses whitespace.
pub fn normalize_script(text: &str) -> String {
    let spaced: String = text
        .chars()
        .map(|c| if BRACKETS.contains(&c) { ' ' } else { c })
        .collect();
    normalize_whitespace(&spaced)
}

/// Adds `。` where a script without inter-word spacing relies on layout to
/// separate sentences: before blank lines and between whitespace-separated
/// phrases.
pub fn punctuate_paragraphs(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let mut line = line.trim_end().to_string();
        let before_blank = lines.get(i + 1).is_some_and(|next| next.trim().is_empty());
        if before_blank && !line.is_empty() && !ends_with_sentence_mark(&line) {
            line.push('。');
        }

        let mut parts: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        for j in 0..parts.len().saturating_sub(1) {
            let next_starts_marked = parts[j + 1]
                .chars()
                .next()
                .is_some_and(|c| CJK_SENTENCE_END.contains(&c));
            if !ends_with_sentence_mark(&parts[j]) && !next_starts_marked {
                parts[j].push('。');
            }
        }
        out.push(parts.join(" "));
    }

    out.join("\n")
}

fn ends_with_sentence_mark(s: &str) -> bool {
    s.chars()
        .next_back()
        .is_some_and(|c| CJK_SENTENCE_END.contains(&c))
}
