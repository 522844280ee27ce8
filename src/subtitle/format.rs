use crate::types::{Cue, SubtitleStyle, TICKS_PER_MILLISECOND};

pub const VTT_HEADER: &str = "WEBVTT";

/// `HH:MM:SS,mmm` for SRT, `HH:MM:SS.mmm` for WebVTT. Sub-millisecond ticks
/// are truncated.
pub fn format_timestamp(ticks: u64, style: SubtitleStyle) -> String {
    let total_ms = ticks / TICKS_PER_MILLISECOND;
    let millis = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    format!(
        "{hours:02}:{mins:02}:{secs:02}{}{millis:03}",
        style.millis_separator()
    )
}

/// One cue block, newline-terminated. SRT blocks carry the cue index.
pub fn format_cue(cue: &Cue, style: SubtitleStyle) -> String {
    let timing = format!(
        "{} --> {}",
        format_timestamp(cue.start_ticks, style),
        format_timestamp(cue.end_ticks, style)
    );
    match style {
        SubtitleStyle::Srt => format!("{}\n{timing}\n{}\n", cue.index, cue.text),
        SubtitleStyle::Vtt => format!("{timing}\n{}\n", cue.text),
    }
}

/// Full subtitle file body: blocks separated by a blank line.
pub fn render(cues: &[Cue], style: SubtitleStyle) -> String {
    let body = cues
        .iter()
        .map(|cue| format_cue(cue, style))
        .collect::<Vec<_>>()
        .join("\n");
    match style {
        SubtitleStyle::Srt => body,
        SubtitleStyle::Vtt if body.is_empty() => format!("{VTT_HEADER}\n"),
        SubtitleStyle::Vtt => format!("{VTT_HEADER}\n\n{body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TICKS_PER_SECOND;

    fn cue(index: u32, start: u64, end: u64, text: &str) -> Cue {
        Cue {
            index,
            start_ticks: start,
            end_ticks: end,
            text: text.to_string(),
        }
    }

    #[test]
    fn timestamp_rollover() {
        let ticks = (3600 + 2 * 60 + 3) * TICKS_PER_SECOND + 45 * TICKS_PER_MILLISECOND;
        assert_eq!(format_timestamp(ticks, SubtitleStyle::Srt), "01:02:03,045");
        assert_eq!(format_timestamp(ticks, SubtitleStyle::Vtt), "01:02:03.045");
        assert_eq!(format_timestamp(0, SubtitleStyle::Srt), "00:00:00,000");
    }

    #[test]
    fn timestamp_truncates_sub_millisecond_ticks() {
        assert_eq!(format_timestamp(9_999, SubtitleStyle::Vtt), "00:00:00.000");
        assert_eq!(format_timestamp(19_999, SubtitleStyle::Vtt), "00:00:00.001");
    }

    #[test]
    fn hours_are_not_capped_at_two_digits() {
        let ticks = 100 * 3600 * TICKS_PER_SECOND;
        assert_eq!(format_timestamp(ticks, SubtitleStyle::Srt), "100:00:00,000");
    }

    #[test]
    fn srt_document() {
        let cues = vec![
            cue(1, 0, 5 * TICKS_PER_SECOND, "Hello"),
            cue(2, 5 * TICKS_PER_SECOND, 11 * TICKS_PER_SECOND, "world"),
        ];
        assert_eq!(
            render(&cues, SubtitleStyle::Srt),
            "1\n00:00:00,000 --> 00:00:05,000\nHello\n\n\
             2\n00:00:05,000 --> 00:00:11,000\nworld\n"
        );
    }

    #[test]
    fn vtt_document_has_header() {
        let cues = vec![cue(1, 0, TICKS_PER_SECOND, "Hi")];
        assert_eq!(
            render(&cues, SubtitleStyle::Vtt),
            "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nHi\n"
        );
        assert_eq!(render(&[], SubtitleStyle::Vtt), "WEBVTT\n");
        assert_eq!(render(&[], SubtitleStyle::Srt), "");
    }
}
