use crate::types::{Cue, TICKS_PER_MILLISECOND};

/// Parses `HH:MM:SS,mmm` or `HH:MM:SS.mmm` into ticks. Values that do not fit
/// in a `u64` tick count are rejected.
pub fn parse_timestamp(s: &str) -> Option<u64> {
    let s = s.trim();
    let (clock, millis) = s.rsplit_once(|c: char| c == ',' || c == '.')?;
    let mut fields = clock.split(':');
    let hours: u64 = fields.next()?.parse().ok()?;
    let mins: u64 = fields.next()?.parse().ok()?;
    let secs: u64 = fields.next()?.parse().ok()?;
    if fields.next().is_some() || mins >= 60 || secs >= 60 || millis.len() != 3 {
        return None;
    }
    let millis: u64 = millis.parse().ok()?;
    hours
        .checked_mul(60)?
        .checked_add(mins)?
        .checked_mul(60)?
        .checked_add(secs)?
        .checked_mul(1000)?
        .checked_add(millis)?
        .checked_mul(TICKS_PER_MILLISECOND)
}

/// Reads SRT or WebVTT text back into cues.
///
/// Cue indices are renumbered densely from 1; multi-row cue text keeps its
/// rows separated by `\n`. Blocks with malformed timing lines are skipped.
pub fn parse_subtitles(text: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut timing: Option<(u64, u64)> = None;
    let mut rows: Vec<&str> = Vec::new();

    let mut flush = |timing: &mut Option<(u64, u64)>, rows: &mut Vec<&str>| {
        if let Some((start_ticks, end_ticks)) = timing.take() {
            cues.push(Cue {
                index: cues.len() as u32 + 1,
                start_ticks,
                end_ticks,
                text: rows.join("\n"),
            });
        }
        rows.clear();
    };

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(parsed) = parse_timing_line(line) {
            flush(&mut timing, &mut rows);
            timing = Some(parsed);
        } else if line.trim().is_empty() {
            flush(&mut timing, &mut rows);
        } else if timing.is_some() {
            rows.push(line.trim());
        }
    }
    flush(&mut timing, &mut rows);

    cues
}

fn parse_timing_line(line: &str) -> Option<(u64, u64)> {
    let (start, rest) = line.split_once("-->")?;
    // WebVTT allows cue settings after the end timestamp.
    let end = rest.split_whitespace().next()?;
    Some((parse_timestamp(start)?, parse_timestamp(end)?))
}
