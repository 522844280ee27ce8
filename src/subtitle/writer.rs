use std::fs;
use std::path::Path;

use crate::error::AlignmentError;
use crate::subtitle::format::render;
use crate::types::{AlignmentOutput, Cue, SubtitleStyle};

/// Writes the subtitle artifact for an alignment.
///
/// A shortfall writes an empty file, so downstream composition can tell
/// "no subtitles" apart from a missing artifact without reading a partial one.
pub fn write_subtitle_file(
    path: &Path,
    output: &AlignmentOutput,
    style: SubtitleStyle,
) -> Result<(), AlignmentError> {
    if output.is_usable() {
        write_cues(path, &output.cues, style)
    } else {
        tracing::warn!(
            path = %path.display(),
            cue_count = output.cues.len(),
            "alignment shortfall; writing empty subtitle file"
        );
        write_text_file(path, "")
    }
}

pub fn write_cues(path: &Path, cues: &[Cue], style: SubtitleStyle) -> Result<(), AlignmentError> {
    write_text_file(path, &render(cues, style))?;
    tracing::info!(path = %path.display(), cue_count = cues.len(), "subtitle file written");
    Ok(())
}

/// Writes `text` to `path`, creating missing parent directories first.
pub fn write_text_file(path: &Path, text: &str) -> Result<(), AlignmentError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AlignmentError::io("create output directory", e))?;
    }
    fs::write(path, text).map_err(|e| AlignmentError::io("write output file", e))
}
