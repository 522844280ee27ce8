use std::path::Path;

use serde::Serialize;
use script_cues::subtitle::writer::write_text_file;
use script_cues::AlignmentReport;

#[derive(Debug, Serialize)]
pub struct RunMeta {
    pub generated_at: String,
    pub tokens_path: String,
    pub script_path: Option<String>,
    pub subtitle_path: String,
    pub style: String,
    pub max_subtitle_width: usize,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub schema_version: u32,
    pub meta: RunMeta,
    /// Absent when cues were grouped from tokens without a script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<AlignmentReport>,
    pub cue_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_filter: Option<String>,
}

pub fn write_report(path: &Path, report: &RunReport) -> Result<(), String> {
    let mut json = serde_json::to_string_pretty(report)
        .map_err(|err| format!("Failed to serialize report JSON '{}': {err}", path.display()))?;
    json.push('\n');
    write_text_file(path, &json)
        .map_err(|err| format!("Failed to write report '{}': {err}", path.display()))
}
