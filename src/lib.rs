pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod subtitle;
pub mod types;

pub use alignment::cues::{assemble_cues, CueAssembly};
pub use alignment::matching::fuzzy_eq;
pub use alignment::report::{AlignmentReport, Diagnostic};
pub use alignment::segmentation::segment;
pub use alignment::width::correct_widths;
pub use alignment::word_cues::group_word_cues;
pub use config::AlignerConfig;
pub use error::AlignmentError;
pub use pipeline::builder::SubtitleAlignerBuilder;
pub use pipeline::runtime::SubtitleAligner;
pub use pipeline::traits::{DiagnosticSink, LineMatcher, ScriptSegmenter};
pub use subtitle::format::{format_cue, format_timestamp, render};
pub use subtitle::parse::{parse_subtitles, parse_timestamp};
pub use subtitle::writer::write_subtitle_file;
pub use types::{AlignmentInput, AlignmentOutput, Cue, SubtitleStyle, Token, TokenSpacing};

/// Aligns `script` against `tokens` with the default segmenter, matcher and
/// tracing diagnostics.
pub fn align_script(
    script: &str,
    tokens: &[Token],
    config: &AlignerConfig,
) -> Result<AlignmentOutput, AlignmentError> {
    let aligner = SubtitleAlignerBuilder::new(config.clone()).build()?;
    Ok(aligner.align(&AlignmentInput {
        script: script.to_string(),
        tokens: tokens.to_vec(),
    }))
}
