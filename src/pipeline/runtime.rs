use std::path::Path;

use crate::alignment::cues::{assemble_cues_by, speakable_line_count};
use crate::alignment::report::{count_over_width, evaluate_assembly, AlignmentReport};
use crate::alignment::width::correct_widths_by;
use crate::config::AlignerConfig;
use crate::error::AlignmentError;
use crate::pipeline::traits::{DiagnosticSink, LineMatcher, ScriptSegmenter};
use crate::subtitle::format::render;
use crate::subtitle::writer::write_subtitle_file;
use crate::types::{speech_duration_ticks, AlignmentInput, AlignmentOutput};

pub struct SubtitleAligner {
    config: AlignerConfig,
    segmenter: Box<dyn ScriptSegmenter>,
    line_matcher: Box<dyn LineMatcher>,
    diagnostics: Box<dyn DiagnosticSink>,
}

pub(crate) struct SubtitleAlignerParts {
    pub config: AlignerConfig,
    pub segmenter: Box<dyn ScriptSegmenter>,
    pub line_matcher: Box<dyn LineMatcher>,
    pub diagnostics: Box<dyn DiagnosticSink>,
}

impl SubtitleAligner {
    pub(crate) fn from_parts(parts: SubtitleAlignerParts) -> Self {
        Self {
            config: parts.config,
            segmenter: parts.segmenter,
            line_matcher: parts.line_matcher,
            diagnostics: parts.diagnostics,
        }
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Segments the script, corrects line widths against the token stream,
    /// then assembles cues in a second pass over the same tokens.
    pub fn align(&self, input: &AlignmentInput) -> AlignmentOutput {
        let spacing = self.config.token_spacing();
        let max_width = self.config.max_subtitle_width;
        let matches = |line: &str, spoken: &str| self.line_matcher.matches(line, spoken);

        let script_lines = self.segmenter.segment(&input.script);
        let script_line_count = script_lines.len();
        tracing::debug!(
            script_lines = script_line_count,
            tokens = input.tokens.len(),
            "alignment: segmented script"
        );

        let lines = correct_widths_by(&input.tokens, script_lines, max_width, spacing, matches);
        let assembly = assemble_cues_by(&input.tokens, &lines, spacing, matches);

        let speakable = speakable_line_count(&lines);
        let diagnostics = evaluate_assembly(&assembly, speakable, self.config.min_cue_count);
        for diagnostic in &diagnostics {
            self.diagnostics.report(diagnostic);
        }

        let report = AlignmentReport {
            script_line_count,
            corrected_line_count: lines.len(),
            speakable_line_count: speakable,
            token_count: input.tokens.len(),
            cue_count: assembly.cues.len(),
            over_width_cue_count: count_over_width(&assembly.cues, max_width),
            speech_duration_ticks: speech_duration_ticks(&input.tokens),
            diagnostics,
        };
        tracing::info!(
            cues = report.cue_count,
            lines = report.speakable_line_count,
            over_width = report.over_width_cue_count,
            "alignment: finished"
        );

        AlignmentOutput {
            lines,
            cues: assembly.cues,
            report,
        }
    }

    /// Subtitle file body for `output`; empty on shortfall.
    pub fn render(&self, output: &AlignmentOutput) -> String {
        if output.is_usable() {
            render(&output.cues, self.config.output_style)
        } else {
            String::new()
        }
    }

    pub fn write(&self, output: &AlignmentOutput, path: &Path) -> Result<(), AlignmentError> {
        write_subtitle_file(path, output, self.config.output_style)
    }
}
