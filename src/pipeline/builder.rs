use crate::config::AlignerConfig;
use crate::error::AlignmentError;
use crate::pipeline::defaults::{FuzzyLineMatcher, PunctuationSegmenter, TracingDiagnostics};
use crate::pipeline::runtime::{SubtitleAligner, SubtitleAlignerParts};
use crate::pipeline::traits::{DiagnosticSink, LineMatcher, ScriptSegmenter};

pub struct SubtitleAlignerBuilder {
    config: AlignerConfig,
    segmenter: Option<Box<dyn ScriptSegmenter>>,
    line_matcher: Option<Box<dyn LineMatcher>>,
    diagnostics: Option<Box<dyn DiagnosticSink>>,
}

impl SubtitleAlignerBuilder {
    pub fn new(config: AlignerConfig) -> Self {
        Self {
            config,
            segmenter: None,
            line_matcher: None,
            diagnostics: None,
        }
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn ScriptSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn with_line_matcher(mut self, line_matcher: Box<dyn LineMatcher>) -> Self {
        self.line_matcher = Some(line_matcher);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Box<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn build(self) -> Result<SubtitleAligner, AlignmentError> {
        self.config.validate()?;

        Ok(SubtitleAligner::from_parts(SubtitleAlignerParts {
            config: self.config,
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Box::new(PunctuationSegmenter::default())),
            line_matcher: self
                .line_matcher
                .unwrap_or_else(|| Box::new(FuzzyLineMatcher)),
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| Box::new(TracingDiagnostics)),
        }))
    }
}
