use std::sync::Mutex;

use crate::alignment::matching::fuzzy_eq;
use crate::alignment::report::Diagnostic;
use crate::alignment::segmentation::segment;
use crate::pipeline::traits::{DiagnosticSink, LineMatcher, ScriptSegmenter};

/// Splits at sentence punctuation; optionally also at a fixed width.
#[derive(Debug, Clone, Default)]
pub struct PunctuationSegmenter {
    pub max_width: Option<usize>,
}

impl ScriptSegmenter for PunctuationSegmenter {
    fn segment(&self, script: &str) -> Vec<String> {
        segment(script, self.max_width)
    }
}

pub struct FuzzyLineMatcher;

impl LineMatcher for FuzzyLineMatcher {
    fn matches(&self, line: &str, spoken: &str) -> bool {
        fuzzy_eq(line, spoken)
    }
}

pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::warn!(diagnostic = %diagnostic, "alignment diagnostic");
    }
}

/// Keeps every diagnostic for later inspection.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    seen: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.seen.lock() {
            Ok(mut seen) => std::mem::take(&mut *seen),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}
