use crate::alignment::report::Diagnostic;

pub trait ScriptSegmenter: Send + Sync {
    fn segment(&self, script: &str) -> Vec<String>;
}

pub trait LineMatcher: Send + Sync {
    /// Whether the accumulated spoken text completes the script line.
    fn matches(&self, line: &str, spoken: &str) -> bool;
}

/// Receives alignment warnings as they are produced.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}
