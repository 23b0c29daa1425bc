//! Collector for accumulating diagnostics while validating a model.

use crate::error::{Diagnostic, ParseError};

/// Accumulates every problem found in one validation pass instead of
/// stopping at the first.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - Otherwise returns the warnings so the caller can report them.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.diagnostics.iter().any(Diagnostic::is_error) {
            Err(self.diagnostics.into())
        } else {
            Ok(self.diagnostics)
        }
    }
}
