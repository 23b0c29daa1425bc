//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message pinned to a span of the model document.
///
/// The primary label marks the offending value. Other labels point at
/// related definitions, such as the first use of a repeated id.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    pub(crate) fn new(span: Span, message: impl Into<String>, primary: bool) -> Self {
        Self {
            span,
            message: message.into(),
            primary,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this label marks the offending value itself.
    pub fn is_primary(&self) -> bool {
        self.primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_keeps_span_and_role() {
        let duplicate = Label::new(Span::new(10..20), "duplicate id", true);
        let first = Label::new(Span::new(2..4), "first defined here", false);

        assert_eq!(duplicate.span().start(), 10);
        assert_eq!(duplicate.span().end(), 20);
        assert_eq!(duplicate.message(), "duplicate id");
        assert!(duplicate.is_primary());
        assert!(!first.is_primary());
    }
}
