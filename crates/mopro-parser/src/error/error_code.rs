//! Error codes for model loading diagnostics.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document errors
//! - `E1xx` - Reference errors
//! - `E2xx` - Advisory warnings

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E0xx)
    // =========================================================================
    /// Malformed model document.
    ///
    /// The document is not valid TOML or does not have the expected shape
    /// (missing required fields, wrong value types).
    E001,

    // =========================================================================
    // Reference Errors (E1xx)
    // =========================================================================
    /// Duplicate element id.
    ///
    /// Two elements share the same numeric id.
    E100,

    /// Undefined element reference.
    ///
    /// A diagram placement, base class, package member or connector end
    /// names an element id that is not defined.
    E101,

    /// Self inheritance.
    ///
    /// An element lists itself as one of its own base classes.
    E102,

    // =========================================================================
    // Warnings (E2xx)
    // =========================================================================
    /// Duplicate diagram name.
    ///
    /// Two diagrams under the same root package share a name. Diagrams are
    /// matched to their package by name, so only one of them is scoped
    /// correctly.
    E200,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "malformed model document",
            ErrorCode::E100 => "duplicate element id",
            ErrorCode::E101 => "undefined element reference",
            ErrorCode::E102 => "element inherits from itself",
            ErrorCode::E200 => "duplicate diagram name",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
