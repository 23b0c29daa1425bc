//! Error and diagnostic system for the model loader.
//!
//! Problems found while loading a model export are reported as
//! [`Diagnostic`]s: a severity, an optional [`ErrorCode`], labeled spans
//! into the source document, and help text. Every error found in one pass is
//! collected and returned together inside a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use mopro_parser::error::{Diagnostic, ErrorCode};
//! # use mopro_parser::Span;
//!
//! let span = Span::new(100..120);
//! let original_span = Span::new(50..70);
//!
//! let diag = Diagnostic::error("element id `7` is defined multiple times")
//!     .with_code(ErrorCode::E100)
//!     .with_label(span, "duplicate id")
//!     .with_secondary_label(original_span, "first defined here")
//!     .with_help("give every element a unique id");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
