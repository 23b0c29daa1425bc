//! Rendering of [`MoproError`] through miette.
//!
//! A rejected model export becomes one report per loader diagnostic, each
//! with its labels pointing into the model source. Every other failure is a
//! single report carrying a `mopro::<kind>` code and, where the user can act
//! on it, a hint.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use mopro::MoproError;
use mopro_parser::{
    Span,
    error::{Diagnostic, Label, Severity},
};

/// One renderable failure.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A loader diagnostic with the model source it points into.
    Model {
        diag: &'a Diagnostic,
        src: &'a str,
    },
    /// Any failure without source locations.
    Error(&'a MoproError),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Model { diag, .. } => f.write_str(diag.message()),
            Reportable::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Model { .. } => None,
            Reportable::Error(err) => std::error::Error::source(*err),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Model { diag, .. } => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display>),
            Reportable::Error(err) => {
                error_code(err).map(|code| Box::new(code) as Box<dyn fmt::Display>)
            }
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Model { diag, .. } => Some(match diag.severity() {
                Severity::Error => MietteSeverity::Error,
                Severity::Warning => MietteSeverity::Warning,
            }),
            Reportable::Error(_) => Some(MietteSeverity::Error),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Model { diag, .. } => diag
                .help()
                .map(|help| Box::new(help) as Box<dyn fmt::Display>),
            Reportable::Error(err) => {
                error_help(err).map(|help| Box::new(help) as Box<dyn fmt::Display>)
            }
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Model { src, .. } => Some(src as &dyn miette::SourceCode),
            Reportable::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Reportable::Model { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }
        Some(Box::new(diag.labels().iter().map(labeled_span)))
    }
}

fn labeled_span(label: &Label) -> LabeledSpan {
    let message = Some(label.message().to_string());
    let span = source_span(label.span());
    if label.is_primary() {
        LabeledSpan::new_primary_with_span(message, span)
    } else {
        LabeledSpan::new_with_span(message, span)
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

fn error_code(err: &MoproError) -> Option<&'static str> {
    let code = match err {
        MoproError::Parse { .. } => return None,
        MoproError::Io(_) => "mopro::io",
        MoproError::NoProfilePackage
        | MoproError::AmbiguousProfilePackage { .. }
        | MoproError::ProfilePackageNotFound { .. } => "mopro::selection",
        MoproError::MissingAbstractSyntax { .. } => "mopro::model",
        MoproError::Template(_) => "mopro::template",
        MoproError::Packaging(_) => "mopro::packaging",
        MoproError::PermissionDenied { .. } | MoproError::Persist { .. } => "mopro::persist",
        MoproError::Config(_) => "mopro::config",
    };
    Some(code)
}

fn error_help(err: &MoproError) -> Option<String> {
    let help = match err {
        MoproError::NoProfilePackage => {
            "Mark the package that defines the language with the `profile` stereotype".to_string()
        }
        MoproError::AmbiguousProfilePackage { candidates } => format!(
            "Pick one of {} with --profile-package, or drop --non-interactive to choose from a list",
            candidates.join(", ")
        ),
        MoproError::ProfilePackageNotFound { .. } => {
            "The name must match a package stereotyped `profile` exactly".to_string()
        }
        MoproError::MissingAbstractSyntax { .. } => {
            "Add a sub-package named `Abstract Syntax Model` holding the language's types"
                .to_string()
        }
        MoproError::PermissionDenied { .. } => {
            "Run again with elevated rights, or choose another location with --output".to_string()
        }
        _ => return None,
    };
    Some(help)
}

/// Split `err` into the reports to render, one per loader diagnostic for a
/// rejected model and a single one otherwise.
pub fn to_reportables(err: &MoproError) -> Vec<Reportable<'_>> {
    match err {
        MoproError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Model { diag, src })
            .collect(),
        _ => vec![Reportable::Error(err)],
    }
}
