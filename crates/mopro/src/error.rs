//! Error types for profile compilation.
//!
//! This module provides the main error type [`MoproError`] which covers model
//! loading, profile selection, document assembly and persistence.

use std::{io, path::PathBuf};

use thiserror::Error;

use mopro_parser::error::ParseError;

/// The main error type for Mopro operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the model loader's diagnostics together with
/// the source they point into, for rich error reporting.
#[derive(Debug, Error)]
pub enum MoproError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("No package with stereotype `profile` found in the model")]
    NoProfilePackage,

    #[error("Multiple profile packages found: {}", candidates.join(", "))]
    AmbiguousProfilePackage { candidates: Vec<String> },

    #[error("Profile package `{name}` not found")]
    ProfilePackageNotFound { name: String },

    #[error("Profile package `{profile}` must contain an `Abstract Syntax Model` package")]
    MissingAbstractSyntax { profile: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Packaging error: {0}")]
    Packaging(String),

    #[error("Insufficient privileges to write `{}`", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Failed to save profile to `{}`: {source}", path.display())]
    Persist { path: PathBuf, source: io::Error },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MoproError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Classify a failed write of `path`.
    pub fn from_persist(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path }
        } else {
            Self::Persist { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_persist_permission_denied() {
        let err = MoproError::from_persist(
            "/etc/profile.xml",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, MoproError::PermissionDenied { .. }));
        assert_eq!(
            err.to_string(),
            "Insufficient privileges to write `/etc/profile.xml`"
        );
    }

    #[test]
    fn test_from_persist_generic() {
        let err = MoproError::from_persist("out.xml", io::Error::other("disk full"));
        assert!(matches!(err, MoproError::Persist { .. }));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_ambiguous_lists_candidates() {
        let err = MoproError::AmbiguousProfilePackage {
            candidates: vec!["Shop".to_string(), "Bank".to_string()],
        };
        assert_eq!(err.to_string(), "Multiple profile packages found: Shop, Bank");
    }
}
