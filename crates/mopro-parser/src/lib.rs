//! # Mopro Parser
//!
//! Loader for design-model exports. A model export is a TOML document
//! describing the package tree, the elements and diagrams inside it, and the
//! connectors between elements. Loading produces an
//! [`InMemoryRepository`](mopro_core::repository::InMemoryRepository) the
//! profile compiler can query.
//!
//! ## Usage
//!
//! ```
//! # use mopro_parser::{parse, error::ParseError};
//! use mopro_core::repository::ModelRepository;
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         [[packages]]
//!         name = "Shop"
//!         stereotype = "profile"
//!
//!         [[packages.elements]]
//!         id = 1
//!         name = "Gateway"
//!     "#;
//!
//!     let repository = parse(source)?;
//!     assert_eq!(repository.packages_with_stereotype("profile").len(), 1);
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod parser;
mod parser_types;
mod span;
mod validate;

pub use span::Span;

use log::{debug, warn};

use mopro_core::repository::{InMemoryRepository, ModelRepository};

use error::ParseError;

/// Load a model export into an in-memory repository.
///
/// The pipeline:
///
/// 1. **Decode** - Read the TOML document into its raw shape
/// 2. **Validate** - Check id uniqueness and that every reference resolves
/// 3. **Elaborate** - Build the repository
///
/// Warnings found during validation are logged; errors are all returned
/// together.
pub fn parse(source: &str) -> Result<InMemoryRepository, ParseError> {
    let document = parser::parse_document(source)?;

    let warnings = validate::validate_document(&document)?;
    for warning in &warnings {
        warn!(code:? = warning.code(); "{}", warning.message());
    }

    let repository = elaborate::build_repository(document);
    debug!(
        packages = repository.root_packages().len(),
        elements = repository.elements().count(),
        connectors = repository.connectors().len();
        "Model loaded"
    );
    Ok(repository)
}
