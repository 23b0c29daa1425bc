//! TOML decoding of model exports.

use crate::{
    error::{Diagnostic, ErrorCode},
    parser_types::ModelDocument,
    span::Span,
};

/// Decode `source` into the raw document shape.
///
/// Syntax errors and shape mismatches are both reported as
/// [`ErrorCode::E001`], labeled at the position TOML reports.
pub fn parse_document(source: &str) -> Result<ModelDocument, Diagnostic> {
    toml::from_str(source).map_err(|err| {
        let diag = Diagnostic::error(format!("invalid model document: {}", err.message()))
            .with_code(ErrorCode::E001)
            .with_help("model documents list `[[packages]]` and `[[connectors]]` tables");
        match err.span() {
            Some(range) => diag.with_label(Span::new(range), "here"),
            None => diag,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_empty() {
        let document = parse_document("").unwrap();
        assert!(document.packages.is_empty());
        assert!(document.connectors.is_empty());
    }

    #[test]
    fn test_parse_document_nested() {
        let source = r#"
            [[packages]]
            name = "Root"
            stereotype = "profile"

            [[packages.packages]]
            name = "Abstract Syntax Model"

            [[packages.packages.elements]]
            id = 1
            name = "Gateway"
            base_classes = [2]

            [[packages.packages.elements.attributes]]
            name = "capacity"
            type = "int"
            default = "10"

            [[packages.diagrams]]
            name = "Overview"
            type = "Logical"
            objects = [1]

            [[connectors]]
            type = "Association"
            client = 1
            supplier = 2
            client_end = { role = "source", cardinality = "1" }
        "#;
        let document = parse_document(source).unwrap();
        let root = &document.packages[0];
        assert_eq!(root.stereotype.as_deref(), Some("profile"));
        let element = &root.packages[0].elements[0];
        assert_eq!(*element.id.get_ref(), 1);
        assert_eq!(element.attributes[0].default, "10");
        assert_eq!(*root.diagrams[0].objects[0].get_ref(), 1);
        let connector = &document.connectors[0];
        assert_eq!(connector.client_end.as_ref().unwrap().role, "source");
        assert!(connector.supplier_end.is_none());
    }

    #[test]
    fn test_parse_document_syntax_error() {
        let diag = parse_document("[[packages]\nname = 1").unwrap_err();
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert!(diag.message().starts_with("invalid model document"));
    }

    #[test]
    fn test_parse_document_unknown_field() {
        let diag = parse_document("[[packages]]\nname = \"A\"\ncolour = \"red\"\n").unwrap_err();
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert!(diag.message().contains("colour"));
    }
}
