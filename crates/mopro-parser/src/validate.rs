//! Referential integrity checks on a decoded model document.

use indexmap::IndexMap;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parser_types::{ModelDocument, PackageDef},
    span::Span,
};

/// Check that every element id is unique and every reference resolves.
///
/// Returns the warnings found when the document is usable.
pub fn validate_document(document: &ModelDocument) -> Result<Vec<Diagnostic>, ParseError> {
    let mut collector = DiagnosticCollector::new();

    let defined = collect_element_ids(&document.packages, &mut collector);

    for root in &document.packages {
        check_package_references(root, &defined, &mut collector);
        check_diagram_names(root, &mut collector);
    }

    for connector in &document.connectors {
        for (end, id) in [("client", &connector.client), ("supplier", &connector.supplier)] {
            check_reference(
                &defined,
                *id.get_ref(),
                Span::new(id.span()),
                &format!("{end} of `{}` connector", connector.connector_type),
                &mut collector,
            );
        }
    }

    collector.finish()
}

/// Record the first definition span of each element id, reporting repeats.
fn collect_element_ids(
    packages: &[PackageDef],
    collector: &mut DiagnosticCollector,
) -> IndexMap<u32, Span> {
    let mut defined: IndexMap<u32, Span> = IndexMap::new();
    let mut stack: Vec<&PackageDef> = packages.iter().rev().collect();

    while let Some(package) = stack.pop() {
        for element in &package.elements {
            let id = *element.id.get_ref();
            let span = Span::new(element.id.span());
            if let Some(first) = defined.get(&id) {
                collector.emit(
                    Diagnostic::error(format!("element id `{id}` is defined multiple times"))
                        .with_code(ErrorCode::E100)
                        .with_label(span, "duplicate id")
                        .with_secondary_label(*first, "first defined here")
                        .with_help("give every element a unique id"),
                );
            } else {
                defined.insert(id, span);
            }
        }
        stack.extend(package.packages.iter().rev());
    }

    defined
}

fn check_package_references(
    root: &PackageDef,
    defined: &IndexMap<u32, Span>,
    collector: &mut DiagnosticCollector,
) {
    let mut stack = vec![root];
    while let Some(package) = stack.pop() {
        for element in &package.elements {
            let own_id = *element.id.get_ref();
            for base in &element.base_classes {
                let span = Span::new(base.span());
                if *base.get_ref() == own_id {
                    collector.emit(
                        Diagnostic::error(format!(
                            "element `{}` lists itself as a base class",
                            element.name
                        ))
                        .with_code(ErrorCode::E102)
                        .with_label(span, "self reference")
                        .with_help("remove the id from `base_classes`"),
                    );
                    continue;
                }
                check_reference(
                    defined,
                    *base.get_ref(),
                    span,
                    &format!("base class of element `{}`", element.name),
                    collector,
                );
            }
        }

        for diagram in &package.diagrams {
            for object in &diagram.objects {
                check_reference(
                    defined,
                    *object.get_ref(),
                    Span::new(object.span()),
                    &format!("object on diagram `{}`", diagram.name.get_ref()),
                    collector,
                );
            }
        }

        stack.extend(package.packages.iter().rev());
    }
}

fn check_reference(
    defined: &IndexMap<u32, Span>,
    id: u32,
    span: Span,
    what: &str,
    collector: &mut DiagnosticCollector,
) {
    if !defined.contains_key(&id) {
        collector.emit(
            Diagnostic::error(format!("{what} refers to undefined element `{id}`"))
                .with_code(ErrorCode::E101)
                .with_label(span, "unknown element id"),
        );
    }
}

/// Diagrams are matched to their package scope by name, so names must be
/// unique inside one root package.
fn check_diagram_names(root: &PackageDef, collector: &mut DiagnosticCollector) {
    let mut seen: IndexMap<&str, Span> = IndexMap::new();
    let mut stack = vec![root];
    while let Some(package) = stack.pop() {
        for diagram in &package.diagrams {
            let name = diagram.name.get_ref().as_str();
            let span = Span::new(diagram.name.span());
            if let Some(first) = seen.get(name) {
                collector.emit(
                    Diagnostic::warning(format!(
                        "diagram `{name}` is defined more than once under package `{}`",
                        root.name
                    ))
                    .with_code(ErrorCode::E200)
                    .with_label(span, "duplicate name")
                    .with_secondary_label(*first, "first defined here")
                    .with_help("rename one of the diagrams"),
                );
            } else {
                seen.insert(name, span);
            }
        }
        stack.extend(package.packages.iter().rev());
    }
}
