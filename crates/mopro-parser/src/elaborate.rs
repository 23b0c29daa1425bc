//! Conversion of a validated document into an in-memory repository.

use mopro_core::{
    identifier::ElementId,
    model::{Attribute, Connector, ConnectorEnd, ConnectorKind, Diagram, Element, Package},
    repository::InMemoryRepository,
};

use crate::parser_types::{ConnectorEndDef, ElementDef, ModelDocument, PackageDef};

/// Build the repository. The document must already be validated.
pub fn build_repository(document: ModelDocument) -> InMemoryRepository {
    let mut repository = InMemoryRepository::new();

    for package in document.packages {
        let package = build_package(package, &mut repository);
        repository.add_package(package);
    }

    for connector in document.connectors {
        let built = Connector::new(
            ConnectorKind::from_type_name(&connector.connector_type),
            ElementId::new(connector.client.into_inner()),
            ElementId::new(connector.supplier.into_inner()),
        )
        .with_client_end(build_end(connector.client_end))
        .with_supplier_end(build_end(connector.supplier_end));
        repository.add_connector(built);
    }

    repository
}

fn build_package(definition: PackageDef, repository: &mut InMemoryRepository) -> Package {
    let mut package = Package::new(definition.name);
    if let Some(stereotype) = definition.stereotype {
        package = package.with_stereotype(stereotype);
    }

    for element in definition.elements {
        let element = build_element(element);
        package = package.with_element(element.id());
        repository.add_element(element);
    }

    for diagram in definition.diagrams {
        let built = diagram.objects.into_iter().fold(
            Diagram::new(diagram.name.into_inner(), diagram.diagram_type),
            |diagram, object| diagram.with_object(ElementId::new(object.into_inner())),
        );
        package = package.with_diagram(built);
    }

    for child in definition.packages {
        let child = build_package(child, repository);
        package = package.with_package(child);
    }

    package
}

fn build_element(definition: ElementDef) -> Element {
    let mut element = Element::new(ElementId::new(definition.id.into_inner()), definition.name)
        .with_notes(definition.notes)
        .with_run_state(definition.run_state);
    if let Some(element_type) = definition.element_type {
        element = element.with_type(element_type);
    }
    for base in definition.base_classes {
        element = element.with_base_class(ElementId::new(base.into_inner()));
    }
    for attribute in definition.attributes {
        element = element.with_attribute(Attribute::new(
            attribute.name,
            attribute.attribute_type,
            attribute.default,
        ));
    }
    element
}

fn build_end(definition: Option<ConnectorEndDef>) -> ConnectorEnd {
    let definition = definition.unwrap_or_default();
    ConnectorEnd::new(definition.role, definition.cardinality)
}
