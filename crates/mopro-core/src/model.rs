//! Design-model entities.
//!
//! These types mirror what a modeling-tool repository exposes: a tree of
//! [`Package`]s holding [`Diagram`]s and element references, the
//! [`Element`]s themselves with their [`Attribute`]s and base classes, and the
//! [`Connector`]s linking elements.
//!
//! Elements are owned by the repository and referenced everywhere else by
//! [`ElementId`]. Packages own their sub-packages and diagrams.

use std::fmt;

use crate::identifier::ElementId;

/// Element type tag used for classes.
pub const CLASS_TYPE: &str = "Class";

/// A named attribute declared on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    attribute_type: String,
    default: String,
}

impl Attribute {
    /// Create an attribute with its declared type and default value.
    pub fn new(
        name: impl Into<String>,
        attribute_type: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            attribute_type: attribute_type.into(),
            default: default.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_type(&self) -> &str {
        &self.attribute_type
    }

    pub fn default_value(&self) -> &str {
        &self.default
    }
}

/// The kind of a connector between two elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorKind {
    Generalization,
    Association,
    /// Any other connector type reported by the repository (dependencies,
    /// realisations, ...). Ignored by classification.
    Other(String),
}

impl ConnectorKind {
    /// Map a repository connector type name to a kind.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Generalization" => Self::Generalization,
            "Association" => Self::Association,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Generalization => "Generalization",
            Self::Association => "Association",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role name and cardinality at one end of a connector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorEnd {
    role: String,
    cardinality: String,
}

impl ConnectorEnd {
    pub fn new(role: impl Into<String>, cardinality: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            cardinality: cardinality.into(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn cardinality(&self) -> &str {
        &self.cardinality
    }
}

/// A typed link between a client and a supplier element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    kind: ConnectorKind,
    client: ElementId,
    supplier: ElementId,
    client_end: ConnectorEnd,
    supplier_end: ConnectorEnd,
}

impl Connector {
    /// Create a connector with empty ends.
    pub fn new(kind: ConnectorKind, client: ElementId, supplier: ElementId) -> Self {
        Self {
            kind,
            client,
            supplier,
            client_end: ConnectorEnd::default(),
            supplier_end: ConnectorEnd::default(),
        }
    }

    /// Shorthand for a generalization from `child` to `parent`.
    pub fn generalization(child: ElementId, parent: ElementId) -> Self {
        Self::new(ConnectorKind::Generalization, child, parent)
    }

    /// Shorthand for an association without roles.
    pub fn association(client: ElementId, supplier: ElementId) -> Self {
        Self::new(ConnectorKind::Association, client, supplier)
    }

    pub fn with_client_end(mut self, end: ConnectorEnd) -> Self {
        self.client_end = end;
        self
    }

    pub fn with_supplier_end(mut self, end: ConnectorEnd) -> Self {
        self.supplier_end = end;
        self
    }

    pub fn kind(&self) -> &ConnectorKind {
        &self.kind
    }

    pub fn client(&self) -> ElementId {
        self.client
    }

    pub fn supplier(&self) -> ElementId {
        self.supplier
    }

    pub fn client_end(&self) -> &ConnectorEnd {
        &self.client_end
    }

    pub fn supplier_end(&self) -> &ConnectorEnd {
        &self.supplier_end
    }

    /// Returns true if `id` is the client or the supplier of this connector.
    pub fn touches(&self, id: ElementId) -> bool {
        self.client == id || self.supplier == id
    }

    /// Returns the end opposite to `id`.
    ///
    /// A connector whose client is `id` yields the supplier; any other
    /// connector yields the client.
    pub fn opposite(&self, id: ElementId) -> ElementId {
        if self.client == id {
            self.supplier
        } else {
            self.client
        }
    }
}

/// A typed unit of the design model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: ElementId,
    name: String,
    element_type: String,
    notes: String,
    attributes: Vec<Attribute>,
    base_classes: Vec<ElementId>,
    run_state: String,
}

impl Element {
    /// Create a class element with no attributes and no base classes.
    pub fn new(id: ElementId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            element_type: CLASS_TYPE.to_string(),
            notes: String::new(),
            attributes: Vec::new(),
            base_classes: Vec::new(),
            run_state: String::new(),
        }
    }

    pub fn with_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = element_type.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_base_class(mut self, base: ElementId) -> Self {
        self.base_classes.push(base);
        self
    }

    pub fn with_run_state(mut self, run_state: impl Into<String>) -> Self {
        self.run_state = run_state.into();
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    /// Returns true if the element is a class.
    pub fn is_class(&self) -> bool {
        self.element_type == CLASS_TYPE
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Attributes declared directly on this element, in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Base classes in declaration order. The first entry is the primary parent.
    pub fn base_classes(&self) -> &[ElementId] {
        &self.base_classes
    }

    /// Raw run-state string holding attribute initializer overrides.
    pub fn run_state(&self) -> &str {
        &self.run_state
    }
}

/// A diagram and the ordered elements placed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    name: String,
    diagram_type: String,
    objects: Vec<ElementId>,
}

impl Diagram {
    pub fn new(name: impl Into<String>, diagram_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diagram_type: diagram_type.into(),
            objects: Vec::new(),
        }
    }

    /// Place an element on the diagram.
    pub fn with_object(mut self, element: ElementId) -> Self {
        self.objects.push(element);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn diagram_type(&self) -> &str {
        &self.diagram_type
    }

    /// Elements placed on the diagram, in placement order.
    pub fn objects(&self) -> &[ElementId] {
        &self.objects
    }
}

/// A hierarchical container of elements, diagrams and sub-packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    name: String,
    stereotype: Option<String>,
    packages: Vec<Package>,
    elements: Vec<ElementId>,
    diagrams: Vec<Diagram>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_stereotype(mut self, stereotype: impl Into<String>) -> Self {
        self.stereotype = Some(stereotype.into());
        self
    }

    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    pub fn with_element(mut self, element: ElementId) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_diagram(mut self, diagram: Diagram) -> Self {
        self.diagrams.push(diagram);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stereotype(&self) -> Option<&str> {
        self.stereotype.as_deref()
    }

    /// Returns true if the package carries the given stereotype.
    pub fn has_stereotype(&self, stereotype: &str) -> bool {
        self.stereotype.as_deref() == Some(stereotype)
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn diagrams(&self) -> &[Diagram] {
        &self.diagrams
    }

    /// Find a direct sub-package by name.
    pub fn child(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|package| package.name == name)
    }

    /// This package and all nested packages in depth-first pre-order.
    pub fn descendants(&self) -> Vec<&Package> {
        let mut ordered = Vec::new();
        let mut stack = vec![self];
        while let Some(package) = stack.pop() {
            ordered.push(package);
            stack.extend(package.packages.iter().rev());
        }
        ordered
    }

    /// Element ids held by this package or any nested package.
    pub fn element_ids_recursive(&self) -> Vec<ElementId> {
        self.descendants()
            .into_iter()
            .flat_map(|package| package.elements.iter().copied())
            .collect()
    }

    /// Diagrams held by this package or any nested package, in pre-order.
    pub fn diagrams_recursive(&self) -> Vec<&Diagram> {
        self.descendants()
            .into_iter()
            .flat_map(|package| package.diagrams.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_package() -> Package {
        Package::new("root")
            .with_element(ElementId::new(1))
            .with_diagram(Diagram::new("root diagram", "Logical"))
            .with_package(
                Package::new("a")
                    .with_element(ElementId::new(2))
                    .with_package(Package::new("a1").with_element(ElementId::new(3))),
            )
            .with_package(
                Package::new("b")
                    .with_element(ElementId::new(4))
                    .with_diagram(Diagram::new("b diagram", "Logical")),
            )
    }

    #[test]
    fn test_descendants_pre_order() {
        let package = nested_package();
        let names: Vec<_> = package.descendants().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn test_element_ids_recursive() {
        let ids = nested_package().element_ids_recursive();
        assert_eq!(
            ids,
            vec![
                ElementId::new(1),
                ElementId::new(2),
                ElementId::new(3),
                ElementId::new(4)
            ]
        );
    }

    #[test]
    fn test_diagrams_recursive() {
        let package = nested_package();
        let names: Vec<_> = package
            .diagrams_recursive()
            .iter()
            .map(|d| d.name())
            .collect();
        assert_eq!(names, vec!["root diagram", "b diagram"]);
    }

    #[test]
    fn test_child_lookup() {
        let package = nested_package();
        assert_eq!(package.child("b").map(Package::name), Some("b"));
        assert!(package.child("a1").is_none());
    }

    #[test]
    fn test_connector_opposite() {
        let connector = Connector::association(ElementId::new(1), ElementId::new(2));
        assert_eq!(connector.opposite(ElementId::new(1)), ElementId::new(2));
        assert_eq!(connector.opposite(ElementId::new(2)), ElementId::new(1));
        assert!(connector.touches(ElementId::new(2)));
        assert!(!connector.touches(ElementId::new(3)));
    }

    #[test]
    fn test_connector_kind_from_type_name() {
        assert_eq!(
            ConnectorKind::from_type_name("Generalization"),
            ConnectorKind::Generalization
        );
        assert_eq!(
            ConnectorKind::from_type_name("Association"),
            ConnectorKind::Association
        );
        assert_eq!(
            ConnectorKind::from_type_name("Dependency"),
            ConnectorKind::Other("Dependency".to_string())
        );
    }

    #[test]
    fn test_element_defaults_to_class() {
        let element = Element::new(ElementId::new(1), "Gateway");
        assert!(element.is_class());
        assert!(!element.clone().with_type("Note").is_class());
    }
}
