//! Read interface to a design-model repository.
//!
//! The compiler only ever reads the model. [`ModelRepository`] is the seam
//! between classification and whatever store holds the model;
//! [`InMemoryRepository`] is the store built by the model loader and by tests.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::{
    identifier::ElementId,
    model::{Connector, Element, Package},
};

/// Read-only queries the profile compiler issues against a model.
pub trait ModelRepository {
    /// Top-level packages in model order.
    fn root_packages(&self) -> &[Package];

    /// Look up an element by id.
    fn element(&self, id: ElementId) -> Option<&Element>;

    /// Connectors whose client or supplier is `id`, in declaration order.
    fn connectors_of(&self, id: ElementId) -> Vec<&Connector>;

    /// Directory relative asset paths are resolved against.
    fn base_dir(&self) -> Option<&Path>;

    /// All packages at any depth carrying `stereotype`, depth-first.
    fn packages_with_stereotype(&self, stereotype: &str) -> Vec<&Package> {
        self.root_packages()
            .iter()
            .flat_map(Package::descendants)
            .filter(|package| package.has_stereotype(stereotype))
            .collect()
    }

    /// Name of an element, or an empty string for unknown ids.
    fn element_name(&self, id: ElementId) -> &str {
        self.element(id).map_or("", Element::name)
    }
}

/// A model held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    packages: Vec<Package>,
    elements: IndexMap<ElementId, Element>,
    connectors: Vec<Connector>,
    base_dir: Option<PathBuf>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level package.
    pub fn add_package(&mut self, package: Package) {
        self.packages.push(package);
    }

    /// Add an element, replacing any element with the same id.
    pub fn add_element(&mut self, element: Element) {
        self.elements.insert(element.id(), element);
    }

    pub fn add_connector(&mut self, connector: Connector) {
        self.connectors.push(connector);
    }

    pub fn set_base_dir(&mut self, dir: impl Into<PathBuf>) {
        self.base_dir = Some(dir.into());
    }

    pub fn with_package(mut self, package: Package) -> Self {
        self.add_package(package);
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.add_element(element);
        self
    }

    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.add_connector(connector);
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.set_base_dir(dir);
        self
    }

    /// Iterate over all elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }
}

impl ModelRepository for InMemoryRepository {
    fn root_packages(&self) -> &[Package] {
        &self.packages
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    fn connectors_of(&self, id: ElementId) -> Vec<&Connector> {
        self.connectors
            .iter()
            .filter(|connector| connector.touches(id))
            .collect()
    }

    fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}
