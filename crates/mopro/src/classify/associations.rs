//! Connector-derived facts about an element.

use indexmap::IndexMap;

use mopro_core::{
    identifier::ElementId,
    model::{ConnectorKind, Element},
    repository::ModelRepository,
};

use crate::classify::{inheritance, universe::Universes};

/// Role names the host tool gives meaning to in a metaconstraint block.
pub const UML_ROLE_KEYS: [&str; 3] = ["source", "target", "type"];

/// The far end of an association, keyed by the role it plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metaconstraint {
    element: ElementId,
    element_name: String,
    cardinality: String,
}

impl Metaconstraint {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    pub fn cardinality(&self) -> &str {
        &self.cardinality
    }
}

/// Role constraints from every association touching `element`.
///
/// An end contributes when it carries a role and is not the element itself.
/// The first end seen for a role name wins.
pub fn metaconstraints<R>(repository: &R, element: &Element) -> IndexMap<String, Metaconstraint>
where
    R: ModelRepository + ?Sized,
{
    let mut constraints = IndexMap::new();
    let associations = repository
        .connectors_of(element.id())
        .into_iter()
        .filter(|connector| *connector.kind() == ConnectorKind::Association);

    for connector in associations {
        let ends = [
            (connector.client(), connector.client_end()),
            (connector.supplier(), connector.supplier_end()),
        ];
        for (end_id, end) in ends {
            if end.role().is_empty() || end_id == element.id() {
                continue;
            }
            constraints
                .entry(end.role().to_string())
                .or_insert_with(|| Metaconstraint {
                    element: end_id,
                    element_name: repository.element_name(end_id).to_string(),
                    cardinality: end.cardinality().to_string(),
                });
        }
    }
    constraints
}

/// Returns true if the constraints include a role the host tool understands.
pub fn has_uml_role(constraints: &IndexMap<String, Metaconstraint>) -> bool {
    UML_ROLE_KEYS.iter().any(|role| constraints.contains_key(*role))
}

/// Name of the supplier of the first generalization `element` is the client of.
pub fn base_stereotype<R>(repository: &R, element: &Element) -> Option<String>
where
    R: ModelRepository + ?Sized,
{
    repository
        .connectors_of(element.id())
        .into_iter()
        .find(|connector| {
            *connector.kind() == ConnectorKind::Generalization && connector.client() == element.id()
        })
        .map(|connector| repository.element_name(connector.supplier()).to_string())
}

/// The styling element associated with `element`.
///
/// When several associations lead to styling elements the last one wins.
pub fn styling_element<'r, R>(
    repository: &'r R,
    element: &Element,
    universes: &Universes,
) -> Option<&'r Element>
where
    R: ModelRepository + ?Sized,
{
    repository
        .connectors_of(element.id())
        .into_iter()
        .filter(|connector| *connector.kind() == ConnectorKind::Association)
        .filter_map(|connector| repository.element(connector.opposite(element.id())))
        .filter(|far| far.id() != element.id())
        .filter(|far| universes.is_csm(far.id()) || inheritance::is_csm(repository, far))
        .last()
}
