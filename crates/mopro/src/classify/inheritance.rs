//! Base-class walks: styling detection, ancestor resolution and attribute
//! inheritance.
//!
//! The model's inheritance graph is not trusted to be acyclic. Every walk
//! here tracks visited elements, and the ancestor search is additionally
//! bounded by a wall-clock deadline.

use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use indexmap::IndexMap;
use log::{trace, warn};

use mopro_core::{
    identifier::ElementId, model::Element, repository::ModelRepository, run_state,
};

use crate::classify::universe::Universes;

/// Name of the base type every styling element derives from.
pub const CSM_MARKER_NAME: &str = "CSM Element";

/// Returns true if any base class of `element`, at any depth, is named
/// [`CSM_MARKER_NAME`].
pub fn is_csm<R>(repository: &R, element: &Element) -> bool
where
    R: ModelRepository + ?Sized,
{
    let mut visited = HashSet::from([element.id()]);
    let mut pending: Vec<ElementId> = element.base_classes().iter().rev().copied().collect();
    while let Some(id) = pending.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(base) = repository.element(id) else {
            continue;
        };
        if base.name() == CSM_MARKER_NAME {
            return true;
        }
        pending.extend(base.base_classes().iter().rev());
    }
    false
}

/// Follow the first base class of a language element until a UML baseline
/// type is reached.
///
/// Non-language elements are their own ancestor. When the chain ends, loops
/// or the search outlives `timeout` before reaching the baseline, the element
/// itself is returned rather than a partial ancestor.
pub fn most_distant_ancestor<'r, R>(
    repository: &'r R,
    element: &'r Element,
    universes: &Universes,
    timeout: Duration,
) -> &'r Element
where
    R: ModelRepository + ?Sized,
{
    if !universes.is_dsl(element.id()) {
        return element;
    }

    let deadline = Instant::now() + timeout;
    let mut visited = HashSet::new();
    let mut current = element;
    while !universes.is_uml(current.id()) {
        if Instant::now() >= deadline {
            warn!(element = element.name(); "Ancestor search timed out, using the element itself");
            return element;
        }
        if !visited.insert(current.id()) {
            warn!(element = element.name(); "Cyclic inheritance, using the element itself");
            return element;
        }
        let Some(parent) = current
            .base_classes()
            .first()
            .and_then(|id| repository.element(*id))
        else {
            trace!(element = element.name(), last = current.name(); "Inheritance chain ends outside the baseline");
            return element;
        };
        current = parent;
    }
    current
}

/// Attributes declared on `element` itself, name to default value.
pub fn direct_attributes(element: &Element) -> IndexMap<String, String> {
    let mut attributes = IndexMap::new();
    for attribute in element.attributes() {
        attributes
            .entry(attribute.name().to_string())
            .or_insert_with(|| attribute.default_value().to_string());
    }
    attributes
}

/// All attributes of `element` including inherited ones, with run-state
/// overrides applied.
///
/// Direct attributes come first. Each base class, in order, contributes only
/// names not already present. Each level's run state overrides the values
/// collected at that level.
pub fn inherited_attributes<R>(repository: &R, element: &Element) -> IndexMap<String, String>
where
    R: ModelRepository + ?Sized,
{
    let mut visited = HashSet::new();
    collect_attributes(repository, element, &mut visited)
}

fn collect_attributes<R>(
    repository: &R,
    element: &Element,
    visited: &mut HashSet<ElementId>,
) -> IndexMap<String, String>
where
    R: ModelRepository + ?Sized,
{
    visited.insert(element.id());
    let mut attributes = direct_attributes(element);
    for base_id in element.base_classes() {
        if visited.contains(base_id) {
            continue;
        }
        let Some(base) = repository.element(*base_id) else {
            continue;
        };
        for (name, value) in collect_attributes(repository, base, visited) {
            attributes.entry(name).or_insert(value);
        }
    }
    run_state::apply_overrides(element.run_state(), &mut attributes);
    attributes
}
