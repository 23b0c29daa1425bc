//! Model classification.
//!
//! The [`Classifier`] walks the metamodel diagrams of one profile package and
//! turns every class placed on them into a [`ClassifiedElement`]: the role the
//! element plays, its inheritance facts, its role constraints, and the
//! styling it draws with.
//!
//! # Skip rules
//!
//! - Objects that are not classes are skipped.
//! - On a concrete syntax diagram, language elements are skipped (they are
//!   emitted from their own diagrams) and styling elements get a `_csm`
//!   suffix so their stereotype names cannot collide.
//! - On a UML baseline diagram, language elements are skipped.

pub mod associations;
pub mod inheritance;
pub mod universe;

use std::time::Duration;

use indexmap::IndexMap;
use log::{debug, trace, warn};

use mopro_core::{
    identifier::ElementId,
    model::{Attribute, CLASS_TYPE, Diagram, Element, Package},
    repository::ModelRepository,
    style::{RelationDirection, StyleProperties, keys},
};

use crate::{MoproError, config::ClassificationConfig, shapescript::ShapescriptBuilder};

pub use associations::Metaconstraint;
pub use universe::{DiagramScope, Universes};

/// Suffix appended to styling elements listed on concrete syntax diagrams.
pub const CSM_SUFFIX: &str = "_csm";

/// Ancestor names whose descendants are connectors rather than entities.
pub const RELATIONSHIP_ANCESTORS: [&str; 3] = ["Dependency", "Association", "Generalization"];

/// Returns true if an element whose resolved ancestor is `ancestor_name`
/// draws as a connector.
pub fn is_relationship_ancestor(ancestor_name: &str) -> bool {
    RELATIONSHIP_ANCESTORS.contains(&ancestor_name)
}

/// The universe an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// A type of the language being defined.
    Dsl,
    /// A styling-only element.
    Styling,
    /// A baseline type or anything else placed on a metamodel diagram.
    UmlBaseline,
}

/// The most distant ancestor still inside the language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    id: ElementId,
    name: String,
    is_self: bool,
}

impl Ancestor {
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the element is its own ancestor.
    pub fn is_self(&self) -> bool {
        self.is_self
    }

    /// Name of the UML type a toolbox entry instantiates: the ancestor, or
    /// plain `Class` when the element stands alone.
    pub fn uml_type(&self) -> &str {
        if self.is_self { CLASS_TYPE } else { &self.name }
    }
}

/// The styling element associated with an element, with its resolved
/// properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Styling {
    element: ElementId,
    name: String,
    properties: StyleProperties,
}

impl Styling {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &StyleProperties {
        &self.properties
    }
}

/// Everything the document builder needs to know about one element.
#[derive(Debug, Clone)]
pub struct ClassifiedElement {
    id: ElementId,
    name: String,
    notes: String,
    role: ElementRole,
    in_uml_baseline: bool,
    parent: Option<ElementId>,
    parent_in_uml_baseline: bool,
    base_stereotype: Option<String>,
    ancestor: Ancestor,
    direct_attributes: Vec<Attribute>,
    styling: Option<Styling>,
    relation_direction: Option<RelationDirection>,
    metaconstraints: IndexMap<String, Metaconstraint>,
    shapescript: Option<ShapescriptBuilder>,
}

impl ClassifiedElement {
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Stereotype name, suffixed for styling elements on concrete syntax
    /// diagrams.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn role(&self) -> ElementRole {
        self.role
    }

    pub fn is_dsl(&self) -> bool {
        self.role == ElementRole::Dsl
    }

    /// Returns true if the element itself lives in the UML baseline package.
    pub fn in_uml_baseline(&self) -> bool {
        self.in_uml_baseline
    }

    /// First base class, if any.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Returns true if the first base class is a UML baseline type.
    pub fn parent_in_uml_baseline(&self) -> bool {
        self.parent_in_uml_baseline
    }

    /// Supplier name of the first generalization the element is client of.
    pub fn base_stereotype(&self) -> Option<&str> {
        self.base_stereotype.as_deref()
    }

    pub fn ancestor(&self) -> &Ancestor {
        &self.ancestor
    }

    pub fn is_relationship(&self) -> bool {
        is_relationship_ancestor(self.ancestor.name())
    }

    /// Attributes declared on the element itself.
    pub fn direct_attributes(&self) -> &[Attribute] {
        &self.direct_attributes
    }

    pub fn styling(&self) -> Option<&Styling> {
        self.styling.as_ref()
    }

    /// Host-tool direction of a connector stereotype, from its styling.
    pub fn relation_direction(&self) -> Option<RelationDirection> {
        self.relation_direction
    }

    pub fn metaconstraints(&self) -> &IndexMap<String, Metaconstraint> {
        &self.metaconstraints
    }

    pub fn shapescript(&self) -> Option<&ShapescriptBuilder> {
        self.shapescript.as_ref()
    }
}

/// One metamodel diagram and the elements it contributes.
#[derive(Debug, Clone)]
pub struct ClassifiedDiagram {
    name: String,
    diagram_type: String,
    is_dsl_diagram: bool,
    elements: Vec<ClassifiedElement>,
}

impl ClassifiedDiagram {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn diagram_type(&self) -> &str {
        &self.diagram_type
    }

    /// Returns true if the diagram gets a diagram-type binding.
    pub fn is_dsl_diagram(&self) -> bool {
        self.is_dsl_diagram
    }

    pub fn elements(&self) -> &[ClassifiedElement] {
        &self.elements
    }
}

/// Classifies the elements of one profile package.
#[derive(Debug)]
pub struct Classifier<'a, R: ModelRepository + ?Sized> {
    repository: &'a R,
    profile: &'a Package,
    universes: Universes,
    ancestor_timeout: Duration,
}

impl<'a, R: ModelRepository + ?Sized> Classifier<'a, R> {
    /// Partition `profile` and prepare to classify its diagrams.
    ///
    /// # Errors
    ///
    /// Fails when the profile lacks an abstract syntax sub-package.
    pub fn new(
        repository: &'a R,
        profile: &'a Package,
        config: &ClassificationConfig,
    ) -> Result<Self, MoproError> {
        Ok(Self {
            repository,
            profile,
            universes: Universes::partition(profile)?,
            ancestor_timeout: config.ancestor_search_timeout(),
        })
    }

    pub fn universes(&self) -> &Universes {
        &self.universes
    }

    /// Diagrams of the profile's metamodel packages, in model order.
    pub fn metamodel_diagrams(&self) -> Vec<&'a Diagram> {
        universe::metamodel_diagrams(self.profile)
    }

    /// Classify every object on `diagram`, applying the skip rules.
    pub fn classify_diagram(&self, diagram: &Diagram) -> ClassifiedDiagram {
        let scope = self.universes.scope_of(diagram.name());
        let elements: Vec<ClassifiedElement> = diagram
            .objects()
            .iter()
            .filter_map(|id| self.repository.element(*id))
            .filter_map(|element| self.classify_element(element, scope))
            .collect();

        debug!(
            diagram = diagram.name(),
            scope:? = scope,
            elements = elements.len();
            "Classified diagram"
        );

        ClassifiedDiagram {
            name: diagram.name().to_string(),
            diagram_type: diagram.diagram_type().to_string(),
            is_dsl_diagram: self.universes.is_dsl_diagram(diagram.name()),
            elements,
        }
    }

    /// Classify one diagram object, or `None` when a skip rule applies.
    pub fn classify_element(
        &self,
        element: &Element,
        scope: DiagramScope,
    ) -> Option<ClassifiedElement> {
        if !element.is_class() {
            trace!(element = element.name(), kind = element.element_type(); "Skipping non-class object");
            return None;
        }

        let is_dsl = self.universes.is_dsl(element.id());
        let is_styling = inheritance::is_csm(self.repository, element);
        let mut name = element.name().to_string();
        match scope {
            DiagramScope::Concrete | DiagramScope::UmlBaseline if is_dsl => {
                trace!(element = element.name(), scope:? = scope; "Skipping language element");
                return None;
            }
            DiagramScope::Concrete if is_styling => name.push_str(CSM_SUFFIX),
            _ => {}
        }

        let role = if is_dsl {
            ElementRole::Dsl
        } else if is_styling || self.universes.is_csm(element.id()) {
            ElementRole::Styling
        } else {
            ElementRole::UmlBaseline
        };

        let ancestor = inheritance::most_distant_ancestor(
            self.repository,
            element,
            &self.universes,
            self.ancestor_timeout,
        );
        let ancestor = Ancestor {
            id: ancestor.id(),
            name: ancestor.name().to_string(),
            is_self: ancestor.id() == element.id(),
        };

        let styling = associations::styling_element(self.repository, element, &self.universes)
            .map(|far| Styling {
                element: far.id(),
                name: far.name().to_string(),
                properties: inheritance::inherited_attributes(self.repository, far).into(),
            });
        let shapescript = styling.as_ref().and_then(|styling| {
            ShapescriptBuilder::from_style(styling.properties(), self.repository.base_dir())
        });
        let relation_direction = styling
            .as_ref()
            .and_then(|styling| relation_direction(styling.properties()));

        let parent = element.base_classes().first().copied();
        let classified = ClassifiedElement {
            id: element.id(),
            name,
            notes: element.notes().to_string(),
            role,
            in_uml_baseline: self.universes.is_uml(element.id()),
            parent,
            parent_in_uml_baseline: parent.is_some_and(|id| self.universes.is_uml(id)),
            base_stereotype: associations::base_stereotype(self.repository, element),
            ancestor,
            direct_attributes: element.attributes().to_vec(),
            styling,
            relation_direction,
            metaconstraints: associations::metaconstraints(self.repository, element),
            shapescript,
        };

        debug!(
            element = classified.name(),
            role:? = classified.role(),
            ancestor = classified.ancestor().name(),
            styled = classified.styling().is_some();
            "Classified element"
        );
        trace!(element:? = classified; "Element descriptor");
        Some(classified)
    }
}

fn relation_direction(properties: &StyleProperties) -> Option<RelationDirection> {
    let raw = properties.get(keys::RELATION_DIRECTION)?;
    match raw.parse() {
        Ok(direction) => Some(direction),
        Err(err) => {
            warn!(err:% = err; "Ignoring relation direction");
            None
        }
    }
}
