//! Element universes of a profile package.
//!
//! A profile package holds three well-known sub-packages. Every element in
//! the model is classified by which of them it lives under, and every
//! diagram by which of them holds a diagram of its name.

use std::collections::HashSet;

use log::{debug, warn};

use mopro_core::{
    identifier::ElementId,
    model::{Diagram, Package},
};

use crate::MoproError;

/// Stereotype marking a package whose diagrams define the language.
pub const METAMODEL_STEREOTYPE: &str = "Metamodel";
/// Sub-package holding the language's own types.
pub const ABSTRACT_SYNTAX_PACKAGE: &str = "Abstract Syntax Model";
/// Sub-package holding styling elements.
pub const CONCRETE_SYNTAX_PACKAGE: &str = "Concrete Syntax Model";
/// Sub-package holding the UML types stereotypes extend.
pub const UML_BASELINE_PACKAGE: &str = "UML4Profile";

/// Which universe a diagram belongs to, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramScope {
    Concrete,
    UmlBaseline,
    Abstract,
    Other,
}

/// Element ids and diagram names found under each well-known sub-package.
#[derive(Debug, Clone, Default)]
pub struct Universes {
    dsl: HashSet<ElementId>,
    csm: HashSet<ElementId>,
    uml: HashSet<ElementId>,
    dsl_diagrams: HashSet<String>,
    csm_diagrams: HashSet<String>,
    uml_diagrams: HashSet<String>,
}

impl Universes {
    /// Partition the sub-packages of `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`MoproError::MissingAbstractSyntax`] when the profile has no
    /// abstract syntax sub-package. The other two are optional.
    pub fn partition(profile: &Package) -> Result<Self, MoproError> {
        let asm = profile.child(ABSTRACT_SYNTAX_PACKAGE).ok_or_else(|| {
            MoproError::MissingAbstractSyntax {
                profile: profile.name().to_string(),
            }
        })?;
        let csm = optional_child(profile, CONCRETE_SYNTAX_PACKAGE);
        let uml = optional_child(profile, UML_BASELINE_PACKAGE);

        let universes = Self {
            dsl: element_ids(Some(asm)),
            csm: element_ids(csm),
            uml: element_ids(uml),
            dsl_diagrams: diagram_names(Some(asm)),
            csm_diagrams: diagram_names(csm),
            uml_diagrams: diagram_names(uml),
        };

        debug!(
            dsl = universes.dsl.len(),
            csm = universes.csm.len(),
            uml = universes.uml.len();
            "Partitioned element universes"
        );
        Ok(universes)
    }

    pub fn is_dsl(&self, id: ElementId) -> bool {
        self.dsl.contains(&id)
    }

    pub fn is_csm(&self, id: ElementId) -> bool {
        self.csm.contains(&id)
    }

    pub fn is_uml(&self, id: ElementId) -> bool {
        self.uml.contains(&id)
    }

    /// Returns true if a diagram named `name` defines diagram-type bindings.
    pub fn is_dsl_diagram(&self, name: &str) -> bool {
        self.dsl_diagrams.contains(name)
    }

    /// Skip rules key off this; the concrete syntax check comes first.
    pub fn scope_of(&self, diagram_name: &str) -> DiagramScope {
        if self.csm_diagrams.contains(diagram_name) {
            DiagramScope::Concrete
        } else if self.uml_diagrams.contains(diagram_name) {
            DiagramScope::UmlBaseline
        } else if self.dsl_diagrams.contains(diagram_name) {
            DiagramScope::Abstract
        } else {
            DiagramScope::Other
        }
    }
}

/// Diagrams of every package at or below a `Metamodel`-stereotyped package.
///
/// Once a package on the path carries the stereotype, all nested packages
/// contribute their diagrams regardless of their own stereotype.
pub fn metamodel_diagrams(profile: &Package) -> Vec<&Diagram> {
    let mut diagrams = Vec::new();
    let mut stack = vec![(profile, false)];
    while let Some((package, inherited)) = stack.pop() {
        let inside = inherited || package.has_stereotype(METAMODEL_STEREOTYPE);
        if inside {
            diagrams.extend(package.diagrams());
        }
        stack.extend(package.packages().iter().rev().map(|child| (child, inside)));
    }
    diagrams
}

fn optional_child<'a>(profile: &'a Package, name: &str) -> Option<&'a Package> {
    let child = profile.child(name);
    if child.is_none() {
        warn!(profile = profile.name(), package = name; "Optional sub-package missing");
    }
    child
}

fn element_ids(package: Option<&Package>) -> HashSet<ElementId> {
    package
        .map(|package| package.element_ids_recursive().into_iter().collect())
        .unwrap_or_default()
}

fn diagram_names(package: Option<&Package>) -> HashSet<String> {
    package
        .map(|package| {
            package
                .diagrams_recursive()
                .into_iter()
                .map(|diagram| diagram.name().to_string())
                .collect()
        })
        .unwrap_or_default()
}
