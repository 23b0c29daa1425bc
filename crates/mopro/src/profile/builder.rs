//! Incremental assembly of the profile document.
//!
//! The builder is driven diagram by diagram:
//!
//! 1. [`set_diagram_profile_node`](ProfileDocumentBuilder::set_diagram_profile_node)
//!    for diagrams that define a diagram type,
//! 2. [`initialize_diagram_toolbox`](ProfileDocumentBuilder::initialize_diagram_toolbox),
//! 3. per element, the stereotype, image and toolbox operations,
//! 4. [`append_diagram_toolbox`](ProfileDocumentBuilder::append_diagram_toolbox).

use log::{debug, trace, warn};
use rand::{Rng, rngs::ThreadRng};

use crate::{
    MoproError,
    classify::{ClassifiedElement, associations},
    profile::{
        document::ProfileDocument,
        identity::ProfileIdentity,
        template::{self, TECHNOLOGY_TEMPLATE, TOOLBOX_TEMPLATE},
        xml::XmlElement,
    },
};

/// Namespace of the host tool's datatype attribute.
pub const DATATYPE_NAMESPACE: &str = "urn:schemas-microsoft-com:datatypes";

/// Attribute holding the payload datatype. Persistence renames it to its
/// namespaced form.
pub const DATATYPE_ATTRIBUTE: &str = "dt";

/// Namespace prefix of UML baseline types.
pub const UML_NAMESPACE: &str = "UML";

/// Range of generated image-table ids: nine digits.
const IMAGE_ID_RANGE: std::ops::Range<u32> = 100_000_000..999_999_999;

const PROFILE_STEREOTYPES: [&str; 4] = ["UMLProfiles", "UMLProfile", "Content", "Stereotypes"];
const DIAGRAM_STEREOTYPES: [&str; 4] = ["DiagramProfile", "UMLProfile", "Content", "Stereotypes"];
const IMAGE_DATASET: [&str; 3] = ["Images", "RefData", "DataSet"];
const TOOLBOXES: [&str; 1] = ["UIToolboxes"];

/// A toolbox being filled for one diagram.
#[derive(Debug)]
struct OpenToolbox {
    diagram: String,
    root: XmlElement,
}

/// Builds a [`ProfileDocument`].
#[derive(Debug)]
pub struct ProfileDocumentBuilder<R: Rng = ThreadRng> {
    identity: ProfileIdentity,
    root: XmlElement,
    toolbox: Option<OpenToolbox>,
    rng: R,
}

impl ProfileDocumentBuilder<ThreadRng> {
    /// Create a builder drawing image ids from the thread-local generator.
    pub fn new(identity: ProfileIdentity) -> Result<Self, MoproError> {
        Self::with_rng(identity, rand::rng())
    }
}

impl<R: Rng> ProfileDocumentBuilder<R> {
    /// Create a builder drawing image ids from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`MoproError::Template`] if the skeleton cannot be instantiated.
    pub fn with_rng(identity: ProfileIdentity, rng: R) -> Result<Self, MoproError> {
        let mut root = template::instantiate(
            TECHNOLOGY_TEMPLATE,
            &[
                (template::PROFILE_ID, identity.short_id()),
                (template::PROFILE_GUID, identity.guid()),
                (template::PROFILE_NAME, identity.name()),
                (template::PROFILE_VERSION, identity.version()),
                (template::PROFILE_NOTES, identity.notes()),
                (template::INFO_URL, identity.info_url()),
                (template::SUPPORT_URL, identity.support_url()),
            ],
        )?;

        // Inserted back to front so the logo precedes the icon.
        if let Some(icon) = identity.icon() {
            root.insert_child_after(
                "Documentation",
                XmlElement::new("Icon").with_child(bitmap("Image", icon)),
            );
        }
        if let Some(logo) = identity.logo() {
            root.insert_child_after(
                "Documentation",
                XmlElement::new("Logo").with_child(bitmap("Image", logo)),
            );
        }

        Ok(Self {
            identity,
            root,
            toolbox: None,
            rng,
        })
    }

    pub fn identity(&self) -> &ProfileIdentity {
        &self.identity
    }

    /// Register a diagram type: `<name> Diagram` with its toolbox binding.
    pub fn set_diagram_profile_node(
        &mut self,
        diagram_name: &str,
        diagram_type: &str,
    ) -> Result<(), MoproError> {
        let alias = format!("{diagram_name} Diagram");
        let stereotype = XmlElement::new("Stereotype")
            .with_attr("name", alias.as_str())
            .with_attr("notes", "")
            .with_attr("cx", "0")
            .with_attr("cy", "0")
            .with_child(
                XmlElement::new("AppliesTo").with_child(
                    XmlElement::new("Apply")
                        .with_attr("type", diagram_type)
                        .with_child(property("alias", &alias))
                        .with_child(property("toolbox", &format!("{diagram_name} Toolbox"))),
                ),
            );
        section(&mut self.root, &DIAGRAM_STEREOTYPES)?.push_child(stereotype);
        debug!(diagram = diagram_name, diagram_type; "Registered diagram type");
        Ok(())
    }

    /// Open a fresh toolbox for `diagram_name`. A toolbox still open is
    /// discarded.
    pub fn initialize_diagram_toolbox(&mut self, diagram_name: &str) -> Result<(), MoproError> {
        if let Some(previous) = self.toolbox.take() {
            warn!(diagram = previous.diagram.as_str(); "Discarding toolbox that was never appended");
        }
        let root = template::instantiate(TOOLBOX_TEMPLATE, &[(template::DIAGRAM_NAME, diagram_name)])?;
        self.toolbox = Some(OpenToolbox {
            diagram: diagram_name.to_string(),
            root,
        });
        Ok(())
    }

    /// Close the open toolbox and merge it into the document.
    pub fn append_diagram_toolbox(&mut self) -> Result<(), MoproError> {
        let toolbox = self.toolbox.take().ok_or_else(no_open_toolbox)?;
        section(&mut self.root, &TOOLBOXES)?.push_child(toolbox.root);
        trace!(diagram = toolbox.diagram.as_str(); "Appended toolbox");
        Ok(())
    }

    /// Append the stereotype definition of `element`.
    pub fn set_profile_node_elements(&mut self, element: &ClassifiedElement) -> Result<(), MoproError> {
        let stereotype = self.stereotype(element)?;
        section(&mut self.root, &PROFILE_STEREOTYPES)?.push_child(stereotype);
        Ok(())
    }

    /// Append an image-table row if the element draws from a readable image.
    ///
    /// Returns true if a row was added.
    pub fn set_image_node_elements(&mut self, element: &ClassifiedElement) -> bool {
        let Some(payload) = element
            .shapescript()
            .and_then(|script| script.render_image_payload())
        else {
            return false;
        };
        let id = self.rng.random_range(IMAGE_ID_RANGE);
        let Some(dataset) = self.root.path_mut(&IMAGE_DATASET) else {
            warn!("Document has no image table, skipping image");
            return false;
        };
        dataset.push_child(
            XmlElement::new("DataRow")
                .with_child(column("ImageID", &id.to_string()))
                .with_child(column("Name", &payload.name))
                .with_child(column("Type", "Bitmap"))
                .with_child(bitmap_column("Image", &payload.data)),
        );
        debug!(image = payload.name.as_str(), id; "Embedded image");
        true
    }

    /// Append the toolbox entry of `element` to the open toolbox.
    pub fn set_toolbox_node_elements(&mut self, element: &ClassifiedElement) -> Result<(), MoproError> {
        let profile = self.identity.name().to_string();
        let toolbox = self.toolbox.as_mut().ok_or_else(no_open_toolbox)?;
        let page = if element.is_relationship() {
            "Relationships"
        } else {
            "Elements"
        };
        let page_name = format!("{} {page}", toolbox.diagram);

        let tag = XmlElement::new("Tag")
            .with_attr(
                "name",
                encode_spaces(&format!(
                    "{profile}::{}({UML_NAMESPACE}::{})",
                    element.name(),
                    element.ancestor().uml_type()
                )),
            )
            .with_attr("type", "")
            .with_attr("description", "")
            .with_attr("unit", "")
            .with_attr("values", "")
            .with_attr("default", element.name());

        toolbox
            .root
            .path_mut(&["Content", "Stereotypes"])
            .and_then(|stereotypes| stereotypes.find_child_mut("Stereotype", "name", &page_name))
            .and_then(|page| page.child_mut("TaggedValues"))
            .ok_or_else(|| MoproError::Template(format!("toolbox page `{page_name}` not found")))?
            .push_child(tag);
        Ok(())
    }

    /// Finish building. A toolbox still open is appended first.
    pub fn finish(mut self) -> Result<ProfileDocument, MoproError> {
        if self.toolbox.is_some() {
            self.append_diagram_toolbox()?;
        }
        Ok(ProfileDocument::new(self.identity.name(), self.root))
    }

    fn stereotype(&self, element: &ClassifiedElement) -> Result<XmlElement, MoproError> {
        let mut stereotype = XmlElement::new("Stereotype")
            .with_attr("name", element.name())
            .with_attr("notes", element.notes())
            .with_attr("cx", "0")
            .with_attr("cy", "0");

        if let Some(styling) = element.styling() {
            stereotype.set_attr("csmElement", format!("{}_csm", styling.name()));
        }
        if let Some(base) = self.generalization_target(element) {
            stereotype.set_attr("generalizes", base.as_str());
            stereotype.set_attr("baseStereotypes", base);
        }

        if let Some(script) = element.shapescript() {
            if let Some(encoded) = script.encoded_script()? {
                stereotype.push_child(
                    XmlElement::new("Image")
                        .with_attr("type", "EAShapeScript 1.0")
                        .with_attr("xmlns:dt", DATATYPE_NAMESPACE)
                        .with_attr(DATATYPE_ATTRIBUTE, "bin.base64")
                        .with_text(encoded),
                );
            }
            if let Some(icon) = script.render_icon_payload() {
                stereotype.push_child(bitmap("Icon", &icon));
            }
        }

        if let Some(constraints) = self.metaconstraints(element) {
            stereotype.push_child(constraints);
        }
        if let Some(applies_to) = applies_to(element) {
            stereotype.push_child(applies_to);
        }
        if !element.direct_attributes().is_empty() {
            let tags = element.direct_attributes().iter().fold(
                XmlElement::new("TaggedValues"),
                |tags, attribute| {
                    tags.with_child(
                        XmlElement::new("Tag")
                            .with_attr("name", attribute.name())
                            .with_attr("type", attribute.attribute_type())
                            .with_attr("description", "")
                            .with_attr("unit", "")
                            .with_attr("values", "")
                            .with_attr("default", attribute.default_value()),
                    )
                },
            );
            stereotype.push_child(tags);
        }

        trace!(stereotype = element.name(); "Built stereotype");
        Ok(stereotype)
    }

    /// `UML::<base>` for baseline-anchored elements, `<profile>::<base>`
    /// otherwise; only when both a base stereotype and a parent exist.
    fn generalization_target(&self, element: &ClassifiedElement) -> Option<String> {
        let base = element.base_stereotype()?;
        element.parent()?;
        let namespace = if element.in_uml_baseline() || element.parent_in_uml_baseline() {
            UML_NAMESPACE
        } else {
            self.identity.name()
        };
        Some(encode_spaces(&format!("{namespace}::{base}")))
    }

    fn metaconstraints(&self, element: &ClassifiedElement) -> Option<XmlElement> {
        let constraints = element.metaconstraints();
        if constraints.is_empty() || !associations::has_uml_role(constraints) {
            return None;
        }
        let block = constraints
            .iter()
            .filter(|(role, _)| associations::UML_ROLE_KEYS.contains(&role.as_str()))
            .fold(XmlElement::new("metaconstraints"), |block, (role, constraint)| {
                let mut entry = XmlElement::new("metaconstraint")
                    .with_attr("umlRole", role.as_str())
                    .with_attr(
                        "constraint",
                        format!("{}::{}", self.identity.name(), constraint.element_name()),
                    );
                if !constraint.cardinality().is_empty() {
                    entry.set_attr("cardinality", constraint.cardinality());
                }
                block.with_child(entry)
            });
        Some(block)
    }
}

/// The UML type a stereotype extends.
fn applies_to(element: &ClassifiedElement) -> Option<XmlElement> {
    let apply = if !element.is_dsl() {
        XmlElement::new("Apply").with_attr("type", "Class")
    } else if !element.ancestor().is_self() {
        let mut apply = XmlElement::new("Apply").with_attr("type", element.ancestor().name());
        if let Some(direction) = element.relation_direction() {
            apply.push_child(property("direction", direction.host_label()));
        }
        apply
    } else {
        return None;
    };
    Some(XmlElement::new("AppliesTo").with_child(apply))
}

fn section<'d>(root: &'d mut XmlElement, path: &[&str]) -> Result<&'d mut XmlElement, MoproError> {
    root.path_mut(path)
        .ok_or_else(|| MoproError::Template(format!("document is missing `{}`", path.join("/"))))
}

fn no_open_toolbox() -> MoproError {
    MoproError::Template("no diagram toolbox is open".to_string())
}

fn property(name: &str, value: &str) -> XmlElement {
    XmlElement::new("Property")
        .with_attr("name", name)
        .with_attr("value", value)
}

fn column(name: &str, value: &str) -> XmlElement {
    XmlElement::new("Column")
        .with_attr("name", name)
        .with_attr("value", value)
}

fn bitmap_column(name: &str, data: &str) -> XmlElement {
    XmlElement::new("Column")
        .with_attr("name", name)
        .with_attr("xmlns:dt", DATATYPE_NAMESPACE)
        .with_attr(DATATYPE_ATTRIBUTE, "bin.base64")
        .with_text(data)
}

fn bitmap(element: &str, data: &str) -> XmlElement {
    XmlElement::new(element)
        .with_attr("type", "bitmap")
        .with_attr("xmlns:dt", DATATYPE_NAMESPACE)
        .with_attr(DATATYPE_ATTRIBUTE, "bin.base64")
        .with_text(data)
}

fn encode_spaces(name: &str) -> String {
    name.replace(' ', "%20")
}
