//! Document skeletons.
//!
//! Placeholders are written `${NAME}` and replaced by XML-escaped values
//! before the text is parsed.

use crate::{MoproError, profile::xml::{XmlElement, escape_markup}};

pub const PROFILE_ID: &str = "PROFILE_ID";
pub const PROFILE_GUID: &str = "PROFILE_GUID";
pub const PROFILE_NAME: &str = "PROFILE_NAME";
pub const PROFILE_VERSION: &str = "PROFILE_VERSION";
pub const PROFILE_NOTES: &str = "PROFILE_NOTES";
pub const INFO_URL: &str = "INFO_URL";
pub const SUPPORT_URL: &str = "SUPPORT_URL";
pub const DIAGRAM_NAME: &str = "DIAGRAM_NAME";

const PLACEHOLDER_OPEN: &str = "${";
const PLACEHOLDER_CLOSE: char = '}';

/// Skeleton of the whole technology document.
pub const TECHNOLOGY_TEMPLATE: &str = r#"<?xml version="1.0" encoding="windows-1252"?>
<MDG.Technology version="1.0">
  <Documentation id="${PROFILE_ID}" name="${PROFILE_NAME}" version="${PROFILE_VERSION}" notes="${PROFILE_NOTES}" infoURI="${INFO_URL}" supportURI="${SUPPORT_URL}"/>
  <UMLProfiles>
    <UMLProfile profiletype="uml2">
      <Documentation id="${PROFILE_GUID}" name="${PROFILE_NAME}" version="1.0" notes="My created ${PROFILE_NAME} Profile."/>
      <Content>
        <Stereotypes>
        </Stereotypes>
        <TaggedValueTypes/>
      </Content>
    </UMLProfile>
  </UMLProfiles>
  <Images><RefData version="1.0" exporter="EA.25"><DataSet name="Model Images" table="t_image" filter="Name='#Name#'" stoplist=";ImageID;">
  </DataSet></RefData></Images>
  <DiagramProfile>
    <UMLProfile profiletype="uml2">
      <Documentation id="B4F563A7-8" name="${PROFILE_NAME} Diagrams" version="1.0" notes="My ${PROFILE_NAME} Profile Diagrams."/>
      <Content>
        <Stereotypes>
        </Stereotypes>
        <TaggedValueTypes/>
      </Content>
    </UMLProfile>
  </DiagramProfile>
  <UIToolboxes>
  </UIToolboxes>
</MDG.Technology>
"#;

/// Skeleton of one diagram's toolbox.
pub const TOOLBOX_TEMPLATE: &str = r#"<UMLProfile profiletype="uml2">
  <Documentation id="5C1D493F-F" name="${DIAGRAM_NAME} Toolbox" version="1.0" notes="My ${DIAGRAM_NAME} Profile Toolbox."/>
  <Content>
    <Stereotypes>
      <Stereotype name="${DIAGRAM_NAME} Elements" notes="" bgcolor="-1" fontcolor="-1" bordercolor="-1" borderwidth="-1" hideicon="0">
        <AppliesTo>
          <Apply type="ToolboxPage"/>
        </AppliesTo>
        <TaggedValues>
        </TaggedValues>
      </Stereotype>
      <Stereotype name="${DIAGRAM_NAME} Relationships" notes="" bgcolor="-1" fontcolor="-1" bordercolor="-1" borderwidth="-1" hideicon="0">
        <AppliesTo>
          <Apply type="ToolboxPage"/>
        </AppliesTo>
        <TaggedValues>
        </TaggedValues>
      </Stereotype>
    </Stereotypes>
    <TaggedValueTypes/>
  </Content>
</UMLProfile>
"#;

/// Substitute `values` into `template` and parse the result.
///
/// Only the template's own placeholders are expanded. Substituted values are
/// never scanned again, so they may contain `${` themselves.
///
/// # Errors
///
/// Returns [`MoproError::Template`] when a placeholder has no value or the
/// result is not well-formed.
pub fn instantiate(template: &str, values: &[(&str, &str)]) -> Result<XmlElement, MoproError> {
    let mut text = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        text.push_str(&rest[..start]);
        let after = &rest[start + PLACEHOLDER_OPEN.len()..];
        let end = after
            .find(PLACEHOLDER_CLOSE)
            .ok_or_else(|| MoproError::Template("unterminated placeholder".to_string()))?;
        let name = &after[..end];
        let value = values
            .iter()
            .find_map(|(key, value)| (*key == name).then_some(*value))
            .ok_or_else(|| {
                MoproError::Template(format!("unfilled placeholder `${{{name}}}`"))
            })?;
        text.push_str(&escape_markup(value));
        rest = &after[end + PLACEHOLDER_CLOSE.len_utf8()..];
    }
    text.push_str(rest);
    XmlElement::parse(&text)
}
