//! The finished profile document and its persistence.

use std::{fs, path::Path};

use log::info;
use quick_xml::events::{BytesDecl, Event};

use crate::{
    MoproError,
    profile::{
        builder::DATATYPE_ATTRIBUTE,
        xml::{self, XmlElement},
    },
};

/// XML version declared by every document.
pub const XML_VERSION: &str = "1.0";

/// Encoding declared by every document. Non-ASCII text is written as
/// character references, so the bytes are valid in it.
pub const XML_ENCODING: &str = "windows-1252";

/// An assembled MDG Technology document.
#[derive(Debug, Clone)]
pub struct ProfileDocument {
    name: String,
    root: XmlElement,
}

impl ProfileDocument {
    pub(crate) fn new(name: impl Into<String>, root: XmlElement) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// The technology name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// `<name> Profile.xml`
    pub fn default_file_name(&self) -> String {
        format!("{} Profile.xml", self.name)
    }

    /// Serialize the document. Payload datatype attributes are written in
    /// their namespaced `dt:dt` form.
    ///
    /// # Errors
    ///
    /// Returns an error when the tree cannot be written out.
    pub fn to_xml_string(&self) -> Result<String, MoproError> {
        let mut writer = xml::indented_writer();
        writer.write_event(Event::Decl(BytesDecl::new(
            XML_VERSION,
            Some(XML_ENCODING),
            None,
        )))?;
        self.root.write_to(&mut writer)?;

        let mut out = xml::into_string(writer)?;
        out.push('\n');
        Ok(out.replace(
            &format!(" {DATATYPE_ATTRIBUTE}=\""),
            &format!(" {DATATYPE_ATTRIBUTE}:{DATATYPE_ATTRIBUTE}=\""),
        ))
    }

    /// Write the document to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`MoproError::PermissionDenied`] when the location is not
    /// writable and [`MoproError::Persist`] for any other write failure.
    pub fn save(&self, path: &Path) -> Result<(), MoproError> {
        fs::write(path, self.to_xml_string()?)
            .map_err(|err| MoproError::from_persist(path, err))?;
        info!(path = path.display().to_string(); "Profile saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> ProfileDocument {
        let root = XmlElement::new("MDG.Technology").with_child(
            XmlElement::new("Image")
                .with_attr("xmlns:dt", "urn:schemas-microsoft-com:datatypes")
                .with_attr(DATATYPE_ATTRIBUTE, "bin.base64")
                .with_text("AAAA"),
        );
        ProfileDocument::new("Shop", root)
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(document().default_file_name(), "Shop Profile.xml");
    }

    #[test]
    fn test_serialization_patches_datatype() {
        let xml = document().to_xml_string().unwrap();
        assert!(xml.starts_with(
            "<?xml version=\"1.0\" encoding=\"windows-1252\"?>\n<MDG.Technology>\n  <Image "
        ));
        assert!(xml.ends_with("</MDG.Technology>\n"));
        assert!(xml.contains(r#" dt:dt="bin.base64""#));
        assert!(xml.contains(r#" xmlns:dt="urn:schemas-microsoft-com:datatypes""#));
        assert!(!xml.contains(r#" dt="bin.base64""#));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Shop Profile.xml");
        fs::write(&path, "stale").unwrap();
        document().save(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("<MDG.Technology>"));
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xml");
        let err = document().save(&path).unwrap_err();
        assert!(matches!(err, MoproError::Persist { .. }));
    }
}
