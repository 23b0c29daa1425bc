//! Rendering-script generation.
//!
//! A styling element's resolved [`StyleProperties`] select one of three
//! generators, in priority order:
//!
//! 1. an `imgRelPath` property draws the entity from a bitmap ([`ImageShapescript`]),
//! 2. a `shape` property draws a geometric outline ([`NativeShapescript`]),
//! 3. a `lineStyle` property draws a connector ([`RelationshipShapescript`]).
//!
//! Every generator honors a `customShapescript` property starting with
//! `shape main`, which replaces the generated text verbatim. The script is
//! packaged with [`encode_script`] before it is embedded in the document.

mod image;
mod native;
mod packaging;
mod properties;
mod relationship;

use std::path::Path;

use log::trace;

use mopro_core::style::{StyleProperties, keys};

use crate::{MoproError, payload};

pub use image::ImageShapescript;
pub use native::NativeShapescript;
pub use packaging::{SCRIPT_ENTRY_NAME, encode_script};
pub use properties::CommonProperties;
pub use relationship::RelationshipShapescript;

/// Prefix every complete rendering script starts with.
pub const ENTRY_SHAPE_MARKER: &str = "shape main";

/// A base64 bitmap the document stores in its image table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub name: String,
    pub data: String,
}

/// One rendering-script generator.
pub trait Shapescript {
    /// Build the generator from resolved style properties; relative paths
    /// are resolved against `base_dir`.
    fn ingest(style: &StyleProperties, base_dir: Option<&Path>) -> Self
    where
        Self: Sized;

    /// Properties shared by every generator.
    fn common(&self) -> &CommonProperties;

    /// The generated script, ignoring any custom override.
    fn generate(&self) -> String;

    /// Bitmap to register in the image table.
    fn image_payload(&self) -> Option<ImagePayload> {
        None
    }
}

/// The generator chosen for a styling element.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapescriptBuilder {
    Image(ImageShapescript),
    NativeEntity(NativeShapescript),
    Relationship(RelationshipShapescript),
}

impl ShapescriptBuilder {
    /// Select a generator for `style`, or `None` when it carries none of the
    /// selecting properties.
    pub fn from_style(style: &StyleProperties, base_dir: Option<&Path>) -> Option<Self> {
        let builder = if style.contains(keys::IMG_REL_PATH) {
            Self::Image(ImageShapescript::ingest(style, base_dir))
        } else if style.contains(keys::SHAPE) {
            Self::NativeEntity(NativeShapescript::ingest(style, base_dir))
        } else if style.contains(keys::LINE_STYLE) {
            Self::Relationship(RelationshipShapescript::ingest(style, base_dir))
        } else {
            return None;
        };
        trace!(kind = builder.kind(); "Selected rendering script generator");
        Some(builder)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::NativeEntity(_) => "native",
            Self::Relationship(_) => "relationship",
        }
    }

    fn generator(&self) -> &dyn Shapescript {
        match self {
            Self::Image(script) => script,
            Self::NativeEntity(script) => script,
            Self::Relationship(script) => script,
        }
    }

    /// Final script text: the custom override if present, else the generated one.
    pub fn render_script(&self) -> String {
        let generator = self.generator();
        match generator.common().custom_script() {
            Some(custom) => custom.to_string(),
            None => generator.generate(),
        }
    }

    /// Bitmap for the image table, only for image-based entities whose file
    /// could be read.
    pub fn render_image_payload(&self) -> Option<ImagePayload> {
        self.generator().image_payload()
    }

    /// Base64 toolbox icon, if one is configured and readable.
    pub fn render_icon_payload(&self) -> Option<String> {
        let path = self.generator().common().toolbox_icon()?;
        if !path.is_file() {
            return None;
        }
        payload::read_base64(path)
    }

    /// The packaged script, or `None` when there is nothing to draw.
    pub fn encoded_script(&self) -> Result<Option<String>, MoproError> {
        let script = self.render_script();
        if script.is_empty() {
            return Ok(None);
        }
        encode_script(&script).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_selection_priority() {
        let style = StyleProperties::new()
            .with("lineStyle", "dash")
            .with("shape", "rectangle")
            .with("imgRelPath", "a.bmp");
        let builder = ShapescriptBuilder::from_style(&style, None).unwrap();
        assert_eq!(builder.kind(), "image");

        let style = StyleProperties::new()
            .with("lineStyle", "dash")
            .with("shape", "rectangle");
        let builder = ShapescriptBuilder::from_style(&style, None).unwrap();
        assert_eq!(builder.kind(), "native");

        let style = StyleProperties::new().with("lineStyle", "dash");
        let builder = ShapescriptBuilder::from_style(&style, None).unwrap();
        assert_eq!(builder.kind(), "relationship");
    }

    #[test]
    fn test_no_selecting_property() {
        let style = StyleProperties::new().with("fillColor", "1,2,3");
        assert!(ShapescriptBuilder::from_style(&style, None).is_none());
    }

    #[test]
    fn test_custom_script_overrides_every_variant() {
        let custom = "shape main{ellipse(0,0,50,50);}";
        for selector in ["imgRelPath", "shape", "lineStyle"] {
            let style = StyleProperties::new()
                .with(selector, "x")
                .with("customShapescript", custom);
            let builder = ShapescriptBuilder::from_style(&style, None).unwrap();
            assert_eq!(builder.render_script(), custom, "{selector}");
        }
    }

    #[test]
    fn test_empty_image_script_is_not_packaged() {
        let style = StyleProperties::new().with("imgRelPath", "");
        let builder = ShapescriptBuilder::from_style(&style, None).unwrap();
        assert_eq!(builder.encoded_script().unwrap(), None);
    }

    #[test]
    fn test_native_script_is_packaged() {
        let style = StyleProperties::new().with("shape", "native");
        let builder = ShapescriptBuilder::from_style(&style, None).unwrap();
        assert!(builder.encoded_script().unwrap().is_some());
        assert!(builder.render_image_payload().is_none());
    }

    #[test]
    fn test_icon_payload() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("icon.bmp"), b"BM").unwrap();
        let style = StyleProperties::new()
            .with("shape", "rectangle")
            .with("toolboxIconRelPath", "icon.bmp");
        let builder = ShapescriptBuilder::from_style(&style, Some(dir.path())).unwrap();
        assert_eq!(builder.render_icon_payload().as_deref(), Some("Qk0="));

        let style = StyleProperties::new()
            .with("shape", "rectangle")
            .with("toolboxIconRelPath", "missing.bmp");
        let builder = ShapescriptBuilder::from_style(&style, Some(dir.path())).unwrap();
        assert!(builder.render_icon_payload().is_none());
    }
}
