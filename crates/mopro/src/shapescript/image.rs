//! Entities drawn from a bitmap.

use std::path::{Path, PathBuf};

use mopro_core::style::{BorderPosition, StyleProperties, keys};

use crate::{
    payload,
    shapescript::{
        ImagePayload, Shapescript,
        properties::{CommonProperties, EntityProperties},
    },
};

/// Rendering script for an entity whose body is an image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageShapescript {
    common: CommonProperties,
    entity: EntityProperties,
    image: Option<PathBuf>,
}

impl ImageShapescript {
    /// Resolved path of the image, if one was configured.
    pub fn image_path(&self) -> Option<&Path> {
        self.image.as_deref()
    }

    /// Name the script refers to the image by.
    pub fn image_name(&self) -> Option<String> {
        self.image.as_deref().map(payload::asset_stem)
    }
}

impl Shapescript for ImageShapescript {
    fn ingest(style: &StyleProperties, base_dir: Option<&Path>) -> Self {
        Self {
            common: CommonProperties::from_style(style, base_dir),
            entity: EntityProperties::from_style(style),
            image: style
                .get(keys::IMG_REL_PATH)
                .and_then(|rel| payload::resolve_asset_path(base_dir, rel)),
        }
    }

    fn common(&self) -> &CommonProperties {
        &self.common
    }

    fn generate(&self) -> String {
        let Some(name) = self.image_name() else {
            return String::new();
        };
        format!(
            "shape main{{layouttype= \"border\";{}image(\"{name}\",0,0,100,100);{}{}}}",
            self.entity.size_directive(),
            self.common.stereotype_compartment(),
            self.entity
                .name_compartment(&self.common, BorderPosition::South),
        )
    }

    fn image_payload(&self) -> Option<ImagePayload> {
        let path = self.image.as_deref()?;
        let data = payload::read_base64(path)?;
        Some(ImagePayload {
            name: payload::asset_stem(path),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_generate_minimal() {
        let style = StyleProperties::new().with("imgRelPath", "img/gate.bmp");
        let script = ImageShapescript::ingest(&style, Some(Path::new("/m")));
        assert_eq!(
            script.generate(),
            "shape main{layouttype= \"border\";defSize(100,100);image(\"gate\",0,0,100,100);}"
        );
    }

    #[test]
    fn test_generate_with_compartments() {
        let style = StyleProperties::new()
            .with("imgRelPath", "gate.png")
            .with("relativeWidth", "2")
            .with("showName", "true")
            .with("stereotypeVisible", "true");
        let script = ImageShapescript::ingest(&style, None).generate();
        assert!(script.starts_with("shape main{layouttype= \"border\";defSize(200,100);image(\"gate\",0,0,100,100);addsubshape(\"stereotypecompartment\", \"N\");"));
        assert!(script.contains("addsubshape(\"namecompartment\", \"S\");"));
        assert!(script.ends_with("println(\"#name#\");}}"));
    }

    #[test]
    fn test_empty_path_yields_empty_script() {
        let style = StyleProperties::new().with("imgRelPath", "");
        let script = ImageShapescript::ingest(&style, None);
        assert_eq!(script.generate(), "");
        assert!(script.image_payload().is_none());
    }

    #[test]
    fn test_image_payload_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gate.bmp"), b"BM").unwrap();
        let style = StyleProperties::new().with("imgRelPath", "gate.bmp");
        let payload = ImageShapescript::ingest(&style, Some(dir.path()))
            .image_payload()
            .unwrap();
        assert_eq!(payload.name, "gate");
        assert_eq!(payload.data, "Qk0=");
    }

    #[test]
    fn test_missing_image_file_has_no_payload() {
        let dir = tempfile::tempdir().unwrap();
        let style = StyleProperties::new().with("imgRelPath", "absent.bmp");
        let script = ImageShapescript::ingest(&style, Some(dir.path()));
        assert!(script.image_payload().is_none());
        assert!(script.generate().contains("image(\"absent\""));
    }
}
