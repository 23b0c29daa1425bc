//! Style properties shared by the rendering-script variants.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use log::warn;

use mopro_core::{
    color::{NONE_MARKER, ShapeColor},
    style::{
        BASE_DIMENSION, BorderPosition, DEFAULT_THICKNESS, HorizontalAlignment, StyleProperties,
        VerticalAlignment, keys, parse_flag, parse_thickness, scale_dimension,
    },
};

use crate::{payload, shapescript::ENTRY_SHAPE_MARKER};

/// Properties every variant ingests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonProperties {
    fill_color: Option<ShapeColor>,
    show_name: bool,
    stereotype_visible: bool,
    toolbox_icon: Option<PathBuf>,
    custom_script: Option<String>,
}

impl CommonProperties {
    pub fn from_style(style: &StyleProperties, base_dir: Option<&Path>) -> Self {
        let custom_script = style
            .get(keys::CUSTOM_SHAPESCRIPT)
            .filter(|script| *script != NONE_MARKER && script.starts_with(ENTRY_SHAPE_MARKER))
            .map(str::to_string);

        Self {
            fill_color: style.get(keys::FILL_COLOR).and_then(ShapeColor::parse),
            show_name: style.get(keys::SHOW_NAME).is_some_and(parse_flag),
            stereotype_visible: style.get(keys::STEREOTYPE_VISIBLE).is_some_and(parse_flag),
            toolbox_icon: style
                .get(keys::TOOLBOX_ICON_REL_PATH)
                .and_then(|rel| payload::resolve_asset_path(base_dir, rel)),
            custom_script,
        }
    }

    pub fn fill_color(&self) -> Option<&ShapeColor> {
        self.fill_color.as_ref()
    }

    pub fn show_name(&self) -> bool {
        self.show_name
    }

    pub fn stereotype_visible(&self) -> bool {
        self.stereotype_visible
    }

    pub fn toolbox_icon(&self) -> Option<&Path> {
        self.toolbox_icon.as_deref()
    }

    /// A complete replacement script, if the style supplies one.
    pub fn custom_script(&self) -> Option<&str> {
        self.custom_script.as_deref()
    }

    /// `setFillColor(..);` or nothing.
    pub fn fill_color_directive(&self) -> String {
        color_directive("setFillColor", self.fill_color.as_ref())
    }

    /// Compartment printing `<<stereotype>>` above the shape, if visible.
    pub fn stereotype_compartment(&self) -> String {
        if !self.stereotype_visible {
            return String::new();
        }
        concat!(
            "addsubshape(\"stereotypecompartment\", \"N\");",
            "shape stereotypecompartment{",
            "h_align = \"center\";",
            "v_align = \"top\";",
            "preferredheight=30;",
            "editablefield = \"stereotype\";",
            "println(\"<<#stereotype#>>\");",
            "}"
        )
        .to_string()
    }
}

/// Size and label placement of entity shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityProperties {
    width: i32,
    height: i32,
    h_align: HorizontalAlignment,
    v_align: VerticalAlignment,
}

impl Default for EntityProperties {
    fn default() -> Self {
        Self {
            width: BASE_DIMENSION,
            height: BASE_DIMENSION,
            h_align: HorizontalAlignment::default(),
            v_align: VerticalAlignment::default(),
        }
    }
}

impl EntityProperties {
    /// Read size factors and horizontal name alignment.
    pub fn from_style(style: &StyleProperties) -> Self {
        Self {
            width: scaled(style, keys::RELATIVE_WIDTH),
            height: scaled(style, keys::RELATIVE_HEIGHT),
            h_align: parse_or_default(style, keys::NAME_ALIGNMENT_HORIZONTAL),
            v_align: VerticalAlignment::default(),
        }
    }

    /// Also read the vertical name alignment.
    pub fn with_vertical_alignment(mut self, style: &StyleProperties) -> Self {
        self.v_align = parse_or_default(style, keys::NAME_ALIGNMENT_VERTICAL);
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// `defSize(w,h);`
    pub fn size_directive(&self) -> String {
        format!("defSize({},{});", self.width, self.height)
    }

    /// Compartment printing the element name at `position`, if shown.
    pub fn name_compartment(&self, common: &CommonProperties, position: BorderPosition) -> String {
        if !common.show_name() {
            return String::new();
        }
        format!(
            "addsubshape(\"namecompartment\", \"{position}\");\
             shape namecompartment{{\
             h_align = \"{}\";\
             v_align = \"{}\";\
             editablefield = \"name\";\
             println(\"#name#\");\
             }}",
            self.h_align, self.v_align
        )
    }
}

/// `<directive>(..);` for a set color, otherwise nothing.
pub fn color_directive(directive: &str, color: Option<&ShapeColor>) -> String {
    color.map_or_else(String::new, |color| format!("{directive}({color});"))
}

/// Parse an enumerated style value, keeping the default when it is absent or
/// not recognized.
pub fn parse_or_default<T>(style: &StyleProperties, key: &str) -> T
where
    T: FromStr<Err = String> + Default,
{
    match style.get(key).map(str::parse::<T>) {
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            warn!(key = key, err:% = err; "Ignoring unrecognized style value");
            T::default()
        }
        None => T::default(),
    }
}

/// Pen width from `key`, falling back to the default width.
pub fn thickness(style: &StyleProperties, key: &str) -> String {
    let Some(raw) = style.get(key) else {
        return DEFAULT_THICKNESS.to_string();
    };
    parse_thickness(raw).unwrap_or_else(|err| {
        warn!(key = key, err:% = err; "Ignoring line thickness");
        DEFAULT_THICKNESS.to_string()
    })
}

fn scaled(style: &StyleProperties, key: &str) -> i32 {
    let Some(factor) = style.get(key) else {
        return BASE_DIMENSION;
    };
    scale_dimension(BASE_DIMENSION, factor).unwrap_or_else(|err| {
        warn!(key = key, err:% = err; "Ignoring relative size");
        BASE_DIMENSION
    })
}

#[cfg(test)]
mod tests {
    use mopro_core::style::LineStyle;

    use super::*;

    fn style(pairs: &[(&str, &str)]) -> StyleProperties {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_flags_absent_are_false() {
        let common = CommonProperties::from_style(&style(&[]), None);
        assert!(!common.show_name());
        assert!(!common.stereotype_visible());
        assert!(common.fill_color().is_none());
        assert_eq!(common.stereotype_compartment(), "");
    }

    #[test]
    fn test_flags_true_unless_false() {
        let common = CommonProperties::from_style(
            &style(&[("showName", "yes"), ("stereotypeVisible", "false")]),
            None,
        );
        assert!(common.show_name());
        assert!(!common.stereotype_visible());
    }

    #[test]
    fn test_custom_script_requires_entry_marker() {
        let accepted = CommonProperties::from_style(
            &style(&[("customShapescript", "shape main{rectangle(0,0,1,1);}")]),
            None,
        );
        assert_eq!(
            accepted.custom_script(),
            Some("shape main{rectangle(0,0,1,1);}")
        );

        for rejected in ["!none", "shape other{}", ""] {
            let common =
                CommonProperties::from_style(&style(&[("customShapescript", rejected)]), None);
            assert!(common.custom_script().is_none(), "{rejected}");
        }
    }

    #[test]
    fn test_toolbox_icon_resolved_against_base_dir() {
        let common = CommonProperties::from_style(
            &style(&[("toolboxIconRelPath", "icons\\gate.bmp")]),
            Some(Path::new("/models")),
        );
        assert_eq!(
            common.toolbox_icon(),
            Some(Path::new("/models/icons/gate.bmp"))
        );
    }

    #[test]
    fn test_entity_scaling() {
        let entity = EntityProperties::from_style(&style(&[
            ("relativeWidth", "1.5"),
            ("relativeHeight", "0.5"),
        ]));
        assert_eq!(entity.size_directive(), "defSize(150,50);");
    }

    #[test]
    fn test_entity_invalid_scale_ignored() {
        let entity = EntityProperties::from_style(&style(&[("relativeWidth", "wide")]));
        assert_eq!(entity.width(), 100);
    }

    #[test]
    fn test_name_compartment() {
        let common = CommonProperties::from_style(&style(&[("showName", "true")]), None);
        let entity = EntityProperties::from_style(&style(&[("nameAlignmentHorizontal", "left")]));
        assert_eq!(
            entity.name_compartment(&common, BorderPosition::South),
            "addsubshape(\"namecompartment\", \"S\");shape namecompartment{h_align = \"left\";v_align = \"top\";editablefield = \"name\";println(\"#name#\");}"
        );
    }

    #[test]
    fn test_vertical_alignment_only_when_requested() {
        let props = style(&[("nameAlignmentVertical", "bottom")]);
        let common = CommonProperties::from_style(&style(&[("showName", "true")]), None);
        let plain = EntityProperties::from_style(&props);
        assert!(plain.name_compartment(&common, BorderPosition::Center).contains("v_align = \"top\""));
        let native = plain.with_vertical_alignment(&props);
        assert!(native.name_compartment(&common, BorderPosition::Center).contains("v_align = \"bottom\""));
    }

    #[test]
    fn test_thickness_default_and_invalid() {
        assert_eq!(thickness(&style(&[]), "lineThickness"), "1.0");
        assert_eq!(thickness(&style(&[("lineThickness", "thick")]), "lineThickness"), "1.0");
        assert_eq!(thickness(&style(&[("lineThickness", "2.5")]), "lineThickness"), "2.5");
    }

    #[test]
    fn test_parse_or_default_keeps_default() {
        let props = style(&[("lineStyle", "wavy")]);
        assert_eq!(parse_or_default::<LineStyle>(&props, "lineStyle"), LineStyle::Solid);
        assert_eq!(parse_or_default::<LineStyle>(&props, "borderLineStyle"), LineStyle::Solid);
    }
}
