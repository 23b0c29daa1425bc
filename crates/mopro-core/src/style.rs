//! Style property interpretation.
//!
//! A styling element carries its visual properties as a flat map of attribute
//! names to raw strings. This module names the recognized keys and turns raw
//! values into the enumerations and numbers the rendering scripts need.
//!
//! # Overview
//!
//! - [`StyleProperties`]: the resolved name to value map of one styling element
//! - [`LineStyle`], [`ArrowStyle`], [`GeometricShape`]: enumerated drawing styles
//! - [`HorizontalAlignment`], [`VerticalAlignment`], [`BorderPosition`]: label placement
//! - [`RelationDirection`]: connector directionality and its host-tool label
//! - [`parse_flag`], [`scale_dimension`], [`parse_thickness`]: scalar helpers
//!
//! Enumerations parse with [`FromStr`]; the `as_str` form is exactly the text
//! written into a rendering script.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;

/// Recognized style property names.
pub mod keys {
    pub const FILL_COLOR: &str = "fillColor";
    pub const SHOW_NAME: &str = "showName";
    pub const STEREOTYPE_VISIBLE: &str = "stereotypeVisible";
    pub const TOOLBOX_ICON_REL_PATH: &str = "toolboxIconRelPath";
    pub const NAME_ALIGNMENT_HORIZONTAL: &str = "nameAlignmentHorizontal";
    pub const NAME_ALIGNMENT_VERTICAL: &str = "nameAlignmentVertical";
    pub const RELATIVE_HEIGHT: &str = "relativeHeight";
    pub const RELATIVE_WIDTH: &str = "relativeWidth";
    pub const ARROW_STYLE_SOURCE: &str = "arrowStyleSource";
    pub const ARROW_STYLE_TARGET: &str = "arrowStyleTarget";
    pub const LINE_STYLE: &str = "lineStyle";
    pub const LINE_THICKNESS: &str = "lineThickness";
    pub const RELATION_DIRECTION: &str = "relationDirection";
    pub const IMG_REL_PATH: &str = "imgRelPath";
    pub const BORDER_COLOR: &str = "borderColor";
    pub const BORDER_LINE_STYLE: &str = "borderLineStyle";
    pub const BORDER_LINE_THICKNESS: &str = "borderLineThickness";
    pub const SHAPE: &str = "shape";
    pub const CUSTOM_SHAPESCRIPT: &str = "customShapescript";
}

/// Edge length of an entity shape before relative scaling.
pub const BASE_DIMENSION: i32 = 100;

/// Pen width used when none (or an invalid one) is given.
pub const DEFAULT_THICKNESS: &str = "1.0";

/// The fully resolved style attributes of one styling element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleProperties {
    values: IndexMap<String, String>,
}

impl StyleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a property.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over properties in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<IndexMap<String, String>> for StyleProperties {
    fn from(values: IndexMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Generates `as_str`, `Display` and `FromStr` for a unit enum whose textual
/// form is fixed.
macro_rules! style_enum {
    ($name:ident, $what:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// The textual form used in style values and rendering scripts.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => {
                        let valid: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        Err(format!(
                            "invalid {} `{s}`, valid values: {}",
                            $what,
                            valid.join(", ")
                        ))
                    }
                }
            }
        }
    };
}

/// Stroke pattern of a line or border.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Dash,
    Dot,
    #[default]
    Solid,
    DashDot,
    DashDotDot,
    DashDotDotDot,
    DashGap,
    DotGap,
    DashDotGap,
    DashDotDotGap,
    DashDotDotDotGap,
}

style_enum!(LineStyle, "line style", {
    Dash => "dash",
    Dot => "dot",
    Solid => "solid",
    DashDot => "dashdot",
    DashDotDot => "dashdotdot",
    DashDotDotDot => "dashdotdotdot",
    DashGap => "dashgap",
    DotGap => "dotgap",
    DashDotGap => "dashdotgap",
    DashDotDotGap => "dashdotdotgap",
    DashDotDotDotGap => "dashdotdotdotgap",
});

/// Arrowhead drawn at a connector end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArrowStyle {
    Arrow,
    CircleCross,
    Diamond,
    DiamondFilled,
    #[default]
    None,
    Triangle,
    TriangleFilled,
}

style_enum!(ArrowStyle, "arrow style", {
    Arrow => "arrow",
    CircleCross => "circleCross",
    Diamond => "diamond",
    DiamondFilled => "diamondFilled",
    None => "none",
    Triangle => "triangle",
    TriangleFilled => "triangleFilled",
});

impl ArrowStyle {
    /// Returns true if the arrowhead is filled with the fill color.
    pub fn is_filled(&self) -> bool {
        matches!(self, Self::DiamondFilled | Self::TriangleFilled)
    }
}

/// Outline of a native-geometry entity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GeometricShape {
    Ellipsis,
    Rectangle,
    /// The host tool's own default look.
    #[default]
    Native,
}

style_enum!(GeometricShape, "shape", {
    Ellipsis => "ellipsis",
    Rectangle => "rectangle",
    Native => "native",
});

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Center,
    Left,
    Right,
}

style_enum!(HorizontalAlignment, "horizontal alignment", {
    Center => "center",
    Left => "left",
    Right => "right",
});

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Center,
    #[default]
    Top,
    Bottom,
}

style_enum!(VerticalAlignment, "vertical alignment", {
    Center => "center",
    Top => "top",
    Bottom => "bottom",
});

/// Slot of a border layout a compartment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderPosition {
    North,
    South,
    East,
    West,
    Center,
}

style_enum!(BorderPosition, "border position", {
    North => "N",
    South => "S",
    East => "E",
    West => "W",
    Center => "CENTER",
});

/// Directionality of a relationship stereotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationDirection {
    Bidirectional,
    Unidirectional,
    Unspecified,
}

style_enum!(RelationDirection, "relation direction", {
    Bidirectional => "bidirectional",
    Unidirectional => "unidirectional",
    Unspecified => "unspecified",
});

impl RelationDirection {
    /// The label the host tool uses for this direction.
    pub fn host_label(&self) -> &'static str {
        match self {
            Self::Bidirectional => "Bi-Directional",
            Self::Unidirectional => "Source -> Destination",
            Self::Unspecified => "Unspecified",
        }
    }
}

/// Interpret a visibility flag: anything but `false` is true.
///
/// Callers treat an absent key as false.
pub fn parse_flag(raw: &str) -> bool {
    raw != "false"
}

/// Multiply `base` by a relative factor, truncating toward zero.
///
/// # Errors
///
/// Returns an error message if `factor` is not a number.
pub fn scale_dimension(base: i32, factor: &str) -> Result<i32, String> {
    let factor: f32 = factor
        .trim()
        .parse()
        .map_err(|err| format!("invalid relative size `{factor}`: {err}"))?;
    Ok((base as f32 * factor) as i32)
}

/// Validate a pen thickness, returning it unchanged if it is numeric.
///
/// # Errors
///
/// Returns an error message if `raw` is not a number.
pub fn parse_thickness(raw: &str) -> Result<String, String> {
    raw.trim()
        .parse::<f64>()
        .map(|_| raw.trim().to_string())
        .map_err(|err| format!("invalid thickness `{raw}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_style_round_trip_names() {
        for style in LineStyle::ALL {
            assert_eq!(style.as_str().parse::<LineStyle>(), Ok(*style));
        }
        assert_eq!(LineStyle::default(), LineStyle::Solid);
    }

    #[test]
    fn test_line_style_invalid() {
        let err = "wavy".parse::<LineStyle>().unwrap_err();
        assert!(err.contains("invalid line style `wavy`"));
        assert!(err.contains("dashdotdotdotgap"));
    }

    #[test]
    fn test_arrow_style_is_case_sensitive() {
        assert_eq!("circleCross".parse(), Ok(ArrowStyle::CircleCross));
        assert!("circlecross".parse::<ArrowStyle>().is_err());
        assert!(ArrowStyle::TriangleFilled.is_filled());
        assert!(!ArrowStyle::Triangle.is_filled());
    }

    #[test]
    fn test_alignment_defaults() {
        assert_eq!(HorizontalAlignment::default().as_str(), "center");
        assert_eq!(VerticalAlignment::default().as_str(), "top");
        assert_eq!(GeometricShape::default(), GeometricShape::Native);
    }

    #[test]
    fn test_border_position_text() {
        assert_eq!(BorderPosition::South.to_string(), "S");
        assert_eq!(BorderPosition::Center.to_string(), "CENTER");
    }

    #[test]
    fn test_relation_direction_host_label() {
        let direction: RelationDirection = "unidirectional".parse().unwrap();
        assert_eq!(direction.host_label(), "Source -> Destination");
        assert_eq!(RelationDirection::Bidirectional.host_label(), "Bi-Directional");
        assert!("both".parse::<RelationDirection>().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(""));
        assert!(parse_flag("no"));
        assert!(!parse_flag("false"));
    }

    #[test]
    fn test_scale_dimension_truncates() {
        assert_eq!(scale_dimension(BASE_DIMENSION, "1.5"), Ok(150));
        assert_eq!(scale_dimension(BASE_DIMENSION, "0.333"), Ok(33));
        assert_eq!(scale_dimension(BASE_DIMENSION, "2"), Ok(200));
        assert!(scale_dimension(BASE_DIMENSION, "big").is_err());
    }

    #[test]
    fn test_parse_thickness() {
        assert_eq!(parse_thickness("2.5"), Ok("2.5".to_string()));
        assert_eq!(parse_thickness("3"), Ok("3".to_string()));
        assert!(parse_thickness("thick").is_err());
    }

    #[test]
    fn test_style_properties_collect() {
        let props: StyleProperties = [("fillColor", "(1,2,3)"), ("shape", "rectangle")]
            .into_iter()
            .collect();
        assert_eq!(props.get("shape"), Some("rectangle"));
        assert!(props.contains("fillColor"));
        assert!(!props.contains("lineStyle"));
        assert_eq!(props.len(), 2);
    }
}
