//! Entities drawn with a geometric outline.

use std::path::Path;

use mopro_core::{
    color::ShapeColor,
    style::{BorderPosition, GeometricShape, LineStyle, StyleProperties, keys},
};

use crate::shapescript::{
    Shapescript,
    properties::{self, CommonProperties, EntityProperties},
};

/// Rendering script for an entity drawn as a rectangle, an ellipse or the
/// host tool's native shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeShapescript {
    common: CommonProperties,
    entity: EntityProperties,
    shape: GeometricShape,
    border_color: Option<ShapeColor>,
    border_line_style: LineStyle,
    border_thickness: String,
}

impl NativeShapescript {
    pub fn shape(&self) -> GeometricShape {
        self.shape
    }

    fn outline(&self) -> &'static str {
        match self.shape {
            GeometricShape::Rectangle => "rectangle(0,0,100,100);",
            GeometricShape::Ellipsis => "ellipse(0,0,100,100);",
            GeometricShape::Native => "drawnativeshape();",
        }
    }
}

impl Shapescript for NativeShapescript {
    fn ingest(style: &StyleProperties, base_dir: Option<&Path>) -> Self {
        Self {
            common: CommonProperties::from_style(style, base_dir),
            entity: EntityProperties::from_style(style).with_vertical_alignment(style),
            shape: properties::parse_or_default(style, keys::SHAPE),
            border_color: style.get(keys::BORDER_COLOR).and_then(ShapeColor::parse),
            border_line_style: properties::parse_or_default(style, keys::BORDER_LINE_STYLE),
            border_thickness: properties::thickness(style, keys::BORDER_LINE_THICKNESS),
        }
    }

    fn common(&self) -> &CommonProperties {
        &self.common
    }

    fn generate(&self) -> String {
        // The native shape draws its own compartments.
        let (stereotype, name) = if self.shape == GeometricShape::Native {
            (String::new(), String::new())
        } else {
            (
                self.common.stereotype_compartment(),
                self.entity
                    .name_compartment(&self.common, BorderPosition::Center),
            )
        };

        format!(
            "shape main{{layouttype= \"border\";v_align= \"CENTER\";h_align= \"CENTER\";\
             {size}{fill}setlinestyle(\"{line}\");{pen}setPenWidth({width});\
             {outline}{stereotype}{name}}}",
            size = self.entity.size_directive(),
            fill = self.common.fill_color_directive(),
            line = self.border_line_style,
            pen = properties::color_directive("setPenColor", self.border_color.as_ref()),
            width = self.border_thickness,
            outline = self.outline(),
        )
    }
}
