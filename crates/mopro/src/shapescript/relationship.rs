//! Connector rendering.
//!
//! A connector is a baseline stroke plus two endpoint shapes. The arrowhead
//! drawn at each end is chosen when the diagram is displayed, from the
//! connector's `Direction` property, so both endpoints carry the same pair of
//! arrow styles and only swap them.

use std::path::Path;

use mopro_core::style::{ArrowStyle, LineStyle, StyleProperties, keys};

use crate::shapescript::{
    Shapescript,
    properties::{self, CommonProperties},
};

const FORWARD: &str = "Source -> Destination";
const BACKWARD: &str = "Destination -> Source";
const BIDIRECTIONAL: &str = "Bi-Directional";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Source,
    Target,
}

impl Endpoint {
    fn shape_name(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }

    /// Direction under which this endpoint shows the source arrow style.
    fn own_direction(self) -> &'static str {
        match self {
            Self::Source => FORWARD,
            Self::Target => BACKWARD,
        }
    }

    fn opposite_direction(self) -> &'static str {
        match self {
            Self::Source => BACKWARD,
            Self::Target => FORWARD,
        }
    }
}

/// Rendering script for a relationship stereotype.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipShapescript {
    common: CommonProperties,
    arrow_source: ArrowStyle,
    arrow_target: ArrowStyle,
    line_style: LineStyle,
    line_thickness: String,
}

impl RelationshipShapescript {
    pub fn arrow_styles(&self) -> (ArrowStyle, ArrowStyle) {
        (self.arrow_source, self.arrow_target)
    }

    fn pen_color(&self) -> String {
        properties::color_directive("setPenColor", self.common.fill_color())
    }

    fn arrowhead(&self, style: ArrowStyle) -> String {
        let outline = match style {
            ArrowStyle::Arrow => "moveto(0, 0);lineto(16, 6);moveto(0, 0);lineto(16, -6);",
            ArrowStyle::CircleCross => {
                "ellipse(0,6,12,-6);moveto(6,6);lineto(6,-6);moveto(0,0);lineto(12,0);"
            }
            ArrowStyle::Diamond | ArrowStyle::DiamondFilled => {
                "moveto(0, 0);lineto(12, 6);lineto(24, 0);lineto(12, -6);lineto(0, 0);"
            }
            ArrowStyle::Triangle | ArrowStyle::TriangleFilled => {
                "moveto(0,0);lineto(16,6);lineto(16,-6);"
            }
            ArrowStyle::None => "",
        };
        let fill = if style.is_filled() {
            self.common.fill_color_directive()
        } else {
            String::new()
        };
        format!(
            "{}setpenwidth(\"{}\");startpath();{outline}{fill}endpath();fillandstrokepath();",
            self.pen_color(),
            self.line_thickness,
        )
    }

    fn endpoint(&self, endpoint: Endpoint) -> String {
        let own = self.arrowhead(self.arrow_source);
        let other = self.arrowhead(self.arrow_target);
        format!(
            "shape {name}{{\
             if(HasProperty(\"Direction\", \"{first}\")) {{{own}}} \
             else if(HasProperty(\"Direction\", \"{second}\")) {{{other}}} \
             else if(HasProperty(\"Direction\", \"{BIDIRECTIONAL}\")) {{{other}}}\
             }}",
            name = endpoint.shape_name(),
            first = endpoint.own_direction(),
            second = endpoint.opposite_direction(),
        )
    }
}

impl Shapescript for RelationshipShapescript {
    fn ingest(style: &StyleProperties, base_dir: Option<&Path>) -> Self {
        Self {
            common: CommonProperties::from_style(style, base_dir),
            arrow_source: properties::parse_or_default(style, keys::ARROW_STYLE_SOURCE),
            arrow_target: properties::parse_or_default(style, keys::ARROW_STYLE_TARGET),
            line_style: properties::parse_or_default(style, keys::LINE_STYLE),
            line_thickness: properties::thickness(style, keys::LINE_THICKNESS),
        }
    }

    fn common(&self) -> &CommonProperties {
        &self.common
    }

    fn generate(&self) -> String {
        format!(
            "shape main{{layouttype= \"border\";setlinestyle(\"{}\");setpenwidth(\"{}\");\
             {}moveto(0,0);lineto(100,0);{}}}{}{}\
             label middlebottomlabel{{println(\"\");}}",
            self.line_style,
            self.line_thickness,
            self.pen_color(),
            self.common.stereotype_compartment(),
            self.endpoint(Endpoint::Source),
            self.endpoint(Endpoint::Target),
        )
    }
}
