//! Color values for rendering scripts.
//!
//! Styling elements store colors as free text. [`ShapeColor::parse`] accepts
//! the encodings modelers actually type and normalizes them to the
//! comma-separated component list the rendering language expects.

use std::{fmt, str::FromStr};

/// Placeholder value meaning "no value set".
pub const NONE_MARKER: &str = "!none";

/// Named color encodings recognized as `<kind>(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorKind {
    Cymk,
    Hex,
    Hext,
    Hsl,
    Hsla,
    Rgb,
    Rgba,
}

impl ColorKind {
    /// All kinds in prefix-matching order.
    pub const ALL: [ColorKind; 7] = [
        Self::Cymk,
        Self::Hex,
        Self::Hext,
        Self::Hsl,
        Self::Hsla,
        Self::Rgb,
        Self::Rgba,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cymk => "cymk",
            Self::Hex => "hex",
            Self::Hext => "hext",
            Self::Hsl => "hsl",
            Self::Hsla => "hsla",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
        }
    }
}

impl FromStr for ColorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!("invalid color kind `{s}`, valid values: cymk, hex, hext, hsl, hsla, rgb, rgba")
            })
    }
}

/// A color as it is written into a rendering script.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeColor(String);

impl ShapeColor {
    /// Parse a raw style value into a color.
    ///
    /// Accepted forms:
    /// - `(r,g,b)`: parentheses are dropped
    /// - `r,g,b` starting with a digit: taken as is
    /// - `<kind>(...)` for any [`ColorKind`]: the text between the parentheses
    ///
    /// Empty input, `!none`, and anything else yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mopro_core::color::ShapeColor;
    ///
    /// assert_eq!(ShapeColor::parse("(255,0,0)").unwrap().as_str(), "255,0,0");
    /// assert_eq!(ShapeColor::parse("rgb(0,128,0)").unwrap().as_str(), "0,128,0");
    /// assert!(ShapeColor::parse("!none").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw == NONE_MARKER {
            return None;
        }

        let has_three_components = raw.split(',').count() == 3;

        if raw.starts_with('(') && raw.ends_with(')') && has_three_components {
            return Some(Self(raw.replace(['(', ')'], "")));
        }

        if raw.starts_with(|c: char| c.is_ascii_digit()) && has_three_components {
            return Some(Self(raw.to_string()));
        }

        if ColorKind::ALL
            .iter()
            .any(|kind| raw.starts_with(kind.as_str()))
        {
            let open = raw.find('(')?;
            let close = raw.find(')')?;
            return (close > open).then(|| Self(raw[open + 1..close].to_string()));
        }

        None
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
