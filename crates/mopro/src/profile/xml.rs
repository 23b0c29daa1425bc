//! A minimal mutable XML tree.
//!
//! The profile document is built by instantiating a text template, parsing it
//! into this tree, and appending nodes at well-known paths. Attributes keep
//! the order they were set in when the tree is written back out.

use std::{
    borrow::Cow,
    fmt, io,
};

use quick_xml::{
    Reader, Writer,
    escape::escape,
    events::{BytesEnd, BytesStart, BytesText, Event, attributes::Attribute},
    name::QName,
};

use crate::MoproError;

const INDENT_CHAR: u8 = b' ';
const INDENT_SIZE: usize = 2;

/// A node inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`XmlElement::set_attr`].
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.push_child(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Insert `child` directly after the first child element named `after`,
    /// or at the end when there is none.
    pub fn insert_child_after(&mut self, after: &str, child: XmlElement) {
        let position = self
            .children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.name == after))
            .map_or(self.children.len(), |index| index + 1);
        self.children.insert(position, XmlNode::Element(child));
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|element| element.name == name)
    }

    /// Follow a path of first-match child names.
    pub fn path(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |element, name| element.child(name))
    }

    pub fn path_mut(&mut self, path: &[&str]) -> Option<&mut XmlElement> {
        path.iter()
            .try_fold(self, |element, name| element.child_mut(name))
    }

    /// First child element named `name` whose `attr` equals `value`.
    pub fn find_child(&self, name: &str, attr: &str, value: &str) -> Option<&XmlElement> {
        self.elements()
            .find(|element| element.name == name && element.attr(attr) == Some(value))
    }

    pub fn find_child_mut(
        &mut self,
        name: &str,
        attr: &str,
        value: &str,
    ) -> Option<&mut XmlElement> {
        self.elements_mut()
            .find(|element| element.name == name && element.attr(attr) == Some(value))
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Parse a document into its root element.
    ///
    /// Whitespace-only text is dropped. Declarations, comments and
    /// processing instructions are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MoproError::Template`] for malformed or unbalanced input.
    pub fn parse(source: &str) -> Result<Self, MoproError> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;
        loop {
            let event = reader
                .read_event()
                .map_err(|err| template_error(reader.buffer_position(), err))?;
            match event {
                Event::Start(start) => stack.push(element_from(&start)?),
                Event::Empty(start) => {
                    let element = element_from(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| MoproError::Template("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|err| template_error(reader.buffer_position(), err))?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Text(text.into_owned()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(MoproError::Template("unclosed element".to_string()));
        }
        root.ok_or_else(|| MoproError::Template("document has no root element".to_string()))
    }

    /// Serialize the element and its subtree through `writer`.
    ///
    /// Text and child elements are written in their original order, so
    /// mixed content survives intact.
    pub fn write_to<W: io::Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute(Attribute {
                key: QName(key.as_bytes()),
                value: Cow::Owned(escape_markup(value).into_bytes()),
            });
        }

        if self.children.is_empty() {
            return writer.write_event(Event::Empty(start));
        }

        writer.write_event(Event::Start(start))?;
        for node in &self.children {
            match node {
                XmlNode::Element(child) => child.write_to(writer)?,
                XmlNode::Text(text) => {
                    writer.write_event(Event::Text(BytesText::from_escaped(escape_markup(text))))?;
                }
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))
    }

    /// Serialize with two-space indentation. Elements holding only text are
    /// written on one line.
    ///
    /// # Errors
    ///
    /// Returns [`MoproError::Io`] when the writer fails.
    pub fn to_indented_string(&self) -> Result<String, MoproError> {
        let mut writer = indented_writer();
        self.write_to(&mut writer)?;
        into_string(writer)
    }
}

/// A writer indenting nested elements by two spaces.
pub fn indented_writer() -> Writer<Vec<u8>> {
    Writer::new_with_indent(Vec::new(), INDENT_CHAR, INDENT_SIZE)
}

/// The text collected by `writer`.
///
/// # Errors
///
/// Returns [`MoproError::Template`] when the output is not UTF-8.
pub fn into_string(writer: Writer<Vec<u8>>) -> Result<String, MoproError> {
    String::from_utf8(writer.into_inner())
        .map_err(|err| MoproError::Template(format!("serialized document: {err}")))
}

fn element_from(start: &BytesStart<'_>) -> Result<XmlElement, MoproError> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| MoproError::Template(err.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| MoproError::Template(err.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), MoproError> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(MoproError::Template("multiple root elements".to_string())),
    }
    Ok(())
}

fn template_error(position: impl fmt::Display, err: impl fmt::Display) -> MoproError {
    MoproError::Template(format!("at byte {position}: {err}"))
}

/// Escape markup characters and write every non-ASCII character as a numeric
/// character reference, so the text is valid in any ASCII-compatible
/// encoding.
pub fn escape_markup(raw: &str) -> String {
    let escaped = escape(raw);
    let mut out = String::with_capacity(escaped.len());
    for ch in escaped.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            out.push_str(&format!("&#{};", u32::from(ch)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let root = XmlElement::parse(
            r#"<?xml version="1.0"?>
            <a x="1">
              <b><c y="&amp;"/></b>
              <d>text</d>
            </a>"#,
        )
        .unwrap();
        assert_eq!(root.name(), "a");
        assert_eq!(root.attr("x"), Some("1"));
        assert_eq!(root.path(&["b", "c"]).unwrap().attr("y"), Some("&"));
        assert_eq!(root.child("d").unwrap().text(), "text");
        assert_eq!(root.elements().count(), 2);
    }

    #[test]
    fn test_parse_rejects_unbalanced() {
        assert!(matches!(
            XmlElement::parse("<a><b></a>"),
            Err(MoproError::Template(_))
        ));
        assert!(XmlElement::parse("").is_err());
    }

    #[test]
    fn test_set_attr_keeps_order() {
        let mut element = XmlElement::new("e").with_attr("a", "1").with_attr("b", "2");
        element.set_attr("a", "3");
        let attrs: Vec<_> = element.attributes().collect();
        assert_eq!(attrs, [("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_insert_child_after() {
        let mut root = XmlElement::new("r")
            .with_child(XmlElement::new("first"))
            .with_child(XmlElement::new("last"));
        root.insert_child_after("first", XmlElement::new("middle"));
        root.insert_child_after("absent", XmlElement::new("end"));
        let names: Vec<&str> = root.elements().map(XmlElement::name).collect();
        assert_eq!(names, ["first", "middle", "last", "end"]);
    }

    #[test]
    fn test_find_child_mut() {
        let mut root = XmlElement::new("r")
            .with_child(XmlElement::new("s").with_attr("name", "a"))
            .with_child(XmlElement::new("s").with_attr("name", "b"));
        root.find_child_mut("s", "name", "b")
            .unwrap()
            .set_attr("seen", "1");
        assert_eq!(root.elements().nth(1).unwrap().attr("seen"), Some("1"));
        assert!(root.find_child_mut("s", "name", "c").is_none());
    }

    #[test]
    fn test_write_indented() {
        let root = XmlElement::new("a")
            .with_child(XmlElement::new("b").with_attr("n", "x<y"))
            .with_child(XmlElement::new("c").with_text("Qk0="));
        assert_eq!(
            root.to_indented_string().unwrap(),
            "<a>\n  <b n=\"x&lt;y\"/>\n  <c>Qk0=</c>\n</a>"
        );
    }

    #[test]
    fn test_write_mixed_content() {
        let root = XmlElement::new("p")
            .with_text("Größe")
            .with_child(XmlElement::new("b").with_attr("k", "ü"));
        let xml = root.to_indented_string().unwrap();
        assert!(xml.starts_with("<p>Gr&#246;&#223;e<b k=\"&#252;\"/>"));
        assert!(xml.ends_with("</p>"));

        let reparsed = XmlElement::parse(&xml).unwrap();
        assert_eq!(reparsed.text(), "Größe");
        assert_eq!(reparsed.child("b").unwrap().attr("k"), Some("ü"));
    }

    #[test]
    fn test_escape_markup_non_ascii() {
        assert_eq!(escape_markup("Größe"), "Gr&#246;&#223;e");
        assert_eq!(escape_markup("\"a\" & 'b'"), "&quot;a&quot; &amp; &apos;b&apos;");
    }
}
