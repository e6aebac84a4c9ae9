//! Owned SVG document tree.
//!
//! Input documents are read with `roxmltree` and converted into this mutable
//! model so generated content can be inserted at structural positions (first
//! and last child of the root) before serializing back to text.
//!
//! Comments and processing instructions (such as `<?xml-stylesheet?>`) are
//! kept, including those before and after the root element. The DOCTYPE is
//! not: entities are expanded while parsing and the declaration itself is
//! dropped, as is the original XML declaration, which is replaced by a fixed
//! UTF-8 one.

use std::fmt::Write;

use crate::error::{OverlayError, Result};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction {
        target: String,
        value: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Qualified name, including any namespace prefix
    pub name: String,
    /// Attributes in source order, namespace declarations included
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append
    pub fn child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Local part of the qualified name
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Concatenated text of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        let _ = write!(out, "</{}>", self.name);
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(e, out),
            Node::Comment(_) | Node::ProcessingInstruction { .. } => {}
        }
    }
}

impl Node {
    pub fn write_to(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.write_to(out),
            Node::Text(t) => out.push_str(&escape_text(t)),
            Node::Comment(c) => {
                let _ = write!(out, "<!--{c}-->");
            }
            Node::ProcessingInstruction { target, value } => match value {
                Some(value) => {
                    let _ = write!(out, "<?{target} {value}?>");
                }
                None => {
                    let _ = write!(out, "<?{target}?>");
                }
            },
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A complete SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    /// Comments and processing instructions before the root element
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments and processing instructions after the root element
    pub epilog: Vec<Node>,
}

impl SvgDocument {
    pub fn parse(text: &str) -> Result<Self> {
        let xml = parse_xml(text)?;
        Ok(Self::from_roxmltree(&xml))
    }

    pub fn from_roxmltree(xml: &roxmltree::Document<'_>) -> Self {
        let root = xml.root_element();
        let prolog = root.prev_siblings().skip(1).filter_map(convert_misc);
        let mut prolog: Vec<Node> = prolog.collect();
        prolog.reverse();

        Self {
            prolog,
            root: convert_element(root),
            epilog: root.next_siblings().skip(1).filter_map(convert_misc).collect(),
        }
    }

    /// The root element, provided it is an `<svg>` container
    pub fn svg_root_mut(&mut self) -> Result<&mut Element> {
        if self.root.local_name() != "svg" {
            return Err(OverlayError::InvalidDocument(format!(
                "expected a top-level <svg> element, found <{}>",
                self.root.name
            )));
        }
        Ok(&mut self.root)
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str(XML_DECLARATION);
        for node in &self.prolog {
            out.push('\n');
            node.write_to(&mut out);
        }
        out.push('\n');
        self.root.write_to(&mut out);
        for node in &self.epilog {
            out.push('\n');
            node.write_to(&mut out);
        }
        out
    }
}

pub(crate) fn parse_xml(text: &str) -> Result<roxmltree::Document<'_>> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    Ok(roxmltree::Document::parse_with_options(text, options)?)
}

fn qualified_name(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    let prefix = namespace
        .and_then(|uri| node.lookup_prefix(uri))
        .filter(|p| !p.is_empty());
    match prefix {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let tag = node.tag_name();
    let mut element = Element::new(qualified_name(node, tag.namespace(), tag.name()));

    // Only declarations introduced by this element, not the inherited scope
    let parent_namespaces: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for ns in node.namespaces() {
        if ns.name() == Some("xml") || parent_namespaces.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        let name = match ns.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        element.attributes.push((name, ns.uri().to_string()));
    }

    for attr in node.attributes() {
        let name = qualified_name(node, attr.namespace(), attr.name());
        element.attributes.push((name, attr.value().to_string()));
    }

    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(convert_element(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.children.push(Node::Text(text.to_string()));
            }
        } else if let Some(misc) = convert_misc(child) {
            element.children.push(misc);
        }
    }

    element
}

/// Comment or processing instruction, `None` for any other node
fn convert_misc(node: roxmltree::Node<'_, '_>) -> Option<Node> {
    if node.is_comment() {
        return node.text().map(|text| Node::Comment(text.to_string()));
    }
    node.pi().map(|pi| Node::ProcessingInstruction {
        target: pi.target.to_string(),
        value: pi.value.map(str::to_string),
    })
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
