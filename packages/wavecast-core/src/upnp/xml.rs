//! Namespace-stripped XML tree for UPnP device descriptions.
//!
//! Device descriptions in the wild use inconsistent and vendor-specific
//! namespace prefixes (`<device:friendlyName>`, `<dlna:X_DLNADOC>`, ...).
//! This module canonicalizes names *before* the tree is built: every element
//! and attribute name loses its `prefix:`, and `xmlns` declarations are
//! dropped entirely. Downstream matching code only ever compares unqualified
//! names.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use thiserror::Error;

/// Errors that can occur while building an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum XmlTreeError {
    /// The underlying XML was not well-formed.
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// The document contained no element at all.
    #[error("document contains no elements")]
    Empty,
}

/// A parsed XML node with namespace prefixes already stripped.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// An element with its attributes and ordered children.
    Element {
        /// Unqualified element name.
        name: String,
        /// Attribute map, keys unqualified, `xmlns` declarations removed.
        attributes: HashMap<String, String>,
        /// Child nodes in document order.
        children: Vec<XmlNode>,
    },
    /// A text leaf (entities decoded, whitespace-only runs skipped).
    Text(String),
}

/// Strips a `prefix:` namespace qualifier from an element or attribute name.
fn local_name(raw: &str) -> &str {
    raw.rsplit(':').next().unwrap_or(raw)
}

/// Returns true for `xmlns` / `xmlns:foo` attribute keys.
fn is_xmlns_decl(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

/// Partially-built element sitting on the parse stack.
struct Frame {
    name: String,
    attributes: HashMap<String, String>,
    children: Vec<XmlNode>,
}

impl Frame {
    fn from_start(e: &quick_xml::events::BytesStart) -> Self {
        let name = local_name(&String::from_utf8_lossy(e.name().as_ref())).to_string();
        let mut attributes = HashMap::new();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            if is_xmlns_decl(&key) {
                continue;
            }
            attributes.insert(
                local_name(&key).to_string(),
                String::from_utf8_lossy(&attr.value).to_string(),
            );
        }
        Self {
            name,
            attributes,
            children: Vec::new(),
        }
    }

    fn into_node(self) -> XmlNode {
        XmlNode::Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

impl XmlNode {
    /// Parses an XML document into a canonicalized tree.
    ///
    /// Returns the root element. Leading/trailing prolog content (XML
    /// declaration, comments) is skipped.
    pub fn parse(xml: &str) -> Result<XmlNode, XmlTreeError> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    stack.push(Frame::from_start(e));
                }
                Event::Empty(ref e) => {
                    let node = Frame::from_start(e).into_node();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => root = root.or(Some(node)),
                    }
                }
                Event::Text(ref e) => {
                    if let Ok(text) = e.decode() {
                        if !text.trim().is_empty() {
                            if let Some(parent) = stack.last_mut() {
                                parent.children.push(XmlNode::Text(text.to_string()));
                            }
                        }
                    }
                }
                Event::GeneralRef(ref e) => {
                    let resolved = e.resolve_char_ref().ok().flatten().map(|c| c.to_string()).or_else(
                        || {
                            e.decode()
                                .ok()
                                .and_then(|name| quick_xml::escape::resolve_predefined_entity(&name))
                                .map(|s| s.to_string())
                        },
                    );
                    if let Some(text) = resolved {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(XmlNode::Text(text));
                        }
                    }
                }
                Event::CData(ref e) => {
                    let text = String::from_utf8_lossy(e).to_string();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::Text(text));
                    }
                }
                Event::End(_) => {
                    if let Some(frame) = stack.pop() {
                        let node = frame.into_node();
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(node),
                            None => root = root.or(Some(node)),
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        root.ok_or(XmlTreeError::Empty)
    }

    /// Returns the element name, or `None` for text leaves.
    pub fn name(&self) -> Option<&str> {
        match self {
            XmlNode::Element { name, .. } => Some(name.as_str()),
            XmlNode::Text(_) => None,
        }
    }

    /// Returns the child nodes (empty slice for text leaves).
    pub fn children(&self) -> &[XmlNode] {
        match self {
            XmlNode::Element { children, .. } => children,
            XmlNode::Text(_) => &[],
        }
    }

    /// Returns an attribute value by unqualified name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            XmlNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            XmlNode::Text(_) => None,
        }
    }

    /// Returns the concatenated text content of this element, trimmed.
    pub fn text(&self) -> Option<String> {
        match self {
            XmlNode::Text(t) => Some(t.trim().to_string()),
            XmlNode::Element { children, .. } => {
                let mut out = String::new();
                for child in children {
                    if let XmlNode::Text(t) = child {
                        out.push_str(t);
                    }
                }
                let trimmed = out.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }

    /// Returns the trimmed text of the first direct child element named `name`.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.children()
            .iter()
            .find(|c| c.name() == Some(name))
            .and_then(XmlNode::text)
    }

    /// Depth-first, document-order search for the first node matching the
    /// predicate. The search includes `self`; the first match wins.
    pub fn find_first<'a>(&'a self, pred: &impl Fn(&XmlNode) -> bool) -> Option<&'a XmlNode> {
        if pred(self) {
            return Some(self);
        }
        for child in self.children() {
            if let Some(found) = child.find_first(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first search for the first element with the given unqualified name.
    pub fn find_element<'a>(&'a self, name: &str) -> Option<&'a XmlNode> {
        self.find_first(&|n| n.name() == Some(name))
    }
}
