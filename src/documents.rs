//! XML document handling
//!
//! This module parses XML into a namespace-resolved element tree. Every
//! element carries its in-scope namespace context (needed to resolve
//! QName-valued attributes such as `interface="tns:Greeter"`) and the
//! line/column where its start tag begins.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{NamespaceContext, QName};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::fmt;

/// 1-based line/column of a start tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextPosition {
    /// Line number
    pub line: usize,
    /// Column number
    pub column: usize,
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element qualified name
    pub qname: QName,
    /// Element attributes, in document order
    pub attributes: IndexMap<QName, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// In-scope namespace context for this element
    pub namespaces: NamespaceContext,
    /// Where the start tag begins
    pub position: Option<TextPosition>,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
            position: None,
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Check the element's expanded name
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.qname.is_in(namespace) && self.qname.local_name == local_name
    }

    /// Get an unqualified attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(qname, _)| qname.namespace.is_none() && qname.local_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Resolve a QName-valued attribute against this element's namespaces
    pub fn get_qname_attribute(&self, name: &str) -> Result<Option<QName>> {
        self.get_attribute(name)
            .map(|value| self.namespaces.resolve(value))
            .transpose()
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: String) {
        match self.text {
            Some(ref mut existing) => existing.push_str(&text),
            None => self.text = Some(text),
        }
    }

    /// Find child elements by local name
    pub fn find_children(&self, local_name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|e| e.local_name() == local_name)
            .collect()
    }

    /// Iterate over child elements with the given expanded name
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |e| e.is(namespace, local_name))
    }

    /// Render the start tag, for diagnostics
    pub fn describe(&self) -> String {
        match self.get_attribute("name") {
            Some(name) => format!("{} name=\"{}\"", self.local_name(), name),
            None => self.local_name().to_string(),
        }
    }
}

/// XML Document representation
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml, &Limits::default())
    }

    /// Parse an XML document, enforcing the given limits
    pub fn parse(xml: &str, limits: &Limits) -> Result<Self> {
        limits.check_xml_size(xml.len())?;

        let lines = LineIndex::new(xml);
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut doc = Document::new();
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            let offset = skip_whitespace(xml.as_bytes(), reader.buffer_position());
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let parent_ns = element_stack.last().map(|p| &p.namespaces);
                    let mut element = Self::parse_element(&e, parent_ns, limits)?;
                    element.position = Some(lines.position(offset));
                    element_stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = element_stack.pop() {
                        if let Some(parent) = element_stack.last_mut() {
                            parent.add_child(current);
                        } else {
                            // This is the root element
                            doc.root = Some(current);
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    limits.check_xml_depth(element_stack.len() + 1)?;
                    let parent_ns = element_stack.last().map(|p| &p.namespaces);
                    let mut element = Self::parse_element(&e, parent_ns, limits)?;
                    element.position = Some(lines.position(offset));
                    if let Some(parent) = element_stack.last_mut() {
                        parent.add_child(element);
                    } else {
                        // Empty root element
                        doc.root = Some(element);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?
                            .to_string();
                        if !text.trim().is_empty() {
                            current.set_text(text);
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        current.set_text(String::from_utf8_lossy(&e.into_inner()).to_string());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    let pos = lines.position(reader.buffer_position());
                    return Err(Error::Xml(format!(
                        "Error parsing XML at {}: {}",
                        pos, e
                    )));
                }
                _ => {} // Ignore other events (comments, processing instructions, etc.)
            }
            buf.clear();
        }

        if !element_stack.is_empty() {
            return Err(Error::Xml("Unexpected end of document".to_string()));
        }

        Ok(doc)
    }

    /// Parse element from BytesStart event, resolving names against the
    /// parent's namespace context plus this element's own declarations
    fn parse_element(
        start: &BytesStart,
        parent_ns: Option<&NamespaceContext>,
        limits: &Limits,
    ) -> Result<Element> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?
            .to_string();

        let mut namespaces = parent_ns.cloned().unwrap_or_default();
        let mut raw_attributes = Vec::new();
        let mut declared = 0;

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?
                .to_string();

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .to_string();

            // Handle namespace declarations
            if attr_name == "xmlns" {
                namespaces.set_default_namespace(attr_value);
                declared += 1;
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                namespaces.add_prefix(prefix, attr_value);
                declared += 1;
            } else {
                raw_attributes.push((attr_name, attr_value));
            }
        }

        limits.check_namespaces(declared)?;
        limits.check_attributes(raw_attributes.len())?;

        let qname = namespaces.resolve_node_name(&name, false)?;
        let mut element = Element::new(qname);
        for (attr_name, attr_value) in raw_attributes {
            let attr_qname = namespaces.resolve_node_name(&attr_name, true)?;
            element.attributes.insert(attr_qname, attr_value);
        }
        element.namespaces = namespaces;

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset to line/column mapping
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn position(&self, offset: usize) -> TextPosition {
        let line = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        TextPosition {
            line: line + 1,
            column: offset - self.starts[line] + 1,
        }
    }
}

fn skip_whitespace(bytes: &[u8], mut offset: usize) -> usize {
    while offset < bytes.len() && bytes[offset].is_ascii_whitespace() {
        offset += 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::WSDL_NAMESPACE;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.root.is_none());
    }

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<root><child>text</child></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.local_name(), "root");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].local_name(), "child");
        assert_eq!(root.children[0].text.as_deref(), Some("text"));
    }

    #[test]
    fn test_parse_with_attributes() {
        let xml = r#"<root attr1="value1" attr2="value2"><child/></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.get_attribute("attr1"), Some("value1"));
        assert_eq!(root.get_attribute("attr2"), Some("value2"));
    }

    #[test]
    fn test_namespaces_resolved_and_inherited() {
        let xml = r#"<description xmlns="http://www.w3.org/ns/wsdl" xmlns:tns="urn:greeter">
  <interface name="Greeter" extends="tns:Base"/>
</description>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert!(root.is(WSDL_NAMESPACE, "description"));

        let interface = root.children_named(WSDL_NAMESPACE, "interface").next().unwrap();
        assert_eq!(interface.get_attribute("name"), Some("Greeter"));
        assert_eq!(
            interface.get_qname_attribute("extends").unwrap(),
            Some(QName::namespaced("urn:greeter", "Base"))
        );
    }

    #[test]
    fn test_positions() {
        let xml = "<root>\n  <child/>\n    <other></other>\n</root>";
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.position, Some(TextPosition { line: 1, column: 1 }));
        assert_eq!(root.children[0].position, Some(TextPosition { line: 2, column: 3 }));
        assert_eq!(root.children[1].position, Some(TextPosition { line: 3, column: 5 }));
    }

    #[test]
    fn test_unknown_prefix_is_error() {
        let xml = r#"<wsdl:description/>"#;
        assert!(Document::from_string(xml).is_err());
    }

    #[test]
    fn test_depth_limit() {
        let xml = format!("{}{}", "<a>".repeat(120), "</a>".repeat(120));
        assert!(Document::parse(&xml, &Limits::strict()).is_err());
        assert!(Document::parse(&xml, &Limits::default()).is_ok());
    }

    #[test]
    fn test_find_children() {
        let xml = r#"<root><child1/><child2/><child1/></root>"#;
        let doc = Document::from_string(xml).unwrap();

        let root = doc.root.unwrap();
        assert_eq!(root.find_children("child1").len(), 2);
    }
}
