//! XML namespace handling
//!
//! This module provides utilities for working with XML namespaces,
//! qualified names (QNames), and namespace prefix mappings.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// WSDL 2.0 namespace
pub const WSDL_NAMESPACE: &str = "http://www.w3.org/ns/wsdl";

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace, bound to the `xml` prefix
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// Namespace URI as a string slice
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Check whether this name is in the given namespace
    pub fn is_in(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Namespace context for resolving prefixes
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI
    prefixes: HashMap<Prefix, NamespaceUri>,
    /// Default namespace (no prefix)
    default_namespace: Option<NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self {
            prefixes: HashMap::new(),
            default_namespace: None,
        }
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace. An empty URI undeclares it.
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        self.default_namespace = if namespace.is_empty() {
            None
        } else {
            Some(namespace)
        };
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Number of prefixes declared in this context
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Check if no prefixes are declared
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.default_namespace.is_none()
    }

    /// Resolve a prefixed name to a QName
    ///
    /// Unprefixed names take the default namespace, as QName-valued
    /// attributes do in WSDL and XML Schema.
    pub fn resolve(&self, prefixed_name: &str) -> Result<QName> {
        let prefixed_name = prefixed_name.trim();
        if let Some((prefix, local)) = prefixed_name.split_once(':') {
            let namespace = self
                .get_namespace(prefix)
                .ok_or_else(|| Error::Namespace(format!("Unknown prefix: {}", prefix)))?;
            Ok(QName::namespaced(namespace, local))
        } else {
            Ok(QName::new(self.default_namespace.clone(), prefixed_name))
        }
    }

    /// Resolve an element or attribute name, where unprefixed attribute
    /// names are never in the default namespace
    pub fn resolve_node_name(&self, raw: &str, is_attribute: bool) -> Result<QName> {
        if is_attribute && !raw.contains(':') {
            return Ok(QName::local(raw));
        }
        self.resolve(raw)
    }
}

impl Default for NamespaceContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_creation() {
        let qname = QName::namespaced("http://example.com", "element");
        assert_eq!(qname.namespace, Some("http://example.com".to_string()));
        assert_eq!(qname.local_name, "element");
        assert!(qname.is_in("http://example.com"));
    }

    #[test]
    fn test_qname_display() {
        let qname = QName::namespaced("http://example.com", "element");
        assert_eq!(qname.to_string(), "{http://example.com}element");

        let qname_local = QName::local("element");
        assert_eq!(qname_local.to_string(), "element");
    }

    #[test]
    fn test_namespace_context() {
        let mut ctx = NamespaceContext::new();
        ctx.add_prefix("xs", XSD_NAMESPACE);
        ctx.set_default_namespace(WSDL_NAMESPACE);

        assert_eq!(ctx.get_namespace("xs"), Some(XSD_NAMESPACE));
        assert_eq!(ctx.get_namespace("xml"), Some(XML_NAMESPACE));
        assert_eq!(ctx.get_default_namespace(), Some(WSDL_NAMESPACE));

        ctx.set_default_namespace("");
        assert_eq!(ctx.get_default_namespace(), None);
    }

    #[test]
    fn test_resolve_prefixed_name() {
        let mut ctx = NamespaceContext::new();
        ctx.add_prefix("tns", "http://example.com/greeter");

        let qname = ctx.resolve("tns:Greeter").unwrap();
        assert_eq!(qname.namespace(), Some("http://example.com/greeter"));
        assert_eq!(qname.local_name, "Greeter");

        assert!(ctx.resolve("missing:Greeter").is_err());
    }

    #[test]
    fn test_unprefixed_attribute_has_no_namespace() {
        let mut ctx = NamespaceContext::new();
        ctx.set_default_namespace(WSDL_NAMESPACE);

        let attr = ctx.resolve_node_name("name", true).unwrap();
        assert_eq!(attr, QName::local("name"));

        let elem = ctx.resolve_node_name("interface", false).unwrap();
        assert_eq!(elem, QName::namespaced(WSDL_NAMESPACE, "interface"));
    }
}
