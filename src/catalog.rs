//! URI resolution and XML Catalog support
//!
//! Assertions that need to dereference an IRI (a target namespace, a schema
//! location) go through a [`UriResolver`]. The default resolver accepts any
//! `http`, `https` or `file` IRI as it is; [`XmlCatalog`] first rewrites
//! identifiers through OASIS catalog mappings.
//!
//! XML Catalogs are defined by OASIS:
//! https://www.oasis-open.org/committees/entity/spec-2001-08-06.html
//!
//! # Supported Elements
//!
//! - `<catalog>` - Root element
//! - `<group>` - Grouping element (inherits base from parent)
//! - `<system>` - Maps system identifiers to URIs
//! - `<uri>` - Maps URN names to URIs
//! - `<nextCatalog>` - Includes another catalog file

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::documents::{Document, Element};
use crate::error::{Error, ParseError, Result};

/// The XML Catalog namespace
pub const CATALOG_NS: &str = "urn:oasis:names:tc:entity:xmlns:xml:catalog";

/// Schemes the resolvers consider dereferenceable
const DEREFERENCEABLE_SCHEMES: &[&str] = &["http", "https", "file"];

/// Maps an IRI to the location it can be retrieved from
pub trait UriResolver: fmt::Debug {
    /// Resolve `uri`, returning `None` when it cannot be dereferenced
    fn resolve_uri(&self, uri: &str) -> Option<Url>;
}

/// Resolver that accepts dereferenceable IRIs unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUriResolver;

impl UriResolver for DefaultUriResolver {
    fn resolve_uri(&self, uri: &str) -> Option<Url> {
        let url = Url::parse(uri).ok()?;
        DEREFERENCEABLE_SCHEMES
            .contains(&url.scheme())
            .then_some(url)
    }
}

/// XML Catalog for resolving identifiers to locations
#[derive(Debug, Clone, Default)]
pub struct XmlCatalog {
    /// System ID to URI mappings (systemId -> uri)
    system_mappings: HashMap<String, String>,
    /// URI name to URI mappings (name -> uri)
    uri_mappings: HashMap<String, String>,
    /// Base directory for resolving relative URIs
    base_dir: Option<PathBuf>,
}

impl XmlCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a file
    ///
    /// This will recursively load any catalogs referenced via `<nextCatalog>`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let base_dir = path.parent().map(|p| p.to_path_buf());

        let content = fs::read_to_string(path).map_err(|e| {
            Error::Resource(format!("Failed to read catalog '{}': {}", path.display(), e))
        })?;

        let mut catalog = Self::new();
        catalog.base_dir = base_dir.clone();
        catalog.parse_catalog(&content, base_dir.as_deref())?;

        tracing::debug!(
            catalog = %path.display(),
            mappings = catalog.len(),
            "loaded XML catalog"
        );

        Ok(catalog)
    }

    /// Add a single `name -> uri` mapping
    pub fn add_uri_mapping(&mut self, name: impl Into<String>, uri: impl Into<String>) {
        self.uri_mappings.insert(name.into(), uri.into());
    }

    /// Parse catalog XML content
    fn parse_catalog(&mut self, xml: &str, base_dir: Option<&Path>) -> Result<()> {
        let doc = Document::from_string(xml)?;
        let root = doc
            .root()
            .ok_or_else(|| Error::Parse(ParseError::new("Empty catalog document")))?;

        if root.local_name() != "catalog" {
            return Err(Error::Parse(ParseError::new(format!(
                "Expected catalog root element, got {}",
                root.local_name()
            ))));
        }

        self.process_catalog_children(&root.children, base_dir)
    }

    /// Process children of a catalog or group element
    fn process_catalog_children(
        &mut self,
        children: &[Element],
        base_dir: Option<&Path>,
    ) -> Result<()> {
        for child in children {
            match child.local_name() {
                "system" => {
                    if let (Some(system_id), Some(uri)) =
                        (child.get_attribute("systemId"), child.get_attribute("uri"))
                    {
                        let resolved = resolve_against(base_dir, uri);
                        self.system_mappings.insert(system_id.to_string(), resolved);
                    }
                }
                "uri" => {
                    if let (Some(name), Some(uri)) =
                        (child.get_attribute("name"), child.get_attribute("uri"))
                    {
                        let resolved = resolve_against(base_dir, uri);
                        self.uri_mappings.insert(name.to_string(), resolved);
                    }
                }
                "nextCatalog" => {
                    if let Some(catalog_path) = child.get_attribute("catalog") {
                        let resolved_path = match base_dir {
                            Some(base) => base.join(catalog_path),
                            None => PathBuf::from(catalog_path),
                        };

                        match fs::read_to_string(&resolved_path) {
                            Ok(content) => {
                                let next_base = resolved_path.parent().map(|p| p.to_path_buf());
                                if let Err(e) = self.parse_catalog(&content, next_base.as_deref()) {
                                    tracing::warn!(
                                        catalog = %resolved_path.display(),
                                        error = %e,
                                        "skipping unreadable nested catalog"
                                    );
                                }
                            }
                            Err(e) => {
                                tracing::warn!(
                                    catalog = %resolved_path.display(),
                                    error = %e,
                                    "nested catalog not found"
                                );
                            }
                        }
                    }
                }
                "group" => {
                    self.process_catalog_children(&child.children, base_dir)?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Look up an identifier in the catalog
    ///
    /// System ID mappings take precedence over URI name mappings.
    pub fn lookup(&self, identifier: &str) -> Option<&str> {
        self.system_mappings
            .get(identifier)
            .or_else(|| self.uri_mappings.get(identifier))
            .map(|s| s.as_str())
    }

    /// Check if this catalog is empty (has no mappings)
    pub fn is_empty(&self) -> bool {
        self.system_mappings.is_empty() && self.uri_mappings.is_empty()
    }

    /// Get the number of mappings
    pub fn len(&self) -> usize {
        self.system_mappings.len() + self.uri_mappings.len()
    }

    /// Merge another catalog into this one
    pub fn merge(&mut self, other: &XmlCatalog) {
        for (k, v) in &other.system_mappings {
            self.system_mappings.entry(k.clone()).or_insert_with(|| v.clone());
        }
        for (k, v) in &other.uri_mappings {
            self.uri_mappings.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }
}

impl UriResolver for XmlCatalog {
    fn resolve_uri(&self, uri: &str) -> Option<Url> {
        match self.lookup(uri) {
            Some(mapped) => Url::parse(mapped)
                .ok()
                .or_else(|| Url::from_file_path(mapped).ok()),
            None => DefaultUriResolver.resolve_uri(uri),
        }
    }
}

fn resolve_against(base_dir: Option<&Path>, uri: &str) -> String {
    if Url::parse(uri).is_ok() {
        return uri.to_string();
    }
    match base_dir {
        Some(base) => base.join(uri).to_string_lossy().to_string(),
        None => uri.to_string(),
    }
}
