//! Resource location resolution
//!
//! This module handles resolution of resource locations (URLs, file paths, etc.)
//! for loading WSDL documents and the schemas they import.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Resource location - can be a URL, file path, or string identifier
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// File system path
    Path(PathBuf),
    /// URL (http, https, ftp, etc.)
    Url(Url),
    /// In-memory document content
    String(String),
}

impl Location {
    /// Create a location from a string (auto-detect type)
    pub fn parse(s: &str) -> Result<Self> {
        // Try to parse as URL first
        if let Ok(url) = Url::parse(s) {
            if url.scheme() == "file" {
                let path = url
                    .to_file_path()
                    .map_err(|_| Error::Resource(format!("Invalid file URL: {}", s)))?;
                return Ok(Location::Path(path));
            }
            // Single-letter schemes are Windows drive letters, not URLs
            if url.scheme().len() > 1 {
                return Ok(Location::Url(url));
            }
        }

        Ok(Location::Path(PathBuf::from(s)))
    }

    /// Resolve a (possibly relative) reference against a base document URI
    pub fn resolve(base: Option<&Url>, reference: &str) -> Result<Self> {
        if let Ok(url) = Url::parse(reference) {
            if url.scheme().len() > 1 {
                return Self::parse(url.as_str());
            }
        }

        match base {
            Some(base) => {
                let joined = base.join(reference)?;
                Self::parse(joined.as_str())
            }
            None => Ok(Location::Path(PathBuf::from(reference))),
        }
    }

    /// The document base URI for this location, if it has one
    pub fn base_url(&self) -> Option<Url> {
        match self {
            Location::Path(p) => file_url(p),
            Location::Url(u) => Some(u.clone()),
            Location::String(_) => None,
        }
    }

    /// Get the location as a string
    pub fn as_str(&self) -> String {
        match self {
            Location::Path(p) => p.to_string_lossy().to_string(),
            Location::Url(u) => u.to_string(),
            Location::String(_) => "<string>".to_string(),
        }
    }

    /// Check if this is a remote location (URL)
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(_))
    }

    /// Check if this is a local file
    pub fn is_file(&self) -> bool {
        matches!(self, Location::Path(_))
    }
}

fn file_url(path: &Path) -> Option<Url> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };
    Url::from_file_path(absolute).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_url() {
        let loc = Location::parse("http://example.com/greeter.wsdl").unwrap();
        assert!(matches!(loc, Location::Url(_)));
        assert!(loc.is_remote());
    }

    #[test]
    fn test_location_from_path() {
        let loc = Location::parse("/tmp/greeter.wsdl").unwrap();
        assert!(matches!(loc, Location::Path(_)));
        assert!(loc.is_file());
    }

    #[test]
    fn test_location_from_file_url() {
        let loc = Location::parse("file:///tmp/greeter.wsdl").unwrap();
        assert_eq!(loc, Location::Path(PathBuf::from("/tmp/greeter.wsdl")));
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let base = Url::parse("file:///tmp/wsdl/greeter.wsdl").unwrap();
        let loc = Location::resolve(Some(&base), "schemas/greeter.xsd").unwrap();
        assert_eq!(
            loc,
            Location::Path(PathBuf::from("/tmp/wsdl/schemas/greeter.xsd"))
        );
    }

    #[test]
    fn test_resolve_absolute_ignores_base() {
        let base = Url::parse("file:///tmp/wsdl/greeter.wsdl").unwrap();
        let loc = Location::resolve(Some(&base), "http://example.com/types.xsd").unwrap();
        assert!(loc.is_remote());
    }

    #[test]
    fn test_location_as_str() {
        let loc = Location::String("<description/>".to_string());
        assert_eq!(loc.as_str(), "<string>");
        assert!(loc.base_url().is_none());
    }
}
