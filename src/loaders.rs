//! Resource loading utilities
//!
//! This module handles loading of WSDL documents and imported schemas.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::locations::Location;
use std::fs;

/// Resource loader for descriptions and schemas
#[derive(Debug, Clone)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
    /// Whether to allow remote resources
    allow_remote: bool,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            allow_remote: false,
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set whether to allow remote resources
    pub fn with_allow_remote(mut self, allow: bool) -> Self {
        self.allow_remote = allow;
        self
    }

    /// The limits applied by this loader
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Load a resource as a string
    pub fn load(&self, location: &Location) -> Result<String> {
        match location {
            Location::Path(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Resource(format!("Failed to read file '{}': {}", path.display(), e))
                })?;

                self.limits.check_xml_size(content.len())?;
                tracing::trace!(path = %path.display(), bytes = content.len(), "loaded resource");

                Ok(content)
            }
            Location::Url(url) => {
                if !self.allow_remote {
                    return Err(Error::Resource(format!(
                        "Remote resources are not allowed: {}",
                        url
                    )));
                }

                // Network fetching is left to callers; hand us the content instead
                Err(Error::Resource(format!(
                    "URL loading not supported: {}",
                    url
                )))
            }
            Location::String(s) => {
                self.limits.check_xml_size(s.len())?;
                Ok(s.clone())
            }
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "<description/>").unwrap();

        let location = Location::Path(file.path().to_path_buf());
        let loader = Loader::new();
        let content = loader.load(&location).unwrap();

        assert!(content.contains("<description/>"));
    }

    #[test]
    fn test_load_from_string() {
        let location = Location::String("<description/>".to_string());
        let loader = Loader::new();
        let content = loader.load(&location).unwrap();

        assert_eq!(content, "<description/>");
    }

    #[test]
    fn test_remote_rejected() {
        let location = Location::parse("http://example.com/greeter.wsdl").unwrap();
        let err = Loader::new().load(&location).unwrap_err();
        assert!(err.to_string().contains("not allowed"));
    }

    #[test]
    fn test_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        let large_content = "x".repeat(11 * 1024 * 1024); // 11 MB
        write!(file, "{}", large_content).unwrap();

        let location = Location::Path(file.path().to_path_buf());
        let loader = Loader::new().with_limits(Limits::strict());
        let result = loader.load(&location);

        // Strict limits (10 MB max) should reject 11MB file
        assert!(result.is_err());
    }
}
