//! Limits and constraints for WSDL document processing
//!
//! This module defines various limits to prevent resource exhaustion
//! while reading descriptions and the schemas they import.

use crate::error::{Error, Result};

/// Global limits configuration
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_xml_depth: usize,

    /// Maximum document size in bytes
    pub max_xml_size: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,

    /// Maximum number of namespace declarations per element
    pub max_namespaces: usize,

    /// Maximum number of schemas loaded through `xs:import` per document
    pub max_schema_imports: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_depth: 1000,
            max_xml_size: 100 * 1024 * 1024, // 100 MB
            max_attributes: 1000,
            max_namespaces: 1000,
            max_schema_imports: 100,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_xml_depth: 100,
            max_xml_size: 10 * 1024 * 1024, // 10 MB
            max_attributes: 100,
            max_namespaces: 100,
            max_schema_imports: 20,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_xml_depth: 10000,
            max_xml_size: 1024 * 1024 * 1024, // 1 GB
            max_attributes: 10000,
            max_namespaces: 10000,
            max_schema_imports: 1000,
        }
    }

    /// Check if XML depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded(format!(
                "XML depth {} exceeds maximum {}",
                depth, self.max_xml_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if XML size is within limits
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        if size > self.max_xml_size {
            Err(Error::LimitExceeded(format!(
                "XML size {} bytes exceeds maximum {} bytes",
                size, self.max_xml_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of attributes is within limits
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            Err(Error::LimitExceeded(format!(
                "Attribute count {} exceeds maximum {}",
                count, self.max_attributes
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of namespaces is within limits
    pub fn check_namespaces(&self, count: usize) -> Result<()> {
        if count > self.max_namespaces {
            Err(Error::LimitExceeded(format!(
                "Namespace count {} exceeds maximum {}",
                count, self.max_namespaces
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the number of loaded schema imports is within limits
    pub fn check_schema_imports(&self, count: usize) -> Result<()> {
        if count > self.max_schema_imports {
            Err(Error::LimitExceeded(format!(
                "Schema import count {} exceeds maximum {}",
                count, self.max_schema_imports
            )))
        } else {
            Ok(())
        }
    }
}
