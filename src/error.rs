//! Error types for woden-rs
//!
//! This module defines the errors returned by the reader and by validator setup.
//! Assertion violations are never errors: they go to an
//! [`ErrorReporter`](crate::reporter::ErrorReporter).

use std::fmt;
use thiserror::Error;

/// Result type alias using woden Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for woden operations
#[derive(Error, Debug)]
pub enum Error {
    /// WSDL document parsing/building error
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// An assertion was handed a target of the wrong kind
    #[error("type error: {0}")]
    Type(String),

    /// Assertion registry misconfiguration, fatal to validator setup
    #[error("registry error: {0}")]
    Registry(String),

    /// Resource loading error
    #[error("resource error: {0}")]
    Resource(String),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// WSDL parsing error
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Location in the document (`uri:line:column`)
    pub location: Option<String>,
    /// Element that caused the error
    pub element: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
            element: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the offending element
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref element) = self.element {
            write!(f, " (in <{}>)", element)?;
        }

        if let Some(ref loc) = self.location {
            write!(f, "\n\nLocation: {}", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
