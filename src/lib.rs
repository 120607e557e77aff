//! # woden
//!
//! An object model and validator for WSDL 2.0 descriptions.
//!
//! A description is read into two views: an element model mirroring the
//! XML, and the W3C component model. Validators check both against the
//! numbered assertions of the WSDL 2.0 recommendation and report each
//! violation to an [`ErrorReporter`](reporter::ErrorReporter) by id.
//!
//! ## Features
//!
//! - WSDL 2.0 reader with schema import resolution and XML catalogs
//! - Document-level and component-level validation
//! - Table-driven validator with third-party assertion registration
//! - Message catalog for human-readable diagnostics
//! - Protection against oversized or deeply nested documents
//!
//! ## Example
//!
//! ```rust,ignore
//! use woden::WsdlReader;
//!
//! let document = WsdlReader::new().read_file("greeter.wsdl")?;
//! for diagnostic in &document.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! assert!(document.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod namespaces;
pub mod names;
pub mod locations;

// Resource loading
pub mod loaders;
pub mod documents;
pub mod catalog;

// Reporting
pub mod messages;
pub mod reporter;

// Object model and validation
pub mod wsdl;
pub mod validators;

// Re-exports for convenience
pub use error::{Error, Result};
pub use reporter::{CollectingReporter, ErrorLocator, ErrorReporter, ReportedError, Severity};
pub use validators::{
    Assertion, ExtensionRegistry, TargetKind, ValidationReport, WsdlComponentValidator,
    WsdlDocumentValidator, WsdlValidator,
};
pub use wsdl::{Description, DescriptionElement, ReaderConfig, WsdlDocument, WsdlReader};

/// Version of the woden library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use namespaces::{WSDL_NAMESPACE, XSD_NAMESPACE};
