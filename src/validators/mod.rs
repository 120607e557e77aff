//! WSDL 2.0 validators
//!
//! Three validators share one reporting convention:
//!
//! - [`WsdlDocumentValidator`] checks the element model;
//! - [`WsdlComponentValidator`] checks the component model;
//! - [`WsdlValidator`] dispatches registered [`Assertion`]s by
//!   [`TargetKind`], including third-party ones from an
//!   [`ExtensionRegistry`].

pub mod assertions;
pub mod base;
pub mod component_validation;
pub mod document_validation;
pub mod engine;
pub mod helpers;
pub mod registry;
pub mod validation;

// Re-exports
pub use base::{Assertion, AssertionInfo, Node, Target, TargetKind};
pub use component_validation::WsdlComponentValidator;
pub use document_validation::WsdlDocumentValidator;
pub use engine::WsdlValidator;
pub use registry::ExtensionRegistry;
pub use validation::{Tally, ValidationReport, WodenContext};
