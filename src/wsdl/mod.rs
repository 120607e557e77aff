//! WSDL 2.0 object model
//!
//! Two views of a description are kept side by side:
//!
//! - the **element model** ([`elements`]), a typed rendering of the XML
//!   element tree that document-level assertions run against;
//! - the **component model** ([`components`]), the W3C abstract component
//!   graph that component-level assertions run against.
//!
//! [`reader::WsdlReader`] builds both from a document.

pub mod components;
pub mod elements;
pub mod patterns;
pub mod reader;
pub mod schemas;

pub use components::{
    Binding, BindingFault, BindingFaultReference, BindingMessageReference, BindingOperation,
    Description, Direction, Endpoint, Interface, InterfaceFault, InterfaceFaultReference,
    InterfaceMessageReference, InterfaceOperation, Service, WsdlComponent,
};
pub use elements::{DescriptionElement, MessageContent};
pub use reader::{ReaderConfig, WsdlDocument, WsdlReader};
pub use schemas::{ImportedSchema, InlinedSchema, Schema, SchemaDocument};
