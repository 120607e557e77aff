//! Assertion infrastructure
//!
//! An [`Assertion`] is one numbered rule. It is registered against exactly
//! one [`TargetKind`] and is only ever invoked with a [`Target`] of that
//! kind; dispatch is by exact kind with no notion of a supertype.

use crate::error::{Error, Result};
use crate::wsdl::{
    Binding, BindingFault, BindingFaultReference, BindingMessageReference, BindingOperation,
    Description, DescriptionElement, Endpoint, Interface, Service,
};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::validation::WodenContext;

/// The kinds of node an assertion can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TargetKind {
    /// The `<description>` element
    DescriptionElement,
    /// The Description component
    Description,
    /// An Interface component
    Interface,
    /// A Binding component
    Binding,
    /// A Binding Fault component
    BindingFault,
    /// A Binding Operation component
    BindingOperation,
    /// A Binding Message Reference component
    BindingMessageReference,
    /// A Binding Fault Reference component
    BindingFaultReference,
    /// A Service component
    Service,
    /// An Endpoint component
    Endpoint,
}

impl TargetKind {
    /// Every kind, in walk order
    pub const ALL: [TargetKind; 10] = [
        TargetKind::DescriptionElement,
        TargetKind::Description,
        TargetKind::Interface,
        TargetKind::Binding,
        TargetKind::BindingFault,
        TargetKind::BindingOperation,
        TargetKind::BindingMessageReference,
        TargetKind::BindingFaultReference,
        TargetKind::Service,
        TargetKind::Endpoint,
    ];

    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::DescriptionElement => "DescriptionElement",
            TargetKind::Description => "Description",
            TargetKind::Interface => "Interface",
            TargetKind::Binding => "Binding",
            TargetKind::BindingFault => "BindingFault",
            TargetKind::BindingOperation => "BindingOperation",
            TargetKind::BindingMessageReference => "BindingMessageReference",
            TargetKind::BindingFaultReference => "BindingFaultReference",
            TargetKind::Service => "Service",
            TargetKind::Endpoint => "Endpoint",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node visited by the walk
///
/// Nested components carry the parent they were reached through.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// The `<description>` element
    DescriptionElement(&'a DescriptionElement),
    /// The Description component
    Description(&'a Description),
    /// An Interface component
    Interface(&'a Interface),
    /// A Binding component
    Binding(&'a Binding),
    /// A Binding Fault and its binding
    BindingFault(&'a Binding, &'a BindingFault),
    /// A Binding Operation and its binding
    BindingOperation(&'a Binding, &'a BindingOperation),
    /// A Binding Message Reference and its binding operation
    BindingMessageReference(&'a BindingOperation, &'a BindingMessageReference),
    /// A Binding Fault Reference and its binding operation
    BindingFaultReference(&'a BindingOperation, &'a BindingFaultReference),
    /// A Service component
    Service(&'a Service),
    /// An Endpoint and its service
    Endpoint(&'a Service, &'a Endpoint),
}

impl<'a> Node<'a> {
    /// The kind of this node
    pub fn kind(&self) -> TargetKind {
        match self {
            Node::DescriptionElement(_) => TargetKind::DescriptionElement,
            Node::Description(_) => TargetKind::Description,
            Node::Interface(_) => TargetKind::Interface,
            Node::Binding(_) => TargetKind::Binding,
            Node::BindingFault(..) => TargetKind::BindingFault,
            Node::BindingOperation(..) => TargetKind::BindingOperation,
            Node::BindingMessageReference(..) => TargetKind::BindingMessageReference,
            Node::BindingFaultReference(..) => TargetKind::BindingFaultReference,
            Node::Service(_) => TargetKind::Service,
            Node::Endpoint(..) => TargetKind::Endpoint,
        }
    }
}

/// What an assertion is asked to validate: a node plus the description
/// its cross references resolve against
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    /// The owning description
    pub description: &'a Description,
    /// The visited node
    pub node: Node<'a>,
}

impl<'a> Target<'a> {
    /// Create a target
    pub fn new(description: &'a Description, node: Node<'a>) -> Self {
        Self { description, node }
    }

    /// The kind of the visited node
    pub fn kind(&self) -> TargetKind {
        self.node.kind()
    }

    fn mismatch(&self, expected: TargetKind) -> Error {
        Error::Type(format!(
            "expected a {} target, got a {} target",
            expected,
            self.kind()
        ))
    }

    /// The `<description>` element, or a type error
    pub fn as_description_element(&self) -> Result<&'a DescriptionElement> {
        match self.node {
            Node::DescriptionElement(element) => Ok(element),
            _ => Err(self.mismatch(TargetKind::DescriptionElement)),
        }
    }

    /// The Description component, or a type error
    pub fn as_description(&self) -> Result<&'a Description> {
        match self.node {
            Node::Description(description) => Ok(description),
            _ => Err(self.mismatch(TargetKind::Description)),
        }
    }

    /// The Interface component, or a type error
    pub fn as_interface(&self) -> Result<&'a Interface> {
        match self.node {
            Node::Interface(interface) => Ok(interface),
            _ => Err(self.mismatch(TargetKind::Interface)),
        }
    }

    /// The Binding component, or a type error
    pub fn as_binding(&self) -> Result<&'a Binding> {
        match self.node {
            Node::Binding(binding) => Ok(binding),
            _ => Err(self.mismatch(TargetKind::Binding)),
        }
    }

    /// The Binding Fault with its binding, or a type error
    pub fn as_binding_fault(&self) -> Result<(&'a Binding, &'a BindingFault)> {
        match self.node {
            Node::BindingFault(binding, fault) => Ok((binding, fault)),
            _ => Err(self.mismatch(TargetKind::BindingFault)),
        }
    }

    /// The Binding Operation with its binding, or a type error
    pub fn as_binding_operation(&self) -> Result<(&'a Binding, &'a BindingOperation)> {
        match self.node {
            Node::BindingOperation(binding, operation) => Ok((binding, operation)),
            _ => Err(self.mismatch(TargetKind::BindingOperation)),
        }
    }

    /// The Binding Message Reference with its operation, or a type error
    pub fn as_binding_message_reference(
        &self,
    ) -> Result<(&'a BindingOperation, &'a BindingMessageReference)> {
        match self.node {
            Node::BindingMessageReference(operation, reference) => Ok((operation, reference)),
            _ => Err(self.mismatch(TargetKind::BindingMessageReference)),
        }
    }

    /// The Binding Fault Reference with its operation, or a type error
    pub fn as_binding_fault_reference(
        &self,
    ) -> Result<(&'a BindingOperation, &'a BindingFaultReference)> {
        match self.node {
            Node::BindingFaultReference(operation, reference) => Ok((operation, reference)),
            _ => Err(self.mismatch(TargetKind::BindingFaultReference)),
        }
    }

    /// The Service component, or a type error
    pub fn as_service(&self) -> Result<&'a Service> {
        match self.node {
            Node::Service(service) => Ok(service),
            _ => Err(self.mismatch(TargetKind::Service)),
        }
    }

    /// The Endpoint with its service, or a type error
    pub fn as_endpoint(&self) -> Result<(&'a Service, &'a Endpoint)> {
        match self.node {
            Node::Endpoint(service, endpoint) => Ok((service, endpoint)),
            _ => Err(self.mismatch(TargetKind::Endpoint)),
        }
    }
}

/// A single numbered rule
///
/// Violations go to the context's reporter. `Err` is reserved for
/// programming errors such as being handed a target of the wrong kind.
pub trait Assertion: fmt::Debug + Send + Sync {
    /// Stable assertion id, e.g. `Interface-1009`
    fn id(&self) -> &str;

    /// Check one target
    fn validate(&self, target: Target<'_>, context: &mut WodenContext<'_>) -> Result<()>;
}

/// An assertion paired with the kind it targets
#[derive(Debug, Clone)]
pub struct AssertionInfo {
    /// The assertion
    pub assertion: Arc<dyn Assertion>,
    /// The kind of node it is registered for
    pub target: TargetKind,
}

impl AssertionInfo {
    /// Pair an assertion with its target kind
    pub fn new(assertion: Arc<dyn Assertion>, target: TargetKind) -> Self {
        Self { assertion, target }
    }

    /// The assertion's id
    pub fn id(&self) -> &str {
        self.assertion.id()
    }
}
