//! WSDL 2.0 component model
//!
//! Components are plain owned data. Cross references between components
//! (a binding's interface, an endpoint's binding, ...) are kept as QNames
//! and resolved on demand against the owning [`Description`], so a
//! reference that does not resolve is representable and can be reported.

use crate::namespaces::QName;
use serde::Serialize;
use std::fmt;

use super::elements::MessageContent;

/// Direction of a message or fault relative to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Sent to the service
    In,
    /// Sent by the service
    Out,
}

impl Direction {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
        }
    }
}

/// Common behaviour of every component
pub trait WsdlComponent: PartialEq {
    /// Component equivalence: every property of both components is equal
    fn is_equivalent_to(&self, other: &Self) -> bool {
        self == other
    }
}

/// The Description component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Description {
    /// Target namespace of the document
    pub target_namespace: Option<String>,
    /// {interfaces}
    pub interfaces: Vec<Interface>,
    /// {bindings}
    pub bindings: Vec<Binding>,
    /// {services}
    pub services: Vec<Service>,
    /// {element declarations} made available by `<types>`
    pub element_declarations: Vec<QName>,
    /// {type definitions} made available by `<types>`
    pub type_definitions: Vec<QName>,
}

impl WsdlComponent for Description {}

impl Description {
    /// Create an empty description
    pub fn new() -> Self {
        Self::default()
    }

    /// All interfaces
    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    /// All bindings
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// All services
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// First interface with the given name
    pub fn interface(&self, name: &QName) -> Option<&Interface> {
        self.interfaces
            .iter()
            .find(|i| i.name.as_ref() == Some(name))
    }

    /// First binding with the given name
    pub fn binding(&self, name: &QName) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name.as_ref() == Some(name))
    }

    /// First service with the given name
    pub fn service(&self, name: &QName) -> Option<&Service> {
        self.services.iter().find(|s| s.name.as_ref() == Some(name))
    }
}

/// The Interface component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interface {
    /// {name}
    pub name: Option<QName>,
    /// Names of the interfaces this one extends
    pub extended_interfaces: Vec<QName>,
    /// `styleDefault` IRIs
    pub style_default: Vec<String>,
    /// {interface faults} declared directly on this interface
    pub faults: Vec<InterfaceFault>,
    /// {interface operations} declared directly on this interface
    pub operations: Vec<InterfaceOperation>,
}

impl WsdlComponent for Interface {}

impl Interface {
    /// Create an interface with a name
    pub fn named(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    /// Display name, `(anonymous)` when unnamed
    pub fn display_name(&self) -> String {
        display_name(self.name.as_ref())
    }

    /// Operations declared directly on this interface
    pub fn operations(&self) -> &[InterfaceOperation] {
        &self.operations
    }

    /// Faults declared directly on this interface
    pub fn faults(&self) -> &[InterfaceFault] {
        &self.faults
    }

    /// Directly extended interfaces that resolve in `description`
    pub fn extended_interfaces<'d>(&self, description: &'d Description) -> Vec<&'d Interface> {
        self.extended_interfaces
            .iter()
            .filter_map(|name| description.interface(name))
            .collect()
    }

    /// Every interface reachable through `extends`, each listed once
    ///
    /// Interfaces are compared by equivalence, so cycles terminate.
    pub fn all_extended_interfaces<'d>(&self, description: &'d Description) -> Vec<&'d Interface> {
        let mut found: Vec<&'d Interface> = Vec::new();
        let mut pending = self.extended_interfaces(description);
        while let Some(next) = pending.pop() {
            if found.iter().any(|seen| seen.is_equivalent_to(next)) {
                continue;
            }
            found.push(next);
            pending.extend(next.extended_interfaces(description));
        }
        found
    }

    /// Operations of this interface followed by inherited ones
    pub fn all_operations<'a>(&'a self, description: &'a Description) -> Vec<&'a InterfaceOperation> {
        let mut operations: Vec<&'a InterfaceOperation> = self.operations.iter().collect();
        for extended in self.all_extended_interfaces(description) {
            if extended.is_equivalent_to(self) {
                continue;
            }
            operations.extend(extended.operations.iter());
        }
        operations
    }

    /// Faults of this interface followed by inherited ones
    pub fn all_faults<'a>(&'a self, description: &'a Description) -> Vec<&'a InterfaceFault> {
        let mut faults: Vec<&'a InterfaceFault> = self.faults.iter().collect();
        for extended in self.all_extended_interfaces(description) {
            if extended.is_equivalent_to(self) {
                continue;
            }
            faults.extend(extended.faults.iter());
        }
        faults
    }

    /// Operation with the given name, declared or inherited
    pub fn operation<'a>(&'a self, name: &QName, description: &'a Description) -> Option<&'a InterfaceOperation> {
        self.all_operations(description)
            .into_iter()
            .find(|op| op.name.as_ref() == Some(name))
    }

    /// Fault with the given name, declared or inherited
    pub fn fault<'a>(&'a self, name: &QName, description: &'a Description) -> Option<&'a InterfaceFault> {
        self.all_faults(description)
            .into_iter()
            .find(|fault| fault.name.as_ref() == Some(name))
    }
}

/// The Interface Fault component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceFault {
    /// {name}
    pub name: Option<QName>,
    /// {message content model} / {element declaration}
    pub element: MessageContent,
}

impl WsdlComponent for InterfaceFault {}

/// The Interface Operation component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceOperation {
    /// {name}
    pub name: Option<QName>,
    /// {message exchange pattern}
    pub pattern: Option<String>,
    /// {style}
    pub style: Vec<String>,
    /// {interface message references}
    pub message_references: Vec<InterfaceMessageReference>,
    /// {interface fault references}
    pub fault_references: Vec<InterfaceFaultReference>,
}

impl WsdlComponent for InterfaceOperation {}

impl InterfaceOperation {
    /// Create an operation with a name
    pub fn named(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    /// Display name, `(anonymous)` when unnamed
    pub fn display_name(&self) -> String {
        display_name(self.name.as_ref())
    }
}

/// The Interface Message Reference component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceMessageReference {
    /// {message label}
    pub message_label: Option<String>,
    /// {direction}
    pub direction: Option<Direction>,
    /// {message content model} / {element declaration}
    pub element: MessageContent,
}

impl WsdlComponent for InterfaceMessageReference {}

/// The Interface Fault Reference component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceFaultReference {
    /// Name of the referenced {interface fault}
    pub interface_fault: Option<QName>,
    /// {message label}
    pub message_label: Option<String>,
    /// {direction}
    pub direction: Option<Direction>,
}

impl WsdlComponent for InterfaceFaultReference {}

/// The Binding component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Binding {
    /// {name}
    pub name: Option<QName>,
    /// Name of the bound {interface}
    pub interface: Option<QName>,
    /// {type}
    pub binding_type: Option<String>,
    /// {binding faults}
    pub faults: Vec<BindingFault>,
    /// {binding operations}
    pub operations: Vec<BindingOperation>,
}

impl WsdlComponent for Binding {}

impl Binding {
    /// Create a binding with a name
    pub fn named(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    /// Display name, `(anonymous)` when unnamed
    pub fn display_name(&self) -> String {
        display_name(self.name.as_ref())
    }

    /// The bound interface, when declared and resolvable
    pub fn interface<'d>(&self, description: &'d Description) -> Option<&'d Interface> {
        self.interface
            .as_ref()
            .and_then(|name| description.interface(name))
    }

    /// Binding operations
    pub fn operations(&self) -> &[BindingOperation] {
        &self.operations
    }

    /// Binding faults
    pub fn faults(&self) -> &[BindingFault] {
        &self.faults
    }
}

/// The Binding Fault component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingFault {
    /// Name of the bound {interface fault}
    pub interface_fault: Option<QName>,
}

impl WsdlComponent for BindingFault {}

impl BindingFault {
    /// The bound interface fault, resolved through the binding's interface
    pub fn interface_fault<'d>(&self, binding: &Binding, description: &'d Description) -> Option<&'d InterfaceFault> {
        let name = self.interface_fault.as_ref()?;
        binding.interface(description)?.fault(name, description)
    }
}

/// The Binding Operation component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingOperation {
    /// Name of the bound {interface operation}
    pub interface_operation: Option<QName>,
    /// {binding message references}
    pub message_references: Vec<BindingMessageReference>,
    /// {binding fault references}
    pub fault_references: Vec<BindingFaultReference>,
}

impl WsdlComponent for BindingOperation {}

impl BindingOperation {
    /// Create a binding operation for an interface operation
    pub fn binding(interface_operation: QName) -> Self {
        Self {
            interface_operation: Some(interface_operation),
            ..Default::default()
        }
    }

    /// Display name of the bound operation
    pub fn display_name(&self) -> String {
        display_name(self.interface_operation.as_ref())
    }

    /// The bound interface operation, resolved through the binding's interface
    pub fn interface_operation<'d>(
        &self,
        binding: &Binding,
        description: &'d Description,
    ) -> Option<&'d InterfaceOperation> {
        let name = self.interface_operation.as_ref()?;
        binding.interface(description)?.operation(name, description)
    }
}

/// The Binding Message Reference component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingMessageReference {
    /// Label of the bound interface message reference
    pub message_label: Option<String>,
    /// Direction (`input` or `output`)
    pub direction: Option<Direction>,
}

impl WsdlComponent for BindingMessageReference {}

/// The Binding Fault Reference component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingFaultReference {
    /// Name of the referenced interface fault
    pub interface_fault: Option<QName>,
    /// Label of the bound interface fault reference
    pub message_label: Option<String>,
    /// Direction (`infault` or `outfault`)
    pub direction: Option<Direction>,
}

impl WsdlComponent for BindingFaultReference {}

/// The Service component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Service {
    /// {name}
    pub name: Option<QName>,
    /// Name of the implemented {interface}
    pub interface: Option<QName>,
    /// {endpoints}
    pub endpoints: Vec<Endpoint>,
}

impl WsdlComponent for Service {}

impl Service {
    /// Create a service with a name
    pub fn named(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    /// Display name, `(anonymous)` when unnamed
    pub fn display_name(&self) -> String {
        display_name(self.name.as_ref())
    }

    /// The implemented interface, when declared and resolvable
    pub fn interface<'d>(&self, description: &'d Description) -> Option<&'d Interface> {
        self.interface
            .as_ref()
            .and_then(|name| description.interface(name))
    }

    /// Endpoints
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }
}

/// The Endpoint component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Endpoint {
    /// {name} (an NCName, unique within the service)
    pub name: Option<String>,
    /// Name of the {binding}
    pub binding: Option<QName>,
    /// {address}
    pub address: Option<String>,
}

impl WsdlComponent for Endpoint {}

impl Endpoint {
    /// Display name, `(anonymous)` when unnamed
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "(anonymous)".to_string())
    }

    /// The endpoint's binding, when declared and resolvable
    pub fn binding<'d>(&self, description: &'d Description) -> Option<&'d Binding> {
        self.binding
            .as_ref()
            .and_then(|name| description.binding(name))
    }
}

fn display_name(name: Option<&QName>) -> String {
    name.map(|n| n.to_string())
        .unwrap_or_else(|| "(anonymous)".to_string())
}
