//! WSDL 2.0 element model
//!
//! A typed view of the XML elements of a description, before any
//! component-model interpretation: attribute values are kept as written
//! (QNames resolved, nothing defaulted). Each element remembers where it
//! appeared so document-level assertions can point at it.

use crate::namespaces::QName;
use crate::reporter::ErrorLocator;
use std::fmt;

use super::components::Direction;
use super::schemas::{ImportedSchema, InlinedSchema, Schema};

/// Value of an `element` attribute on a fault or message reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MessageContent {
    /// A global element declaration
    Element(QName),
    /// `#any`
    Any,
    /// `#none`
    None,
    /// `#other`, also used when the attribute is absent
    #[default]
    Other,
}

impl MessageContent {
    /// Parse an attribute value whose QName form is already resolved
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "#any" => Some(MessageContent::Any),
            "#none" => Some(MessageContent::None),
            "#other" => Some(MessageContent::Other),
            _ => None,
        }
    }

    /// The referenced element declaration, if any
    pub fn element_name(&self) -> Option<&QName> {
        match self {
            MessageContent::Element(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageContent::Element(name) => write!(f, "{}", name),
            MessageContent::Any => write!(f, "#any"),
            MessageContent::None => write!(f, "#none"),
            MessageContent::Other => write!(f, "#other"),
        }
    }
}

/// `<description>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionElement {
    /// Base URI of the document
    pub document_base_uri: Option<String>,
    /// `targetNamespace`
    pub target_namespace: Option<String>,
    /// `<import>` children
    pub imports: Vec<ImportElement>,
    /// `<include>` children
    pub includes: Vec<IncludeElement>,
    /// `<types>` child
    pub types: Option<TypesElement>,
    /// `<interface>` children
    pub interfaces: Vec<InterfaceElement>,
    /// `<binding>` children
    pub bindings: Vec<BindingElement>,
    /// `<service>` children
    pub services: Vec<ServiceElement>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

impl DescriptionElement {
    /// Create an empty description element
    pub fn new() -> Self {
        Self::default()
    }

    /// `<import>` children
    pub fn import_elements(&self) -> &[ImportElement] {
        &self.imports
    }

    /// `<types>` child
    pub fn types_element(&self) -> Option<&TypesElement> {
        self.types.as_ref()
    }

    /// `<interface>` children
    pub fn interface_elements(&self) -> &[InterfaceElement] {
        &self.interfaces
    }

    /// Qualify a local name with the target namespace
    pub fn qualify(&self, local_name: &str) -> QName {
        QName::new(self.target_namespace.clone(), local_name)
    }
}

/// `<import>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportElement {
    /// `namespace`
    pub namespace: Option<String>,
    /// `location`
    pub location: Option<String>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<include>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncludeElement {
    /// `location`
    pub location: Option<String>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<types>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypesElement {
    /// `xs:import` and `xs:schema` children, in document order
    pub schemas: Vec<Schema>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

impl TypesElement {
    /// All schemas, in document order
    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    /// `xs:import` children
    pub fn imported_schemas(&self) -> impl Iterator<Item = &ImportedSchema> {
        self.schemas.iter().filter_map(|schema| match schema {
            Schema::Imported(imported) => Some(imported),
            Schema::Inlined(_) => None,
        })
    }

    /// `xs:schema` children
    pub fn inlined_schemas(&self) -> impl Iterator<Item = &InlinedSchema> {
        self.schemas.iter().filter_map(|schema| match schema {
            Schema::Inlined(inlined) => Some(inlined),
            Schema::Imported(_) => None,
        })
    }
}

/// `<interface>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceElement {
    /// `name`
    pub name: Option<String>,
    /// `extends`
    pub extends: Vec<QName>,
    /// `styleDefault`
    pub style_default: Vec<String>,
    /// `<fault>` children
    pub faults: Vec<InterfaceFaultElement>,
    /// `<operation>` children
    pub operations: Vec<InterfaceOperationElement>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<interface>/<fault>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceFaultElement {
    /// `name`
    pub name: Option<String>,
    /// `element`
    pub element: Option<MessageContent>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<interface>/<operation>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceOperationElement {
    /// `name`
    pub name: Option<String>,
    /// `pattern`
    pub pattern: Option<String>,
    /// `style`
    pub style: Vec<String>,
    /// `<input>` children
    pub inputs: Vec<MessageReferenceElement>,
    /// `<output>` children
    pub outputs: Vec<MessageReferenceElement>,
    /// `<infault>` children
    pub infaults: Vec<FaultReferenceElement>,
    /// `<outfault>` children
    pub outfaults: Vec<FaultReferenceElement>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

impl InterfaceOperationElement {
    /// Inputs then outputs
    pub fn message_references(&self) -> impl Iterator<Item = &MessageReferenceElement> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Infaults then outfaults
    pub fn fault_references(&self) -> impl Iterator<Item = &FaultReferenceElement> {
        self.infaults.iter().chain(self.outfaults.iter())
    }
}

/// `<input>` / `<output>` of an interface operation
#[derive(Debug, Clone, PartialEq)]
pub struct MessageReferenceElement {
    /// `in` for `<input>`, `out` for `<output>`
    pub direction: Direction,
    /// `messageLabel`
    pub message_label: Option<String>,
    /// `element`
    pub element: Option<MessageContent>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<infault>` / `<outfault>` of an interface operation
#[derive(Debug, Clone, PartialEq)]
pub struct FaultReferenceElement {
    /// `in` for `<infault>`, `out` for `<outfault>`
    pub direction: Direction,
    /// `ref`
    pub reference: Option<QName>,
    /// `messageLabel`
    pub message_label: Option<String>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<binding>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingElement {
    /// `name`
    pub name: Option<String>,
    /// `interface`
    pub interface: Option<QName>,
    /// `type`
    pub binding_type: Option<String>,
    /// `<fault>` children
    pub faults: Vec<BindingFaultElement>,
    /// `<operation>` children
    pub operations: Vec<BindingOperationElement>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<binding>/<fault>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingFaultElement {
    /// `ref`
    pub reference: Option<QName>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<binding>/<operation>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingOperationElement {
    /// `ref`
    pub reference: Option<QName>,
    /// `<input>` / `<output>` children
    pub message_references: Vec<BindingMessageReferenceElement>,
    /// `<infault>` / `<outfault>` children
    pub fault_references: Vec<BindingFaultReferenceElement>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<input>` / `<output>` of a binding operation
#[derive(Debug, Clone, PartialEq)]
pub struct BindingMessageReferenceElement {
    /// Direction
    pub direction: Direction,
    /// `messageLabel`
    pub message_label: Option<String>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<infault>` / `<outfault>` of a binding operation
#[derive(Debug, Clone, PartialEq)]
pub struct BindingFaultReferenceElement {
    /// Direction
    pub direction: Direction,
    /// `ref`
    pub reference: Option<QName>,
    /// `messageLabel`
    pub message_label: Option<String>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<service>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceElement {
    /// `name`
    pub name: Option<String>,
    /// `interface`
    pub interface: Option<QName>,
    /// `<endpoint>` children
    pub endpoints: Vec<EndpointElement>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

/// `<service>/<endpoint>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointElement {
    /// `name`
    pub name: Option<String>,
    /// `binding`
    pub binding: Option<QName>,
    /// `address`
    pub address: Option<String>,
    /// Where the element appears
    pub locator: ErrorLocator,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wsdl::schemas::SchemaDocument;

    #[test]
    fn test_message_content_tokens() {
        assert_eq!(MessageContent::from_token("#any"), Some(MessageContent::Any));
        assert_eq!(MessageContent::from_token(" #none "), Some(MessageContent::None));
        assert_eq!(MessageContent::from_token("tns:greet"), None);
        assert_eq!(MessageContent::default(), MessageContent::Other);

        let element = MessageContent::Element(QName::namespaced("urn:greeter", "greet"));
        assert_eq!(element.to_string(), "{urn:greeter}greet");
        assert!(element.element_name().is_some());
    }

    #[test]
    fn test_types_partitions_schemas() {
        let types = TypesElement {
            schemas: vec![
                Schema::Inlined(InlinedSchema {
                    id: Some("s1".to_string()),
                    document: SchemaDocument::default(),
                    locator: ErrorLocator::new(),
                }),
                Schema::Imported(ImportedSchema {
                    namespace: Some("urn:types".to_string()),
                    schema_location: None,
                    referenced: None,
                    locator: ErrorLocator::new(),
                }),
            ],
            locator: ErrorLocator::new(),
        };

        assert_eq!(types.inlined_schemas().count(), 1);
        assert_eq!(types.imported_schemas().count(), 1);
    }
}
