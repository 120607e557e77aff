//! WSDL 2.0 reader
//!
//! Reading happens in three steps:
//!
//! 1. parse the XML into a [`Document`] and build the element model,
//!    loading any schemas that `<types>` imports;
//! 2. derive the component model from the element model, filling in
//!    defaulted properties (message exchange pattern, message labels,
//!    operation style);
//! 3. optionally run the document, component and table-driven validators
//!    and attach their combined report.
//!
//! # Example
//!
//! ```rust,ignore
//! use woden::wsdl::{ReaderConfig, WsdlReader};
//!
//! let reader = WsdlReader::with_config(ReaderConfig::new().with_validation(true));
//! let document = reader.read_file("greeter.wsdl")?;
//! for diagnostic in &document.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! ```

use crate::catalog::{DefaultUriResolver, UriResolver, XmlCatalog};
use crate::documents::{Document, Element};
use crate::error::{ParseError, Result};
use crate::limits::Limits;
use crate::loaders::Loader;
use crate::locations::Location;
use crate::names;
use crate::namespaces::{QName, WSDL_NAMESPACE, XSD_NAMESPACE};
use crate::reporter::{CollectingReporter, ErrorLocator, ReportedError};
use crate::validators::{
    ExtensionRegistry, ValidationReport, WodenContext, WsdlComponentValidator,
    WsdlDocumentValidator, WsdlValidator,
};
use std::path::Path;
use url::Url;

use super::components::{
    Binding, BindingFault, BindingFaultReference, BindingMessageReference, BindingOperation,
    Description, Direction, Endpoint, Interface, InterfaceFault, InterfaceFaultReference,
    InterfaceMessageReference, InterfaceOperation, Service,
};
use super::elements::{
    BindingElement, BindingFaultElement, BindingFaultReferenceElement,
    BindingMessageReferenceElement, BindingOperationElement, DescriptionElement, EndpointElement,
    FaultReferenceElement, ImportElement, IncludeElement, InterfaceElement, InterfaceFaultElement,
    InterfaceOperationElement, MessageContent, MessageReferenceElement, ServiceElement,
    TypesElement,
};
use super::patterns;
use super::schemas::{ImportedSchema, InlinedSchema, Schema, SchemaDocument};

/// Reader configuration
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Limits applied to every parsed document
    pub limits: Limits,
    /// Whether remote schema locations may be loaded
    pub allow_remote: bool,
    /// Whether to validate after reading
    pub validation: bool,
    /// Catalog used to remap schema locations and to dereference IRIs
    pub catalog: Option<XmlCatalog>,
    /// Extension assertions handed to the table-driven validator
    pub registry: ExtensionRegistry,
}

impl ReaderConfig {
    /// Default configuration: validation on, remote loading off
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            allow_remote: false,
            validation: true,
            catalog: None,
            registry: ExtensionRegistry::new(),
        }
    }

    /// Set the document limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Allow or forbid remote schema locations
    pub fn with_allow_remote(mut self, allow: bool) -> Self {
        self.allow_remote = allow;
        self
    }

    /// Enable or disable validation after reading
    pub fn with_validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    /// Use an XML catalog
    pub fn with_catalog(mut self, catalog: XmlCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Register extension assertions
    pub fn with_extension_registry(mut self, registry: ExtensionRegistry) -> Self {
        self.registry = registry;
        self
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A description read from a document
#[derive(Debug, Clone)]
pub struct WsdlDocument {
    /// Base URI of the document, absent for in-memory input
    pub document_base_uri: Option<String>,
    /// The element model
    pub element: DescriptionElement,
    /// The component model
    pub description: Description,
    /// Combined validation report, when validation ran
    pub report: Option<ValidationReport>,
    /// Every violation reported during validation
    pub diagnostics: Vec<ReportedError>,
}

impl WsdlDocument {
    /// Valid unless validation ran and reported an error
    pub fn is_valid(&self) -> bool {
        self.report.as_ref().map_or(true, ValidationReport::is_valid)
    }
}

/// Reads WSDL 2.0 documents
#[derive(Debug, Clone, Default)]
pub struct WsdlReader {
    config: ReaderConfig,
    loader: Loader,
}

impl WsdlReader {
    /// Create a reader with the default configuration
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    /// Create a reader with the given configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        let loader = Loader::new()
            .with_limits(config.limits.clone())
            .with_allow_remote(config.allow_remote);
        Self { config, loader }
    }

    /// The reader's configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read a description from a file
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<WsdlDocument> {
        let location = Location::Path(path.as_ref().to_path_buf());
        self.read_location(&location)
    }

    /// Read a description from any supported location
    pub fn read_location(&self, location: &Location) -> Result<WsdlDocument> {
        tracing::debug!(location = %location.as_str(), "reading description");
        let xml = self.loader.load(location)?;
        self.read_document(&xml, location.base_url())
    }

    /// Read a description from a string; relative schema locations resolve
    /// against the working directory
    pub fn read_str(&self, xml: &str) -> Result<WsdlDocument> {
        self.read_document(xml, None)
    }

    /// Read a description from a string with an explicit base URI
    pub fn read_str_with_base(&self, xml: &str, base: &Url) -> Result<WsdlDocument> {
        self.read_document(xml, Some(base.clone()))
    }

    fn read_document(&self, xml: &str, base: Option<Url>) -> Result<WsdlDocument> {
        let document = Document::parse(xml, self.loader.limits())?;
        let root = document
            .root()
            .ok_or_else(|| ParseError::new("document has no root element"))?;

        let builder = ElementBuilder {
            base: base.as_ref(),
            loader: &self.loader,
            catalog: self.config.catalog.as_ref(),
        };
        let element = builder.description(root)?;
        let description = build_description(&element);
        tracing::debug!(
            interfaces = description.interfaces.len(),
            bindings = description.bindings.len(),
            services = description.services.len(),
            "built component model"
        );

        let mut wsdl = WsdlDocument {
            document_base_uri: base.map(|url| url.to_string()),
            element,
            description,
            report: None,
            diagnostics: Vec::new(),
        };

        if self.config.validation {
            let diagnostics = self.validate(&wsdl.element, &wsdl.description)?;
            wsdl.report = Some(ValidationReport::from_reported(&diagnostics));
            wsdl.diagnostics = diagnostics;
        }

        Ok(wsdl)
    }

    /// Run the document, component and table-driven validators
    ///
    /// A table-driven report that repeats one already made by the document
    /// or component validator is dropped. Repeats within one validator are
    /// kept.
    pub fn validate(
        &self,
        element: &DescriptionElement,
        description: &Description,
    ) -> Result<Vec<ReportedError>> {
        let engine = WsdlValidator::new(&self.config.registry)?;

        let mut collected = CollectingReporter::new();
        WsdlDocumentValidator::new().validate(element, &mut collected);
        WsdlComponentValidator::new().validate(description, &mut collected);

        let default_resolver = DefaultUriResolver;
        let resolver: &dyn UriResolver = match self.config.catalog.as_ref() {
            Some(catalog) => catalog,
            None => &default_resolver,
        };
        let mark = collected.reported().len();
        {
            let mut context = WodenContext::new(&mut collected, resolver);
            engine.validate(element, description, &mut context)?;
        }

        collected.drop_repeats_since(mark);
        tracing::debug!(
            errors = collected.error_count(),
            warnings = collected.warning_count(),
            "validated description"
        );
        Ok(collected.into_reported())
    }
}

/// Builds the element model of one document
struct ElementBuilder<'r> {
    base: Option<&'r Url>,
    loader: &'r Loader,
    catalog: Option<&'r XmlCatalog>,
}

impl<'r> ElementBuilder<'r> {
    fn locate(&self, element: &Element) -> ErrorLocator {
        let locator = ErrorLocator::at(element);
        match self.base {
            Some(base) => locator.with_document_base_uri(base.as_str()),
            None => locator,
        }
    }

    fn error(&self, element: &Element, message: impl Into<String>) -> ParseError {
        let error = ParseError::new(message).with_element(element.describe());
        let location = self.locate(element).to_string();
        if location.is_empty() {
            error
        } else {
            error.with_location(location)
        }
    }

    fn required<'e>(&self, element: &'e Element, name: &str) -> Result<&'e str> {
        element.get_attribute(name).ok_or_else(|| {
            self.error(element, format!("missing required attribute '{}'", name))
                .into()
        })
    }

    fn ncname(&self, element: &Element, name: &str) -> Result<String> {
        let value = self.required(element, name)?;
        if !names::is_valid_ncname(value) {
            return Err(self
                .error(element, format!("'{}' is not a valid NCName", value))
                .into());
        }
        Ok(value.to_string())
    }

    fn qname(&self, element: &Element, name: &str) -> Result<QName> {
        let value = self.required(element, name)?;
        element.namespaces.resolve(value)
    }

    fn qname_list(&self, element: &Element, name: &str) -> Result<Vec<QName>> {
        element
            .get_attribute(name)
            .map(|value| {
                value
                    .split_whitespace()
                    .map(|token| element.namespaces.resolve(token))
                    .collect()
            })
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn message_content(&self, element: &Element) -> Result<Option<MessageContent>> {
        let Some(value) = element.get_attribute("element") else {
            return Ok(None);
        };
        if let Some(token) = MessageContent::from_token(value) {
            return Ok(Some(token));
        }
        Ok(Some(MessageContent::Element(element.namespaces.resolve(value)?)))
    }

    fn description(&self, root: &Element) -> Result<DescriptionElement> {
        if !root.is(WSDL_NAMESPACE, "description") {
            return Err(self
                .error(
                    root,
                    format!("expected {{{}}}description, found {}", WSDL_NAMESPACE, root.qname),
                )
                .into());
        }

        let mut description = DescriptionElement {
            document_base_uri: self.base.map(|url| url.to_string()),
            target_namespace: Some(self.required(root, "targetNamespace")?.to_string()),
            locator: self.locate(root),
            ..Default::default()
        };

        for child in wsdl_children(root) {
            match child.local_name() {
                "import" => description.imports.push(ImportElement {
                    namespace: attribute(child, "namespace"),
                    location: attribute(child, "location"),
                    locator: self.locate(child),
                }),
                "include" => description.includes.push(IncludeElement {
                    location: attribute(child, "location"),
                    locator: self.locate(child),
                }),
                "types" => {
                    if description.types.is_some() {
                        return Err(self.error(child, "more than one <types> element").into());
                    }
                    description.types = Some(self.types(child));
                }
                "interface" => description.interfaces.push(self.interface(child)?),
                "binding" => description.bindings.push(self.binding(child)?),
                "service" => description.services.push(self.service(child)?),
                "documentation" => {}
                other => tracing::debug!(element = other, "ignoring unknown WSDL element"),
            }
        }

        Ok(description)
    }

    fn types(&self, types: &Element) -> TypesElement {
        let mut schemas = Vec::new();
        let mut loaded = 0;
        for child in &types.children {
            if child.is(XSD_NAMESPACE, "import") {
                let namespace = attribute(child, "namespace");
                let schema_location = attribute(child, "schemaLocation");
                let referenced = match self.loader.limits().check_schema_imports(loaded + 1) {
                    Ok(()) => self.load_schema(namespace.as_deref(), schema_location.as_deref()),
                    Err(error) => {
                        tracing::warn!(%error, "not loading imported schema");
                        None
                    }
                };
                if referenced.is_some() {
                    loaded += 1;
                }
                schemas.push(Schema::Imported(ImportedSchema {
                    namespace,
                    schema_location,
                    referenced,
                    locator: self.locate(child),
                }));
            } else if child.is(XSD_NAMESPACE, "schema") {
                schemas.push(Schema::Inlined(InlinedSchema {
                    id: attribute(child, "id"),
                    document: SchemaDocument::from_element(child),
                    locator: self.locate(child),
                }));
            }
        }

        TypesElement {
            schemas,
            locator: self.locate(types),
        }
    }

    /// Load an imported schema; failures leave the import unresolved
    fn load_schema(
        &self,
        namespace: Option<&str>,
        schema_location: Option<&str>,
    ) -> Option<SchemaDocument> {
        let mapped = self.catalog.and_then(|catalog| {
            schema_location
                .and_then(|location| catalog.lookup(location))
                .or_else(|| namespace.and_then(|ns| catalog.lookup(ns)))
        });
        let reference = mapped.or(schema_location)?;

        let loaded = Location::resolve(self.base, reference)
            .and_then(|location| self.loader.load(&location))
            .and_then(|xml| Document::parse(&xml, self.loader.limits()));

        match loaded {
            Ok(document) => {
                let root = document.root()?;
                if !root.is(XSD_NAMESPACE, "schema") {
                    tracing::warn!(location = reference, "imported document is not a schema");
                    return None;
                }
                tracing::trace!(location = reference, "loaded imported schema");
                Some(SchemaDocument::from_element(root))
            }
            Err(error) => {
                tracing::warn!(location = reference, %error, "could not load imported schema");
                None
            }
        }
    }

    fn interface(&self, element: &Element) -> Result<InterfaceElement> {
        let mut interface = InterfaceElement {
            name: Some(self.ncname(element, "name")?),
            extends: self.qname_list(element, "extends")?,
            style_default: iri_list(element, "styleDefault"),
            locator: self.locate(element),
            ..Default::default()
        };

        for child in wsdl_children(element) {
            match child.local_name() {
                "fault" => interface.faults.push(InterfaceFaultElement {
                    name: Some(self.ncname(child, "name")?),
                    element: self.message_content(child)?,
                    locator: self.locate(child),
                }),
                "operation" => interface.operations.push(self.interface_operation(child)?),
                _ => {}
            }
        }

        Ok(interface)
    }

    fn interface_operation(&self, element: &Element) -> Result<InterfaceOperationElement> {
        let mut operation = InterfaceOperationElement {
            name: Some(self.ncname(element, "name")?),
            pattern: attribute(element, "pattern"),
            style: iri_list(element, "style"),
            locator: self.locate(element),
            ..Default::default()
        };

        for child in wsdl_children(element) {
            match child.local_name() {
                "input" => operation
                    .inputs
                    .push(self.message_reference(child, Direction::In)?),
                "output" => operation
                    .outputs
                    .push(self.message_reference(child, Direction::Out)?),
                "infault" => operation
                    .infaults
                    .push(self.fault_reference(child, Direction::In)?),
                "outfault" => operation
                    .outfaults
                    .push(self.fault_reference(child, Direction::Out)?),
                _ => {}
            }
        }

        Ok(operation)
    }

    fn message_reference(
        &self,
        element: &Element,
        direction: Direction,
    ) -> Result<MessageReferenceElement> {
        Ok(MessageReferenceElement {
            direction,
            message_label: attribute(element, "messageLabel"),
            element: self.message_content(element)?,
            locator: self.locate(element),
        })
    }

    fn fault_reference(
        &self,
        element: &Element,
        direction: Direction,
    ) -> Result<FaultReferenceElement> {
        Ok(FaultReferenceElement {
            direction,
            reference: Some(self.qname(element, "ref")?),
            message_label: attribute(element, "messageLabel"),
            locator: self.locate(element),
        })
    }

    fn binding(&self, element: &Element) -> Result<BindingElement> {
        let mut binding = BindingElement {
            name: Some(self.ncname(element, "name")?),
            interface: element.get_qname_attribute("interface")?,
            binding_type: Some(self.required(element, "type")?.to_string()),
            locator: self.locate(element),
            ..Default::default()
        };

        for child in wsdl_children(element) {
            match child.local_name() {
                "fault" => binding.faults.push(BindingFaultElement {
                    reference: Some(self.qname(child, "ref")?),
                    locator: self.locate(child),
                }),
                "operation" => binding.operations.push(self.binding_operation(child)?),
                _ => {}
            }
        }

        Ok(binding)
    }

    fn binding_operation(&self, element: &Element) -> Result<BindingOperationElement> {
        let mut operation = BindingOperationElement {
            reference: Some(self.qname(element, "ref")?),
            locator: self.locate(element),
            ..Default::default()
        };

        for child in wsdl_children(element) {
            let direction = match child.local_name() {
                "input" | "infault" => Direction::In,
                "output" | "outfault" => Direction::Out,
                _ => continue,
            };
            if child.local_name().ends_with("fault") {
                operation
                    .fault_references
                    .push(BindingFaultReferenceElement {
                        direction,
                        reference: Some(self.qname(child, "ref")?),
                        message_label: attribute(child, "messageLabel"),
                        locator: self.locate(child),
                    });
            } else {
                operation
                    .message_references
                    .push(BindingMessageReferenceElement {
                        direction,
                        message_label: attribute(child, "messageLabel"),
                        locator: self.locate(child),
                    });
            }
        }

        Ok(operation)
    }

    fn service(&self, element: &Element) -> Result<ServiceElement> {
        let mut service = ServiceElement {
            name: Some(self.ncname(element, "name")?),
            interface: Some(self.qname(element, "interface")?),
            locator: self.locate(element),
            ..Default::default()
        };

        for child in wsdl_children(element).filter(|c| c.local_name() == "endpoint") {
            service.endpoints.push(EndpointElement {
                name: Some(self.ncname(child, "name")?),
                binding: Some(self.qname(child, "binding")?),
                address: attribute(child, "address"),
                locator: self.locate(child),
            });
        }

        Ok(service)
    }
}

fn wsdl_children(element: &Element) -> impl Iterator<Item = &Element> {
    element
        .children
        .iter()
        .filter(|child| child.qname.is_in(WSDL_NAMESPACE))
}

fn attribute(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(name).map(|value| value.to_string())
}

fn iri_list(element: &Element, name: &str) -> Vec<String> {
    element
        .get_attribute(name)
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Derive the component model from an element model
///
/// Cross references stay as QNames. An operation without a `pattern` gets
/// the in-out pattern, and message references without a `messageLabel` get
/// the label their pattern implies.
pub fn build_description(element: &DescriptionElement) -> Description {
    let mut description = Description {
        target_namespace: element.target_namespace.clone(),
        ..Default::default()
    };

    if let Some(types) = element.types_element() {
        for schema in types.schemas().iter().filter_map(Schema::document) {
            description
                .element_declarations
                .extend(schema.element_declarations.iter().cloned());
            description
                .type_definitions
                .extend(schema.type_definitions.iter().cloned());
        }
    }

    description.interfaces = element
        .interfaces
        .iter()
        .map(|interface| build_interface(element, interface))
        .collect();

    // Bindings read operation patterns through the interfaces built above
    let bindings: Vec<Binding> = element
        .bindings
        .iter()
        .map(|binding| build_binding(element, binding, &description))
        .collect();
    description.bindings = bindings;

    description.services = element
        .services
        .iter()
        .map(|service| Service {
            name: service.name.as_deref().map(|n| element.qualify(n)),
            interface: service.interface.clone(),
            endpoints: service
                .endpoints
                .iter()
                .map(|endpoint| Endpoint {
                    name: endpoint.name.clone(),
                    binding: endpoint.binding.clone(),
                    address: endpoint.address.clone(),
                })
                .collect(),
        })
        .collect();

    description
}

fn build_interface(description: &DescriptionElement, interface: &InterfaceElement) -> Interface {
    Interface {
        name: interface.name.as_deref().map(|n| description.qualify(n)),
        extended_interfaces: interface.extends.clone(),
        style_default: interface.style_default.clone(),
        faults: interface
            .faults
            .iter()
            .map(|fault| InterfaceFault {
                name: fault.name.as_deref().map(|n| description.qualify(n)),
                element: fault.element.clone().unwrap_or_default(),
            })
            .collect(),
        operations: interface
            .operations
            .iter()
            .map(|operation| build_interface_operation(description, interface, operation))
            .collect(),
    }
}

fn build_interface_operation(
    description: &DescriptionElement,
    interface: &InterfaceElement,
    operation: &InterfaceOperationElement,
) -> InterfaceOperation {
    let pattern = operation
        .pattern
        .clone()
        .unwrap_or_else(|| patterns::DEFAULT_PATTERN.to_string());
    let known = patterns::lookup(&pattern);

    let style = if operation.style.is_empty() {
        interface.style_default.clone()
    } else {
        operation.style.clone()
    };

    InterfaceOperation {
        name: operation.name.as_deref().map(|n| description.qualify(n)),
        style,
        message_references: operation
            .message_references()
            .map(|reference| InterfaceMessageReference {
                message_label: reference.message_label.clone().or_else(|| {
                    known
                        .and_then(|p| p.default_message_label(reference.direction))
                        .map(str::to_string)
                }),
                direction: Some(reference.direction),
                element: reference.element.clone().unwrap_or_default(),
            })
            .collect(),
        fault_references: operation
            .fault_references()
            .map(|reference| InterfaceFaultReference {
                interface_fault: reference.reference.clone(),
                message_label: reference.message_label.clone().or_else(|| {
                    known
                        .and_then(|p| p.default_fault_label(reference.direction))
                        .map(str::to_string)
                }),
                direction: Some(reference.direction),
            })
            .collect(),
        pattern: Some(pattern),
    }
}

fn build_binding(
    element: &DescriptionElement,
    binding: &BindingElement,
    description: &Description,
) -> Binding {
    let interface = binding
        .interface
        .as_ref()
        .and_then(|name| description.interface(name));

    let operations = binding
        .operations
        .iter()
        .map(|operation| {
            let pattern = interface
                .zip(operation.reference.as_ref())
                .and_then(|(interface, name)| interface.operation(name, description))
                .and_then(|op| op.pattern.as_deref())
                .and_then(patterns::lookup);

            BindingOperation {
                interface_operation: operation.reference.clone(),
                message_references: operation
                    .message_references
                    .iter()
                    .map(|reference| BindingMessageReference {
                        message_label: reference.message_label.clone().or_else(|| {
                            pattern
                                .and_then(|p| p.default_message_label(reference.direction))
                                .map(str::to_string)
                        }),
                        direction: Some(reference.direction),
                    })
                    .collect(),
                fault_references: operation
                    .fault_references
                    .iter()
                    .map(|reference| BindingFaultReference {
                        interface_fault: reference.reference.clone(),
                        message_label: reference.message_label.clone().or_else(|| {
                            pattern
                                .and_then(|p| p.default_fault_label(reference.direction))
                                .map(str::to_string)
                        }),
                        direction: Some(reference.direction),
                    })
                    .collect(),
            }
        })
        .collect();

    Binding {
        name: binding.name.as_deref().map(|n| element.qualify(n)),
        interface: binding.interface.clone(),
        binding_type: binding.binding_type.clone(),
        faults: binding
            .faults
            .iter()
            .map(|fault| BindingFault {
                interface_fault: fault.reference.clone(),
            })
            .collect(),
        operations,
    }
}
