//! Document-level validation
//!
//! Checks on the element model that need the document as written: the
//! target namespace, imports, the `<types>` schemas and the raw `element`
//! and `messageLabel` attributes of interfaces. Reports carry the locator
//! of the offending element.

use crate::namespaces::{QName, XSD_NAMESPACE};
use crate::reporter::{ErrorLocator, ErrorReporter, Severity};
use crate::wsdl::elements::{
    DescriptionElement, ImportElement, InterfaceElement, InterfaceOperationElement, TypesElement,
};
use crate::wsdl::patterns::{self, DEFAULT_PATTERN};
use crate::wsdl::{ImportedSchema, InlinedSchema, MessageContent};
use indexmap::IndexMap;

use super::helpers::is_absolute_iri;
use super::validation::{Tally, ValidationReport};

fn report(reporter: &mut dyn ErrorReporter, locator: &ErrorLocator, message_id: &str, args: Vec<String>) {
    reporter.report_error(locator.clone(), message_id, &args, Severity::Error);
}

fn display(name: Option<&str>) -> String {
    name.unwrap_or("(anonymous)").to_string()
}

/// Validator for the element model
#[derive(Debug, Clone, Copy, Default)]
pub struct WsdlDocumentValidator;

impl WsdlDocumentValidator {
    /// Create a validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a description element and everything below it
    ///
    /// Every check runs; a failure never hides a later one.
    pub fn validate(
        &self,
        description: &DescriptionElement,
        reporter: &mut dyn ErrorReporter,
    ) -> ValidationReport {
        tracing::debug!(
            target_namespace = description.target_namespace.as_deref().unwrap_or(""),
            "validating description element"
        );

        let mut tally = Tally::new(reporter);
        let mut valid = self.test_assertion_description_1006(description, &mut tally);

        for import in description.import_elements() {
            valid &= self.test_assertion_description_1013(import, description, &mut tally);
        }

        let types = description.types_element();
        if let Some(types) = types {
            for imported in types.imported_schemas() {
                valid &= self.test_assertion_schema_1069(imported, &mut tally);
                valid &= self.test_assertion_schema_1070(imported, &mut tally);
            }
            valid &= self.test_assertion_schema_1073(types, &mut tally);
        }

        for interface in description.interface_elements() {
            valid &= self.validate_interface(interface, types, &mut tally);
        }

        let report = tally.into_report();
        tracing::debug!(valid, errors = report.errors, "description element checked");
        report
    }

    fn validate_interface(
        &self,
        interface: &InterfaceElement,
        types: Option<&TypesElement>,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let mut valid = self.test_assertion_interface_1011(interface, reporter);

        for fault in &interface.faults {
            if let Some(name) = fault.element.as_ref().and_then(MessageContent::element_name) {
                valid &= self.test_assertion_schema_1066(name, types, &fault.locator, reporter);
            }
        }

        for operation in &interface.operations {
            for message in operation.message_references() {
                if let Some(name) = message.element.as_ref().and_then(MessageContent::element_name) {
                    valid &= self.test_assertion_schema_1066(name, types, &message.locator, reporter);
                }
            }
            valid &= self.test_assertion_message_label_1034(operation, reporter);
            valid &= self.test_assertion_message_label_1035(operation, reporter);
        }

        valid
    }

    /// Description-1006: the target namespace is an absolute IRI
    pub fn test_assertion_description_1006(
        &self,
        description: &DescriptionElement,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        match description.target_namespace.as_deref() {
            Some(namespace) if !is_absolute_iri(namespace) => {
                report(
                    reporter,
                    &description.locator,
                    "Description-1006",
                    vec![namespace.to_string()],
                );
                false
            }
            _ => true,
        }
    }

    /// Description-1013: an import does not name the importing document's
    /// own target namespace
    pub fn test_assertion_description_1013(
        &self,
        import: &ImportElement,
        description: &DescriptionElement,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        match (import.namespace.as_deref(), description.target_namespace.as_deref()) {
            (Some(imported), Some(own)) if imported == own => {
                report(
                    reporter,
                    &import.locator,
                    "Description-1013",
                    vec![imported.to_string()],
                );
                false
            }
            _ => true,
        }
    }

    /// Schema-1069: a loaded imported schema has a target namespace
    pub fn test_assertion_schema_1069(
        &self,
        imported: &ImportedSchema,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        match &imported.referenced {
            Some(schema) if schema.target_namespace.is_none() => {
                report(
                    reporter,
                    &imported.locator,
                    "Schema-1069",
                    vec![
                        imported.namespace.clone().unwrap_or_default(),
                        imported.schema_location.clone().unwrap_or_default(),
                    ],
                );
                false
            }
            _ => true,
        }
    }

    /// Schema-1070: a loaded imported schema's target namespace is the one
    /// it was imported for
    pub fn test_assertion_schema_1070(
        &self,
        imported: &ImportedSchema,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let Some(target) = imported
            .referenced
            .as_ref()
            .and_then(|schema| schema.target_namespace.as_deref())
        else {
            return true;
        };

        if imported.namespace.as_deref() == Some(target) {
            return true;
        }

        report(
            reporter,
            &imported.locator,
            "Schema-1070",
            vec![
                imported.schema_location.clone().unwrap_or_default(),
                target.to_string(),
                imported.namespace.clone().unwrap_or_default(),
            ],
        );
        false
    }

    /// Schema-1073 and Schema-1073b: inlined schemas sharing a target
    /// namespace do not declare the same global element or type twice
    ///
    /// Each schema is checked against the schemas before it, so a
    /// collision is reported at the later schema. Schemas without a target
    /// namespace are not checked.
    pub fn test_assertion_schema_1073(
        &self,
        types: &TypesElement,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let mut groups: IndexMap<&str, Vec<&InlinedSchema>> = IndexMap::new();
        let mut valid = true;

        for schema in types.inlined_schemas() {
            let Some(namespace) = schema.target_namespace() else {
                continue;
            };
            let prior = groups.entry(namespace).or_default();

            for name in &schema.document.element_declarations {
                if prior.iter().any(|p| p.document.declares_element(name)) {
                    report(
                        reporter,
                        &schema.locator,
                        "Schema-1073",
                        vec![name.local_name.clone(), namespace.to_string()],
                    );
                    valid = false;
                }
            }
            for name in &schema.document.type_definitions {
                if prior.iter().any(|p| p.document.defines_type(name)) {
                    report(
                        reporter,
                        &schema.locator,
                        "Schema-1073b",
                        vec![name.local_name.clone(), namespace.to_string()],
                    );
                    valid = false;
                }
            }

            prior.push(schema);
        }

        valid
    }

    /// Interface-1011: every `styleDefault` IRI is absolute
    pub fn test_assertion_interface_1011(
        &self,
        interface: &InterfaceElement,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let mut valid = true;
        for style in interface.style_default.iter().filter(|s| !is_absolute_iri(s)) {
            report(
                reporter,
                &interface.locator,
                "Interface-1011",
                vec![style.clone(), display(interface.name.as_deref())],
            );
            valid = false;
        }
        valid
    }

    /// Schema-1066: an `element` reference names the XML Schema namespace
    /// or a namespace some schema in `<types>` contributes to
    pub fn test_assertion_schema_1066(
        &self,
        name: &QName,
        types: Option<&TypesElement>,
        locator: &ErrorLocator,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        if name.is_in(XSD_NAMESPACE) {
            return true;
        }

        let available = types.is_some_and(|types| {
            types
                .schemas()
                .iter()
                .any(|schema| schema.namespace() == name.namespace())
        });
        if !available {
            report(reporter, locator, "Schema-1066", vec![name.to_string()]);
        }
        available
    }

    /// MessageLabel-1034: an explicit `messageLabel` on an input or output
    /// is a placeholder of the operation's predefined pattern
    pub fn test_assertion_message_label_1034(
        &self,
        operation: &InterfaceOperationElement,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let labels = operation
            .message_references()
            .map(|m| (m.message_label.as_deref(), &m.locator));
        self.check_labels(operation, labels, "MessageLabel-1034", reporter)
    }

    /// MessageLabel-1035: an explicit `messageLabel` on an infault or
    /// outfault is a placeholder of the operation's predefined pattern
    pub fn test_assertion_message_label_1035(
        &self,
        operation: &InterfaceOperationElement,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let labels = operation
            .fault_references()
            .map(|f| (f.message_label.as_deref(), &f.locator));
        self.check_labels(operation, labels, "MessageLabel-1035", reporter)
    }

    fn check_labels<'a>(
        &self,
        operation: &InterfaceOperationElement,
        labels: impl Iterator<Item = (Option<&'a str>, &'a ErrorLocator)>,
        message_id: &str,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let pattern_iri = operation.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
        let Some(pattern) = patterns::lookup(pattern_iri) else {
            return true;
        };

        let mut valid = true;
        for (label, locator) in labels {
            let Some(label) = label else {
                continue;
            };
            if !pattern.has_placeholder(label) {
                report(
                    reporter,
                    locator,
                    message_id,
                    vec![
                        label.to_string(),
                        display(operation.name.as_deref()),
                        pattern.iri.to_string(),
                    ],
                );
                valid = false;
            }
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::CollectingReporter;
    use crate::wsdl::components::Direction;
    use crate::wsdl::elements::{FaultReferenceElement, MessageReferenceElement};
    use crate::wsdl::{Schema, SchemaDocument};

    const NS: &str = "http://example.com/greeter";

    fn inlined(namespace: Option<&str>, elements: &[&str], types: &[&str]) -> Schema {
        let qualify = |local: &&str| QName::new(namespace, *local);
        Schema::Inlined(InlinedSchema {
            id: None,
            document: SchemaDocument {
                target_namespace: namespace.map(str::to_string),
                element_declarations: elements.iter().map(qualify).collect(),
                type_definitions: types.iter().map(qualify).collect(),
            },
            locator: ErrorLocator::new(),
        })
    }

    fn imported(namespace: &str, target: Option<&str>) -> ImportedSchema {
        ImportedSchema {
            namespace: Some(namespace.to_string()),
            schema_location: Some("greeter.xsd".to_string()),
            referenced: Some(SchemaDocument {
                target_namespace: target.map(str::to_string),
                ..Default::default()
            }),
            locator: ErrorLocator::new(),
        }
    }

    #[test]
    fn test_description_1006() {
        let validator = WsdlDocumentValidator::new();
        let mut reporter = CollectingReporter::new();

        let mut description = DescriptionElement::new();
        assert!(validator.test_assertion_description_1006(&description, &mut reporter));

        description.target_namespace = Some("greeter".to_string());
        assert!(!validator.test_assertion_description_1006(&description, &mut reporter));
        assert_eq!(reporter.reported()[0].args, vec!["greeter"]);
    }

    #[test]
    fn test_description_1013_self_import() {
        let validator = WsdlDocumentValidator::new();
        let mut reporter = CollectingReporter::new();
        let description = DescriptionElement {
            target_namespace: Some(NS.to_string()),
            ..Default::default()
        };

        let own = ImportElement {
            namespace: Some(NS.to_string()),
            ..Default::default()
        };
        let other = ImportElement {
            namespace: Some("http://example.com/other".to_string()),
            ..Default::default()
        };
        assert!(!validator.test_assertion_description_1013(&own, &description, &mut reporter));
        assert!(validator.test_assertion_description_1013(&other, &description, &mut reporter));
        assert_eq!(reporter.ids(), vec!["Description-1013"]);
    }

    #[test]
    fn test_imported_schema_namespaces() {
        let validator = WsdlDocumentValidator::new();
        let mut reporter = CollectingReporter::new();

        assert!(validator.test_assertion_schema_1069(&imported(NS, Some(NS)), &mut reporter));
        assert!(validator.test_assertion_schema_1070(&imported(NS, Some(NS)), &mut reporter));

        let untargeted = imported(NS, None);
        assert!(!validator.test_assertion_schema_1069(&untargeted, &mut reporter));
        assert!(validator.test_assertion_schema_1070(&untargeted, &mut reporter));

        let mismatched = imported(NS, Some("http://example.com/elsewhere"));
        assert!(!validator.test_assertion_schema_1070(&mismatched, &mut reporter));

        assert_eq!(reporter.ids(), vec!["Schema-1069", "Schema-1070"]);
        assert_eq!(
            reporter.reported()[1].args,
            vec!["greeter.xsd", "http://example.com/elsewhere", NS]
        );

        let unloaded = ImportedSchema {
            referenced: None,
            ..imported(NS, None)
        };
        assert!(validator.test_assertion_schema_1069(&unloaded, &mut reporter));
    }

    #[test]
    fn test_schema_1073_reports_later_schema() {
        let validator = WsdlDocumentValidator::new();
        let mut reporter = CollectingReporter::new();
        let types = TypesElement {
            schemas: vec![
                inlined(Some(NS), &["greeting", "reply"], &["GreetingType"]),
                inlined(Some("http://example.com/other"), &["greeting"], &[]),
                inlined(Some(NS), &["greeting"], &["GreetingType"]),
                inlined(None, &["greeting"], &[]),
                inlined(None, &["greeting"], &[]),
            ],
            locator: ErrorLocator::new(),
        };

        assert!(!validator.test_assertion_schema_1073(&types, &mut reporter));
        assert_eq!(reporter.ids(), vec!["Schema-1073", "Schema-1073b"]);
        assert_eq!(reporter.reported()[0].args, vec!["greeting", NS]);
        assert_eq!(reporter.reported()[1].args, vec!["GreetingType", NS]);
    }

    #[test]
    fn test_schema_1073_one_report_per_name() {
        let validator = WsdlDocumentValidator::new();
        let mut reporter = CollectingReporter::new();
        let types = TypesElement {
            schemas: vec![
                inlined(Some(NS), &["a"], &[]),
                inlined(Some(NS), &["a"], &[]),
                inlined(Some(NS), &["a"], &[]),
            ],
            locator: ErrorLocator::new(),
        };

        validator.test_assertion_schema_1073(&types, &mut reporter);
        assert_eq!(reporter.count_of("Schema-1073"), 2);
    }

    #[test]
    fn test_schema_1066() {
        let validator = WsdlDocumentValidator::new();
        let mut reporter = CollectingReporter::new();
        let locator = ErrorLocator::new();
        let types = TypesElement {
            schemas: vec![inlined(Some(NS), &["greeting"], &[])],
            locator: ErrorLocator::new(),
        };

        let xsd_string = QName::namespaced(XSD_NAMESPACE, "string");
        let greeting = QName::namespaced(NS, "greeting");
        let stranger = QName::namespaced("http://example.com/stranger", "x");

        assert!(validator.test_assertion_schema_1066(&xsd_string, None, &locator, &mut reporter));
        assert!(validator.test_assertion_schema_1066(&greeting, Some(&types), &locator, &mut reporter));
        assert!(!validator.test_assertion_schema_1066(&greeting, None, &locator, &mut reporter));
        assert!(!validator.test_assertion_schema_1066(&stranger, Some(&types), &locator, &mut reporter));
        assert_eq!(reporter.count_of("Schema-1066"), 2);
    }

    #[test]
    fn test_message_labels() {
        let validator = WsdlDocumentValidator::new();
        let mut reporter = CollectingReporter::new();

        let message = |label: Option<&str>| MessageReferenceElement {
            direction: Direction::In,
            message_label: label.map(str::to_string),
            element: None,
            locator: ErrorLocator::new(),
        };
        let mut operation = InterfaceOperationElement {
            name: Some("greet".to_string()),
            inputs: vec![message(Some("In")), message(None), message(Some("Request"))],
            outfaults: vec![FaultReferenceElement {
                direction: Direction::Out,
                reference: None,
                message_label: Some("Reply".to_string()),
                locator: ErrorLocator::new(),
            }],
            ..Default::default()
        };

        assert!(!validator.test_assertion_message_label_1034(&operation, &mut reporter));
        assert!(!validator.test_assertion_message_label_1035(&operation, &mut reporter));
        assert_eq!(reporter.ids(), vec!["MessageLabel-1034", "MessageLabel-1035"]);
        assert_eq!(
            reporter.reported()[0].args,
            vec!["Request", "greet", DEFAULT_PATTERN]
        );

        // Labels of patterns outside the predefined set are not checked
        operation.pattern = Some("http://example.com/custom-mep".to_string());
        reporter.clear();
        assert!(validator.test_assertion_message_label_1034(&operation, &mut reporter));
        assert!(reporter.reported().is_empty());
    }

    #[test]
    fn test_every_interface_is_checked() {
        let bad_style = InterfaceElement {
            name: Some("First".to_string()),
            style_default: vec!["rpc".to_string()],
            ..Default::default()
        };
        let second = InterfaceElement {
            name: Some("Second".to_string()),
            style_default: vec!["relative/style".to_string()],
            ..Default::default()
        };
        let description = DescriptionElement {
            target_namespace: Some("greeter".to_string()),
            interfaces: vec![bad_style, second],
            ..Default::default()
        };

        let mut reporter = CollectingReporter::new();
        let report = WsdlDocumentValidator::new().validate(&description, &mut reporter);

        assert!(!report.is_valid());
        assert_eq!(report.errors, 3);
        assert_eq!(
            reporter.ids(),
            vec!["Description-1006", "Interface-1011", "Interface-1011"]
        );
        assert_eq!(reporter.reported()[2].args, vec!["relative/style", "Second"]);
    }
}
