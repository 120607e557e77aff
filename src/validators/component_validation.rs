//! Component-model validation
//!
//! [`WsdlComponentValidator`] walks a [`Description`] in a fixed order and
//! applies the built-in component assertions:
//!
//! 1. interfaces, then their operations with their message and fault
//!    references;
//! 2. bindings, then their binding operations with their message and fault
//!    references, then their binding faults;
//! 3. services, then their endpoints;
//! 4. QName references across the whole description.
//!
//! Each `test_assertion_*` method returns `true` when its assertion holds and
//! reports through the given reporter when it does not. A failure never
//! stops the walk.
//!
//! Most uniqueness checks report every duplicate. Interface-1010 and
//! Service-1060 stop at the first one.

use crate::namespaces::QName;
use crate::reporter::{ErrorLocator, ErrorReporter, Severity};
use crate::wsdl::{
    Binding, BindingOperation, Description, Endpoint, Interface, InterfaceOperation, Service,
    WsdlComponent,
};
use indexmap::IndexMap;

use super::helpers::{
    all_duplicates, extends_itself, first_duplicate, is_absolute_iri, is_hierarchical_iri,
};
use super::validation::{Tally, ValidationReport};

fn report(reporter: &mut dyn ErrorReporter, message_id: &str, args: Vec<String>) {
    reporter.report_error(ErrorLocator::new(), message_id, &args, Severity::Error);
}

/// Validator for the component model
#[derive(Debug, Clone, Copy, Default)]
pub struct WsdlComponentValidator;

impl WsdlComponentValidator {
    /// Create a validator
    pub fn new() -> Self {
        Self
    }

    /// Validate every component reachable from `description`
    pub fn validate(
        &self,
        description: &Description,
        reporter: &mut dyn ErrorReporter,
    ) -> ValidationReport {
        tracing::debug!(
            interfaces = description.interfaces.len(),
            bindings = description.bindings.len(),
            services = description.services.len(),
            "validating component model"
        );

        let mut tally = Tally::new(reporter);
        self.validate_interfaces(description, &mut tally);
        self.validate_bindings(description, &mut tally);
        self.validate_services(description, &mut tally);
        self.test_assertion_qname_resolution_1064(description, &mut tally);
        tally.into_report()
    }

    fn validate_interfaces(&self, description: &Description, reporter: &mut dyn ErrorReporter) -> bool {
        let mut valid = self.test_assertion_interface_1010(description.interfaces(), reporter);

        for interface in description.interfaces() {
            valid &= self.test_assertion_interface_1009(interface, description, reporter);
            valid &= self.test_assertion_interface_fault_1028(interface, reporter);
            valid &= self.test_assertion_interface_operation_1026(interface, reporter);

            for operation in interface.operations() {
                valid &= self.test_assertion_interface_operation_1027(operation, reporter);
                valid &= self.test_assertion_mep_1022(operation, reporter);
                valid &= self.test_assertion_interface_message_reference_1029(operation, reporter);
                valid &= self.test_assertion_interface_fault_reference_1039(operation, reporter);
            }
        }

        valid
    }

    fn validate_bindings(&self, description: &Description, reporter: &mut dyn ErrorReporter) -> bool {
        let mut valid = self.test_assertion_binding_1049(description.bindings(), reporter);

        for binding in description.bindings() {
            valid &= self.test_assertion_binding_1044(binding, reporter);
            valid &= self.test_assertion_binding_1045(binding, description, reporter);
            valid &= self.test_assertion_binding_1048(binding, reporter);
            valid &= self.test_assertion_binding_operation_1051(binding, reporter);

            for operation in binding.operations() {
                valid &= self.test_assertion_binding_message_reference_1052(operation, reporter);
                valid &= self.test_assertion_binding_fault_reference_1055(operation, reporter);
            }

            valid &= self.test_assertion_binding_fault_1050(binding, reporter);
        }

        valid
    }

    fn validate_services(&self, description: &Description, reporter: &mut dyn ErrorReporter) -> bool {
        let mut valid = self.test_assertion_service_1060(description.services(), reporter);

        for service in description.services() {
            for endpoint in service.endpoints() {
                valid &= self.test_assertion_endpoint_1061(endpoint, reporter);
                valid &= self.test_assertion_endpoint_1062(service, endpoint, description, reporter);
            }
        }

        valid
    }

    // ---------------------------------------------------------------------
    // Interfaces
    // ---------------------------------------------------------------------

    /// Interface-1010: interface names are unique. Stops at the first
    /// duplicate.
    pub fn test_assertion_interface_1010(
        &self,
        interfaces: &[Interface],
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        match first_duplicate(interfaces.iter().map(|i| i.name.as_ref())) {
            Some(duplicate) => {
                report(reporter, "Interface-1010", vec![duplicate.to_string()]);
                false
            }
            None => true,
        }
    }

    /// Interface-1009: an interface is not among the interfaces it extends
    pub fn test_assertion_interface_1009(
        &self,
        interface: &Interface,
        description: &Description,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        if extends_itself(interface, description) {
            report(reporter, "Interface-1009", vec![interface.display_name()]);
            return false;
        }
        true
    }

    /// InterfaceFault-1028: fault names are unique within an interface
    pub fn test_assertion_interface_fault_1028(
        &self,
        interface: &Interface,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let duplicates = all_duplicates(interface.faults().iter().map(|f| f.name.as_ref()));
        for duplicate in &duplicates {
            report(
                reporter,
                "InterfaceFault-1028",
                vec![duplicate.to_string(), interface.display_name()],
            );
        }
        duplicates.is_empty()
    }

    /// InterfaceOperation-1026: operation names are unique within an
    /// interface
    pub fn test_assertion_interface_operation_1026(
        &self,
        interface: &Interface,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let duplicates = all_duplicates(interface.operations().iter().map(|o| o.name.as_ref()));
        for duplicate in &duplicates {
            report(
                reporter,
                "InterfaceOperation-1026",
                vec![duplicate.to_string(), interface.display_name()],
            );
        }
        duplicates.is_empty()
    }

    /// InterfaceOperation-1027: every style IRI is absolute
    pub fn test_assertion_interface_operation_1027(
        &self,
        operation: &InterfaceOperation,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let mut valid = true;
        for style in operation.style.iter().filter(|s| !is_absolute_iri(s)) {
            report(
                reporter,
                "InterfaceOperation-1027",
                vec![style.clone(), operation.display_name()],
            );
            valid = false;
        }
        valid
    }

    /// MEP-1022: the message exchange pattern is an absolute IRI
    pub fn test_assertion_mep_1022(
        &self,
        operation: &InterfaceOperation,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        match operation.pattern.as_deref() {
            Some(pattern) if !is_absolute_iri(pattern) => {
                report(
                    reporter,
                    "MEP-1022",
                    vec![pattern.to_string(), operation.display_name()],
                );
                false
            }
            _ => true,
        }
    }

    /// InterfaceMessageReference-1029: message labels are unique within an
    /// operation
    pub fn test_assertion_interface_message_reference_1029(
        &self,
        operation: &InterfaceOperation,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let duplicates = all_duplicates(
            operation
                .message_references
                .iter()
                .map(|r| r.message_label.as_deref()),
        );
        for duplicate in &duplicates {
            report(
                reporter,
                "InterfaceMessageReference-1029",
                vec![duplicate.to_string(), operation.display_name()],
            );
        }
        duplicates.is_empty()
    }

    /// InterfaceFaultReference-1039: no two fault references share both
    /// fault and message label
    pub fn test_assertion_interface_fault_reference_1039(
        &self,
        operation: &InterfaceOperation,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let pairs = operation
            .fault_references
            .iter()
            .map(|r| (r.interface_fault.as_ref(), r.message_label.as_deref()));
        let duplicates = duplicate_pairs(pairs);
        for (fault, label) in &duplicates {
            report(
                reporter,
                "InterfaceFaultReference-1039",
                vec![fault.to_string(), label.to_string(), operation.display_name()],
            );
        }
        duplicates.is_empty()
    }

    // ---------------------------------------------------------------------
    // Bindings
    // ---------------------------------------------------------------------

    /// Binding-1049: binding names are unique. Reports every duplicate.
    pub fn test_assertion_binding_1049(
        &self,
        bindings: &[Binding],
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let duplicates = all_duplicates(bindings.iter().map(|b| b.name.as_ref()));
        for duplicate in &duplicates {
            report(reporter, "Binding-1049", vec![duplicate.to_string()]);
        }
        duplicates.is_empty()
    }

    /// Binding-1044: a binding that declares binding faults also declares
    /// an interface
    pub fn test_assertion_binding_1044(
        &self,
        binding: &Binding,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        if !binding.faults().is_empty() && binding.interface.is_none() {
            report(reporter, "Binding-1044", vec![binding.display_name()]);
            return false;
        }
        true
    }

    /// Binding-1045: every operation of the bound interface, declared or
    /// inherited, has a binding operation
    ///
    /// One report per unbound operation.
    pub fn test_assertion_binding_1045(
        &self,
        binding: &Binding,
        description: &Description,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let Some(interface) = binding.interface(description) else {
            return true;
        };

        let bound: Vec<&InterfaceOperation> = binding
            .operations()
            .iter()
            .filter_map(|op| op.interface_operation(binding, description))
            .collect();

        let mut valid = true;
        for operation in interface.all_operations(description) {
            if !bound.iter().any(|b| std::ptr::eq(*b, operation)) {
                report(
                    reporter,
                    "Binding-1045",
                    vec![binding.display_name(), operation.display_name()],
                );
                valid = false;
            }
        }
        valid
    }

    /// Binding-1048: the binding type is an absolute IRI
    pub fn test_assertion_binding_1048(
        &self,
        binding: &Binding,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        match binding.binding_type.as_deref() {
            Some(binding_type) if !is_absolute_iri(binding_type) => {
                report(
                    reporter,
                    "Binding-1048",
                    vec![binding_type.to_string(), binding.display_name()],
                );
                false
            }
            _ => true,
        }
    }

    /// BindingOperation-1051: each interface operation is bound at most
    /// once
    pub fn test_assertion_binding_operation_1051(
        &self,
        binding: &Binding,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let duplicates = all_duplicates(
            binding
                .operations()
                .iter()
                .map(|op| op.interface_operation.as_ref()),
        );
        for duplicate in &duplicates {
            report(
                reporter,
                "BindingOperation-1051",
                vec![duplicate.to_string(), binding.display_name()],
            );
        }
        duplicates.is_empty()
    }

    /// BindingMessageReference-1052: message labels are unique within a
    /// binding operation
    pub fn test_assertion_binding_message_reference_1052(
        &self,
        operation: &BindingOperation,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let duplicates = all_duplicates(
            operation
                .message_references
                .iter()
                .map(|r| r.message_label.as_deref()),
        );
        for duplicate in &duplicates {
            report(
                reporter,
                "BindingMessageReference-1052",
                vec![duplicate.to_string(), operation.display_name()],
            );
        }
        duplicates.is_empty()
    }

    /// BindingFaultReference-1055: no two binding fault references share
    /// both fault and message label
    pub fn test_assertion_binding_fault_reference_1055(
        &self,
        operation: &BindingOperation,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let pairs = operation
            .fault_references
            .iter()
            .map(|r| (r.interface_fault.as_ref(), r.message_label.as_deref()));
        let duplicates = duplicate_pairs(pairs);
        for (fault, label) in &duplicates {
            report(
                reporter,
                "BindingFaultReference-1055",
                vec![fault.to_string(), label.to_string(), operation.display_name()],
            );
        }
        duplicates.is_empty()
    }

    /// BindingFault-1050: each interface fault is bound at most once
    pub fn test_assertion_binding_fault_1050(
        &self,
        binding: &Binding,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let duplicates = all_duplicates(binding.faults().iter().map(|f| f.interface_fault.as_ref()));
        for duplicate in &duplicates {
            report(
                reporter,
                "BindingFault-1050",
                vec![duplicate.to_string(), binding.display_name()],
            );
        }
        duplicates.is_empty()
    }

    // ---------------------------------------------------------------------
    // Services
    // ---------------------------------------------------------------------

    /// Service-1060: service names are unique. Stops at the first
    /// duplicate.
    pub fn test_assertion_service_1060(
        &self,
        services: &[Service],
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        match first_duplicate(services.iter().map(|s| s.name.as_ref())) {
            Some(duplicate) => {
                report(reporter, "Service-1060", vec![duplicate.to_string()]);
                false
            }
            None => true,
        }
    }

    /// Endpoint-1061: the address is an absolute, hierarchical IRI
    pub fn test_assertion_endpoint_1061(
        &self,
        endpoint: &Endpoint,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        match endpoint.address.as_deref() {
            Some(address) if !is_hierarchical_iri(address) => {
                report(
                    reporter,
                    "Endpoint-1061",
                    vec![address.to_string(), endpoint.display_name()],
                );
                false
            }
            _ => true,
        }
    }

    /// Endpoint-1062: the endpoint's binding is for the service's interface
    ///
    /// Holds trivially unless both interfaces are present.
    pub fn test_assertion_endpoint_1062(
        &self,
        service: &Service,
        endpoint: &Endpoint,
        description: &Description,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let bound = endpoint
            .binding(description)
            .and_then(|binding| binding.interface(description));
        let implemented = service.interface(description);

        match (bound, implemented) {
            (Some(bound), Some(implemented)) if !bound.is_equivalent_to(implemented) => {
                report(
                    reporter,
                    "Endpoint-1062",
                    vec![
                        endpoint.display_name(),
                        bound.display_name(),
                        service.display_name(),
                        implemented.display_name(),
                    ],
                );
                false
            }
            _ => true,
        }
    }

    // ---------------------------------------------------------------------
    // References
    // ---------------------------------------------------------------------

    /// QName-resolution-1064: every QName reference resolves
    ///
    /// References below an unresolved binding interface are not checked.
    pub fn test_assertion_qname_resolution_1064(
        &self,
        description: &Description,
        reporter: &mut dyn ErrorReporter,
    ) -> bool {
        let mut missing: Vec<(&str, &QName)> = Vec::new();

        for interface in description.interfaces() {
            for name in &interface.extended_interfaces {
                if description.interface(name).is_none() {
                    missing.push(("interface", name));
                }
            }
            for operation in interface.operations() {
                for name in operation
                    .fault_references
                    .iter()
                    .filter_map(|r| r.interface_fault.as_ref())
                {
                    if interface.fault(name, description).is_none() {
                        missing.push(("interface fault", name));
                    }
                }
            }
        }

        for binding in description.bindings() {
            let Some(name) = binding.interface.as_ref() else {
                continue;
            };
            let Some(interface) = description.interface(name) else {
                missing.push(("interface", name));
                continue;
            };

            for name in binding.faults().iter().filter_map(|f| f.interface_fault.as_ref()) {
                if interface.fault(name, description).is_none() {
                    missing.push(("interface fault", name));
                }
            }
            for operation in binding.operations() {
                if let Some(name) = operation.interface_operation.as_ref() {
                    if interface.operation(name, description).is_none() {
                        missing.push(("interface operation", name));
                    }
                }
                for name in operation
                    .fault_references
                    .iter()
                    .filter_map(|r| r.interface_fault.as_ref())
                {
                    if interface.fault(name, description).is_none() {
                        missing.push(("interface fault", name));
                    }
                }
            }
        }

        for service in description.services() {
            if let Some(name) = service.interface.as_ref() {
                if description.interface(name).is_none() {
                    missing.push(("interface", name));
                }
            }
            for name in service.endpoints().iter().filter_map(|e| e.binding.as_ref()) {
                if description.binding(name).is_none() {
                    missing.push(("binding", name));
                }
            }
        }

        for (kind, name) in &missing {
            report(
                reporter,
                "QName-resolution-1064",
                vec![kind.to_string(), name.to_string()],
            );
        }
        missing.is_empty()
    }
}

/// Repeated `(fault, label)` pairs, grouped by fault; pairs missing either
/// half are skipped
fn duplicate_pairs<'a>(
    pairs: impl Iterator<Item = (Option<&'a QName>, Option<&'a str>)>,
) -> Vec<(&'a QName, &'a str)> {
    let mut seen: IndexMap<&QName, Vec<&str>> = IndexMap::new();
    let mut duplicates = Vec::new();
    for pair in pairs {
        let (Some(fault), Some(label)) = pair else {
            continue;
        };
        let labels = seen.entry(fault).or_default();
        if labels.contains(&label) {
            duplicates.push((fault, label));
        } else {
            labels.push(label);
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::CollectingReporter;
    use crate::wsdl::{
        BindingFault, BindingFaultReference, BindingMessageReference, InterfaceFault,
        InterfaceFaultReference, InterfaceMessageReference,
    };

    const NS: &str = "urn:greeter";

    fn qn(local: &str) -> QName {
        QName::namespaced(NS, local)
    }

    fn interface(name: &str, extends: &[&str], operations: &[&str]) -> Interface {
        Interface {
            name: Some(qn(name)),
            extended_interfaces: extends.iter().map(|e| qn(e)).collect(),
            operations: operations
                .iter()
                .map(|o| InterfaceOperation::named(qn(o)))
                .collect(),
            ..Default::default()
        }
    }

    fn binding(name: &str, interface: Option<&str>, operations: &[&str]) -> Binding {
        Binding {
            name: Some(qn(name)),
            interface: interface.map(qn),
            binding_type: Some("http://www.w3.org/ns/wsdl/soap".to_string()),
            operations: operations
                .iter()
                .map(|o| BindingOperation::binding(qn(o)))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_interface_1010_duplicate_greeter() {
        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();
        let interfaces = vec![
            interface("Greeter", &[], &[]),
            interface("Greeter", &[], &[]),
        ];

        assert!(!validator.test_assertion_interface_1010(&interfaces, &mut reporter));
        assert_eq!(reporter.count_of("Interface-1010"), 1);
        assert_eq!(reporter.reported()[0].args, vec!["{urn:greeter}Greeter"]);
    }

    #[test]
    fn test_uniqueness_asymmetry() {
        let validator = WsdlComponentValidator::new();

        let mut reporter = CollectingReporter::new();
        let interfaces = vec![
            interface("A", &[], &[]),
            interface("A", &[], &[]),
            interface("B", &[], &[]),
            interface("B", &[], &[]),
        ];
        validator.test_assertion_interface_1010(&interfaces, &mut reporter);
        assert_eq!(reporter.count_of("Interface-1010"), 1);

        let services = vec![
            Service::named(qn("S")),
            Service::named(qn("S")),
            Service::named(qn("T")),
            Service::named(qn("T")),
        ];
        validator.test_assertion_service_1060(&services, &mut reporter);
        assert_eq!(reporter.count_of("Service-1060"), 1);

        let bindings = vec![
            binding("A", None, &[]),
            binding("A", None, &[]),
            binding("B", None, &[]),
            binding("B", None, &[]),
        ];
        assert!(!validator.test_assertion_binding_1049(&bindings, &mut reporter));
        assert_eq!(reporter.count_of("Binding-1049"), 2);

        let mut with_faults = interface("F", &[], &[]);
        for name in ["x", "x", "x"] {
            with_faults.faults.push(InterfaceFault {
                name: Some(qn(name)),
                ..Default::default()
            });
        }
        validator.test_assertion_interface_fault_1028(&with_faults, &mut reporter);
        assert_eq!(reporter.count_of("InterfaceFault-1028"), 2);
    }

    #[test]
    fn test_unnamed_components_are_skipped() {
        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();
        let interfaces = vec![Interface::default(), Interface::default()];
        assert!(validator.test_assertion_interface_1010(&interfaces, &mut reporter));
        assert!(reporter.reported().is_empty());
    }

    #[test]
    fn test_interface_1009() {
        let mut description = Description::new();
        description.interfaces.push(interface("A", &["B"], &[]));
        description.interfaces.push(interface("B", &["A"], &[]));
        description.interfaces.push(interface("C", &[], &[]));

        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();
        assert!(!validator.test_assertion_interface_1009(&description.interfaces[0], &description, &mut reporter));
        assert!(validator.test_assertion_interface_1009(&description.interfaces[2], &description, &mut reporter));
        assert_eq!(reporter.reported()[0].args, vec!["{urn:greeter}A"]);
    }

    #[test]
    fn test_binding_1044() {
        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();

        let operations_only = binding("B", None, &["greet"]);
        assert!(validator.test_assertion_binding_1044(&operations_only, &mut reporter));

        let mut with_fault = binding("B", None, &[]);
        with_fault.faults.push(BindingFault {
            interface_fault: Some(qn("Fault")),
        });
        assert!(!validator.test_assertion_binding_1044(&with_fault, &mut reporter));
        assert_eq!(reporter.ids(), vec!["Binding-1044"]);
    }

    #[test]
    fn test_binding_1045_one_error_per_missing_operation() {
        let mut description = Description::new();
        description.interfaces.push(interface("Base", &[], &["ping"]));
        description.interfaces.push(interface("Greeter", &["Base"], &["greet", "wave"]));
        description.bindings.push(binding("Complete", Some("Greeter"), &["greet", "wave", "ping"]));
        description.bindings.push(binding("Partial", Some("Greeter"), &["greet"]));

        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();
        assert!(validator.test_assertion_binding_1045(&description.bindings[0], &description, &mut reporter));
        assert!(reporter.reported().is_empty());

        assert!(!validator.test_assertion_binding_1045(&description.bindings[1], &description, &mut reporter));
        let missing: Vec<_> = reporter.with_id("Binding-1045").map(|r| r.args[1].clone()).collect();
        assert_eq!(missing, vec!["{urn:greeter}wave", "{urn:greeter}ping"]);
    }

    #[test]
    fn test_binding_without_interface_needs_no_operations() {
        let mut description = Description::new();
        description.bindings.push(binding("B", None, &[]));

        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();
        assert!(validator.test_assertion_binding_1045(&description.bindings[0], &description, &mut reporter));
    }

    #[test]
    fn test_binding_operation_and_fault_uniqueness() {
        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();

        let mut b = binding("B", Some("Greeter"), &["greet", "greet"]);
        b.faults.push(BindingFault { interface_fault: Some(qn("F")) });
        b.faults.push(BindingFault { interface_fault: Some(qn("F")) });

        assert!(!validator.test_assertion_binding_operation_1051(&b, &mut reporter));
        assert!(!validator.test_assertion_binding_fault_1050(&b, &mut reporter));
        assert_eq!(reporter.ids(), vec!["BindingOperation-1051", "BindingFault-1050"]);
    }

    #[test]
    fn test_message_and_fault_reference_uniqueness() {
        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();

        let mut operation = InterfaceOperation::named(qn("greet"));
        for label in [Some("In"), Some("In"), None, None] {
            operation.message_references.push(InterfaceMessageReference {
                message_label: label.map(str::to_string),
                ..Default::default()
            });
        }
        for (fault, label) in [
            (Some("F"), Some("Out")),
            (Some("F"), Some("In")),
            (Some("F"), Some("Out")),
            (None, Some("Out")),
            (None, Some("Out")),
            (Some("G"), None),
            (Some("G"), None),
        ] {
            operation.fault_references.push(InterfaceFaultReference {
                interface_fault: fault.map(qn),
                message_label: label.map(str::to_string),
                direction: None,
            });
        }

        assert!(!validator.test_assertion_interface_message_reference_1029(&operation, &mut reporter));
        assert!(!validator.test_assertion_interface_fault_reference_1039(&operation, &mut reporter));
        assert_eq!(reporter.count_of("InterfaceMessageReference-1029"), 1);
        assert_eq!(reporter.count_of("InterfaceFaultReference-1039"), 1);
        assert_eq!(
            reporter.with_id("InterfaceFaultReference-1039").next().unwrap().args,
            vec!["{urn:greeter}F", "Out", "{urn:greeter}greet"]
        );

        let mut bound = BindingOperation::binding(qn("greet"));
        bound.message_references.push(BindingMessageReference {
            message_label: Some("Out".to_string()),
            direction: None,
        });
        bound.message_references.push(BindingMessageReference {
            message_label: Some("Out".to_string()),
            direction: None,
        });
        bound.fault_references.push(BindingFaultReference {
            interface_fault: Some(qn("F")),
            message_label: Some("Out".to_string()),
            direction: None,
        });
        assert!(!validator.test_assertion_binding_message_reference_1052(&bound, &mut reporter));
        assert!(validator.test_assertion_binding_fault_reference_1055(&bound, &mut reporter));
    }

    #[test]
    fn test_absolute_iri_assertions() {
        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();

        let mut operation = InterfaceOperation::named(qn("greet"));
        operation.pattern = Some("in-out".to_string());
        operation.style = vec![
            "http://www.w3.org/ns/wsdl/style/iri".to_string(),
            "rpc".to_string(),
        ];
        assert!(!validator.test_assertion_mep_1022(&operation, &mut reporter));
        assert!(!validator.test_assertion_interface_operation_1027(&operation, &mut reporter));

        let mut b = binding("B", None, &[]);
        b.binding_type = Some("soap".to_string());
        assert!(!validator.test_assertion_binding_1048(&b, &mut reporter));

        assert_eq!(
            reporter.ids(),
            vec!["MEP-1022", "InterfaceOperation-1027", "Binding-1048"]
        );
    }

    #[test]
    fn test_endpoint_1061_mailto() {
        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();

        let endpoint = Endpoint {
            name: Some("GreeterEndpoint".to_string()),
            binding: None,
            address: Some("mailto:foo".to_string()),
        };
        assert!(!validator.test_assertion_endpoint_1061(&endpoint, &mut reporter));
        assert_eq!(reporter.ids(), vec!["Endpoint-1061"]);
        assert_eq!(reporter.reported()[0].args[0], "mailto:foo");

        let endpoint = Endpoint {
            address: Some("http://example.com/greeter".to_string()),
            ..Default::default()
        };
        assert!(validator.test_assertion_endpoint_1061(&endpoint, &mut reporter));
    }

    #[test]
    fn test_endpoint_1062_table() {
        let choices = [None, Some("A"), Some("B")];
        let validator = WsdlComponentValidator::new();

        for bound in choices {
            for implemented in choices {
                let mut description = Description::new();
                description.interfaces.push(interface("A", &[], &["a"]));
                description.interfaces.push(interface("B", &[], &["b"]));
                description.bindings.push(binding("Binding", bound, &[]));
                let mut service = Service::named(qn("Service"));
                service.interface = implemented.map(qn);
                service.endpoints.push(Endpoint {
                    name: Some("E".to_string()),
                    binding: Some(qn("Binding")),
                    address: None,
                });
                description.services.push(service);

                let mut reporter = CollectingReporter::new();
                let service = &description.services[0];
                let passed = validator.test_assertion_endpoint_1062(
                    service,
                    &service.endpoints[0],
                    &description,
                    &mut reporter,
                );

                let expected = match (bound, implemented) {
                    (Some(b), Some(s)) => b == s,
                    _ => true,
                };
                assert_eq!(passed, expected, "binding {:?}, service {:?}", bound, implemented);
                assert_eq!(reporter.reported().is_empty(), expected);
            }
        }
    }

    #[test]
    fn test_qname_resolution_1064() {
        let mut description = Description::new();
        description.interfaces.push(interface("Greeter", &["Missing"], &["greet"]));
        description.bindings.push(binding("Good", Some("Greeter"), &["greet", "nope"]));
        description.bindings.push(binding("Dangling", Some("Nowhere"), &["ignored"]));
        let mut service = Service::named(qn("S"));
        service.interface = Some(qn("Greeter"));
        service.endpoints.push(Endpoint {
            name: Some("E".to_string()),
            binding: Some(qn("NoBinding")),
            address: None,
        });
        description.services.push(service);

        let validator = WsdlComponentValidator::new();
        let mut reporter = CollectingReporter::new();
        assert!(!validator.test_assertion_qname_resolution_1064(&description, &mut reporter));

        let args: Vec<_> = reporter.reported().iter().map(|r| r.args.clone()).collect();
        assert_eq!(
            args,
            vec![
                vec!["interface".to_string(), "{urn:greeter}Missing".to_string()],
                vec!["interface operation".to_string(), "{urn:greeter}nope".to_string()],
                vec!["interface".to_string(), "{urn:greeter}Nowhere".to_string()],
                vec!["binding".to_string(), "{urn:greeter}NoBinding".to_string()],
            ]
        );
    }

    #[test]
    fn test_walk_continues_after_failures() {
        let mut description = Description::new();
        description.interfaces.push(interface("Greeter", &[], &["greet"]));
        description.interfaces.push(interface("Greeter", &[], &["greet"]));
        description.bindings.push(binding("B", Some("Greeter"), &[]));
        let mut service = Service::named(qn("S"));
        service.endpoints.push(Endpoint {
            name: Some("E".to_string()),
            binding: Some(qn("B")),
            address: Some("mailto:foo".to_string()),
        });
        description.services.push(service);

        let mut reporter = CollectingReporter::new();
        let report = WsdlComponentValidator::new().validate(&description, &mut reporter);

        assert!(!report.is_valid());
        assert_eq!(
            report.assertion_ids,
            vec!["Interface-1010", "Binding-1045", "Endpoint-1061"]
        );
        assert_eq!(report.errors, reporter.error_count());
    }
}
