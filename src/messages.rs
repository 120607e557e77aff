//! Assertion message catalog
//!
//! Validators only report an assertion id plus ordered arguments. This
//! module turns that pair into text: `{0}`, `{1}`, ... in a template are
//! replaced by the matching argument.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Assertion id -> message template
const MESSAGES: &[(&str, &str)] = &[
    ("Description-1001", "The targetNamespace '{0}' is not an absolute IRI."),
    ("Description-1002", "The targetNamespace '{0}' does not dereference to a retrievable resource."),
    ("Description-1006", "The targetNamespace '{0}' is not an absolute IRI."),
    ("Description-1013", "The imported namespace '{0}' is the same as the importing document's targetNamespace."),
    ("Interface-1009", "The interface '{0}' appears in the set of interfaces it extends."),
    ("Interface-1010", "Duplicate interface name '{0}'. Interface names must be unique within a description."),
    ("Interface-1011", "The styleDefault IRI '{0}' of interface '{1}' is not absolute."),
    ("MEP-1022", "The message exchange pattern '{0}' of operation '{1}' is not an absolute IRI."),
    ("InterfaceOperation-1026", "Duplicate interface operation name '{0}' in interface '{1}'."),
    ("InterfaceOperation-1027", "The style IRI '{0}' of operation '{1}' is not absolute."),
    ("InterfaceFault-1028", "Duplicate interface fault name '{0}' in interface '{1}'."),
    ("InterfaceMessageReference-1029", "Duplicate message label '{0}' in interface operation '{1}'."),
    ("MessageLabel-1034", "The message label '{0}' of operation '{1}' is not a placeholder of pattern '{2}'."),
    ("MessageLabel-1035", "The fault reference message label '{0}' of operation '{1}' is not a placeholder of pattern '{2}'."),
    ("InterfaceFaultReference-1039", "Duplicate fault reference to '{0}' with message label '{1}' in interface operation '{2}'."),
    ("Binding-1044", "Binding '{0}' has binding faults but does not specify an interface."),
    ("Binding-1045", "Binding '{0}' does not bind interface operation '{1}'."),
    ("Binding-1048", "The type '{0}' of binding '{1}' is not an absolute IRI."),
    ("Binding-1049", "Duplicate binding name '{0}'. Binding names must be unique within a description."),
    ("BindingFault-1050", "Interface fault '{0}' is bound more than once by binding '{1}'."),
    ("BindingOperation-1051", "Interface operation '{0}' is bound more than once by binding '{1}'."),
    ("BindingMessageReference-1052", "Duplicate message label '{0}' in binding operation '{1}'."),
    ("BindingFaultReference-1055", "Duplicate binding fault reference to '{0}' with message label '{1}' in binding operation '{2}'."),
    ("Service-1060", "Duplicate service name '{0}'. Service names must be unique within a description."),
    ("Endpoint-1061", "The address '{0}' of endpoint '{1}' is not an absolute IRI."),
    ("Endpoint-1062", "The binding of endpoint '{0}' is for interface '{1}' but service '{2}' implements interface '{3}'."),
    ("QName-resolution-1064", "The {0} reference '{1}' does not resolve to a component."),
    ("Schema-1066", "The reference '{0}' does not refer to a schema imported or inlined in the types element."),
    ("Schema-1069", "The schema imported for namespace '{0}' from '{1}' has no targetNamespace."),
    ("Schema-1070", "The schema imported from '{0}' has targetNamespace '{1}' but was imported for namespace '{2}'."),
    ("Schema-1073", "Element '{0}' is declared in more than one inlined schema for namespace '{1}'."),
    ("Schema-1073b", "Type '{0}' is defined in more than one inlined schema for namespace '{1}'."),
];

static CATALOG: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| MESSAGES.iter().copied().collect());

/// Message template for an assertion id
pub fn template(message_id: &str) -> Option<&'static str> {
    CATALOG.get(message_id).copied()
}

/// All assertion ids known to the catalog
pub fn known_ids() -> impl Iterator<Item = &'static str> {
    MESSAGES.iter().map(|(id, _)| *id)
}

/// Format a reported message; unknown ids fall back to `id: args`
pub fn format_message(message_id: &str, args: &[String]) -> String {
    match template(message_id) {
        Some(template) => {
            let mut message = template.to_string();
            for (i, arg) in args.iter().enumerate() {
                message = message.replace(&format!("{{{}}}", i), arg);
            }
            message
        }
        None if args.is_empty() => message_id.to_string(),
        None => format!("{}: {}", message_id, args.join(", ")),
    }
}
