//! Validator helper functions
//!
//! Predicates shared by the hard-coded validators and the table-driven
//! assertions.

use crate::namespaces::QName;
use crate::wsdl::{Description, Interface, WsdlComponent};
use url::Url;

/// Check whether `iri` is absolute: it parses and carries a scheme
pub fn is_absolute_iri(iri: &str) -> bool {
    match Url::parse(iri.trim()) {
        Ok(url) => !url.scheme().is_empty(),
        Err(_) => false,
    }
}

/// Check whether `iri` is absolute and hierarchical (`scheme://...` or
/// `scheme:/...`), which rules out opaque forms such as `mailto:foo`
pub fn is_hierarchical_iri(iri: &str) -> bool {
    match Url::parse(iri.trim()) {
        Ok(url) => !url.cannot_be_a_base(),
        Err(_) => false,
    }
}

/// Check whether `interface` appears among the interfaces it extends,
/// directly or transitively
///
/// Depth-first over `extends`, comparing by equivalence. The visited list
/// stops the search on cycles that do not pass through `interface`.
pub fn extends_itself(interface: &Interface, description: &Description) -> bool {
    let mut visited: Vec<&Interface> = Vec::new();
    let mut pending = interface.extended_interfaces(description);

    while let Some(next) = pending.pop() {
        if next.is_equivalent_to(interface) {
            return true;
        }
        if visited.iter().any(|seen| seen.is_equivalent_to(next)) {
            continue;
        }
        visited.push(next);
        pending.extend(next.extended_interfaces(description));
    }

    false
}

/// The first name that repeats an earlier one, skipping unnamed entries
pub fn first_duplicate<'a>(names: impl IntoIterator<Item = Option<&'a QName>>) -> Option<&'a QName> {
    let mut seen: Vec<&QName> = Vec::new();
    for name in names.into_iter().flatten() {
        if seen.contains(&name) {
            return Some(name);
        }
        seen.push(name);
    }
    None
}

/// Every entry that repeats an earlier one, in order, skipping `None`
pub fn all_duplicates<'a, T: PartialEq + ?Sized>(
    items: impl IntoIterator<Item = Option<&'a T>>,
) -> Vec<&'a T> {
    let mut seen: Vec<&T> = Vec::new();
    let mut duplicates = Vec::new();
    for item in items.into_iter().flatten() {
        if seen.contains(&item) {
            duplicates.push(item);
        } else {
            seen.push(item);
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_iri() {
        assert!(is_absolute_iri("http://example.com/greeter"));
        assert!(is_absolute_iri("urn:example:greeter"));
        assert!(is_absolute_iri("mailto:foo"));
        assert!(!is_absolute_iri("greeter"));
        assert!(!is_absolute_iri("/greeter"));
        assert!(!is_absolute_iri(""));
    }

    #[test]
    fn test_hierarchical_iri() {
        assert!(is_hierarchical_iri("http://example.com/greeter"));
        assert!(is_hierarchical_iri("file:///tmp/greeter"));
        assert!(!is_hierarchical_iri("mailto:foo"));
        assert!(!is_hierarchical_iri("urn:example:greeter"));
        assert!(!is_hierarchical_iri("greeter"));
    }

    fn interface(name: &str, extends: &[&str]) -> Interface {
        Interface {
            name: Some(QName::namespaced("urn:greeter", name)),
            extended_interfaces: extends
                .iter()
                .map(|e| QName::namespaced("urn:greeter", *e))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_extends_itself() {
        let mut description = Description::new();
        description.interfaces.push(interface("A", &["B"]));
        description.interfaces.push(interface("B", &["A"]));
        description.interfaces.push(interface("C", &["B"]));
        description.interfaces.push(interface("D", &[]));

        assert!(extends_itself(&description.interfaces[0], &description));
        assert!(extends_itself(&description.interfaces[1], &description));
        // C reaches the A/B cycle but never itself
        assert!(!extends_itself(&description.interfaces[2], &description));
        assert!(!extends_itself(&description.interfaces[3], &description));
    }

    #[test]
    fn test_duplicates() {
        let a = QName::local("a");
        let b = QName::local("b");
        let names = vec![Some(&a), None, Some(&b), Some(&a), Some(&a), None];

        assert_eq!(first_duplicate(names.clone()), Some(&a));
        assert_eq!(all_duplicates(names), vec![&a, &a]);
        assert_eq!(first_duplicate(vec![Some(&a), None, None]), None);
    }
}
