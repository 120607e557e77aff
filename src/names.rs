//! XML name validation and utilities
//!
//! WSDL component names (`name` attributes) are NCNames; references
//! (`interface`, `binding`, `ref`, `element`) are QNames.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\-\.0-9\u{B7}]*$",
    )
    .expect("NCName pattern is valid")
});

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Check if a string is a valid QName (qualified name)
pub fn is_valid_qname(name: &str) -> bool {
    // QName can be "prefix:localName" or just "localName"
    if let Some((prefix, local)) = name.split_once(':') {
        is_valid_ncname(prefix) && is_valid_ncname(local)
    } else {
        is_valid_ncname(name)
    }
}

/// Validate an NCName and return an error if invalid
pub fn validate_ncname(name: &str) -> Result<()> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid NCName: '{}'", name)))
    }
}

/// Validate a QName and return an error if invalid
pub fn validate_qname(name: &str) -> Result<()> {
    if is_valid_qname(name) {
        Ok(())
    } else {
        Err(Error::Name(format!("Invalid QName: '{}'", name)))
    }
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ncname() {
        assert!(is_valid_ncname("Greeter"));
        assert!(is_valid_ncname("greet-operation"));
        assert!(is_valid_ncname("_op.v2"));

        assert!(!is_valid_ncname(""));
        assert!(!is_valid_ncname("tns:Greeter"));
        assert!(!is_valid_ncname("1op"));
        assert!(!is_valid_ncname("-op"));
    }

    #[test]
    fn test_is_valid_qname() {
        assert!(is_valid_qname("Greeter"));
        assert!(is_valid_qname("tns:Greeter"));

        assert!(!is_valid_qname(""));
        assert!(!is_valid_qname(":Greeter"));
        assert!(!is_valid_qname("tns:"));
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("Greeter"), (None, "Greeter"));
        assert_eq!(split_qname("tns:Greeter"), (Some("tns"), "Greeter"));
    }

    #[test]
    fn test_validate_names() {
        assert!(validate_ncname("Greeter").is_ok());
        assert!(validate_ncname("123").is_err());
        assert!(validate_qname("xs:string").is_ok());
        assert!(validate_qname("xs:").is_err());
    }
}
