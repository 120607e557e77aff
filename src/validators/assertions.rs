//! Core assertions for the table-driven validator
//!
//! Each type here is one numbered rule. The rules for Interface-1009 and
//! Interface-1010 are the same ones [`WsdlComponentValidator`] applies, and
//! report identically so the two can be combined.
//!
//! [`WsdlComponentValidator`]: super::component_validation::WsdlComponentValidator

use crate::error::Result;
use crate::reporter::{ErrorLocator, Severity};

use super::base::{Assertion, Target};
use super::helpers::{extends_itself, first_duplicate, is_absolute_iri};
use super::validation::WodenContext;

/// Description-1001: the `targetNamespace` is an absolute IRI
#[derive(Debug, Clone, Copy, Default)]
pub struct Description1001;

impl Assertion for Description1001 {
    fn id(&self) -> &str {
        "Description-1001"
    }

    fn validate(&self, target: Target<'_>, context: &mut WodenContext<'_>) -> Result<()> {
        let element = target.as_description_element()?;
        if let Some(namespace) = element.target_namespace.as_deref() {
            if !is_absolute_iri(namespace) {
                context.report_error(
                    element.locator.clone(),
                    self.id(),
                    &[namespace.to_string()],
                    Severity::Error,
                );
            }
        }
        Ok(())
    }
}

/// Description-1002: the `targetNamespace` should dereference to a
/// document; a warning when the URI resolver cannot resolve it
#[derive(Debug, Clone, Copy, Default)]
pub struct Description1002;

impl Assertion for Description1002 {
    fn id(&self) -> &str {
        "Description-1002"
    }

    fn validate(&self, target: Target<'_>, context: &mut WodenContext<'_>) -> Result<()> {
        let element = target.as_description_element()?;
        if let Some(namespace) = element.target_namespace.as_deref() {
            if context.uri_resolver().resolve_uri(namespace).is_none() {
                context.report_error(
                    element.locator.clone(),
                    self.id(),
                    &[namespace.to_string()],
                    Severity::Warning,
                );
            }
        }
        Ok(())
    }
}

/// Interface-1009: an interface does not appear among the interfaces it
/// extends
#[derive(Debug, Clone, Copy, Default)]
pub struct Interface1009;

impl Assertion for Interface1009 {
    fn id(&self) -> &str {
        "Interface-1009"
    }

    fn validate(&self, target: Target<'_>, context: &mut WodenContext<'_>) -> Result<()> {
        let interface = target.as_interface()?;
        if extends_itself(interface, target.description) {
            context.report_error(
                ErrorLocator::new(),
                self.id(),
                &[interface.display_name()],
                Severity::Error,
            );
        }
        Ok(())
    }
}

/// Interface-1010: interface names are unique within the description;
/// only the first duplicate is reported
#[derive(Debug, Clone, Copy, Default)]
pub struct Interface1010;

impl Assertion for Interface1010 {
    fn id(&self) -> &str {
        "Interface-1010"
    }

    fn validate(&self, target: Target<'_>, context: &mut WodenContext<'_>) -> Result<()> {
        let description = target.as_description()?;
        let names = description.interfaces().iter().map(|i| i.name.as_ref());
        if let Some(duplicate) = first_duplicate(names) {
            context.report_error(
                ErrorLocator::new(),
                self.id(),
                &[duplicate.to_string()],
                Severity::Error,
            );
        }
        Ok(())
    }
}
