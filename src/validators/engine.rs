//! Table-driven validator
//!
//! [`WsdlValidator`] walks the element and component models and, at each
//! node, runs the assertions registered for exactly that node's
//! [`TargetKind`]: the built-in ones first, then extensions in
//! registration order.

use crate::error::{Error, Result};
use crate::wsdl::{Description, DescriptionElement};
use indexmap::IndexMap;
use std::sync::Arc;

use super::assertions::{Description1001, Description1002, Interface1009, Interface1010};
use super::base::{Assertion, Node, Target, TargetKind};
use super::registry::ExtensionRegistry;
use super::validation::{ValidationReport, WodenContext};

type AssertionTable = IndexMap<TargetKind, Vec<Arc<dyn Assertion>>>;

fn core_assertions() -> AssertionTable {
    let description_element: Vec<Arc<dyn Assertion>> =
        vec![Arc::new(Description1001), Arc::new(Description1002)];
    let description: Vec<Arc<dyn Assertion>> = vec![Arc::new(Interface1010)];
    let interface: Vec<Arc<dyn Assertion>> = vec![Arc::new(Interface1009)];

    let mut core: AssertionTable = IndexMap::new();
    core.insert(TargetKind::DescriptionElement, description_element);
    core.insert(TargetKind::Description, description);
    core.insert(TargetKind::Interface, interface);
    core
}

/// Validator dispatching core and extension assertions by target kind
#[derive(Debug, Clone)]
pub struct WsdlValidator {
    core: AssertionTable,
    extensions: AssertionTable,
}

impl WsdlValidator {
    /// Build the assertion tables
    ///
    /// Fails with [`Error::Registry`] when an extension has an empty id,
    /// is registered twice for the same kind, or reuses a core id.
    pub fn new(registry: &ExtensionRegistry) -> Result<Self> {
        let core = core_assertions();
        let mut extensions: AssertionTable = IndexMap::new();

        for kind in TargetKind::ALL {
            let mut table: Vec<Arc<dyn Assertion>> = Vec::new();
            for info in registry.assertions_for(kind) {
                let id = info.id();
                if id.is_empty() {
                    return Err(Error::Registry(format!(
                        "assertion registered for {} has an empty id",
                        kind
                    )));
                }
                if core.values().flatten().any(|a| a.id() == id) {
                    return Err(Error::Registry(format!(
                        "extension assertion '{}' has the id of a built-in assertion",
                        id
                    )));
                }
                if table.iter().any(|a| a.id() == id) {
                    return Err(Error::Registry(format!(
                        "assertion '{}' is registered twice for {}",
                        id, kind
                    )));
                }
                table.push(Arc::clone(&info.assertion));
            }
            if !table.is_empty() {
                extensions.insert(kind, table);
            }
        }

        tracing::debug!(
            core = core.values().map(Vec::len).sum::<usize>(),
            extensions = registry.len(),
            "validator assertion tables built"
        );

        Ok(Self { core, extensions })
    }

    /// Ids of the assertions run for one kind, in dispatch order
    pub fn assertion_ids(&self, kind: TargetKind) -> Vec<&str> {
        let core = self.core.get(&kind).into_iter().flatten();
        let extensions = self.extensions.get(&kind).into_iter().flatten();
        core.chain(extensions).map(|a| a.id()).collect()
    }

    /// Walk both models and run every applicable assertion
    ///
    /// Violations go to the context's reporter and are summarised in the
    /// returned report. An `Err` from any assertion stops the walk.
    pub fn validate(
        &self,
        element: &DescriptionElement,
        description: &Description,
        context: &mut WodenContext<'_>,
    ) -> Result<ValidationReport> {
        context.take_report();

        self.dispatch(Target::new(description, Node::DescriptionElement(element)), context)?;
        self.dispatch(Target::new(description, Node::Description(description)), context)?;

        for interface in description.interfaces() {
            self.dispatch(Target::new(description, Node::Interface(interface)), context)?;
        }

        for binding in description.bindings() {
            self.dispatch(Target::new(description, Node::Binding(binding)), context)?;
            for fault in binding.faults() {
                let node = Node::BindingFault(binding, fault);
                self.dispatch(Target::new(description, node), context)?;
            }
            for operation in binding.operations() {
                let node = Node::BindingOperation(binding, operation);
                self.dispatch(Target::new(description, node), context)?;
                for reference in &operation.message_references {
                    let node = Node::BindingMessageReference(operation, reference);
                    self.dispatch(Target::new(description, node), context)?;
                }
                for reference in &operation.fault_references {
                    let node = Node::BindingFaultReference(operation, reference);
                    self.dispatch(Target::new(description, node), context)?;
                }
            }
        }

        for service in description.services() {
            self.dispatch(Target::new(description, Node::Service(service)), context)?;
            for endpoint in service.endpoints() {
                let node = Node::Endpoint(service, endpoint);
                self.dispatch(Target::new(description, node), context)?;
            }
        }

        let report = context.take_report();
        tracing::debug!(
            errors = report.errors,
            warnings = report.warnings,
            "table-driven validation finished"
        );
        Ok(report)
    }

    fn dispatch(&self, target: Target<'_>, context: &mut WodenContext<'_>) -> Result<()> {
        let kind = target.kind();
        let core = self.core.get(&kind).into_iter().flatten();
        let extensions = self.extensions.get(&kind).into_iter().flatten();

        for assertion in core.chain(extensions) {
            tracing::trace!(assertion = assertion.id(), %kind, "dispatch");
            assertion.validate(target, context)?;
        }
        Ok(())
    }
}
