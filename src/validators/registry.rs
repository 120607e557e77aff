//! Extension assertion registry
//!
//! Third parties add rules here before constructing a
//! [`WsdlValidator`](super::engine::WsdlValidator). The registry is a plain
//! value handed to the validator; there is no global state.

use std::sync::Arc;

use super::base::{Assertion, AssertionInfo, TargetKind};

/// Registered extension assertions, in registration order
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    assertions: Vec<AssertionInfo>,
}

impl ExtensionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an assertion for one target kind
    ///
    /// Conflicts (empty ids, repeats) are reported when a validator is
    /// built from the registry.
    pub fn register_assertion(&mut self, assertion: Arc<dyn Assertion>, target: TargetKind) {
        tracing::trace!(assertion = assertion.id(), %target, "registered extension assertion");
        self.assertions.push(AssertionInfo::new(assertion, target));
    }

    /// Every registration, in order
    pub fn query_assertions(&self) -> &[AssertionInfo] {
        &self.assertions
    }

    /// Registrations for one kind, in order
    pub fn assertions_for(&self, target: TargetKind) -> impl Iterator<Item = &AssertionInfo> {
        self.assertions.iter().filter(move |info| info.target == target)
    }

    /// Number of registrations
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::validators::base::Target;
    use crate::validators::validation::WodenContext;

    #[derive(Debug)]
    struct Named(&'static str);

    impl Assertion for Named {
        fn id(&self) -> &str {
            self.0
        }

        fn validate(&self, _target: Target<'_>, _context: &mut WodenContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registration_order() {
        let mut registry = ExtensionRegistry::new();
        assert!(registry.is_empty());

        registry.register_assertion(Arc::new(Named("Ext-1")), TargetKind::Binding);
        registry.register_assertion(Arc::new(Named("Ext-2")), TargetKind::Endpoint);
        registry.register_assertion(Arc::new(Named("Ext-3")), TargetKind::Binding);

        let ids: Vec<_> = registry.query_assertions().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["Ext-1", "Ext-2", "Ext-3"]);

        let binding: Vec<_> = registry
            .assertions_for(TargetKind::Binding)
            .map(|i| i.id())
            .collect();
        assert_eq!(binding, vec!["Ext-1", "Ext-3"]);
        assert_eq!(registry.len(), 3);
    }
}
