//! Registry of feedback mechanisms
//!
//! Provides [`MechanismRegistry`], an ordered collection of instantiated
//! mechanisms used by comparison tables.

use crate::error::ModelResult;
use crate::mechanism::{FeedbackMechanism, MechanismSpec};

/// Ordered set of mechanisms to compare
///
/// Order is preserved so report rows appear in the order they were registered.
#[derive(Debug, Default)]
pub struct MechanismRegistry {
    mechanisms: Vec<Box<dyn FeedbackMechanism>>,
}

impl MechanismRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            mechanisms: Vec::new(),
        }
    }

    /// Create registry with the reference mechanisms
    ///
    /// # Errors
    /// Never fails for the built-in parameters; kept fallible to share
    /// [`from_specs`](Self::from_specs)
    pub fn with_defaults() -> ModelResult<Self> {
        Self::from_specs(&MechanismSpec::defaults())
    }

    /// Instantiate every spec, in order
    ///
    /// # Errors
    /// `InvalidParameter` from the first spec with out-of-range parameters
    pub fn from_specs(specs: &[MechanismSpec]) -> ModelResult<Self> {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec.build()?);
        }
        Ok(registry)
    }

    /// Append a mechanism
    pub fn register(&mut self, mechanism: Box<dyn FeedbackMechanism>) {
        self.mechanisms.push(mechanism);
    }

    /// Look up a mechanism by label
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&dyn FeedbackMechanism> {
        self.mechanisms
            .iter()
            .find(|m| m.label() == label)
            .map(|m| &**m)
    }

    /// Iterate mechanisms in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn FeedbackMechanism> {
        self.mechanisms.iter().map(|m| &**m)
    }

    /// Labels in registration order
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.iter().map(|m| m.label()).collect()
    }

    /// Number of registered mechanisms
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.mechanisms.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mechanisms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::Retry;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_keep_reference_order() {
        let registry = MechanismRegistry::with_defaults().unwrap();
        assert_eq!(
            registry.labels(),
            vec![
                "Verification",
                "Retry (2x)",
                "Self-check",
                "Retry (3x)",
                "Ensemble (3)",
            ]
        );
    }

    #[test]
    fn lookup_by_label() {
        let mut registry = MechanismRegistry::new();
        assert!(registry.is_empty());
        registry.register(Box::new(Retry::new(4).unwrap()));

        assert_eq!(registry.len(), 1);
        assert!(registry.get("Retry (4x)").is_some());
        assert!(registry.get("Retry (2x)").is_none());
    }
}
