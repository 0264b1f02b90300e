//! Implementor registry -- a named collection of shared implementors.
//!
//! The registry lets a caller pick an implementor by name at runtime (e.g.
//! from a command-line flag) and pair it with any [`AbstractionKind`].

use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use super::abstraction::{Abstraction, AbstractionKind};
use super::implementor::{ConcreteImplementationA, ConcreteImplementationB, Implementor};

/// Errors from looking up bridge components by name.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown implementor {0:?}")]
    UnknownImplementor(String),

    #[error("unknown abstraction {0:?} (expected base or extended)")]
    UnknownAbstraction(String),
}

/// A collection of registered [`Implementor`]s, keyed by name.
///
/// Lookups hand out `Rc` clones, so every abstraction built from the same
/// registry entry shares one implementor instance.
///
/// # Example
///
/// ```
/// use patterns_core::bridge::{AbstractionKind, ImplementorRegistry};
///
/// let registry = ImplementorRegistry::with_defaults();
/// let abstraction = registry.build(AbstractionKind::Extended, "b").unwrap();
/// assert!(abstraction.operation().starts_with("ExtendedAbstraction"));
/// ```
#[derive(Default)]
pub struct ImplementorRegistry {
    implementors: HashMap<String, Rc<dyn Implementor>>,
}

impl ImplementorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding platforms A and B.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ConcreteImplementationA);
        registry.register(ConcreteImplementationB);
        registry
    }

    /// Register an implementor under the name returned by
    /// [`Implementor::name`].
    ///
    /// If one with the same name is already registered, it is replaced and
    /// the old one is returned.
    pub fn register(&mut self, implementor: impl Implementor + 'static) -> Option<Rc<dyn Implementor>> {
        let name = implementor.name().to_string();
        self.implementors.insert(name, Rc::new(implementor))
    }

    /// Look up an implementor by name.
    pub fn get(&self, name: &str) -> Option<Rc<dyn Implementor>> {
        self.implementors.get(name).cloned()
    }

    /// Look up an implementor by name, reporting a missing one as an error.
    pub fn resolve(&self, name: &str) -> Result<Rc<dyn Implementor>, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::UnknownImplementor(name.to_owned()))
    }

    /// Build an abstraction of `kind` around the implementor named `name`.
    pub fn build(&self, kind: AbstractionKind, name: &str) -> Result<Box<dyn Abstraction>, RegistryError> {
        Ok(kind.build(self.resolve(name)?))
    }

    /// List the names of all registered implementors.
    ///
    /// The order is not guaranteed (HashMap iteration order).
    pub fn list(&self) -> Vec<&str> {
        self.implementors.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.implementors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implementors.is_empty()
    }
}

impl std::fmt::Debug for ImplementorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImplementorRegistry")
            .field("implementors", &self.implementors.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal test implementor with a configurable name.
    struct FakeImplementor {
        implementor_name: String,
        output: &'static str,
    }

    impl FakeImplementor {
        fn new(name: &str, output: &'static str) -> Self {
            Self {
                implementor_name: name.to_string(),
                output,
            }
        }
    }

    impl Implementor for FakeImplementor {
        fn name(&self) -> &str {
            &self.implementor_name
        }

        fn operation_implementation(&self) -> String {
            self.output.to_string()
        }
    }

    #[test]
    fn registry_starts_empty() {
        let registry = ImplementorRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.list().is_empty());
    }

    #[test]
    fn defaults_hold_a_and_b() {
        let registry = ImplementorRegistry::with_defaults();
        let mut names = registry.list();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = ImplementorRegistry::new();
        assert!(registry.register(FakeImplementor::new("x", "first")).is_none());

        let old = registry.register(FakeImplementor::new("x", "second"));
        assert_eq!(old.unwrap().operation_implementation(), "first");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("x").unwrap().operation_implementation(), "second");
    }

    #[test]
    fn get_hands_out_shared_handles() {
        let registry = ImplementorRegistry::with_defaults();
        let first = registry.get("a").unwrap();
        let second = registry.get("a").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn resolve_missing_is_an_error() {
        let registry = ImplementorRegistry::with_defaults();
        let err = registry.resolve("c").err().unwrap();
        assert!(matches!(err, RegistryError::UnknownImplementor(ref s) if s == "c"));
        assert_eq!(err.to_string(), "unknown implementor \"c\"");
    }

    #[test]
    fn build_works_with_custom_implementor() {
        let mut registry = ImplementorRegistry::new();
        registry.register(FakeImplementor::new("fake", "fake result\n"));

        let abstraction = registry.build(AbstractionKind::Base, "fake").unwrap();
        assert_eq!(
            abstraction.operation(),
            "Abstraction: Base operation with:\nfake result\n"
        );
    }

    #[test]
    fn registry_debug_shows_names() {
        let registry = ImplementorRegistry::with_defaults();
        let debug = format!("{registry:?}");
        assert!(debug.contains("\"a\""));
        assert!(debug.contains("\"b\""));
    }
}
