//! The `Implementor` trait and its concrete platforms.

/// Primitive operations the abstraction hierarchy builds on.
///
/// The interface does not have to mirror [`super::Abstraction`]; it only
/// exposes the low-level step each platform provides.
pub trait Implementor {
    /// Short registry key for this implementor (e.g. "a").
    fn name(&self) -> &str;

    /// Produce this platform's description of the result.
    fn operation_implementation(&self) -> String;
}

// Compile-time assertion: Implementor must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn Implementor) {}
};

/// Platform A.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConcreteImplementationA;

impl ConcreteImplementationA {
    pub const DESCRIPTION: &'static str =
        "ConcreteImplementationA: Here's the result on the platform A.\n";
}

impl Implementor for ConcreteImplementationA {
    fn name(&self) -> &str {
        "a"
    }

    fn operation_implementation(&self) -> String {
        Self::DESCRIPTION.to_string()
    }
}

/// Platform B.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConcreteImplementationB;

impl ConcreteImplementationB {
    pub const DESCRIPTION: &'static str =
        "ConcreteImplementationB: Here's the result on the platform B.\n";
}

impl Implementor for ConcreteImplementationB {
    fn name(&self) -> &str {
        "b"
    }

    fn operation_implementation(&self) -> String {
        Self::DESCRIPTION.to_string()
    }
}
