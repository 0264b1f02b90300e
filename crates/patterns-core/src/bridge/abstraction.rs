//! The abstraction side of the bridge.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use super::implementor::Implementor;
use super::registry::RegistryError;

/// The "control" half of the bridge.
///
/// An abstraction keeps a shared handle to exactly one [`Implementor`] and
/// builds its high-level [`operation`](Self::operation) on top of it.
/// Variants differ only in the text they put in front of the delegated
/// result.
pub trait Abstraction {
    /// Which variant this is.
    fn kind(&self) -> AbstractionKind;

    /// The implementor this abstraction delegates to.
    fn implementor(&self) -> &dyn Implementor;

    /// Fixed text placed in front of the implementor's result.
    fn prefix(&self) -> &'static str {
        self.kind().prefix()
    }

    /// Compose the prefix with the implementor's primitive operation.
    fn operation(&self) -> String {
        let mut out = self.prefix().to_string();
        out.push_str(&self.implementor().operation_implementation());
        out
    }
}

/// The plain abstraction.
#[derive(Clone)]
pub struct BaseAbstraction {
    implementor: Rc<dyn Implementor>,
}

impl BaseAbstraction {
    pub fn new(implementor: Rc<dyn Implementor>) -> Self {
        Self { implementor }
    }
}

impl Abstraction for BaseAbstraction {
    fn kind(&self) -> AbstractionKind {
        AbstractionKind::Base
    }

    fn implementor(&self) -> &dyn Implementor {
        self.implementor.as_ref()
    }
}

/// An abstraction extended without changing any implementor.
#[derive(Clone)]
pub struct ExtendedAbstraction {
    implementor: Rc<dyn Implementor>,
}

impl ExtendedAbstraction {
    pub fn new(implementor: Rc<dyn Implementor>) -> Self {
        Self { implementor }
    }
}

impl Abstraction for ExtendedAbstraction {
    fn kind(&self) -> AbstractionKind {
        AbstractionKind::Extended
    }

    fn implementor(&self) -> &dyn Implementor {
        self.implementor.as_ref()
    }
}

impl fmt::Debug for BaseAbstraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseAbstraction")
            .field("implementor", &self.implementor.name())
            .finish()
    }
}

impl fmt::Debug for ExtendedAbstraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedAbstraction")
            .field("implementor", &self.implementor.name())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// AbstractionKind
// ---------------------------------------------------------------------------

/// The closed set of abstraction variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbstractionKind {
    Base,
    Extended,
}

impl AbstractionKind {
    pub const ALL: [AbstractionKind; 2] = [Self::Base, Self::Extended];

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Base => "Abstraction: Base operation with:\n",
            Self::Extended => "ExtendedAbstraction: Extended operation with:\n",
        }
    }

    /// Build an abstraction of this kind around a shared implementor.
    pub fn build(self, implementor: Rc<dyn Implementor>) -> Box<dyn Abstraction> {
        match self {
            Self::Base => Box::new(BaseAbstraction::new(implementor)),
            Self::Extended => Box::new(ExtendedAbstraction::new(implementor)),
        }
    }
}

impl fmt::Display for AbstractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Base => "base",
            Self::Extended => "extended",
        };
        f.write_str(s)
    }
}

impl FromStr for AbstractionKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "extended" => Ok(Self::Extended),
            _ => Err(RegistryError::UnknownAbstraction(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::implementor::{ConcreteImplementationA, ConcreteImplementationB};

    #[test]
    fn base_operation_prefixes_implementor_output() {
        let abstraction = BaseAbstraction::new(Rc::new(ConcreteImplementationA));
        assert_eq!(
            abstraction.operation(),
            "Abstraction: Base operation with:\n\
             ConcreteImplementationA: Here's the result on the platform A.\n"
        );
    }

    #[test]
    fn extended_operation_only_changes_prefix() {
        let abstraction = ExtendedAbstraction::new(Rc::new(ConcreteImplementationB));
        assert_eq!(
            abstraction.operation(),
            "ExtendedAbstraction: Extended operation with:\n\
             ConcreteImplementationB: Here's the result on the platform B.\n"
        );
    }

    #[test]
    fn implementor_can_be_shared() {
        let shared: Rc<dyn Implementor> = Rc::new(ConcreteImplementationA);
        let base = BaseAbstraction::new(Rc::clone(&shared));
        let extended = ExtendedAbstraction::new(Rc::clone(&shared));

        assert_eq!(Rc::strong_count(&shared), 3);
        assert_eq!(base.implementor().name(), extended.implementor().name());
        assert_ne!(base.operation(), extended.operation());
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("base".parse::<AbstractionKind>().unwrap(), AbstractionKind::Base);
        assert_eq!(
            "Extended".parse::<AbstractionKind>().unwrap(),
            AbstractionKind::Extended
        );
        let err = "refined".parse::<AbstractionKind>().unwrap_err();
        assert!(matches!(err, RegistryError::UnknownAbstraction(ref s) if s == "refined"));
    }

    #[test]
    fn kind_display_roundtrips_through_from_str() {
        for kind in AbstractionKind::ALL {
            assert_eq!(kind.to_string().parse::<AbstractionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn build_returns_matching_kind() {
        for kind in AbstractionKind::ALL {
            let built = kind.build(Rc::new(ConcreteImplementationB));
            assert_eq!(built.kind(), kind);
            assert_eq!(built.prefix(), kind.prefix());
        }
    }

    #[test]
    fn debug_shows_implementor_name() {
        let abstraction = BaseAbstraction::new(Rc::new(ConcreteImplementationB));
        let debug = format!("{abstraction:?}");
        assert!(debug.contains("\"b\""), "unexpected debug output: {debug}");
    }
}
