//! Bridge pattern: an abstraction hierarchy that delegates its primitive
//! work to a separate implementor hierarchy.
//!
//! # Architecture
//!
//! ```text
//! client_code(&dyn Abstraction)
//!     |
//!     v
//! BaseAbstraction / ExtendedAbstraction --operation()--> prefix + ...
//!     |
//!     |  Rc<dyn Implementor> (shared, fixed at construction)
//!     v
//! ConcreteImplementationA / ConcreteImplementationB --operation_implementation()
//! ```
//!
//! Swapping the implementor changes the output without touching abstraction
//! code; swapping the abstraction changes the composition text without
//! touching implementor code.

pub mod abstraction;
pub mod client;
pub mod implementor;
pub mod registry;

pub use abstraction::{Abstraction, AbstractionKind, BaseAbstraction, ExtendedAbstraction};
pub use client::{client_code, run_demo};
pub use implementor::{ConcreteImplementationA, ConcreteImplementationB, Implementor};
pub use registry::{ImplementorRegistry, RegistryError};
