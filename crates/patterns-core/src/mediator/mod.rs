//! Mediator pattern: colleagues that never talk to each other directly.
//!
//! Each colleague performs a local action, then reports an [`Event`] to its
//! mediator. The mediator looks the event up in its [`ReactionTable`] and
//! invokes the listed actions on colleagues, synchronously and in order.
//!
//! # Ownership
//!
//! ```text
//! ConcreteMediator --Rc--> ColleagueA
//!        ^         --Rc--> ColleagueB
//!        |                        |
//!        +------- Weak -----------+   (set by wire_colleagues)
//! ```
//!
//! The mediator owns the colleagues. The back-reference is a `Weak`, so an
//! action on a colleague whose mediator was never set (or has been dropped)
//! returns [`MediatorError::Unwired`] instead of following a dangling link.

pub mod client;
pub mod colleague;
pub mod concrete;
pub mod reactions;
pub mod types;

use thiserror::Error;

pub use client::{CLASSIC_TRIGGERS, client_code};
pub use colleague::{Colleague, ColleagueA, ColleagueB, Colleagues};
pub use concrete::{ConcreteMediator, MediatorSettings};
pub use reactions::{CyclePolicy, ReactionTable, ReactionTableError};
pub use types::{Action, ColleagueId, Event, NameParseError};

/// Errors raised while colleagues act and the mediator reacts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediatorError {
    #[error("{colleague} is not wired to a mediator")]
    Unwired { colleague: ColleagueId },

    #[error("reaction to event {event} exceeded the maximum call depth ({depth} > {max})")]
    DepthExceeded { event: Event, depth: usize, max: usize },
}

/// The coordinator colleagues report to.
pub trait Mediator {
    /// React to `event`, reported by `sender` after it performed an action.
    fn notify(&self, sender: ColleagueId, event: Event) -> Result<(), MediatorError>;
}

// Compile-time assertion: Mediator must be object-safe, colleagues hold
// `Weak<dyn Mediator>`.
const _: () = {
    fn _assert_object_safe(_: &dyn Mediator) {}
};
