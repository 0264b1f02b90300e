//! Bridge and Mediator pattern demonstrations.
//!
//! - [`bridge`]: an abstraction hierarchy delegating to a separate
//!   implementor hierarchy.
//! - [`mediator`]: colleagues that report events to a mediator, which
//!   reacts by invoking actions on other colleagues.
//! - [`output`]: the sink both demos write their visible effects to.

pub mod bridge;
pub mod mediator;
pub mod output;
