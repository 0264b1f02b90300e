//! Mediator client routine.

use tracing::debug;

use crate::output::{Entry, Sink};

use super::MediatorError;
use super::colleague::Colleagues;
use super::types::Action;

/// The actions the classic walkthrough starts: `A` on colleague one, then
/// `D` on colleague two.
pub const CLASSIC_TRIGGERS: [Action; 2] = [Action::A, Action::D];

/// Start each of `triggers` directly on its colleague, announcing it first.
///
/// Runs are separated by a blank line. Stops at the first error.
pub fn client_code(colleagues: &Colleagues, triggers: &[Action], sink: &dyn Sink) -> Result<(), MediatorError> {
    for (i, &action) in triggers.iter().enumerate() {
        if i > 0 {
            sink.emit(Entry::blank());
        }
        debug!(%action, colleague = %action.owner(), "client trigger");
        sink.emit(Entry::text(format!("Client triggers operation {action}.")));
        colleagues.perform(action)?;
    }
    Ok(())
}
