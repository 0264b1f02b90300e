//! The concrete mediator coordinating [`ColleagueA`] and [`ColleagueB`].
//!
//! [`ColleagueA`]: super::ColleagueA
//! [`ColleagueB`]: super::ColleagueB

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::output::{Entry, Sink};

use super::colleague::{Colleague, Colleagues};
use super::reactions::ReactionTable;
use super::types::{ColleagueId, Event};
use super::{Mediator, MediatorError};

/// Tunables for a [`ConcreteMediator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediatorSettings {
    pub reactions: ReactionTable,
    /// How many reactions may be nested inside one another before the
    /// mediator gives up.
    pub max_depth: usize,
}

impl MediatorSettings {
    pub const DEFAULT_MAX_DEPTH: usize = 16;
}

impl Default for MediatorSettings {
    fn default() -> Self {
        Self {
            reactions: ReactionTable::classic(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Owns both colleagues and reacts to their events.
pub struct ConcreteMediator {
    colleagues: Colleagues,
    sink: Rc<dyn Sink>,
    settings: MediatorSettings,
    depth: Cell<usize>,
}

impl ConcreteMediator {
    /// Create a mediator with the classic reaction table.
    ///
    /// The colleagues are not wired yet: the mediator has to live in an
    /// `Rc` before it can hand out weak references to itself, so call
    /// [`wire_colleagues`](Self::wire_colleagues) afterwards.
    pub fn new(colleagues: Colleagues, sink: Rc<dyn Sink>) -> Rc<Self> {
        Self::with_settings(colleagues, sink, MediatorSettings::default())
    }

    pub fn with_settings(colleagues: Colleagues, sink: Rc<dyn Sink>, settings: MediatorSettings) -> Rc<Self> {
        Rc::new(Self {
            colleagues,
            sink,
            settings,
            depth: Cell::new(0),
        })
    }

    /// Point colleague one at this mediator.
    pub fn wire_colleague_a(self: &Rc<Self>) {
        self.colleagues.component1.set_mediator(&self.as_dyn());
        debug!(colleague = %ColleagueId::One, "colleague wired");
    }

    /// Point colleague two at this mediator.
    pub fn wire_colleague_b(self: &Rc<Self>) {
        self.colleagues.component2.set_mediator(&self.as_dyn());
        debug!(colleague = %ColleagueId::Two, "colleague wired");
    }

    /// Point both colleagues at this mediator.
    pub fn wire_colleagues(self: &Rc<Self>) {
        self.wire_colleague_a();
        self.wire_colleague_b();
    }

    pub fn colleagues(&self) -> &Colleagues {
        &self.colleagues
    }

    pub fn reactions(&self) -> &ReactionTable {
        &self.settings.reactions
    }

    pub fn max_depth(&self) -> usize {
        self.settings.max_depth
    }

    fn as_dyn(self: &Rc<Self>) -> Rc<dyn Mediator> {
        Rc::clone(self) as Rc<dyn Mediator>
    }
}

impl Mediator for ConcreteMediator {
    fn notify(&self, sender: ColleagueId, event: Event) -> Result<(), MediatorError> {
        let actions = self.settings.reactions.reactions_for(event);
        if actions.is_empty() {
            debug!(%sender, %event, "terminal event");
            return Ok(());
        }

        let depth = self.depth.get() + 1;
        if depth > self.settings.max_depth {
            warn!(%sender, %event, depth, max = self.settings.max_depth, "reaction depth exceeded");
            return Err(MediatorError::DepthExceeded {
                event,
                depth,
                max: self.settings.max_depth,
            });
        }
        let _depth = DepthGuard::enter(&self.depth);

        debug!(%sender, %event, depth, reactions = actions.len(), "reacting");
        self.sink.emit(Entry::Reacted { event });
        for &action in actions {
            self.colleagues.perform(action)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ConcreteMediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcreteMediator")
            .field("colleagues", &self.colleagues)
            .field("settings", &self.settings)
            .field("depth", &self.depth.get())
            .finish()
    }
}

/// Increments the nesting counter for the lifetime of one reaction,
/// including early returns through `?`.
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self { depth }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}
