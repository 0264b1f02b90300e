//! Colleague components.
//!
//! Colleagues implement their own behavior and know nothing about each
//! other or about any concrete mediator. All they keep is a non-owning
//! link to whichever mediator wired them.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::output::{Entry, Sink};

use super::types::{Action, ColleagueId};
use super::{Mediator, MediatorError};

/// Behavior common to every colleague.
pub trait Colleague {
    fn id(&self) -> ColleagueId;

    /// Point this colleague at `mediator`, replacing any previous link.
    /// Only a weak reference is kept.
    fn set_mediator(&self, mediator: &Rc<dyn Mediator>);

    /// Whether the mediator link is set and the mediator is still alive.
    fn is_wired(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Mediator link
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MediatorLink {
    mediator: RefCell<Option<Weak<dyn Mediator>>>,
}

impl MediatorLink {
    fn set(&self, mediator: &Rc<dyn Mediator>) {
        *self.mediator.borrow_mut() = Some(Rc::downgrade(mediator));
    }

    /// Upgrade the link. The borrow is released before the caller uses the
    /// returned mediator, so re-entrant notifications are fine.
    fn upgrade(&self) -> Option<Rc<dyn Mediator>> {
        self.mediator.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// Perform `action` on behalf of `colleague`: emit the local effect,
    /// then report the action's event.
    fn act(&self, colleague: ColleagueId, sink: &dyn Sink, action: Action) -> Result<(), MediatorError> {
        let Some(mediator) = self.upgrade() else {
            warn!(%colleague, %action, "action invoked before the colleague was wired");
            return Err(MediatorError::Unwired { colleague });
        };

        debug!(%colleague, %action, "performing action");
        sink.emit(Entry::Performed { colleague, action });
        mediator.notify(colleague, action.event())
    }
}

// ---------------------------------------------------------------------------
// Concrete colleagues
// ---------------------------------------------------------------------------

/// "Component 1": performs actions `A` and `B`.
pub struct ColleagueA {
    link: MediatorLink,
    sink: Rc<dyn Sink>,
}

impl ColleagueA {
    pub fn new(sink: Rc<dyn Sink>) -> Self {
        Self {
            link: MediatorLink::default(),
            sink,
        }
    }

    pub fn do_a(&self) -> Result<(), MediatorError> {
        self.link.act(self.id(), self.sink.as_ref(), Action::A)
    }

    pub fn do_b(&self) -> Result<(), MediatorError> {
        self.link.act(self.id(), self.sink.as_ref(), Action::B)
    }
}

impl Colleague for ColleagueA {
    fn id(&self) -> ColleagueId {
        ColleagueId::One
    }

    fn set_mediator(&self, mediator: &Rc<dyn Mediator>) {
        self.link.set(mediator);
    }

    fn is_wired(&self) -> bool {
        self.link.upgrade().is_some()
    }
}

/// "Component 2": performs actions `C` and `D`.
pub struct ColleagueB {
    link: MediatorLink,
    sink: Rc<dyn Sink>,
}

impl ColleagueB {
    pub fn new(sink: Rc<dyn Sink>) -> Self {
        Self {
            link: MediatorLink::default(),
            sink,
        }
    }

    pub fn do_c(&self) -> Result<(), MediatorError> {
        self.link.act(self.id(), self.sink.as_ref(), Action::C)
    }

    pub fn do_d(&self) -> Result<(), MediatorError> {
        self.link.act(self.id(), self.sink.as_ref(), Action::D)
    }
}

impl Colleague for ColleagueB {
    fn id(&self) -> ColleagueId {
        ColleagueId::Two
    }

    fn set_mediator(&self, mediator: &Rc<dyn Mediator>) {
        self.link.set(mediator);
    }

    fn is_wired(&self) -> bool {
        self.link.upgrade().is_some()
    }
}

impl fmt::Debug for ColleagueA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColleagueA")
            .field("wired", &self.is_wired())
            .finish()
    }
}

impl fmt::Debug for ColleagueB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColleagueB")
            .field("wired", &self.is_wired())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Colleagues
// ---------------------------------------------------------------------------

/// Shared handles to both colleagues.
///
/// The mediator keeps one copy; the client keeps another so it can start
/// actions without going through the mediator.
#[derive(Debug, Clone)]
pub struct Colleagues {
    pub component1: Rc<ColleagueA>,
    pub component2: Rc<ColleagueB>,
}

impl Colleagues {
    /// Create both colleagues, unwired, writing to `sink`.
    pub fn new(sink: Rc<dyn Sink>) -> Self {
        Self {
            component1: Rc::new(ColleagueA::new(Rc::clone(&sink))),
            component2: Rc::new(ColleagueB::new(sink)),
        }
    }

    /// Invoke `action` on the colleague that owns it.
    pub fn perform(&self, action: Action) -> Result<(), MediatorError> {
        match action {
            Action::A => self.component1.do_a(),
            Action::B => self.component1.do_b(),
            Action::C => self.component2.do_c(),
            Action::D => self.component2.do_d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::mediator::types::Event;
    use crate::output::Transcript;

    /// Mediator that only counts notifications.
    #[derive(Default)]
    struct CountingMediator {
        calls: Cell<usize>,
        last: Cell<Option<(ColleagueId, Event)>>,
    }

    impl Mediator for CountingMediator {
        fn notify(&self, sender: ColleagueId, event: Event) -> Result<(), MediatorError> {
            self.calls.set(self.calls.get() + 1);
            self.last.set(Some((sender, event)));
            Ok(())
        }
    }

    #[test]
    fn unwired_colleague_reports_error_without_effect() {
        let transcript = Rc::new(Transcript::new());
        let colleague = ColleagueA::new(transcript.clone());

        assert!(!colleague.is_wired());
        assert_eq!(
            colleague.do_a(),
            Err(MediatorError::Unwired {
                colleague: ColleagueId::One
            })
        );
        assert!(transcript.is_empty());
    }

    #[test]
    fn wired_colleague_emits_then_notifies() {
        let transcript = Rc::new(Transcript::new());
        let colleague = ColleagueB::new(transcript.clone());
        let counting = Rc::new(CountingMediator::default());
        let mediator: Rc<dyn Mediator> = counting.clone();
        colleague.set_mediator(&mediator);

        assert!(colleague.is_wired());
        colleague.do_d().unwrap();

        assert_eq!(transcript.performed(), vec![(ColleagueId::Two, Action::D)]);
        assert_eq!(counting.calls.get(), 1);
        assert_eq!(counting.last.get(), Some((ColleagueId::Two, Event::D)));
    }

    #[test]
    fn link_does_not_keep_mediator_alive() {
        let transcript = Rc::new(Transcript::new());
        let colleague = ColleagueA::new(transcript);
        let mediator: Rc<dyn Mediator> = Rc::new(CountingMediator::default());
        colleague.set_mediator(&mediator);
        assert_eq!(Rc::strong_count(&mediator), 1);

        drop(mediator);
        assert!(!colleague.is_wired());
        assert!(matches!(colleague.do_b(), Err(MediatorError::Unwired { .. })));
    }

    #[test]
    fn perform_routes_to_owner() {
        let transcript = Rc::new(Transcript::new());
        let colleagues = Colleagues::new(transcript.clone());
        let mediator: Rc<dyn Mediator> = Rc::new(CountingMediator::default());
        colleagues.component1.set_mediator(&mediator);
        colleagues.component2.set_mediator(&mediator);

        for action in Action::ALL {
            colleagues.perform(action).unwrap();
        }

        let owners: Vec<ColleagueId> = transcript.performed().iter().map(|(c, _)| *c).collect();
        assert_eq!(
            owners,
            vec![ColleagueId::One, ColleagueId::One, ColleagueId::Two, ColleagueId::Two]
        );
    }

    #[test]
    fn debug_shows_wired_state() {
        let colleague = ColleagueA::new(Rc::new(Transcript::new()));
        assert_eq!(format!("{colleague:?}"), "ColleagueA { wired: false }");
    }
}
