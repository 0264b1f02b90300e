//! Shared fixtures for pattern integration tests.
//!
//! Every fixture records into a [`Transcript`] so tests can assert on the
//! exact sequence of actions instead of captured stdout.

use std::rc::Rc;

use patterns_core::bridge::{AbstractionKind, Implementor, ImplementorRegistry};
use patterns_core::mediator::{Action, ColleagueId, Colleagues, ConcreteMediator, MediatorSettings};
use patterns_core::output::Transcript;

/// A mediator, its colleagues, and the transcript they all write to.
pub struct MediatorFixture {
    pub transcript: Rc<Transcript>,
    pub colleagues: Colleagues,
    pub mediator: Rc<ConcreteMediator>,
}

impl MediatorFixture {
    /// Build with `settings`, without wiring anything.
    pub fn unwired(settings: MediatorSettings) -> Self {
        let transcript = Rc::new(Transcript::new());
        let colleagues = Colleagues::new(transcript.clone());
        let mediator = ConcreteMediator::with_settings(colleagues.clone(), transcript.clone(), settings);
        Self {
            transcript,
            colleagues,
            mediator,
        }
    }

    /// Build with `settings` and wire both colleagues.
    pub fn wired(settings: MediatorSettings) -> Self {
        let fixture = Self::unwired(settings);
        fixture.mediator.wire_colleagues();
        fixture
    }

    /// Wired fixture using the classic reaction table.
    pub fn classic() -> Self {
        Self::wired(MediatorSettings::default())
    }

    /// Actions performed so far, dropping the initiating action.
    ///
    /// Call after a single client action to get exactly the calls the
    /// mediator triggered downstream.
    pub fn downstream(&self) -> Vec<(ColleagueId, Action)> {
        self.transcript.performed().into_iter().skip(1).collect()
    }
}

/// Every (abstraction kind, implementor name) pair in the default registry,
/// sorted by implementor name.
pub fn all_bridge_pairs() -> Vec<(AbstractionKind, String)> {
    let registry = ImplementorRegistry::with_defaults();
    let mut names: Vec<String> = registry.list().into_iter().map(str::to_owned).collect();
    names.sort();

    AbstractionKind::ALL
        .iter()
        .flat_map(|kind| names.iter().map(move |name| (*kind, name.clone())))
        .collect()
}

/// The description a registered implementor produces on its own.
pub fn implementor_output(name: &str) -> String {
    ImplementorRegistry::with_defaults()
        .get(name)
        .map(|imp: Rc<dyn Implementor>| imp.operation_implementation())
        .unwrap_or_else(|| panic!("no implementor named {name:?}"))
}
