//! The mediator's dispatch table.
//!
//! A [`ReactionTable`] maps each [`Event`] to the ordered list of
//! [`Action`]s the mediator triggers in response. Events with no entry are
//! terminal. Since every action reports its own event, the table induces a
//! graph over events; a table whose graph has a cycle would make colleagues
//! trigger each other forever, so construction checks for cycles with a
//! topological sort.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

use thiserror::Error;

use super::types::{Action, Event, NameParseError};

/// Errors that can occur while building a reaction table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactionTableError {
    #[error("unknown event in reaction table: {0}")]
    UnknownEvent(NameParseError),

    #[error("event {event} lists an unknown action: {source}")]
    UnknownAction { event: Event, source: NameParseError },

    #[error("event {0} has more than one reaction rule")]
    DuplicateEvent(Event),

    #[error("reaction cycle detected involving events: {0}")]
    Cycle(String),
}

/// What to do when a table contains a reaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Refuse to build the table.
    #[default]
    Reject,
    /// Accept the table; the mediator's depth limit stops the recursion.
    Bounded,
}

/// Event → ordered actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionTable {
    rules: BTreeMap<Event, Vec<Action>>,
}

impl Default for ReactionTable {
    fn default() -> Self {
        Self::classic()
    }
}

impl ReactionTable {
    /// The demo's rules: `A` triggers `C`; `D` triggers `B` then `C`.
    pub fn classic() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(Event::A, vec![Action::C]);
        rules.insert(Event::D, vec![Action::B, Action::C]);
        Self { rules }
    }

    /// Build a table from `(event, actions)` rules.
    ///
    /// Rules with an empty action list are dropped (the event is terminal
    /// either way). Returns an error for a repeated event, or for a cycle
    /// when `policy` is [`CyclePolicy::Reject`].
    pub fn new(
        rules: impl IntoIterator<Item = (Event, Vec<Action>)>,
        policy: CyclePolicy,
    ) -> Result<Self, ReactionTableError> {
        let mut map = BTreeMap::new();
        for (event, actions) in rules {
            if map.contains_key(&event) {
                return Err(ReactionTableError::DuplicateEvent(event));
            }
            map.insert(event, actions);
        }
        map.retain(|_, actions: &mut Vec<Action>| !actions.is_empty());

        let table = Self { rules: map };
        if policy == CyclePolicy::Reject {
            if let Some(cycle) = table.find_cycle() {
                let names: Vec<String> = cycle.iter().map(|e| e.to_string()).collect();
                return Err(ReactionTableError::Cycle(names.join(", ")));
            }
        }
        Ok(table)
    }

    /// Build a table from event and action names, as found in a config file.
    pub fn from_names<'a, I, A>(rules: I, policy: CyclePolicy) -> Result<Self, ReactionTableError>
    where
        I: IntoIterator<Item = (&'a str, A)>,
        A: IntoIterator<Item = &'a str>,
    {
        let mut parsed = Vec::new();
        for (event_name, action_names) in rules {
            let event: Event = event_name.parse().map_err(ReactionTableError::UnknownEvent)?;
            let actions = action_names
                .into_iter()
                .map(|name| {
                    name.parse::<Action>()
                        .map_err(|source| ReactionTableError::UnknownAction { event, source })
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push((event, actions));
        }
        Self::new(parsed, policy)
    }

    /// Actions triggered by `event`, in the order they run. Empty for a
    /// terminal event.
    pub fn reactions_for(&self, event: Event) -> &[Action] {
        self.rules.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_terminal(&self, event: Event) -> bool {
        self.reactions_for(event).is_empty()
    }

    /// Iterate the non-terminal rules in event order.
    pub fn iter(&self) -> impl Iterator<Item = (Event, &[Action])> {
        self.rules.iter().map(|(event, actions)| (*event, actions.as_slice()))
    }

    /// Return the events that lie on (or downstream of) a reaction cycle,
    /// or `None` if the table is acyclic.
    ///
    /// Uses Kahn's algorithm: events left with a non-zero in-degree after
    /// the sort cannot be ordered.
    pub fn find_cycle(&self) -> Option<Vec<Event>> {
        let mut in_degree: HashMap<Event, usize> = Event::ALL.iter().map(|e| (*e, 0)).collect();
        for actions in self.rules.values() {
            for action in actions {
                *in_degree.entry(action.event()).or_default() += 1;
            }
        }

        let mut queue: VecDeque<Event> = Event::ALL
            .iter()
            .copied()
            .filter(|e| in_degree[e] == 0)
            .collect();
        let mut visited = 0usize;

        while let Some(event) = queue.pop_front() {
            visited += 1;
            for action in self.reactions_for(event) {
                let next = action.event();
                if let Some(deg) = in_degree.get_mut(&next) {
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(next);
                    }
                }
            }
        }

        if visited == Event::ALL.len() {
            return None;
        }

        let mut remaining: Vec<Event> = in_degree
            .into_iter()
            .filter(|(_, deg)| *deg > 0)
            .map(|(event, _)| event)
            .collect();
        remaining.sort();
        Some(remaining)
    }
}

impl fmt::Display for ReactionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in Event::ALL {
            let actions = self.reactions_for(event);
            if actions.is_empty() {
                writeln!(f, "{event} -> (terminal)")?;
            } else {
                let names: Vec<String> = actions.iter().map(|a| a.to_string()).collect();
                writeln!(f, "{event} -> {}", names.join(", "))?;
            }
        }
        Ok(())
    }
}
