//! Output sinks for demo transcripts.
//!
//! Every visible effect of a demo (a bridge operation result, a colleague
//! performing an action, the mediator reacting to an event) is emitted as an
//! [`Entry`] to a [`Sink`]. The CLI prints entries as they arrive via
//! [`StdoutSink`]; tests and `--json` output collect them in a [`Transcript`].

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};

use serde::Serialize;
use tracing::{debug, warn};

use crate::mediator::{Action, ColleagueId, Event};

/// A single visible effect produced by a demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// Free-form text: bridge results, client announcements, separators.
    Text { text: String },
    /// A colleague performed one of its actions.
    Performed {
        colleague: ColleagueId,
        action: Action,
    },
    /// The mediator is about to react to an event.
    Reacted { event: Event },
}

impl Entry {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// An empty line separating two runs of a client routine.
    pub fn blank() -> Self {
        Self::text("")
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { text } => f.write_str(text.trim_end_matches('\n')),
            Self::Performed { colleague, action } => write!(f, "{colleague} does {action}."),
            Self::Reacted { event } => {
                write!(f, "Mediator reacts on {event} and triggers following operations:")
            }
        }
    }
}

/// Destination for demo entries.
///
/// Sinks take `&self` so a single sink can be shared (via `Rc`) between the
/// mediator and every colleague.
pub trait Sink {
    fn emit(&self, entry: Entry);
}

/// Prints each entry on its own line to standard output.
///
/// Write failures are logged and the entry is dropped. A closed pipe (as in
/// `patterns all | head -1`) is only logged at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn emit(&self, entry: Entry) {
        write_line(&mut io::stdout().lock(), &entry);
    }
}

fn write_line(out: &mut impl Write, entry: &Entry) {
    match writeln!(out, "{entry}").and_then(|()| out.flush()) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed, dropping entry");
        }
        Err(e) => warn!(error = %e, "failed to write entry to stdout"),
    }
}

/// Records entries in emission order.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: RefCell<Vec<Entry>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    /// Only the colleague actions, in the order they were performed.
    pub fn performed(&self) -> Vec<(ColleagueId, Action)> {
        self.entries
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                Entry::Performed { colleague, action } => Some((*colleague, *action)),
                _ => None,
            })
            .collect()
    }

    /// Render the transcript the way [`StdoutSink`] would have printed it.
    pub fn render(&self) -> String {
        self.entries
            .borrow()
            .iter()
            .map(|entry| format!("{entry}\n"))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Remove and return all recorded entries.
    pub fn take(&self) -> Vec<Entry> {
        self.entries.take()
    }
}

impl Sink for Transcript {
    fn emit(&self, entry: Entry) {
        self.entries.borrow_mut().push(entry);
    }
}
