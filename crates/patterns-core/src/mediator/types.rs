//! Identifiers shared by colleagues, the mediator and the reaction table.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Which colleague performed an action or sent an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColleagueId {
    One,
    Two,
}

impl fmt::Display for ColleagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::One => "Component 1",
            Self::Two => "Component 2",
        };
        f.write_str(s)
    }
}

/// An action a colleague can perform.
///
/// Colleague one owns `A` and `B`; colleague two owns `C` and `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Action {
    A,
    B,
    C,
    D,
}

/// The name of the event a colleague reports after acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Event {
    A,
    B,
    C,
    D,
}

impl Action {
    pub const ALL: [Action; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// The colleague that implements this action.
    pub fn owner(self) -> ColleagueId {
        match self {
            Self::A | Self::B => ColleagueId::One,
            Self::C | Self::D => ColleagueId::Two,
        }
    }

    /// The event reported to the mediator once this action has run.
    pub fn event(self) -> Event {
        match self {
            Self::A => Event::A,
            Self::B => Event::B,
            Self::C => Event::C,
            Self::D => Event::D,
        }
    }
}

impl Event {
    pub const ALL: [Event; 4] = [Self::A, Self::B, Self::C, Self::D];
}

/// Error returned when a name is not one of `A`..`D`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} name {value:?} (expected A, B, C or D)")]
pub struct NameParseError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! letter_enum {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let s = match self {
                    Self::A => "A",
                    Self::B => "B",
                    Self::C => "C",
                    Self::D => "D",
                };
                f.write_str(s)
            }
        }

        impl FromStr for $ty {
            type Err = NameParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    "A" | "a" => Ok(Self::A),
                    "B" | "b" => Ok(Self::B),
                    "C" | "c" => Ok(Self::C),
                    "D" | "d" => Ok(Self::D),
                    other => Err(NameParseError {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

letter_enum!(Action, "action");
letter_enum!(Event, "event");
