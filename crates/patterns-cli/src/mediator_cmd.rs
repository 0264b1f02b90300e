//! `patterns mediator` command: run the mediator walkthrough.

use std::rc::Rc;

use anyhow::{Context, Result};
use serde::Serialize;

use patterns_core::mediator::{
    Action, CLASSIC_TRIGGERS, Colleagues, ConcreteMediator, MediatorError, MediatorSettings,
    client_code,
};
use patterns_core::output::{Entry, Sink, StdoutSink, Transcript};

/// Options for a mediator run.
#[derive(Debug, Default)]
pub struct MediatorOptions {
    /// Action names to start, in order. Empty means the classic `A`, `D`.
    pub triggers: Vec<String>,
    /// Skip wiring the colleagues to the mediator.
    pub unwired: bool,
    /// Print the transcript as JSON instead of text.
    pub json: bool,
}

/// JSON shape printed by `--json`.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    entries: &'a [Entry],
    error: Option<String>,
}

/// Run the mediator command.
pub fn run_mediator(settings: &MediatorSettings, options: &MediatorOptions) -> Result<()> {
    let triggers = parse_triggers(&options.triggers)?;

    if options.json {
        let transcript = Rc::new(Transcript::new());
        let result = run(transcript.clone(), settings, &triggers, options.unwired);

        let entries = transcript.entries();
        let report = JsonReport {
            entries: &entries,
            error: result.as_ref().err().map(|e| e.to_string()),
        };
        let json = serde_json::to_string_pretty(&report).context("failed to serialize transcript")?;
        StdoutSink.emit(Entry::text(json));
        result.context("mediator demo failed")?;
    } else {
        run(Rc::new(StdoutSink), settings, &triggers, options.unwired)
            .context("mediator demo failed")?;
    }
    Ok(())
}

/// Build the mediator and colleagues around `sink` and run the client.
fn run(
    sink: Rc<dyn Sink>,
    settings: &MediatorSettings,
    triggers: &[Action],
    unwired: bool,
) -> Result<(), MediatorError> {
    let colleagues = Colleagues::new(Rc::clone(&sink));
    let mediator = ConcreteMediator::with_settings(colleagues.clone(), Rc::clone(&sink), settings.clone());
    if unwired {
        tracing::info!("skipping colleague wiring");
    } else {
        mediator.wire_colleagues();
    }
    client_code(&colleagues, triggers, sink.as_ref())
}

/// Parse `--trigger` values, falling back to the classic sequence.
fn parse_triggers(raw: &[String]) -> Result<Vec<Action>> {
    if raw.is_empty() {
        return Ok(CLASSIC_TRIGGERS.to_vec());
    }
    raw.iter()
        .map(|name| {
            name.parse::<Action>()
                .with_context(|| format!("invalid --trigger {name:?}"))
        })
        .collect()
}
