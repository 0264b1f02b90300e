//! `patterns list` command: show what the demos can be built from.

use patterns_core::bridge::{AbstractionKind, ImplementorRegistry};
use patterns_core::mediator::{Action, MediatorSettings};
use patterns_core::output::{Entry, Sink, StdoutSink};

use crate::config::PatternsConfig;

/// Print implementors, abstraction kinds, actions and the active reaction
/// table.
pub fn run_list(config: &PatternsConfig) {
    StdoutSink.emit(Entry::text(render(config)));
}

fn render(config: &PatternsConfig) -> String {
    let mut out = String::new();
    let registry = ImplementorRegistry::with_defaults();

    out.push_str("Implementors:\n");
    let mut names = registry.list();
    names.sort();
    for name in names {
        if let Some(implementor) = registry.get(name) {
            let description = implementor.operation_implementation();
            out.push_str(&format!("  {name:<10}{}\n", description.trim_end()));
        }
    }

    out.push_str("Abstractions:\n");
    for kind in AbstractionKind::ALL {
        out.push_str(&format!("  {:<10}{}\n", kind.to_string(), kind.prefix().trim_end()));
    }

    out.push_str("Actions:\n");
    for action in Action::ALL {
        out.push_str(&format!("  {:<10}{}\n", action.to_string(), action.owner()));
    }

    let MediatorSettings {
        reactions,
        max_depth,
    } = &config.mediator;
    match &config.source {
        Some(path) => out.push_str(&format!(
            "Reactions (max depth {max_depth}, from {}):\n",
            path.display()
        )),
        None => out.push_str(&format!("Reactions (max depth {max_depth}, built-in):\n")),
    }
    for line in reactions.to_string().lines() {
        out.push_str(&format!("  {line}\n"));
    }
    out
}
