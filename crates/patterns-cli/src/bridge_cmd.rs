//! `patterns bridge` command: run the bridge walkthrough or a single pairing.

use anyhow::{Context, Result};

use patterns_core::bridge::{self, AbstractionKind, ImplementorRegistry};
use patterns_core::output::StdoutSink;

/// Run the bridge command.
///
/// With neither flag set, runs the classic walkthrough. Otherwise builds one
/// abstraction (default `base`) around one implementor (default `a`).
pub fn run_bridge(abstraction: Option<&str>, implementor: Option<&str>) -> Result<()> {
    if abstraction.is_none() && implementor.is_none() {
        bridge::run_demo(&StdoutSink);
        return Ok(());
    }

    let kind: AbstractionKind = abstraction
        .unwrap_or("base")
        .parse()
        .context("invalid --abstraction")?;
    let name = implementor.unwrap_or("a").to_ascii_lowercase();

    let registry = ImplementorRegistry::with_defaults();
    let built = registry
        .build(kind, &name)
        .context("invalid --implementor")?;

    bridge::client_code(built.as_ref(), &StdoutSink);
    Ok(())
}
