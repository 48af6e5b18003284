//! Install command
//!
//! Batched dispatch through the fixed backend chain. With no package
//! arguments the interactive entry path prompts for a single name and
//! delegates to the same dispatcher.

use crate::backends;
use crate::config::Context;
use crate::core::resolver;
use crate::core::types::Action;
use crate::error::Result;
use crate::ui;

pub fn run(ctx: &Context, packages: &[String]) -> Result<()> {
    let names = match collect_names(packages) {
        Some(names) => names,
        None => {
            ui::info("Nothing to install.");
            return Ok(());
        }
    };

    let chain = backends::default_chain(ctx);
    resolver::resolve_batch(&names, Action::Install, &chain, ctx)?;
    Ok(())
}

fn collect_names(packages: &[String]) -> Option<Vec<String>> {
    if !packages.is_empty() {
        return Some(packages.to_vec());
    }
    ui::prompt_line("Package name").map(|name| vec![name])
}
