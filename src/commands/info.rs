//! Info command
//!
//! Detail text from the first backend that knows the package, walking the
//! chain in priority order. The lookup is journaled like any other dispatch.

use crate::backends;
use crate::config::Context;
use crate::core::resolver;
use crate::core::types::{Action, Outcome, PackageRequest};
use crate::error::Result;
use crate::journal;
use crate::ui;

pub fn run(ctx: &Context, package: &str) -> Result<()> {
    let chain = backends::default_chain(ctx);
    let request = PackageRequest::new(package, Action::Info);
    let entry = resolver::resolve_and_act(&request, &chain, ctx);

    if let Err(e) = journal::append(&ctx.journal_path, &entry) {
        ui::warning(&format!("Could not write journal: {}", e));
    }

    match entry.outcome {
        Outcome::Success => {
            println!("{}", entry.message.trim_end());
            Ok(())
        }
        _ => {
            ui::warning(&entry.message);
            Ok(())
        }
    }
}
