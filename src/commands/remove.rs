//! Remove command
//!
//! Same probe order as install, but asks "is installed" rather than
//! "is available" and uninstalls through the owning backend.

use crate::backends;
use crate::config::Context;
use crate::core::resolver;
use crate::core::types::Action;
use crate::error::Result;
use crate::ui;

pub fn run(ctx: &Context, packages: &[String]) -> Result<()> {
    let names = if packages.is_empty() {
        match ui::prompt_line("Package name") {
            Some(name) => vec![name],
            None => {
                ui::info("Nothing to remove.");
                return Ok(());
            }
        }
    } else {
        packages.to_vec()
    };

    let chain = backends::default_chain(ctx);
    resolver::resolve_batch(&names, Action::Remove, &chain, ctx)?;
    Ok(())
}
