//! List command
//!
//! Installed packages per backend, aggregated in chain order.

use crate::backends;
use crate::config::Context;
use crate::error::Result;
use crate::ui;

pub fn run(ctx: &Context) -> Result<()> {
    let chain = backends::default_chain(ctx);

    for backend in &chain {
        let tool = backend.kind().tool_name();
        if !backend.is_available() {
            continue;
        }

        match backend.list_installed() {
            Ok(packages) => {
                ui::header(&format!("{} ({})", tool, packages.len()));
                for name in packages {
                    ui::indent(&name, 1);
                }
            }
            Err(e) => ui::warning(&format!("{} list failed: {}", tool, e)),
        }
    }

    Ok(())
}
