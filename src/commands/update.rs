//! Update command
//!
//! Delegates to each backend's own upgrade routine in priority order.
//! A failing backend is reported and the rest still run.

use crate::backends;
use crate::config::Context;
use crate::error::{Result, WareError};
use crate::ui;

pub fn run(ctx: &Context) -> Result<()> {
    let chain = backends::default_chain(ctx);
    let mut attempted = 0usize;
    let mut updated = 0usize;

    for backend in &chain {
        let tool = backend.kind().tool_name();
        if !backend.is_available() {
            ui::verbose(&format!("Skipping {}: not available", tool));
            continue;
        }
        attempted += 1;

        ui::info(&format!("Updating {}...", tool));
        match backend.upgrade() {
            Ok(()) => updated += 1,
            Err(e) => ui::warning(&format!("{} update failed: {}", tool, e)),
        }
    }

    if attempted == 0 {
        return Err(WareError::BackendUnavailable(
            "no package backend found on this system".to_string(),
        ));
    }

    if updated > 0 {
        ui::success(&format!("Updated {} backend(s)", updated));
    } else {
        ui::warning("No backend could be updated");
    }
    Ok(())
}
