//! Maintenance passthroughs: clean, autoremove, sync.
//!
//! Each walks the chain and delegates to backends that support the
//! operation; unsupported backends are skipped silently.

use crate::backends;
use crate::config::Context;
use crate::error::Result;
use crate::ui;

pub fn clean(ctx: &Context) -> Result<()> {
    for backend in &backends::default_chain(ctx) {
        if !backend.is_available() || !backend.supports_clean() {
            continue;
        }
        let tool = backend.kind().tool_name();
        ui::info(&format!("Cleaning {} cache...", tool));
        if let Err(e) = backend.clean() {
            ui::warning(&format!("{} clean failed: {}", tool, e));
        }
    }
    ui::success("Cache clean finished");
    Ok(())
}

pub fn autoremove(ctx: &Context) -> Result<()> {
    for backend in &backends::default_chain(ctx) {
        if !backend.is_available() || !backend.supports_autoremove() {
            continue;
        }
        let tool = backend.kind().tool_name();
        ui::info(&format!("Removing unused packages via {}...", tool));
        if let Err(e) = backend.autoremove() {
            ui::warning(&format!("{} autoremove failed: {}", tool, e));
        }
    }
    ui::success("Autoremove finished");
    Ok(())
}

pub fn sync(ctx: &Context) -> Result<()> {
    for backend in &backends::default_chain(ctx) {
        if !backend.is_available() || !backend.supports_refresh() {
            continue;
        }
        let tool = backend.kind().tool_name();
        ui::info(&format!("Refreshing {} databases...", tool));
        if let Err(e) = backend.refresh() {
            ui::warning(&format!("{} refresh failed: {}", tool, e));
        }
    }
    ui::success("Database refresh finished");
    Ok(())
}
