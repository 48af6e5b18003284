//! Self-update commands: upgrade and switch.
//!
//! Both re-fetch the latest installer for a channel and run it, replacing
//! the running tool. `switch` additionally persists the new channel so
//! subsequent invocations follow it.

use crate::config::{Context, Settings};
use crate::error::{Result, WareError};
use crate::project_identity;
use crate::ui;
use crate::utils::{exec, remote};
use std::io::Write;

/// Re-run the installer for the channel this installation already follows.
pub fn upgrade(ctx: &Context) -> Result<()> {
    run_installer(&ctx.channel)
}

/// Re-run the installer for another channel, then remember the choice.
pub fn switch(ctx: &Context, channel: Option<&str>) -> Result<()> {
    let channel = match channel {
        Some(c) => c.to_string(),
        None => ui::prompt_line("Target channel (e.g. stable)")
            .ok_or_else(|| WareError::Other("a target channel is required".to_string()))?,
    };

    if channel == ctx.channel {
        ui::info(&format!("Already on channel '{}'", channel));
        return Ok(());
    }

    run_installer(&channel)?;

    let mut settings = Settings::load()?;
    settings.channel = channel.clone();
    settings.save()?;
    ui::success(&format!("Now following channel '{}'", channel));
    Ok(())
}

fn run_installer(channel: &str) -> Result<()> {
    let url = project_identity::installer_url(channel);
    ui::info(&format!("Fetching installer for channel '{}'", channel));

    let script = remote::fetch_text(&url)?;
    crate::commands::setup::verify_script("installer", &script)?;

    let mut file = tempfile::Builder::new()
        .prefix("ware-installer-")
        .suffix(".sh")
        .tempfile()?;
    file.write_all(script.as_bytes())?;

    ui::info("Running installer (this replaces the current tool)");
    exec::run_inherited("bash", &[&file.path().to_string_lossy()])
}
