//! Display manager command
//!
//! Only one display manager may be enabled at a time; a switch disables
//! every other known one before enabling the target. The switch plan is
//! computed as data first so the ordering invariant is testable.

use crate::cli::args::DmCommand;
use crate::config::Context;
use crate::error::{Result, WareError};
use crate::ui;
use crate::utils::service;
use colored::Colorize;

/// Display managers this layer knows how to manage.
pub const KNOWN_DMS: &[&str] = &["sddm", "gdm", "lightdm", "ly", "lxdm", "greetd"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchStep {
    Disable(String),
    Enable(String),
}

/// Compute the switch plan: every other known display manager is disabled
/// before the target is enabled.
pub fn plan_switch(target: &str) -> std::result::Result<Vec<SwitchStep>, String> {
    if !KNOWN_DMS.contains(&target) {
        return Err(format!(
            "unknown display manager '{}' (known: {})",
            target,
            KNOWN_DMS.join(", ")
        ));
    }

    let mut steps: Vec<SwitchStep> = KNOWN_DMS
        .iter()
        .filter(|dm| **dm != target)
        .map(|dm| SwitchStep::Disable(dm.to_string()))
        .collect();
    steps.push(SwitchStep::Enable(target.to_string()));
    Ok(steps)
}

pub fn run(ctx: &Context, command: &DmCommand) -> Result<()> {
    match command {
        DmCommand::List => list(),
        DmCommand::Status => status(),
        DmCommand::Switch { name } => switch(ctx, name),
    }
}

fn list() -> Result<()> {
    for dm in KNOWN_DMS {
        let marker = if service::unit_exists(dm) {
            "installed".green().to_string()
        } else {
            "not installed".dimmed().to_string()
        };
        ui::keyval(dm, &marker);
    }
    Ok(())
}

fn status() -> Result<()> {
    let mut any = false;
    for dm in KNOWN_DMS {
        if !service::unit_exists(dm) {
            continue;
        }
        any = true;
        let active = if service::is_active(dm) {
            "active".green().to_string()
        } else {
            "inactive".dimmed().to_string()
        };
        let enabled = if service::is_enabled(dm) {
            "enabled".green().to_string()
        } else {
            "disabled".dimmed().to_string()
        };
        ui::keyval(dm, &format!("{}, {}", active, enabled));
    }
    if !any {
        ui::warning("No known display manager is installed");
    }
    Ok(())
}

fn switch(ctx: &Context, name: &str) -> Result<()> {
    let steps = plan_switch(name).map_err(WareError::Other)?;

    if !service::unit_exists(name) {
        return Err(WareError::Other(format!(
            "display manager '{}' is not installed",
            name
        )));
    }

    if !ctx.noconfirm
        && !ui::prompt_yes_no(
            &format!("Disable all other display managers and enable {}?", name),
            false,
        )
    {
        ui::info("Aborted.");
        return Ok(());
    }

    for step in steps {
        match step {
            SwitchStep::Disable(dm) => {
                if service::unit_exists(&dm) && service::is_enabled(&dm) {
                    ui::info(&format!("Disabling {}", dm));
                    service::disable(&dm)?;
                }
            }
            SwitchStep::Enable(dm) => {
                ui::info(&format!("Enabling {}", dm));
                service::enable(&dm)?;
            }
        }
    }

    ui::success(&format!(
        "Switched display manager to {} (takes effect next boot)",
        name
    ));
    Ok(())
}
