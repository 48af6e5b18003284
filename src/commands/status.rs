//! Status command
//!
//! Read-only snapshot of the machine: kernel, uptime, pending updates,
//! firewall, disk, memory, desktop environment, channel and tool version.

use crate::config::Context;
use crate::error::Result;
use crate::ui;
use crate::utils::sysinfo;
use colored::Colorize;

pub fn run(ctx: &Context) -> Result<()> {
    ui::keyval("Kernel", &sysinfo::kernel_version());
    ui::keyval("Uptime", &sysinfo::uptime());

    let updates = match sysinfo::pending_updates() {
        Some(0) => "up to date".green().to_string(),
        Some(n) => format!("{} pending", n).yellow().to_string(),
        None => "unknown (is pacman-contrib installed?)".dimmed().to_string(),
    };
    ui::keyval("Updates", &updates);

    let firewall = if sysinfo::firewall_active() {
        "active".green().to_string()
    } else {
        "inactive".red().to_string()
    };
    ui::keyval("Firewall", &firewall);

    ui::keyval("Disk (/)", &sysinfo::disk_usage());
    ui::keyval("Memory", &sysinfo::memory_usage());
    ui::keyval("Desktop", &sysinfo::desktop_environment());
    ui::keyval("Channel", &ctx.channel);
    ui::keyval("Version", env!("CARGO_PKG_VERSION"));

    Ok(())
}
