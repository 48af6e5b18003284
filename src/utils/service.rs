//! systemd service helpers.
//!
//! Thin wrappers over `systemctl`. Queries never escalate; mutations go
//! through sudo like the package backends do.

use crate::error::Result;
use crate::utils::exec;

pub fn is_active(unit: &str) -> bool {
    exec::probe("systemctl", &["is-active", "--quiet", unit])
}

pub fn is_enabled(unit: &str) -> bool {
    exec::probe("systemctl", &["is-enabled", "--quiet", unit])
}

/// Whether a unit file is installed at all (as opposed to merely inactive).
pub fn unit_exists(unit: &str) -> bool {
    exec::probe("systemctl", &["cat", unit])
}

pub fn enable(unit: &str) -> Result<()> {
    exec::run_privileged("systemctl", &["enable", unit])
}

pub fn disable(unit: &str) -> Result<()> {
    exec::run_privileged("systemctl", &["disable", unit])
}

pub fn enable_now(unit: &str) -> Result<()> {
    exec::run_privileged("systemctl", &["enable", "--now", unit])
}

pub fn disable_now(unit: &str) -> Result<()> {
    exec::run_privileged("systemctl", &["disable", "--now", unit])
}
