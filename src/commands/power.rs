//! Power command
//!
//! Each named profile maps to a fixed triple: a CPU governor plus a power
//! management service to enable or disable. The plan is computed first and
//! then applied unconditionally, so a profile lands in the same state
//! regardless of what was set before.

use crate::cli::args::PowerCommand;
use crate::config::Context;
use crate::error::Result;
use crate::ui;
use crate::utils::{exec, service};
use colored::Colorize;
use std::fs;

const POWER_SERVICE: &str = "tlp";
const GOVERNOR_PATH: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOp {
    Enable,
    Disable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerPlan {
    pub governor: &'static str,
    pub service: &'static str,
    pub service_op: ServiceOp,
}

/// The fixed profile table. Pure so the mapping is testable.
pub fn plan_for(profile: &PowerCommand) -> Option<PowerPlan> {
    match profile {
        PowerCommand::Balanced => Some(PowerPlan {
            governor: "schedutil",
            service: POWER_SERVICE,
            service_op: ServiceOp::Enable,
        }),
        PowerCommand::Performance => Some(PowerPlan {
            governor: "performance",
            service: POWER_SERVICE,
            service_op: ServiceOp::Disable,
        }),
        PowerCommand::Battery => Some(PowerPlan {
            governor: "powersave",
            service: POWER_SERVICE,
            service_op: ServiceOp::Enable,
        }),
        PowerCommand::Status => None,
    }
}

pub fn run(_ctx: &Context, command: &PowerCommand) -> Result<()> {
    let Some(plan) = plan_for(command) else {
        return status();
    };

    ui::info(&format!("Setting CPU governor to {}", plan.governor));
    exec::run_privileged("cpupower", &["frequency-set", "-g", plan.governor])?;

    match plan.service_op {
        ServiceOp::Enable => {
            ui::info(&format!("Enabling {}", plan.service));
            service::enable_now(plan.service)?;
        }
        ServiceOp::Disable => {
            ui::info(&format!("Disabling {}", plan.service));
            service::disable_now(plan.service)?;
        }
    }

    ui::success("Power profile applied");
    Ok(())
}

fn status() -> Result<()> {
    let governor = fs::read_to_string(GOVERNOR_PATH)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    ui::keyval("Governor", &governor);

    let state = if service::is_active(POWER_SERVICE) {
        "active".green().to_string()
    } else {
        "inactive".red().to_string()
    };
    ui::keyval("Power service", &format!("{} ({})", POWER_SERVICE, state));
    Ok(())
}
