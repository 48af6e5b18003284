//! Doctor command
//!
//! Sequential health checks, report-only: this command never repairs
//! anything, it tells the user what to run.

use crate::config::Context;
use crate::error::Result;
use crate::ui;
use crate::utils::{exec, service, sysinfo};
use colored::Colorize;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass(String),
    Warning(String),
    Fail(String),
}

impl CheckStatus {
    pub fn message(&self) -> &str {
        match self {
            Self::Pass(msg) | Self::Warning(msg) | Self::Fail(msg) => msg,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Pass(_))
    }

    fn color_status(&self) -> impl Display {
        match self {
            Self::Pass(_) => "PASS".green(),
            Self::Warning(_) => "WARN".yellow(),
            Self::Fail(_) => "FAIL".red(),
        }
    }
}

pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub hint: Option<&'static str>,
}

pub fn run(ctx: &Context) -> Result<()> {
    let results = vec![
        system_db_check(),
        universal_check(),
        community_helper_check(ctx),
        firewall_check(),
        pending_updates_check(),
    ];

    print_results(&results);
    Ok(())
}

/// pacman database consistency (-Dk checks dependencies without touching
/// anything).
fn system_db_check() -> CheckResult {
    let status = match exec::capture("pacman", &["-Dk"]) {
        Ok(output) if output.status.success() => {
            CheckStatus::Pass("package database is consistent".to_string())
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let first = stderr.lines().next().unwrap_or("inconsistencies found");
            CheckStatus::Fail(first.to_string())
        }
        Err(_) => CheckStatus::Warning("pacman not available".to_string()),
    };
    CheckResult {
        name: "System database",
        status,
        hint: Some("run: pacman -Dk for the full report"),
    }
}

/// flatpak is installed and has at least one remote configured.
fn universal_check() -> CheckResult {
    let status = match exec::capture_stdout("flatpak", &["remotes", "--columns=name"]) {
        Ok(Some(stdout)) if stdout.lines().any(|l| !l.trim().is_empty()) => {
            CheckStatus::Pass("remotes configured".to_string())
        }
        Ok(Some(_)) | Ok(None) => {
            CheckStatus::Warning("no flatpak remotes configured".to_string())
        }
        Err(_) => CheckStatus::Warning("flatpak not available".to_string()),
    };
    CheckResult {
        name: "Universal backend",
        status,
        hint: Some("run: flatpak remote-add flathub https://dl.flathub.org/repo/flathub.flatpakrepo"),
    }
}

fn community_helper_check(ctx: &Context) -> CheckResult {
    let status = if which::which(&ctx.aur_helper).is_ok() {
        CheckStatus::Pass(format!("{} installed", ctx.aur_helper))
    } else {
        CheckStatus::Warning(format!(
            "{} not installed (bootstrapped on first community install)",
            ctx.aur_helper
        ))
    };
    CheckResult {
        name: "Community helper",
        status,
        hint: None,
    }
}

fn firewall_check() -> CheckResult {
    let status = if sysinfo::firewall_active() {
        CheckStatus::Pass("ufw is active".to_string())
    } else if service::unit_exists("ufw") {
        CheckStatus::Warning("ufw installed but inactive".to_string())
    } else {
        CheckStatus::Warning("no firewall service found".to_string())
    };
    CheckResult {
        name: "Firewall",
        status,
        hint: Some("run: sudo systemctl enable --now ufw"),
    }
}

fn pending_updates_check() -> CheckResult {
    let status = match sysinfo::pending_updates() {
        Some(0) => CheckStatus::Pass("system is up to date".to_string()),
        Some(n) => CheckStatus::Warning(format!("{} pending updates", n)),
        None => CheckStatus::Warning("could not count pending updates".to_string()),
    };
    CheckResult {
        name: "Pending updates",
        status,
        hint: Some("run: ware update"),
    }
}

fn print_results(results: &[CheckResult]) {
    println!(
        "{:<22} [{}] {}",
        "Check".bold(),
        "Status".bold(),
        "Message".bold()
    );

    for result in results {
        println!(
            "{:<22} [{}] {}",
            result.name,
            result.status.color_status(),
            result.status.message()
        );
    }

    let hints: Vec<&CheckResult> = results
        .iter()
        .filter(|r| !r.status.is_success() && r.hint.is_some())
        .collect();
    if !hints.is_empty() {
        println!("\n{}", "Suggested actions (not applied):".bold().yellow());
        for result in hints {
            if let Some(hint) = result.hint {
                println!("  - {}: {}", result.name, hint);
            }
        }
    }
}
