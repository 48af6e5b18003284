//! Read-only system facts for `status` and `doctor`.
//!
//! Everything here is a query; nothing in this module mutates state.

use crate::utils::exec;
use std::fs;

pub fn kernel_version() -> String {
    fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

pub fn uptime() -> String {
    match fs::read_to_string("/proc/uptime") {
        Ok(content) => parse_uptime(&content).unwrap_or_else(|| "unknown".to_string()),
        Err(_) => "unknown".to_string(),
    }
}

pub(crate) fn parse_uptime(proc_uptime: &str) -> Option<String> {
    let secs = proc_uptime
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()? as u64;
    Some(format_duration(secs))
}

pub(crate) fn format_duration(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Memory usage as "used / total" in human units, from /proc/meminfo.
pub fn memory_usage() -> String {
    match fs::read_to_string("/proc/meminfo") {
        Ok(content) => parse_meminfo(&content).unwrap_or_else(|| "unknown".to_string()),
        Err(_) => "unknown".to_string(),
    }
}

pub(crate) fn parse_meminfo(meminfo: &str) -> Option<String> {
    let mut total_kb = None;
    let mut available_kb = None;

    for line in meminfo.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            total_kb = rest.split_whitespace().next()?.parse::<u64>().ok();
        } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
            available_kb = rest.split_whitespace().next()?.parse::<u64>().ok();
        }
    }

    let total = total_kb?;
    let available = available_kb?;
    let used = total.saturating_sub(available);
    Some(format!(
        "{:.1} GiB / {:.1} GiB",
        used as f64 / (1024.0 * 1024.0),
        total as f64 / (1024.0 * 1024.0)
    ))
}

/// Root filesystem usage, e.g. "42G / 233G (19%)".
pub fn disk_usage() -> String {
    let output = exec::capture_stdout("df", &["-h", "--output=used,size,pcent", "/"]);
    match output {
        Ok(Some(stdout)) => parse_df(&stdout).unwrap_or_else(|| "unknown".to_string()),
        _ => "unknown".to_string(),
    }
}

pub(crate) fn parse_df(df_output: &str) -> Option<String> {
    // Header line, then one data line: " used size pcent"
    let line = df_output.lines().nth(1)?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }
    Some(format!("{} / {} ({})", fields[0], fields[1], fields[2]))
}

pub fn desktop_environment() -> String {
    std::env::var("XDG_CURRENT_DESKTOP")
        .or_else(|_| std::env::var("DESKTOP_SESSION"))
        .unwrap_or_else(|_| "none".to_string())
}

pub fn firewall_active() -> bool {
    crate::utils::service::is_active("ufw")
}

/// Pending-update count via checkupdates. Exit codes per its man page:
/// 0 = updates listed, 2 = none pending, anything else = unknown.
pub fn pending_updates() -> Option<usize> {
    let output = exec::capture("checkupdates", &[]).ok()?;

    if output.status.code() == Some(2) {
        return Some(0);
    }
    if !output.status.success() {
        return None;
    }

    Some(
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.is_empty())
            .count(),
    )
}
