//! Subprocess helpers.
//!
//! All backend interaction goes through these wrappers so the dispatcher
//! never touches `std::process` directly. Probes capture output; mutating
//! actions inherit the terminal so the underlying tool can stream progress.

use crate::error::{Result, WareError};
use std::process::{Command, Output, Stdio};

/// Run a command and capture its output. A spawn failure (binary missing,
/// permission) is a `SystemCommandFailed`; a non-zero exit is NOT an error
/// here, callers inspect `output.status` themselves.
pub fn capture(program: &str, args: &[&str]) -> Result<Output> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| WareError::SystemCommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            reason: e.to_string(),
        })
}

/// Read-only existence probe: true only on a zero exit. A spawn failure
/// counts as "not here" rather than an error, matching how the backends
/// behave when their tool is absent.
pub fn probe(program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run a mutating command with inherited stdio so the backend's own
/// progress output reaches the user. Non-zero exit is an error.
pub fn run_inherited(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| WareError::SystemCommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(WareError::PackageManagerError(format!(
            "{} exited with {}",
            program, status
        )));
    }
    Ok(())
}

/// Same as [`run_inherited`] but escalates through sudo.
pub fn run_privileged(program: &str, args: &[&str]) -> Result<()> {
    let mut full: Vec<&str> = vec![program];
    full.extend_from_slice(args);
    run_inherited("sudo", &full)
}

/// Capture stdout as a lossy string, or None on non-zero exit.
pub fn capture_stdout(program: &str, args: &[&str]) -> Result<Option<String>> {
    let output = capture(program, args)?;
    if !output.status.success() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
}
