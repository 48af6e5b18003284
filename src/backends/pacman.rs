//! Backend A: the system repository, driven through pacman.
//!
//! All probes use the query interfaces (-Si, -Qi, -Ss) and never touch the
//! local database. Mutations escalate through sudo with --noconfirm, matching
//! the non-interactive contract of the dispatcher.

use crate::backends::{PackageBackend, parse_sync_search};
use crate::core::types::{BackendKind, SearchHit};
use crate::error::{Result, WareError};
use crate::utils::exec;

pub struct PacmanBackend;

impl PacmanBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PacmanBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageBackend for PacmanBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::System
    }

    fn is_available(&self) -> bool {
        which::which("pacman").is_ok()
    }

    fn in_repo(&self, package: &str) -> Result<bool> {
        Ok(exec::probe("pacman", &["-Si", package]))
    }

    fn is_installed(&self, package: &str) -> Result<bool> {
        Ok(exec::probe("pacman", &["-Qi", package]))
    }

    fn install(&self, package: &str) -> Result<()> {
        exec::run_privileged("pacman", &["-S", "--needed", "--noconfirm", package])
    }

    fn remove(&self, package: &str) -> Result<()> {
        exec::run_privileged("pacman", &["-Rns", "--noconfirm", package])
    }

    fn search(&self, term: &str) -> Result<Vec<SearchHit>> {
        let output = exec::capture("pacman", &["-Ss", term])?;
        // pacman -Ss exits 1 on zero matches; that is not an error.
        if !output.status.success() {
            return Ok(Vec::new());
        }
        Ok(parse_sync_search(
            &String::from_utf8_lossy(&output.stdout),
            BackendKind::System,
        ))
    }

    fn info(&self, package: &str) -> Result<Option<String>> {
        // Prefer repository metadata; fall back to the local database for
        // packages no longer in the sync repos.
        if let Some(stdout) = exec::capture_stdout("pacman", &["-Si", package])? {
            return Ok(Some(stdout));
        }
        exec::capture_stdout("pacman", &["-Qi", package])
    }

    fn list_installed(&self) -> Result<Vec<String>> {
        let output = exec::capture("pacman", &["-Qn"])?;
        if !output.status.success() {
            return Err(WareError::PackageManagerError(
                "Failed to query pacman database".into(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect())
    }

    fn upgrade(&self) -> Result<()> {
        exec::run_privileged("pacman", &["-Syu", "--noconfirm"])
    }

    fn clean(&self) -> Result<()> {
        exec::run_privileged("pacman", &["-Sc", "--noconfirm"])
    }
    fn supports_clean(&self) -> bool {
        true
    }

    fn autoremove(&self) -> Result<()> {
        let output = exec::capture("pacman", &["-Qtdq"])?;
        // -Qtdq exits non-zero when there are no orphans.
        if !output.status.success() {
            return Ok(());
        }

        let orphans: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .filter(|line| !line.is_empty())
            .collect();
        if orphans.is_empty() {
            return Ok(());
        }

        let mut args: Vec<&str> = vec!["-Rns", "--noconfirm"];
        args.extend(orphans.iter().map(String::as_str));
        exec::run_privileged("pacman", &args)
    }
    fn supports_autoremove(&self) -> bool {
        true
    }

    fn refresh(&self) -> Result<()> {
        exec::run_privileged("pacman", &["-Syy"])
    }
    fn supports_refresh(&self) -> bool {
        true
    }
}
