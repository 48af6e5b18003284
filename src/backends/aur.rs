//! Backend C: the community build-recipe repository.
//!
//! Requires a helper client (yay by default). The helper is bootstrapped
//! lazily on first use: clone its build recipe, makepkg, install. The
//! bootstrap is itself a one-time nested install flow with the same
//! try/fail semantics as any other backend action.

use crate::backends::{PackageBackend, parse_sync_search};
use crate::core::types::{BackendKind, SearchHit};
use crate::error::{Result, WareError};
use crate::project_identity;
use crate::ui;
use crate::utils::exec;
use std::process::{Command, Stdio};

pub struct AurBackend {
    helper: String,
}

impl AurBackend {
    pub fn new(helper: String) -> Self {
        Self { helper }
    }

    fn helper_installed(&self) -> bool {
        which::which(&self.helper).is_ok()
    }

    /// Build and install the helper client from its recipe. One-time flow;
    /// any failure is a BootstrapFailure and the dispatcher moves on.
    fn bootstrap_helper(&self) -> Result<()> {
        for tool in ["git", "makepkg"] {
            if which::which(tool).is_err() {
                return Err(WareError::BootstrapFailure(format!(
                    "'{}' is required to build {} (install base-devel and git)",
                    tool, self.helper
                )));
            }
        }

        ui::info(&format!(
            "Community helper '{}' not found, bootstrapping it now",
            self.helper
        ));

        let build_dir = tempfile::tempdir()
            .map_err(|e| WareError::BootstrapFailure(format!("temp dir: {}", e)))?;
        let recipe_url = project_identity::aur_recipe_url(&self.helper);
        let clone_path = build_dir.path().join(&self.helper);

        exec::run_inherited(
            "git",
            &[
                "clone",
                "--depth=1",
                &recipe_url,
                &clone_path.to_string_lossy(),
            ],
        )
        .map_err(|e| WareError::BootstrapFailure(format!("clone {}: {}", recipe_url, e)))?;

        let status = Command::new("makepkg")
            .args(["-si", "--noconfirm"])
            .current_dir(&clone_path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| WareError::BootstrapFailure(format!("makepkg: {}", e)))?;

        if !status.success() {
            return Err(WareError::BootstrapFailure(format!(
                "makepkg exited with {}",
                status
            )));
        }

        ui::success(&format!("Installed community helper: {}", self.helper));
        Ok(())
    }
}

impl PackageBackend for AurBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Community
    }

    fn is_available(&self) -> bool {
        // Usable if the helper exists, or if we could bootstrap it.
        self.helper_installed()
            || (which::which("git").is_ok() && which::which("makepkg").is_ok())
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.helper_installed() {
            return Ok(());
        }
        self.bootstrap_helper()
    }

    fn in_repo(&self, package: &str) -> Result<bool> {
        if !self.helper_installed() {
            // Probing must not trigger the bootstrap; fall back to the AUR
            // RPC-free answer "unknown here" and let ensure_ready() handle
            // installation when a mutating action actually lands on us.
            return Ok(false);
        }
        Ok(exec::probe(&self.helper, &["-Si", package]))
    }

    fn is_installed(&self, package: &str) -> Result<bool> {
        // pacman tracks AUR-built packages too; -Qm restricts to foreign ones.
        Ok(exec::probe("pacman", &["-Qm", package]))
    }

    fn install(&self, package: &str) -> Result<()> {
        exec::run_inherited(
            &self.helper,
            &["-S", "--needed", "--noconfirm", package],
        )
    }

    fn remove(&self, package: &str) -> Result<()> {
        exec::run_privileged("pacman", &["-Rns", "--noconfirm", package])
    }

    fn search(&self, term: &str) -> Result<Vec<SearchHit>> {
        if !self.helper_installed() {
            return Ok(Vec::new());
        }
        let output = exec::capture(&self.helper, &["-Ss", "--aur", term])?;
        if !output.status.success() {
            return Ok(Vec::new());
        }
        Ok(parse_sync_search(
            &String::from_utf8_lossy(&output.stdout),
            BackendKind::Community,
        ))
    }

    fn info(&self, package: &str) -> Result<Option<String>> {
        if !self.helper_installed() {
            return Ok(None);
        }
        exec::capture_stdout(&self.helper, &["-Si", "--aur", package])
    }

    fn list_installed(&self) -> Result<Vec<String>> {
        let output = exec::capture("pacman", &["-Qm"])?;
        if !output.status.success() {
            // No foreign packages installed yields a non-zero exit.
            return Ok(Vec::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect())
    }

    fn upgrade(&self) -> Result<()> {
        if !self.helper_installed() {
            ui::verbose("Community helper not installed, skipping AUR upgrade");
            return Ok(());
        }
        exec::run_inherited(&self.helper, &["-Sua", "--noconfirm"])
    }

    fn clean(&self) -> Result<()> {
        if !self.helper_installed() {
            return Ok(());
        }
        exec::run_inherited(&self.helper, &["-Sc", "--noconfirm"])
    }
    fn supports_clean(&self) -> bool {
        self.helper_installed()
    }
}
