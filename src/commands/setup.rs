//! Setup command
//!
//! Environment bootstrap targets go through a narrow installer-provider
//! contract (name, fetch, verify, execute) instead of inline remote script
//! execution. Providers are expected to be idempotent: running a target
//! twice must succeed even when its packages, links and services are
//! already in place.

use crate::backends;
use crate::config::Context;
use crate::core::resolver;
use crate::core::types::{Action, Outcome, PackageRequest};
use crate::error::{Result, WareError};
use crate::project_identity;
use crate::ui;
use crate::utils::{exec, remote, service};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Desktop environments served by remote setup scripts.
const SCRIPT_TARGETS: &[&str] = &["gnome", "plasma", "xfce", "hyprland"];

const SNAP_LINK: &str = "/snap";
const SNAP_LINK_TARGET: &str = "/var/lib/snapd/snap";

pub trait InstallerProvider {
    fn name(&self) -> &str;

    /// Obtain the installer payload. Read-only.
    fn fetch(&self) -> Result<String>;

    fn verify(&self, script: &str) -> Result<()> {
        verify_script(self.name(), script)
    }

    fn execute(&self, ctx: &Context, script: &str) -> Result<()>;

    fn run(&self, ctx: &Context) -> Result<()> {
        let script = self.fetch()?;
        self.verify(&script)?;
        self.execute(ctx, &script)
    }
}

/// A provider defined by a remote shell script.
struct RemoteScriptProvider {
    name: String,
    url: String,
}

impl InstallerProvider for RemoteScriptProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<String> {
        ui::info(&format!("Fetching {} setup script", self.name));
        remote::fetch_text(&self.url)
    }

    fn execute(&self, _ctx: &Context, script: &str) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .prefix("ware-setup-")
            .suffix(".sh")
            .tempfile()?;
        file.write_all(script.as_bytes())?;

        exec::run_inherited("bash", &[&file.path().to_string_lossy()])
    }
}

/// Built-in snap target: installs snapd through the dispatcher, creates the
/// classic-confinement symlink and enables the socket. Every step checks
/// state first so a second run is a no-op.
struct SnapProvider;

impl InstallerProvider for SnapProvider {
    fn name(&self) -> &str {
        "snap"
    }

    fn fetch(&self) -> Result<String> {
        // Fully built in; nothing to download.
        Ok(String::new())
    }

    fn verify(&self, _script: &str) -> Result<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, _script: &str) -> Result<()> {
        if exec::probe("pacman", &["-Qi", "snapd"]) {
            ui::info("snapd already installed");
        } else {
            let chain = backends::default_chain(ctx);
            let request = PackageRequest::new("snapd", Action::Install);
            let entry = resolver::resolve_and_act(&request, &chain, ctx);
            if entry.outcome != Outcome::Success {
                return Err(WareError::Other(format!(
                    "could not install snapd: {}",
                    entry.message
                )));
            }
        }

        let link = Path::new(SNAP_LINK);
        if snap_link_ready(link, Path::new(SNAP_LINK_TARGET)) {
            ui::info("/snap symlink already in place");
        } else if fs::symlink_metadata(link).is_ok() {
            return Err(WareError::Other(format!(
                "{} exists but is not a symlink to {}",
                SNAP_LINK, SNAP_LINK_TARGET
            )));
        } else {
            exec::run_privileged("ln", &["-s", SNAP_LINK_TARGET, SNAP_LINK])?;
        }

        if service::is_enabled("snapd.socket") {
            ui::info("snapd.socket already enabled");
        } else {
            service::enable_now("snapd.socket")?;
        }

        Ok(())
    }
}

/// Whether `link` is already a symlink pointing at `target`.
pub(crate) fn snap_link_ready(link: &Path, target: &Path) -> bool {
    match fs::symlink_metadata(link) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::read_link(link).map(|dest| dest == target).unwrap_or(false)
        }
        _ => false,
    }
}

pub(crate) fn verify_script(name: &str, script: &str) -> Result<()> {
    if script.trim().is_empty() {
        return Err(WareError::ScriptVerification(format!(
            "{}: fetched script is empty",
            name
        )));
    }
    if !script.starts_with("#!") {
        return Err(WareError::ScriptVerification(format!(
            "{}: fetched script has no shebang",
            name
        )));
    }
    Ok(())
}

fn provider_for(ctx: &Context, target: &str) -> Option<Box<dyn InstallerProvider>> {
    if target == "snap" {
        return Some(Box::new(SnapProvider));
    }
    if SCRIPT_TARGETS.contains(&target) {
        return Some(Box::new(RemoteScriptProvider {
            name: target.to_string(),
            url: project_identity::setup_script_url(&ctx.channel, target),
        }));
    }
    None
}

pub fn run(ctx: &Context, target: &str) -> Result<()> {
    let Some(provider) = provider_for(ctx, target) else {
        let mut known: Vec<&str> = SCRIPT_TARGETS.to_vec();
        known.push("snap");
        return Err(WareError::UnknownSetupTarget(format!(
            "{} (known targets: {})",
            target,
            known.join(", ")
        )));
    };

    provider.run(ctx)?;
    ui::success(&format!("Setup target '{}' finished", target));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn script_verification_rejects_empty_and_shebangless() {
        assert!(verify_script("t", "").is_err());
        assert!(verify_script("t", "   \n").is_err());
        assert!(verify_script("t", "echo hi\n").is_err());
        assert!(verify_script("t", "#!/bin/bash\necho hi\n").is_ok());
    }

    #[test]
    fn snap_link_detection() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("real");
        let link = tmp.path().join("snap");
        std::fs::create_dir(&target).unwrap();

        assert!(!snap_link_ready(&link, &target));

        symlink(&target, &link).unwrap();
        assert!(snap_link_ready(&link, &target));
        assert!(!snap_link_ready(&link, &tmp.path().join("elsewhere")));

        // A plain directory at the link path never counts as ready.
        let dir = tmp.path().join("plain");
        std::fs::create_dir(&dir).unwrap();
        assert!(!snap_link_ready(&dir, &target));
    }
}
