//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values.
//! Keep `STABLE_PROJECT_ID` stable across rename transitions.

pub const DISPLAY_NAME: &str = "SkywareOS";
pub const BINARY_NAME: &str = "ware";
pub const STABLE_PROJECT_ID: &str = "ware";
pub const DEFAULT_CHANNEL: &str = "testing";
pub const REPO_SLUG: &str = "skywareos/ware";

/// Default helper client for the community repository backend.
pub const DEFAULT_AUR_HELPER: &str = "yay";

/// AUR build-recipe clone URL for a package (used by the helper bootstrap).
pub fn aur_recipe_url(package: &str) -> String {
    format!("https://aur.archlinux.org/{}.git", package)
}

/// Installer script URL for a release channel.
pub fn installer_url(channel: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/install.sh",
        REPO_SLUG, channel
    )
}

/// Setup script URL for a desktop-environment target on a channel.
pub fn setup_script_url(channel: &str, target: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/setup/{}.sh",
        REPO_SLUG, channel, target
    )
}
