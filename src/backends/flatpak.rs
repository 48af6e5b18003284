//! Backend B: sandboxed universal applications via flatpak.
//!
//! Users address applications by plain name ("spotify"), flatpak by reverse-
//! DNS ref ("com.spotify.Client"). Probes therefore search and apply an exact
//! match on the display name or the ref's last segment, case-insensitively.
//! Substring hits are deliberately rejected so near-name matches cannot pull
//! in the wrong application.

use crate::backends::PackageBackend;
use crate::core::types::{BackendKind, SearchHit};
use crate::error::{Result, WareError};
use crate::ui::progress;
use crate::utils::exec;

pub struct FlatpakBackend;

impl FlatpakBackend {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a user-facing name to an application ref plus the remote that
    /// offers it. Read-only.
    fn resolve_remote_ref(&self, package: &str) -> Result<Option<(String, String)>> {
        let output = progress::capture_with_spinner(
            "flatpak",
            &["search", "--columns=name,application,remotes", package],
            &format!("Searching flatpak remotes for {}", package),
        )?;
        if !output.status.success() {
            return Ok(None);
        }

        Ok(match_remote_application(
            &String::from_utf8_lossy(&output.stdout),
            package,
        ))
    }

    /// Resolve a user-facing name against the installed application list.
    fn resolve_installed_ref(&self, package: &str) -> Result<Option<String>> {
        let output = exec::capture("flatpak", &["list", "--app", "--columns=name,application"])?;
        if !output.status.success() {
            return Ok(None);
        }

        Ok(match_application(
            &String::from_utf8_lossy(&output.stdout),
            package,
        ))
    }
}

impl Default for FlatpakBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Exact-match predicate: the display name or the application ID's last
/// segment must equal the query, ignoring case.
fn row_matches(name: &str, app_id: &str, query: &str) -> bool {
    let last_segment = app_id.rsplit('.').next().unwrap_or(app_id);
    name.eq_ignore_ascii_case(query) || last_segment.eq_ignore_ascii_case(query)
}

/// Exact-match lookup over "name\tapplication" rows.
pub(crate) fn match_application(rows: &str, query: &str) -> Option<String> {
    for line in rows.lines() {
        let mut cols = line.split('\t');
        let name = cols.next()?.trim();
        let Some(app_id) = cols.next().map(str::trim) else {
            continue;
        };

        if row_matches(name, app_id, query) {
            return Some(app_id.to_string());
        }
    }
    None
}

/// Exact-match lookup over "name\tapplication\tremotes" rows, yielding the
/// ref together with the first remote that offers it.
pub(crate) fn match_remote_application(rows: &str, query: &str) -> Option<(String, String)> {
    for line in rows.lines() {
        let mut cols = line.split('\t');
        let name = cols.next()?.trim();
        let Some(app_id) = cols.next().map(str::trim) else {
            continue;
        };
        let Some(remotes) = cols.next().map(str::trim) else {
            continue;
        };

        if row_matches(name, app_id, query) {
            let remote = remotes.split(',').next().unwrap_or(remotes).trim();
            if remote.is_empty() {
                continue;
            }
            return Some((app_id.to_string(), remote.to_string()));
        }
    }
    None
}

impl PackageBackend for FlatpakBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Universal
    }

    fn is_available(&self) -> bool {
        which::which("flatpak").is_ok()
    }

    fn in_repo(&self, package: &str) -> Result<bool> {
        Ok(self.resolve_remote_ref(package)?.is_some())
    }

    fn is_installed(&self, package: &str) -> Result<bool> {
        Ok(self.resolve_installed_ref(package)?.is_some())
    }

    fn install(&self, package: &str) -> Result<()> {
        let (app_ref, remote) = self.resolve_remote_ref(package)?.ok_or_else(|| {
            WareError::PackageNotFound(format!("{} (no exact flatpak match)", package))
        })?;
        exec::run_inherited(
            "flatpak",
            &["install", "-y", "--noninteractive", &remote, &app_ref],
        )
    }

    fn remove(&self, package: &str) -> Result<()> {
        let app_ref = self
            .resolve_installed_ref(package)?
            .ok_or_else(|| WareError::PackageNotFound(format!("{} (not installed)", package)))?;
        exec::run_inherited("flatpak", &["uninstall", "-y", &app_ref])
    }

    fn search(&self, term: &str) -> Result<Vec<SearchHit>> {
        let output = progress::capture_with_spinner(
            "flatpak",
            &[
                "search",
                "--columns=name,application,version,description",
                term,
            ],
            "Searching flatpak remotes",
        )?;
        if !output.status.success() {
            return Ok(Vec::new());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut hits = Vec::new();
        for line in stdout.lines() {
            let cols: Vec<&str> = line.split('\t').collect();
            if cols.len() < 2 {
                continue;
            }
            hits.push(SearchHit {
                name: cols[1].trim().to_string(),
                version: cols.get(2).map(|v| v.trim().to_string()),
                description: cols.get(3).map(|d| d.trim().to_string()),
                backend: BackendKind::Universal,
            });
        }
        Ok(hits)
    }

    fn info(&self, package: &str) -> Result<Option<String>> {
        let resolved = match self.resolve_installed_ref(package)? {
            Some(app_ref) => Some(app_ref),
            None => self.resolve_remote_ref(package)?.map(|(app_ref, _)| app_ref),
        };
        let Some(app_ref) = resolved else {
            return Ok(None);
        };
        exec::capture_stdout("flatpak", &["info", &app_ref])
    }

    fn list_installed(&self) -> Result<Vec<String>> {
        let output = exec::capture("flatpak", &["list", "--app", "--columns=application"])?;
        if !output.status.success() {
            return Err(WareError::PackageManagerError(
                "Failed to list flatpak applications".into(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn upgrade(&self) -> Result<()> {
        exec::run_inherited("flatpak", &["update", "-y"])
    }

    fn autoremove(&self) -> Result<()> {
        exec::run_inherited("flatpak", &["uninstall", "--unused", "-y"])
    }
    fn supports_autoremove(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_name_match_is_case_insensitive() {
        let rows = "Spotify\tcom.spotify.Client\nSpot On\tio.example.SpotOn\n";
        assert_eq!(
            match_application(rows, "spotify").as_deref(),
            Some("com.spotify.Client")
        );
        assert_eq!(
            match_application(rows, "SPOTIFY").as_deref(),
            Some("com.spotify.Client")
        );
    }

    #[test]
    fn app_id_last_segment_matches() {
        let rows = "Resonance\tio.github.db_mobile.resonance\n";
        assert_eq!(
            match_application(rows, "resonance").as_deref(),
            Some("io.github.db_mobile.resonance")
        );
    }

    #[test]
    fn substring_matches_are_rejected() {
        let rows = "Spotify\tcom.spotify.Client\n";
        assert!(match_application(rows, "spot").is_none());
        assert!(match_application(rows, "spotify-client").is_none());
    }

    #[test]
    fn install_ref_carries_the_owning_remote() {
        let rows = "Obsidian\tmd.obsidian.Obsidian\tfedora\n";
        assert_eq!(
            match_remote_application(rows, "obsidian"),
            Some(("md.obsidian.Obsidian".to_string(), "fedora".to_string()))
        );
    }

    #[test]
    fn first_listed_remote_wins() {
        let rows = "Spotify\tcom.spotify.Client\tflathub,fedora\n";
        assert_eq!(
            match_remote_application(rows, "spotify"),
            Some(("com.spotify.Client".to_string(), "flathub".to_string()))
        );
    }

    #[test]
    fn rows_without_a_remote_column_are_skipped() {
        let rows = "Spotify\tcom.spotify.Client\n";
        assert!(match_remote_application(rows, "spotify").is_none());
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let rows = "no-tab-here\nGood\torg.good.Good\n";
        assert_eq!(
            match_application(rows, "good").as_deref(),
            Some("org.good.Good")
        );
    }
}
