//! # Backend implementations
//!
//! One module per backend, each implementing the [`PackageBackend`] trait:
//!
//! - **System** (`pacman.rs`): the distribution's signed repository.
//! - **Universal** (`flatpak.rs`): sandboxed cross-distro applications.
//! - **Community** (`aur.rs`): community build recipes, helper client
//!   bootstrapped on first use.
//!
//! The dispatcher walks the chain returned by [`default_chain`] in order and
//! never reorders it. Probes (`in_repo`, `is_installed`) are read-only;
//! mutations happen through at most one backend per request.

pub mod aur;
pub mod flatpak;
pub mod pacman;

use crate::core::types::{BackendKind, SearchHit};
use crate::error::Result;

pub trait PackageBackend {
    fn kind(&self) -> BackendKind;

    /// Whether the backend's tooling is present on this system.
    fn is_available(&self) -> bool;

    /// One-time preparation before an install lands on this backend. The
    /// community backend bootstraps its helper client here; the others have
    /// nothing to do.
    fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    /// Read-only: is the package available in this backend's repository?
    fn in_repo(&self, package: &str) -> Result<bool>;

    /// Read-only: is the package currently installed through this backend?
    fn is_installed(&self, package: &str) -> Result<bool>;

    fn install(&self, package: &str) -> Result<()>;
    fn remove(&self, package: &str) -> Result<()>;

    fn search(&self, term: &str) -> Result<Vec<SearchHit>>;

    /// Detail text for a package, or None if this backend does not know it.
    fn info(&self, package: &str) -> Result<Option<String>>;

    fn list_installed(&self) -> Result<Vec<String>>;

    /// The backend's own full-upgrade routine.
    fn upgrade(&self) -> Result<()>;

    fn clean(&self) -> Result<()> {
        Ok(())
    }
    fn supports_clean(&self) -> bool {
        false
    }

    fn autoremove(&self) -> Result<()> {
        Ok(())
    }
    fn supports_autoremove(&self) -> bool {
        false
    }

    /// Refresh the backend's package index (pacman -Syy style).
    fn refresh(&self) -> Result<()> {
        Ok(())
    }
    fn supports_refresh(&self) -> bool {
        false
    }
}

/// The fixed-priority backend chain: system, then universal, then community.
pub fn default_chain(ctx: &crate::config::Context) -> Vec<Box<dyn PackageBackend>> {
    vec![
        Box::new(pacman::PacmanBackend::new()),
        Box::new(flatpak::FlatpakBackend::new()),
        Box::new(aur::AurBackend::new(ctx.aur_helper.clone())),
    ]
}

/// Parse `pacman -Ss` style output (shared with the AUR helper, whose search
/// output follows the same shape):
///
/// ```text
/// extra/htop 3.3.0-3
///     Interactive process viewer
/// ```
pub(crate) fn parse_sync_search(stdout: &str, backend: BackendKind) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    let mut lines = stdout.lines().peekable();

    while let Some(line) = lines.next() {
        if line.starts_with(char::is_whitespace) || line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let Some(repo_name) = fields.next() else {
            continue;
        };
        let name = repo_name
            .rsplit('/')
            .next()
            .unwrap_or(repo_name)
            .to_string();
        let version = fields.next().map(str::to_string);

        let description = lines
            .peek()
            .filter(|next| next.starts_with(char::is_whitespace))
            .map(|next| next.trim().to_string());
        if description.is_some() {
            lines.next();
        }

        hits.push(SearchHit {
            name,
            version,
            description,
            backend,
        });
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_search_parses_name_version_description() {
        let out = "extra/htop 3.3.0-3\n    Interactive process viewer\n\
                   community/btop 1.3.2-1 [installed]\n    Resource monitor\n";
        let hits = parse_sync_search(out, BackendKind::System);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "htop");
        assert_eq!(hits[0].version.as_deref(), Some("3.3.0-3"));
        assert_eq!(
            hits[0].description.as_deref(),
            Some("Interactive process viewer")
        );
        assert_eq!(hits[1].name, "btop");
    }

    #[test]
    fn sync_search_tolerates_missing_description() {
        let out = "extra/htop 3.3.0-3\nextra/bat 0.25.0-1\n    A cat clone\n";
        let hits = parse_sync_search(out, BackendKind::Community);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].description.is_none());
        assert_eq!(hits[1].description.as_deref(), Some("A cat clone"));
    }

    #[test]
    fn sync_search_empty_output() {
        assert!(parse_sync_search("", BackendKind::System).is_empty());
    }
}
