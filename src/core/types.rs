use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// The three backends, in fixed dispatch priority order.
// To add a backend, add a variant here and update:
// - BackendKind::display()
// - backends::default_chain()
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Backend A: the distribution's signed repository (pacman).
    System,
    /// Backend B: sandboxed cross-distro applications (flatpak).
    Universal,
    /// Backend C: community build recipes, helper bootstrapped on demand.
    Community,
}

impl BackendKind {
    /// The CLI tool name users see in messages and journal entries.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::System => "pacman",
            Self::Universal => "flatpak",
            Self::Community => "aur",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Universal => write!(f, "universal"),
            Self::Community => write!(f, "community"),
        }
    }
}

/// What the user asked the dispatcher to do with a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Install,
    Remove,
    Search,
    Info,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Remove => write!(f, "remove"),
            Self::Search => write!(f, "search"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// One CLI package argument. Immutable; lives for a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub name: String,
    pub action: Action,
}

impl PackageRequest {
    pub fn new(name: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    NotFound,
    Error,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::NotFound => write!(f, "not-found"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Result of probing or acting through a single backend.
/// The dispatcher consumes the first Success and discards the rest.
#[derive(Debug, Clone)]
pub struct BackendResult {
    pub backend: BackendKind,
    pub outcome: Outcome,
    pub message: String,
}

/// One line of the append-only journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub action: Action,
    pub package: String,
    pub backend: Option<BackendKind>,
    pub outcome: Outcome,
    pub message: String,
}

impl LogEntry {
    pub fn new(
        action: Action,
        package: &str,
        backend: Option<BackendKind>,
        outcome: Outcome,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            package: package.to_string(),
            backend,
            outcome,
            message: message.into(),
        }
    }
}

/// One hit from a backend's read-only search.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub backend: BackendKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_display_matches_journal_wording() {
        for (s, a) in [
            ("install", Action::Install),
            ("remove", Action::Remove),
            ("search", Action::Search),
            ("info", Action::Info),
        ] {
            assert_eq!(a.to_string(), s);
        }
    }

    #[test]
    fn backend_tool_names() {
        assert_eq!(BackendKind::System.tool_name(), "pacman");
        assert_eq!(BackendKind::Universal.tool_name(), "flatpak");
        assert_eq!(BackendKind::Community.tool_name(), "aur");
    }

    #[test]
    fn log_entry_serializes_lowercase() {
        let entry = LogEntry::new(
            Action::Install,
            "htop",
            Some(BackendKind::System),
            Outcome::Success,
            "Installed via pacman: htop",
        );
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"action\":\"install\""));
        assert!(json.contains("\"backend\":\"system\""));
        assert!(json.contains("\"outcome\":\"success\""));
    }
}
