//! Package resolution dispatcher.
//!
//! Walks the backend chain in fixed priority order: system, universal,
//! community. The first backend whose read-only probe reports the package
//! performs the action; every other backend is left untouched. A failing
//! backend (non-zero exit, bootstrap failure) is recorded and the chain
//! continues; only exhausting all backends yields NotFound/Error.

use crate::backends::PackageBackend;
use crate::config::Context;
use crate::core::types::{Action, BackendResult, LogEntry, Outcome, PackageRequest};
use crate::error::{Result, WareError};
use crate::journal;
use crate::ui;

/// Resolve a single request against the chain and perform the action.
/// Never returns an error for "not found"; the outcome is in the entry.
pub fn resolve_and_act(
    request: &PackageRequest,
    backends: &[Box<dyn PackageBackend>],
    _ctx: &Context,
) -> LogEntry {
    let mut probes: Vec<BackendResult> = Vec::new();

    for backend in backends {
        let kind = backend.kind();

        if !backend.is_available() {
            probes.push(BackendResult {
                backend: kind,
                outcome: Outcome::Error,
                message: format!("{} unavailable", kind.tool_name()),
            });
            continue;
        }

        // The community backend installs its helper client here, before its
        // probe can answer. Only an install may trigger that nested
        // bootstrap; read-only intents must not mutate anything, and removal
        // goes through the base package manager without the helper.
        if request.action.needs_backend_ready()
            && let Err(e) = backend.ensure_ready()
        {
            ui::warning(&format!("{}: {}", kind.tool_name(), e));
            probes.push(BackendResult {
                backend: kind,
                outcome: Outcome::Error,
                message: e.to_string(),
            });
            continue;
        }

        let found = match probe(request, backend.as_ref()) {
            Ok(found) => found,
            Err(e) => {
                ui::warning(&format!("{} probe failed: {}", kind.tool_name(), e));
                probes.push(BackendResult {
                    backend: kind,
                    outcome: Outcome::Error,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if !found {
            probes.push(BackendResult {
                backend: kind,
                outcome: Outcome::NotFound,
                message: String::new(),
            });
            continue;
        }

        // First backend that knows the package performs the action. The
        // remaining probes are discarded.
        return match act(request, backend.as_ref()) {
            Ok(message) => LogEntry::new(
                request.action,
                &request.name,
                Some(kind),
                Outcome::Success,
                message,
            ),
            Err(e) => {
                ui::warning(&format!("{}: {}", kind.tool_name(), e));
                // The acting backend failed; resolution continues down the
                // chain rather than aborting.
                let mut rest = probes;
                rest.push(BackendResult {
                    backend: kind,
                    outcome: Outcome::Error,
                    message: e.to_string(),
                });
                resolve_tail(request, backends, rest)
            }
        };
    }

    terminal_entry(request, &probes)
}

/// Continue resolution against the backends after a mid-chain action
/// failure. `seen` holds results for backends already consumed.
fn resolve_tail(
    request: &PackageRequest,
    backends: &[Box<dyn PackageBackend>],
    mut seen: Vec<BackendResult>,
) -> LogEntry {
    let remaining: Vec<_> = backends
        .iter()
        .skip(seen.len())
        .collect();

    for backend in remaining {
        let kind = backend.kind();

        if !backend.is_available() {
            seen.push(BackendResult {
                backend: kind,
                outcome: Outcome::Error,
                message: format!("{} unavailable", kind.tool_name()),
            });
            continue;
        }

        if request.action.needs_backend_ready()
            && let Err(e) = backend.ensure_ready()
        {
            seen.push(BackendResult {
                backend: kind,
                outcome: Outcome::Error,
                message: e.to_string(),
            });
            continue;
        }

        match probe(request, backend.as_ref()) {
            Ok(true) => match act(request, backend.as_ref()) {
                Ok(message) => {
                    return LogEntry::new(
                        request.action,
                        &request.name,
                        Some(kind),
                        Outcome::Success,
                        message,
                    );
                }
                Err(e) => seen.push(BackendResult {
                    backend: kind,
                    outcome: Outcome::Error,
                    message: e.to_string(),
                }),
            },
            Ok(false) => seen.push(BackendResult {
                backend: kind,
                outcome: Outcome::NotFound,
                message: String::new(),
            }),
            Err(e) => seen.push(BackendResult {
                backend: kind,
                outcome: Outcome::Error,
                message: e.to_string(),
            }),
        }
    }

    terminal_entry(request, &seen)
}

/// Read-only existence check, matched to the intent: install-like intents ask
/// "is it available", removal asks "is it installed".
fn probe(request: &PackageRequest, backend: &dyn PackageBackend) -> Result<bool> {
    match request.action {
        Action::Remove => backend.is_installed(&request.name),
        Action::Install | Action::Search => backend.in_repo(&request.name),
        Action::Info => Ok(backend.info(&request.name)?.is_some()),
    }
}

fn act(request: &PackageRequest, backend: &dyn PackageBackend) -> Result<String> {
    let tool = backend.kind().tool_name();
    match request.action {
        Action::Install => {
            backend.install(&request.name)?;
            Ok(format!("Installed via {}: {}", tool, request.name))
        }
        Action::Remove => {
            backend.remove(&request.name)?;
            Ok(format!("Removed via {}: {}", tool, request.name))
        }
        Action::Search => Ok(format!("Available via {}: {}", tool, request.name)),
        Action::Info => match backend.info(&request.name)? {
            Some(details) => Ok(details),
            None => Err(WareError::PackageNotFound(request.name.clone())),
        },
    }
}

/// All backends exhausted: summarize. NotFound when every reachable probe
/// said no; Error when at least one backend actually failed.
fn terminal_entry(request: &PackageRequest, probes: &[BackendResult]) -> LogEntry {
    let saw_error = probes.iter().any(|p| p.outcome == Outcome::Error);
    let saw_not_found = probes.iter().any(|p| p.outcome == Outcome::NotFound);

    let outcome = if saw_not_found || !saw_error {
        Outcome::NotFound
    } else {
        Outcome::Error
    };

    let message = match (outcome, request.action) {
        (Outcome::NotFound, Action::Remove) => format!("{} not installed", request.name),
        (Outcome::NotFound, _) => format!("{} not found in any backend", request.name),
        _ => format!("{}: every backend failed", request.name),
    };

    LogEntry::new(request.action, &request.name, None, outcome, message)
}

/// Batched dispatch: each package is independent; a failure or NotFound on
/// one never aborts the rest. Every terminal outcome is journaled.
pub fn resolve_batch(
    names: &[String],
    action: Action,
    backends: &[Box<dyn PackageBackend>],
    ctx: &Context,
) -> Result<Vec<LogEntry>> {
    let mut entries = Vec::with_capacity(names.len());

    for name in names {
        if ui::is_interrupted() {
            return Err(WareError::Interrupted);
        }

        let request = PackageRequest::new(name.clone(), action);
        let entry = resolve_and_act(&request, backends, ctx);

        if let Err(e) = journal::append(&ctx.journal_path, &entry) {
            ui::warning(&format!("Could not write journal: {}", e));
        }

        match entry.outcome {
            Outcome::Success => ui::success(&entry.message),
            Outcome::NotFound => ui::warning(&entry.message),
            Outcome::Error => ui::error(&entry.message),
        }

        entries.push(entry);
    }

    Ok(entries)
}

impl Action {
    /// Whether backend preparation (helper bootstrap) may run for this
    /// intent. Only installs: removal works through the base package
    /// manager, and read-only intents must not mutate anything.
    pub fn needs_backend_ready(&self) -> bool {
        matches!(self, Action::Install)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::BackendKind;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    type CallLog = Rc<RefCell<Vec<String>>>;

    /// Scripted backend that records every invocation in a shared log.
    struct MockBackend {
        kind: BackendKind,
        available: bool,
        repo: HashSet<String>,
        installed: HashSet<String>,
        fail_action: bool,
        calls: CallLog,
    }

    impl MockBackend {
        fn new(kind: BackendKind) -> Self {
            Self {
                kind,
                available: true,
                repo: HashSet::new(),
                installed: HashSet::new(),
                fail_action: false,
                calls: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn with_repo(mut self, packages: &[&str]) -> Self {
            self.repo = packages.iter().map(|s| s.to_string()).collect();
            self
        }

        fn with_installed(mut self, packages: &[&str]) -> Self {
            self.installed = packages.iter().map(|s| s.to_string()).collect();
            self
        }

        fn failing(mut self) -> Self {
            self.fail_action = true;
            self
        }

        fn log(&self, call: &str) {
            self.calls.borrow_mut().push(call.to_string());
        }
    }

    impl PackageBackend for MockBackend {
        fn kind(&self) -> BackendKind {
            self.kind
        }
        fn is_available(&self) -> bool {
            self.available
        }
        fn ensure_ready(&self) -> Result<()> {
            self.log("ready");
            Ok(())
        }
        fn in_repo(&self, package: &str) -> Result<bool> {
            self.log(&format!("probe:{}", package));
            Ok(self.repo.contains(package))
        }
        fn is_installed(&self, package: &str) -> Result<bool> {
            self.log(&format!("installed?:{}", package));
            Ok(self.installed.contains(package))
        }
        fn install(&self, package: &str) -> Result<()> {
            self.log(&format!("install:{}", package));
            if self.fail_action {
                return Err(WareError::PackageManagerError("exit 1".into()));
            }
            Ok(())
        }
        fn remove(&self, package: &str) -> Result<()> {
            self.log(&format!("remove:{}", package));
            if self.fail_action {
                return Err(WareError::PackageManagerError("exit 1".into()));
            }
            Ok(())
        }
        fn search(&self, _term: &str) -> Result<Vec<crate::core::types::SearchHit>> {
            Ok(Vec::new())
        }
        fn info(&self, package: &str) -> Result<Option<String>> {
            Ok(self
                .repo
                .contains(package)
                .then(|| format!("Name: {}", package)))
        }
        fn list_installed(&self) -> Result<Vec<String>> {
            Ok(self.installed.iter().cloned().collect())
        }
        fn upgrade(&self) -> Result<()> {
            Ok(())
        }
    }

    fn ctx(dir: &tempfile::TempDir) -> Context {
        Context {
            quiet: true,
            json: false,
            noconfirm: true,
            aur_helper: "yay".to_string(),
            channel: "testing".to_string(),
            journal_path: dir.path().join("journal.log"),
        }
    }

    /// Box the mocks into a chain, handing back their call logs.
    fn chain(backends: Vec<MockBackend>) -> (Vec<Box<dyn PackageBackend>>, Vec<CallLog>) {
        let logs: Vec<CallLog> = backends.iter().map(|b| Rc::clone(&b.calls)).collect();
        let boxed = backends
            .into_iter()
            .map(|b| Box::new(b) as Box<dyn PackageBackend>)
            .collect();
        (boxed, logs)
    }

    fn calls(logs: &[CallLog], idx: usize) -> Vec<String> {
        logs[idx].borrow().clone()
    }

    #[test]
    fn system_backend_wins_when_it_has_the_package() {
        let tmp = tempfile::tempdir().unwrap();
        let (backends, logs) = chain(vec![
            MockBackend::new(BackendKind::System).with_repo(&["htop"]),
            MockBackend::new(BackendKind::Universal).with_repo(&["htop"]),
            MockBackend::new(BackendKind::Community).with_repo(&["htop"]),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("htop", Action::Install),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.outcome, Outcome::Success);
        assert_eq!(entry.backend, Some(BackendKind::System));
        assert_eq!(entry.message, "Installed via pacman: htop");
        // Lower-priority backends were never touched.
        assert!(calls(&logs, 1).is_empty());
        assert!(calls(&logs, 2).is_empty());
    }

    #[test]
    fn universal_only_package_never_invokes_system_mutation() {
        let tmp = tempfile::tempdir().unwrap();
        let (backends, logs) = chain(vec![
            MockBackend::new(BackendKind::System),
            MockBackend::new(BackendKind::Universal).with_repo(&["spotify"]),
            MockBackend::new(BackendKind::Community),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("spotify", Action::Install),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.outcome, Outcome::Success);
        assert_eq!(entry.backend, Some(BackendKind::Universal));
        // System backend saw only preparation and its read-only probe.
        assert_eq!(calls(&logs, 0), vec!["ready", "probe:spotify"]);
        assert_eq!(
            calls(&logs, 1),
            vec!["ready", "probe:spotify", "install:spotify"]
        );
    }

    #[test]
    fn absent_package_reports_not_found_and_mutates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let (backends, logs) = chain(vec![
            MockBackend::new(BackendKind::System),
            MockBackend::new(BackendKind::Universal),
            MockBackend::new(BackendKind::Community),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("ghost-package", Action::Install),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.outcome, Outcome::NotFound);
        assert_eq!(entry.backend, None);
        assert_eq!(entry.message, "ghost-package not found in any backend");
        for i in 0..3 {
            let seen = calls(&logs, i);
            assert!(
                seen.iter()
                    .all(|c| c.starts_with("probe:") || c == "ready"),
                "{:?}",
                seen
            );
        }
    }

    #[test]
    fn remove_never_triggers_backend_preparation() {
        let tmp = tempfile::tempdir().unwrap();
        let (backends, logs) = chain(vec![
            MockBackend::new(BackendKind::System),
            MockBackend::new(BackendKind::Universal),
            MockBackend::new(BackendKind::Community).with_installed(&["yay-built"]),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("yay-built", Action::Remove),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.outcome, Outcome::Success);
        for i in 0..3 {
            assert!(!calls(&logs, i).iter().any(|c| c == "ready"));
        }
    }

    #[test]
    fn remove_of_uninstalled_package_says_not_installed() {
        let tmp = tempfile::tempdir().unwrap();
        let (backends, logs) = chain(vec![
            MockBackend::new(BackendKind::System),
            MockBackend::new(BackendKind::Universal),
            MockBackend::new(BackendKind::Community),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("ghost-package", Action::Remove),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.outcome, Outcome::NotFound);
        assert_eq!(entry.message, "ghost-package not installed");
        for i in 0..3 {
            assert!(calls(&logs, i).iter().all(|c| c.starts_with("installed?:")));
        }
    }

    #[test]
    fn remove_probes_installed_state_not_repo_availability() {
        let tmp = tempfile::tempdir().unwrap();
        // Available in the system repo but installed only via universal.
        let (backends, logs) = chain(vec![
            MockBackend::new(BackendKind::System).with_repo(&["spotify"]),
            MockBackend::new(BackendKind::Universal)
                .with_repo(&["spotify"])
                .with_installed(&["spotify"]),
            MockBackend::new(BackendKind::Community),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("spotify", Action::Remove),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.outcome, Outcome::Success);
        assert_eq!(entry.backend, Some(BackendKind::Universal));
        assert_eq!(entry.message, "Removed via flatpak: spotify");
        assert_eq!(calls(&logs, 0), vec!["installed?:spotify"]);
    }

    #[test]
    fn failing_backend_falls_through_to_next() {
        let tmp = tempfile::tempdir().unwrap();
        let (backends, _logs) = chain(vec![
            MockBackend::new(BackendKind::System).with_repo(&["htop"]).failing(),
            MockBackend::new(BackendKind::Universal).with_repo(&["htop"]),
            MockBackend::new(BackendKind::Community),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("htop", Action::Install),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.outcome, Outcome::Success);
        assert_eq!(entry.backend, Some(BackendKind::Universal));
    }

    #[test]
    fn all_backends_failing_yields_error_outcome() {
        let tmp = tempfile::tempdir().unwrap();
        let (backends, _logs) = chain(vec![
            MockBackend::new(BackendKind::System).with_repo(&["htop"]).failing(),
            MockBackend::new(BackendKind::Universal).with_repo(&["htop"]).failing(),
            MockBackend::new(BackendKind::Community).with_repo(&["htop"]).failing(),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("htop", Action::Install),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.outcome, Outcome::Error);
        assert_eq!(entry.backend, None);
        assert_eq!(entry.message, "htop: every backend failed");
    }

    #[test]
    fn error_summary_never_claims_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let (backends, _logs) = chain(vec![
            MockBackend::new(BackendKind::System)
                .with_installed(&["htop"])
                .failing(),
            MockBackend::new(BackendKind::Universal)
                .with_installed(&["htop"])
                .failing(),
            MockBackend::new(BackendKind::Community)
                .with_installed(&["htop"])
                .failing(),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("htop", Action::Remove),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.outcome, Outcome::Error);
        assert!(!entry.message.contains("not installed"));
        assert_eq!(entry.message, "htop: every backend failed");
    }

    #[test]
    fn unavailable_backends_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let mut system = MockBackend::new(BackendKind::System).with_repo(&["htop"]);
        system.available = false;
        let (backends, logs) = chain(vec![
            system,
            MockBackend::new(BackendKind::Universal).with_repo(&["htop"]),
            MockBackend::new(BackendKind::Community),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("htop", Action::Install),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.backend, Some(BackendKind::Universal));
        assert!(calls(&logs, 0).is_empty());
    }

    #[test]
    fn batch_continues_past_failures_and_journals_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let context = ctx(&tmp);
        let (backends, _logs) = chain(vec![
            MockBackend::new(BackendKind::System).with_repo(&["alpha", "gamma"]),
            MockBackend::new(BackendKind::Universal),
            MockBackend::new(BackendKind::Community),
        ]);

        let names: Vec<String> = ["alpha", "missing", "gamma"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let entries = resolve_batch(&names, Action::Install, &backends, &context).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].outcome, Outcome::Success);
        assert_eq!(entries[1].outcome, Outcome::NotFound);
        assert_eq!(entries[2].outcome, Outcome::Success);

        let journaled = crate::journal::read_entries(&context.journal_path).unwrap();
        assert_eq!(journaled.len(), 3);
        assert_eq!(journaled[1].package, "missing");
    }

    #[test]
    fn info_resolves_through_first_knowing_backend() {
        let tmp = tempfile::tempdir().unwrap();
        let (backends, _logs) = chain(vec![
            MockBackend::new(BackendKind::System),
            MockBackend::new(BackendKind::Universal).with_repo(&["spotify"]),
            MockBackend::new(BackendKind::Community),
        ]);

        let entry = resolve_and_act(
            &PackageRequest::new("spotify", Action::Info),
            &backends,
            &ctx(&tmp),
        );

        assert_eq!(entry.outcome, Outcome::Success);
        assert_eq!(entry.backend, Some(BackendKind::Universal));
        assert!(entry.message.contains("Name: spotify"));
    }
}
