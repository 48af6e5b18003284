use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Helper function to initialize the command to test, isolated from the
// user's real config and state directories.
fn ware(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ware"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_STATE_HOME", home.path().join("state"))
        .env("XDG_DATA_HOME", home.path().join("data"));
    cmd
}

#[test]
fn test_help_command() {
    let home = tempfile::tempdir().unwrap();

    ware(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Unified front-end over the system repository",
        ));
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();

    let version = env!("CARGO_PKG_VERSION");
    let expected = format!("ware {}", version);

    ware(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_unknown_command_shows_usage() {
    let home = tempfile::tempdir().unwrap();

    ware(&home)
        .arg("unknown-command-xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: ware"));
}

#[test]
fn test_no_command_prints_quick_start() {
    let home = tempfile::tempdir().unwrap();

    ware(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quick start"))
        .stdout(predicate::str::contains("ware install htop"));
}

#[test]
fn test_banner_suppressed_by_json_flag() {
    let home = tempfile::tempdir().unwrap();

    ware(&home)
        .args(["--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SkywareOS").not());
}

#[test]
fn test_setup_rejects_unknown_target_before_any_work() {
    let home = tempfile::tempdir().unwrap();

    ware(&home)
        .args(["setup", "bogus-target"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setup target"))
        .stderr(predicate::str::contains("gnome"));
}

#[test]
fn test_remove_of_absent_package_is_journaled_and_exits_zero() {
    let home = tempfile::tempdir().unwrap();

    // Per-package outcomes never abort the batch; they land in the journal.
    ware(&home)
        .args(["remove", "ghost-package-zzz"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ghost-package-zzz"));

    let journal = home
        .path()
        .join("state")
        .join("ware")
        .join("journal.log");
    let content = std::fs::read_to_string(&journal).unwrap();
    assert!(content.contains("ghost-package-zzz"));
    assert!(content.contains("\"action\":\"remove\""));
}

#[test]
fn test_journal_is_append_only_across_invocations() {
    let home = tempfile::tempdir().unwrap();

    for _ in 0..2 {
        ware(&home)
            .args(["--quiet", "remove", "ghost-package-zzz"])
            .assert()
            .success();
    }

    let journal = home
        .path()
        .join("state")
        .join("ware")
        .join("journal.log");
    let content = std::fs::read_to_string(&journal).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_install_with_no_packages_and_no_input_does_nothing() {
    let home = tempfile::tempdir().unwrap();

    ware(&home)
        .arg("install")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to install."));
}

#[test]
fn test_switch_to_current_channel_short_circuits() {
    let home = tempfile::tempdir().unwrap();

    // Default channel is testing; no installer fetch happens.
    ware(&home)
        .args(["switch", "testing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already on channel 'testing'"));
}

#[test]
fn test_settings_file_is_honored() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join("config").join("ware");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        r#"{"channel": "stable"}"#,
    )
    .unwrap();

    ware(&home)
        .args(["switch", "stable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already on channel 'stable'"));
}

#[test]
fn test_completions_emit_script() {
    let home = tempfile::tempdir().unwrap();

    ware(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ware"));
}

#[test]
fn test_dm_list_names_known_display_managers() {
    let home = tempfile::tempdir().unwrap();

    ware(&home)
        .args(["dm", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sddm"))
        .stdout(predicate::str::contains("greetd"));
}

#[test]
fn test_dm_switch_rejects_unknown_manager() {
    let home = tempfile::tempdir().unwrap();

    ware(&home)
        .args(["dm", "switch", "notadm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown display manager"));
}
