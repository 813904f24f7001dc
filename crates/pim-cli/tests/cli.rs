//! End-to-end tests for the pim-export binary, driven by snapshot files

use assert_cmd::Command;
use chrono::{Duration, SecondsFormat, Utc};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NOTES_SNAPSHOT: &str = r#"{
    "accounts": [
        {"name": "Personal", "folders": [
            {"name": "Recently Deleted", "notes": [{"id": "d1", "title": "Deleted"}]},
            {"name": "Work", "notes": [
                {"id": "w1", "title": "Plan", "body": "line one\nline two"},
                {"id": "w2", "title": "Retro", "modified": {"$error": "Can't get modificationDate"}}
            ]}
        ]},
        {"name": "Archive", "folders": [
            {"name": "Journal", "notes": [{"id": "j1", "title": "Old diary"}]}
        ]}
    ]
}"#;

fn iso(offset: Duration) -> String {
    (Utc::now() + offset).to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn setup(snapshot: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let snapshot_path = temp.path().join("snapshot.json");
    fs::write(&snapshot_path, snapshot).unwrap();
    let config_path = temp.path().join("config.toml");
    fs::write(&config_path, "").unwrap();
    (temp, snapshot_path, config_path)
}

fn cmd(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pim-export").unwrap();
    cmd.arg("--no-color").arg("--config").arg(config);
    cmd
}

fn block_count(text: &str) -> usize {
    text.lines().filter(|l| *l == "-----").count()
}

#[test]
fn notes_to_stdout_skips_recently_deleted() {
    let (_temp, snapshot, config) = setup(NOTES_SNAPSHOT);

    let output = cmd(&config)
        .args(["notes", "--stdout", "--snapshot"])
        .arg(&snapshot)
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(block_count(&text), 3);
    assert!(!text.contains("Deleted"));
    assert!(text.contains("BODY:\nline one\nline two\n"));
    assert!(text.contains("TITLE: Retro\nACCOUNT: Personal\nFOLDER: Work\nCREATED: \nMODIFIED: \n"));
    assert!(text.ends_with("NOTE_COUNT: 3\n"));
}

#[test]
fn notes_target_folder_and_excluded_account() {
    let (_temp, snapshot, config) = setup(NOTES_SNAPSHOT);

    cmd(&config)
        .args(["notes", "Journal", "--stdout", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("TITLE: Old diary"))
        .stdout(predicate::str::contains("NOTE_COUNT: 1\n"));

    cmd(&config)
        .args(["notes", "Journal", "--exclude-account", "Archive", "--stdout", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("-----").not())
        .stdout(predicate::str::contains("NOTE_COUNT: 0\n"));
}

#[test]
fn notes_written_to_timestamped_log() {
    let (temp, snapshot, config) = setup(NOTES_SNAPSHOT);
    let out_dir = temp.path().join("exports");

    cmd(&config)
        .args(["notes", "--snapshot"])
        .arg(&snapshot)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Exported"));

    let logs: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(logs.len(), 1);

    let name = &logs[0];
    assert!(name.starts_with("notes-"));
    assert!(name.ends_with(".log"));
    assert_eq!(name.len(), "notes-YYYYMMDDhhmmss.log".len());

    let text = fs::read_to_string(out_dir.join(name)).unwrap();
    assert!(text.contains("\nNOTE_COUNT: 3\n"));
}

#[test]
fn log_holds_records_only() {
    let (temp, snapshot, config) = setup(NOTES_SNAPSHOT);
    let out_dir = temp.path().join("exports");

    cmd(&config)
        .args(["-vv", "notes", "--snapshot"])
        .arg(&snapshot)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported").and(predicate::str::contains("Elapsed")));

    let log = fs::read_dir(&out_dir).unwrap().next().unwrap().unwrap().path();
    let text = fs::read_to_string(log).unwrap();
    assert!(text.starts_with("-----\n"));
    assert!(!text.contains("Exported"));
    assert!(!text.contains("Elapsed"));
    assert!(!text.contains("DEBUG"));
}

#[test]
fn oversized_lookback_is_rejected() {
    let (_temp, snapshot, config) = setup("{}");

    cmd(&config)
        .args(["calendar", "--days", "100000000", "--stdout", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());

    fs::write(&config, "[reminders]\nlookback_days = 100000000\n").unwrap();
    cmd(&config)
        .args(["reminders", "--stdout", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("lookback_days"));
}

#[test]
fn config_exclusions_apply() {
    let (_temp, snapshot, config) = setup(NOTES_SNAPSHOT);
    fs::write(
        &config,
        "[notes]\nexcluded_accounts = [\"Personal\"]\nexcluded_folders = []\n",
    )
    .unwrap();

    cmd(&config)
        .args(["notes", "--stdout", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("ACCOUNT: Personal").not())
        .stdout(predicate::str::contains("NOTE_COUNT: 1\n"));
}

#[test]
fn calendar_window_and_missing_start() {
    let snapshot = format!(
        r#"{{"calendars": [{{"name": "Home", "events": [
            {{"uid": "recent", "title": "Dentist", "start": "{}", "location": ""}},
            {{"uid": "stale", "title": "Old", "start": "{}"}},
            {{"uid": "floating", "title": "No start"}}
        ]}}]}}"#,
        iso(-Duration::days(2)),
        iso(-Duration::days(5)),
    );
    let (_temp, snapshot, config) = setup(&snapshot);

    let output = cmd(&config)
        .args(["calendar", "--stdout", "--snapshot"])
        .arg(&snapshot)
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(block_count(&text), 1);
    assert!(text.contains("TYPE: CALENDAR_EVENT\nID: recent\n"));
    assert!(text.contains("\nEND: \nLOCATION: \nNOTES:\n"));
    assert!(!text.contains("undefined"));
    assert!(!text.contains("null"));
    assert!(text.ends_with("EVENT_COUNT: 1\n"));
}

#[test]
fn calendar_days_override() {
    let snapshot = format!(
        r#"{{"calendars": [{{"name": "Home", "events": [
            {{"uid": "stale", "start": "{}"}}
        ]}}]}}"#,
        iso(-Duration::days(5)),
    );
    let (_temp, snapshot, config) = setup(&snapshot);

    cmd(&config)
        .args(["calendar", "--days", "7", "--stdout", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("EVENT_COUNT: 1\n"));
}

#[test]
fn reminders_skip_undated_and_stale() {
    let snapshot = format!(
        r#"{{"lists": [{{"name": "Inbox", "reminders": [
            {{"id": "r1", "title": "Call", "due": "{}", "completed": true, "completed_at": "{}"}},
            {{"id": "r2", "title": "Someday"}},
            {{"id": "r3", "title": "Stale", "due": "{}"}}
        ]}}]}}"#,
        iso(-Duration::hours(3)),
        iso(-Duration::hours(1)),
        iso(-Duration::days(4)),
    );
    let (_temp, snapshot, config) = setup(&snapshot);

    let output = cmd(&config)
        .args(["reminders", "--stdout", "--snapshot"])
        .arg(&snapshot)
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(block_count(&text), 1);
    assert!(text.contains("TYPE: REMINDER\nID: r1\nTITLE: Call\nLIST: Inbox\n"));
    assert!(text.contains("COMPLETED: true\n"));
    assert!(text.ends_with("REMINDER_COUNT: 1\n"));
}

#[test]
fn missing_snapshot_fails() {
    let (temp, _snapshot, config) = setup("{}");

    cmd(&config)
        .args(["reminders", "--stdout", "--snapshot"])
        .arg(temp.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn invalid_snapshot_leaves_no_log() {
    let snapshot = r#"{"accounts": [{"name": "Broken", "folders": [{"name": "Notes", "notes": "oops"}]}]}"#;
    let (temp, snapshot, config) = setup(snapshot);
    let out_dir = temp.path().join("exports");

    cmd(&config)
        .args(["notes", "--snapshot"])
        .arg(&snapshot)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .failure();

    assert!(!out_dir.exists() || fs::read_dir(&out_dir).unwrap().count() == 0);
}

#[test]
fn config_init_and_show() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("nested").join("config.toml");

    cmd(&config).args(["config", "init"]).assert().success();
    assert!(config.exists());

    cmd(&config)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"lookback_days\": 3"));

    cmd(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn explicit_missing_config_fails() {
    let temp = TempDir::new().unwrap();
    let snapshot = temp.path().join("snapshot.json");
    fs::write(&snapshot, "{}").unwrap();

    cmd(&temp.path().join("absent.toml"))
        .args(["notes", "--stdout", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
