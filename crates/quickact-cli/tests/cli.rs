use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn quickact(db_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("quickact").unwrap();
    cmd.arg("--db-path").arg(db_path);
    cmd
}

#[test]
fn test_list_on_empty_database() {
    let temp_dir = tempdir().unwrap();
    let db = temp_dir.path().join("quickact.db");

    quickact(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tracked messages"));
}

#[test]
fn test_actions_table_shows_defaults() {
    let temp_dir = tempdir().unwrap();
    let db = temp_dir.path().join("quickact.db");

    quickact(&db)
        .arg("actions")
        .assert()
        .success()
        .stdout(predicate::str::contains("create_ticket"))
        .stdout(predicate::str::contains("default"));
}

#[test]
fn test_actions_set_and_unset_override() {
    let temp_dir = tempdir().unwrap();
    let db = temp_dir.path().join("quickact.db");

    quickact(&db)
        .args(["actions", "set", "🚀", "create_ticket"])
        .assert()
        .success();

    quickact(&db)
        .arg("actions")
        .assert()
        .success()
        .stdout(predicate::str::contains("🚀"))
        .stdout(predicate::str::contains("override"));

    quickact(&db)
        .args(["actions", "unset", "🚀"])
        .assert()
        .success();
}

#[test]
fn test_actions_set_rejects_unknown_action() {
    let temp_dir = tempdir().unwrap();
    let db = temp_dir.path().join("quickact.db");

    quickact(&db)
        .args(["actions", "set", "🚀", "launch_rocket"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown action"));
}

#[test]
fn test_disarm_unknown_message_reports_not_tracked() {
    let temp_dir = tempdir().unwrap();
    let db = temp_dir.path().join("quickact.db");

    quickact(&db)
        .args(["disarm", "12345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not tracked"));
}
