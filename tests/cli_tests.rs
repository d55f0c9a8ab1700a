//! Exit code and diagnostics of the `tauri_release` binary.

use assert_cmd::Command;
use predicates::prelude::*;

const REQUIRED_ENV: [&str; 4] = ["GITHUB_TOKEN", "GIST_ID", "REPO_OWNER", "REPO_NAME"];

fn release_cmd(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("tauri_release").unwrap();
    cmd.current_dir(dir);
    for name in REQUIRED_ENV {
        cmd.env_remove(name);
    }
    cmd
}

#[test]
fn missing_version_prints_usage_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    release_cmd(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn blank_version_is_rejected_before_any_work() {
    let dir = tempfile::tempdir().unwrap();
    release_cmd(dir.path())
        .arg("   ")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid arguments"))
        .stderr(predicate::str::contains("Missing required").not());
}

#[test]
fn version_flag_exits_0() {
    let dir = tempfile::tempdir().unwrap();
    release_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_exits_0() {
    let dir = tempfile::tempdir().unwrap();
    release_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn missing_environment_exits_1_without_touching_files() {
    let dir = tempfile::tempdir().unwrap();
    let package_json = "{\n  \"version\": \"0.1.0\"\n}\n";
    std::fs::write(dir.path().join("package.json"), package_json).unwrap();

    release_cmd(dir.path())
        .env("GITHUB_TOKEN", "token")
        .env("GIST_ID", "")
        .args(["0.2.0", "true"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Release failed"))
        .stderr(predicate::str::contains("GIST_ID, REPO_OWNER, REPO_NAME"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("package.json")).unwrap(),
        package_json
    );
}

#[test]
fn dotenv_file_supplies_configuration() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "GITHUB_TOKEN=token\nGIST_ID=gist\nREPO_OWNER=acme\nREPO_NAME=nudge\n",
    )
    .unwrap();

    // Configuration is accepted, so the run proceeds to the manifests,
    // which are missing here
    release_cmd(dir.path())
        .arg("0.2.0")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("package.json"))
        .stderr(predicate::str::contains("Missing required").not());
}
