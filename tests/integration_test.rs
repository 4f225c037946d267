//! Integration tests for the ActionLens CLI
//!
//! These tests run the binary against an organization laid out on disk
//! (`<org>/<repo>/.github/workflows/*.yml`) through the `--local` source.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn get_cmd() -> Command {
    let mut cmd = Command::cargo_bin("actionlens").unwrap();
    cmd.env_remove("ACTIONLENS_ORG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

const WORKFLOW_A: &str = r#"
name: CI
on: [push]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: actions/setup-node@v4
        with:
          node-version: 20
  lint:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - run: npm run lint
"#;

const WORKFLOW_B: &str = r#"
name: Release
on:
  push:
    tags: ["v*"]
jobs:
  release:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: ./.github/actions/local-setup
"#;

fn write_workflow(root: &Path, repo: &str, name: &str, content: &str) {
    let dir = root.join(repo).join(".github/workflows");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

/// web: A (checkout twice, setup-node once), api: B (checkout once), docs: no workflows
fn create_org() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let org = temp_dir.path().join("acme");
    write_workflow(&org, "web", "ci.yml", WORKFLOW_A);
    write_workflow(&org, "api", "release.yaml", WORKFLOW_B);
    fs::create_dir_all(org.join("docs")).unwrap();
    fs::write(org.join("docs/README.md"), "# docs").unwrap();
    temp_dir
}

fn scan_json(temp_dir: &TempDir, extra: &[&str]) -> Value {
    let output = get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "acme", "--format", "json"])
        .args(extra)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// Scan scopes
// ============================================================================

#[test]
fn test_scan_actions_end_to_end() {
    let temp_dir = create_org();
    let report = scan_json(&temp_dir, &["--scan", "actions"]);

    assert_eq!(report["organization"], "acme");
    assert_eq!(report["total_workflows"], 2);
    assert_eq!(report["unique_actions"], 2);
    assert_eq!(report["total_usages"], 4);
    assert_eq!(report["actions_with_multiple_versions"], 0);

    let actions = report["actions"].as_array().unwrap();
    assert_eq!(actions[0]["name"], "actions/checkout");
    assert_eq!(actions[0]["total_usages"], 3);
    assert_eq!(actions[0]["repositories_using"], 2);
    assert_eq!(actions[0]["versions"][0]["version"], "v4");
    assert_eq!(actions[0]["versions"][0]["count"], 3);
    assert_eq!(actions[1]["name"], "actions/setup-node");
    assert_eq!(actions[1]["total_usages"], 1);

    assert_eq!(report["most_used_action"]["name"], "actions/checkout");
    assert_eq!(report["most_used_action"]["workflows_using"], 3);
}

#[test]
fn test_scan_workflows_lists_repositories() {
    let temp_dir = create_org();
    let report = scan_json(&temp_dir, &["--scan", "workflows"]);

    assert_eq!(report["total_repositories"], 3);
    assert_eq!(report["repositories_with_workflows"], 2);
    assert_eq!(report["repositories"][0]["name"], "api");
    assert_eq!(
        report["repositories"][0]["workflows"][0],
        ".github/workflows/release.yaml"
    );
    assert_eq!(report["repositories"][1]["name"], "web");
}

#[test]
fn test_scan_all_contains_both_reports() {
    let temp_dir = create_org();
    let report = scan_json(&temp_dir, &[]);

    assert_eq!(report["workflows"]["repositories_with_workflows"], 2);
    assert_eq!(report["actions"]["total_usages"], 4);
}

#[test]
fn test_workflow_scope_with_detailed_is_inventory() {
    let temp_dir = create_org();
    let report = scan_json(&temp_dir, &["--scan", "workflows", "--detailed"]);

    assert_eq!(report["repositories_with_workflows"], 2);
    assert!(report.get("summary").is_none());
}

#[test]
fn test_detailed_scan() {
    let temp_dir = create_org();
    let report = scan_json(&temp_dir, &["--detailed"]);

    let summary = &report["summary"];
    assert_eq!(summary["total_repositories"], 3);
    assert_eq!(summary["repositories_with_workflows"], 2);
    assert_eq!(summary["total_workflows"], 2);
    assert_eq!(summary["total_action_usages"], 4);
    assert_eq!(summary["unique_actions"], 2);
    assert_eq!(summary["unique_action_versions"], 2);
    assert_eq!(summary["most_used_action"]["name"], "actions/checkout");

    let web = &report["repositories"][1];
    assert_eq!(web["name"], "web");
    let ci = &web["workflows"][0];
    assert_eq!(ci["path"], ".github/workflows/ci.yml");
    assert_eq!(ci["action_count"], 2);
    assert_eq!(ci["total_action_count"], 3);
    assert_eq!(ci["actions"][0]["name"], "actions/checkout");
    assert_eq!(ci["actions"][0]["count"], 2);
    assert!(report["scan_timestamp"].as_str().unwrap().ends_with('Z'));
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn test_default_format_output() {
    let temp_dir = create_org();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "acme", "--scan", "actions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("actions/checkout (used 3 times)"))
        .stdout(predicate::str::contains("Total action usages: 4"))
        .stdout(predicate::str::contains("Most used action: actions/checkout"));
}

#[test]
fn test_table_format_output() {
    let temp_dir = create_org();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "acme", "-s", "workflows", "-f", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WORKFLOW SCAN RESULTS"))
        .stdout(predicate::str::contains("2/3 repositories have GitHub Actions workflows"))
        .stdout(predicate::str::contains("┌"));
}

#[test]
fn test_csv_written_to_file() {
    let temp_dir = create_org();
    let output_path = temp_dir.path().join("actions.csv");

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "acme", "-s", "actions", "-f", "csv", "--output"])
        .arg(&output_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let content = fs::read_to_string(&output_path).unwrap();
    assert_eq!(
        content,
        "Action,Version,Usages,Total\n\
         \"actions/checkout\",\"@v4\",3,3\n\
         \"actions/setup-node\",\"@v4\",1,1\n"
    );
}

#[test]
fn test_output_file_has_no_color_codes() {
    let temp_dir = create_org();
    let output_path = temp_dir.path().join("report.txt");

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "acme", "--output"])
        .arg(&output_path)
        .assert()
        .success();

    let content = fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("Scan complete!"));
    assert!(!content.contains('\u{1b}'));
}

#[test]
fn test_config_file_selects_format() {
    let temp_dir = create_org();
    fs::write(
        temp_dir.path().join(".actionlens.toml"),
        "[output]\nformat = \"csv\"\n",
    )
    .unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "acme", "-s", "workflows"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Repository,Workflow Count,Workflow Files\n",
        ));
}

// ============================================================================
// Edge cases and exit codes
// ============================================================================

#[test]
fn test_broken_workflow_is_skipped() {
    let temp_dir = create_org();
    let org = temp_dir.path().join("acme");
    write_workflow(&org, "web", "broken.yml", "jobs: [unclosed");

    let output = get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "acme", "-s", "actions", "-f", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_usages"], 4);
    assert_eq!(report["skipped"][0]["repository"], "web");
    assert_eq!(report["skipped"][0]["path"], ".github/workflows/broken.yml");
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not be analysed"));
}

#[test]
fn test_organization_without_actions() {
    let temp_dir = TempDir::new().unwrap();
    write_workflow(
        &temp_dir.path().join("empty"),
        "repo",
        "ci.yml",
        "jobs:\n  test:\n    steps:\n      - run: make test\n",
    );

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "empty", "-s", "actions", "-f", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No actions found."))
        .stdout(predicate::str::contains("Most used action").not());

    let output = get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "empty", "--detailed", "-f", "json"])
        .output()
        .unwrap();
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["unique_actions"], 0);
    assert_eq!(report["summary"]["total_action_usages"], 0);
    assert!(report["summary"]["most_used_action"].is_null());
}

#[test]
fn test_org_flag_overrides_directory_name() {
    let temp_dir = create_org();
    let report = scan_json(&temp_dir, &["-s", "workflows", "--org", "renamed"]);
    assert_eq!(report["organization"], "renamed");
}

#[test]
fn test_missing_organization_is_invalid_argument() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("organization is required"));
}

#[test]
fn test_missing_local_directory_is_error() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "nowhere"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_invalid_config_is_error() {
    let temp_dir = create_org();
    fs::write(
        temp_dir.path().join(".actionlens.toml"),
        "[scan]\npage_size = 500\n",
    )
    .unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["scan", "--local", "acme"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("scan.page_size"));
}

#[test]
fn test_unknown_scope_is_rejected() {
    get_cmd()
        .args(["scan", "--org", "acme", "--scan", "everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("everything"));
}

// ============================================================================
// Other commands
// ============================================================================

#[test]
fn test_init_writes_default_config() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--non-interactive"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join(".actionlens.toml")).unwrap();
    assert!(content.contains("[scan]"));
    assert!(content.contains("workflow_dir = \".github/workflows\""));

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--non-interactive"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--non-interactive", "--force"])
        .assert()
        .success();
}

#[test]
fn test_generate_man_page() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .args(["generate-man", "--output"])
        .arg(temp_dir.path())
        .assert()
        .success();

    assert!(temp_dir.path().join("actionlens.1").exists());
}

#[test]
fn test_version_flag() {
    get_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
