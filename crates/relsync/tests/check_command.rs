use std::fs;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn create_workspace(root_version: &str, pin: &str) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");

    fs::write(
        dir.path().join("package.json"),
        format!(
            r#"{{
  "name": "monorepo",
  "version": "{root_version}",
  "workspaces": ["packages/*"],
  "relsync": {{ "upstream": "rspack_core" }}
}}
"#
        ),
    )
    .expect("write root manifest");
    fs::write(
        dir.path().join("Cargo.toml"),
        format!("[workspace.dependencies]\nrspack_core = \"{pin}\"\n"),
    )
    .expect("write Cargo.toml");

    for name in ["binding", "cli"] {
        let package = dir.path().join("packages").join(name);
        fs::create_dir_all(&package).expect("create package dir");
        fs::write(
            package.join("package.json"),
            format!("{{\n  \"name\": \"@mono/{name}\",\n  \"version\": \"{root_version}\"\n}}\n"),
        )
        .expect("write member manifest");
    }

    dir
}

macro_rules! relsync {
    () => {
        assert_cmd::cargo::cargo_bin_cmd!("relsync")
    };
}

#[test]
fn help_lists_subcommands() {
    relsync!()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("check"))
        .stdout(contains("candidates"))
        .stdout(contains("release"));
}

#[test]
fn check_accepts_matching_workspace() {
    let workspace = create_workspace("0.5.0-3", "=0.5.0");

    relsync!()
        .arg("check")
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(contains("upstream: 0.5.0"))
        .stdout(contains("workspace: 0.5.0-3 (latest)"))
        .stdout(contains("packages: 3"))
        .stdout(contains("All manifests agree with the root version."));
}

#[test]
fn check_accepts_root_flag() {
    let workspace = create_workspace("0.5.0-3-canary.1", "0.5.0");

    relsync!()
        .arg("-C")
        .arg(workspace.path())
        .arg("check")
        .assert()
        .success()
        .stdout(contains("workspace: 0.5.0-3-canary.1 (canary)"));
}

#[test]
fn check_fails_when_pin_moved() {
    let workspace = create_workspace("0.5.0-3", "=0.6.0");

    relsync!()
        .arg("check")
        .current_dir(workspace.path())
        .assert()
        .failure()
        .stderr(contains("error:"))
        .stderr(contains("does not track pinned upstream version '0.6.0'"));
}

#[test]
fn check_reports_drifted_member() {
    let workspace = create_workspace("0.5.0-3", "=0.5.0");
    fs::write(
        workspace.path().join("packages/cli/package.json"),
        "{\n  \"name\": \"@mono/cli\",\n  \"version\": \"0.5.0-1\"\n}\n",
    )
    .expect("rewrite member");

    relsync!()
        .arg("check")
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(contains("@mono/cli 0.5.0-1"))
        .stdout(contains("@mono/binding").not());
}

#[test]
fn check_fails_without_upstream() {
    let workspace = create_workspace("0.5.0-3", "=0.5.0");
    fs::write(
        workspace.path().join("package.json"),
        r#"{"name": "monorepo", "version": "0.5.0-3"}"#,
    )
    .expect("rewrite root");

    relsync!()
        .arg("check")
        .current_dir(workspace.path())
        .assert()
        .failure()
        .stderr(contains("--upstream"));
}

#[test]
fn upstream_flag_supplies_missing_configuration() {
    let workspace = create_workspace("0.5.0-3", "=0.5.0");
    fs::write(
        workspace.path().join("package.json"),
        r#"{"name": "monorepo", "version": "0.5.0-3", "workspaces": ["packages/*"]}"#,
    )
    .expect("rewrite root");

    relsync!()
        .args(["check", "--upstream", "rspack_core"])
        .current_dir(workspace.path())
        .assert()
        .success();
}

#[test]
fn candidates_lists_all_classes() {
    let workspace = create_workspace("0.5.0-3", "=0.5.0");

    relsync!()
        .arg("candidates")
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(contains("current: 0.5.0-3"))
        .stdout(contains("latest: 0.5.0-3 (latest) [unchanged]"))
        .stdout(contains("canary: 0.5.0-4-canary.0 (canary)"))
        .stdout(contains("prerelease: 0.5.0-3-canary.4 (canary)"));
}

#[test]
fn missing_root_manifest_fails() {
    let dir = TempDir::new().expect("create temp dir");

    relsync!()
        .arg("check")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(contains("package.json"));
}
