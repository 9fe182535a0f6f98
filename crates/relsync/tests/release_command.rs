use std::fs;
use std::path::Path;

use predicates::str::contains;
use tempfile::TempDir;

const ROOT_MANIFEST: &str = r#"{
  "name": "monorepo",
  "version": "1.2.0-4",
  "workspaces": ["packages/*"],
  "relsync": { "upstream": "swc_core" }
}
"#;

fn create_workspace() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");

    fs::write(dir.path().join("package.json"), ROOT_MANIFEST).expect("write root manifest");
    fs::write(
        dir.path().join("Cargo.toml"),
        "[workspace.dependencies]\nswc_core = { version = \"=1.2.0\", features = [\"base\"] }\n",
    )
    .expect("write Cargo.toml");

    let package = dir.path().join("packages/core");
    fs::create_dir_all(&package).expect("create package dir");
    fs::write(
        package.join("package.json"),
        "{\n  \"name\": \"@mono/core\",\n  \"version\": \"1.2.0-4\"\n}\n",
    )
    .expect("write member manifest");

    dir
}

fn init_git(dir: &Path) -> git2::Repository {
    let repo = git2::Repository::init(dir).expect("init repo");
    {
        let mut config = repo.config().expect("config");
        config.set_str("user.name", "Test").expect("set name");
        config
            .set_str("user.email", "test@example.com")
            .expect("set email");

        let mut index = repo.index().expect("index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("add all");
        index.write().expect("write index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = repo.find_tree(tree_id).expect("find tree");
        let sig = git2::Signature::now("Test", "test@example.com").expect("signature");
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .expect("initial commit");
    }
    repo
}

fn read(dir: &Path, path: &str) -> String {
    fs::read_to_string(dir.join(path)).expect("read manifest")
}

macro_rules! relsync_release {
    () => {{
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("relsync");
        cmd.arg("release")
            .env("RELSYNC_NO_TTY", "1")
            .env_remove("RELSYNC_FORCE_TTY");
        cmd
    }};
}

#[test]
fn canary_release_without_git_updates_manifests() {
    let workspace = create_workspace();

    relsync_release!()
        .args(["--class", "canary", "--yes", "--no-git"])
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(contains("Released 1.2.0-5-canary.0 (canary)"))
        .stdout(contains("✓"));

    let root = read(workspace.path(), "package.json");
    assert!(root.contains("\"version\": \"1.2.0-5-canary.0\""));
    assert!(root.contains("\"private\": true"));
    assert!(
        read(workspace.path(), "packages/core/package.json")
            .contains("\"version\": \"1.2.0-5-canary.0\"")
    );
}

#[test]
fn release_commits_and_tags_in_repository() {
    let workspace = create_workspace();
    let repo = init_git(workspace.path());

    relsync_release!()
        .args(["--class", "prerelease", "--yes"])
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(contains("tagged canary/v1.2.0-4-canary.5"));

    assert!(
        repo.find_reference("refs/tags/canary/v1.2.0-4-canary.5")
            .is_ok()
    );
    let head = repo
        .head()
        .expect("head")
        .peel_to_commit()
        .expect("commit");
    assert_eq!(head.message(), Some("canary/v1.2.0-4-canary.5"));
}

#[test]
fn release_refuses_existing_tag() {
    let workspace = create_workspace();
    let repo = init_git(workspace.path());
    let head = repo
        .head()
        .expect("head")
        .peel_to_commit()
        .expect("commit");
    repo.tag_lightweight("canary/v1.2.0-5-canary.0", head.as_object(), false)
        .expect("create tag");

    relsync_release!()
        .args(["--class", "canary", "--yes"])
        .current_dir(workspace.path())
        .assert()
        .failure()
        .stderr(contains("tag 'canary/v1.2.0-5-canary.0' already exists"));

    assert_eq!(read(workspace.path(), "package.json"), ROOT_MANIFEST);
}

#[test]
fn release_without_class_requires_terminal() {
    let workspace = create_workspace();

    relsync_release!()
        .arg("--yes")
        .current_dir(workspace.path())
        .assert()
        .failure()
        .stderr(contains("--class"));

    assert_eq!(read(workspace.path(), "package.json"), ROOT_MANIFEST);
}

#[test]
fn release_without_yes_requires_terminal() {
    let workspace = create_workspace();

    relsync_release!()
        .args(["--class", "canary", "--no-git"])
        .current_dir(workspace.path())
        .assert()
        .failure()
        .stderr(contains("--yes"));

    assert_eq!(read(workspace.path(), "package.json"), ROOT_MANIFEST);
}

#[test]
fn dry_run_prints_plan_and_writes_nothing() {
    let workspace = create_workspace();

    relsync_release!()
        .args(["--class", "canary", "--dry-run", "--no-git"])
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(contains("release: 1.2.0-5-canary.0 (canary)"))
        .stdout(contains("Manifests to update:"))
        .stdout(contains("Dry run: no files were written."));

    assert_eq!(read(workspace.path(), "package.json"), ROOT_MANIFEST);
}

#[test]
fn invalid_class_is_rejected_by_parser() {
    let workspace = create_workspace();

    relsync_release!()
        .args(["--class", "stable"])
        .current_dir(workspace.path())
        .assert()
        .failure()
        .stderr(contains("invalid value 'stable'"));
}
