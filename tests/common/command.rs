use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub fn run_sprig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("sprig").expect("Failed to find sprig binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn sprig_commit(dir: &Path, message: &str) -> Command {
    run_sprig_command(dir, &["commit", message])
}

pub fn sprig_merge(dir: &Path, branch: &str) -> Command {
    run_sprig_command(dir, &["merge", branch])
}

#[fixture]
pub fn repository_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");

    run_sprig_command(dir.path(), &["init"]).assert().success();

    dir
}

/// Read the name of the active branch from the HEAD file
pub fn head_branch_name(dir: &Path) -> String {
    let head_path = dir.join(".sprig").join("branches").join("HEAD");
    std::fs::read_to_string(head_path)
        .expect("Failed to read HEAD file")
        .trim()
        .to_string()
}

/// Read the commit id a branch points at
pub fn branch_commit_id(dir: &Path, branch: &str) -> String {
    let branch_path = dir.join(".sprig").join("branches").join(branch);
    std::fs::read_to_string(branch_path)
        .expect("Failed to read branch file")
        .trim()
        .to_string()
}

/// Read the commit id of the active branch
pub fn head_commit_id(dir: &Path) -> String {
    branch_commit_id(dir, &head_branch_name(dir))
}

/// Count the objects stored under the given object directory
pub fn count_objects(dir: &Path, kind: &str) -> usize {
    let objects_path = dir.join(".sprig").join(kind);
    std::fs::read_dir(objects_path)
        .expect("Failed to read objects directory")
        .count()
}
