use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{head_branch_name, head_commit_id, repository_dir, run_sprig_command};

#[test]
fn init_creates_the_control_directory_layout() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    run_sprig_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Initialized an empty sprig repository in",
        ));

    let control = dir.path().join(".sprig");
    assert!(control.join("blobs").is_dir());
    assert!(control.join("commits").is_dir());
    assert!(control.join("branches").is_dir());
    assert!(control.join("staging").join("stage").is_file());
    assert!(control.join("global-log").join("log").is_file());

    Ok(())
}

#[rstest]
fn init_starts_on_master_with_a_root_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    assert_eq!(head_branch_name(dir.path()), "master");

    // the default branch points at the root commit, which is stored
    let root_id = head_commit_id(dir.path());
    assert_eq!(root_id.len(), 40);
    assert!(
        dir.path()
            .join(".sprig")
            .join("commits")
            .join(&root_id)
            .is_file()
    );

    // and the root commit shows up in the log
    run_sprig_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial commit"));

    Ok(())
}

#[rstest]
fn init_twice_fails_without_touching_the_repository(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    let root_id = head_commit_id(dir.path());

    run_sprig_command(dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A sprig version-control system already exists in the current directory.",
        ));

    // the existing history is untouched
    assert_eq!(head_commit_id(dir.path()), root_id);

    Ok(())
}

#[test]
fn commands_outside_a_repository_fail() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    run_sprig_command(dir.path(), &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Not in an initialized sprig repository.",
        ));

    Ok(())
}
