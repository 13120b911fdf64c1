use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{count_objects, repository_dir, run_sprig_command, sprig_commit};
use common::file::{FileSpec, write_file};

#[rstest]
fn add_stages_a_file_and_stores_its_blob(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    write_file(FileSpec::new(dir.path().join("foo.txt"), "hello".to_string()));

    run_sprig_command(dir.path(), &["add", "foo.txt"])
        .assert()
        .success();

    assert_eq!(count_objects(dir.path(), "blobs"), 1);
    run_sprig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foo.txt"));

    Ok(())
}

#[rstest]
fn adding_the_same_content_twice_stores_one_blob(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    write_file(FileSpec::new(dir.path().join("foo.txt"), "same".to_string()));
    write_file(FileSpec::new(dir.path().join("bar.txt"), "same".to_string()));

    run_sprig_command(dir.path(), &["add", "foo.txt"])
        .assert()
        .success();
    run_sprig_command(dir.path(), &["add", "bar.txt"])
        .assert()
        .success();

    // identical content, identical digest, a single stored copy
    assert_eq!(count_objects(dir.path(), "blobs"), 1);

    Ok(())
}

#[rstest]
fn add_dot_stages_every_top_level_file(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    write_file(FileSpec::new(dir.path().join("one.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.path().join("two.txt"), "two".to_string()));

    run_sprig_command(dir.path(), &["add", "."])
        .assert()
        .success();

    run_sprig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("one.txt"))
        .stdout(predicate::str::contains("two.txt"));

    Ok(())
}

#[rstest]
fn adding_a_missing_file_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_sprig_command(dir.path(), &["add", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist."));

    Ok(())
}

#[rstest]
fn re_adding_committed_content_stages_nothing(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    write_file(FileSpec::new(dir.path().join("foo.txt"), "hello".to_string()));
    run_sprig_command(dir.path(), &["add", "foo.txt"])
        .assert()
        .success();
    sprig_commit(dir.path(), "c1").assert().success();

    // the working copy still matches history, so nothing gets staged
    run_sprig_command(dir.path(), &["add", "foo.txt"])
        .assert()
        .success();

    sprig_commit(dir.path(), "c2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));

    Ok(())
}

#[rstest]
fn rm_on_a_tracked_file_deletes_it_and_stages_the_removal(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    write_file(FileSpec::new(dir.path().join("foo.txt"), "hello".to_string()));
    run_sprig_command(dir.path(), &["add", "foo.txt"])
        .assert()
        .success();
    sprig_commit(dir.path(), "c1").assert().success();

    run_sprig_command(dir.path(), &["rm", "foo.txt"])
        .assert()
        .success();

    assert!(!dir.path().join("foo.txt").exists());
    run_sprig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\nfoo.txt"));

    // committing the removal untracks the file
    sprig_commit(dir.path(), "remove foo").assert().success();
    run_sprig_command(dir.path(), &["rm", "foo.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No reason to remove the file."));

    Ok(())
}

#[rstest]
fn rm_on_a_staged_untracked_file_unstages_it(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    write_file(FileSpec::new(dir.path().join("foo.txt"), "hello".to_string()));
    run_sprig_command(dir.path(), &["add", "foo.txt"])
        .assert()
        .success();

    run_sprig_command(dir.path(), &["rm", "foo.txt"])
        .assert()
        .success();

    // the working copy survives, but nothing is staged anymore
    assert!(dir.path().join("foo.txt").exists());
    sprig_commit(dir.path(), "c1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));

    Ok(())
}

#[rstest]
fn rm_with_nothing_to_remove_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    write_file(FileSpec::new(dir.path().join("foo.txt"), "hello".to_string()));

    run_sprig_command(dir.path(), &["rm", "foo.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No reason to remove the file."));

    Ok(())
}

#[rstest]
fn status_lists_branches_with_the_active_one_starred(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_sprig_command(dir.path(), &["branch", "dev"])
        .assert()
        .success();

    run_sprig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Branches ==="))
        .stdout(predicate::str::contains("*master"))
        .stdout(predicate::str::contains("dev"))
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===",
        ))
        .stdout(predicate::str::contains("=== Untracked Files ==="));

    Ok(())
}

#[rstest]
fn staging_survives_across_invocations(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    write_file(FileSpec::new(dir.path().join("foo.txt"), "hello".to_string()));
    run_sprig_command(dir.path(), &["add", "foo.txt"])
        .assert()
        .success();

    // a separate invocation still sees the staged file
    run_sprig_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\nfoo.txt"));

    Ok(())
}
