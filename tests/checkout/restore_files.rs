use crate::common::command::{
    commit_file, get_head_commit_sha, init_repository_dir, run_twig_command, stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_file_restores_the_head_version(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("wug.txt"), "scribbles\n".to_string()));

    run_twig_command(dir, &["checkout", "--", "wug.txt"])
        .assert()
        .success();

    init_repository_dir.child("wug.txt").assert("This is a wug.\n");
}

#[rstest]
fn checkout_file_from_an_abbreviated_commit_id(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "f.txt", "v1\n", "c1");
    let c1 = get_head_commit_sha(dir)?;
    commit_file(dir, "f.txt", "v2\n", "c2");

    run_twig_command(dir, &["checkout", &c1[..8], "--", "f.txt"])
        .assert()
        .success();
    init_repository_dir.child("f.txt").assert("v1\n");

    run_twig_command(dir, &["checkout", "HEAD", "--", "f.txt"])
        .assert()
        .success();
    init_repository_dir.child("f.txt").assert("v2\n");

    run_twig_command(dir, &["checkout", "@^", "--", "f.txt"])
        .assert()
        .success();
    init_repository_dir.child("f.txt").assert("v1\n");

    // restoring a file does not stage it
    let status = stdout_of(run_twig_command(dir, &["status"]))?;
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("f.txt (modified)"));

    Ok(())
}

#[rstest]
fn checkout_file_missing_from_commit_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["checkout", "--", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist in that commit."));
}

#[rstest]
fn checkout_file_from_unknown_commit_fails(init_repository_dir: TempDir) {
    run_twig_command(
        init_repository_dir.path(),
        &["checkout", "deadbeef", "--", "wug.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
fn checkout_without_operands_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["checkout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect operands."));
}
