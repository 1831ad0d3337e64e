use crate::common::command::{
    commit_file, get_branch_commit_sha, get_head_commit_sha, init_repository_dir,
    logged_commit_ids, run_twig_command, stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn reset_moves_the_branch_and_restores_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let c1 = get_head_commit_sha(dir)?;
    commit_file(dir, "wug.txt", "second wug\n", "c2");
    commit_file(dir, "extra.txt", "extra\n", "c3");

    let output = stdout_of(run_twig_command(dir, &["reset", &c1]))?;

    assert_eq!(output, format!("HEAD is now at {} added wug\n", &c1[..7]));
    assert_eq!(get_branch_commit_sha(dir, "master")?, c1);
    init_repository_dir.child("wug.txt").assert("This is a wug.\n");
    init_repository_dir
        .child("extra.txt")
        .assert(predicate::path::missing());

    let log = stdout_of(run_twig_command(dir, &["log"]))?;
    assert_eq!(logged_commit_ids(&log).first(), Some(&c1));

    Ok(())
}

#[rstest]
fn reset_accepts_relative_revisions(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let c1 = get_head_commit_sha(dir)?;
    commit_file(dir, "a.txt", "a\n", "c2");
    commit_file(dir, "b.txt", "b\n", "c3");

    run_twig_command(dir, &["reset", "HEAD~2"])
        .assert()
        .success();

    assert_eq!(get_head_commit_sha(dir)?, c1);

    Ok(())
}

#[rstest]
fn reset_clears_the_staging_area(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;
    write_file(FileSpec::new(dir.join("wug.txt"), "staged\n".to_string()));
    run_twig_command(dir, &["add", "wug.txt"]).assert().success();

    run_twig_command(dir, &["reset", &head]).assert().success();

    let status = stdout_of(run_twig_command(dir, &["status"]))?;
    assert!(status.contains("=== Staged Files ===\n\n"));
    init_repository_dir.child("wug.txt").assert("This is a wug.\n");

    Ok(())
}

#[rstest]
fn reset_to_unknown_commit_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["reset", "abcdef12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commit with that id exists."));
}

#[rstest]
fn reset_refuses_to_overwrite_untracked_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "later.txt", "later\n", "c2");
    let c2 = get_head_commit_sha(dir)?;
    run_twig_command(dir, &["rm", "later.txt"]).assert().success();
    commit_file(dir, "other.txt", "other\n", "c3");
    let c3 = get_head_commit_sha(dir)?;
    write_file(FileSpec::new(dir.join("later.txt"), "untracked\n".to_string()));

    run_twig_command(dir, &["reset", &c2])
        .assert()
        .failure()
        .stderr(predicate::str::contains("There is an untracked file in the way"));

    assert_eq!(get_head_commit_sha(dir)?, c3);
    init_repository_dir.child("later.txt").assert("untracked\n");
    init_repository_dir.child("other.txt").assert("other\n");

    Ok(())
}
