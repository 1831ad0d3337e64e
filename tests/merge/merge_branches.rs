use crate::common::command::{
    commit_file, get_branch_commit_sha, get_head_commit_sha, init_repository_dir,
    run_twig_command, stdout_of,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

/// History:
///
/// ```text
///       base (f.txt = "base")
///      /    \
///  master    b1
/// ```
///
/// `on_master` and `on_b1` run on their branch; master is checked out at the end.
fn fork(dir: &Path, on_master: impl FnOnce(&Path), on_b1: impl FnOnce(&Path)) {
    commit_file(dir, "f.txt", "base\n", "base");
    run_twig_command(dir, &["branch", "b1"]).assert().success();

    on_master(dir);

    run_twig_command(dir, &["checkout", "b1"]).assert().success();
    on_b1(dir);
    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();
}

#[rstest]
fn divergent_edits_produce_a_conflicted_merge_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    fork(
        dir,
        |dir| commit_file(dir, "f.txt", "master\n", "master edit"),
        |dir| commit_file(dir, "f.txt", "b1\n", "b1 edit"),
    );
    let master_head = get_head_commit_sha(dir)?;
    let b1_head = get_branch_commit_sha(dir, "b1")?;

    let output = stdout_of(run_twig_command(dir, &["merge", "b1"]))?;

    assert_eq!(output, "Encountered a merge conflict.\n");
    init_repository_dir
        .child("f.txt")
        .assert("<<<<<<< HEAD\nmaster\n=======\nb1\n>>>>>>>\n");

    let log = stdout_of(run_twig_command(dir, &["log"]))?;
    let merge_head = get_head_commit_sha(dir)?;
    assert!(log.starts_with(&format!(
        "===\ncommit {merge_head}\nMerge: {} {}\nDate: ",
        &master_head[..7],
        &b1_head[..7]
    )));
    assert!(log.contains("Merged b1 into master.\n"));
    assert_eq!(get_branch_commit_sha(dir, "b1")?, b1_head);

    // the conflict markers are committed, nothing is left staged
    let status = stdout_of(run_twig_command(dir, &["status"]))?;
    assert!(status.contains("=== Staged Files ===\n\n"));
    assert!(status.contains("=== Modifications Not Staged For Commit ===\n\n"));

    Ok(())
}

#[rstest]
fn modified_against_deleted_conflicts_with_an_empty_side(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    fork(
        dir,
        |dir| commit_file(dir, "f.txt", "modified\n", "modify f"),
        |dir| {
            run_twig_command(dir, &["rm", "f.txt"]).assert().success();
            commit_file(dir, "g.txt", "g\n", "delete f");
        },
    );

    run_twig_command(dir, &["merge", "b1"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    init_repository_dir
        .child("f.txt")
        .assert("<<<<<<< HEAD\nmodified\n=======\n>>>>>>>\n");
    init_repository_dir.child("g.txt").assert("g\n");

    Ok(())
}

#[rstest]
fn non_overlapping_changes_merge_cleanly(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "gone.txt", "gone\n", "add gone");
    fork(
        dir,
        |dir| commit_file(dir, "master.txt", "m\n", "master work"),
        |dir| {
            commit_file(dir, "f.txt", "b1\n", "b1 edit");
            run_twig_command(dir, &["rm", "gone.txt"]).assert().success();
            commit_file(dir, "b1.txt", "b\n", "b1 work");
        },
    );

    run_twig_command(dir, &["merge", "b1"])
        .assert()
        .success()
        .stdout("");

    init_repository_dir.child("f.txt").assert("b1\n");
    init_repository_dir.child("master.txt").assert("m\n");
    init_repository_dir.child("b1.txt").assert("b\n");
    init_repository_dir.child("wug.txt").assert("This is a wug.\n");
    init_repository_dir
        .child("gone.txt")
        .assert(predicate::path::missing());

    let status = stdout_of(run_twig_command(dir, &["status"]))?;
    assert!(status.contains("=== Removed Files ===\n\n"));
    assert!(status.contains("=== Untracked Files ===\n\n"));

    Ok(())
}

#[rstest]
fn merging_a_descendant_fast_forwards(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    fork(dir, |_| {}, |dir| commit_file(dir, "f.txt", "ahead\n", "ahead"));
    let b1_head = get_branch_commit_sha(dir, "b1")?;

    run_twig_command(dir, &["merge", "b1"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(get_head_commit_sha(dir)?, b1_head);
    init_repository_dir.child("f.txt").assert("ahead\n");
    init_repository_dir.child(".twig/HEAD").assert("ref: refs/heads/master\n");

    Ok(())
}

#[rstest]
fn merging_an_ancestor_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    fork(dir, |dir| commit_file(dir, "f.txt", "newer\n", "newer"), |_| {});
    let head = get_head_commit_sha(dir)?;

    run_twig_command(dir, &["merge", "b1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Given branch is an ancestor of the current branch.",
        ));
    assert_eq!(get_head_commit_sha(dir)?, head);

    Ok(())
}

#[rstest]
fn merging_the_current_branch_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["merge", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot merge a branch with itself."));
}

#[rstest]
#[case::unknown("ghost")]
#[case::malformed("bad..name")]
fn merging_a_missing_branch_fails(init_repository_dir: TempDir, #[case] branch: &str) {
    run_twig_command(init_repository_dir.path(), &["merge", branch])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}

#[rstest]
fn merging_with_staged_changes_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "b1"]).assert().success();
    write_file(FileSpec::new(dir.join("staged.txt"), "s\n".to_string()));
    run_twig_command(dir, &["add", "staged.txt"]).assert().success();

    run_twig_command(dir, &["merge", "b1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("You have uncommitted changes."));
}

#[rstest]
fn untracked_file_in_the_way_aborts_the_merge(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    fork(
        dir,
        |dir| commit_file(dir, "master.txt", "m\n", "master work"),
        |dir| commit_file(dir, "new.txt", "from b1\n", "b1 adds new"),
    );
    let head = get_head_commit_sha(dir)?;
    write_file(FileSpec::new(dir.join("new.txt"), "mine\n".to_string()));

    run_twig_command(dir, &["merge", "b1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("There is an untracked file in the way"));

    assert_eq!(get_head_commit_sha(dir)?, head);
    init_repository_dir.child("new.txt").assert("mine\n");

    Ok(())
}

#[rstest]
fn file_added_differently_on_both_sides_conflicts(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "b1"]).assert().success();
    run_twig_command(dir, &["checkout", "b1"]).assert().success();
    commit_file(dir, "b.txt", "x", "c3");
    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();
    commit_file(dir, "b.txt", "y", "c4");
    let c4 = get_head_commit_sha(dir)?;
    let c3 = get_branch_commit_sha(dir, "b1")?;

    run_twig_command(dir, &["merge", "b1"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    init_repository_dir
        .child("b.txt")
        .assert("<<<<<<< HEAD\ny=======\nx>>>>>>>\n");
    let log = stdout_of(run_twig_command(dir, &["log"]))?;
    assert!(log.contains(&format!("Merge: {} {}\n", &c4[..7], &c3[..7])));

    Ok(())
}
