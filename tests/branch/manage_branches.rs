use crate::common::command::{
    commit_file, get_branch_commit_sha, get_head_commit_sha, init_repository_dir,
    run_twig_command, stdout_of,
};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn new_branch_points_at_head_without_switching(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "cool-beans"])
        .assert()
        .success();

    assert_eq!(
        get_branch_commit_sha(dir, "cool-beans")?,
        get_head_commit_sha(dir)?
    );
    init_repository_dir.child(".twig/HEAD").assert("ref: refs/heads/master\n");

    Ok(())
}

#[rstest]
fn hierarchical_branch_names_are_supported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "feature/login"])
        .assert()
        .success();

    let status = stdout_of(run_twig_command(dir, &["status"]))?;
    assert!(status.starts_with("=== Branches ===\nfeature/login\n*master\n\n"));

    run_twig_command(dir, &["rm-branch", "feature/login"])
        .assert()
        .success();
    init_repository_dir
        .child(".twig/refs/heads/feature")
        .assert(predicate::path::missing());

    Ok(())
}

#[rstest]
fn duplicate_branch_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["branch", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name already exists.",
        ));
}

#[rstest]
#[case::leading_dot(".hidden")]
#[case::double_dot("a..b")]
#[case::lock_suffix("topic.lock")]
#[case::space("with space")]
#[case::head("HEAD")]
fn invalid_branch_names_are_rejected(init_repository_dir: TempDir, #[case] name: &str) {
    run_twig_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));
}

#[rstest]
#[case::checkout("checkout")]
#[case::rm_branch("rm-branch")]
fn malformed_names_are_missing_branches(init_repository_dir: TempDir, #[case] command: &str) {
    run_twig_command(init_repository_dir.path(), &[command, "a..b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}

#[rstest]
fn removing_a_branch_keeps_its_commits(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "doomed"]).assert().success();
    run_twig_command(dir, &["checkout", "doomed"])
        .assert()
        .success();
    commit_file(dir, "doomed.txt", "d\n", "doomed work");
    let doomed_head = get_head_commit_sha(dir)?;
    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();

    run_twig_command(dir, &["rm-branch", "doomed"])
        .assert()
        .success();

    init_repository_dir
        .child(".twig/refs/heads/doomed")
        .assert(predicate::path::missing());
    let global_log = stdout_of(run_twig_command(dir, &["global-log"]))?;
    assert!(global_log.contains(&format!("commit {doomed_head}")));

    Ok(())
}

#[rstest]
fn removing_the_current_branch_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["rm-branch", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot remove the current branch."));
}

#[rstest]
fn removing_an_unknown_branch_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["rm-branch", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}
