use crate::common::command::{commit_file, init_repository_dir, run_twig_command, stdout_of};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn clean_repository_reports_empty_sections(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = stdout_of(run_twig_command(init_repository_dir.path(), &["status"]))?;

    assert_eq!(
        status,
        "=== Branches ===\n\
         *master\n\
         \n\
         === Staged Files ===\n\
         \n\
         === Removed Files ===\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         \n\
         === Untracked Files ===\n\
         \n"
    );

    Ok(())
}

#[rstest]
fn every_kind_of_change_lands_in_its_section(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "goodbye.txt", "bye\n", "added goodbye");
    commit_file(dir, "junk.txt", "junk\n", "added junk");
    run_twig_command(dir, &["branch", "other-branch"])
        .assert()
        .success();

    // staged
    write_file(FileSpec::new(dir.join("wug2.txt"), "wug2\n".to_string()));
    run_twig_command(dir, &["add", "wug2.txt"]).assert().success();
    // staged, then changed again
    write_file(FileSpec::new(dir.join("wug3.txt"), "wug3\n".to_string()));
    run_twig_command(dir, &["add", "wug3.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("wug3.txt"), "wug3 v2\n".to_string()));
    // removed
    run_twig_command(dir, &["rm", "goodbye.txt"])
        .assert()
        .success();
    // tracked, deleted without rm
    std::fs::remove_file(dir.join("junk.txt"))?;
    // tracked, modified
    write_file(FileSpec::new(dir.join("wug.txt"), "changed\n".to_string()));
    // untracked
    write_file(FileSpec::new(dir.join("random.stuff"), "?\n".to_string()));

    let status = stdout_of(run_twig_command(dir, &["status"]))?;

    assert_eq!(
        status,
        "=== Branches ===\n\
         *master\n\
         other-branch\n\
         \n\
         === Staged Files ===\n\
         wug2.txt\n\
         wug3.txt\n\
         \n\
         === Removed Files ===\n\
         goodbye.txt\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         junk.txt (deleted)\n\
         wug.txt (modified)\n\
         wug3.txt (modified)\n\
         \n\
         === Untracked Files ===\n\
         random.stuff\n\
         \n"
    );

    Ok(())
}

#[rstest]
fn staged_file_deleted_from_disk_is_reported_deleted(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("tmp.txt"), "tmp\n".to_string()));
    run_twig_command(dir, &["add", "tmp.txt"]).assert().success();
    std::fs::remove_file(dir.join("tmp.txt"))?;

    let status = stdout_of(run_twig_command(dir, &["status"]))?;

    assert!(status.contains("=== Modifications Not Staged For Commit ===\ntmp.txt (deleted)\n\n"));

    Ok(())
}
