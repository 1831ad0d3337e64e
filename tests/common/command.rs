use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Commit date used by `twig_commit` (%Y-%m-%d %H:%M:%S %z)
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// Initialized repository with `wug.txt` committed on master
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    commit_file(
        repository_dir.path(),
        "wug.txt",
        "This is a wug.\n",
        "added wug",
    );

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("TWIG_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    twig_commit_at(dir, message, COMMIT_DATE)
}

pub fn twig_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_twig_command(dir, &["commit", message]);
    cmd.env("TWIG_COMMIT_DATE", date);
    cmd
}

/// Stage `file` with `content` and commit it
pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
    run_twig_command(dir, &["add", file]).assert().success();
    twig_commit(dir, message).assert().success();
}

/// Get the commit id the current branch points at
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(dir.join(".twig").join("HEAD"))?;
    let ref_path = head_content
        .trim()
        .strip_prefix("ref: ")
        .ok_or("HEAD is not a symbolic ref")?;

    get_ref_commit_sha(dir, ref_path)
}

pub fn get_branch_commit_sha(
    dir: &Path,
    branch: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    get_ref_commit_sha(dir, &format!("refs/heads/{branch}"))
}

fn get_ref_commit_sha(dir: &Path, ref_path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let commit_sha = std::fs::read_to_string(dir.join(".twig").join(ref_path))?;
    Ok(commit_sha.trim().to_string())
}

/// Commit ids in the order `log` printed them
pub fn logged_commit_ids(log_output: &str) -> Vec<String> {
    log_output
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}

/// Run `cmd`, assert success and return its stdout
pub fn stdout_of(mut cmd: Command) -> Result<String, Box<dyn std::error::Error>> {
    let output = cmd.assert().success().get_output().stdout.clone();
    Ok(String::from_utf8(output)?)
}
