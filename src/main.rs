use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::{Path, PathBuf};
use twig::areas::repository::Repository;
use twig::artifacts::core::PagerWriter;
use twig::logging::init_logging;

/// Set to any value to print `log` and `global-log` without the pager
const NO_PAGER_ENV_VAR: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "twig tracks snapshots of a directory as commits on named branches, \
    with a staging area, history inspection and three-way merges. \
    Everything lives in a local .twig directory; there are no remotes.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates a repository with a root commit on the master branch \
        in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file or stage its removal",
        long_about = "This command unstages a file staged for addition. A file tracked by the \
        current commit is staged for removal and deleted from the working directory."
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "commit", about = "Record the staging area as a new commit")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file>: restore the file as of the current commit\n\
        checkout <commit> -- <file>: restore the file as of the given commit\n\
        checkout <branch>: switch to the branch, replacing the working directory"
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit when a file follows")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Check out a commit and move the current branch to it"
    )]
    Reset {
        #[arg(index = 1, help = "The commit id (abbreviations, HEAD, ^ and ~n allowed)")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
}

fn main() -> Result<()> {
    init_logging();
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init { path } => {
            let path = path.as_deref().unwrap_or(&pwd);
            Repository::init(path, Box::new(std::io::stdout()))?;
        }
        Commands::Add { file } => open_repository(&pwd)?.add(file)?,
        Commands::Rm { file } => open_repository(&pwd)?.rm(file)?,
        Commands::Commit { message } => open_repository(&pwd)?.commit(message)?,
        Commands::Log => run_paged(&pwd, |repository| repository.log())?,
        Commands::GlobalLog => run_paged(&pwd, |repository| repository.global_log())?,
        Commands::Find { message } => open_repository(&pwd)?.find(message)?,
        Commands::Status => open_repository(&pwd)?.status()?,
        Commands::Checkout { target, file } => match (target, file) {
            (revision, Some(file)) => {
                open_repository(&pwd)?.checkout_file(revision.as_deref(), file)?
            }
            (Some(branch), None) => open_repository(&pwd)?.checkout_branch(branch)?,
            (None, None) => anyhow::bail!("Incorrect operands."),
        },
        Commands::Branch { name } => open_repository(&pwd)?.branch(name)?,
        Commands::RmBranch { name } => open_repository(&pwd)?.rm_branch(name)?,
        Commands::Reset { commit } => open_repository(&pwd)?.reset(commit)?,
        Commands::Merge { branch } => {
            open_repository(&pwd)?.merge(branch)?;
        }
    }

    Ok(())
}

fn open_repository(path: &Path) -> Result<Repository> {
    Repository::open(path, Box::new(std::io::stdout()))
}

/// Run a history command through the minus pager when stdout is a terminal.
fn run_paged(path: &Path, command: impl FnOnce(&Repository) -> Result<()>) -> Result<()> {
    if std::env::var_os(NO_PAGER_ENV_VAR).is_some() || !std::io::stdout().is_terminal() {
        return command(&open_repository(path)?);
    }

    let pager = Pager::new();
    let repository = Repository::open(path, Box::new(PagerWriter::new(pager.clone())))?;
    command(&repository)?;
    minus::page_all(pager)?;

    Ok(())
}
