//! Error taxonomy for repository operations
//!
//! Operations return `anyhow::Result` and raise these variants through `.into()`,
//! so callers that care about the failure class can `downcast_ref::<RepositoryError>()`.
//! Every variant is reported before the operation mutates any state.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    // ---------------------------------------------------------------------
    // User input
    // ---------------------------------------------------------------------
    #[error("Not in an initialized twig directory.")]
    NotARepository,

    #[error("A twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid revision: {0}")]
    InvalidRevision(String),

    #[error("File name not supported: {}", .0.display())]
    UnsupportedFileName(PathBuf),

    // ---------------------------------------------------------------------
    // Domain violations
    // ---------------------------------------------------------------------
    #[error("File does not exist.")]
    FileNotFound(PathBuf),

    #[error("No reason to remove the file.")]
    NothingToRemove(PathBuf),

    #[error("No changes added to the commit.")]
    EmptyCommit,

    #[error("File does not exist in that commit.")]
    FileNotInCommit(PathBuf),

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists(String),

    #[error("A branch with that name does not exist.")]
    BranchNotFound(String),

    #[error("No need to checkout the current branch.")]
    CheckoutCurrentBranch,

    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    #[error("Given branch is an ancestor of the current branch.")]
    AlreadyUpToDate,

    // ---------------------------------------------------------------------
    // Working directory safety
    // ---------------------------------------------------------------------
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict { paths: Vec<PathBuf> },

    // ---------------------------------------------------------------------
    // Object lookup
    // ---------------------------------------------------------------------
    #[error("object {0} not found")]
    ObjectNotFound(String),

    #[error("No commit with that id exists.")]
    CommitNotFound(String),

    #[error("short id {prefix} is ambiguous; candidates: {}", candidates.join(", "))]
    AmbiguousPrefix {
        prefix: String,
        candidates: Vec<String>,
    },

    #[error("object {oid} is a {actual}, not a {expected}")]
    ObjectKindMismatch {
        oid: String,
        expected: String,
        actual: String,
    },
}
