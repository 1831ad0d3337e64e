//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Create a repository with its root commit
//! - `add` / `rm`: Stage files for addition or removal
//! - `commit`: Record the staging area
//! - `log`, `global_log`, `find`: Inspect history
//! - `status`: Show branches, staged changes and the working directory state
//! - `checkout`: Restore files or switch branches
//! - `branch` / `rm_branch`: Create or delete branches
//! - `reset`: Move the current branch to another commit
//! - `merge`: Three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
