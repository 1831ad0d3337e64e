//! Plumbing (low-level operations)
//!
//! - `write_commit`: turn the staging area into a commit on the current branch,
//!   used by `commit` and `merge`

mod write_commit;
