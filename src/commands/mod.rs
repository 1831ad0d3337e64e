//! Command implementations
//!
//! Every command is an `impl Repository` block writing its report through
//! `Repository::writer`.
//!
//! - `plumbing`: building blocks shared by several commands (commit creation)
//! - `porcelain`: the user-facing commands (add, commit, log, merge, etc.)

pub mod plumbing;
pub mod porcelain;
