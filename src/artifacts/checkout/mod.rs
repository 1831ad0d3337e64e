//! Working-directory synchronization
//!
//! `checkout`, `reset` and `merge` rewrite the working directory through a
//! `Migration`: a plan of writes and deletes that is checked against
//! untracked files before anything on disk changes.

pub mod migration;
