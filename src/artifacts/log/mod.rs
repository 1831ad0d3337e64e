//! Commit history traversal
//!
//! - `rev_list`: first-parent walk used by `log`, and the breadth-first
//!   `Ancestors` walk over every parent link used by merge-base search

pub mod rev_list;
