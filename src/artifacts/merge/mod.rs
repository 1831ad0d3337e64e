//! Three-way merge
//!
//! - `split_point`: best common ancestor of two commits
//! - `resolution`: per-path classification against the split point

pub mod resolution;
pub mod split_point;
