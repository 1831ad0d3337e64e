//! Data structures and algorithms
//!
//! - `branch`: Branch names and revision parsing
//! - `checkout`: Working-directory migrations with untracked-file checks
//! - `core`: Shared utilities (pager wrapper, atomic writes)
//! - `index`: Binary format of the staging files
//! - `log`: Commit history traversal
//! - `merge`: Split-point search and per-path merge resolution
//! - `objects`: Object types (blob, commit)
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
