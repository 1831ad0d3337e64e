//! Working tree status inspection
//!
//! Compares the working directory against HEAD's snapshot and the staging
//! area.
//!
//! ## Components
//!
//! - `file_change`: categories of unstaged changes
//! - `inspector`: per-file change detection
//! - `status_info`: status aggregation and the sectioned report

pub mod file_change;
pub mod inspector;
pub mod status_info;
