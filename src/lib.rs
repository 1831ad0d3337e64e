//! twig: a small local version-control system
//!
//! - `areas`: the repository and its storage areas (objects, staging, refs, working directory)
//! - `artifacts`: data types and algorithms (objects, revisions, history walks, merge, status)
//! - `commands`: one `impl Repository` block per command
//! - `errors`: typed failures raised by the commands
//! - `logging`: diagnostics setup for the binary

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
pub mod logging;
