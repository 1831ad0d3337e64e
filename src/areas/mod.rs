//! Core repository components
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `index`: staging area of pending additions and removals
//! - `refs`: branch heads and the HEAD pointer
//! - `repository`: the handle tying the areas together
//! - `workspace`: working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
