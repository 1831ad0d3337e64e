//! Object types
//!
//! All content is stored as objects identified by SHA-1 hashes:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Snapshot with metadata (message, timestamp, parent commits, tracked files)
//!
//! All objects serialize to `<type> <size>\0<content>`; the type is the kind
//! tag that keeps blob and commit lookups from being confused.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated id in command output
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;

/// Shortest prefix accepted when resolving abbreviated ids
pub const MIN_PREFIX_LENGTH: usize = 4;
