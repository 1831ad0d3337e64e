//! Staging file format
//!
//! The staging area is persisted as two files, `.twig/index/add` and
//! `.twig/index/remove`, sharing one binary layout:
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "TWIX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length, sorted by path):
//!   - Path length (2 bytes)
//!   - Path (UTF-8, `/`-separated)
//!   - Blob id (20 bytes, additions only)
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```
//!
//! All integers are in network byte order.

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the staging file header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying staging files
pub const SIGNATURE: &str = "TWIX";

/// Staging file format version
pub const VERSION: u32 = 1;
