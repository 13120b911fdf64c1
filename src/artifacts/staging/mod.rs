//! Staging area file format
//!
//! The staging area is persisted as a single binary record at
//! `.sprig/staging/stage`. The record tracks two pending-change sets: files
//! staged for addition (path plus blob digest) and files staged for removal
//! (path only).
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (16 bytes):
//!   - Signature: "SPRG" (4 bytes)
//!   - Version: 1 (4 bytes, big endian)
//!   - Addition count (4 bytes, big endian)
//!   - Removal count (4 bytes, big endian)
//!
//! Addition entries:
//!   - Path length (2 bytes, big endian), path bytes, 40-byte hex digest
//!
//! Removal entries:
//!   - Path length (2 bytes, big endian), path bytes
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the staging record header in bytes
pub const HEADER_SIZE: usize = 16;

/// Magic signature identifying staging record files
pub const SIGNATURE: &str = "SPRG";

/// Staging record format version
pub const VERSION: u32 = 1;
