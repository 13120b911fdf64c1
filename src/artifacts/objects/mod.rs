//! Content-addressed object types
//!
//! Everything sprig persists is an object identified by the SHA-1 digest of
//! its serialized content. There are two kinds:
//!
//! - **Blob**: the raw bytes of one tracked file at one point in time
//! - **Commit**: a snapshot record (path to blob digest mapping) plus
//!   message, timestamp and parent commit ids
//!
//! An object's id is always computed from its serialization, so the id is
//! never part of the serialized content itself.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 digest in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
