//! Data structures and algorithms
//!
//! This module contains the core sprig types and algorithms:
//!
//! - `branch`: branch name validation
//! - `core`: shared utilities (command error taxonomy, pager wrapper)
//! - `merge`: split point discovery and three-way merge resolution
//! - `objects`: content-addressed object types (blob, commit)
//! - `staging`: staging area record format (header, checksum)

pub mod branch;
pub mod core;
pub mod merge;
pub mod objects;
pub mod staging;
