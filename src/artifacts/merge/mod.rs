//! Merge algorithms and conflict resolution
//!
//! - `base_finder`: split point (merge base) discovery over the commit graph
//! - `resolution`: per-path three-way classification and conflict
//!   materialization

pub mod base_finder;
pub mod resolution;
