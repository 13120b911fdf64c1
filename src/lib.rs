//! sprig — a small content-addressed version control system
//!
//! The crate is organized in three layers:
//!
//! - `areas`: the persistent surfaces of a repository (object database,
//!   staging area, references, workspace) and the repository handle tying
//!   them together
//! - `artifacts`: the data structures and algorithms (objects, branch names,
//!   staging record format, merge resolution and split point finding)
//! - `commands`: the user-facing command implementations

pub mod areas;
pub mod artifacts;
pub mod commands;
