//! Command implementations
//!
//! Every user-facing command is implemented as a method on `Repository`,
//! one file per command under `porcelain`. Commands validate their
//! preconditions in order, report failures through the `CommandError`
//! taxonomy and write their regular output through the repository's writer.

pub mod porcelain;
