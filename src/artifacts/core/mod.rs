//! Core utilities and shared types
//!
//! This module contains the command failure taxonomy and the pager wrapper
//! shared across the application.

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};
use thiserror::Error;

/// User-visible command failures
///
/// Every logical failure a command can report falls into one of these
/// classes. The message is the full user-facing text; the class decides the
/// process exit code. I/O failures are not represented here and keep their
/// own generic failure code at the binary boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Wrong argument count or shape for a command
    #[error("{0}")]
    Usage(String),
    /// Operation not valid in the repository's current state
    #[error("{0}")]
    State(String),
    /// A referenced branch, commit, file or path does not exist
    #[error("{0}")]
    NotFound(String),
    /// The three-way merge found a genuine conflict; unlike the other
    /// classes, the working directory and staging area have been mutated
    #[error("{0}")]
    Conflict(String),
}

impl CommandError {
    pub fn usage(message: impl Into<String>) -> Self {
        CommandError::Usage(message.into())
    }

    pub fn state(message: impl Into<String>) -> Self {
        CommandError::State(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CommandError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        CommandError::Conflict(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Usage(_) => 2,
            CommandError::State(_) => 3,
            CommandError::NotFound(_) => 4,
            CommandError::Conflict(_) => 5,
        }
    }
}

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so this
/// wrapper adapts it to be compatible with Rust's standard I/O traits. The
/// history commands use it as a drop-in replacement for stdout when
/// attached to a terminal.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
