//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `repo-compare` tool. It uses the `thiserror` library to create an
//! `Error` enum covering every failure class a repository pipeline can hit,
//! providing clear and descriptive error messages.
//!
//! The taxonomy is deliberately small and closed: each variant corresponds
//! to one workspace operation that can abort a repository's pipeline
//! (`Clone`, `Commit`, `Restore`, `Stage`), plus a generic `Git` variant for
//! diff plumbing and an `Io` wrapper for spawn failures. Tool stderr is never
//! an `Error` — the orchestrator records it as a warning without aborting.
//!
//! None of these errors propagate out of the orchestrator; they are
//! accumulated into the per-repository result and rendered centrally by the
//! report formatter.

use thiserror::Error;

/// Main error type for repo-compare operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while shallow-cloning a repository.
    ///
    /// Terminal for the affected repository: no further stages run.
    #[error("git clone failed for {url}: {stderr}")]
    Clone { url: String, stderr: String },

    /// An error occurred while committing the baseline tool's output.
    ///
    /// Terminal for the affected repository.
    #[error("git commit failed: {stderr}")]
    Commit { stderr: String },

    /// An error occurred while checking paths out of a prior revision.
    ///
    /// Terminal for the affected repository.
    #[error("git checkout of {revision} failed: {stderr}")]
    Restore { revision: String, stderr: String },

    /// An error occurred while staging the candidate tool's changes.
    ///
    /// Terminal for the affected repository.
    #[error("git add failed: {stderr}")]
    Stage { stderr: String },

    /// A git invocation outside the terminal stages failed.
    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
