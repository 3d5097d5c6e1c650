//! # Tool Runner
//!
//! Executes an external tool build against a working directory, capturing
//! stdout and stderr independently.
//!
//! The runner never treats a nonzero exit as an error: the tools under test
//! rewrite files in place and routinely exit nonzero on inputs they cannot
//! parse, which is exactly the kind of behavioral difference the comparison
//! wants to surface. Only a spawn failure (missing or non-executable binary)
//! produces an `Err`, and the orchestrator downgrades even that to a
//! per-repository warning.
//!
//! The argument list is always passed as a vector — commands are tokenized
//! once at registry construction and never go through a shell.

use std::path::Path;
use std::process::Command;

use crate::error::Result;

/// Captured output of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Raw bytes written to stdout.
    pub stdout: Vec<u8>,
    /// Raw bytes written to stderr.
    pub stderr: Vec<u8>,
    /// Process exit code; -1 if the process died to a signal.
    pub exit_code: i32,
}

impl ToolOutput {
    /// Lossy UTF-8 view of the captured stderr.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Whether stderr contains anything beyond whitespace.
    pub fn has_stderr(&self) -> bool {
        !self.stderr_text().trim().is_empty()
    }
}

/// Run `program` with `args` inside `working_dir`, waiting for completion.
///
/// Side effect: the tool under test mutates files under `working_dir`.
pub fn run(program: &Path, args: &[String], working_dir: &Path) -> Result<ToolOutput> {
    let output = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .output()?;

    Ok(ToolOutput {
        stdout: output.stdout,
        stderr: output.stderr,
        exit_code: output.status.code().unwrap_or(-1),
    })
}
