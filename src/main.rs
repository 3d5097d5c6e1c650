//! # Repo Compare CLI
//!
//! This is the binary entry point for the `repo-compare` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Running the comparison pipeline over the built-in repository registry.
//! - Printing the rendered Markdown report on standard output, with all
//!   progress narration kept on standard error.
//!
//! The core pipeline logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library
//! functionality.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
