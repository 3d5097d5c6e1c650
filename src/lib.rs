//! # Repo Compare Library
//!
//! This library provides the core functionality for comparing two builds of
//! a code-formatting tool — a released baseline and a release candidate —
//! against a fixed set of real-world repositories, and reporting any
//! behavioral differences as a human-reviewable Markdown diff. It is designed
//! to be used by the `repo-compare` command-line tool ahead of cutting a
//! release.
//!
//! ## Core Concepts
//!
//! - **Registry (`registry`)**: the static, ordered list of repositories the
//!   comparison runs against, each with the arguments passed to the tool.
//! - **Tool Runner (`runner`)**: executes a tool build against a working
//!   directory, capturing stdout and stderr independently and never treating
//!   a nonzero exit as fatal.
//! - **Workspace Manager (`workspace`)**: an explicit per-repository handle
//!   over the git operations the pipeline needs — shallow clone, commit-all,
//!   selective checkout, stage-all, and prefixed diffs.
//! - **Orchestrator (`compare`)**: drives the stage sequence for each
//!   registry entry, branching on the comparison mode and isolating failures
//!   so one broken repository never blocks the rest of the run.
//! - **Report Formatter (`report`)**: renders the accumulated results as
//!   Markdown, with fences that embedded backticks cannot terminate.
//!
//! ## Execution Flow
//!
//! For each registry entry, in order: shallow-clone the repository, run the
//! baseline tool, commit its output as a snapshot, optionally restore the
//! pristine tree (`diff-main-vs-change-format` mode), run the candidate
//! tool, optionally stage its output, and compute the diff. Results are
//! accumulated and rendered once at the end; the report goes to stdout and
//! progress narration to stderr.

pub mod compare;
pub mod error;
pub mod registry;
pub mod report;
pub mod runner;
pub mod workspace;
