//! # Comparison Orchestrator
//!
//! Drives the per-repository pipeline: clone, baseline run, snapshot commit,
//! optional restore, candidate run, optional stage, diff. Repositories are
//! processed strictly one at a time — both tools and git mutate a shared
//! working copy and index, so there is nothing safe to parallelize.
//!
//! Failures are isolated per repository: a terminal failure (clone, commit,
//! restore, stage) abandons the remaining stages of that repository only and
//! is recorded into its result; every later registry entry still runs. Tool
//! stderr is recorded as a warning without altering control flow. Nothing in
//! here prints to stdout — results are accumulated and rendered centrally by
//! the report formatter, and progress narration goes to stderr via `log`.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::registry::RepoEntry;
use crate::runner;
use crate::workspace::Workspace;

/// Revision of the pristine tree, relative to the baseline snapshot commit.
const PRISTINE_REVISION: &str = "HEAD~1";

/// Governs whether the candidate tool runs atop the baseline's output or
/// atop restored original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    /// The baseline's formatted output stays on disk; the diff shows the
    /// delta the candidate applies on top of it.
    DiffAfterMainFormat,
    /// The pristine tree is restored before the candidate runs; the diff
    /// shows candidate-vs-original formatting, independent of the baseline.
    DiffMainVsChangeFormat,
}

impl ComparisonMode {
    /// Parse the mode from the CLI's positional argument. Unrecognized or
    /// absent values fall back to `DiffAfterMainFormat`.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("diff-after-main-format") | None => ComparisonMode::DiffAfterMainFormat,
            Some("diff-main-vs-change-format") => ComparisonMode::DiffMainVsChangeFormat,
            Some(other) => {
                warn!("unrecognized comparison mode '{other}', defaulting to diff-after-main-format");
                ComparisonMode::DiffAfterMainFormat
            }
        }
    }
}

/// Pipeline stage a recorded incident belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clone,
    BaselineRun,
    Commit,
    Restore,
    CandidateRun,
    StageAll,
}

impl Stage {
    /// Whether a failure at this stage abandons the repository's pipeline.
    /// Tool runs only ever produce warnings.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Stage::BaselineRun | Stage::CandidateRun)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Stage::Clone => "cloning",
            Stage::BaselineRun => "running baseline",
            Stage::Commit => "committing baseline changes",
            Stage::Restore => "restoring sources",
            Stage::CandidateRun => "running candidate",
            Stage::StageAll => "staging changes",
        };
        f.write_str(label)
    }
}

/// One recorded error or warning, attributed to the stage that produced it.
#[derive(Debug, Clone)]
pub struct Incident {
    pub stage: Stage,
    pub message: String,
}

/// Everything the pipeline learned about one repository.
#[derive(Debug)]
pub struct RepoResult {
    pub entry: RepoEntry,
    /// Unified diff between the two tools' output, if any was produced.
    pub diff_text: Option<String>,
    /// Errors and warnings in the order they occurred.
    pub incidents: Vec<Incident>,
}

impl RepoResult {
    fn new(entry: RepoEntry) -> Self {
        Self {
            entry,
            diff_text: None,
            incidents: Vec::new(),
        }
    }

    fn record(&mut self, stage: Stage, message: impl Into<String>) {
        self.incidents.push(Incident {
            stage,
            message: message.into(),
        });
    }

    /// Whether this repository's pipeline was abandoned before the diff.
    pub fn has_terminal_failure(&self) -> bool {
        self.incidents.iter().any(|i| i.stage.is_terminal())
    }
}

/// A configured comparison run.
#[derive(Debug)]
pub struct Comparison {
    pub mode: ComparisonMode,
    /// Path to the baseline build of the tool.
    pub baseline: PathBuf,
    /// Path to the candidate build of the tool.
    pub candidate: PathBuf,
    /// Directory under which per-repository workspaces are created.
    pub work_root: PathBuf,
}

impl Comparison {
    /// Run the comparison over every registry entry, in order.
    pub fn run(&self, registry: &[RepoEntry]) -> Vec<RepoResult> {
        registry
            .iter()
            .map(|entry| self.compare_repo(entry))
            .collect()
    }

    fn compare_repo(&self, entry: &RepoEntry) -> RepoResult {
        let mut result = RepoResult::new(entry.clone());

        info!("cloning {} from {}", entry.name, entry.url);
        let ws = match Workspace::clone(&self.work_root, &entry.name, &entry.url) {
            Ok(ws) => ws,
            Err(e) => {
                result.record(Stage::Clone, e.to_string());
                return result;
            }
        };

        info!("running baseline on {}", entry.name);
        self.run_tool(&self.baseline, Stage::BaselineRun, &ws, &mut result);

        if let Err(e) = ws.commit_all("base") {
            result.record(Stage::Commit, e.to_string());
            return result;
        }

        if self.mode == ComparisonMode::DiffMainVsChangeFormat {
            info!("restoring pristine sources on {}", entry.name);
            if let Err(e) = ws.restore_paths(PRISTINE_REVISION, &["."]) {
                result.record(Stage::Restore, e.to_string());
                return result;
            }
        }

        info!("running candidate on {}", entry.name);
        self.run_tool(&self.candidate, Stage::CandidateRun, &ws, &mut result);

        if self.mode == ComparisonMode::DiffMainVsChangeFormat {
            if let Err(e) = ws.stage_all() {
                result.record(Stage::StageAll, e.to_string());
                return result;
            }
        }

        let src_prefix = format!("ORI/{}/", entry.name);
        let dst_prefix = format!("ALT/{}/", entry.name);
        let diff = match self.mode {
            ComparisonMode::DiffAfterMainFormat => ws.diff_worktree(&src_prefix, &dst_prefix),
            ComparisonMode::DiffMainVsChangeFormat => {
                ws.diff_staged(PRISTINE_REVISION, &src_prefix, &dst_prefix)
            }
        };
        match diff {
            Ok(text) if !text.trim().is_empty() => result.diff_text = Some(text),
            Ok(_) => info!("no diff on {}", entry.name),
            Err(e) => warn!("diff failed on {}: {e}", entry.name),
        }

        result
    }

    /// Run one tool build, recording its stderr (or an abnormal exit) as a
    /// non-fatal warning.
    fn run_tool(&self, program: &Path, stage: Stage, ws: &Workspace, result: &mut RepoResult) {
        match runner::run(program, &result.entry.command, ws.path()) {
            Ok(output) => {
                if output.has_stderr() {
                    warn!("{stage} on {} produced stderr", result.entry.name);
                    result.record(stage, output.stderr_text());
                } else if output.exit_code != 0 {
                    result.record(stage, format!("exited with status {}", output.exit_code));
                }
            }
            Err(e) => {
                warn!("{stage} on {} failed to start: {e}", result.entry.name);
                result.record(stage, e.to_string());
            }
        }
    }
}
