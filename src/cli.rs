//! CLI argument parsing and execution

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use clap::Parser;
use log::warn;

use repo_compare::compare::{Comparison, ComparisonMode};
use repo_compare::registry;
use repo_compare::report;

/// Repo Compare - Compare two formatter builds across real-world repositories
#[derive(Parser, Debug)]
#[command(name = "repo-compare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Comparison mode: "diff-after-main-format" runs the candidate on top of
    /// the baseline's output; "diff-main-vs-change-format" restores the
    /// original sources first. Unrecognized values fall back to the former.
    #[arg(value_name = "MODE")]
    mode: Option<String>,

    /// Path to the baseline build of the tool
    #[arg(
        long,
        value_name = "PATH",
        env = "REPO_COMPARE_BASELINE",
        default_value = "./fmt-baseline"
    )]
    baseline: PathBuf,

    /// Path to the candidate build of the tool
    #[arg(
        long,
        value_name = "PATH",
        env = "REPO_COMPARE_CANDIDATE",
        default_value = "./fmt-candidate"
    )]
    candidate: PathBuf,

    /// Directory under which the per-repository workspaces are created.
    ///
    /// If not provided, it defaults to the current working directory.
    #[arg(long, value_name = "DIR")]
    work_dir: Option<PathBuf>,

    /// Exit nonzero if any repository's pipeline failed
    #[arg(long)]
    strict: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Execute the comparison run.
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .init();

        let work_root = match self.work_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        mark_executable(&self.baseline);
        mark_executable(&self.candidate);
        check_commit_identity();

        let comparison = Comparison {
            mode: ComparisonMode::from_arg(self.mode.as_deref()),
            baseline: self.baseline,
            candidate: self.candidate,
            work_root,
        };

        let results = comparison.run(&registry::builtin());
        print!("{}", report::render(&results));

        let failed = results.iter().filter(|r| r.has_terminal_failure()).count();
        if self.strict && failed > 0 {
            anyhow::bail!("{failed} repository pipeline(s) failed");
        }

        Ok(())
    }
}

/// Mark a downloaded tool build executable before the run starts.
///
/// Failure is not fatal here: a missing or unreadable tool surfaces later as
/// a per-repository warning when it fails to spawn.
#[cfg(unix)]
fn mark_executable(tool: &Path) {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    match fs::metadata(tool) {
        Ok(metadata) => {
            let mut permissions = metadata.permissions();
            permissions.set_mode(0o700);
            if let Err(e) = fs::set_permissions(tool, permissions) {
                warn!("could not mark {} executable: {e}", tool.display());
            }
        }
        Err(e) => warn!("tool build {} is not accessible: {e}", tool.display()),
    }
}

#[cfg(not(unix))]
fn mark_executable(_tool: &Path) {}

/// Snapshot commits need a commit identity; the harness never sets one
/// itself, so at least tell the operator when it is missing.
fn check_commit_identity() {
    let configured = Command::new("git")
        .args(["config", "user.email"])
        .output()
        .map(|output| output.status.success() && !output.stdout.is_empty())
        .unwrap_or(false);

    if !configured {
        warn!("git user.email is not configured; baseline snapshot commits will fail");
    }
}
