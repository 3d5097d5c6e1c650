//! # Workspace Manager
//!
//! Wraps the version-control operations performed on one repository's
//! working copy: shallow clone, commit-all, selective checkout of a prior
//! revision, stage-all, and prefixed diff computation.
//!
//! This uses the system git command, which automatically handles SSH keys,
//! credential helpers and anything else configured in the environment.
//! Commit identity (user.name/user.email) is likewise taken from the
//! environment — the harness assumes it is preconfigured and never sets it.
//!
//! Every operation is scoped to an explicit `Workspace` handle instead of the
//! process-wide current directory, so no code path ever has to "change
//! directory and change back" and a failure in one repository cannot leave
//! the process stranded inside its working copy.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Handle to one repository's working copy on disk.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Shallow-clone `url` into `<parent>/<name>`, replacing any workspace
    /// directory left behind by a previous run.
    ///
    /// Exactly one workspace directory exists per repository at a time.
    pub fn clone(parent: &Path, name: &str, url: &str) -> Result<Workspace> {
        let root = parent.join(name);

        // git won't clone into an existing non-empty directory
        if root.exists() {
            fs::remove_dir_all(&root)?;
        }
        fs::create_dir_all(parent)?;

        let output = Command::new("git")
            .args(["clone", "--depth=1", url, name])
            .current_dir(parent)
            .output()
            .map_err(|e| Error::Clone {
                url: url.to_string(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Clone {
                url: url.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(Workspace { root })
    }

    /// The working copy's root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Stage and commit all working-tree changes, allowing an empty commit
    /// and bypassing pre-commit hooks.
    pub fn commit_all(&self, message: &str) -> Result<()> {
        let add = self.git(&["add", "-A"])?;
        if !add.status.success() {
            return Err(Error::Commit {
                stderr: String::from_utf8_lossy(&add.stderr).to_string(),
            });
        }

        let commit = self.git(&["commit", "--allow-empty", "--no-verify", "-m", message])?;
        if !commit.status.success() {
            return Err(Error::Commit {
                stderr: String::from_utf8_lossy(&commit.stderr).to_string(),
            });
        }

        Ok(())
    }

    /// Check `paths` out of `revision` into the index and working tree,
    /// discarding whatever edits are currently on disk for those paths.
    pub fn restore_paths(&self, revision: &str, paths: &[&str]) -> Result<()> {
        let mut args = vec!["checkout", revision, "--"];
        args.extend_from_slice(paths);

        let output = self.git(&args)?;
        if !output.status.success() {
            return Err(Error::Restore {
                revision: revision.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(())
    }

    /// Add all changes to the index without committing.
    pub fn stage_all(&self) -> Result<()> {
        let output = self.git(&["add", "-A"])?;
        if !output.status.success() {
            return Err(Error::Stage {
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(())
    }

    /// Unified diff of the working tree against the index, with custom path
    /// prefixes. Empty string when there are no changes.
    pub fn diff_worktree(&self, src_prefix: &str, dst_prefix: &str) -> Result<String> {
        self.diff(&[
            "diff",
            &format!("--src-prefix={src_prefix}"),
            &format!("--dst-prefix={dst_prefix}"),
        ])
    }

    /// Unified diff of the index against `base_revision`, with custom path
    /// prefixes. Used after `stage_all`, so the staged tree is compared
    /// without needing a second commit.
    pub fn diff_staged(
        &self,
        base_revision: &str,
        src_prefix: &str,
        dst_prefix: &str,
    ) -> Result<String> {
        self.diff(&[
            "diff",
            "--cached",
            base_revision,
            &format!("--src-prefix={src_prefix}"),
            &format!("--dst-prefix={dst_prefix}"),
        ])
    }

    fn diff(&self, args: &[&str]) -> Result<String> {
        let output = self.git(args)?;
        if !output.status.success() {
            return Err(Error::Git {
                command: "diff".to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn git(&self, args: &[&str]) -> Result<std::process::Output> {
        Ok(Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    /// Point GIT_CONFIG_GLOBAL at a throwaway identity so commits made inside
    /// cloned workspaces succeed regardless of the host configuration.
    fn with_test_identity(temp_dir: &TempDir) {
        let config = temp_dir.path().join("gitconfig");
        fs::write(
            &config,
            "[user]\n\tname = repo-compare tests\n\temail = tests@example.com\n",
        )
        .unwrap();
        std::env::set_var("GIT_CONFIG_GLOBAL", &config);
        std::env::set_var("GIT_CONFIG_NOSYSTEM", "1");
    }

    /// Create an origin repository with one commit containing `files`.
    fn init_origin(parent: &Path, files: &[(&str, &str)]) -> String {
        let origin = parent.join("origin");
        fs::create_dir_all(&origin).unwrap();

        let git = |args: &[&str]| {
            let output = Command::new("git")
                .args(args)
                .current_dir(&origin)
                .output()
                .unwrap();
            assert!(
                output.status.success(),
                "git {:?}: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        };

        git(&["init", "--initial-branch=main"]);
        for (path, content) in files {
            fs::write(origin.join(path), content).unwrap();
        }
        git(&["add", "-A"]);
        git(&["commit", "--no-verify", "-m", "initial"]);

        format!("file://{}", origin.display())
    }

    #[test]
    #[serial]
    fn test_clone_creates_workspace() {
        let temp_dir = TempDir::new().unwrap();
        with_test_identity(&temp_dir);
        let url = init_origin(temp_dir.path(), &[("init.lua", "return 1\n")]);

        let ws = Workspace::clone(temp_dir.path(), "sample", &url).unwrap();
        assert!(ws.path().join(".git").exists());
        assert_eq!(
            fs::read_to_string(ws.path().join("init.lua")).unwrap(),
            "return 1\n"
        );
    }

    #[test]
    #[serial]
    fn test_clone_replaces_stale_workspace() {
        let temp_dir = TempDir::new().unwrap();
        with_test_identity(&temp_dir);
        let url = init_origin(temp_dir.path(), &[("init.lua", "return 1\n")]);

        let stale = temp_dir.path().join("sample");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("leftover.txt"), "old run").unwrap();

        let ws = Workspace::clone(temp_dir.path(), "sample", &url).unwrap();
        assert!(!ws.path().join("leftover.txt").exists());
        assert!(ws.path().join("init.lua").exists());
    }

    #[test]
    #[serial]
    fn test_clone_failure_reports_url() {
        let temp_dir = TempDir::new().unwrap();
        let bad = format!("file://{}/does-not-exist", temp_dir.path().display());

        let err = Workspace::clone(temp_dir.path(), "sample", &bad).unwrap_err();
        match err {
            Error::Clone { url, stderr } => {
                assert_eq!(url, bad);
                assert!(!stderr.is_empty());
            }
            other => panic!("expected Clone error, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_commit_all_allows_empty_commit() {
        let temp_dir = TempDir::new().unwrap();
        with_test_identity(&temp_dir);
        let url = init_origin(temp_dir.path(), &[("init.lua", "return 1\n")]);

        let ws = Workspace::clone(temp_dir.path(), "sample", &url).unwrap();
        // No working-tree changes at all; the commit must still succeed.
        ws.commit_all("base").unwrap();

        let diff = ws.diff_worktree("a/", "b/").unwrap();
        assert_eq!(diff, "");
    }

    #[test]
    #[serial]
    fn test_restore_paths_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        with_test_identity(&temp_dir);
        let url = init_origin(temp_dir.path(), &[("init.lua", "return 1\n")]);

        let ws = Workspace::clone(temp_dir.path(), "sample", &url).unwrap();
        fs::write(ws.path().join("init.lua"), "return 2\n").unwrap();
        ws.commit_all("base").unwrap();

        ws.restore_paths("HEAD~1", &["."]).unwrap();
        assert_eq!(
            fs::read_to_string(ws.path().join("init.lua")).unwrap(),
            "return 1\n"
        );
    }

    #[test]
    #[serial]
    fn test_diff_worktree_uses_prefixes() {
        let temp_dir = TempDir::new().unwrap();
        with_test_identity(&temp_dir);
        let url = init_origin(temp_dir.path(), &[("init.lua", "return 1\n")]);

        let ws = Workspace::clone(temp_dir.path(), "sample", &url).unwrap();
        ws.commit_all("base").unwrap();
        fs::write(ws.path().join("init.lua"), "return 2\n").unwrap();

        let diff = ws.diff_worktree("ORI/sample/", "ALT/sample/").unwrap();
        assert!(diff.contains("ORI/sample/init.lua"));
        assert!(diff.contains("ALT/sample/init.lua"));
        assert!(diff.contains("-return 1"));
        assert!(diff.contains("+return 2"));
    }

    #[test]
    #[serial]
    fn test_diff_staged_compares_index_against_revision() {
        let temp_dir = TempDir::new().unwrap();
        with_test_identity(&temp_dir);
        let url = init_origin(temp_dir.path(), &[("init.lua", "return 1\n")]);

        let ws = Workspace::clone(temp_dir.path(), "sample", &url).unwrap();
        fs::write(ws.path().join("init.lua"), "return 2\n").unwrap();
        ws.commit_all("base").unwrap();

        ws.restore_paths("HEAD~1", &["."]).unwrap();
        fs::write(ws.path().join("init.lua"), "return 3\n").unwrap();
        ws.stage_all().unwrap();

        let diff = ws.diff_staged("HEAD~1", "ORI/sample/", "ALT/sample/").unwrap();
        // The baseline edit (return 2) must be invisible here.
        assert!(diff.contains("-return 1"));
        assert!(diff.contains("+return 3"));
        assert!(!diff.contains("return 2"));
    }

    #[test]
    #[serial]
    fn test_diff_staged_includes_new_files() {
        let temp_dir = TempDir::new().unwrap();
        with_test_identity(&temp_dir);
        let url = init_origin(temp_dir.path(), &[("init.lua", "return 1\n")]);

        let ws = Workspace::clone(temp_dir.path(), "sample", &url).unwrap();
        ws.commit_all("base").unwrap();

        ws.restore_paths("HEAD~1", &["."]).unwrap();
        fs::write(ws.path().join("extra.lua"), "return 4\n").unwrap();
        ws.stage_all().unwrap();

        let diff = ws.diff_staged("HEAD~1", "ORI/sample/", "ALT/sample/").unwrap();
        assert!(diff.contains("ALT/sample/extra.lua"));
        assert!(diff.contains("+return 4"));
    }
}
