//! Utilities for interacting with `git` repositories for the `refscope` application.

use crate::constants::GIT_BINARY;
use anyhow::Result;
use git2::Repository;
use refscope::GitRef;
use std::{
    env,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    time::Duration,
};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, trace};

/// Errors raised when running the `git` binary.
#[derive(Error, Debug)]
pub enum GitCommandError {
    /// The process could not be spawned.
    #[error("failed to run `git`: {}", .0)]
    Spawn(#[from] std::io::Error),
    /// The process did not finish in time.
    #[error("`git {}` timed out after {}s", .args, .timeout.as_secs())]
    TimedOut { args: String, timeout: Duration },
    /// The process exited unsuccessfully.
    #[error("`git {}` failed ({}): {}", .args, .status, .stderr.trim())]
    Failed {
        args: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Returns the repository for the current working directory, and [None] if
/// the current working directory is not within a git repository or an error
/// occurs.
pub fn active_repository() -> Option<Repository> {
    Repository::discover(env::current_dir().ok()?).ok()
}

/// Extension trait for the [Repository] type to expose helper functions related to
/// listing remotes and refs.
pub trait RepositoryExt {
    /// Returns the directory `git` commands for the repository should run in.
    fn command_dir(&self) -> PathBuf;

    /// Returns the names of the configured remotes.
    fn remote_names(&self) -> Result<Vec<String>>;

    /// Lists every reference of the repository as a [GitRef].
    ///
    /// Annotated tags are listed twice, the second time with the peeled `^{}` suffix and the
    /// id of the commit they point to, mirroring `git show-ref -d`.
    fn list_refs(&self) -> Result<Vec<GitRef>>;
}

impl RepositoryExt for Repository {
    fn command_dir(&self) -> PathBuf {
        self.workdir().unwrap_or_else(|| self.path()).to_path_buf()
    }

    fn remote_names(&self) -> Result<Vec<String>> {
        Ok(self
            .remotes()?
            .iter()
            .flatten()
            .map(ToOwned::to_owned)
            .collect())
    }

    fn list_refs(&self) -> Result<Vec<GitRef>> {
        let remotes = self.remote_names()?;
        let mut refs = Vec::new();

        for reference in self.references()? {
            let reference = reference?;
            let Some(name) = reference.name() else {
                trace!("Skipping reference with a non UTF-8 name");
                continue;
            };
            let target = reference.target();
            refs.push(GitRef::from_listing(
                target.map(|oid| oid.to_string()),
                name,
                &remotes,
            ));

            if reference.is_tag() {
                if let Ok(commit) = reference.peel_to_commit() {
                    if Some(commit.id()) != target {
                        refs.push(GitRef::new(
                            Some(commit.id().to_string()),
                            format!("{}{}", name, refscope::refs::PEELED_TAG_SUFFIX),
                        ));
                    }
                }
            }
        }

        debug!(count = refs.len(), "Listed references");
        Ok(refs)
    }
}

/// Runs `git remote show [-n] <remote>` in `dir` and returns its standard output.
///
/// The command runs with `LC_ALL=C` so the output is not translated.
pub async fn remote_show(
    dir: &Path,
    remote: &str,
    query: bool,
    timeout: Duration,
) -> Result<String, GitCommandError> {
    let mut args = vec!["remote", "show"];
    if !query {
        args.push("-n");
    }
    args.push(remote);

    run(dir, &args, timeout).await
}

/// Runs `git` with the given arguments in `dir`, returning its standard output.
async fn run(dir: &Path, args: &[&str], timeout: Duration) -> Result<String, GitCommandError> {
    let joined = args.join(" ");
    debug!(dir = %dir.display(), args = %joined, "Running git");

    let output = Command::new(GIT_BINARY)
        .arg("-C")
        .arg(dir)
        .args(args)
        .env("LC_ALL", "C")
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(timeout, output)
        .await
        .map_err(|_| GitCommandError::TimedOut {
            args: joined.clone(),
            timeout,
        })??;

    if !output.status.success() {
        return Err(GitCommandError::Failed {
            args: joined,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
