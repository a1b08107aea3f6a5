//! Structured view of a single remote, reconstructed from `git remote show <remote>`.
//!
//! ```text
//! * remote origin
//!   Fetch URL: https://github.com/example/project.git
//!   Push  URL: https://github.com/example/project.git
//!   HEAD branch: main
//!   Remote branches:
//!     main    tracked
//!     release tracked
//!   Local branch configured for 'git pull':
//!     main merges with remote main
//!   Local refs configured for 'git push':
//!     main    pushes to main    (up to date)
//!     release pushes to release (fast-forwardable)
//! ```

use crate::errors::RemoteShowResult;
use serde::Serialize;

mod branch;
pub use branch::{RemoteBranch, RemoteBranchStatus};

mod pull;
pub use pull::{PullConfig, PullMode};

mod push;
pub use push::{PushConfig, PushStatus};

mod parser;

/// Everything `git remote show` reports about one remote.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RemoteDescription {
    /// The configured name of the remote.
    pub name: String,
    /// The URL the remote fetches from, [None] when git reports `(no URL)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_url: Option<String>,
    /// The URLs the remote pushes to.
    pub push_urls: Vec<String>,
    /// The default branch of the remote, [None] when not queried, unknown or ambiguous.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_branch: Option<String>,
    /// The branches git lists when the remote HEAD is ambiguous.
    pub head_candidates: Vec<String>,
    /// The branches on the remote.
    pub remote_branches: Vec<RemoteBranch>,
    /// The local branches configured for `git pull`, in the order git printed them.
    pub pull_configs: Vec<PullConfig>,
    /// The local refs configured for `git push`. Always empty when `is_mirror` is set.
    pub push_configs: Vec<PushConfig>,
    /// Whether `git push` mirrors every local ref to the remote.
    pub is_mirror: bool,
}

impl RemoteDescription {
    /// Parses the complete output of `git remote show <remote>`.
    ///
    /// Sections missing from the end of the output leave their fields empty; only a missing
    /// `* remote <name>` header or a malformed `git pull` / `git push` line is an error.
    pub fn parse(output: &str) -> RemoteShowResult<Self> {
        parser::parse(output)
    }

    /// Returns `true` if `branch` is the HEAD branch of the remote.
    pub fn is_head(&self, branch: &RemoteBranch) -> bool {
        self.head_branch.as_deref() == Some(branch.name.as_str())
    }

    /// Returns the remote branch with the given name.
    pub fn remote_branch(&self, name: &str) -> Option<&RemoteBranch> {
        self.remote_branches.iter().find(|b| b.name == name)
    }

    /// Returns `true` if the next fetch will create a remote-tracking ref for `name`.
    pub fn is_new_branch(&self, name: &str) -> bool {
        self.remote_branch(name)
            .is_some_and(|b| b.status == RemoteBranchStatus::New)
    }

    /// Returns `true` if `name` was removed from the remote but is still tracked locally.
    pub fn is_stale_branch(&self, name: &str) -> bool {
        self.remote_branch(name)
            .is_some_and(|b| b.status == RemoteBranchStatus::Stale)
    }

    /// Returns the pull configuration of a local branch.
    pub fn pull_config_for(&self, local_branch: &str) -> Option<&PullConfig> {
        self.pull_configs
            .iter()
            .find(|c| c.local_branch == local_branch)
    }

    /// Returns the push configuration of a local branch.
    pub fn push_config_for(&self, local_branch: &str) -> Option<&PushConfig> {
        self.push_configs
            .iter()
            .find(|c| c.local_branch == local_branch)
    }
}
