//! Remote branches listed under `Remote branches:`.

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// The state of a branch on the remote, relative to the local remote-tracking refs.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoteBranchStatus {
    /// No status was reported, or it was not recognized.
    #[default]
    Unknown,
    /// The branch is being tracked.
    Tracked,
    /// The branch was removed from the remote but is still available in `remotes/<remote>`.
    Stale,
    /// The next fetch will store the branch in `remotes/<remote>`.
    New,
}

impl RemoteBranchStatus {
    const KNOWN: [(&'static str, Self); 3] = [
        ("tracked", Self::Tracked),
        ("stale", Self::Stale),
        ("new", Self::New),
    ];

    /// Matches the status text that follows a branch name, e.g.
    /// `stale (use 'git remote prune' to remove)`.
    fn parse(text: &str) -> Self {
        let text = text.trim().to_lowercase();
        Self::KNOWN
            .iter()
            .find(|(word, _)| text.starts_with(word))
            .map(|(_, status)| *status)
            .unwrap_or_default()
    }
}

impl Display for RemoteBranchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A branch that exists on (or is about to be fetched from) the remote.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RemoteBranch {
    /// The name of the branch on the remote.
    pub name: String,
    /// The [RemoteBranchStatus] of the branch.
    pub status: RemoteBranchStatus,
}

impl RemoteBranch {
    /// Parses a `<name> <status>` line. A line holding only a name (as printed when the
    /// remote was not queried) has [RemoteBranchStatus::Unknown].
    pub(crate) fn parse(line: &str) -> Self {
        match line.split_once(char::is_whitespace) {
            Some((name, status)) => Self {
                name: name.to_string(),
                status: RemoteBranchStatus::parse(status),
            },
            None => Self {
                name: line.to_string(),
                status: RemoteBranchStatus::Unknown,
            },
        }
    }
}

impl Display for RemoteBranch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.status)
    }
}
