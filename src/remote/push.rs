//! Local refs listed under `Local ref(s) configured for 'git push':`.

use crate::errors::{RemoteShowError, RemoteShowResult};
use serde::Serialize;
use std::fmt::{Display, Formatter};

const PUSHES_TO: &str = "pushes to";
const FORCES_TO: &str = "forces to";

/// The state of a remote branch compared to the local branch that pushes to it.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PushStatus {
    /// The remote was not queried, or the status was not recognized.
    #[default]
    NotQueried,
    /// The remote branch does not exist yet.
    Create,
    /// The remote branch will be deleted.
    Delete,
    /// The local branch is up-to-date with the remote branch.
    UpToDate,
    /// The remote branch may be fast-forwarded to the local branch.
    FastForwardable,
    /// The remote branch has commits the local branch lacks.
    LocalOutOfDate,
}

impl PushStatus {
    const VOCABULARY: [(&'static str, Self); 5] = [
        ("up to date", Self::UpToDate),
        ("fast-forwardable", Self::FastForwardable),
        ("local out of date", Self::LocalOutOfDate),
        ("create", Self::Create),
        ("delete", Self::Delete),
    ];

    /// Matches the text git prints in parentheses. Matching is exact and case-sensitive.
    fn parse(text: &str) -> Self {
        Self::VOCABULARY
            .iter()
            .find(|(word, _)| *word == text)
            .map(|(_, status)| *status)
            .unwrap_or_default()
    }

    /// Returns the text git prints for the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotQueried => "not queried",
            Self::Create => "create",
            Self::Delete => "delete",
            Self::UpToDate => "up to date",
            Self::FastForwardable => "fast-forwardable",
            Self::LocalOutOfDate => "local out of date",
        }
    }
}

impl Display for PushStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local ref that pushes to a remote branch through the remote's push refspec.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PushConfig {
    /// The local branch that pushes to `remote_branch`.
    pub local_branch: String,
    /// The remote branch that receives pushes from `local_branch`.
    pub remote_branch: String,
    /// The [PushStatus] of `remote_branch` compared to `local_branch`.
    pub status: PushStatus,
    /// Whether the refspec forces the update (`forces to`).
    pub forced: bool,
}

impl PushConfig {
    /// Parses a `<local> pushes to <remote> (<status>)` line.
    pub(crate) fn parse(line: &str) -> RemoteShowResult<Self> {
        let (local, rest, forced) = if let Some((local, rest)) = line.split_once(PUSHES_TO) {
            (local, rest, false)
        } else if let Some((local, rest)) = line.split_once(FORCES_TO) {
            (local, rest, true)
        } else {
            return Err(RemoteShowError::MalformedPushLine(line.to_string()));
        };

        let rest = rest.trim();
        let remote_branch = rest.split_whitespace().next().unwrap_or_default();
        let status = rest
            .rfind('(')
            .map(|i| rest[i + 1..].trim_end_matches(')'))
            .map(PushStatus::parse)
            .unwrap_or_default();

        Ok(Self {
            local_branch: local.trim().to_string(),
            remote_branch: remote_branch.to_string(),
            status,
            forced,
        })
    }
}

impl Display for PushConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Local '{}' {} '{}' ({})",
            self.local_branch,
            if self.forced { FORCES_TO } else { PUSHES_TO },
            self.remote_branch,
            self.status
        )
    }
}
