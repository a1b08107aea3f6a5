//! Local branches listed under `Local branch(es) configured for 'git pull':`.
//!
//! git prints one line per rebasing branch, and for merging branches a first
//! `merges with remote` line followed by an `and with remote` line per additional upstream:
//!
//! ```text
//! main  rebases onto remote main
//! topic merges with remote topic
//!       and with remote main
//! ```

use crate::errors::{RemoteShowError, RemoteShowResult};
use serde::Serialize;
use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

const MERGES_WITH_REMOTE: &str = "merges with remote";
const AND_WITH_REMOTE: &str = "and with remote";
const WITH_REMOTE: &str = "with remote";

/// Rebase markers, longest first so the most specific one is matched.
const REBASE_MARKERS: [(&str, PullMode); 3] = [
    (
        "rebases interactively (with merges) onto remote",
        PullMode::InteractiveRebaseWithMerges,
    ),
    ("rebases interactively onto remote", PullMode::InteractiveRebase),
    ("rebases onto remote", PullMode::Rebase),
];

/// How a local branch integrates its upstream on `git pull`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PullMode {
    /// Merges with one or more remote branches.
    Merge,
    /// Rebases onto exactly one remote branch.
    Rebase,
    /// `pull.rebase = interactive`
    InteractiveRebase,
    /// `pull.rebase = merges`
    InteractiveRebaseWithMerges,
}

impl PullMode {
    /// Returns `true` for every rebasing mode.
    pub fn is_rebase(&self) -> bool {
        !matches!(self, Self::Merge)
    }
}

/// The pull configuration of a single local branch.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PullConfig {
    /// The local branch being pulled into.
    pub local_branch: String,
    /// The remote branches pulled from. Exactly one for rebasing modes.
    pub remote_branches: Vec<String>,
    /// The [PullMode] of the branch.
    pub mode: PullMode,
}

impl Display for PullConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (verb, preposition) = if self.mode.is_rebase() {
            ("rebases", "onto")
        } else {
            ("merges", "with")
        };
        let remote = match self.remote_branches.as_slice() {
            [single] => single.as_str(),
            _ => "(many)",
        };
        write!(
            f,
            "Local '{}' {} {} '{}'",
            self.local_branch, verb, preposition, remote
        )
    }
}

/// Accumulates the lines of the pull section, preserving the order in which git printed the
/// local branches.
#[derive(Default, Debug)]
pub(crate) struct PullSection {
    /// The configs in output order.
    configs: Vec<PullConfig>,
    /// Index into `configs` of each merging local branch.
    merge_groups: HashMap<String, usize>,
    /// Index into `configs` of the merge group that `and with remote` lines extend.
    open_group: Option<usize>,
}

impl PullSection {
    /// Feeds one line of the section.
    ///
    /// ## Returns
    /// - `Err(RemoteShowError::MalformedPullLine)` - The line is neither a rebase, merge nor
    ///   continuation line.
    /// - `Err(RemoteShowError::OrphanPullContinuation)` - A continuation line with no open merge.
    pub(crate) fn push_line(&mut self, line: &str) -> RemoteShowResult<()> {
        if let Some((marker, mode)) = REBASE_MARKERS.iter().find(|(m, _)| line.contains(m)) {
            self.configs.push(PullConfig {
                local_branch: local_branch(line),
                remote_branches: vec![remote_branch(line, marker)],
                mode: *mode,
            });
            self.open_group = None;
        } else if line.contains(MERGES_WITH_REMOTE) {
            let local = local_branch(line);
            let upstream = remote_branch(line, WITH_REMOTE);
            let index = match self.merge_groups.get(&local) {
                Some(&index) => index,
                None => {
                    self.configs.push(PullConfig {
                        local_branch: local.clone(),
                        remote_branches: Vec::new(),
                        mode: PullMode::Merge,
                    });
                    self.merge_groups.insert(local, self.configs.len() - 1);
                    self.configs.len() - 1
                }
            };
            self.configs[index].remote_branches.push(upstream);
            self.open_group = Some(index);
        } else if line.contains(AND_WITH_REMOTE) {
            let index = self
                .open_group
                .ok_or_else(|| RemoteShowError::OrphanPullContinuation(line.to_string()))?;
            self.configs[index]
                .remote_branches
                .push(remote_branch(line, WITH_REMOTE));
        } else {
            return Err(RemoteShowError::MalformedPullLine(line.to_string()));
        }
        Ok(())
    }

    /// Returns the accumulated configs.
    pub(crate) fn finish(self) -> Vec<PullConfig> {
        self.configs
    }
}

/// The local branch ends right before the first whitespace.
fn local_branch(line: &str) -> String {
    line.split_whitespace().next().unwrap_or_default().to_string()
}

/// The remote branch is everything after the last occurrence of `marker`.
fn remote_branch(line: &str, marker: &str) -> String {
    line.rfind(marker)
        .map(|i| line[i + marker.len()..].trim())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod test {
    use super::{PullMode, PullSection};
    use crate::errors::RemoteShowError;

    fn parse(lines: &[&str]) -> Result<Vec<super::PullConfig>, RemoteShowError> {
        let mut section = PullSection::default();
        for line in lines {
            section.push_line(line)?;
        }
        Ok(section.finish())
    }

    #[test]
    fn merge_continuations_are_grouped() {
        let configs = parse(&[
            "topic merges with remote A",
            "and with remote B",
            "and with remote C",
        ])
        .unwrap();

        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].local_branch, "topic");
        assert_eq!(configs[0].mode, PullMode::Merge);
        assert_eq!(configs[0].remote_branches, ["A", "B", "C"]);
    }

    #[test]
    fn output_order_is_preserved() {
        let configs = parse(&[
            "zeta  merges with remote zeta",
            "alpha rebases onto remote alpha",
            "mid   rebases interactively onto remote mid",
            "beta  merges with remote beta",
            "and with remote main",
        ])
        .unwrap();

        let locals = configs
            .iter()
            .map(|c| c.local_branch.as_str())
            .collect::<Vec<_>>();
        assert_eq!(locals, ["zeta", "alpha", "mid", "beta"]);
        assert_eq!(configs[1].mode, PullMode::Rebase);
        assert_eq!(configs[2].mode, PullMode::InteractiveRebase);
        assert_eq!(configs[3].remote_branches, ["beta", "main"]);
    }

    #[test]
    fn rebase_closes_open_merge_group() {
        let err = parse(&[
            "topic merges with remote topic",
            "main rebases onto remote main",
            "and with remote other",
        ])
        .unwrap_err();

        assert_eq!(
            err,
            RemoteShowError::OrphanPullContinuation("and with remote other".to_string())
        );
    }

    #[test]
    fn malformed_line_is_an_error() {
        let err = parse(&["main tracks remote main"]).unwrap_err();
        assert_eq!(
            err,
            RemoteShowError::MalformedPullLine("main tracks remote main".to_string())
        );
    }

    #[test]
    fn rebase_with_merges() {
        let configs =
            parse(&["main rebases interactively (with merges) onto remote trunk"]).unwrap();
        assert_eq!(configs[0].mode, PullMode::InteractiveRebaseWithMerges);
        assert_eq!(configs[0].remote_branches, ["trunk"]);
        assert_eq!(configs[0].to_string(), "Local 'main' rebases onto 'trunk'");
    }

    #[test]
    fn display_many_upstreams() {
        let configs = parse(&["topic merges with remote a", "and with remote b"]).unwrap();
        assert_eq!(configs[0].to_string(), "Local 'topic' merges with '(many)'");
    }
}
