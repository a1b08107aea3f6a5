//! Forward-only state machine over the lines of `git remote show` output.
//!
//! Each [Section] inspects the line under the cursor, records what it recognizes and reports
//! how many lines it consumed. Sections are visited in a fixed order and never revisited. When
//! the cursor runs past the last line, the description built so far is returned.

use super::{pull::PullSection, PushConfig, RemoteBranch, RemoteDescription};
use crate::errors::{RemoteShowError, RemoteShowResult};
use tracing::{debug, trace};

const REMOTE_HEADER: &str = "* remote ";
const NO_URL: &str = "(no URL)";
const PUSH_URL: &str = "Push";
const HEAD_BRANCH: &str = "HEAD";
const HEAD_AMBIGUOUS: &str = "ambiguous";
const REMOTE_BRANCHES: &str = "Remote branch";
const PULL_SECTION: &str = "configured for 'git pull'";
const PUSH_SECTION: &str = "configured for 'git push'";
const MIRROR: &str = "will be mirrored";
/// Every section following the remote branches begins with `Local ...`.
const LOCAL: &str = "Local";

/// The sections of `git remote show` output, in the order git prints them.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Section {
    FetchUrl,
    PushUrls,
    HeadBranch,
    RemoteBranches,
    Pull,
    Push,
}

/// The outcome of parsing one [Section].
struct Transition {
    /// The section to parse next, [None] when no further sections can follow.
    next: Option<Section>,
    /// The number of lines the section consumed.
    consumed: usize,
}

impl Transition {
    fn to(next: Section, consumed: usize) -> Self {
        Self {
            next: Some(next),
            consumed,
        }
    }

    fn done(consumed: usize) -> Self {
        Self {
            next: None,
            consumed,
        }
    }
}

/// Parses the complete output of `git remote show <remote>`.
pub(crate) fn parse(output: &str) -> RemoteShowResult<RemoteDescription> {
    let lines = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();

    let header = lines.first().copied().unwrap_or_default();
    let name = header
        .strip_prefix(REMOTE_HEADER)
        .ok_or_else(|| RemoteShowError::MissingHeader(header.to_string()))?;

    let mut remote = RemoteDescription {
        name: name.trim().to_string(),
        ..Default::default()
    };

    let mut cursor = 1;
    let mut section = Some(Section::FetchUrl);
    while let Some(current) = section {
        let Some(remaining) = lines.get(cursor..).filter(|rest| !rest.is_empty()) else {
            trace!(remote = %remote.name, section = ?current, "Reached end of output");
            break;
        };

        let transition = current.parse(remaining, &mut remote)?;
        trace!(
            remote = %remote.name,
            section = ?current,
            consumed = transition.consumed,
            "Parsed section"
        );

        cursor += transition.consumed;
        section = transition.next;
    }

    debug!(
        remote = %remote.name,
        remote_branches = remote.remote_branches.len(),
        pull_configs = remote.pull_configs.len(),
        push_configs = remote.push_configs.len(),
        is_mirror = remote.is_mirror,
        "Parsed `git remote show` output"
    );
    Ok(remote)
}

impl Section {
    /// Parses the section starting at `lines[0]`, which is guaranteed to exist.
    fn parse(self, lines: &[&str], remote: &mut RemoteDescription) -> RemoteShowResult<Transition> {
        let first = lines[0];
        let transition = match self {
            Self::FetchUrl => {
                if !first.contains(NO_URL) {
                    remote.fetch_url = Some(value_after_colon(first).to_string());
                }
                Transition::to(Self::PushUrls, 1)
            }
            Self::PushUrls => {
                let push_lines = lines
                    .iter()
                    .take_while(|line| line.starts_with(PUSH_URL))
                    .collect::<Vec<_>>();
                remote.push_urls = push_lines
                    .iter()
                    .filter(|line| !line.contains(NO_URL))
                    .map(|line| value_after_colon(line).to_string())
                    .collect();
                Transition::to(Self::HeadBranch, push_lines.len())
            }
            Self::HeadBranch => {
                if !first.starts_with(HEAD_BRANCH) {
                    return Ok(Transition::to(Self::RemoteBranches, 0));
                }

                // (not queried), (unknown), (remote HEAD is ambiguous, ...)
                if !first.contains('(') {
                    remote.head_branch = Some(value_after_colon(first).to_string());
                }

                if first.contains(HEAD_AMBIGUOUS) {
                    remote.head_candidates = lines[1..]
                        .iter()
                        .take_while(|line| !line.contains(char::is_whitespace))
                        .map(|line| line.to_string())
                        .collect();
                }
                Transition::to(Self::RemoteBranches, 1 + remote.head_candidates.len())
            }
            Self::RemoteBranches => {
                if !first.contains(REMOTE_BRANCHES) {
                    return Ok(Transition::to(Self::Pull, 0));
                }

                remote.remote_branches = lines[1..]
                    .iter()
                    .take_while(|line| !line.contains(LOCAL))
                    .map(|line| RemoteBranch::parse(line))
                    .collect();
                Transition::to(Self::Pull, 1 + remote.remote_branches.len())
            }
            Self::Pull => {
                if !first.contains(PULL_SECTION) {
                    return Ok(Transition::to(Self::Push, 0));
                }

                let mut pull = PullSection::default();
                let mut consumed = 1;
                for line in lines[1..].iter().take_while(|line| !line.contains(LOCAL)) {
                    pull.push_line(line)?;
                    consumed += 1;
                }
                remote.pull_configs = pull.finish();
                Transition::to(Self::Push, consumed)
            }
            Self::Push => {
                if first.contains(MIRROR) {
                    // git prints no push configuration for mirrors.
                    remote.is_mirror = true;
                    return Ok(Transition::done(lines.len()));
                }

                if first.contains(PUSH_SECTION) {
                    remote.push_configs = lines[1..]
                        .iter()
                        .map(|line| PushConfig::parse(line))
                        .collect::<RemoteShowResult<_>>()?;
                    return Ok(Transition::done(lines.len()));
                }

                Transition::done(0)
            }
        };

        Ok(transition)
    }
}

/// Returns the trimmed text after the first `:` of a `Key: value` line.
fn value_after_colon(line: &str) -> &str {
    line.split_once(':').map_or(line, |(_, value)| value).trim()
}

#[cfg(test)]
mod test {
    use super::parse;
    use crate::{
        errors::RemoteShowError,
        remote::{PullMode, PushStatus, RemoteBranchStatus},
    };

    const FULL: &str = "\
* remote jberger
  Fetch URL: https://github.com/bergerjac/gitextensions.git
  Push  URL: https://github.com/bergerjac/gitextensions.git
  HEAD branch: left-panel/-main
  Remote branches:
    LibGit2Sharp                 tracked
    LibGit2SharpRevisionGridTest tracked
    gone                         stale (use 'git remote prune' to remove)
    translationApp               new (next fetch will store in remotes/jberger)
  Local branches configured for 'git pull':
    left-panel/-main merges with remote left-panel/-main
                        and with remote master
    topic            rebases onto remote topic
  Local refs configured for 'git push':
    dir-plus-path-replace pushes to dir-plus-path-replace (up to date)
    left-panel/-main      pushes to left-panel/-main      (up to date)
    master                pushes to master                (fast-forwardable)
";

    #[test]
    fn parses_every_section() {
        let remote = parse(FULL).unwrap();

        assert_eq!(remote.name, "jberger");
        assert_eq!(
            remote.fetch_url.as_deref(),
            Some("https://github.com/bergerjac/gitextensions.git")
        );
        assert_eq!(
            remote.push_urls,
            ["https://github.com/bergerjac/gitextensions.git"]
        );
        assert_eq!(remote.head_branch.as_deref(), Some("left-panel/-main"));

        let statuses = remote
            .remote_branches
            .iter()
            .map(|b| (b.name.as_str(), b.status))
            .collect::<Vec<_>>();
        assert_eq!(
            statuses,
            [
                ("LibGit2Sharp", RemoteBranchStatus::Tracked),
                ("LibGit2SharpRevisionGridTest", RemoteBranchStatus::Tracked),
                ("gone", RemoteBranchStatus::Stale),
                ("translationApp", RemoteBranchStatus::New),
            ]
        );
        assert!(remote.is_new_branch("translationApp"));
        assert!(remote.is_stale_branch("gone"));

        assert_eq!(remote.pull_configs.len(), 2);
        let merge = remote.pull_config_for("left-panel/-main").unwrap();
        assert_eq!(merge.mode, PullMode::Merge);
        assert_eq!(merge.remote_branches, ["left-panel/-main", "master"]);
        assert!(remote.pull_config_for("topic").unwrap().mode.is_rebase());

        assert_eq!(remote.push_configs.len(), 3);
        assert_eq!(
            remote.push_config_for("master").unwrap().status,
            PushStatus::FastForwardable
        );
        assert!(!remote.is_mirror);
    }

    #[test]
    fn two_line_input_is_partial() {
        let remote = parse("* remote origin\n  Fetch URL: (no URL)\n").unwrap();

        assert_eq!(remote.name, "origin");
        assert_eq!(remote.fetch_url, None);
        assert!(remote.push_urls.is_empty());
        assert_eq!(remote.head_branch, None);
        assert!(remote.remote_branches.is_empty());
        assert!(remote.pull_configs.is_empty());
        assert!(remote.push_configs.is_empty());
        assert!(!remote.is_mirror);
    }

    #[test]
    fn missing_header_is_an_error() {
        assert_eq!(
            parse("Fetch URL: x"),
            Err(RemoteShowError::MissingHeader("Fetch URL: x".to_string()))
        );
        assert_eq!(parse(""), Err(RemoteShowError::MissingHeader(String::new())));
    }

    #[test]
    fn mirror_short_circuits_push_section() {
        let output = "\
* remote backup
  Fetch URL: /srv/git/backup.git
  Push  URL: /srv/git/backup.git
  HEAD branch: main
  Local refs will be mirrored by 'git push'
  Local refs configured for 'git push':
    main pushes to main (up to date)
";
        let remote = parse(output).unwrap();

        assert!(remote.is_mirror);
        assert!(remote.push_configs.is_empty());
        assert!(remote.remote_branches.is_empty());
        assert_eq!(remote.fetch_url.as_deref(), Some("/srv/git/backup.git"));
    }

    #[test]
    fn push_urls_without_url_are_consumed() {
        let output = "\
* remote fork
  Fetch URL: git@github.com:me/fork.git
  Push  URL: (no URL)
  Push  URL: git@github.com:me/fork.git
  HEAD branch: main
  Remote branch:
    main tracked
";
        let remote = parse(output).unwrap();

        assert_eq!(remote.fetch_url.as_deref(), Some("git@github.com:me/fork.git"));
        assert_eq!(remote.push_urls, ["git@github.com:me/fork.git"]);
        assert_eq!(remote.head_branch.as_deref(), Some("main"));
        assert_eq!(remote.remote_branches.len(), 1);
        assert!(remote.is_head(&remote.remote_branches[0]));
    }

    #[test]
    fn unqueried_output() {
        let output = "\
* remote origin
  Fetch URL: https://example.com/project.git
  Push  URL: https://example.com/project.git
  HEAD branch: (not queried)
  Remote branches: (status not queried)
    main
    topic
  Local branch configured for 'git pull':
    main merges with remote main
  Local ref configured for 'git push' (status not queried):
    (matching) pushes to (matching)
";
        let remote = parse(output).unwrap();

        assert_eq!(remote.head_branch, None);
        assert_eq!(remote.remote_branches.len(), 2);
        assert!(remote
            .remote_branches
            .iter()
            .all(|b| b.status == RemoteBranchStatus::Unknown));
        assert_eq!(remote.pull_configs.len(), 1);
        assert_eq!(remote.push_configs.len(), 1);
        assert_eq!(remote.push_configs[0].status, PushStatus::NotQueried);
    }

    #[test]
    fn ambiguous_head_lists_candidates() {
        let output = "\
* remote origin
  Fetch URL: https://example.com/project.git
  Push  URL: https://example.com/project.git
  HEAD branch (remote HEAD is ambiguous, may be one of the following):
    main
    master
  Remote branches:
    main   tracked
    master tracked
";
        let remote = parse(output).unwrap();

        assert_eq!(remote.head_branch, None);
        assert_eq!(remote.head_candidates, ["main", "master"]);
        assert_eq!(remote.remote_branches.len(), 2);
    }

    #[test]
    fn malformed_pull_line_is_an_error() {
        let output = "\
* remote origin
  Fetch URL: https://example.com/project.git
  Push  URL: https://example.com/project.git
  HEAD branch: main
  Local branch configured for 'git pull':
    main follows remote main
  Local refs configured for 'git push':
    main pushes to main (up to date)
";
        assert_eq!(
            parse(output),
            Err(RemoteShowError::MalformedPullLine(
                "main follows remote main".to_string()
            ))
        );
    }

    #[test]
    fn unknown_push_status_is_not_queried() {
        let output = "\
* remote origin
  Fetch URL: https://example.com/project.git
  Push  URL: https://example.com/project.git
  HEAD branch: main
  Local ref configured for 'git push':
    main pushes to main (something new)
";
        let remote = parse(output).unwrap();

        assert_eq!(remote.push_configs.len(), 1);
        assert_eq!(remote.push_configs[0].status, PushStatus::NotQueried);
        assert!(remote.pull_configs.is_empty());
    }
}
