//! Typed representation of fully-qualified git reference names.
//!
//! A [GitRef] is built from a ref path as reported by a listing operation (`refs/heads/main`,
//! `refs/tags/v1.0^{}`, `refs/remotes/origin/main`, ...). The path is classified into a
//! [RefKind] by its leading segments, and a kind-specific short name is derived from it.

use crate::{
    config::{ConfigLookup, ConfigStore},
    errors::{ConfigResult, RefError, RefResult},
};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// The prefix of local branch refs.
pub const HEADS_PREFIX: &str = "refs/heads/";
/// The prefix of tag refs.
pub const TAGS_PREFIX: &str = "refs/tags/";
/// The prefix of remote-tracking refs.
pub const REMOTES_PREFIX: &str = "refs/remotes/";
/// The suffix appended to an annotated tag to denote the commit it points to.
pub const PEELED_TAG_SUFFIX: &str = "^{}";

const REFS_PREFIX: &str = "refs/";

/// The kind of a [GitRef].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefKind {
    /// `refs/tags/*`
    Tag,
    /// `refs/heads/*`
    Head,
    /// `refs/remotes/*`
    RemoteTracking,
    /// `refs/bisect/*`
    Bisect,
    /// Anything else, including `HEAD`, `refs/stash` and custom namespaces.
    Other,
}

impl RefKind {
    /// Classifies a complete ref path by its leading `refs/<namespace>` segments.
    ///
    /// Only the start of the path is inspected, so `refs/my-tags-archive/x` or
    /// `refs/notes/heads/x` are [RefKind::Other].
    pub fn classify(complete_name: &str) -> Self {
        let mut segments = complete_name.split('/');
        let (Some("refs"), Some(namespace), Some(_)) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Self::Other;
        };

        match namespace {
            "tags" => Self::Tag,
            "heads" => Self::Head,
            "remotes" => Self::RemoteTracking,
            "bisect" => Self::Bisect,
            _ => Self::Other,
        }
    }
}

impl Display for RefKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Tag => "tag",
            Self::Head => "head",
            Self::RemoteTracking => "remote",
            Self::Bisect => "bisect",
            Self::Other => "other",
        };
        f.pad(s)
    }
}

/// A parsed git reference.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitRef {
    /// The object id the ref points to, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    oid: Option<String>,
    /// The full path of the ref, as reported by git.
    complete_name: String,
    /// The kind of the ref.
    kind: RefKind,
    /// The remote a remote-tracking ref belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    remote: Option<String>,
    /// The name with its kind-specific prefix removed.
    short_name: String,
}

impl GitRef {
    /// Creates a new [GitRef] from a complete ref path.
    pub fn new(oid: Option<String>, complete_name: impl Into<String>) -> Self {
        Self::build(oid, complete_name.into(), None)
    }

    /// Creates a new remote-tracking [GitRef], attributing it to `remote`.
    ///
    /// The remote name is only recorded when the path is actually a remote-tracking ref.
    pub fn with_remote(
        oid: Option<String>,
        complete_name: impl Into<String>,
        remote: impl Into<String>,
    ) -> Self {
        Self::build(oid, complete_name.into(), Some(remote.into()))
    }

    /// Creates a [GitRef] from a ref listing, picking the remote of a remote-tracking ref from
    /// the known `remotes`.
    ///
    /// Remote names may contain `/`, so the longest remote whose name prefixes the short name
    /// (followed by `/`) wins.
    pub fn from_listing<S: AsRef<str>>(
        oid: Option<String>,
        complete_name: impl Into<String>,
        remotes: &[S],
    ) -> Self {
        let complete_name = complete_name.into();
        let remote = complete_name.strip_prefix(REMOTES_PREFIX).and_then(|rest| {
            remotes
                .iter()
                .map(AsRef::as_ref)
                .filter(|remote| {
                    rest.strip_prefix(remote)
                        .is_some_and(|tail| tail.starts_with('/'))
                })
                .max_by_key(|remote| remote.len())
                .map(ToOwned::to_owned)
        });
        Self::build(oid, complete_name, remote)
    }

    /// Creates a local branch ref, `refs/heads/<name>`.
    pub fn branch(oid: Option<String>, name: &str) -> Self {
        Self::new(oid, format!("{}{}", HEADS_PREFIX, name))
    }

    /// The ref used when no branch is checked out.
    pub fn no_head() -> Self {
        Self::new(None, "")
    }

    /// The ref that stands for every local branch.
    pub fn all_heads() -> Self {
        Self::new(None, "*")
    }

    fn build(oid: Option<String>, complete_name: String, remote: Option<String>) -> Self {
        let kind = RefKind::classify(&complete_name);
        let short_name = short_name(&complete_name, kind).to_string();
        let remote = remote.filter(|_| kind == RefKind::RemoteTracking);

        Self {
            oid,
            complete_name,
            kind,
            remote,
            short_name,
        }
    }

    /// Returns the object id the ref points to.
    pub fn oid(&self) -> Option<&str> {
        self.oid.as_deref()
    }

    /// Returns the full path of the ref.
    pub fn complete_name(&self) -> &str {
        &self.complete_name
    }

    /// Returns the [RefKind] of the ref.
    pub fn kind(&self) -> RefKind {
        self.kind
    }

    /// Returns the remote of a remote-tracking ref.
    pub fn remote(&self) -> Option<&str> {
        self.remote.as_deref()
    }

    /// Returns the short name, e.g. `main`, `v1.0` or `origin/main`.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn is_head(&self) -> bool {
        self.kind == RefKind::Head
    }

    pub fn is_tag(&self) -> bool {
        self.kind == RefKind::Tag
    }

    pub fn is_remote(&self) -> bool {
        self.kind == RefKind::RemoteTracking
    }

    pub fn is_bisect(&self) -> bool {
        self.kind == RefKind::Bisect
    }

    /// Returns `true` if the ref is neither a local branch, a remote-tracking ref nor a tag.
    pub fn is_other(&self) -> bool {
        !self.is_head() && !self.is_remote() && !self.is_tag()
    }

    /// Returns the branch name without the remote, e.g. `feature/x` for
    /// `refs/remotes/origin/feature/x`.
    ///
    /// ## Returns
    /// - `Ok(name)` - The local name. For refs that are not remote-tracking, the short name.
    /// - `Err(RefError::MissingRemote)` - The remote-tracking ref has no remote.
    /// - `Err(RefError::RemoteMismatch)` - The short name does not start with `<remote>/`.
    pub fn local_name(&self) -> RefResult<&str> {
        if !self.is_remote() {
            return Ok(&self.short_name);
        }

        let remote = self
            .remote
            .as_deref()
            .ok_or_else(|| RefError::MissingRemote(self.complete_name.clone()))?;

        self.short_name
            .strip_prefix(remote)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| RefError::RemoteMismatch {
                short_name: self.short_name.clone(),
                remote: remote.to_string(),
            })
    }

    /// Returns the configuration key holding the remote a branch tracks.
    pub fn remote_setting_name(branch: &str) -> String {
        format!("branch.{}.remote", branch)
    }

    /// Returns the configuration key holding the upstream branch a branch merges with.
    pub fn merge_setting_name(branch: &str) -> String {
        format!("branch.{}.merge", branch)
    }

    /// Reads the remote this branch tracks from `config`.
    ///
    /// The value is never cached; every call performs a fresh lookup.
    pub fn tracking_remote(&self, config: &impl ConfigLookup) -> Option<String> {
        config.get(&Self::remote_setting_name(&self.short_name))
    }

    /// Reads the upstream branch this branch merges with from `config`, without its
    /// `refs/heads/` prefix.
    pub fn merge_with(&self, config: &impl ConfigLookup) -> Option<String> {
        config
            .get(&Self::merge_setting_name(&self.short_name))
            .map(|merge| match merge.strip_prefix(HEADS_PREFIX) {
                Some(stripped) => stripped.to_string(),
                None => merge,
            })
    }

    /// Sets (or, when `remote` is empty or [None], removes) the remote this branch tracks.
    ///
    /// If the branch has no merge target yet, it is configured to merge with the remote branch
    /// of the same name.
    pub fn set_tracking_remote(
        &self,
        config: &mut impl ConfigStore,
        remote: Option<&str>,
    ) -> ConfigResult<()> {
        let key = Self::remote_setting_name(&self.short_name);
        match remote.filter(|r| !r.is_empty()) {
            None => config.unset(&key),
            Some(remote) => {
                config.set(&key, remote)?;
                if self.merge_with(&*config).unwrap_or_default().is_empty() {
                    self.set_merge_with(config, Some(&self.short_name))?;
                }
                Ok(())
            }
        }
    }

    /// Sets (or, when `branch` is empty or [None], removes) the upstream branch this branch
    /// merges with.
    pub fn set_merge_with(
        &self,
        config: &mut impl ConfigStore,
        branch: Option<&str>,
    ) -> ConfigResult<()> {
        let key = Self::merge_setting_name(&self.short_name);
        match branch.filter(|b| !b.is_empty()) {
            None => config.unset(&key),
            Some(branch) => config.set(&key, &format!("{}{}", HEADS_PREFIX, branch)),
        }
    }
}

impl Display for GitRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.complete_name)
    }
}

/// Derives the short name of a ref of the given kind.
fn short_name(complete_name: &str, kind: RefKind) -> &str {
    match kind {
        RefKind::RemoteTracking => &complete_name[REMOTES_PREFIX.len()..],
        RefKind::Tag => {
            let name = complete_name
                .strip_suffix(PEELED_TAG_SUFFIX)
                .unwrap_or(complete_name);
            &name[TAGS_PREFIX.len()..]
        }
        RefKind::Head => &complete_name[HEADS_PREFIX.len()..],
        // A `/` is not necessarily a hierarchy separator for unknown namespaces.
        RefKind::Bisect | RefKind::Other => complete_name
            .strip_prefix(REFS_PREFIX)
            .unwrap_or(complete_name),
    }
}

#[cfg(test)]
mod test {
    use super::{GitRef, RefKind};
    use crate::errors::RefError;
    use std::collections::HashMap;

    #[test]
    fn classifies_by_leading_segments() {
        let cases = [
            ("refs/heads/main", RefKind::Head, "main"),
            ("refs/heads/feature/x", RefKind::Head, "feature/x"),
            ("refs/tags/v1.0", RefKind::Tag, "v1.0"),
            ("refs/remotes/origin/main", RefKind::RemoteTracking, "origin/main"),
            ("refs/bisect/bad", RefKind::Bisect, "bisect/bad"),
            ("refs/stash", RefKind::Other, "stash"),
            ("refs/notes/commits", RefKind::Other, "notes/commits"),
            ("HEAD", RefKind::Other, "HEAD"),
        ];

        for (name, kind, short) in cases {
            let git_ref = GitRef::new(None, name);
            assert_eq!(git_ref.kind(), kind, "{}", name);
            assert_eq!(git_ref.short_name(), short, "{}", name);
        }
    }

    #[test]
    fn embedded_namespace_words_are_other() {
        let archive = GitRef::new(None, "refs/my-tags-archive/x");
        assert_eq!(archive.kind(), RefKind::Other);
        assert_eq!(archive.short_name(), "my-tags-archive/x");

        let nested = GitRef::new(None, "refs/notes/heads/x");
        assert_eq!(nested.kind(), RefKind::Other);

        let branch_named_tags = GitRef::new(None, "refs/heads/refs/tags/x");
        assert_eq!(branch_named_tags.kind(), RefKind::Head);
        assert_eq!(branch_named_tags.short_name(), "refs/tags/x");
    }

    #[test]
    fn peeled_tag_marker_is_trimmed() {
        let peeled = GitRef::new(Some("abc".to_string()), "refs/tags/v1.0^{}");
        let plain = GitRef::new(Some("abc".to_string()), "refs/tags/v1.0");

        assert_eq!(peeled.kind(), RefKind::Tag);
        assert_eq!(peeled.short_name(), "v1.0");
        assert_eq!(plain.short_name(), peeled.short_name());
        assert_eq!(peeled.complete_name(), "refs/tags/v1.0^{}");
    }

    #[test]
    fn remote_tracking_local_name() {
        let git_ref = GitRef::with_remote(None, "refs/remotes/origin/feature/x", "origin");

        assert_eq!(git_ref.short_name(), "origin/feature/x");
        assert_eq!(git_ref.remote(), Some("origin"));
        assert_eq!(git_ref.local_name().unwrap(), "feature/x");
    }

    #[test]
    fn local_name_errors_for_unknown_remote() {
        let missing = GitRef::new(None, "refs/remotes/origin/main");
        assert!(matches!(
            missing.local_name(),
            Err(RefError::MissingRemote(_))
        ));

        let mismatched = GitRef::with_remote(None, "refs/remotes/origin/main", "orig");
        assert_eq!(
            mismatched.local_name(),
            Err(RefError::RemoteMismatch {
                short_name: "origin/main".to_string(),
                remote: "orig".to_string(),
            })
        );
    }

    #[test]
    fn remote_hint_ignored_for_non_remote_refs() {
        let git_ref = GitRef::with_remote(None, "refs/heads/main", "origin");
        assert_eq!(git_ref.remote(), None);
        assert_eq!(git_ref.local_name().unwrap(), "main");
    }

    #[test]
    fn listing_picks_longest_matching_remote() {
        let remotes = ["origin", "origin/mirror", "up"];

        let git_ref = GitRef::from_listing(None, "refs/remotes/origin/mirror/main", &remotes);
        assert_eq!(git_ref.remote(), Some("origin/mirror"));
        assert_eq!(git_ref.local_name().unwrap(), "main");

        let upstream = GitRef::from_listing(None, "refs/remotes/upstream/main", &remotes);
        assert_eq!(upstream.remote(), None);
    }

    #[test]
    fn sentinel_refs() {
        assert!(GitRef::no_head().is_other());
        assert_eq!(GitRef::no_head().short_name(), "");
        assert_eq!(GitRef::all_heads().short_name(), "*");

        let branch = GitRef::branch(None, "topic");
        assert_eq!(branch.complete_name(), "refs/heads/topic");
        assert!(branch.is_head());
    }

    #[test]
    fn tracking_config_is_read_on_demand() {
        let git_ref = GitRef::branch(None, "main");
        let mut config: HashMap<String, String> = HashMap::new();

        assert_eq!(git_ref.tracking_remote(&config), None);

        config.insert("branch.main.remote".to_string(), "origin".to_string());
        config.insert("branch.main.merge".to_string(), "refs/heads/trunk".to_string());

        assert_eq!(git_ref.tracking_remote(&config).as_deref(), Some("origin"));
        assert_eq!(git_ref.merge_with(&config).as_deref(), Some("trunk"));
    }

    #[test]
    fn setting_tracking_remote_defaults_merge_target() {
        let git_ref = GitRef::branch(None, "topic");
        let mut config: HashMap<String, String> = HashMap::new();

        git_ref.set_tracking_remote(&mut config, Some("origin")).unwrap();
        assert_eq!(config["branch.topic.remote"], "origin");
        assert_eq!(config["branch.topic.merge"], "refs/heads/topic");

        git_ref.set_merge_with(&mut config, Some("main")).unwrap();
        git_ref.set_tracking_remote(&mut config, Some("upstream")).unwrap();
        assert_eq!(git_ref.merge_with(&config).as_deref(), Some("main"));

        git_ref.set_tracking_remote(&mut config, None).unwrap();
        git_ref.set_merge_with(&mut config, Some("")).unwrap();
        assert!(config.is_empty());
    }
}
