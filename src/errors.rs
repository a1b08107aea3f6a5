//! Error types for the `refscope` parsers and configuration accessors.

use thiserror::Error;

/// Errors raised while reconstructing a [RemoteDescription] from `git remote show` output.
///
/// Every variant carries the offending line so the raw tool output can be diagnosed.
///
/// [RemoteDescription]: crate::remote::RemoteDescription
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RemoteShowError {
    /// The first line is not a `* remote <name>` header.
    #[error("expected a `* remote <name>` header, got `{0}`")]
    MissingHeader(String),
    /// A line in the `git pull` section matched none of the rebase, merge or continuation forms.
    #[error("could not parse 'git pull' branch line `{0}`")]
    MalformedPullLine(String),
    /// An `and with remote` line appeared without a preceding `merges with remote` line.
    #[error("'git pull' continuation line `{0}` has no preceding merge line")]
    OrphanPullContinuation(String),
    /// A line in the `git push` section has no `pushes to` or `forces to` marker.
    #[error("could not parse 'git push' ref line `{0}`")]
    MalformedPushLine(String),
}

/// Errors raised when deriving names from a [GitRef].
///
/// [GitRef]: crate::refs::GitRef
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RefError {
    /// The remote-tracking ref was built without a remote name.
    #[error("remote-tracking ref `{0}` has no remote name")]
    MissingRemote(String),
    /// The short name of a remote-tracking ref does not begin with `<remote>/`.
    #[error("remote-tracking ref `{short_name}` does not belong to remote `{remote}`")]
    RemoteMismatch { short_name: String, remote: String },
}

/// Errors raised by a [ConfigStore] write.
///
/// [ConfigStore]: crate::config::ConfigStore
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A [git2::Error] occurred.
    #[error("libgit2 error: {}", .0)]
    Git2(#[from] git2::Error),
}

pub type RemoteShowResult<T> = Result<T, RemoteShowError>;
pub type RefResult<T> = Result<T, RefError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
