//! The subcommands for the `refscope` application.

use crate::ctx::ScopeContext;
use clap::Subcommand;

mod local;
use local::{RefsCmd, TrackCmd};

mod remote;
use remote::{ShowAllCmd, ShowCmd};

#[derive(Debug, Clone, Eq, PartialEq, Subcommand)]
pub enum Subcommands {
    /// Describe a remote: its URLs, HEAD branch, remote branches, and the pull and push configuration of local branches.
    #[clap(aliases = ["show", "s"])]
    Remote(ShowCmd),
    /// Describe every configured remote.
    #[clap(alias = "all")]
    Remotes(ShowAllCmd),
    /// List the references of the repository, with the upstream of each local branch.
    #[clap(aliases = ["l", "ls"])]
    Refs(RefsCmd),
    /// Configure the remote and upstream branch a local branch tracks.
    #[clap(alias = "t")]
    Track(TrackCmd),
}

impl Subcommands {
    /// Run the subcommand with the given context.
    pub async fn run(self, ctx: ScopeContext<'_>) -> anyhow::Result<()> {
        match self {
            Self::Remote(args) => args.run(ctx).await,
            Self::Remotes(args) => args.run(ctx).await,
            Self::Refs(args) => args.run(ctx),
            Self::Track(args) => args.run(ctx),
        }
    }
}
