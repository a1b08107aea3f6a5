//! `refs` subcommand.

use crate::{ctx::ScopeContext, git::RepositoryExt, settings::OutputFormat};
use anyhow::Result;
use clap::{Args, ValueEnum};
use refscope::{RefKind, RepoConfig};

/// The kinds of refs that can be listed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum KindArg {
    Head,
    Tag,
    Remote,
    Bisect,
    Other,
}

impl From<KindArg> for RefKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Head => RefKind::Head,
            KindArg::Tag => RefKind::Tag,
            KindArg::Remote => RefKind::RemoteTracking,
            KindArg::Bisect => RefKind::Bisect,
            KindArg::Other => RefKind::Other,
        }
    }
}

/// CLI arguments for the `refs` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct RefsCmd {
    /// Only list refs of this kind.
    #[clap(long, value_enum)]
    kind: Option<KindArg>,
    /// Output format, overriding the configured one.
    #[clap(long, value_enum)]
    format: Option<OutputFormat>,
}

impl RefsCmd {
    /// Run the `refs` subcommand.
    pub fn run(self, mut ctx: ScopeContext<'_>) -> Result<()> {
        if let Some(format) = self.format {
            ctx.settings.format = format;
        }

        let kind = self.kind.map(RefKind::from);
        let refs = ctx
            .repository
            .list_refs()?
            .into_iter()
            .filter(|r| kind.map_or(true, |k| r.kind() == k))
            .collect::<Vec<_>>();

        // Resolve every branch against one consistent view of the configuration.
        let snapshot = RepoConfig::new(ctx.repository).snapshot()?;
        ctx.print_refs(&refs, &snapshot)
    }
}
