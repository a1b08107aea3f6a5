//! `track` subcommand.

use crate::{ctx::ScopeContext, git::RepositoryExt};
use anyhow::{bail, Result};
use clap::Args;
use git2::BranchType;
use nu_ansi_term::Color;
use refscope::{GitRef, RepoConfig};
use tracing::info;

/// CLI arguments for the `track` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct TrackCmd {
    /// Name of the local branch to configure.
    #[clap(index = 1)]
    branch_name: String,
    /// Remote the branch tracks. Prompts for one when neither this nor `--merge` is given.
    #[clap(long)]
    remote: Option<String>,
    /// Upstream branch the branch merges with.
    #[clap(long)]
    merge: Option<String>,
    /// Remove the tracking configuration instead.
    #[clap(long, conflicts_with_all = ["remote", "merge"])]
    unset: bool,
}

impl TrackCmd {
    /// Run the `track` subcommand.
    pub fn run(self, ctx: ScopeContext<'_>) -> Result<()> {
        // Ensure the branch exists locally.
        ctx.repository
            .find_branch(&self.branch_name, BranchType::Local)?;

        let branch = GitRef::branch(None, &self.branch_name);
        let mut config = RepoConfig::new(ctx.repository);

        if self.unset {
            branch.set_tracking_remote(&mut config, None)?;
            branch.set_merge_with(&mut config, None)?;
            println!(
                "Branch `{}` no longer tracks a remote.",
                Color::Green.paint(&self.branch_name)
            );
            return Ok(());
        }

        let remote = match (self.remote, &self.merge) {
            (Some(remote), _) => Some(remote),
            (None, Some(_)) => None,
            (None, None) => Some(ctx.select_remote(&format!(
                "Select the remote `{}` tracks",
                Color::Green.paint(&self.branch_name)
            ))?),
        };

        if let Some(remote) = remote.as_deref() {
            if !ctx.repository.remote_names()?.iter().any(|r| r == remote) {
                bail!("Remote `{}` does not exist.", remote);
            }
            branch.set_tracking_remote(&mut config, Some(remote))?;
        }
        if let Some(merge) = self.merge.as_deref() {
            branch.set_merge_with(&mut config, Some(merge))?;
        }

        let tracking = branch.tracking_remote(&config).unwrap_or_default();
        let merge = branch.merge_with(&config).unwrap_or_default();
        info!(branch = %self.branch_name, %tracking, %merge, "Updated tracking configuration");
        println!(
            "Branch `{}` tracks `{}`.",
            Color::Green.paint(&self.branch_name),
            Color::Blue.paint(format!("{}/{}", tracking, merge))
        );
        Ok(())
    }
}
