//! `remote` subcommand.

use crate::{ctx::ScopeContext, settings::OutputFormat};
use anyhow::Result;
use clap::Args;

/// CLI arguments for the `remote` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct ShowCmd {
    /// Name of the remote to describe. Prompts for one when omitted.
    #[clap(index = 1)]
    name: Option<String>,
    /// Do not contact the remote; statuses are reported as not queried.
    #[clap(short = 'n', long = "no-query")]
    no_query: bool,
    /// Output format, overriding the configured one.
    #[clap(long, value_enum)]
    format: Option<OutputFormat>,
}

impl ShowCmd {
    /// Run the `remote` subcommand.
    pub async fn run(self, mut ctx: ScopeContext<'_>) -> Result<()> {
        if self.no_query {
            ctx.settings.query_remotes = false;
        }
        if let Some(format) = self.format {
            ctx.settings.format = format;
        }

        // Prompt the user for the remote to describe, or use the provided name.
        let name = match self.name {
            Some(name) => name,
            None => ctx.select_remote("Select a remote to describe")?,
        };

        let remote = ctx.describe_remote(&name).await?;
        ctx.print_remote(&remote)
    }
}
