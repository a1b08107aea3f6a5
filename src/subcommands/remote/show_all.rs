//! `remotes` subcommand.

use crate::{ctx::ScopeContext, settings::OutputFormat};
use anyhow::Result;
use clap::Args;
use nu_ansi_term::Color;
use tracing::warn;

/// CLI arguments for the `remotes` subcommand.
#[derive(Debug, Clone, Eq, PartialEq, Args)]
pub struct ShowAllCmd {
    /// Do not contact the remotes; statuses are reported as not queried.
    #[clap(short = 'n', long = "no-query")]
    no_query: bool,
    /// Output format, overriding the configured one.
    #[clap(long, value_enum)]
    format: Option<OutputFormat>,
}

impl ShowAllCmd {
    /// Run the `remotes` subcommand.
    pub async fn run(self, mut ctx: ScopeContext<'_>) -> Result<()> {
        if self.no_query {
            ctx.settings.query_remotes = false;
        }
        if let Some(format) = self.format {
            ctx.settings.format = format;
        }

        let described = ctx.describe_all_remotes().await?;
        if described.is_empty() {
            println!("Repository has no remotes.");
            return Ok(());
        }

        // A remote that fails to describe is reported and skipped.
        for (name, result) in described {
            match result {
                Ok(remote) => ctx.print_remote(&remote)?,
                Err(e) => {
                    warn!(remote = %name, error = %e, "Skipping remote");
                    eprintln!(
                        "Skipped remote `{}`: {}",
                        Color::Yellow.paint(&name),
                        e
                    );
                }
            }
        }

        Ok(())
    }
}
