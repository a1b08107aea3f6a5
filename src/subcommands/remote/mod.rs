//! Subcommands pertaining to remotes.

mod show;
pub use show::ShowCmd;

mod show_all;
pub use show_all::ShowAllCmd;
