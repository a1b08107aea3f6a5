//! Subcommands pertaining to local refs and branch configuration.

mod refs;
pub use refs::RefsCmd;

mod track;
pub use track::TrackCmd;
