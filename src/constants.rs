//! Constants for the `refscope` application.

pub(crate) const CFG_FILE_NAME: &str = ".refscope.toml";

pub(crate) const GIT_BINARY: &str = "git";

pub(crate) const FILLED_CIRCLE: char = '●';
pub(crate) const EMPTY_CIRCLE: char = '○';
pub(crate) const RIGHT_ARROW: char = '→';
