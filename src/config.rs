//! Key-value access to a repository's configuration.
//!
//! [GitRef] never caches per-branch settings; it reads them through a [ConfigLookup] on every
//! access. Pass a [git2::Config] snapshot (or a plain map) when several refs must be resolved
//! against one consistent view, or a [RepoConfig] to always observe the current on-disk state.
//!
//! [GitRef]: crate::refs::GitRef

use crate::errors::ConfigResult;
use git2::{Config, ConfigLevel, ErrorCode, Repository};
use std::collections::{BTreeMap, HashMap};

/// Read access to configuration values by their dotted key, e.g. `branch.main.remote`.
pub trait ConfigLookup {
    /// Returns the value stored under `key`, or [None] if it is not set.
    fn get(&self, key: &str) -> Option<String>;
}

/// Write access to configuration values.
pub trait ConfigStore: ConfigLookup {
    /// Sets `key` to `value`.
    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn unset(&mut self, key: &str) -> ConfigResult<()>;
}

impl ConfigLookup for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigStore for HashMap<String, String> {
    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn unset(&mut self, key: &str) -> ConfigResult<()> {
        self.remove(key);
        Ok(())
    }
}

impl ConfigLookup for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl ConfigStore for BTreeMap<String, String> {
    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn unset(&mut self, key: &str) -> ConfigResult<()> {
        self.remove(key);
        Ok(())
    }
}

impl ConfigLookup for Config {
    fn get(&self, key: &str) -> Option<String> {
        self.get_string(key).ok()
    }
}

impl ConfigStore for Config {
    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        self.set_str(key, value)?;
        Ok(())
    }

    fn unset(&mut self, key: &str) -> ConfigResult<()> {
        match self.remove(key) {
            Err(e) if e.code() == ErrorCode::NotFound => Ok(()),
            res => res.map_err(Into::into),
        }
    }
}

/// A live view over the local configuration (`.git/config`) of a [Repository].
///
/// Each read re-opens the repository configuration, so values written by other processes
/// between two reads are observed. System, global and worktree levels are not consulted.
pub struct RepoConfig<'a> {
    /// The repository whose configuration is read.
    repository: &'a Repository,
}

impl<'a> RepoConfig<'a> {
    /// Creates a new [RepoConfig] over the given [Repository].
    pub fn new(repository: &'a Repository) -> Self {
        Self { repository }
    }

    /// Takes a point-in-time snapshot of the repository's local configuration.
    pub fn snapshot(&self) -> ConfigResult<Config> {
        Ok(self.local()?.snapshot()?)
    }

    fn local(&self) -> Result<Config, git2::Error> {
        self.repository.config()?.open_level(ConfigLevel::Local)
    }
}

impl ConfigLookup for RepoConfig<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.local().ok()?.get_string(key).ok()
    }
}

impl ConfigStore for RepoConfig<'_> {
    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        self.local()?.set(key, value)
    }

    fn unset(&mut self, key: &str) -> ConfigResult<()> {
        self.local()?.unset(key)
    }
}
