//! The in-memory context of the `refscope` application.

use crate::{
    git::{self, RepositoryExt},
    settings::Settings,
};
use anyhow::{anyhow, Result};
use git2::Repository;
use refscope::RemoteDescription;
use tokio::task::JoinSet;
use tracing::{debug, warn};

mod fmt;

/// The in-memory context of the `refscope` application.
pub struct ScopeContext<'a> {
    /// The repository commands operate on.
    pub repository: &'a Repository,
    /// The user [Settings], with command-line overrides applied.
    pub settings: Settings,
}

impl<'a> ScopeContext<'a> {
    /// Creates a fresh [ScopeContext] with the given [Repository] and [Settings].
    pub fn fresh(repository: &'a Repository, settings: Settings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Runs `git remote show` for a single remote and parses its output.
    pub async fn describe_remote(&self, remote: &str) -> Result<RemoteDescription> {
        let output = git::remote_show(
            &self.repository.command_dir(),
            remote,
            self.settings.query_remotes,
            self.settings.timeout(),
        )
        .await?;

        RemoteDescription::parse(&output)
            .map_err(|e| anyhow!("Failed to parse `git remote show {}`: {}", remote, e))
    }

    /// Runs `git remote show` for every remote concurrently.
    ///
    /// ## Returns
    /// - `Ok(descriptions)` - One result per remote, in the order the remotes are configured.
    ///   A remote whose command or output fails does not affect the others.
    /// - `Err(_)` - If the remotes could not be listed.
    pub async fn describe_all_remotes(&self) -> Result<Vec<(String, Result<RemoteDescription>)>> {
        let remotes = self.repository.remote_names()?;
        let dir = self.repository.command_dir();

        let mut tasks = JoinSet::new();
        for (index, remote) in remotes.iter().cloned().enumerate() {
            let dir = dir.clone();
            let query = self.settings.query_remotes;
            let timeout = self.settings.timeout();
            tasks.spawn(async move {
                let described = git::remote_show(&dir, &remote, query, timeout)
                    .await
                    .map_err(anyhow::Error::from)
                    .and_then(|output| {
                        RemoteDescription::parse(&output).map_err(anyhow::Error::from)
                    });
                (index, described)
            });
        }

        let results = gather(remotes, tasks).await;
        debug!(count = results.len(), "Described remotes");
        Ok(results)
    }

    /// Prompts the user to select one of the configured remotes.
    pub fn select_remote(&self, prompt: &str) -> Result<String> {
        let remotes = self.repository.remote_names()?;
        match remotes.as_slice() {
            [] => Err(anyhow!("Repository has no remotes.")),
            [only] => Ok(only.clone()),
            _ => Ok(inquire::Select::new(prompt, remotes).prompt()?),
        }
    }
}

/// Collects the results of `tasks`, each tagged with its index into `names`, back into the
/// order of `names`. A task that panics or is cancelled leaves an error in its slot.
async fn gather<T: 'static>(
    names: Vec<String>,
    mut tasks: JoinSet<(usize, Result<T>)>,
) -> Vec<(String, Result<T>)> {
    let mut results = names
        .into_iter()
        .map(|name| (name, Err(anyhow!("Task did not complete."))))
        .collect::<Vec<_>>();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => results[index].1 = result,
            Err(e) => warn!(error = %e, "Task failed to complete"),
        }
    }
    results
}

#[cfg(test)]
mod test {
    use super::{gather, ScopeContext};
    use crate::{git::RepositoryExt, settings::Settings};
    use anyhow::anyhow;
    use git2::Repository;
    use tokio::task::JoinSet;

    #[tokio::test]
    async fn gather_keeps_order_and_survives_panics() {
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut tasks = JoinSet::new();
        tasks.spawn(async { (2, Ok(3)) });
        tasks.spawn(async { (0, Err(anyhow!("unreachable"))) });
        tasks.spawn(async {
            if true {
                panic!("boom");
            }
            (1, Ok(2))
        });

        let results = gather(names, tasks).await;
        assert_eq!(
            results.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
        assert!(results[0].1.is_err());
        assert!(results[1].1.is_err());
        assert_eq!(*results[2].1.as_ref().unwrap(), 3);
    }

    #[tokio::test]
    async fn describe_all_remotes_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        let upstream = tempfile::tempdir().unwrap();
        Repository::init_bare(upstream.path()).unwrap();
        let upstream_url = upstream.path().to_str().unwrap();

        let repo = Repository::init(dir.path().join("work")).unwrap();
        repo.remote("origin", upstream_url).unwrap();
        repo.remote("broken", dir.path().join("missing").to_str().unwrap())
            .unwrap();

        let ctx = ScopeContext::fresh(&repo, Settings::default());
        let described = ctx.describe_all_remotes().await.unwrap();

        let names = described.iter().map(|(n, _)| n.clone()).collect::<Vec<_>>();
        assert_eq!(names, repo.remote_names().unwrap());

        for (name, result) in &described {
            match name.as_str() {
                "origin" => {
                    let remote = result.as_ref().unwrap();
                    assert_eq!(remote.name, "origin");
                    assert_eq!(remote.fetch_url.as_deref(), Some(upstream_url));
                }
                "broken" => assert!(result.is_err()),
                other => panic!("unexpected remote {}", other),
            }
        }
    }
}
