// Orchestration of a forgelist run.
// Walks the configured folders one at a time: scrape, render, commit, push.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::forge::{ForgeClient, PageCache, PageSource, ProjectFetcher};
use crate::git::{CommandRunner, RepoSync, SystemRunner};
use crate::projects::{self, PROJECTS_FILE};
use crate::readme::{self, README_FILE};

const PROJECTS_MESSAGE: &str = "projects.txt updated";
const README_MESSAGE: &str = "readme updated";

/// A configured run over the folders.
pub struct App<S, R> {
    config: Config,
    fetcher: ProjectFetcher<S>,
    repos: RepoSync<R>,
}

impl App<ForgeClient, SystemRunner> {
    /// App talking to the real forge and the real git.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = ForgeClient::new(Duration::from_secs(config.timeout_secs))?;
        Self::new(config, client, SystemRunner)
    }
}

impl<S: PageSource, R: CommandRunner> App<S, R> {
    pub fn new(config: Config, source: S, runner: R) -> Result<Self> {
        let cache = PageCache::new(config.cache_path(), source)?;
        let fetcher = ProjectFetcher::new(cache)?;
        let repos = RepoSync::new(runner, &config.remote, &config.branch);
        Ok(Self {
            config,
            fetcher,
            repos,
        })
    }

    /// Refresh every folder's listing, then the top-level README.
    pub async fn update_projects_lists(&self) -> Result<()> {
        for folder in &self.config.folders {
            self.update_folder(folder).await?;
        }

        if self.config.top_readme {
            self.update_top_readme().await?;
        }
        Ok(())
    }

    /// Scrape a folder's projects and rewrite its README listing.
    pub async fn update_folder(&self, folder: &str) -> Result<()> {
        let path = self.config.folder_path(folder);
        let urls = projects::load(&path)?;

        let mut entries = Vec::with_capacity(urls.len());
        for url in &urls {
            info!("pulling info for repo {}", url);
            entries.push(self.fetcher.render(url).await);
        }

        if self.config.rewrite_project_lists {
            projects::save(&path, &urls)?;
            self.repos
                .commit(&path, PROJECTS_FILE, PROJECTS_MESSAGE)
                .await?;
        }

        self.publish(&path, &entries).await
    }

    /// List the folders themselves in the root README.
    pub async fn update_top_readme(&self) -> Result<()> {
        let mut entries = Vec::with_capacity(self.config.folders.len());
        for folder in &self.config.folders {
            entries.push(self.fetcher.render(&self.config.folder_url(folder)).await);
        }

        self.publish(&self.config.root, &entries).await
    }

    /// Clone missing folders and rebase-pull existing ones.
    pub async fn update_repos(&self) -> Result<()> {
        for folder in &self.config.folders {
            info!("updating repo {}", folder);
            self.repos
                .sync(
                    &self.config.folder_path(folder),
                    &self.config.remote_spec(folder),
                )
                .await?;
        }
        Ok(())
    }

    /// Empty the listing of every folder's README.
    pub fn clear_lists(&self) -> Result<()> {
        for folder in &self.config.folders {
            readme::clear(&readme::readme_path(&self.config.folder_path(folder)))?;
        }
        Ok(())
    }

    async fn publish(&self, dir: &Path, entries: &[String]) -> Result<()> {
        readme::replace(&readme::readme_path(dir), entries)?;
        self.repos.commit(dir, README_FILE, README_MESSAGE).await?;

        if self.config.push {
            self.repos.push_if_diverged(dir).await?;
        }
        Ok(())
    }
}
