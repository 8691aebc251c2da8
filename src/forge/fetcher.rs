// Project fetcher.
// Combines the page cache and the extractor into per-project listing entries.

use tracing::debug;

use crate::cache::{project_name, strip_vcs_suffix};
use crate::error::Result;

use super::cache::PageCache;
use super::client::PageSource;
use super::extract::MetadataExtractor;
use super::types::ProjectInfo;

pub struct ProjectFetcher<S> {
    cache: PageCache<S>,
    extractor: MetadataExtractor,
}

impl<S: PageSource> ProjectFetcher<S> {
    pub fn new(cache: PageCache<S>) -> Result<Self> {
        Ok(Self {
            cache,
            extractor: MetadataExtractor::new()?,
        })
    }

    #[cfg(test)]
    pub fn cache(&self) -> &PageCache<S> {
        &self.cache
    }

    /// Metadata for a repository URL; empty fields if its page is unavailable.
    pub async fn describe(&self, url: &str) -> ProjectInfo {
        let page_url = strip_vcs_suffix(url);
        let info = match self.cache.get(page_url).await {
            Some(html) => self.extractor.extract(url, &html),
            None => ProjectInfo::empty(url),
        };
        if info.is_blank() {
            debug!("no metadata for {}", url);
        }
        info
    }

    /// Listing entry for a repository URL.
    pub async fn render(&self, url: &str) -> String {
        let info = self.describe(url).await;
        render_entry(&project_name(url), &info)
    }
}

/// Three-line listing entry, terminated by a newline.
pub fn render_entry(name: &str, info: &ProjectInfo) -> String {
    format!(
        "{}: \n  {}\n   {}, {} stars, {} forks\n",
        name, info.description, info.commits_summary, info.stars, info.forks
    )
}
