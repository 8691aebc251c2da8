// Read-through page cache.
// Raw pages are written once per URL and served from disk forever after.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::cache::{self, paths};
use crate::error::Result;

use super::client::PageSource;

/// Disk cache in front of a page source.
///
/// Entries never expire: a page fetched once is never fetched again.
pub struct PageCache<S> {
    dir: PathBuf,
    source: S,
}

impl<S: PageSource> PageCache<S> {
    /// Create the cache, making sure its directory exists.
    pub fn new(dir: impl Into<PathBuf>, source: S) -> Result<Self> {
        let dir = dir.into();
        cache::ensure_dir(&dir)?;
        Ok(Self { dir, source })
    }

    #[cfg(test)]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Cached page body for `url`, fetching and storing it on a miss.
    ///
    /// URLs without a repository path and fetch failures are logged and give None.
    pub async fn get(&self, url: &str) -> Option<String> {
        let Some(path) = paths::cache_path(&self.dir, url) else {
            warn!("no repository path in {}, skipping", url);
            return None;
        };

        match cache::read_text(&path) {
            Ok(Some(body)) => {
                debug!("cache hit for {}", url);
                return Some(body);
            }
            Ok(None) => {}
            Err(e) => warn!("unreadable cache entry {}: {}", path.display(), e),
        }

        let body = match self.source.fetch_page(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, "fetch failed: {}", e);
                return None;
            }
        };

        if let Err(e) = cache::write_text(&path, &body) {
            warn!("could not cache {}: {}", url, e);
        }

        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForgeListError;
    use std::cell::Cell;
    use tempfile::TempDir;

    /// Serves one page, panics if asked again.
    struct OneShotSource {
        calls: Cell<usize>,
    }

    impl PageSource for OneShotSource {
        async fn fetch_page(&self, _url: &str) -> Result<String> {
            let calls = self.calls.get() + 1;
            self.calls.set(calls);
            assert!(calls == 1, "page fetched twice");
            Ok("<html>page</html>".to_string())
        }
    }

    struct FailingSource;

    impl PageSource for FailingSource {
        async fn fetch_page(&self, url: &str) -> Result<String> {
            Err(ForgeListError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    #[tokio::test]
    async fn test_second_get_never_refetches() {
        let temp_dir = TempDir::new().unwrap();
        let source = OneShotSource {
            calls: Cell::new(0),
        };
        let cache = PageCache::new(temp_dir.path().join(".cache"), source).unwrap();

        let url = "https://github.com/org/repo";
        let first = cache.get(url).await;
        let second = cache.get(url).await;

        assert_eq!(first.as_deref(), Some("<html>page</html>"));
        assert_eq!(second, first);
        assert_eq!(cache.source().calls.get(), 1);
        assert!(cache.dir().join("org__repo").exists());
    }

    #[tokio::test]
    async fn test_existing_entry_served_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join(".cache");
        cache::write_text(&dir.join("org__repo"), "stale but kept\n").unwrap();

        let cache = PageCache::new(&dir, FailingSource).unwrap();
        let body = cache.get("https://github.com/org/repo.git").await;
        assert_eq!(body.as_deref(), Some("stale but kept\n"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_absent_and_not_cached() {
        let temp_dir = TempDir::new().unwrap();
        let cache = PageCache::new(temp_dir.path().join(".cache"), FailingSource).unwrap();

        assert!(cache.get("https://github.com/org/gone").await.is_none());
        assert!(!cache.dir().join("org__gone").exists());
    }

    #[tokio::test]
    async fn test_url_without_repository_path_is_not_fetched() {
        let temp_dir = TempDir::new().unwrap();
        let source = OneShotSource {
            calls: Cell::new(0),
        };
        let cache = PageCache::new(temp_dir.path().join(".cache"), source).unwrap();

        assert!(cache.get("https://github.com/").await.is_none());
        assert!(cache.get("https://github.com").await.is_none());
        assert_eq!(cache.source().calls.get(), 0);
    }
}
