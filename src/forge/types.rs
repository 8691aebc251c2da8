// Forge project types.
// Display metadata scraped from a repository page.

/// Scraped repository metadata.
///
/// Fields are display text taken from the page markup, not parsed numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInfo {
    pub url: String,
    pub description: String,
    pub commits_summary: String,
    pub stars: String,
    pub forks: String,
}

impl ProjectInfo {
    /// Info for a project whose page could not be fetched.
    pub fn empty(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }

    /// Whether none of the display fields were found.
    pub fn is_blank(&self) -> bool {
        self.description.is_empty()
            && self.commits_summary.is_empty()
            && self.stars.is_empty()
            && self.forks.is_empty()
    }
}
