// Cache path utilities.
// Derives cache file names and project names from forge repository URLs.

use std::path::{Path, PathBuf};

/// Suffix carried by clone URLs but not by forge page URLs.
const VCS_SUFFIX: &str = ".git";

/// Separator between URL path segments in cache file names.
const KEY_SEPARATOR: &str = "__";

/// Strip the trailing `.git` of a clone URL, giving the page URL.
pub fn strip_vcs_suffix(url: &str) -> &str {
    let url = url.trim_end_matches('/');
    url.strip_suffix(VCS_SUFFIX).unwrap_or(url)
}

/// Path segments after the scheme and host, without the `.git` suffix.
///
/// `https://github.com/org/repo.git` gives `["org", "repo"]`.
pub fn path_segments(url: &str) -> Vec<&str> {
    strip_vcs_suffix(url)
        .split('/')
        .skip(3)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Display name of a repository URL, e.g. `org/repo`.
pub fn project_name(url: &str) -> String {
    path_segments(url).join("/")
}

/// Cache file name for a URL, e.g. `org__repo`.
/// Returns None when the URL has no path below the host.
pub fn cache_key(url: &str) -> Option<String> {
    let segments = path_segments(url);
    if segments.is_empty() {
        return None;
    }

    let key = segments
        .iter()
        .map(|segment| sanitize_name(segment))
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR);
    Some(key)
}

/// Path of the cached page for a URL inside the cache directory.
pub fn cache_path(cache_dir: &Path, url: &str) -> Option<PathBuf> {
    cache_key(url).map(|key| cache_dir.join(key))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
