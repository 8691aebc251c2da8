// README project listing section.
// Rewrites the text between the PROJECTS_LIST markers and leaves the rest untouched.

use std::path::{Path, PathBuf};

use crate::cache;
use crate::error::{ForgeListError, Result};

pub const README_FILE: &str = "Readme.md";
pub const START_MARKER: &str = "<!-- PROJECTS_LIST_START -->";
pub const END_MARKER: &str = "<!-- PROJECTS_LIST_END -->";

const INDENT: &str = "    ";

pub fn readme_path(folder: &Path) -> PathBuf {
    folder.join(README_FILE)
}

fn empty_list() -> String {
    format!("{}\n{}", START_MARKER, END_MARKER)
}

/// Append an empty marker pair unless the file already has both markers.
///
/// Returns true if the file was written.
pub fn ensure_markers(path: &Path) -> Result<bool> {
    let content = load(path)?;
    if content.contains(START_MARKER) && content.contains(END_MARKER) {
        return Ok(false);
    }

    let content = if content.is_empty() {
        empty_list()
    } else {
        format!("{}\n\n{}", content, empty_list())
    };
    save(path, content)?;
    Ok(true)
}

/// Replace the marker region with the rendered entries.
pub fn replace(path: &Path, entries: &[String]) -> Result<()> {
    let block = format!(
        "{}\n{}\n{}",
        START_MARKER,
        indent_entries(entries),
        END_MARKER
    );
    splice(path, &block)
}

/// Empty the marker region.
pub fn clear(path: &Path) -> Result<()> {
    splice(path, &empty_list())
}

/// Join entries and indent every resulting line, stripping trailing whitespace.
pub fn indent_entries(entries: &[String]) -> String {
    let joined = entries.join("\n");
    let mut lines: Vec<&str> = joined.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
        .iter()
        .map(|line| format!("{}{}", INDENT, line).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn splice(path: &Path, block: &str) -> Result<()> {
    ensure_markers(path)?;
    let content = load(path)?;
    let (start, end) = marker_span(path, &content)?;

    let mut updated = String::with_capacity(content.len() + block.len());
    updated.push_str(&content[..start]);
    updated.push_str(block);
    updated.push_str(&content[end..]);
    save(path, updated)
}

/// Byte range from the start marker through the end marker.
///
/// The region is a start marker directly followed by an end marker, with no
/// other marker between them. Stray markers elsewhere (e.g. mentioned in
/// prose) are left alone; more than one such region is an error.
fn marker_span(path: &Path, content: &str) -> Result<(usize, usize)> {
    let markers_error = |reason: &str| ForgeListError::Markers {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut markers: Vec<(usize, bool)> = content
        .match_indices(START_MARKER)
        .map(|(i, _)| (i, true))
        .chain(content.match_indices(END_MARKER).map(|(i, _)| (i, false)))
        .collect();
    markers.sort_unstable();

    let regions: Vec<(usize, usize)> = markers
        .windows(2)
        .filter_map(|pair| match pair {
            [(start, true), (end, false)] => Some((*start, *end + END_MARKER.len())),
            _ => None,
        })
        .collect();

    match regions.as_slice() {
        [region] => Ok(*region),
        [] => Err(markers_error("no start marker precedes an end marker")),
        _ => Err(markers_error(&format!(
            "expected one marker region, found {}",
            regions.len()
        ))),
    }
}

fn load(path: &Path) -> Result<String> {
    Ok(cache::read_text(path)?.unwrap_or_default())
}

/// Write the whole file, always ending in a newline.
fn save(path: &Path, mut content: String) -> Result<()> {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    cache::write_text(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entries() -> Vec<String> {
        vec![
            "org/repo1: \n  A sample repo\n   42 commits, 12 stars, 3 forks\n".to_string(),
            "org/repo2: \n  \n   ,  stars,  forks\n".to_string(),
        ]
    }

    #[test]
    fn test_indent_entries() {
        assert_eq!(
            indent_entries(&entries()),
            "    org/repo1:\n      A sample repo\n       42 commits, 12 stars, 3 forks\n\n    org/repo2:\n\n       ,  stars,  forks"
        );
        assert_eq!(indent_entries(&[]), "");
    }

    #[test]
    fn test_ensure_markers_appends_pair() {
        let temp_dir = TempDir::new().unwrap();
        let path = readme_path(temp_dir.path());
        fs::write(&path, "# Title\n").unwrap();

        assert!(ensure_markers(&path).unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Title\n\n\n<!-- PROJECTS_LIST_START -->\n<!-- PROJECTS_LIST_END -->\n"
        );
    }

    #[test]
    fn test_ensure_markers_leaves_marked_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let path = readme_path(temp_dir.path());
        let original = "intro\n<!-- PROJECTS_LIST_START -->\nx\n<!-- PROJECTS_LIST_END -->";
        fs::write(&path, original).unwrap();

        assert!(!ensure_markers(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_ensure_markers_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = readme_path(temp_dir.path());

        assert!(ensure_markers(&path).unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<!-- PROJECTS_LIST_START -->\n<!-- PROJECTS_LIST_END -->\n"
        );
    }

    #[test]
    fn test_replace_preserves_surroundings() {
        let temp_dir = TempDir::new().unwrap();
        let path = readme_path(temp_dir.path());
        fs::write(
            &path,
            "# Stuff\n\n<!-- PROJECTS_LIST_START -->\nold\n<!-- PROJECTS_LIST_END -->\n\n## Footer\n",
        )
        .unwrap();

        replace(&path, &entries()[..1]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Stuff\n\n<!-- PROJECTS_LIST_START -->\n    org/repo1:\n      A sample repo\n       42 commits, 12 stars, 3 forks\n<!-- PROJECTS_LIST_END -->\n\n## Footer\n"
        );
    }

    #[test]
    fn test_replace_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = readme_path(temp_dir.path());
        fs::write(&path, "# Stuff").unwrap();

        replace(&path, &entries()).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        replace(&path, &entries()).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let path = readme_path(temp_dir.path());
        replace(&path, &entries()).unwrap();

        clear(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<!-- PROJECTS_LIST_START -->\n<!-- PROJECTS_LIST_END -->\n"
        );
    }

    #[test]
    fn test_second_marker_pair_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = readme_path(temp_dir.path());
        let pair = "<!-- PROJECTS_LIST_START -->\n<!-- PROJECTS_LIST_END -->\n";
        let original = format!("{}middle\n{}", pair, pair);
        fs::write(&path, &original).unwrap();

        let result = replace(&path, &entries());
        assert!(matches!(result, Err(ForgeListError::Markers { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_reversed_markers_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = readme_path(temp_dir.path());
        fs::write(
            &path,
            "<!-- PROJECTS_LIST_END -->\n<!-- PROJECTS_LIST_START -->\n",
        )
        .unwrap();

        assert!(matches!(
            clear(&path),
            Err(ForgeListError::Markers { .. })
        ));
    }

    #[test]
    fn test_lone_start_marker_in_prose() {
        let temp_dir = TempDir::new().unwrap();
        let path = readme_path(temp_dir.path());
        fs::write(&path, "# Doc\nUse <!-- PROJECTS_LIST_START --> to mark.\n").unwrap();

        replace(&path, &entries()[..1]).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Doc\nUse <!-- PROJECTS_LIST_START --> to mark.\n\n\n<!-- PROJECTS_LIST_START -->\n    org/repo1:\n      A sample repo\n       42 commits, 12 stars, 3 forks\n<!-- PROJECTS_LIST_END -->\n"
        );

        // A second run finds the same region and appends nothing.
        let first = fs::read_to_string(&path).unwrap();
        replace(&path, &entries()[..1]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_lone_end_marker_in_prose() {
        let temp_dir = TempDir::new().unwrap();
        let path = readme_path(temp_dir.path());
        fs::write(&path, "Ends at <!-- PROJECTS_LIST_END -->.\n").unwrap();

        clear(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Ends at <!-- PROJECTS_LIST_END -->.\n\n\n<!-- PROJECTS_LIST_START -->\n<!-- PROJECTS_LIST_END -->\n"
        );
    }
}
