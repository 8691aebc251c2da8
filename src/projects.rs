// Project list files.
// Each folder keeps its repository URLs in projects.txt, one per line.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache;
use crate::error::Result;

pub const PROJECTS_FILE: &str = "projects.txt";

pub fn list_path(folder: &Path) -> PathBuf {
    folder.join(PROJECTS_FILE)
}

/// Project URLs of a folder, sorted case-insensitively.
pub fn load(folder: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(list_path(folder))?;
    Ok(parse(&contents))
}

/// Overwrite the folder's project list, one URL per line.
pub fn save(folder: &Path, urls: &[String]) -> Result<()> {
    let mut contents = urls.join("\n");
    contents.push('\n');
    cache::write_text(&list_path(folder), &contents)
}

fn parse(contents: &str) -> Vec<String> {
    let mut urls: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    urls.sort_by_key(|url| url.to_lowercase());
    urls
}
