// Configuration loading.
// Reads forgelist.json (or the per-user config file) and fills in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{ForgeListError, Result};

const LOCAL_CONFIG: &str = "forgelist.json";

const DEFAULT_FOLDERS: &[&str] = &[
    "angularjs",
    "docker",
    "elixir",
    "erlang",
    "golang",
    "hetzner",
    "lua-useful",
    "nginx-lua",
    "puppet",
];

/// Runtime configuration for a forgelist run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the folders and the top-level Readme.md.
    pub root: PathBuf,
    /// Page cache directory, relative to `root` unless absolute.
    pub cache_dir: PathBuf,
    /// Base URL of the forge, without trailing slash.
    pub forge_url: String,
    /// Account owning the folder repositories.
    pub owner: String,
    /// Clone URL template; `{owner}` and `{folder}` are substituted.
    pub remote_template: String,
    /// Folders processed in order.
    pub folders: Vec<String>,
    pub remote: String,
    pub branch: String,
    /// Push folders whose branch diverged from the remote.
    pub push: bool,
    /// Write the sorted project list back and commit it.
    pub rewrite_project_lists: bool,
    /// List the folders themselves in the root Readme.md.
    pub top_readme: bool,
    /// Request timeout for forge fetches, in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            cache_dir: PathBuf::from(".cache"),
            forge_url: "https://github.com".to_string(),
            owner: "mindreframer".to_string(),
            remote_template: "git@github.com:{owner}/{folder}.git".to_string(),
            folders: DEFAULT_FOLDERS
                .iter()
                .map(|name| format!("{}-stuff", name))
                .collect(),
            remote: "origin".to_string(),
            branch: "master".to_string(),
            push: true,
            rewrite_project_lists: true,
            top_readme: true,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Search order:
    /// 1. Explicit path if provided (must exist)
    /// 2. ./forgelist.json
    /// 3. The per-user config dir (~/.config/forgelist/config.json on Linux)
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(ForgeListError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_path(path);
        }

        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Some(local);
        }

        ProjectDirs::from("", "", "forgelist")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .filter(|path| path.exists())
    }

    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.branch.trim().is_empty() || self.remote.trim().is_empty() {
            return Err(ForgeListError::Config(
                "remote and branch must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute-or-root-relative path of a folder.
    pub fn folder_path(&self, folder: &str) -> PathBuf {
        self.root.join(folder)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.root.join(&self.cache_dir)
    }

    /// Clone URL for a folder repository.
    pub fn remote_spec(&self, folder: &str) -> String {
        self.remote_template
            .replace("{owner}", &self.owner)
            .replace("{folder}", folder)
    }

    /// Forge page URL of a folder repository, used for the top-level listing.
    pub fn folder_url(&self, folder: &str) -> String {
        format!(
            "{}/{}/{}",
            self.forge_url.trim_end_matches('/'),
            self.owner,
            folder
        )
    }
}
