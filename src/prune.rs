// Git garbage collection over the working root.
// Ranks folders by disk usage and shrinks their .git directories, largest first.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{info, warn};

use crate::error::Result;
use crate::git::{CommandOutput, CommandRunner};

const MAINTENANCE: &[&[&str]] = &[
    &["reflog", "expire", "--expire=now", "--all"],
    &["gc", "--prune=now"],
    &["gc", "--aggressive", "--prune=now"],
];

pub struct GitPruner<R> {
    runner: R,
}

impl<R: CommandRunner> GitPruner<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Prune every folder of `root` matching `pattern` (all when None).
    pub async fn run(&self, root: &Path, pattern: Option<&str>) -> Result<Vec<String>> {
        let folders = filter(self.sorted_folders(root).await?, pattern)?;
        info!("will prune {}", folders.join(","));

        for folder in &folders {
            self.prune(&root.join(folder)).await?;
        }
        Ok(folders)
    }

    /// Folders directly under `root`, largest first.
    pub async fn sorted_folders(&self, root: &Path) -> Result<Vec<String>> {
        let output = self.runner.run("du", &["-m", "-d", "1"], root).await?;
        log_failure("du", &output);
        Ok(rank_folders(&output.stdout))
    }

    /// Expire reflogs and garbage-collect one folder's repository.
    pub async fn prune(&self, folder: &Path) -> Result<()> {
        info!("cleaning up {}", folder.display());
        let before = self.size_in_mb(folder).await?;
        info!("size before: {} MB", before);

        let original_refs = folder.join(".git").join("refs").join("original");
        if original_refs.exists() {
            fs::remove_dir_all(&original_refs)?;
        }

        for args in MAINTENANCE {
            let output = self.runner.run("git", args, folder).await?;
            log_failure("git", &output);
        }

        let after = self.size_in_mb(folder).await?;
        info!("size after: {} MB", after);
        Ok(())
    }

    async fn size_in_mb(&self, folder: &Path) -> Result<String> {
        let output = self.runner.run("du", &["-m", "-d", "0"], folder).await?;
        Ok(output
            .stdout
            .split_whitespace()
            .next()
            .unwrap_or("?")
            .to_string())
    }
}

/// Keep the folders matching `pattern`; all of them without one.
pub fn filter(folders: Vec<String>, pattern: Option<&str>) -> Result<Vec<String>> {
    let Some(pattern) = pattern else {
        return Ok(folders);
    };
    let regex = Regex::new(pattern)?;
    Ok(folders
        .into_iter()
        .filter(|folder| regex.is_match(folder))
        .collect())
}

/// Parse `du -m -d 1` output into folder names, largest first.
///
/// The root entry and hidden folders are skipped.
fn rank_folders(du_output: &str) -> Vec<String> {
    let mut sized: Vec<(u64, String)> = du_output
        .lines()
        .filter_map(|line| {
            let (size, path) = line.split_once('\t')?;
            let size = size.trim().parse::<u64>().ok()?;
            let name = path.trim().strip_prefix("./")?;
            if name.is_empty() || name.starts_with('.') {
                return None;
            }
            Some((size, name.to_string()))
        })
        .collect();

    sized.sort_by(|a, b| b.0.cmp(&a.0));
    sized.into_iter().map(|(_, name)| name).collect()
}

fn log_failure(program: &str, output: &CommandOutput) {
    if !output.success() {
        warn!(
            "{} exited with {:?}: {}",
            program,
            output.code,
            output.stderr.trim()
        );
    }
}
