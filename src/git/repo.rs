// Folder repository synchronisation.
// Clone/pull, commit and push-when-diverged over the git command line.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;

use super::runner::{CommandOutput, CommandRunner};

const GIT: &str = "git";

/// Git operations on folder repositories.
pub struct RepoSync<R> {
    runner: R,
    remote: String,
    branch: String,
}

impl<R: CommandRunner> RepoSync<R> {
    pub fn new(runner: R, remote: &str, branch: &str) -> Self {
        Self {
            runner,
            remote: remote.to_string(),
            branch: branch.to_string(),
        }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Clone `remote_spec` into `folder`, or rebase-pull if it already exists.
    pub async fn sync(&self, folder: &Path, remote_spec: &str) -> Result<CommandOutput> {
        let output = if folder.exists() {
            self.git(folder, &["pull", "--rebase"]).await?
        } else {
            let parent = match folder.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let target = folder
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| folder.to_string_lossy().into_owned());
            self.git(parent, &["clone", remote_spec, &target]).await?
        };
        Ok(output)
    }

    /// Stage `file` and commit it.
    ///
    /// The commit is always attempted; git's "nothing to commit" comes back
    /// as a non-zero exit in the output.
    pub async fn commit(&self, folder: &Path, file: &str, message: &str) -> Result<CommandOutput> {
        self.git(folder, &["add", file]).await?;
        let output = self.git(folder, &["commit", "-m", message]).await?;
        if !output.success() {
            debug!("nothing committed in {}", folder.display());
        }
        Ok(output)
    }

    /// Push the branch if it differs from its remote tracking branch.
    ///
    /// Returns None when the diff was empty and no push was issued.
    pub async fn push_if_diverged(&self, folder: &Path) -> Result<Option<CommandOutput>> {
        let range = format!("{}..{}/{}", self.branch, self.remote, self.branch);
        let diff = self.git(folder, &["diff", &range]).await?;
        if diff.stdout.is_empty() {
            return Ok(None);
        }

        info!("pushing {}", folder.display());
        let output = self.git(folder, &["push", &self.remote, &self.branch]).await?;
        Ok(Some(output))
    }

    async fn git(&self, cwd: &Path, args: &[&str]) -> Result<CommandOutput> {
        let output = self.runner.run(GIT, args, cwd).await?;
        if !output.success() {
            let stderr = output.stderr.trim();
            warn!(
                "git {} in {} exited with {:?}{}{}",
                args.first().copied().unwrap_or_default(),
                cwd.display(),
                output.code,
                if stderr.is_empty() { "" } else { ": " },
                stderr
            );
        }
        Ok(output)
    }
}
