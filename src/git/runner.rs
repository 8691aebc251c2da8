// Subprocess runner.
// Invokes external tools with explicit argument arrays and captures their exit status.

use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::error::Result;

/// Captured result of an external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, None if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands in a working directory.
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd` and wait for it to exit.
    ///
    /// A non-zero exit is reported in the output, not as an error.
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        debug!("{} {} (in {})", program, args.join(" "), cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
