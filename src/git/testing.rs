// Recording command runner for tests.
// Captures every invocation and answers with scripted outputs.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::runner::{CommandOutput, CommandRunner};

/// One recorded command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    /// Program and arguments as one line, e.g. `git diff master..origin/master`.
    pub fn line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Succeeds with empty output unless a scripted response matches.
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    responses: RefCell<Vec<(String, CommandOutput)>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands whose line starts with `prefix`.
    pub fn respond(&self, prefix: &str, code: i32, stdout: &str) {
        self.responses.borrow_mut().push((
            prefix.to_string(),
            CommandOutput {
                code: Some(code),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        ));
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Invocation::line).collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        let invocation = Invocation {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            cwd: cwd.to_path_buf(),
        };
        let line = invocation.line();
        self.calls.borrow_mut().push(invocation);

        let output = self
            .responses
            .borrow()
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or(CommandOutput {
                code: Some(0),
                ..Default::default()
            });
        Ok(output)
    }
}
