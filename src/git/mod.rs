// Git module.
// Subprocess seam and the repository operations built on it.

pub mod repo;
pub mod runner;
#[cfg(test)]
pub mod testing;

pub use repo::RepoSync;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
