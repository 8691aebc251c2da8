// Cache module for local filesystem storage.
// Derives cache paths from forge URLs and stores raw text atomically.

pub mod paths;
pub mod store;

pub use paths::{project_name, strip_vcs_suffix};
pub use store::{ensure_dir, read_text, write_text};
