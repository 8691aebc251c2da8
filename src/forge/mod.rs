// Forge module.
// Fetches, caches and extracts repository page metadata.

pub mod cache;
pub mod client;
pub mod extract;
pub mod fetcher;
pub mod types;

pub use cache::PageCache;
pub use client::{ForgeClient, PageSource};
pub use fetcher::ProjectFetcher;
