mod app;
mod cache;
mod config;
mod error;
mod forge;
mod git;
mod projects;
mod prune;
mod readme;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

use crate::app::App;
use crate::config::Config;
use crate::error::Result;
use crate::git::SystemRunner;
use crate::prune::GitPruner;

#[derive(Parser, Debug)]
#[command(name = "forgelist")]
#[command(about = "Keep README project listings in sync with forge repository pages")]
#[command(version)]
struct Args {
    /// Path to config file (default: ./forgelist.json, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the folders
    #[arg(long)]
    root: Option<PathBuf>,

    /// Only process this folder (repeatable)
    #[arg(short, long = "folder")]
    folders: Vec<String>,

    /// Commit but never push
    #[arg(long)]
    no_push: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
enum Command {
    /// Scrape project pages, rewrite README listings, commit and push
    #[default]
    Update,
    /// Clone missing folders and rebase-pull existing ones
    Sync,
    /// Empty the listing region of every folder README
    Clear,
    /// Garbage-collect git metadata of folders, largest first
    Prune {
        /// Only prune folders matching this regular expression
        pattern: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(root) = args.root {
        config.root = root;
    }
    if !args.folders.is_empty() {
        config.folders = args.folders;
    }
    if args.no_push {
        config.push = false;
    }

    match args.command.unwrap_or_default() {
        Command::Update => App::from_config(config)?.update_projects_lists().await,
        Command::Sync => App::from_config(config)?.update_repos().await,
        Command::Clear => App::from_config(config)?.clear_lists(),
        Command::Prune { pattern } => {
            GitPruner::new(SystemRunner)
                .run(&config.root, pattern.as_deref())
                .await?;
            Ok(())
        }
    }
}
