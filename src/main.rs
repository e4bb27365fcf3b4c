mod commands;
mod downloader;
mod error;
mod logging;
mod prompt;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::commands::RunArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image URLs to download (leave empty to be prompted interactively)
    urls: Vec<String>,

    /// Path to a file containing URLs (one per line)
    #[arg(short = 't', long = "tasks-file")]
    tasks_file: Option<PathBuf>,

    /// Directory to save downloaded images (prompted for in interactive mode)
    #[arg(short = 'd', long = "download-dir")]
    download_dir: Option<PathBuf>,

    /// Maximum number of concurrent downloads (unlimited by default)
    #[arg(short = 'c', long)]
    concurrency: Option<usize>,

    /// Verify TLS certificates (verification is skipped by default)
    #[arg(long)]
    verify_tls: bool,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        commands::run_downloads(RunArgs {
            urls: args.urls,
            tasks_file: args.tasks_file,
            download_dir: args.download_dir,
            concurrency: args.concurrency,
            verify_tls: args.verify_tls,
            json: args.json,
        })
        .await
    })
}
