use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::downloader::{DownloadOutcome, Downloader, DownloaderOptions};
use crate::prompt;

pub struct RunArgs {
    pub urls: Vec<String>,
    pub tasks_file: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub verify_tls: bool,
    pub json: bool,
}

/// Resolve the URL set and save directory, run the pipeline, render results.
/// Per-URL failures are reported in the table, never as a process error:
/// the exit code stays 0 as long as the batch itself completes.
pub async fn run_downloads(args: RunArgs) -> Result<()> {
    let interactive = args.urls.is_empty() && args.tasks_file.is_none();

    let download_dir = match args.download_dir {
        Some(dir) => {
            if !dir.exists() {
                fs::create_dir_all(&dir)
                    .await
                    .context("Failed to create download directory")?;
            }
            dir
        }
        None if interactive => prompt::prompt_save_dir()?,
        None => {
            let dir = PathBuf::from("downloads");
            if !dir.exists() {
                fs::create_dir_all(&dir)
                    .await
                    .context("Failed to create download directory")?;
            }
            dir
        }
    };

    let urls = if !args.urls.is_empty() {
        args.urls
    } else if let Some(tasks_file) = &args.tasks_file {
        read_tasks_file(tasks_file).await?
    } else {
        prompt::collect_urls()?
    };
    if urls.is_empty() {
        bail!("No URLs supplied");
    }

    tracing::info!(
        count = urls.len(),
        dir = %download_dir.display(),
        "starting downloads"
    );

    let downloader = Arc::new(
        Downloader::new(
            download_dir,
            DownloaderOptions {
                insecure_transport: !args.verify_tls,
                concurrency: args.concurrency,
                ..Default::default()
            },
        )
        .context("Failed to build HTTP client")?,
    );
    let outcomes = downloader.download_all(&urls).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        print_results(&outcomes);
    }
    Ok(())
}

/// One URL per line; blank lines are skipped.
async fn read_tasks_file(path: &PathBuf) -> Result<Vec<String>> {
    let file = fs::File::open(path)
        .await
        .context(format!("Failed to open tasks file: {:?}", path))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let mut urls = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let raw = line.trim();
        if !raw.is_empty() {
            urls.push(raw.to_string());
        }
    }
    Ok(urls)
}

fn print_results(outcomes: &[DownloadOutcome]) {
    println!();
    println!("{:<60} {:<10}", "URL", "Status");
    println!("{:-<60} {:-<10}", "", "");
    for outcome in outcomes {
        println!("{:<60} {:<10}", outcome.url, outcome.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[tokio::test]
    async fn tasks_file_skips_blank_lines_and_keeps_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "https://example.com/a.png").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  https://example.com/b.png  ").unwrap();
        file.flush().unwrap();

        let urls = read_tasks_file(&file.path().to_path_buf()).await.unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/a.png".to_string(),
                "https://example.com/b.png".to_string(),
            ]
        );
    }
}
