use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

use crate::error::DownloadError;
use crate::utils::{filename_from_url, is_downloadable_url};

/// Default whole-request deadline, covering connect, headers and body read.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Terminal status reported for each URL. The internal failure cause
/// (`DownloadError`) never escapes past this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DownloadStatus {
    Success,
    Failure,
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadStatus::Success => write!(f, "Success"),
            DownloadStatus::Failure => write!(f, "Failure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadOutcome {
    pub url: String,
    pub status: DownloadStatus,
}

#[derive(Debug, Clone)]
pub struct DownloaderOptions {
    /// Skip TLS certificate verification. On by default to match the tool's
    /// historical behavior; pass `--verify-tls` to turn it off.
    pub insecure_transport: bool,
    /// Optional cap on in-flight downloads. `None` launches one task per URL
    /// with no limit.
    pub concurrency: Option<usize>,
    /// Whole-request deadline per fetch, 30 seconds unless overridden.
    pub timeout: Duration,
}

impl Default for DownloaderOptions {
    fn default() -> Self {
        Self {
            insecure_transport: true,
            concurrency: None,
            timeout: FETCH_TIMEOUT,
        }
    }
}

pub struct Downloader {
    client: Client,
    output_dir: PathBuf,
    limiter: Option<Semaphore>,
}

impl Downloader {
    /// `output_dir` must already exist and be writable; the pipeline never
    /// creates it. Fails only if the HTTP client cannot be built; a fallback
    /// client here would silently lose the timeout and TLS settings.
    pub fn new(output_dir: PathBuf, options: DownloaderOptions) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent("imgfetch/0.1.0")
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.insecure_transport)
            .build()?;

        // A zero-permit semaphore would block every task forever; treat a
        // zero cap as "no limit".
        let limiter = options
            .concurrency
            .filter(|&n| n > 0)
            .map(Semaphore::new);

        Ok(Self {
            client,
            output_dir,
            limiter,
        })
    }

    /// Run every URL's pipeline concurrently and gather outcomes back into
    /// input order. A failure in one pipeline never cancels another; this
    /// always returns exactly one outcome per input URL.
    pub async fn download_all(self: &Arc<Self>, urls: &[String]) -> Vec<DownloadOutcome> {
        let mut handles = Vec::with_capacity(urls.len());

        for url in urls {
            let downloader = Arc::clone(self);
            let url = url.clone();
            handles.push(tokio::spawn(async move {
                let _permit = match &downloader.limiter {
                    Some(sem) => sem.acquire().await.ok(),
                    None => None,
                };
                match downloader.download_one(&url).await {
                    Ok(path) => {
                        tracing::debug!(%url, path = %path.display(), "saved");
                        DownloadStatus::Success
                    }
                    Err(err) => {
                        tracing::debug!(%url, error = %err, "download failed");
                        DownloadStatus::Failure
                    }
                }
            }));
        }

        let joined = futures::future::join_all(handles).await;

        urls.iter()
            .zip(joined)
            .map(|(url, result)| {
                let status = result.unwrap_or_else(|err| {
                    // A panicked task counts as an unclassified failure for
                    // that URL; the rest of the batch is unaffected.
                    let err = DownloadError::Unclassified(err.to_string());
                    tracing::debug!(%url, error = %err, "download task aborted");
                    DownloadStatus::Failure
                });
                DownloadOutcome {
                    url: url.clone(),
                    status,
                }
            })
            .collect()
    }

    /// Single-URL pipeline: validate, fetch, check content, write. Terminal
    /// states only; the classified error is surfaced for logging and tests.
    pub(crate) async fn download_one(&self, raw_url: &str) -> Result<PathBuf, DownloadError> {
        if !is_downloadable_url(raw_url) {
            return Err(DownloadError::InvalidUrl);
        }
        let url = Url::parse(raw_url).map_err(|_| DownloadError::InvalidUrl)?;

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::HttpStatus(status));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if !content_type
            .as_deref()
            .map_or(false, |ct| ct.starts_with("image/"))
        {
            return Err(DownloadError::ContentType(content_type));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(DownloadError::EmptyBody);
        }

        // Whole-buffer write: a failed write never leaves a truncated file
        // from a previous successful attempt at the same path.
        let filepath = self.output_dir.join(filename_from_url(&url));
        tokio::fs::write(&filepath, &bytes).await?;

        Ok(filepath)
    }
}
