// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Concurrent image downloads
//!
//! Every URL is its own failure domain: a bad status or transport error is
//! logged and the image is left out of the batch. Fan-out is bounded by a
//! semaphore so large feeds do not open hundreds of connections at once.

use std::sync::Arc;

use bytes::Bytes;
use futures::future::join_all;
use percent_encoding::percent_decode_str;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

use super::client::HttpClient;
use crate::error::{Error, Result};

/// Name used when a URL has no usable last path segment
pub const FALLBACK_FILENAME: &str = "image";

/// Batch fetch configuration
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Maximum downloads in flight at once
    pub max_concurrent: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { max_concurrent: 8 }
    }
}

impl FetchConfig {
    /// Set the concurrency cap (at least 1)
    pub fn max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }
}

/// A downloaded image ready for archiving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// Source URL
    pub url: String,
    /// Archive entry name derived from the URL
    pub filename: String,
    /// Image payload
    pub bytes: Bytes,
}

/// Downloads image references concurrently
#[derive(Clone)]
pub struct BatchFetcher {
    client: HttpClient,
    semaphore: Arc<Semaphore>,
    max_concurrent: usize,
}

impl BatchFetcher {
    /// Create a fetcher over a shared client
    pub fn new(client: HttpClient, config: FetchConfig) -> Self {
        let max_concurrent = config.max_concurrent.max(1);
        Self {
            client,
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    /// Get the concurrency cap
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Fetch every URL and return the successes in input order.
    ///
    /// The result never contains entries for failed downloads; an empty
    /// result is not an error at this level.
    pub async fn fetch_all<I, S>(&self, urls: I) -> Vec<FetchedImage>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<String> = urls.into_iter().map(|u| u.as_ref().to_string()).collect();
        let attempted = urls.len();

        let results = join_all(urls.into_iter().map(|url| self.fetch_one(url))).await;
        let images: Vec<FetchedImage> = results.into_iter().flatten().collect();

        info!(
            attempted,
            downloaded = images.len(),
            failed = attempted - images.len(),
            "Image batch finished"
        );
        images
    }

    async fn fetch_one(&self, url: String) -> Option<FetchedImage> {
        let _permit = self.semaphore.acquire().await.ok()?;

        match self.try_fetch(&url).await {
            Ok(image) => {
                debug!(filename = %image.filename, bytes = image.bytes.len(), "Downloaded image");
                Some(image)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Image download failed");
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<FetchedImage> {
        let response = self.client.get(url).await?;
        if response.url.as_str() != url {
            debug!(url = %url, final_url = %response.url, "Image request redirected");
        }
        if !response.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: response.status_code(),
            });
        }

        Ok(FetchedImage {
            url: url.to_string(),
            filename: filename_from_url(url),
            bytes: response.body,
        })
    }
}

/// Last path segment of `url` with query and fragment removed, percent-decoded
pub fn filename_from_url(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string(),
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            path.rsplit('/').next().unwrap_or_default().to_string()
        }
    };

    // %2F must not turn into a directory inside the archive
    let name = percent_decode_str(&segment)
        .decode_utf8_lossy()
        .replace(['/', '\\'], "_");

    if name.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        name
    }
}
