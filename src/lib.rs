// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Gramzip - Profile Image Archiver
//!
//! Downloads every post image of a social-media profile into one zip
//! archive, using a headless Chromium with a stored login session.
//!
//! ## Pipeline
//!
//! - Session: restore the exported cookies and local storage into a fresh
//!   browser per request
//! - Classification: not found, private or empty, timed out, or ok
//! - Feed exhaustion: scroll until lazy loading stops producing content
//! - Extraction: CDN `<img>` sources from the rendered markup
//! - Fetch: bounded concurrent downloads, failures dropped
//! - Archive: deflate zip held in memory
//!
//! ## Example
//!
//! ```rust,no_run
//! use gramzip::{Downloader, DownloaderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = Downloader::from_config(DownloaderConfig::default())?;
//!     let archive = downloader.download("test_user").await?;
//!
//!     std::fs::write(&archive.filename, &archive.bytes)?;
//!     println!("{} of {} images", archive.downloaded, archive.discovered);
//!
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod browser;
pub mod dom;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod scrape;

#[cfg(test)]
mod test_helpers;

// Re-exports for convenience

// Browser
pub use browser::{
    BrowserConfig, BrowserEngine, ChromeEngine, PageSession, ProfilePage, SessionProvider,
    StorageState, DEFAULT_CREDENTIAL_FILE,
};

// Scraping
pub use scrape::{
    classify, exhaust_feed, ExhaustReport, ProfileScraper, ProfileState, ScrapeConfig,
    StopReason, Username,
};

// Extraction, fetching, archiving
pub use archive::build_archive;
pub use dom::{extract_image_urls, DEFAULT_CDN_MARKER};
pub use http::{filename_from_url, BatchFetcher, FetchConfig, FetchedImage, HttpClient, HttpClientConfig};

// Pipeline
pub use pipeline::{archive_filename, Downloader, DownloaderConfig, ProfileArchive};

// Errors
pub use error::{Error, ErrorKind, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
