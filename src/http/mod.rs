// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for image downloads
//!
//! A pooled reqwest client plus the bounded batch fetcher that turns image
//! references into archive-ready payloads.

mod client;
mod fetcher;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use fetcher::{filename_from_url, BatchFetcher, FetchConfig, FetchedImage, FALLBACK_FILENAME};
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
