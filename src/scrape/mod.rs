// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Profile scraping
//!
//! Drives one authenticated page through classification, feed exhaustion
//! and image extraction:
//!
//! ```text
//! SessionProvider -> classify -> exhaust_feed -> extract_image_urls
//! ```

mod classify;
mod config;
mod feed;
mod scraper;
mod username;

pub use classify::{classify, ProfileState};
pub use config::{ScrapeConfig, DEFAULT_BASE_URL, DEFAULT_UNAVAILABLE_PATTERN};
pub use feed::{exhaust_feed, ExhaustReport, StopReason};
pub use scraper::ProfileScraper;
pub use username::Username;
