// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scrape timing and matching configuration

use std::time::Duration;

use regex::Regex;

use super::username::Username;
use crate::dom::DEFAULT_CDN_MARKER;
use crate::error::{Error, Result};

/// Default profile host
pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com";

/// Text the platform renders for a missing profile
pub const DEFAULT_UNAVAILABLE_PATTERN: &str = r"(?i)Sorry, this page isn't available";

/// Configuration for one profile scrape
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Profile host, without trailing slash
    pub base_url: String,
    /// Bound on the initial profile navigation
    pub navigation_timeout: Duration,
    /// Pause between loading the profile and counting posts
    pub settle_interval: Duration,
    /// Pause after each scroll before re-measuring
    pub scroll_interval: Duration,
    /// Stop scrolling after this many rounds
    pub max_scroll_rounds: Option<usize>,
    /// Stop scrolling after this much wall-clock time
    pub scroll_budget: Option<Duration>,
    /// Matches the rendered text of a missing profile
    pub unavailable_pattern: Regex,
    /// Substring identifying CDN-hosted post images
    pub cdn_marker: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            navigation_timeout: Duration::from_secs(60),
            settle_interval: Duration::from_secs(2),
            scroll_interval: Duration::from_secs(2),
            max_scroll_rounds: Some(200),
            scroll_budget: Some(Duration::from_secs(600)),
            unavailable_pattern: Regex::new(DEFAULT_UNAVAILABLE_PATTERN).unwrap(),
            cdn_marker: DEFAULT_CDN_MARKER.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Create a new scrape config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the profile host
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the navigation bound
    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Set the settle pause
    pub fn settle_interval(mut self, interval: Duration) -> Self {
        self.settle_interval = interval;
        self
    }

    /// Set the pause between scrolls
    pub fn scroll_interval(mut self, interval: Duration) -> Self {
        self.scroll_interval = interval;
        self
    }

    /// Set the scroll round limit (None = unlimited)
    pub fn max_scroll_rounds(mut self, rounds: Option<usize>) -> Self {
        self.max_scroll_rounds = rounds;
        self
    }

    /// Set the scroll time budget (None = unlimited)
    pub fn scroll_budget(mut self, budget: Option<Duration>) -> Self {
        self.scroll_budget = budget;
        self
    }

    /// Set the CDN marker
    pub fn cdn_marker(mut self, marker: impl Into<String>) -> Self {
        self.cdn_marker = marker.into();
        self
    }

    /// Replace the not-found pattern
    pub fn unavailable_pattern(mut self, pattern: &str) -> Result<Self> {
        self.unavailable_pattern = Regex::new(pattern)
            .map_err(|e| Error::Config(format!("invalid unavailable pattern: {}", e)))?;
        Ok(self)
    }

    /// Config with every pause removed, for scripted pages
    pub fn immediate() -> Self {
        Self {
            settle_interval: Duration::ZERO,
            scroll_interval: Duration::ZERO,
            ..Default::default()
        }
    }

    /// URL of a profile page
    pub fn profile_url(&self, username: &Username) -> String {
        format!("{}/{}/", self.base_url, username)
    }

    /// Href prefix shared by a profile's post permalinks
    pub fn post_link_prefix(&self, username: &Username) -> String {
        format!("/{}/p/", username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.navigation_timeout, Duration::from_secs(60));
        assert_eq!(config.settle_interval, Duration::from_secs(2));
        assert_eq!(config.scroll_interval, Duration::from_secs(2));
        assert_eq!(config.max_scroll_rounds, Some(200));
        assert_eq!(config.cdn_marker, "scontent");
    }

    #[test]
    fn test_urls() {
        let user = Username::parse("test_user").unwrap();
        let config = ScrapeConfig::new().base_url("http://localhost:8080/");

        assert_eq!(config.profile_url(&user), "http://localhost:8080/test_user/");
        assert_eq!(config.post_link_prefix(&user), "/test_user/p/");
    }

    #[test]
    fn test_unavailable_pattern() {
        let config = ScrapeConfig::default();
        assert!(config
            .unavailable_pattern
            .is_match("SORRY, THIS PAGE ISN'T AVAILABLE. The link may be broken."));
        assert!(!config.unavailable_pattern.is_match("123 posts"));

        assert!(matches!(
            ScrapeConfig::new().unavailable_pattern("(unclosed"),
            Err(Error::Config(_))
        ));
    }
}
