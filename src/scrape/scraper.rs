// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! One profile, one browser: classify, exhaust, extract.

use std::collections::BTreeSet;

use tracing::{info, warn};

use super::classify::classify;
use super::config::ScrapeConfig;
use super::feed::exhaust_feed;
use super::username::Username;
use crate::browser::{BrowserEngine, ProfilePage, SessionProvider};
use crate::dom::extract_image_urls;
use crate::error::{Error, Result};

/// Collects the CDN image references of a profile's feed
pub struct ProfileScraper<E> {
    sessions: SessionProvider<E>,
    config: ScrapeConfig,
}

impl<E: BrowserEngine> ProfileScraper<E> {
    /// Create a scraper
    pub fn new(sessions: SessionProvider<E>, config: ScrapeConfig) -> Self {
        Self { sessions, config }
    }

    /// Get the config
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Get the session provider
    pub fn sessions(&self) -> &SessionProvider<E> {
        &self.sessions
    }

    /// Scrape every image reference from `username`'s feed.
    ///
    /// The browser is closed on every path out of this call, including
    /// classification failures.
    pub async fn scrape(&self, username: &Username) -> Result<BTreeSet<String>> {
        info!(username = %username, "Scraping profile");

        let mut session = self.sessions.open().await?;
        let outcome = self.scrape_page(session.page(), username).await;

        if let Err(e) = session.close().await {
            warn!(username = %username, error = %e, "Browser teardown failed");
        }

        outcome.map_err(|e| self.promote_timeout(e, username))
    }

    async fn scrape_page(
        &self,
        page: &mut dyn ProfilePage,
        username: &Username,
    ) -> Result<BTreeSet<String>> {
        classify(page, username, &self.config)
            .await?
            .into_result(username)?;

        exhaust_feed(page, &self.config).await?;

        let markup = page.content().await?;
        let urls = extract_image_urls(&markup, &self.config.cdn_marker);
        info!(username = %username, count = urls.len(), "Found unique image URLs");
        Ok(urls)
    }

    /// Engine timeouts after navigation still belong to this scrape
    fn promote_timeout(&self, e: Error, username: &Username) -> Error {
        match e {
            Error::Timeout { .. } => Error::timed_out(
                username.as_str(),
                u64::try_from(self.config.navigation_timeout.as_millis()).unwrap_or(u64::MAX),
            ),
            other => other,
        }
    }
}
