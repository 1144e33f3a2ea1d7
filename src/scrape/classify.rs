// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Profile classification
//!
//! Decides from a freshly loaded profile page whether scraping can go on.
//! The not-found text is checked before posts are counted: a missing
//! profile also renders zero post links and must not read as private.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::config::ScrapeConfig;
use super::username::Username;
use crate::browser::ProfilePage;
use crate::error::{Error, Result};

/// What a loaded profile page turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileState {
    /// Public with at least one post
    Ok,
    /// The platform says the page does not exist
    NotFound,
    /// Private, or public with zero posts
    PrivateOrEmpty,
    /// Navigation did not finish in time
    TimedOut { timeout_ms: u64 },
}

impl ProfileState {
    /// Turn every non-`Ok` state into its typed error
    pub fn into_result(self, username: &Username) -> Result<()> {
        let username = username.to_string();
        match self {
            ProfileState::Ok => Ok(()),
            ProfileState::NotFound => Err(Error::ProfileNotFound { username }),
            ProfileState::PrivateOrEmpty => Err(Error::ProfilePrivateOrEmpty { username }),
            ProfileState::TimedOut { timeout_ms } => Err(Error::timed_out(username, timeout_ms)),
        }
    }
}

/// Load `username`'s profile on `page` and classify it
pub async fn classify(
    page: &mut dyn ProfilePage,
    username: &Username,
    config: &ScrapeConfig,
) -> Result<ProfileState> {
    let url = config.profile_url(username);
    let timeout_ms = duration_ms(config.navigation_timeout);
    debug!(url = %url, timeout_ms, "Navigating to profile");

    match tokio::time::timeout(config.navigation_timeout, page.goto(&url)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) if e.is_timeout() => {
            warn!(username = %username, error = %e, "Profile navigation timed out");
            return Ok(ProfileState::TimedOut { timeout_ms });
        }
        Ok(Err(e)) => return Err(e),
        Err(_) => {
            warn!(username = %username, timeout_ms, "Profile navigation timed out");
            return Ok(ProfileState::TimedOut { timeout_ms });
        }
    }

    let text = page.visible_text().await?;
    if config.unavailable_pattern.is_match(&text) {
        info!(username = %username, "Profile not found");
        return Ok(ProfileState::NotFound);
    }

    if !config.settle_interval.is_zero() {
        tokio::time::sleep(config.settle_interval).await;
    }

    let posts = page
        .count_links_with_prefix(&config.post_link_prefix(username))
        .await?;
    if posts == 0 {
        info!(username = %username, "Profile is private or has no posts");
        return Ok(ProfileState::PrivateOrEmpty);
    }

    debug!(username = %username, posts, "Profile has visible posts");
    Ok(ProfileState::Ok)
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
