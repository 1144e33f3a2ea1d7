// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Lazy-load exhaustion by scrolling

use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::config::ScrapeConfig;
use crate::browser::ProfilePage;
use crate::error::Result;

/// Why scrolling stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A scroll produced no new content
    Stabilized,
    /// `max_scroll_rounds` reached
    RoundLimit,
    /// `scroll_budget` spent
    Budget,
}

/// Outcome of [`exhaust_feed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustReport {
    pub rounds: usize,
    pub final_height: u64,
    pub stop_reason: StopReason,
}

/// Scroll to the bottom until the document height stops growing.
///
/// Each round scrolls, waits `scroll_interval` and re-measures. The loop
/// also ends at the configured round limit or time budget; both are logged
/// and are not errors, the caller extracts whatever has loaded.
pub async fn exhaust_feed(
    page: &mut dyn ProfilePage,
    config: &ScrapeConfig,
) -> Result<ExhaustReport> {
    let started = Instant::now();
    let mut height = page.scroll_height().await?;
    let mut rounds = 0usize;

    let stop_reason = loop {
        if let Some(limit) = config.max_scroll_rounds {
            if rounds >= limit {
                warn!(rounds, height, "Scroll round limit reached, feed may be incomplete");
                break StopReason::RoundLimit;
            }
        }
        if let Some(budget) = config.scroll_budget {
            if started.elapsed() >= budget {
                warn!(
                    rounds,
                    height,
                    budget_secs = budget.as_secs(),
                    "Scroll budget spent, feed may be incomplete"
                );
                break StopReason::Budget;
            }
        }

        page.scroll_to_bottom().await?;
        rounds += 1;
        tokio::time::sleep(config.scroll_interval).await;

        let new_height = page.scroll_height().await?;
        debug!(round = rounds, height = new_height, "Scrolled");
        if new_height == height {
            break StopReason::Stabilized;
        }
        height = new_height;
    };

    info!(rounds, final_height = height, reason = ?stop_reason, "Feed exhausted");
    Ok(ExhaustReport {
        rounds,
        final_height: height,
        stop_reason,
    })
}
