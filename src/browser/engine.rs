// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Engine abstraction
//!
//! The scraping steps only talk to a [`ProfilePage`]. The production
//! implementation drives Chromium over CDP; tests drive scripted pages.

use async_trait::async_trait;

use super::session::StorageState;
use crate::error::Result;

/// A single loaded browser document, exclusively owned by one scrape.
///
/// Calls are sequential; no implementation is expected to support
/// concurrent interaction with the same page.
#[async_trait]
pub trait ProfilePage: Send {
    /// Navigate and wait for the load event.
    ///
    /// Engines report their own navigation timeouts as
    /// [`Error::Timeout`](crate::Error::Timeout).
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Rendered text of the document body (hidden elements excluded)
    async fn visible_text(&mut self) -> Result<String>;

    /// Number of anchors whose `href` attribute starts with `prefix`
    async fn count_links_with_prefix(&mut self, prefix: &str) -> Result<usize>;

    /// Current `document.body.scrollHeight`
    async fn scroll_height(&mut self) -> Result<u64>;

    /// Scroll the viewport to the bottom of the document
    async fn scroll_to_bottom(&mut self) -> Result<()>;

    /// Serialized markup of the current document
    async fn content(&mut self) -> Result<String>;

    /// Release the page and tear down the browser process behind it.
    /// Must be idempotent.
    async fn close(&mut self) -> Result<()>;
}

/// Something that can start a browser with a restored session
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// Launch one fresh browser process, apply the session state and
    /// return its only page.
    async fn launch(&self, state: &StorageState) -> Result<Box<dyn ProfilePage>>;
}
