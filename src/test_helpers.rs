// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scripted browser doubles shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::browser::{BrowserEngine, ProfilePage, StorageState};
use crate::error::{Error, Result};

/// What a scripted page saw happen to it
#[derive(Debug, Default)]
pub struct PageLog {
    pub visited: Vec<String>,
    /// Probe names in call order
    pub calls: Vec<&'static str>,
    pub scrolls: usize,
    pub closes: usize,
}

/// A page whose behaviour is fixed up front
#[derive(Clone)]
pub struct ScriptedPage {
    text: String,
    hrefs: Vec<String>,
    heights: VecDeque<u64>,
    markup: String,
    goto_delay: Option<Duration>,
    goto_fails_with_timeout: bool,
    log: Arc<Mutex<PageLog>>,
}

impl ScriptedPage {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            hrefs: Vec::new(),
            heights: VecDeque::from([1000]),
            markup: "<html><body></body></html>".to_string(),
            goto_delay: None,
            goto_fails_with_timeout: false,
            log: Arc::new(Mutex::new(PageLog::default())),
        }
    }

    /// A profile with `posts` permalinks for `username`
    pub fn profile(username: &str, posts: usize) -> Self {
        let hrefs = (0..posts).map(|i| format!("/{}/p/C{}/", username, i)).collect();
        Self::new().with_hrefs(hrefs)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_hrefs(mut self, hrefs: Vec<String>) -> Self {
        self.hrefs = hrefs;
        self
    }

    /// Heights returned by successive reads; the last one repeats
    pub fn with_heights(mut self, heights: &[u64]) -> Self {
        self.heights = heights.iter().copied().collect();
        self
    }

    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = markup.into();
        self
    }

    pub fn with_goto_delay(mut self, delay: Duration) -> Self {
        self.goto_delay = Some(delay);
        self
    }

    pub fn with_goto_timeout(mut self) -> Self {
        self.goto_fails_with_timeout = true;
        self
    }

    pub fn log(&self) -> Arc<Mutex<PageLog>> {
        Arc::clone(&self.log)
    }

    fn record(&self, call: &'static str) {
        self.log.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl ProfilePage for ScriptedPage {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.record("goto");
        self.log.lock().unwrap().visited.push(url.to_string());
        if let Some(delay) = self.goto_delay {
            tokio::time::sleep(delay).await;
        }
        if self.goto_fails_with_timeout {
            return Err(Error::timeout("navigation", Some(url.to_string())));
        }
        Ok(())
    }

    async fn visible_text(&mut self) -> Result<String> {
        self.record("visible_text");
        Ok(self.text.clone())
    }

    async fn count_links_with_prefix(&mut self, prefix: &str) -> Result<usize> {
        self.record("count_links");
        Ok(self.hrefs.iter().filter(|h| h.starts_with(prefix)).count())
    }

    async fn scroll_height(&mut self) -> Result<u64> {
        self.record("scroll_height");
        let height = if self.heights.len() > 1 {
            self.heights.pop_front()
        } else {
            self.heights.front().copied()
        };
        Ok(height.unwrap_or(0))
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.record("scroll");
        self.log.lock().unwrap().scrolls += 1;
        Ok(())
    }

    async fn content(&mut self) -> Result<String> {
        self.record("content");
        Ok(self.markup.clone())
    }

    async fn close(&mut self) -> Result<()> {
        self.log.lock().unwrap().closes += 1;
        Ok(())
    }
}

/// Engine that hands out clones of one scripted page
pub struct ScriptedEngine {
    page: ScriptedPage,
    launches: Arc<AtomicUsize>,
}

impl ScriptedEngine {
    pub fn new(page: ScriptedPage) -> Self {
        Self {
            page,
            launches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn launches(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.launches)
    }
}

#[async_trait]
impl BrowserEngine for ScriptedEngine {
    async fn launch(&self, _state: &StorageState) -> Result<Box<dyn ProfilePage>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.page.clone()))
    }
}

/// Write a minimal credential file and return its directory guard and path
pub fn credential_file() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");
    std::fs::write(&path, r#"{"cookies": [], "origins": []}"#).unwrap();
    (dir, path)
}
