// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authenticated session restore
//!
//! Reads an exported browser storage state (cookies and localStorage per
//! origin) and hands out one authenticated page per scrape:
//! - The credential file must exist before any browser is launched
//! - Expired cookies are dropped on load
//! - The page is torn down on every exit path via [`PageSession`]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::engine::{BrowserEngine, ProfilePage};
use crate::error::{Error, Result};

/// Default credential file name, looked up relative to the working directory
pub const DEFAULT_CREDENTIAL_FILE: &str = "instagram_cookies.json";

/// Exported browser session (Playwright `storage_state` layout)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageState {
    /// Cookies to install before navigating
    #[serde(default)]
    pub cookies: Vec<StoredCookie>,
    /// Per-origin localStorage
    #[serde(default)]
    pub origins: Vec<OriginState>,
}

/// A cookie as exported by the browser
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie belongs to
    #[serde(default)]
    pub domain: String,
    /// Path the cookie is valid for
    #[serde(default = "default_path")]
    pub path: String,
    /// Unix timestamp in seconds; `-1` marks a session cookie
    #[serde(default = "session_expiry")]
    pub expires: f64,
    /// HttpOnly flag
    #[serde(default)]
    pub http_only: bool,
    /// Secure flag
    #[serde(default)]
    pub secure: bool,
    /// SameSite attribute (`Strict`, `Lax` or `None`)
    #[serde(default)]
    pub same_site: Option<String>,
}

/// localStorage entries for one origin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginState {
    /// Origin, e.g. `https://www.instagram.com`
    pub origin: String,
    /// Stored key/value pairs
    #[serde(default)]
    pub local_storage: Vec<StorageEntry>,
}

/// A single localStorage item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageEntry {
    pub name: String,
    pub value: String,
}

fn default_path() -> String {
    "/".to_string()
}

fn session_expiry() -> f64 {
    -1.0
}

/// Files may hold the full state object or just the cookie array
#[derive(Deserialize)]
#[serde(untagged)]
enum StateFile {
    Full(StorageState),
    Cookies(Vec<StoredCookie>),
}

impl StoredCookie {
    /// Session cookies never expire on load
    pub fn is_session(&self) -> bool {
        self.expires < 0.0
    }

    /// Check whether the cookie expired before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.is_session() {
            return false;
        }
        match DateTime::<Utc>::from_timestamp(self.expires as i64, 0) {
            Some(expiry) => expiry <= now,
            None => false,
        }
    }
}

impl StorageState {
    /// Parse a storage state document
    pub fn from_json(json: &str) -> Result<Self> {
        let state = match serde_json::from_str::<StateFile>(json)? {
            StateFile::Full(state) => state,
            StateFile::Cookies(cookies) => StorageState {
                cookies,
                origins: Vec::new(),
            },
        };
        Ok(state.without_expired(Utc::now()))
    }

    /// Read and parse a credential file
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
            .map_err(|e| Error::credential(format!("{}: {}", path.display(), e)))
    }

    /// Drop cookies that expired before `now`
    pub fn without_expired(mut self, now: DateTime<Utc>) -> Self {
        let before = self.cookies.len();
        self.cookies.retain(|c| !c.is_expired_at(now));
        let dropped = before - self.cookies.len();
        if dropped > 0 {
            warn!(dropped, "Skipping expired session cookies");
        }
        self
    }

    /// localStorage as `origin -> (key -> value)`
    pub fn local_storage_by_origin(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.origins
            .iter()
            .filter(|o| !o.local_storage.is_empty())
            .map(|o| {
                let items = o
                    .local_storage
                    .iter()
                    .map(|e| (e.name.clone(), e.value.clone()))
                    .collect();
                (o.origin.clone(), items)
            })
            .collect()
    }

    /// Whether the state carries anything to restore
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.origins.iter().all(|o| o.local_storage.is_empty())
    }
}

/// Hands out authenticated pages backed by a fresh browser each time
pub struct SessionProvider<E> {
    engine: E,
    credential_path: PathBuf,
}

impl<E: BrowserEngine> SessionProvider<E> {
    /// Create a provider for the given engine and credential file
    pub fn new(engine: E, credential_path: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            credential_path: credential_path.into(),
        }
    }

    /// Get the credential path
    pub fn credential_path(&self) -> &Path {
        &self.credential_path
    }

    /// Get the engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Launch a browser with the stored session and return its page.
    ///
    /// Fails with [`Error::CredentialNotFound`] before anything is spawned
    /// when the credential file is missing.
    pub async fn open(&self) -> Result<PageSession> {
        let path = &self.credential_path;
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(Error::CredentialNotFound { path: path.clone() });
        }

        let state = StorageState::load(path).await?;
        if state.is_empty() {
            warn!(path = %path.display(), "Credential file holds no cookies or storage");
        }
        debug!(
            cookies = state.cookies.len(),
            origins = state.origins.len(),
            "Restoring browser session"
        );

        let page = self.engine.launch(&state).await?;
        info!("Browser session opened");
        Ok(PageSession::new(page))
    }
}

/// Scoped ownership of an authenticated page.
///
/// Prefer [`PageSession::close`]. If the guard is dropped without it (early
/// return, panic, cancelled future) teardown is spawned on the runtime the
/// session was opened on.
pub struct PageSession {
    page: Box<dyn ProfilePage>,
    closed: bool,
    runtime: tokio::runtime::Handle,
}

impl PageSession {
    pub(crate) fn new(page: Box<dyn ProfilePage>) -> Self {
        Self {
            page,
            closed: false,
            runtime: tokio::runtime::Handle::current(),
        }
    }

    /// Borrow the page
    pub fn page(&mut self) -> &mut dyn ProfilePage {
        self.page.as_mut()
    }

    /// Close the page and the browser behind it
    pub async fn close(mut self) -> Result<()> {
        self.closed = true;
        let result = self.page.close().await;
        debug!("Browser session closed");
        result
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        debug!("Browser session dropped without close, tearing down in background");
        let mut page = std::mem::replace(&mut self.page, Box::new(Released));
        self.runtime.spawn(async move {
            if let Err(e) = page.close().await {
                warn!(error = %e, "Background browser teardown failed");
            }
        });
    }
}

/// Stands in for a page whose teardown has been handed off
struct Released;

#[async_trait]
impl ProfilePage for Released {
    async fn goto(&mut self, _url: &str) -> Result<()> {
        Err(released())
    }

    async fn visible_text(&mut self) -> Result<String> {
        Err(released())
    }

    async fn count_links_with_prefix(&mut self, _prefix: &str) -> Result<usize> {
        Err(released())
    }

    async fn scroll_height(&mut self) -> Result<u64> {
        Err(released())
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        Err(released())
    }

    async fn content(&mut self) -> Result<String> {
        Err(released())
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

fn released() -> Error {
    Error::browser("page session already released")
}
