// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Chromium engine over CDP

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    CookieParam, CookieSameSite, SetUserAgentOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::config::BrowserConfig;
use super::engine::{BrowserEngine, ProfilePage};
use super::session::{StorageState, StoredCookie};
use crate::error::{Error, Result};

/// Launches one headless Chromium per session
#[derive(Debug, Clone, Default)]
pub struct ChromeEngine {
    config: BrowserConfig,
}

impl ChromeEngine {
    /// Create an engine with the given launch configuration
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Get the launch configuration
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    fn cdp_config(&self, profile_dir: &TempDir) -> Result<CdpConfig> {
        let mut builder = CdpConfig::builder()
            .user_data_dir(profile_dir.path())
            .window_size(self.config.viewport_width, self.config.viewport_height)
            .request_timeout(self.config.request_timeout)
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--mute-audio");

        if !self.config.headless {
            builder = builder.with_head();
        }
        if self.config.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref executable) = self.config.executable {
            builder = builder.chrome_executable(executable);
        }
        for arg in &self.config.extra_args {
            builder = builder.arg(arg.clone());
        }

        builder
            .build()
            .map_err(|e| Error::browser(format!("invalid browser config: {}", e)))
    }
}

#[async_trait]
impl BrowserEngine for ChromeEngine {
    async fn launch(&self, state: &StorageState) -> Result<Box<dyn ProfilePage>> {
        // Fresh profile per launch so concurrent sessions never share state
        let profile_dir = tempfile::Builder::new()
            .prefix("gramzip-profile-")
            .tempdir()?;
        let config = self.cdp_config(&profile_dir)?;

        info!(headless = self.config.headless, "Launching Chromium");
        let (mut browser, mut handler) = CdpBrowser::launch(config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {e}");
                }
            }
        });

        let page = match prepare_page(&browser, state, &self.config).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.kill().await;
                handler.abort();
                return Err(e);
            }
        };

        Ok(Box::new(ChromePage {
            browser,
            page,
            handler,
            _profile_dir: profile_dir,
            closed: false,
        }))
    }
}

async fn prepare_page(
    browser: &CdpBrowser,
    state: &StorageState,
    config: &BrowserConfig,
) -> Result<Page> {
    let cookies = cookie_params(state, &config.cookie_url);
    if !cookies.is_empty() {
        debug!(count = cookies.len(), "Installing session cookies");
        // Storage-level install: a blank tab has no URL to scope cookies to
        browser.set_cookies(cookies).await?;
    }

    let page = browser.new_page("about:blank").await?;
    page.execute(SetUserAgentOverrideParams::new(config.user_agent.clone()))
        .await?;

    if let Some(script) = storage_seed_script(state)? {
        page.execute(AddScriptToEvaluateOnNewDocumentParams::new(script))
            .await?;
    }

    Ok(page)
}

/// CDP parameters for every restorable cookie in `state`
fn cookie_params(state: &StorageState, fallback_url: &str) -> Vec<CookieParam> {
    state
        .cookies
        .iter()
        .filter_map(|c| match cookie_param(c, fallback_url) {
            Ok(param) => Some(param),
            Err(e) => {
                warn!(cookie = %c.name, "Skipping cookie: {}", e);
                None
            }
        })
        .collect()
}

/// Cookies exported without a domain are scoped to `fallback_url` instead
fn cookie_param(cookie: &StoredCookie, fallback_url: &str) -> std::result::Result<CookieParam, String> {
    let mut builder = CookieParam::builder()
        .name(cookie.name.clone())
        .value(cookie.value.clone())
        .path(cookie.path.clone())
        .secure(cookie.secure)
        .http_only(cookie.http_only);

    builder = if cookie.domain.is_empty() {
        builder.url(fallback_url.to_string())
    } else {
        builder.domain(cookie.domain.clone())
    };

    let same_site = match cookie.same_site.as_deref() {
        Some("Strict") => Some(CookieSameSite::Strict),
        Some("Lax") => Some(CookieSameSite::Lax),
        Some("None") => Some(CookieSameSite::None),
        _ => None,
    };
    if let Some(same_site) = same_site {
        builder = builder.same_site(same_site);
    }

    builder.build()
}

/// Script that replays the stored localStorage for whichever origin the
/// document loads on. `None` when there is nothing to restore.
fn storage_seed_script(state: &StorageState) -> Result<Option<String>> {
    let storage = state.local_storage_by_origin();
    if storage.is_empty() {
        return Ok(None);
    }

    let seed = serde_json::to_string(&storage)?;
    Ok(Some(format!(
        "(() => {{ const seed = {seed}; const items = seed[location.origin]; \
         if (!items) return; for (const [k, v] of Object.entries(items)) \
         {{ try {{ localStorage.setItem(k, v); }} catch (e) {{}} }} }})();"
    )))
}

/// A Chromium tab plus the process that owns it
pub struct ChromePage {
    browser: CdpBrowser,
    page: Page,
    handler: JoinHandle<()>,
    _profile_dir: TempDir,
    closed: bool,
}

async fn eval<T: serde::de::DeserializeOwned>(page: &Page, script: &str) -> Result<T> {
    page.evaluate(script.to_string())
        .await?
        .into_value::<T>()
        .map_err(|e| Error::browser(format!("unexpected script result: {}", e)))
}

#[async_trait]
impl ProfilePage for ChromePage {
    async fn goto(&mut self, url: &str) -> Result<()> {
        debug!(url = %url, "Navigating");
        match self.page.goto(url).await {
            Ok(_) => Ok(()),
            Err(CdpError::Timeout) => Err(Error::timeout("navigation", Some(url.to_string()))),
            Err(e) => Err(e.into()),
        }
    }

    async fn visible_text(&mut self) -> Result<String> {
        eval(&self.page, "document.body ? document.body.innerText : ''").await
    }

    async fn count_links_with_prefix(&mut self, prefix: &str) -> Result<usize> {
        let prefix = serde_json::to_string(prefix)?;
        let script = format!(
            "Array.from(document.querySelectorAll('a[href]')) \
             .filter(a => a.getAttribute('href').startsWith({prefix})).length"
        );
        eval(&self.page, &script).await
    }

    async fn scroll_height(&mut self) -> Result<u64> {
        let height: f64 = eval(&self.page, "document.body.scrollHeight").await?;
        Ok(height.max(0.0).round() as u64)
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight)".to_string())
            .await?;
        Ok(())
    }

    async fn content(&mut self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if let Err(e) = self.page.clone().close().await {
            debug!("Page close failed: {}", e);
        }
        let result = self.browser.close().await;
        if let Err(ref e) = result {
            warn!("Browser close failed, killing process: {}", e);
            let _ = self.browser.kill().await;
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
        info!("Chromium stopped");

        result.map(|_| ()).map_err(Error::from)
    }
}
