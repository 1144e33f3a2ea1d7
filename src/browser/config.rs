// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser launch configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::http::DEFAULT_USER_AGENT;
use crate::scrape::DEFAULT_BASE_URL;

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run without a visible window
    pub headless: bool,
    /// Path to a Chrome/Chromium executable (None = auto-detect)
    pub executable: Option<PathBuf>,
    /// User agent string
    pub user_agent: String,
    /// Timeout for individual CDP requests
    pub request_timeout: Duration,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Disable the Chromium sandbox (needed in most containers)
    pub no_sandbox: bool,
    /// Extra command-line arguments
    pub extra_args: Vec<String>,
    /// URL that restored cookies without a domain are scoped to
    pub cookie_url: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(60),
            viewport_width: 1280,
            viewport_height: 900,
            no_sandbox: false,
            extra_args: vec![],
            cookie_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl BrowserConfig {
    /// Create a new browser config
    pub fn new() -> Self {
        Self::default()
    }

    /// Show or hide the browser window
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Use a specific browser executable
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set CDP request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set viewport size
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Add an extra browser argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Set the URL that domain-less cookies are installed for
    pub fn cookie_url(mut self, url: impl Into<String>) -> Self {
        self.cookie_url = url.into();
        self
    }

    /// Config for running inside a container
    pub fn for_containers() -> Self {
        Self {
            no_sandbox: true,
            extra_args: vec!["--disable-dev-shm-usage".to_string()],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_config() {
        let config = BrowserConfig::new()
            .user_agent("Custom Agent")
            .request_timeout(Duration::from_secs(90))
            .headless(false);

        assert_eq!(config.user_agent, "Custom Agent");
        assert_eq!(config.request_timeout, Duration::from_secs(90));
        assert!(!config.headless);
    }

    #[test]
    fn test_container_preset() {
        let config = BrowserConfig::for_containers();
        assert!(config.no_sandbox);
        assert!(config.headless);
        assert!(config.extra_args.iter().any(|a| a == "--disable-dev-shm-usage"));
    }

    #[test]
    fn test_cookie_url() {
        assert_eq!(BrowserConfig::default().cookie_url, DEFAULT_BASE_URL);
        let config = BrowserConfig::new().cookie_url("http://localhost:8080");
        assert_eq!(config.cookie_url, "http://localhost:8080");
    }
}
