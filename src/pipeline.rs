// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Username in, zip archive out
//!
//! [`Downloader`] strings the scraper, the batch fetcher and the archive
//! builder together and applies the request-level policy: nothing to
//! download and nothing downloaded are both failures.

use std::path::PathBuf;

use tracing::info;

use crate::archive::build_archive;
use crate::browser::{BrowserConfig, BrowserEngine, ChromeEngine, SessionProvider, DEFAULT_CREDENTIAL_FILE};
use crate::error::{Error, Result};
use crate::http::{BatchFetcher, FetchConfig, HttpClient, HttpClientConfig};
use crate::scrape::{ProfileScraper, ScrapeConfig, Username};

/// Name of the archive produced for `username`
pub fn archive_filename(username: &str) -> String {
    format!("{}_photos.zip", username)
}

/// A finished download
#[derive(Debug, Clone)]
pub struct ProfileArchive {
    pub username: String,
    /// `<username>_photos.zip`
    pub filename: String,
    /// Zip bytes
    pub bytes: Vec<u8>,
    /// Unique image references found on the profile
    pub discovered: usize,
    /// Images that made it into the archive
    pub downloaded: usize,
}

/// Everything needed to build a Chrome-backed [`Downloader`]
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    pub credential_path: PathBuf,
    pub browser: BrowserConfig,
    pub scrape: ScrapeConfig,
    pub http: HttpClientConfig,
    pub fetch: FetchConfig,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            credential_path: PathBuf::from(DEFAULT_CREDENTIAL_FILE),
            browser: BrowserConfig::default(),
            scrape: ScrapeConfig::default(),
            http: HttpClientConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

/// Scrapes a profile and packs its images
pub struct Downloader<E> {
    scraper: ProfileScraper<E>,
    fetcher: BatchFetcher,
}

impl Downloader<ChromeEngine> {
    /// Build a downloader that drives a local Chromium
    pub fn from_config(config: DownloaderConfig) -> Result<Self> {
        let browser = config.browser.cookie_url(config.scrape.base_url.clone());
        let sessions = SessionProvider::new(ChromeEngine::new(browser), config.credential_path);
        let client = HttpClient::with_config(config.http)?;
        Ok(Self::new(
            ProfileScraper::new(sessions, config.scrape),
            BatchFetcher::new(client, config.fetch),
        ))
    }
}

impl<E: BrowserEngine> Downloader<E> {
    /// Create a downloader from its parts
    pub fn new(scraper: ProfileScraper<E>, fetcher: BatchFetcher) -> Self {
        Self { scraper, fetcher }
    }

    /// Download every post image of `username` into one archive
    pub async fn download(&self, username: &str) -> Result<ProfileArchive> {
        let username = Username::parse(username)?;

        let urls = self.scraper.scrape(&username).await?;
        if urls.is_empty() {
            return Err(Error::NoImagesFound {
                username: username.to_string(),
            });
        }

        let images = self.fetcher.fetch_all(&urls).await;
        if images.is_empty() {
            return Err(Error::AllDownloadsFailed {
                username: username.to_string(),
                attempted: urls.len(),
            });
        }

        let downloaded = images.len();
        let bytes = tokio::task::spawn_blocking(move || build_archive(&images))
            .await
            .map_err(|e| Error::other(format!("archive task failed: {}", e)))??;

        let filename = archive_filename(username.as_str());
        info!(
            username = %username,
            discovered = urls.len(),
            downloaded,
            size = bytes.len(),
            filename = %filename,
            "Archive ready"
        );

        Ok(ProfileArchive {
            username: username.to_string(),
            filename,
            bytes,
            discovered: urls.len(),
            downloaded,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::error::ErrorKind;
    use crate::test_helpers::{credential_file, ScriptedEngine, ScriptedPage};

    fn downloader(page: ScriptedPage, credentials: &std::path::Path) -> Downloader<ScriptedEngine> {
        let config = ScrapeConfig::immediate().cdn_marker("/cdn/");
        let scraper = ProfileScraper::new(SessionProvider::new(ScriptedEngine::new(page), credentials), config);
        let fetcher = BatchFetcher::new(HttpClient::new().unwrap(), FetchConfig::default());
        Downloader::new(scraper, fetcher)
    }

    fn feed(srcs: &[String]) -> String {
        let imgs: String = srcs.iter().map(|s| format!(r#"<img src="{}">"#, s)).collect();
        format!("<html><body>{}<img src=\"/static/logo.png\"></body></html>", imgs)
    }

    #[test]
    fn test_chrome_cookies_follow_profile_host() {
        let config = DownloaderConfig {
            scrape: ScrapeConfig::new().base_url("http://localhost:8080/"),
            ..Default::default()
        };

        let downloader = Downloader::from_config(config).unwrap();
        let engine = downloader.scraper.sessions().engine();
        assert_eq!(engine.config().cookie_url, "http://localhost:8080");
    }

    #[test]
    fn test_archive_filename() {
        assert_eq!(archive_filename("test_user"), "test_user_photos.zip");
    }

    #[tokio::test]
    async fn test_download_skips_failed_images() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cdn/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"aaa".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cdn/b.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"bbb".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cdn/gone.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let srcs: Vec<String> = ["a.jpg", "b.jpg", "gone.jpg"]
            .iter()
            .map(|n| format!("{}/cdn/{}", server.uri(), n))
            .collect();
        let (_dir, creds) = credential_file();
        let page = ScriptedPage::profile("test_user", 3).with_markup(feed(&srcs));
        let log = page.log();

        let archive = downloader(page, &creds).download("test_user").await.unwrap();

        assert_eq!(archive.filename, "test_user_photos.zip");
        assert_eq!(archive.discovered, 3);
        assert_eq!(archive.downloaded, 2);
        assert_eq!(log.lock().unwrap().closes, 1);

        let zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        let mut names: Vec<&str> = zip.file_names().collect();
        names.sort();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }

    #[tokio::test]
    async fn test_no_images_found() {
        let (_dir, creds) = credential_file();
        let page = ScriptedPage::profile("test_user", 1).with_markup(feed(&[]));

        let err = downloader(page, &creds).download("test_user").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NoImagesFound);
        assert_eq!(err.username(), Some("test_user"));
    }

    #[tokio::test]
    async fn test_all_downloads_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let srcs = vec![
            format!("{}/cdn/1.jpg", server.uri()),
            format!("{}/cdn/2.jpg", server.uri()),
        ];
        let (_dir, creds) = credential_file();
        let page = ScriptedPage::profile("test_user", 2).with_markup(feed(&srcs));

        let err = downloader(page, &creds).download("test_user").await.unwrap_err();

        assert!(matches!(
            err,
            Error::AllDownloadsFailed { attempted: 2, ref username } if username == "test_user"
        ));
    }

    #[tokio::test]
    async fn test_invalid_username_rejected_before_launch() {
        let (_dir, creds) = credential_file();
        let engine = ScriptedEngine::new(ScriptedPage::new());
        let launches = engine.launches();
        let scraper = ProfileScraper::new(SessionProvider::new(engine, &creds), ScrapeConfig::immediate());
        let fetcher = BatchFetcher::new(HttpClient::new().unwrap(), FetchConfig::default());

        let err = Downloader::new(scraper, fetcher).download("two words").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidUsername);
        assert_eq!(launches.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_profile_errors_pass_through() {
        let (_dir, creds) = credential_file();
        let page = ScriptedPage::new().with_text("Sorry, this page isn't available.");

        let err = downloader(page, &creds).download("ghost_user_404").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProfileNotFound);
    }
}
