// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Gramzip CLI - download a profile's post images as a zip archive

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use gramzip::{
    BrowserConfig, Downloader, DownloaderConfig, Error, ErrorKind, FetchConfig, HttpClientConfig,
    ScrapeConfig, DEFAULT_CREDENTIAL_FILE,
};
use tracing::error;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Profile username
    username: String,

    /// Exported browser session (cookies and local storage)
    #[arg(long, env = "GRAMZIP_CREDENTIALS", default_value = DEFAULT_CREDENTIAL_FILE)]
    credentials: PathBuf,

    /// Directory the archive is written to
    #[arg(long, env = "GRAMZIP_OUT", default_value = ".")]
    out: PathBuf,

    /// Chrome/Chromium executable (auto-detected when omitted)
    #[arg(long, env = "GRAMZIP_CHROME")]
    chrome: Option<PathBuf>,

    /// Show the browser window
    #[arg(long, default_value_t = false)]
    headful: bool,

    /// Profile navigation timeout in seconds
    #[arg(long, default_value_t = 60)]
    navigation_timeout: u64,

    /// Maximum scroll rounds (0 = unlimited)
    #[arg(long, default_value_t = 200)]
    max_scroll_rounds: usize,

    /// Concurrent image downloads
    #[arg(long, default_value_t = 8)]
    concurrency: usize,

    /// Profile host
    #[arg(long, default_value = gramzip::scrape::DEFAULT_BASE_URL)]
    base_url: String,

    /// Substring identifying CDN image sources
    #[arg(long, default_value = gramzip::DEFAULT_CDN_MARKER)]
    cdn_marker: String,
}

impl Args {
    fn downloader_config(&self) -> DownloaderConfig {
        let mut browser = BrowserConfig::new().headless(!self.headful);
        if let Some(ref chrome) = self.chrome {
            browser = browser.executable(chrome);
        }

        let rounds = (self.max_scroll_rounds > 0).then_some(self.max_scroll_rounds);
        let scrape = ScrapeConfig::new()
            .base_url(&self.base_url)
            .navigation_timeout(Duration::from_secs(self.navigation_timeout))
            .max_scroll_rounds(rounds)
            .cdn_marker(&self.cdn_marker);

        DownloaderConfig {
            credential_path: self.credentials.clone(),
            browser,
            scrape,
            http: HttpClientConfig::default(),
            fetch: FetchConfig::default().max_concurrent(self.concurrency),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gramzip=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let downloader = match Downloader::from_config(args.downloader_config()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to set up downloader: {}", e);
            return ExitCode::from(1);
        }
    };

    let archive = match downloader.download(&args.username).await {
        Ok(a) => a,
        Err(e) => return report_failure(&e),
    };

    let path = args.out.join(&archive.filename);
    if let Err(e) = tokio::fs::write(&path, &archive.bytes).await {
        eprintln!("Failed to write {}: {}", path.display(), e);
        return ExitCode::from(1);
    }

    println!(
        "Saved {} of {} images to {} ({} bytes)",
        archive.downloaded,
        archive.discovered,
        path.display(),
        archive.bytes.len()
    );
    ExitCode::SUCCESS
}

fn report_failure(e: &Error) -> ExitCode {
    error!(
        error = %e,
        kind = ?e.kind(),
        username = e.username().unwrap_or_default(),
        "Download failed"
    );
    eprintln!("Error: {}", e);
    if e.is_retryable() {
        eprintln!("The profile took too long to load; try again later.");
    }
    ExitCode::from(exit_code(e.kind()))
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::InvalidUsername => 2,
        ErrorKind::ProfileNotFound => 3,
        ErrorKind::ProfilePrivateOrEmpty => 4,
        ErrorKind::ScrapeTimedOut => 5,
        ErrorKind::NoImagesFound | ErrorKind::AllDownloadsFailed => 6,
        ErrorKind::CredentialNotFound | ErrorKind::Unknown => 1,
    }
}
