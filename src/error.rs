// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for gramzip
//!
//! Profile-level outcomes (not found, private, timed out, nothing to
//! download) are distinct variants carrying the username so a caller can
//! map each to its own response. Everything else collapses into the
//! `Unknown` class via [`Error::kind`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for gramzip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gramzip
#[derive(Error, Debug)]
pub enum Error {
    /// The session credential file does not exist
    #[error("credential file not found at {}; export the browser session state before scraping", .path.display())]
    CredentialNotFound { path: PathBuf },

    /// The profile page reports that it is unavailable
    #[error("profile '{username}' was not found")]
    ProfileNotFound { username: String },

    /// No post permalinks were rendered. Private profiles and public
    /// profiles with zero posts look identical from the grid.
    #[error("profile '{username}' is private or has no posts")]
    ProfilePrivateOrEmpty { username: String },

    /// Navigation did not finish within the configured bound
    #[error("timed out after {timeout_ms}ms while scraping profile '{username}'")]
    ScrapeTimedOut { username: String, timeout_ms: u64 },

    /// The loaded feed contained no CDN images
    #[error("no images found on profile '{username}'")]
    NoImagesFound { username: String },

    /// Every image download in the batch failed
    #[error("all {attempted} image downloads failed for profile '{username}'")]
    AllDownloadsFailed { username: String, attempted: usize },

    /// Username rejected before any work started
    #[error("invalid username '{0}'")]
    InvalidUsername(String),

    /// A browser operation exceeded the engine's own deadline
    #[error("{operation} timed out{}", .url.as_ref().map(|u| format!(" ({u})")).unwrap_or_default())]
    Timeout {
        operation: String,
        url: Option<String>,
    },

    /// Browser engine failure (launch, CDP, script evaluation)
    #[error("browser error: {0}")]
    Browser(String),

    /// Credential file exists but could not be interpreted
    #[error("credential error: {0}")]
    Credential(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Archive writing error
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of [`Error`] used by callers to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CredentialNotFound,
    ProfileNotFound,
    ProfilePrivateOrEmpty,
    ScrapeTimedOut,
    NoImagesFound,
    AllDownloadsFailed,
    InvalidUsername,
    Unknown,
}

impl Error {
    /// Create a new browser error
    pub fn browser<S: Into<String>>(msg: S) -> Self {
        Error::Browser(msg.into())
    }

    /// Create a new credential error
    pub fn credential<S: Into<String>>(msg: S) -> Self {
        Error::Credential(msg.into())
    }

    /// Create a timeout error for a username
    pub fn timed_out(username: impl Into<String>, timeout_ms: u64) -> Self {
        Error::ScrapeTimedOut {
            username: username.into(),
            timeout_ms,
        }
    }

    /// Create an engine timeout error
    pub fn timeout(operation: impl Into<String>, url: Option<String>) -> Self {
        Error::Timeout {
            operation: operation.into(),
            url,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CredentialNotFound { .. } => ErrorKind::CredentialNotFound,
            Error::ProfileNotFound { .. } => ErrorKind::ProfileNotFound,
            Error::ProfilePrivateOrEmpty { .. } => ErrorKind::ProfilePrivateOrEmpty,
            Error::ScrapeTimedOut { .. } => ErrorKind::ScrapeTimedOut,
            Error::NoImagesFound { .. } => ErrorKind::NoImagesFound,
            Error::AllDownloadsFailed { .. } => ErrorKind::AllDownloadsFailed,
            Error::InvalidUsername(_) => ErrorKind::InvalidUsername,
            _ => ErrorKind::Unknown,
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::ScrapeTimedOut { .. } | Error::Timeout { .. }
        )
    }

    /// Whether a caller may reasonably retry the whole request
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ScrapeTimedOut { .. })
    }

    /// HTTP status an outer web layer should answer with
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidUsername => 400,
            ErrorKind::ProfileNotFound | ErrorKind::NoImagesFound => 404,
            ErrorKind::ProfilePrivateOrEmpty => 403,
            ErrorKind::ScrapeTimedOut => 408,
            ErrorKind::CredentialNotFound
            | ErrorKind::AllDownloadsFailed
            | ErrorKind::Unknown => 500,
        }
    }

    /// Username the error refers to, if any
    pub fn username(&self) -> Option<&str> {
        match self {
            Error::ProfileNotFound { username }
            | Error::ProfilePrivateOrEmpty { username }
            | Error::ScrapeTimedOut { username, .. }
            | Error::NoImagesFound { username }
            | Error::AllDownloadsFailed { username, .. } => Some(username),
            Error::InvalidUsername(username) => Some(username),
            _ => None,
        }
    }
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        match e {
            chromiumoxide::error::CdpError::Timeout => Error::timeout("CDP request", None),
            other => Error::Browser(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_errors_embed_username() {
        let err = Error::ProfileNotFound {
            username: "ghost_user_404".to_string(),
        };
        assert!(err.to_string().contains("ghost_user_404"));
        assert_eq!(err.username(), Some("ghost_user_404"));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_status_mapping() {
        let private = Error::ProfilePrivateOrEmpty {
            username: "p".into(),
        };
        assert_eq!(private.status_code(), 403);

        let timeout = Error::timed_out("slow", 60_000);
        assert!(timeout.is_timeout());
        assert!(timeout.is_retryable());
        assert_eq!(timeout.status_code(), 408);

        let failed = Error::AllDownloadsFailed {
            username: "u".into(),
            attempted: 3,
        };
        assert_eq!(failed.kind(), ErrorKind::AllDownloadsFailed);
        assert_eq!(failed.status_code(), 500);

        assert_eq!(Error::InvalidUsername("a b".into()).status_code(), 400);
    }

    #[test]
    fn test_engine_timeout() {
        let err = Error::timeout("navigation", Some("https://example.com/".into()));
        assert!(err.is_timeout());
        assert!(!err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.to_string(), "navigation timed out (https://example.com/)");
        assert_eq!(Error::timeout("CDP request", None).to_string(), "CDP request timed out");
    }

    #[test]
    fn test_infrastructure_errors_are_unknown() {
        assert_eq!(Error::browser("crashed").kind(), ErrorKind::Unknown);
        assert_eq!(Error::credential("bad json").kind(), ErrorKind::Unknown);
        assert_eq!(Error::other("x").kind(), ErrorKind::Unknown);
        assert!(!Error::browser("crashed").is_retryable());
    }

    #[test]
    fn test_credential_not_found_message() {
        let err = Error::CredentialNotFound {
            path: PathBuf::from("/nope/cookies.json"),
        };
        assert!(err.to_string().contains("/nope/cookies.json"));
        assert_eq!(err.kind(), ErrorKind::CredentialNotFound);
    }
}
