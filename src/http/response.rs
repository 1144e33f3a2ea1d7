// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::StatusCode;
use url::Url;

/// Buffered HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
}

impl Response {
    /// Create a new response
    pub fn new(status: StatusCode, body: Bytes, url: Url) -> Self {
        Self { status, body, url }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }
}
