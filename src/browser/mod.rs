// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser engine and session handling
//!
//! [`BrowserEngine`] and [`ProfilePage`] are the seam between scraping logic
//! and the browser. [`ChromeEngine`] implements them over CDP;
//! [`SessionProvider`] restores the stored login into a fresh engine per
//! request and hands back a [`PageSession`] guard.

mod chrome;
mod config;
mod engine;
mod session;

pub use chrome::{ChromeEngine, ChromePage};
pub use config::BrowserConfig;
pub use engine::{BrowserEngine, ProfilePage};
pub use session::{
    OriginState, PageSession, SessionProvider, StorageEntry, StorageState, StoredCookie,
    DEFAULT_CREDENTIAL_FILE,
};
