// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parsing and image extraction
//!
//! Built on top of html5ever.

mod extract;
mod parser;

pub use extract::{extract_image_urls, DEFAULT_CDN_MARKER};
pub use parser::{attribute, for_each_element, parse_html};
