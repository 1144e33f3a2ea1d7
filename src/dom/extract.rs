// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Image reference extraction from rendered markup

use std::collections::BTreeSet;

use tracing::debug;

use super::parser::{attribute, for_each_element, parse_html};

/// Substring identifying post images served by the platform CDN
pub const DEFAULT_CDN_MARKER: &str = "scontent";

/// Collect the `src` of every `<img>` whose value contains `marker`.
///
/// Values are kept verbatim: no resolution of relative paths, no
/// normalization. Deduplication is by exact string.
pub fn extract_image_urls(markup: &str, marker: &str) -> BTreeSet<String> {
    let dom = parse_html(markup);
    let mut urls = BTreeSet::new();
    let mut images_seen = 0usize;

    for_each_element(&dom, |tag, attrs| {
        if !tag.eq_ignore_ascii_case("img") {
            return;
        }
        images_seen += 1;
        if let Some(src) = attribute(attrs, "src") {
            if src.contains(marker) {
                urls.insert(src.to_string());
            }
        }
    });

    debug!(images_seen, matched = urls.len(), "Extracted image references");
    urls
}
