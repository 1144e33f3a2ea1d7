// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory zip archive of fetched images

use std::collections::HashMap;
use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::http::FetchedImage;

/// Pack images into a deflate-compressed zip, one flat entry per filename.
///
/// A repeated filename keeps the position of its first occurrence and the
/// bytes of its last. An empty slice produces a valid empty archive.
pub fn build_archive(images: &[FetchedImage]) -> Result<Vec<u8>> {
    let entries = last_write_wins(images);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in &entries {
        zip.start_file(*name, entry_options())?;
        zip.write_all(bytes)?;
    }
    let bytes = zip.finish()?.into_inner();

    debug!(entries = entries.len(), size = bytes.len(), "Archive built");
    Ok(bytes)
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn last_write_wins(images: &[FetchedImage]) -> Vec<(&str, &[u8])> {
    let mut entries: Vec<(&str, &[u8])> = Vec::with_capacity(images.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for image in images {
        let name = image.filename.as_str();
        match positions.get(name) {
            Some(&i) => {
                debug!(filename = name, "Duplicate archive entry, keeping last payload");
                entries[i].1 = &image.bytes[..];
            }
            None => {
                positions.insert(name, entries.len());
                entries.push((name, &image.bytes[..]));
            }
        }
    }
    entries
}
