//! Seams for the external highlighting service and its HTML cache.
//!
//! Highlighting itself is delegated: this module defines the trait the
//! service plugs into, a plain-text fallback, and a content-addressed cache
//! so identical blobs are highlighted once no matter where they appear.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Mutex;
use std::thread;

use sha1::{Digest, Sha1};

use crate::error::Result;
use crate::repo::Blob;

/// Produces HTML for a blob. Implementations wrap an external service.
pub trait Highlighter: Sync {
    fn highlight(&self, blob: &Blob) -> Result<String>;
}

/// Fallback highlighter: escaped content in a `<pre>` block. Also used when
/// a real highlighter fails on an individual blob.
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, blob: &Blob) -> Result<String> {
        Ok(plain_html(blob))
    }
}

fn plain_html(blob: &Blob) -> String {
    format!("<pre>{}</pre>", escape_html(&blob.as_bytes()))
}

/// Opaque key-to-HTML cache collaborator.
pub trait HighlightCache: Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Concurrent writers of the same key are harmless: the value is
    /// deterministic for a given key, so last writer wins.
    fn put(&self, key: &str, html: String);
}

/// In-process cache, good enough for a single-host browser.
#[derive(Default)]
pub struct MemoryCache {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> MemoryCache {
        MemoryCache::default()
    }

    pub fn len(&self) -> usize {
        self.map.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HighlightCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, html: String) {
        self.map.lock().unwrap().insert(key.to_string(), html);
    }
}

/// Cache key for a blob: content digest plus language tag, path independent.
/// Identical content across files and commits shares one entry.
pub fn cache_key(blob: &Blob) -> String {
    let mut hasher = Sha1::new();
    hasher.update(blob.as_bytes());

    let mut key = String::from("blob:");
    for byte in hasher.finalize() {
        write!(key, "{:02x}", byte).unwrap();
    }
    key.push(':');
    key.push_str(&blob.kind);
    key
}

/// Highlight one blob through the cache, falling back to plain text when the
/// highlighter fails.
pub fn highlight_blob(
    highlighter: &dyn Highlighter,
    cache: &dyn HighlightCache,
    blob: &Blob,
) -> String {
    let key = cache_key(blob);
    if let Some(html) = cache.get(&key) {
        return html;
    }

    let html = highlighter
        .highlight(blob)
        .unwrap_or_else(|_| plain_html(blob));
    cache.put(&key, html.clone());
    html
}

/// Highlight a batch of blobs concurrently, one task per blob.
///
/// All results are collected before returning; an individual failure falls
/// back to plain text rather than aborting the batch.
pub fn highlight_all(
    highlighter: &dyn Highlighter,
    cache: &dyn HighlightCache,
    blobs: &[Blob],
) -> Vec<String> {
    thread::scope(|scope| {
        let handles: Vec<_> = blobs
            .iter()
            .map(|blob| scope.spawn(move || highlight_blob(highlighter, cache, blob)))
            .collect();
        handles
            .into_iter()
            .zip(blobs)
            .map(|(handle, blob)| handle.join().unwrap_or_else(|_| plain_html(blob)))
            .collect()
    })
}

fn escape_html(content: &[u8]) -> String {
    let text = String::from_utf8_lossy(content);
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
