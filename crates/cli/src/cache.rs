// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-document outline cache.
//!
//! Entries are keyed by document identity and valid for one document
//! version. Successful outlines expire after the cache TTL; the empty outline
//! of a file without Ginkgo imports is kept until the version changes or the
//! cache is cleared. Expiry is checked on access, so no timers outlive the
//! cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::outline::{Document, GinkgoCli, Outline, OutlineError, OutlineSource, Outliner};

/// Default lifetime of a cached outline.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    version: i64,
    outline: Arc<Outline>,
    /// `None` for entries that never expire.
    expires_at: Option<Instant>,
}

/// Cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: usize,
    /// Number of cache misses.
    pub misses: usize,
    /// Number of entries in cache.
    pub entries: usize,
    /// Entries that never expire.
    pub permanent: usize,
}

/// Outline cache in front of an [`Outliner`].
pub struct OutlineCache<S> {
    outliner: Outliner<S>,
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    hits: usize,
    misses: usize,
}

impl<S: OutlineSource> OutlineCache<S> {
    /// Create an empty cache with the default TTL.
    pub fn new(outliner: Outliner<S>) -> Self {
        Self {
            outliner,
            entries: HashMap::new(),
            ttl: DEFAULT_CACHE_TTL,
            hits: 0,
            misses: 0,
        }
    }

    /// Set the TTL on a fresh cache.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Outline a document, reusing the cached outline for its version.
    ///
    /// A file without Ginkgo imports yields an empty outline, cached until
    /// the document version changes. Other failures are returned and
    /// nothing is cached.
    pub fn from_document(&mut self, doc: &Document) -> Result<Arc<Outline>, OutlineError> {
        self.from_document_at(doc, Instant::now())
    }

    pub(crate) fn from_document_at(
        &mut self,
        doc: &Document,
        now: Instant,
    ) -> Result<Arc<Outline>, OutlineError> {
        self.evict_expired_at(now);

        if let Some(entry) = self.entries.get(&doc.uri)
            && entry.version == doc.version
        {
            self.hits += 1;
            return Ok(Arc::clone(&entry.outline));
        }
        self.misses += 1;

        match self.outliner.from_document(doc) {
            Ok(outline) => {
                self.insert(doc, Arc::clone(&outline), now.checked_add(self.ttl));
                Ok(outline)
            }
            Err(e) if e.is_no_ginkgo_imports() => {
                tracing::info!(
                    "{} (version {}) does not import ginkgo; caching empty outline",
                    doc.uri,
                    doc.version
                );
                let outline = Arc::new(Outline::empty());
                self.insert(doc, Arc::clone(&outline), None);
                Ok(outline)
            }
            Err(e) => {
                tracing::warn!("failed to outline {}: {}", doc.uri, e);
                Err(e)
            }
        }
    }

    fn insert(&mut self, doc: &Document, outline: Arc<Outline>, expires_at: Option<Instant>) {
        self.entries.insert(
            doc.uri.clone(),
            CacheEntry {
                version: doc.version,
                outline,
                expires_at,
            },
        );
    }

    /// Drop entries whose TTL has elapsed. Returns the number removed.
    pub fn evict_expired(&mut self) -> usize {
        self.evict_expired_at(Instant::now())
    }

    fn evict_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|uri, entry| {
            let keep = entry.expires_at.is_none_or(|at| now < at);
            if !keep {
                tracing::debug!("evicting outline of {} (version {})", uri, entry.version);
            }
            keep
        });
        before - self.entries.len()
    }

    /// Drop every entry, including permanent ones.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!("clearing {} cached outlines", self.entries.len());
        }
        self.entries.clear();
    }

    /// Change the TTL. Existing entries are dropped.
    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
        self.clear();
    }

    /// Replace the outliner. Existing entries are dropped.
    pub fn set_outliner(&mut self, outliner: Outliner<S>) {
        self.outliner = outliner;
        self.clear();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn outliner(&self) -> &Outliner<S> {
        &self.outliner
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
            permanent: self
                .entries
                .values()
                .filter(|e| e.expires_at.is_none())
                .count(),
        }
    }
}

impl OutlineCache<GinkgoCli> {
    /// Build a cache backed by the configured ginkgo binary.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Outliner::new(ginkgo_from_config(config))).with_ttl(config.cache_ttl)
    }

    /// React to a configuration change.
    ///
    /// A different ginkgo path replaces the outliner; a different TTL resets
    /// it. Either drops every cached outline. Returns true if anything
    /// changed.
    pub fn apply_config(&mut self, config: &Config) -> bool {
        let mut changed = false;
        if self.outliner.source().path() != config.ginkgo_path.as_path() {
            tracing::info!("ginkgo path changed to {}", config.ginkgo_path.display());
            let mut outliner = Outliner::new(ginkgo_from_config(config));
            if let Some(events) = self.outliner.events() {
                outliner = outliner.with_events(events.clone());
            }
            self.set_outliner(outliner);
            changed = true;
        }
        if self.ttl != config.cache_ttl {
            tracing::info!("cache ttl changed to {:?}", config.cache_ttl);
            self.set_ttl(config.cache_ttl);
            changed = true;
        }
        changed
    }
}

fn ginkgo_from_config(config: &Config) -> GinkgoCli {
    GinkgoCli::new(&config.ginkgo_path).with_timeout(config.outline_timeout)
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
