//! Content-addressed memoization of cleaned datasets.
//!
//! Cleaning the same source bytes with the same options always yields the
//! same dataset, so [`DatasetCache`] stores each result under a SHA-256 key
//! of both. The cache is an ordinary value: callers own it and pass it
//! where needed, and tests start from a fresh one.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use ipl_model::SeasonDataset;

use crate::clean::{CleanReport, clean_with_report};
use crate::csv::read_raw_table;
use crate::error::Result;
use crate::options::IngestOptions;

/// Identity of a (source bytes, options) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceKey([u8; 32]);

impl SourceKey {
    /// Derives the key: sha256(options fingerprint || 0x00 || source).
    pub fn derive(source: &[u8], options: &IngestOptions) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(options.fingerprint());
        hasher.update([0u8]);
        hasher.update(source);
        Self(hasher.finalize().into())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A cleaned dataset together with the report produced while cleaning it.
#[derive(Debug, Clone)]
pub struct CachedDataset {
    pub dataset: Arc<SeasonDataset>,
    pub report: CleanReport,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// Memoizes cleaning by source content. No eviction.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<SourceKey, CachedDataset>,
    hits: usize,
    misses: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cleaned dataset for `source`, parsing and cleaning it only
    /// on the first request. Failures are not cached.
    pub fn load(&mut self, source: &[u8], options: &IngestOptions) -> Result<Arc<SeasonDataset>> {
        self.load_with_report(source, options)
            .map(|cached| cached.dataset)
    }

    pub fn load_with_report(
        &mut self,
        source: &[u8],
        options: &IngestOptions,
    ) -> Result<CachedDataset> {
        let key = SourceKey::derive(source, options);
        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            debug!(key = %key, "dataset cache hit");
            return Ok(cached.clone());
        }
        self.misses += 1;
        debug!(key = %key, bytes = source.len(), "dataset cache miss");
        let table = read_raw_table(source)?;
        let (dataset, report) = clean_with_report(&table, options)?;
        let cached = CachedDataset {
            dataset: Arc::new(dataset),
            report,
        };
        self.entries.insert(key, cached.clone());
        Ok(cached)
    }

    pub fn contains(&self, source: &[u8], options: &IngestOptions) -> bool {
        self.entries
            .contains_key(&SourceKey::derive(source, options))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
