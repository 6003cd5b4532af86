//! Season table ingestion.
//!
//! This crate turns a raw CSV performance table into the canonical
//! [`SeasonDataset`](ipl_model::SeasonDataset): it parses the source, coerces
//! numeric cells, clips impossible batting averages, and deduplicates by
//! (player, season).
//!
//! # Example
//!
//! ```ignore
//! use ipl_ingest::{DatasetCache, IngestOptions, read_source};
//!
//! let bytes = read_source(Path::new("data.csv"))?;
//! let mut cache = DatasetCache::new();
//! let dataset = cache.load(&bytes, &IngestOptions::default())?;
//! ```

mod cache;
mod clean;
mod csv;
mod error;
mod frame;
mod options;
mod parse;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{RawTable, read_raw_table, read_source};

// === Cleaning ===
pub use clean::{CleanReport, clean, clean_with_report};
pub use options::{IngestOptions, UnparsedSeasons};
pub use parse::{parse_f64, parse_season};

// === Memoization ===
pub use cache::{CacheStats, CachedDataset, DatasetCache, SourceKey};

// === Polars Export ===
pub use frame::{dataset_to_frame, preview_frame};
