//! Data model for IPL season performance analysis.
//!
//! This crate holds the schema catalog (recognized columns and their
//! semantic kinds) and the canonical dataset produced by `ipl-ingest` and
//! consumed by `ipl-metrics`.

pub mod dataset;
pub mod error;
pub mod record;
pub mod schema;

pub use dataset::SeasonDataset;
pub use error::{ModelError, Result};
pub use record::{MISSING_SEASON_PLACEHOLDER, RecordKey, SeasonRecord};
pub use schema::{
    ColumnKind, DeclaredColumn, NO_STATS_SENTINEL, PLAYER_COLUMN, SEASON_COLUMN, StatColumn,
    TextColumn, resolve_header,
};
