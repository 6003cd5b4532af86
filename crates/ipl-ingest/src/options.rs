//! Configuration options for cleaning.

use serde::{Deserialize, Serialize};

/// Treatment of rows whose season cell is present but not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnparsedSeasons {
    /// Exclude the row before deduplication.
    #[default]
    Drop,
    /// Keep the row with no season. Season-grouped analyses skip it.
    Keep,
}

/// Options controlling how a raw table is cleaned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// What to do with rows whose season cannot be parsed.
    pub unparsed_seasons: UnparsedSeasons,

    /// Batting averages above this value are data-entry errors and are nulled.
    pub batting_average_ceiling: f64,

    /// When set, bowling averages above this value are nulled as well.
    pub bowling_average_ceiling: Option<f64>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            unparsed_seasons: UnparsedSeasons::Drop,
            batting_average_ceiling: 100.0,
            bowling_average_ceiling: None,
        }
    }
}

impl IngestOptions {
    /// Strict variant: also clips bowling averages above 100.
    pub fn strict() -> Self {
        Self {
            bowling_average_ceiling: Some(100.0),
            ..Self::default()
        }
    }

    pub fn with_unparsed_seasons(mut self, mode: UnparsedSeasons) -> Self {
        self.unparsed_seasons = mode;
        self
    }

    /// Stable byte encoding used in cache keys.
    pub(crate) fn fingerprint(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(18);
        bytes.push(match self.unparsed_seasons {
            UnparsedSeasons::Drop => 0,
            UnparsedSeasons::Keep => 1,
        });
        bytes.extend_from_slice(&self.batting_average_ceiling.to_bits().to_le_bytes());
        match self.bowling_average_ceiling {
            Some(ceiling) => {
                bytes.push(1);
                bytes.extend_from_slice(&ceiling.to_bits().to_le_bytes());
            }
            None => bytes.push(0),
        }
        bytes
    }
}
