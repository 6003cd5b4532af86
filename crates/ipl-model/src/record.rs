use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::schema::{StatColumn, TextColumn};

/// Placeholder rendered for a missing season in a record key.
pub const MISSING_SEASON_PLACEHOLDER: &str = "NaN";

/// One player's statistics for one season.
///
/// Numeric values are stored sparsely: a column without an entry is null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRecord {
    player: String,
    season: Option<i32>,
    stats: BTreeMap<StatColumn, f64>,
    text: BTreeMap<TextColumn, String>,
}

impl SeasonRecord {
    /// Creates an empty record. The player identifier is trimmed.
    pub fn new(player: impl Into<String>, season: Option<i32>) -> Result<Self> {
        let player = player.into();
        let trimmed = player.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyPlayer);
        }
        Ok(Self {
            player: trimmed.to_string(),
            season,
            stats: BTreeMap::new(),
            text: BTreeMap::new(),
        })
    }

    /// Builder-style setter used heavily by tests and fixtures.
    #[must_use]
    pub fn with_stat(mut self, column: StatColumn, value: f64) -> Self {
        self.set_stat(column, Some(value));
        self
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn season(&self) -> Option<i32> {
        self.season
    }

    pub fn stat(&self, column: StatColumn) -> Option<f64> {
        self.stats.get(&column).copied()
    }

    /// Value of `column`, substituting 0 for null.
    pub fn stat_or_zero(&self, column: StatColumn) -> f64 {
        self.stat(column).unwrap_or(0.0)
    }

    /// Sets or clears a numeric value. Non-finite values are stored as null.
    pub fn set_stat(&mut self, column: StatColumn, value: Option<f64>) {
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                self.stats.insert(column, v);
            }
            None => {
                self.stats.remove(&column);
            }
        }
    }

    pub fn text(&self, column: TextColumn) -> Option<&str> {
        self.text.get(&column).map(String::as_str)
    }

    pub fn set_text(&mut self, column: TextColumn, value: Option<String>) {
        match value {
            Some(v) => {
                self.text.insert(column, v);
            }
            None => {
                self.text.remove(&column);
            }
        }
    }

    /// Columns holding a non-null numeric value.
    pub fn stat_columns(&self) -> impl Iterator<Item = StatColumn> + '_ {
        self.stats.keys().copied()
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            player: self.player.clone(),
            season: self.season,
        }
    }
}

/// Composite deduplication key: player identifier plus season.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub player: String,
    pub season: Option<i32>,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.season {
            Some(season) => write!(f, "{}_{season}", self.player),
            None => write!(f, "{}_{MISSING_SEASON_PLACEHOLDER}", self.player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_player_and_rejects_blank() {
        let record = SeasonRecord::new("  MS Dhoni ", Some(2011)).unwrap();
        assert_eq!(record.player(), "MS Dhoni");
        assert_eq!(SeasonRecord::new("   ", Some(2011)), Err(ModelError::EmptyPlayer));
    }

    #[test]
    fn non_finite_values_are_null() {
        let mut record = SeasonRecord::new("A", Some(2020)).unwrap();
        record.set_stat(StatColumn::RunsScored, Some(f64::NAN));
        assert_eq!(record.stat(StatColumn::RunsScored), None);
        assert_eq!(record.stat_or_zero(StatColumn::RunsScored), 0.0);
    }

    #[test]
    fn key_renders_placeholder_for_missing_season() {
        let dated = SeasonRecord::new("A", Some(2020)).unwrap();
        let undated = SeasonRecord::new("A", None).unwrap();
        assert_eq!(dated.key().to_string(), "A_2020");
        assert_eq!(undated.key().to_string(), "A_NaN");
        assert_ne!(dated.key(), undated.key());
    }
}
