//! The canonical, cleaned season-record dataset.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::SeasonRecord;
use crate::schema::{StatColumn, TextColumn};

/// Cleaned, deduplicated, type-coerced season records.
///
/// The set of numeric columns present in the source is tracked explicitly,
/// so an absent column is a typed state rather than a lookup failure.
/// Analyses only read from a dataset; it is never mutated after cleaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonDataset {
    columns: BTreeSet<StatColumn>,
    text_columns: BTreeSet<TextColumn>,
    records: Vec<SeasonRecord>,
}

impl SeasonDataset {
    pub fn new(
        columns: BTreeSet<StatColumn>,
        text_columns: BTreeSet<TextColumn>,
        records: Vec<SeasonRecord>,
    ) -> Self {
        Self {
            columns,
            text_columns,
            records,
        }
    }

    /// Builds a dataset whose declared columns are inferred from the values
    /// present in `records`.
    pub fn from_records(records: Vec<SeasonRecord>) -> Self {
        let columns = records
            .iter()
            .flat_map(SeasonRecord::stat_columns)
            .collect();
        let text_columns = records
            .iter()
            .flat_map(|record| {
                TextColumn::ALL
                    .into_iter()
                    .filter(|column| record.text(*column).is_some())
            })
            .collect();
        Self::new(columns, text_columns, records)
    }

    /// Whether the source declared `column`.
    pub fn has_column(&self, column: StatColumn) -> bool {
        self.columns.contains(&column)
    }

    pub fn has_text_column(&self, column: TextColumn) -> bool {
        self.text_columns.contains(&column)
    }

    pub fn columns(&self) -> &BTreeSet<StatColumn> {
        &self.columns
    }

    pub fn text_columns(&self) -> &BTreeSet<TextColumn> {
        &self.text_columns
    }

    /// Declared numeric columns the source did not provide.
    pub fn missing_columns(&self) -> Vec<StatColumn> {
        StatColumn::ALL
            .into_iter()
            .filter(|column| !self.columns.contains(column))
            .collect()
    }

    pub fn records(&self) -> &[SeasonRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records for one player in source order.
    pub fn records_for<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a SeasonRecord> {
        self.records
            .iter()
            .filter(move |record| record.player() == player)
    }

    /// Records with a known season at or after `min_season`, paired with it.
    pub fn seasonal_from(&self, min_season: i32) -> impl Iterator<Item = (i32, &SeasonRecord)> {
        self.records.iter().filter_map(move |record| {
            record
                .season()
                .filter(|season| *season >= min_season)
                .map(|season| (season, record))
        })
    }

    /// Distinct player identifiers.
    pub fn players(&self) -> BTreeSet<&str> {
        self.records.iter().map(SeasonRecord::player).collect()
    }

    /// Distinct known seasons in ascending order.
    pub fn seasons(&self) -> BTreeSet<i32> {
        self.records.iter().filter_map(SeasonRecord::season).collect()
    }
}
