//! Cleaning pipeline: raw table to canonical dataset.
//!
//! # Steps
//!
//! 1. Drop rows with a missing player identifier or season cell
//! 2. Null the `No stats` sentinel and coerce numeric cells (failures → null)
//! 3. Coerce the season; unparsed seasons are dropped or kept per options
//! 4. Null batting averages (and, when configured, bowling averages) above
//!    the ceiling
//! 5. Trim the player identifier
//! 6. Deduplicate by (player, season), first occurrence wins

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use ipl_model::{
    DeclaredColumn, PLAYER_COLUMN, SEASON_COLUMN, SeasonDataset, SeasonRecord, StatColumn,
    TextColumn, resolve_header,
};

use crate::csv::RawTable;
use crate::error::{IngestError, Result};
use crate::options::{IngestOptions, UnparsedSeasons};
use crate::parse::{is_no_stats, parse_f64, parse_season};

/// Row and cell counts gathered while cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub missing_key_rows: usize,
    pub unparsed_season_rows: usize,
    pub duplicate_rows: usize,
    pub no_stats_cells: usize,
    pub coercion_failures: usize,
    pub batting_averages_clipped: usize,
    pub bowling_averages_clipped: usize,
    /// Declared numeric columns the source did not provide.
    pub absent_columns: Vec<StatColumn>,
    /// Headers not in the catalog, or repeated after their first occurrence.
    pub ignored_headers: Vec<String>,
}

/// Positions of declared columns within the raw header row.
struct ColumnLayout {
    player: usize,
    season: usize,
    stats: Vec<(StatColumn, usize)>,
    text: Vec<(TextColumn, usize)>,
    ignored: Vec<String>,
}

impl ColumnLayout {
    fn resolve(headers: &[String]) -> Result<Self> {
        let mut player = None;
        let mut season = None;
        let mut stats: Vec<(StatColumn, usize)> = Vec::new();
        let mut text: Vec<(TextColumn, usize)> = Vec::new();
        let mut ignored = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            let assigned = match resolve_header(header) {
                Some(DeclaredColumn::Player) if player.is_none() => {
                    player = Some(idx);
                    true
                }
                Some(DeclaredColumn::Season) if season.is_none() => {
                    season = Some(idx);
                    true
                }
                Some(DeclaredColumn::Stat(column)) if stats.iter().all(|(c, _)| *c != column) => {
                    stats.push((column, idx));
                    true
                }
                Some(DeclaredColumn::Text(column)) if text.iter().all(|(c, _)| *c != column) => {
                    text.push((column, idx));
                    true
                }
                _ => false,
            };
            if !assigned {
                ignored.push(header.clone());
            }
        }
        let player = player.ok_or(IngestError::MissingColumn {
            column: PLAYER_COLUMN,
        })?;
        let season = season.ok_or(IngestError::MissingColumn {
            column: SEASON_COLUMN,
        })?;
        Ok(Self {
            player,
            season,
            stats,
            text,
            ignored,
        })
    }
}

/// Cleans a raw table into the canonical dataset.
pub fn clean(table: &RawTable, options: &IngestOptions) -> Result<SeasonDataset> {
    clean_with_report(table, options).map(|(dataset, _)| dataset)
}

/// Cleans a raw table and reports what each step removed or rewrote.
///
/// # Errors
///
/// Returns [`IngestError::MissingColumn`] when the player or season column
/// is absent.
pub fn clean_with_report(
    table: &RawTable,
    options: &IngestOptions,
) -> Result<(SeasonDataset, CleanReport)> {
    let span = info_span!("clean", rows = table.rows.len());
    let _guard = span.enter();

    let layout = ColumnLayout::resolve(&table.headers)?;
    let mut report = CleanReport {
        rows_read: table.rows.len(),
        ignored_headers: layout.ignored.clone(),
        ..CleanReport::default()
    };

    let mut cleaned: Vec<SeasonRecord> = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let player_cell = cell(row, layout.player);
        let season_cell = cell(row, layout.season);
        if player_cell.trim().is_empty() || season_cell.trim().is_empty() {
            report.missing_key_rows += 1;
            continue;
        }

        let season = parse_season(season_cell);
        if season.is_none() {
            match options.unparsed_seasons {
                UnparsedSeasons::Drop => {
                    trace!(season = season_cell, "dropping row with unparsed season");
                    report.unparsed_season_rows += 1;
                    continue;
                }
                UnparsedSeasons::Keep => {
                    trace!(season = season_cell, "keeping row with unparsed season");
                }
            }
        }

        let Ok(mut record) = SeasonRecord::new(player_cell, season) else {
            report.missing_key_rows += 1;
            continue;
        };

        for &(column, idx) in &layout.stats {
            let raw = cell(row, idx).trim();
            if raw.is_empty() {
                continue;
            }
            if is_no_stats(raw) {
                report.no_stats_cells += 1;
                continue;
            }
            match parse_f64(raw) {
                Some(value) => record.set_stat(column, Some(value)),
                None => {
                    trace!(column = %column, value = raw, "numeric coercion failed");
                    report.coercion_failures += 1;
                }
            }
        }
        for &(column, idx) in &layout.text {
            let raw = cell(row, idx).trim();
            if raw.is_empty() {
                continue;
            }
            if is_no_stats(raw) {
                report.no_stats_cells += 1;
                continue;
            }
            record.set_text(column, Some(raw.to_string()));
        }

        if clip(&mut record, StatColumn::BattingAverage, options.batting_average_ceiling) {
            report.batting_averages_clipped += 1;
        }
        if let Some(ceiling) = options.bowling_average_ceiling
            && clip(&mut record, StatColumn::BowlingAverage, ceiling)
        {
            report.bowling_averages_clipped += 1;
        }

        cleaned.push(record);
    }

    let before = cleaned.len();
    let records = dedupe_by_key(cleaned);
    report.duplicate_rows = before - records.len();
    report.rows_kept = records.len();

    let columns: BTreeSet<StatColumn> = layout.stats.iter().map(|(c, _)| *c).collect();
    let text_columns: BTreeSet<TextColumn> = layout.text.iter().map(|(c, _)| *c).collect();
    let dataset = SeasonDataset::new(columns, text_columns, records);
    report.absent_columns = dataset.missing_columns();

    if !report.absent_columns.is_empty() {
        debug!(
            absent = ?report.absent_columns,
            "declared columns absent from source; analyses treat them as null"
        );
    }
    info!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        missing_key_rows = report.missing_key_rows,
        unparsed_season_rows = report.unparsed_season_rows,
        duplicate_rows = report.duplicate_rows,
        batting_averages_clipped = report.batting_averages_clipped,
        bowling_averages_clipped = report.bowling_averages_clipped,
        "cleaning complete"
    );
    Ok((dataset, report))
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", String::as_str)
}

fn clip(record: &mut SeasonRecord, column: StatColumn, ceiling: f64) -> bool {
    match record.stat(column) {
        Some(value) if value > ceiling => {
            record.set_stat(column, None);
            true
        }
        _ => false,
    }
}

/// Keeps the first record for each (player, season) key in input order.
fn dedupe_by_key(records: Vec<SeasonRecord>) -> Vec<SeasonRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.key()))
        .collect()
}
