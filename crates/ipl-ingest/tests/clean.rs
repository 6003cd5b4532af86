//! Integration tests for reading and cleaning season tables.

use std::collections::HashSet;
use std::fs;

use ipl_ingest::{
    DatasetCache, IngestError, IngestOptions, clean, clean_with_report, read_raw_table,
    read_source,
};
use ipl_model::{SeasonDataset, StatColumn};
use proptest::prelude::*;

fn load(contents: &str) -> SeasonDataset {
    let table = read_raw_table(contents.as_bytes()).expect("read csv");
    clean(&table, &IngestOptions::default()).expect("clean table")
}

#[test]
fn duplicate_key_keeps_first_row_then_clips_it() {
    let dataset = load(
        "Player_Name,Year,Batting_Average\n\
         A,2020,150\n\
         A,2020,40\n\
         B,2021,30\n",
    );

    assert_eq!(dataset.len(), 2);
    let a = &dataset.records()[0];
    assert_eq!((a.player(), a.season()), ("A", Some(2020)));
    // The first row wins; its 150 is an entry error and is nulled.
    assert_eq!(a.stat(StatColumn::BattingAverage), None);
    let b = &dataset.records()[1];
    assert_eq!(b.stat(StatColumn::BattingAverage), Some(30.0));
}

#[test]
fn rows_missing_player_or_season_are_dropped() {
    let table = read_raw_table(
        b"Player_Name,Year,Runs_Scored\n\
          ,2020,10\n\
          A,,20\n\
          A,2020,30\n",
    )
    .expect("read csv");
    let (dataset, report) = clean_with_report(&table, &IngestOptions::default()).expect("clean");

    assert_eq!(dataset.len(), 1);
    assert_eq!(report.missing_key_rows, 2);
    assert_eq!(report.rows_read, 3);
    assert_eq!(report.rows_kept, 1);
}

#[test]
fn player_identifier_is_trimmed_before_dedup() {
    let dataset = load("Player_Name,Year,Runs_Scored\n  A ,2020,10\nA,2020,99\n");

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].player(), "A");
    assert_eq!(dataset.records()[0].stat(StatColumn::RunsScored), Some(10.0));
}

#[test]
fn absent_columns_are_reported_not_fatal() {
    let table = read_raw_table(b"Player_Name,Year,Runs_Scored\nA,2020,10\n").expect("read");
    let (dataset, report) = clean_with_report(&table, &IngestOptions::default()).expect("clean");

    assert!(dataset.has_column(StatColumn::RunsScored));
    assert!(!dataset.has_column(StatColumn::WicketsTaken));
    assert!(report.absent_columns.contains(&StatColumn::WicketsTaken));
    assert_eq!(report.absent_columns.len(), StatColumn::ALL.len() - 1);
}

#[test]
fn cleaning_is_idempotent() {
    let contents = "Player_Name,Year,Runs_Scored,Batting_Average,Highest_Score\n\
                    Virat Kohli,2016,973,81.08,113\n\
                    Virat Kohli,2016,1,1,1\n\
                    MS Dhoni,2016,284,No stats,64*\n";
    let first = serde_json::to_vec(&load(contents)).expect("serialize");
    let second = serde_json::to_vec(&load(contents)).expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn cache_reuses_cleaned_dataset_for_same_source() {
    let source = b"Player_Name,Year,Runs_Scored\nA,2020,10\n";
    let mut cache = DatasetCache::new();

    let first = cache.load(source, &IngestOptions::default()).expect("load");
    let second = cache.load(source, &IngestOptions::default()).expect("load");
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    let strict = cache.load(source, &IngestOptions::strict()).expect("load");
    assert!(!std::sync::Arc::ptr_eq(&first, &strict));

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.entries, 2);
}

#[test]
fn cache_does_not_store_failures() {
    let mut cache = DatasetCache::new();
    let err = cache
        .load(b"Player_Name,Runs_Scored\nA,10\n", &IngestOptions::default())
        .unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { .. }));
    assert!(cache.is_empty());
}

#[test]
fn reads_source_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("seasons.csv");
    fs::write(&path, "Player_Name,Year,Runs_Scored\nA,2020,10\n").expect("write file");

    let bytes = read_source(&path).expect("read source");
    let mut cache = DatasetCache::new();
    let dataset = cache.load(&bytes, &IngestOptions::default()).expect("load");
    assert_eq!(dataset.len(), 1);

    let missing = read_source(&dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(missing, IngestError::FileRead { .. }));
}

fn csv_from_rows(rows: &[(usize, i32, f64)]) -> String {
    let mut contents = String::from("Player_Name,Year,Batting_Average\n");
    for (player, season, average) in rows {
        contents.push_str(&format!("P{player},{season},{average}\n"));
    }
    contents
}

proptest! {
    #[test]
    fn cleaned_rows_are_unique_first_and_clipped(
        rows in prop::collection::vec((0usize..4, 2018i32..2022, 0.0f64..300.0), 0..40)
    ) {
        let dataset = load(&csv_from_rows(&rows));

        let mut keys = HashSet::new();
        for record in dataset.records() {
            prop_assert!(keys.insert(record.key()));
            if let Some(average) = record.stat(StatColumn::BattingAverage) {
                prop_assert!(average <= 100.0);
            }
        }

        let mut expected = Vec::new();
        let mut seen = HashSet::new();
        for (player, season, average) in &rows {
            if seen.insert((*player, *season)) {
                expected.push((format!("P{player}"), *season, *average));
            }
        }
        prop_assert_eq!(dataset.len(), expected.len());
        for (record, (player, season, average)) in dataset.records().iter().zip(&expected) {
            prop_assert_eq!(record.player(), player.as_str());
            prop_assert_eq!(record.season(), Some(*season));
            let want = if *average > 100.0 { None } else { Some(*average) };
            prop_assert_eq!(record.stat(StatColumn::BattingAverage), want);
        }
    }
}
