//! Tests for the canonical dataset types.

use std::collections::BTreeSet;

use ipl_model::{SeasonDataset, SeasonRecord, StatColumn, TextColumn};

fn record(player: &str, season: i32, runs: f64) -> SeasonRecord {
    SeasonRecord::new(player, Some(season))
        .unwrap()
        .with_stat(StatColumn::RunsScored, runs)
}

#[test]
fn from_records_infers_present_columns() {
    let mut kohli = record("Virat Kohli", 2016, 973.0);
    kohli.set_text(TextColumn::HighestScore, Some("113".to_string()));
    let dataset = SeasonDataset::from_records(vec![
        kohli,
        record("MS Dhoni", 2016, 284.0).with_stat(StatColumn::CatchesTaken, 6.0),
    ]);

    assert!(dataset.has_column(StatColumn::RunsScored));
    assert!(dataset.has_column(StatColumn::CatchesTaken));
    assert!(!dataset.has_column(StatColumn::WicketsTaken));
    assert!(dataset.has_text_column(TextColumn::HighestScore));
    assert_eq!(dataset.missing_columns().len(), StatColumn::ALL.len() - 2);
}

#[test]
fn seasonal_from_skips_unknown_and_early_seasons() {
    let dataset = SeasonDataset::from_records(vec![
        record("A", 2009, 10.0),
        record("A", 2012, 20.0),
        SeasonRecord::new("B", None).unwrap(),
    ]);

    let seasons: Vec<i32> = dataset.seasonal_from(2010).map(|(season, _)| season).collect();
    assert_eq!(seasons, vec![2012]);
    assert_eq!(dataset.seasons(), BTreeSet::from([2009, 2012]));
    assert_eq!(dataset.players(), BTreeSet::from(["A", "B"]));
}

#[test]
fn records_for_keeps_source_order() {
    let dataset = SeasonDataset::from_records(vec![
        record("A", 2014, 1.0),
        record("B", 2013, 2.0),
        record("A", 2012, 3.0),
    ]);

    let runs: Vec<f64> = dataset
        .records_for("A")
        .map(|r| r.stat_or_zero(StatColumn::RunsScored))
        .collect();
    assert_eq!(runs, vec![1.0, 3.0]);
}

#[test]
fn dataset_serializes_with_column_names() {
    let dataset = SeasonDataset::from_records(vec![record("A", 2020, 40.0)]);
    let json = serde_json::to_string(&dataset).expect("serialize dataset");
    assert!(json.contains("\"Runs_Scored\":40.0"));

    let round: SeasonDataset = serde_json::from_str(&json).expect("deserialize dataset");
    assert_eq!(round, dataset);
}
