//! Fixture builders for unit tests.

use ipl_model::{SeasonDataset, SeasonRecord, StatColumn};

pub(crate) fn record(player: &str, season: i32, stats: &[(StatColumn, f64)]) -> SeasonRecord {
    let mut record = SeasonRecord::new(player, Some(season)).unwrap();
    for (column, value) in stats {
        record.set_stat(*column, Some(*value));
    }
    record
}

pub(crate) fn dataset(records: Vec<SeasonRecord>) -> SeasonDataset {
    SeasonDataset::from_records(records)
}

pub(crate) fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
