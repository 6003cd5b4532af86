//! Dataset-wide headline figures shown before any analysis.

use serde::Serialize;

use ipl_model::{SeasonDataset, StatColumn};

use crate::outcome::{SummaryStat, Summarize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub rows: usize,
    /// Distinct player identifiers.
    pub players: usize,
    /// Sum over every row, nulls read as 0.
    pub total_runs: f64,
    pub first_season: Option<i32>,
    pub last_season: Option<i32>,
    /// Distinct known seasons.
    pub seasons: usize,
}

impl DatasetOverview {
    /// Seasons from first to last inclusive, gaps included.
    pub fn season_span(&self) -> Option<i32> {
        self.first_season
            .zip(self.last_season)
            .map(|(first, last)| last - first + 1)
    }
}

impl Summarize for DatasetOverview {
    fn summary(&self) -> Vec<SummaryStat> {
        let season = |value: Option<i32>| value.map(f64::from);
        vec![
            SummaryStat::count("rows", self.rows),
            SummaryStat::count("players", self.players),
            SummaryStat::number("total_runs", self.total_runs),
            SummaryStat::optional("first_season", season(self.first_season)),
            SummaryStat::optional("last_season", season(self.last_season)),
            SummaryStat::optional("season_span", season(self.season_span())),
            SummaryStat::count("seasons", self.seasons),
        ]
    }
}

/// Computes the overview. Never fails; an empty dataset gives zero counts
/// and no seasons.
pub fn dataset_overview(dataset: &SeasonDataset) -> DatasetOverview {
    let seasons = dataset.seasons();
    DatasetOverview {
        rows: dataset.len(),
        players: dataset.players().len(),
        total_runs: dataset
            .records()
            .iter()
            .map(|record| record.stat_or_zero(StatColumn::RunsScored))
            .sum(),
        first_season: seasons.first().copied(),
        last_season: seasons.last().copied(),
        seasons: seasons.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dataset, record};

    #[test]
    fn empty_dataset_has_no_span() {
        let overview = dataset_overview(&SeasonDataset::default());
        assert_eq!(overview.rows, 0);
        assert_eq!(overview.total_runs, 0.0);
        assert_eq!(overview.season_span(), None);
        assert_eq!(overview.summary()[5].value.to_string(), "-");
    }

    #[test]
    fn span_counts_gap_seasons() {
        let overview = dataset_overview(&dataset(vec![
            record("A", 2008, &[(StatColumn::RunsScored, 10.0)]),
            record("A", 2012, &[]),
        ]));
        assert_eq!(overview.seasons, 2);
        assert_eq!(overview.season_span(), Some(5));
    }
}
