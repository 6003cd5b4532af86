//! Box-plot statistics of one column at fixed season checkpoints.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::{quantile_sorted, round_to, sorted};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    pub column: StatColumn,
    pub seasons: Vec<i32>,
    /// A checkpoint is reported only with strictly more values than this.
    pub min_samples: usize,
    /// Whisker reach in multiples of the IQR.
    pub whisker_factor: f64,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            column: StatColumn::BattingAverage,
            seasons: vec![2010, 2015, 2020, 2024],
            min_samples: 5,
            whisker_factor: 1.5,
        }
    }
}

impl CheckpointConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seasons.is_empty() {
            return Err(ConfigError::Empty {
                analysis: "batting_average_checkpoints",
                field: "seasons",
            });
        }
        if !self.seasons.is_sorted_by(|a, b| a < b) {
            return Err(ConfigError::NotIncreasing {
                analysis: "batting_average_checkpoints",
                field: "seasons",
            });
        }
        if self.whisker_factor < 0.0 {
            return Err(ConfigError::Invalid {
                analysis: "batting_average_checkpoints",
                message: "whisker_factor must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkpoint {
    pub season: i32,
    pub count: usize,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    /// Values beyond the whiskers.
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkpoints {
    pub column: StatColumn,
    pub checkpoints: Vec<Checkpoint>,
    /// Configured seasons dropped for having too few values.
    pub omitted: Vec<i32>,
}

impl Summarize for Checkpoints {
    fn summary(&self) -> Vec<SummaryStat> {
        let mut stats: Vec<SummaryStat> = self
            .checkpoints
            .iter()
            .map(|c| SummaryStat::number(format!("median_{}", c.season), round_to(c.median, 1)))
            .collect();
        stats.push(SummaryStat::count("omitted", self.omitted.len()));
        stats
    }
}

pub fn batting_average_checkpoints(
    dataset: &SeasonDataset,
    config: &CheckpointConfig,
) -> Outcome<Checkpoints> {
    warn_absent("batting_average_checkpoints", dataset, &[config.column]);

    let mut checkpoints = Vec::new();
    let mut omitted = Vec::new();
    for &season in &config.seasons {
        let values: Vec<f64> = dataset
            .records()
            .iter()
            .filter(|record| record.season() == Some(season))
            .filter_map(|record| record.stat(config.column))
            .filter(|value| *value > 0.0)
            .collect();
        if values.len() <= config.min_samples {
            debug!(season, values = values.len(), "checkpoint below sample floor");
            omitted.push(season);
            continue;
        }
        checkpoints.push(box_stats(season, &values, config.whisker_factor));
    }

    if checkpoints.is_empty() {
        return Outcome::no_data(format!(
            "no checkpoint season has more than {} values",
            config.min_samples
        ));
    }
    Outcome::Ready(Checkpoints {
        column: config.column,
        checkpoints,
        omitted,
    })
}

fn box_stats(season: i32, values: &[f64], whisker_factor: f64) -> Checkpoint {
    let ordered = sorted(values);
    let q1 = quantile_sorted(&ordered, 0.25);
    let median = quantile_sorted(&ordered, 0.5);
    let q3 = quantile_sorted(&ordered, 0.75);
    let iqr = q3 - q1;
    let low_fence = q1 - whisker_factor * iqr;
    let high_fence = q3 + whisker_factor * iqr;
    let inside: Vec<f64> = ordered
        .iter()
        .copied()
        .filter(|v| (low_fence..=high_fence).contains(v))
        .collect();
    Checkpoint {
        season,
        count: ordered.len(),
        median,
        q1,
        q3,
        iqr,
        lower_whisker: inside.first().copied().unwrap_or(q1),
        upper_whisker: inside.last().copied().unwrap_or(q3),
        outliers: ordered
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dataset, record};

    fn season_of(season: i32, averages: &[f64]) -> Vec<ipl_model::SeasonRecord> {
        averages
            .iter()
            .enumerate()
            .map(|(i, avg)| record(&format!("P{i}"), season, &[(StatColumn::BattingAverage, *avg)]))
            .collect()
    }

    #[test]
    fn sparse_checkpoint_is_omitted() {
        let mut records = season_of(2010, &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        records.extend(season_of(2015, &[10.0, 20.0, 30.0, 40.0, 50.0]));
        let result = batting_average_checkpoints(&dataset(records), &CheckpointConfig::default())
            .into_ready()
            .unwrap();
        assert_eq!(result.checkpoints.len(), 1);
        let checkpoint = &result.checkpoints[0];
        assert_eq!(checkpoint.season, 2010);
        assert_eq!(checkpoint.count, 6);
        assert_eq!(checkpoint.median, 35.0);
        assert_eq!(checkpoint.q1, 22.5);
        assert_eq!(checkpoint.q3, 47.5);
        assert_eq!(checkpoint.iqr, 25.0);
        assert_eq!(checkpoint.lower_whisker, 10.0);
        assert_eq!(checkpoint.upper_whisker, 60.0);
        assert_eq!(result.omitted, vec![2015, 2020, 2024]);
    }

    #[test]
    fn outliers_fall_outside_whiskers() {
        let records = season_of(2020, &[10.0, 11.0, 12.0, 13.0, 14.0, 95.0]);
        let result = batting_average_checkpoints(&dataset(records), &CheckpointConfig::default())
            .into_ready()
            .unwrap();
        let checkpoint = &result.checkpoints[0];
        assert_eq!(checkpoint.outliers, vec![95.0]);
        assert_eq!(checkpoint.upper_whisker, 14.0);
    }

    #[test]
    fn non_positive_values_do_not_count() {
        let records = season_of(2024, &[0.0, 0.0, 0.0, 5.0, 6.0, 7.0]);
        assert!(
            !batting_average_checkpoints(&dataset(records), &CheckpointConfig::default())
                .is_ready()
        );
    }
}
