//! Scoring distribution: histogram plus low-band and high-threshold shares.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::{Histogram, percent, round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    pub column: StatColumn,
    pub bins: usize,
    /// Inclusive lower bound of the low band.
    pub low_band_min: f64,
    /// Inclusive upper bound of the low band.
    pub low_band_max: f64,
    /// Values at or above this count toward the high share.
    pub high_threshold: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            column: StatColumn::RunsScored,
            bins: 30,
            low_band_min: 0.0,
            low_band_max: 150.0,
            high_threshold: 500.0,
        }
    }
}

impl DistributionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bins == 0 {
            return Err(ConfigError::ZeroCount {
                analysis: "scoring_distribution",
                field: "bins",
            });
        }
        if self.low_band_min > self.low_band_max {
            return Err(ConfigError::Invalid {
                analysis: "scoring_distribution",
                message: "low_band_min must not exceed low_band_max".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
    /// Display hint: the bin lies entirely inside the low band.
    pub in_low_band: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringDistribution {
    pub column: StatColumn,
    pub values: usize,
    pub bins: Vec<DistributionBin>,
    /// Percent of values inside the low band, one decimal.
    pub low_band_share: f64,
    /// Percent of values at or above the high threshold, one decimal.
    pub high_share: f64,
}

impl Summarize for ScoringDistribution {
    fn summary(&self) -> Vec<SummaryStat> {
        vec![
            SummaryStat::count("values", self.values),
            SummaryStat::number("low_band_share_pct", self.low_band_share),
            SummaryStat::number("high_share_pct", self.high_share),
        ]
    }
}

/// Histogram of the strictly positive values of the configured column.
///
/// An empty filtered set still yields a result with zero shares and no bins.
#[allow(clippy::cast_precision_loss)]
pub fn scoring_distribution(
    dataset: &SeasonDataset,
    config: &DistributionConfig,
) -> Outcome<ScoringDistribution> {
    warn_absent("scoring_distribution", dataset, &[config.column]);

    let values: Vec<f64> = dataset
        .records()
        .iter()
        .filter_map(|record| record.stat(config.column))
        .filter(|value| *value > 0.0)
        .collect();

    let histogram = Histogram::equal_width(&values, config.bins);
    let bins = histogram
        .edges
        .windows(2)
        .zip(&histogram.counts)
        .map(|(edge, count)| DistributionBin {
            start: edge[0],
            end: edge[1],
            count: *count,
            in_low_band: edge[0] >= config.low_band_min && edge[1] <= config.low_band_max,
        })
        .collect();

    let total = values.len() as f64;
    let low = values
        .iter()
        .filter(|v| (config.low_band_min..=config.low_band_max).contains(*v))
        .count();
    let high = values
        .iter()
        .filter(|v| **v >= config.high_threshold)
        .count();
    debug!(values = values.len(), low, high, "scoring distribution computed");

    Outcome::Ready(ScoringDistribution {
        column: config.column,
        values: values.len(),
        bins,
        low_band_share: round_to(percent(low as f64, total), 1),
        high_share: round_to(percent(high as f64, total), 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dataset, record};

    #[test]
    fn shares_count_band_and_threshold() {
        let data = dataset(vec![
            record("A", 2020, &[(StatColumn::RunsScored, 100.0)]),
            record("B", 2020, &[(StatColumn::RunsScored, 150.0)]),
            record("C", 2020, &[(StatColumn::RunsScored, 300.0)]),
            record("D", 2020, &[(StatColumn::RunsScored, 500.0)]),
            record("E", 2020, &[(StatColumn::RunsScored, 0.0)]),
        ]);
        let result = scoring_distribution(&data, &DistributionConfig::default())
            .into_ready()
            .unwrap();
        assert_eq!(result.values, 4);
        assert_eq!(result.low_band_share, 50.0);
        assert_eq!(result.high_share, 25.0);
        assert_eq!(result.bins.len(), 30);
        assert_eq!(result.bins.iter().map(|b| b.count).sum::<u64>(), 4);
        assert!(result.bins[0].in_low_band);
        assert!(!result.bins[29].in_low_band);
    }

    #[test]
    fn empty_filtered_set_reports_zero_shares() {
        let data = dataset(vec![record("A", 2020, &[(StatColumn::RunsScored, 0.0)])]);
        let result = scoring_distribution(&data, &DistributionConfig::default())
            .into_ready()
            .unwrap();
        assert_eq!(result.values, 0);
        assert_eq!(result.low_band_share, 0.0);
        assert_eq!(result.high_share, 0.0);
        assert!(result.bins.is_empty());
    }

    #[test]
    fn shares_round_to_one_decimal() {
        let data = dataset(vec![
            record("A", 2020, &[(StatColumn::RunsScored, 10.0)]),
            record("B", 2020, &[(StatColumn::RunsScored, 200.0)]),
            record("C", 2020, &[(StatColumn::RunsScored, 300.0)]),
        ]);
        let result = scoring_distribution(&data, &DistributionConfig::default())
            .into_ready()
            .unwrap();
        assert_eq!(result.low_band_share, 33.3);
    }

    #[test]
    fn zero_bins_are_rejected() {
        let config = DistributionConfig {
            bins: 0,
            ..DistributionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCount { field: "bins", .. })
        ));
    }
}
