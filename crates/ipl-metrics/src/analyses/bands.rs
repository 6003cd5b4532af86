//! Row counts and a secondary mean per fixed band of one column.

use serde::{Deserialize, Serialize};

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::mean;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    pub min_season: i32,
    pub column: StatColumn,
    /// Ascending edges; band `i` is the right-closed interval
    /// `(edges[i], edges[i + 1]]`.
    pub edges: Vec<f64>,
    pub aggregate: StatColumn,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            min_season: 2010,
            column: StatColumn::BattingAverage,
            edges: vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 100.0],
            aggregate: StatColumn::RunsScored,
        }
    }
}

impl BandConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.edges.len() < 2 {
            return Err(ConfigError::Invalid {
                analysis: "average_bands",
                message: "edges must define at least one band".to_string(),
            });
        }
        if !self.edges.is_sorted_by(|a, b| a < b) {
            return Err(ConfigError::NotIncreasing {
                analysis: "average_bands",
                field: "edges",
            });
        }
        Ok(())
    }

    fn band_of(&self, value: f64) -> Option<usize> {
        self.edges
            .windows(2)
            .position(|edge| value > edge[0] && value <= edge[1])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// Mean of the aggregate column over non-null values; `None` when the
    /// band has none.
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageBands {
    pub column: StatColumn,
    pub aggregate: StatColumn,
    pub bands: Vec<Band>,
}

impl Summarize for AverageBands {
    fn summary(&self) -> Vec<SummaryStat> {
        self.bands
            .iter()
            .flat_map(|band| {
                [
                    SummaryStat::count(format!("{}_count", band.label), band.count),
                    SummaryStat::optional(format!("{}_mean", band.label), band.mean),
                ]
            })
            .collect()
    }
}

pub fn average_bands(dataset: &SeasonDataset, config: &BandConfig) -> Outcome<AverageBands> {
    warn_absent("average_bands", dataset, &[config.column, config.aggregate]);

    let band_count = config.edges.len().saturating_sub(1);
    let mut counts = vec![0usize; band_count];
    let mut aggregates: Vec<Vec<f64>> = vec![Vec::new(); band_count];
    for (_, record) in dataset.seasonal_from(config.min_season) {
        let Some(idx) = record.stat(config.column).and_then(|v| config.band_of(v)) else {
            continue;
        };
        counts[idx] += 1;
        if let Some(value) = record.stat(config.aggregate) {
            aggregates[idx].push(value);
        }
    }
    if counts.iter().all(|count| *count == 0) {
        return Outcome::no_data(format!("no {} values fall into any band", config.column));
    }

    let bands = config
        .edges
        .windows(2)
        .zip(counts)
        .zip(&aggregates)
        .map(|((edge, count), values)| Band {
            label: format!("({}, {}]", edge[0], edge[1]),
            lower: edge[0],
            upper: edge[1],
            count,
            mean: mean(values),
        })
        .collect();
    Outcome::Ready(AverageBands {
        column: config.column,
        aggregate: config.aggregate,
        bands,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dataset, record};

    fn batter(name: &str, average: f64, runs: Option<f64>) -> ipl_model::SeasonRecord {
        let mut record = record(name, 2015, &[(StatColumn::BattingAverage, average)]);
        record.set_stat(StatColumn::RunsScored, runs);
        record
    }

    #[test]
    fn bands_are_right_closed() {
        let data = dataset(vec![
            batter("A", 10.0, Some(100.0)),
            batter("B", 10.5, Some(300.0)),
            batter("C", 0.0, Some(5.0)),
            batter("D", 15.0, None),
        ]);
        let result = average_bands(&data, &BandConfig::default()).into_ready().unwrap();
        assert_eq!(result.bands[0].label, "(0, 10]");
        assert_eq!(result.bands[0].count, 1);
        assert_eq!(result.bands[0].mean, Some(100.0));
        assert_eq!(result.bands[1].count, 2);
        assert_eq!(result.bands[1].mean, Some(300.0));
        assert_eq!(result.bands[5].count, 0);
        assert_eq!(result.bands[5].mean, None);
    }

    #[test]
    fn nothing_binned_is_no_data() {
        let data = dataset(vec![batter("A", 0.0, Some(1.0))]);
        assert!(!average_bands(&data, &BandConfig::default()).is_ready());
    }

    #[test]
    fn edges_must_increase() {
        let config = BandConfig {
            edges: vec![0.0, 20.0, 10.0],
            ..BandConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotIncreasing { .. })
        ));
    }
}
