//! Correlation between two positive columns with a high-X quality cohort.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::{pearson, percent, round_to};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    pub x: StatColumn,
    pub y: StatColumn,
    /// Rows with `x` strictly above this form the high-X cohort.
    pub cohort_threshold: f64,
    /// Cohort rows with `y` strictly below this count as quality.
    pub quality_ceiling: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            x: StatColumn::WicketsTaken,
            y: StatColumn::BowlingAverage,
            cohort_threshold: 15.0,
            quality_ceiling: 25.0,
        }
    }
}

impl CorrelationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.x == self.y {
            return Err(ConfigError::Invalid {
                analysis: "wickets_vs_average",
                message: format!("x and y are both {}", self.x),
            });
        }
        if !self.cohort_threshold.is_finite() || !self.quality_ceiling.is_finite() {
            return Err(ConfigError::Invalid {
                analysis: "wickets_vs_average",
                message: "thresholds must be finite".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub player: String,
    pub season: Option<i32>,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub x: StatColumn,
    pub y: StatColumn,
    /// Pearson r to two decimals; `None` when undefined.
    pub r: Option<f64>,
    pub points: Vec<ScatterPoint>,
    pub cohort: Vec<ScatterPoint>,
    /// Percent of the cohort below the quality ceiling, one decimal.
    pub quality_rate: f64,
}

impl Summarize for CorrelationResult {
    fn summary(&self) -> Vec<SummaryStat> {
        vec![
            SummaryStat::count("points", self.points.len()),
            SummaryStat::optional("pearson_r", self.r),
            SummaryStat::count("cohort_size", self.cohort.len()),
            SummaryStat::number("quality_rate_pct", self.quality_rate),
        ]
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn wickets_vs_average(
    dataset: &SeasonDataset,
    config: &CorrelationConfig,
) -> Outcome<CorrelationResult> {
    warn_absent("wickets_vs_average", dataset, &[config.x, config.y]);

    let points: Vec<ScatterPoint> = dataset
        .records()
        .iter()
        .filter_map(|record| {
            let x = record.stat(config.x).filter(|v| *v > 0.0)?;
            let y = record.stat(config.y).filter(|v| *v > 0.0)?;
            Some(ScatterPoint {
                player: record.player().to_string(),
                season: record.season(),
                x,
                y,
            })
        })
        .collect();
    if points.is_empty() {
        return Outcome::no_data(format!(
            "no rows with positive {} and {}",
            config.x, config.y
        ));
    }

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let r = pearson(&xs, &ys).map(|r| round_to(r, 2));

    let cohort: Vec<ScatterPoint> = points
        .iter()
        .filter(|p| p.x > config.cohort_threshold)
        .cloned()
        .collect();
    let quality = cohort
        .iter()
        .filter(|p| p.y < config.quality_ceiling)
        .count();
    let quality_rate = round_to(percent(quality as f64, cohort.len() as f64), 1);
    debug!(points = points.len(), cohort = cohort.len(), ?r, "correlation computed");

    Outcome::Ready(CorrelationResult {
        x: config.x,
        y: config.y,
        r,
        points,
        cohort,
        quality_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dataset, record};

    #[test]
    fn same_column_on_both_axes_is_rejected() {
        assert!(CorrelationConfig::default().validate().is_ok());
        let config = CorrelationConfig {
            y: StatColumn::WicketsTaken,
            ..CorrelationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    fn bowler(name: &str, wickets: f64, average: f64) -> ipl_model::SeasonRecord {
        record(
            name,
            2020,
            &[
                (StatColumn::WicketsTaken, wickets),
                (StatColumn::BowlingAverage, average),
            ],
        )
    }

    #[test]
    fn cohort_quality_rate() {
        let data = dataset(vec![
            bowler("A", 20.0, 20.0),
            bowler("B", 18.0, 30.0),
            bowler("C", 5.0, 40.0),
            bowler("D", 0.0, 10.0),
        ]);
        let result = wickets_vs_average(&data, &CorrelationConfig::default())
            .into_ready()
            .unwrap();
        assert_eq!(result.points.len(), 3);
        assert_eq!(result.cohort.len(), 2);
        assert_eq!(result.quality_rate, 50.0);
        assert_eq!(result.r, Some(-0.92));
    }

    #[test]
    fn empty_cohort_has_zero_rate_and_single_point_has_no_r() {
        let data = dataset(vec![bowler("A", 3.0, 20.0)]);
        let result = wickets_vs_average(&data, &CorrelationConfig::default())
            .into_ready()
            .unwrap();
        assert_eq!(result.quality_rate, 0.0);
        assert_eq!(result.r, None);
    }

    #[test]
    fn no_positive_pairs_is_no_data() {
        let data = dataset(vec![bowler("A", 0.0, 0.0)]);
        assert!(!wickets_vs_average(&data, &CorrelationConfig::default()).is_ready());
    }
}
