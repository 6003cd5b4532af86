//! Two-dimensional density grid with annotation thresholds.

use serde::{Deserialize, Serialize};

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::Histogram2d;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    pub x: StatColumn,
    pub y: StatColumn,
    pub x_bins: usize,
    pub y_bins: usize,
    /// Vertical reference line; values below it are desirable.
    pub x_threshold: f64,
    /// Horizontal reference line; values above it are desirable.
    pub y_threshold: f64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            x: StatColumn::BowlingAverage,
            y: StatColumn::WicketsTaken,
            x_bins: 20,
            y_bins: 20,
            x_threshold: 30.0,
            y_threshold: 20.0,
        }
    }
}

impl DensityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, bins) in [("x_bins", self.x_bins), ("y_bins", self.y_bins)] {
            if bins == 0 {
                return Err(ConfigError::ZeroCount {
                    analysis: "bowling_density",
                    field,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingDensity {
    pub x: StatColumn,
    pub y: StatColumn,
    pub points: usize,
    pub grid: Histogram2d,
    pub x_threshold: f64,
    pub y_threshold: f64,
    /// Points inside the annotated quadrant; the grid itself is unfiltered.
    pub desirable: usize,
}

impl Summarize for BowlingDensity {
    fn summary(&self) -> Vec<SummaryStat> {
        vec![
            SummaryStat::count("points", self.points),
            SummaryStat::number("x_threshold", self.x_threshold),
            SummaryStat::number("y_threshold", self.y_threshold),
            SummaryStat::count("desirable_points", self.desirable),
        ]
    }
}

pub fn bowling_density(dataset: &SeasonDataset, config: &DensityConfig) -> Outcome<BowlingDensity> {
    warn_absent("bowling_density", dataset, &[config.x, config.y]);

    let points: Vec<(f64, f64)> = dataset
        .records()
        .iter()
        .filter_map(|record| {
            let x = record.stat(config.x).filter(|v| *v > 0.0)?;
            let y = record.stat(config.y).filter(|v| *v > 0.0)?;
            Some((x, y))
        })
        .collect();
    let Some(grid) = Histogram2d::equal_width(&points, config.x_bins, config.y_bins) else {
        return Outcome::no_data(format!(
            "no rows with positive {} and {}",
            config.x, config.y
        ));
    };
    let desirable = points
        .iter()
        .filter(|(x, y)| *x < config.x_threshold && *y > config.y_threshold)
        .count();

    Outcome::Ready(BowlingDensity {
        x: config.x,
        y: config.y,
        points: points.len(),
        grid,
        x_threshold: config.x_threshold,
        y_threshold: config.y_threshold,
        desirable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dataset, record};

    #[test]
    fn grid_holds_every_positive_pair() {
        let data = dataset(vec![
            record("A", 2020, &[(StatColumn::BowlingAverage, 18.0), (StatColumn::WicketsTaken, 24.0)]),
            record("B", 2020, &[(StatColumn::BowlingAverage, 40.0), (StatColumn::WicketsTaken, 6.0)]),
            record("C", 2020, &[(StatColumn::BowlingAverage, 0.0), (StatColumn::WicketsTaken, 6.0)]),
        ]);
        let result = bowling_density(&data, &DensityConfig::default()).into_ready().unwrap();
        assert_eq!(result.points, 2);
        assert_eq!(result.grid.total(), 2);
        assert_eq!(result.grid.counts.len(), 20);
        assert_eq!(result.grid.counts[0][19], 1);
        assert_eq!(result.grid.counts[19][0], 1);
        assert_eq!(result.desirable, 1);
    }

    #[test]
    fn no_positive_pairs_is_no_data() {
        let data = dataset(vec![record("A", 2020, &[(StatColumn::WicketsTaken, 3.0)])]);
        assert!(!bowling_density(&data, &DensityConfig::default()).is_ready());
    }
}
