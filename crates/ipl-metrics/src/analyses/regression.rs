//! Fielding regression: composite contribution score against catches.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::{LinearFit, linear_fit, min_max, round_to};

/// `weight * column`, null read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTerm {
    pub column: StatColumn,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    pub min_season: i32,
    pub x: StatColumn,
    pub score: Vec<ScoreTerm>,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            min_season: 2018,
            x: StatColumn::CatchesTaken,
            score: vec![
                ScoreTerm {
                    column: StatColumn::RunsScored,
                    weight: 1.0,
                },
                ScoreTerm {
                    column: StatColumn::WicketsTaken,
                    weight: 20.0,
                },
            ],
        }
    }
}

impl RegressionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.score.is_empty() {
            return Err(ConfigError::Empty {
                analysis: "fielding_regression",
                field: "score",
            });
        }
        Ok(())
    }
}

/// Position relative to the means of X and the score; at the mean counts as
/// high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    HighCatchHighScore,
    HighCatchLowScore,
    LowCatchHighScore,
    LowCatchLowScore,
}

impl Bucket {
    fn of(x: f64, score: f64, fit: &LinearFit) -> Self {
        match (x >= fit.mean_x, score >= fit.mean_y) {
            (true, true) => Bucket::HighCatchHighScore,
            (true, false) => Bucket::HighCatchLowScore,
            (false, true) => Bucket::LowCatchHighScore,
            (false, false) => Bucket::LowCatchLowScore,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionPoint {
    pub player: String,
    pub season: i32,
    pub x: f64,
    pub score: f64,
    pub bucket: Bucket,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineSegment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldingRegression {
    pub x: StatColumn,
    pub fit: LinearFit,
    /// The fitted line across the observed X range.
    pub line: LineSegment,
    pub points: Vec<RegressionPoint>,
}

impl Summarize for FieldingRegression {
    fn summary(&self) -> Vec<SummaryStat> {
        vec![
            SummaryStat::count("points", self.points.len()),
            SummaryStat::number("slope", self.fit.slope),
            SummaryStat::number("intercept", self.fit.intercept),
            SummaryStat::number("r", round_to(self.fit.r, 2)),
        ]
    }
}

pub fn fielding_regression(
    dataset: &SeasonDataset,
    config: &RegressionConfig,
) -> Outcome<FieldingRegression> {
    let mut required = vec![config.x];
    required.extend(config.score.iter().map(|term| term.column));
    warn_absent("fielding_regression", dataset, &required);

    let rows: Vec<(String, i32, f64, f64)> = dataset
        .seasonal_from(config.min_season)
        .filter_map(|(season, record)| {
            let score: f64 = config
                .score
                .iter()
                .map(|term| term.weight * record.stat_or_zero(term.column))
                .sum();
            (score > 0.0).then(|| {
                (
                    record.player().to_string(),
                    season,
                    record.stat_or_zero(config.x),
                    score,
                )
            })
        })
        .collect();

    let xs: Vec<f64> = rows.iter().map(|row| row.2).collect();
    let ys: Vec<f64> = rows.iter().map(|row| row.3).collect();
    let (Some(fit), Some((min_x, max_x))) = (linear_fit(&xs, &ys), min_max(&xs)) else {
        return Outcome::no_data(format!(
            "no rows from {} with a positive score",
            config.min_season
        ));
    };
    debug!(points = rows.len(), slope = fit.slope, r = fit.r, "regression fitted");

    let points = rows
        .into_iter()
        .map(|(player, season, x, score)| RegressionPoint {
            player,
            season,
            x,
            score,
            bucket: Bucket::of(x, score, &fit),
        })
        .collect();
    Outcome::Ready(FieldingRegression {
        x: config.x,
        line: LineSegment {
            x0: min_x,
            y0: fit.predict(min_x),
            x1: max_x,
            y1: fit.predict(max_x),
        },
        fit,
        points,
    })
}
