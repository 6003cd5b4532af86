//! Per-match efficiency as two independent scatter series.

use serde::{Deserialize, Serialize};

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::{mean, ratio_or_zero};

/// One series: `output / volume` against `volume`, sized by
/// `output * size_factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySeriesConfig {
    pub volume: StatColumn,
    pub output: StatColumn,
    pub size_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyConfig {
    pub min_season: i32,
    pub batting: EfficiencySeriesConfig,
    pub bowling: EfficiencySeriesConfig,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            min_season: 2010,
            batting: EfficiencySeriesConfig {
                volume: StatColumn::MatchesBatted,
                output: StatColumn::RunsScored,
                size_factor: 0.1,
            },
            bowling: EfficiencySeriesConfig {
                volume: StatColumn::MatchesBowled,
                output: StatColumn::WicketsTaken,
                size_factor: 5.0,
            },
        }
    }
}

impl EfficiencyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for series in [&self.batting, &self.bowling] {
            if series.volume == series.output {
                return Err(ConfigError::Invalid {
                    analysis: "match_efficiency",
                    message: format!("volume and output are both {}", series.volume),
                });
            }
            if !(series.size_factor.is_finite() && series.size_factor > 0.0) {
                return Err(ConfigError::Invalid {
                    analysis: "match_efficiency",
                    message: "size_factor must be positive".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyPoint {
    pub player: String,
    pub season: i32,
    pub volume: f64,
    pub efficiency: f64,
    /// Display-only marker size.
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencySeries {
    pub volume: StatColumn,
    pub output: StatColumn,
    pub points: Vec<EfficiencyPoint>,
}

impl EfficiencySeries {
    pub fn mean_efficiency(&self) -> f64 {
        let values: Vec<f64> = self.points.iter().map(|p| p.efficiency).collect();
        mean(&values).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEfficiency {
    pub batting: EfficiencySeries,
    pub bowling: EfficiencySeries,
}

impl Summarize for MatchEfficiency {
    fn summary(&self) -> Vec<SummaryStat> {
        vec![
            SummaryStat::count("rows", self.batting.points.len()),
            SummaryStat::number("mean_batting_efficiency", self.batting.mean_efficiency()),
            SummaryStat::number("mean_bowling_efficiency", self.bowling.mean_efficiency()),
        ]
    }
}

pub fn match_efficiency(
    dataset: &SeasonDataset,
    config: &EfficiencyConfig,
) -> Outcome<MatchEfficiency> {
    warn_absent(
        "match_efficiency",
        dataset,
        &[
            config.batting.volume,
            config.batting.output,
            config.bowling.volume,
            config.bowling.output,
        ],
    );

    let rows: Vec<_> = dataset.seasonal_from(config.min_season).collect();
    if rows.is_empty() {
        return Outcome::no_data(format!("no seasons from {}", config.min_season));
    }

    let series = |series_config: &EfficiencySeriesConfig| EfficiencySeries {
        volume: series_config.volume,
        output: series_config.output,
        points: rows
            .iter()
            .map(|(season, record)| {
                let volume = record.stat_or_zero(series_config.volume);
                let output = record.stat_or_zero(series_config.output);
                EfficiencyPoint {
                    player: record.player().to_string(),
                    season: *season,
                    volume,
                    efficiency: ratio_or_zero(output, volume),
                    size: output * series_config.size_factor,
                }
            })
            .collect(),
    };

    Outcome::Ready(MatchEfficiency {
        batting: series(&config.batting),
        bowling: series(&config.bowling),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{close, dataset, record};

    #[test]
    fn non_positive_size_factor_is_rejected() {
        assert!(EfficiencyConfig::default().validate().is_ok());
        let mut config = EfficiencyConfig::default();
        config.bowling.size_factor = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn zero_volume_gives_zero_efficiency() {
        let data = dataset(vec![
            record(
                "A",
                2015,
                &[
                    (StatColumn::MatchesBatted, 10.0),
                    (StatColumn::RunsScored, 300.0),
                    (StatColumn::WicketsTaken, 4.0),
                ],
            ),
            record("B", 2009, &[(StatColumn::MatchesBatted, 1.0)]),
        ]);
        let result = match_efficiency(&data, &EfficiencyConfig::default())
            .into_ready()
            .unwrap();
        assert_eq!(result.batting.points.len(), 1);
        let bat = &result.batting.points[0];
        assert!(close(bat.efficiency, 30.0));
        assert!(close(bat.size, 30.0));
        let bowl = &result.bowling.points[0];
        assert_eq!(bowl.volume, 0.0);
        assert_eq!(bowl.efficiency, 0.0);
        assert!(close(bowl.size, 20.0));
    }

    #[test]
    fn seasons_before_cutoff_only_is_no_data() {
        let data = dataset(vec![record("A", 2008, &[(StatColumn::RunsScored, 1.0)])]);
        assert!(!match_efficiency(&data, &EfficiencyConfig::default()).is_ready());
    }
}
