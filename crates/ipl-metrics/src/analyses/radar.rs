//! Normalized multi-metric comparison of a few named players.
//!
//! Each player is represented by a single season record: the one with the
//! highest primary metric, ties going to the most recent season. Metrics are
//! min-max scaled onto `[0, scale_max]` across the selected records only, so
//! the chart compares the chosen players with each other rather than with the
//! whole league.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ipl_model::{SeasonDataset, SeasonRecord, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::min_max;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    /// Reverse-scored: the plotted score is `scale_max - normalized`.
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarMetric {
    pub column: StatColumn,
    pub direction: Direction,
}

impl RadarMetric {
    pub const fn higher(column: StatColumn) -> Self {
        Self {
            column,
            direction: Direction::HigherIsBetter,
        }
    }

    pub const fn lower(column: StatColumn) -> Self {
        Self {
            column,
            direction: Direction::LowerIsBetter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub players: Vec<String>,
    /// Selects each player's representative record.
    pub primary: StatColumn,
    pub metrics: Vec<RadarMetric>,
    pub scale_max: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            players: vec![
                "Virat Kohli".to_string(),
                "MS Dhoni".to_string(),
                "Suryakumar Yadav".to_string(),
            ],
            primary: StatColumn::RunsScored,
            metrics: vec![
                RadarMetric::higher(StatColumn::BattingAverage),
                RadarMetric::higher(StatColumn::BattingStrikeRate),
                RadarMetric::higher(StatColumn::WicketsTaken),
                RadarMetric::lower(StatColumn::BowlingAverage),
                RadarMetric::higher(StatColumn::CatchesTaken),
            ],
            scale_max: 10.0,
        }
    }
}

impl RadarConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() {
            return Err(ConfigError::Empty {
                analysis: "player_radar",
                field: "players",
            });
        }
        if self.metrics.is_empty() {
            return Err(ConfigError::Empty {
                analysis: "player_radar",
                field: "metrics",
            });
        }
        if self.scale_max <= 0.0 {
            return Err(ConfigError::Invalid {
                analysis: "player_radar",
                message: "scale_max must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarEntry {
    pub player: String,
    /// Season of the representative record.
    pub season: Option<i32>,
    /// Metric values in metric order, nulls read as 0.
    pub raw: Vec<f64>,
    /// Plotted scores in metric order, within `[0, scale_max]`.
    pub scores: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Radar {
    pub metrics: Vec<RadarMetric>,
    pub entries: Vec<RadarEntry>,
    /// Requested players with no records.
    pub missing: Vec<String>,
}

impl Summarize for Radar {
    fn summary(&self) -> Vec<SummaryStat> {
        let mut stats = vec![SummaryStat::count("players", self.entries.len())];
        if !self.missing.is_empty() {
            stats.push(SummaryStat::text("missing", self.missing.join(", ")));
        }
        stats
    }
}

pub fn player_radar(dataset: &SeasonDataset, config: &RadarConfig) -> Outcome<Radar> {
    let mut required = vec![config.primary];
    required.extend(config.metrics.iter().map(|m| m.column));
    warn_absent("player_radar", dataset, &required);

    let mut representatives: Vec<&SeasonRecord> = Vec::new();
    let mut missing = Vec::new();
    for player in &config.players {
        match representative(dataset, player.trim(), config.primary) {
            Some(record) => representatives.push(record),
            None => missing.push(player.clone()),
        }
    }
    if representatives.is_empty() {
        return Outcome::no_data("none of the requested players have records");
    }

    let raw: Vec<Vec<f64>> = representatives
        .iter()
        .map(|record| {
            config
                .metrics
                .iter()
                .map(|metric| record.stat_or_zero(metric.column))
                .collect()
        })
        .collect();

    let midpoint = config.scale_max / 2.0;
    let mut scores = vec![Vec::with_capacity(config.metrics.len()); representatives.len()];
    for (idx, metric) in config.metrics.iter().enumerate() {
        let column: Vec<f64> = raw.iter().map(|values| values[idx]).collect();
        let Some((min, max)) = min_max(&column) else {
            continue;
        };
        for (entry, value) in scores.iter_mut().zip(&column) {
            let score = if max == min {
                midpoint
            } else {
                let normalized = (value - min) / (max - min) * config.scale_max;
                match metric.direction {
                    Direction::HigherIsBetter => normalized,
                    Direction::LowerIsBetter => config.scale_max - normalized,
                }
            };
            entry.push(score);
        }
    }
    debug!(
        players = representatives.len(),
        missing = missing.len(),
        "radar normalized"
    );

    let entries = representatives
        .into_iter()
        .zip(raw)
        .zip(scores)
        .map(|((record, raw), scores)| RadarEntry {
            player: record.player().to_string(),
            season: record.season(),
            raw,
            scores,
        })
        .collect();
    Outcome::Ready(Radar {
        metrics: config.metrics.clone(),
        entries,
        missing,
    })
}

/// Highest `primary` value (null lowest), latest season on ties.
fn representative<'a>(
    dataset: &'a SeasonDataset,
    player: &'a str,
    primary: StatColumn,
) -> Option<&'a SeasonRecord> {
    dataset.records_for(player).max_by(|a, b| {
        compare_nullable(a.stat(primary), b.stat(primary)).then(a.season().cmp(&b.season()))
    })
}

fn compare_nullable(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{close, dataset, record};

    #[test]
    fn representative_breaks_ties_by_latest_season() {
        let data = dataset(vec![
            record("MS Dhoni", 2011, &[(StatColumn::RunsScored, 400.0), (StatColumn::CatchesTaken, 1.0)]),
            record("MS Dhoni", 2013, &[(StatColumn::RunsScored, 400.0), (StatColumn::CatchesTaken, 2.0)]),
            record("MS Dhoni", 2012, &[(StatColumn::RunsScored, 100.0)]),
        ]);
        let picked = representative(&data, "MS Dhoni", StatColumn::RunsScored).unwrap();
        assert_eq!(picked.season(), Some(2013));
    }

    #[test]
    fn null_primary_ranks_lowest() {
        let data = dataset(vec![
            record("A", 2020, &[(StatColumn::CatchesTaken, 3.0)]),
            record("A", 2019, &[(StatColumn::RunsScored, 0.0)]),
        ]);
        let picked = representative(&data, "A", StatColumn::RunsScored).unwrap();
        assert_eq!(picked.season(), Some(2019));
    }

    #[test]
    fn scores_normalize_over_selected_records() {
        let data = dataset(vec![
            record(
                "Virat Kohli",
                2016,
                &[
                    (StatColumn::RunsScored, 973.0),
                    (StatColumn::BattingAverage, 81.0),
                    (StatColumn::BowlingAverage, 30.0),
                    (StatColumn::CatchesTaken, 5.0),
                ],
            ),
            record(
                "MS Dhoni",
                2013,
                &[
                    (StatColumn::RunsScored, 461.0),
                    (StatColumn::BattingAverage, 41.0),
                    (StatColumn::CatchesTaken, 5.0),
                ],
            ),
        ]);
        let radar = player_radar(&data, &RadarConfig::default()).into_ready().unwrap();
        assert_eq!(radar.missing, vec!["Suryakumar Yadav".to_string()]);
        let kohli = &radar.entries[0];
        let dhoni = &radar.entries[1];
        assert!(close(kohli.scores[0], 10.0));
        assert!(close(dhoni.scores[0], 0.0));
        // Wickets are all null, so the range is degenerate.
        assert!(close(kohli.scores[2], 5.0));
        // Bowling average is reverse scored; the null reads as 0, the best.
        assert!(close(kohli.scores[3], 0.0));
        assert!(close(dhoni.scores[3], 10.0));
        assert!(close(dhoni.scores[4], 5.0));
    }

    #[test]
    fn no_requested_player_is_no_data() {
        let data = dataset(vec![record("A", 2020, &[(StatColumn::RunsScored, 1.0)])]);
        assert!(!player_radar(&data, &RadarConfig::default()).is_ready());
    }
}
