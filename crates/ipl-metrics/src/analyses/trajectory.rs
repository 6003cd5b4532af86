//! Single-player season series split into early, peak and late phases.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};

/// Inclusive season range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub start: i32,
    pub end: i32,
}

impl SeasonWindow {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, season: i32) -> bool {
        (self.start..=self.end).contains(&season)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Early,
    Peak,
    Late,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    pub player: String,
    pub metric: StatColumn,
    /// Plotted on a second axis; null reads as 0.
    pub secondary: StatColumn,
    pub early: SeasonWindow,
    pub peak: SeasonWindow,
    pub late: SeasonWindow,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            player: "Virat Kohli".to_string(),
            metric: StatColumn::RunsScored,
            secondary: StatColumn::WicketsTaken,
            early: SeasonWindow::new(2008, 2012),
            peak: SeasonWindow::new(2013, 2018),
            late: SeasonWindow::new(2019, 2024),
        }
    }
}

impl TrajectoryConfig {
    fn windows(&self) -> [(Phase, SeasonWindow); 3] {
        [
            (Phase::Early, self.early),
            (Phase::Peak, self.peak),
            (Phase::Late, self.late),
        ]
    }

    /// Windows must each be non-empty, ordered and contiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.trim().is_empty() {
            return Err(ConfigError::Empty {
                analysis: "player_trajectory",
                field: "player",
            });
        }
        let windows = self.windows();
        for (phase, window) in &windows {
            if window.start > window.end {
                return Err(ConfigError::Invalid {
                    analysis: "player_trajectory",
                    message: format!("{phase:?} window starts after it ends"),
                });
            }
        }
        for pair in windows.windows(2) {
            let (prev_phase, prev) = pair[0];
            let (next_phase, next) = pair[1];
            if next.start != prev.end + 1 {
                return Err(ConfigError::Invalid {
                    analysis: "player_trajectory",
                    message: format!(
                        "{next_phase:?} window must start the season after {prev_phase:?} ends"
                    ),
                });
            }
        }
        Ok(())
    }

    fn phase_of(&self, season: i32) -> Option<Phase> {
        self.windows()
            .into_iter()
            .find(|(_, window)| window.contains(season))
            .map(|(phase, _)| phase)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub season: i32,
    pub phase: Option<Phase>,
    pub value: Option<f64>,
    pub secondary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSummary {
    pub phase: Phase,
    pub window: SeasonWindow,
    pub seasons: usize,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakSeason {
    pub season: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub player: String,
    pub metric: StatColumn,
    pub secondary: StatColumn,
    pub points: Vec<TrajectoryPoint>,
    pub phases: Vec<PhaseSummary>,
    /// Highest metric value inside the peak window; earliest season on ties.
    pub peak: Option<PeakSeason>,
}

impl Summarize for Trajectory {
    fn summary(&self) -> Vec<SummaryStat> {
        let mut stats = vec![
            SummaryStat::text("player", self.player.clone()),
            SummaryStat::count("seasons", self.points.len()),
        ];
        match self.peak {
            Some(peak) => {
                stats.push(SummaryStat::number("peak_season", f64::from(peak.season)));
                stats.push(SummaryStat::number("peak_value", peak.value));
            }
            None => stats.push(SummaryStat::text("peak_season", "none")),
        }
        stats
    }
}

pub fn player_trajectory(dataset: &SeasonDataset, config: &TrajectoryConfig) -> Outcome<Trajectory> {
    warn_absent(
        "player_trajectory",
        dataset,
        &[config.metric, config.secondary],
    );

    let mut points: Vec<TrajectoryPoint> = dataset
        .records_for(config.player.trim())
        .filter_map(|record| {
            let season = record.season()?;
            Some(TrajectoryPoint {
                season,
                phase: config.phase_of(season),
                value: record.stat(config.metric),
                secondary: record.stat_or_zero(config.secondary),
            })
        })
        .collect();
    if points.is_empty() {
        return Outcome::no_data(format!("no seasons for {}", config.player));
    }
    points.sort_by_key(|point| point.season);

    let phases = config
        .windows()
        .into_iter()
        .map(|(phase, window)| {
            let in_window = points.iter().filter(|p| p.phase == Some(phase));
            PhaseSummary {
                phase,
                window,
                seasons: in_window.clone().count(),
                total: in_window.filter_map(|p| p.value).sum(),
            }
        })
        .collect();

    let mut peak: Option<PeakSeason> = None;
    for point in points.iter().filter(|p| p.phase == Some(Phase::Peak)) {
        if let Some(value) = point.value
            && peak.is_none_or(|best| value > best.value)
        {
            peak = Some(PeakSeason {
                season: point.season,
                value,
            });
        }
    }
    debug!(player = %config.player, seasons = points.len(), ?peak, "trajectory computed");

    Outcome::Ready(Trajectory {
        player: config.player.trim().to_string(),
        metric: config.metric,
        secondary: config.secondary,
        points,
        phases,
        peak,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dataset, record};

    #[test]
    fn peak_prefers_earliest_season_on_ties() {
        let data = dataset(vec![
            record("Virat Kohli", 2016, &[(StatColumn::RunsScored, 973.0)]),
            record("Virat Kohli", 2013, &[(StatColumn::RunsScored, 973.0)]),
            record("Virat Kohli", 2011, &[(StatColumn::RunsScored, 2000.0)]),
            record("Virat Kohli", 2020, &[(StatColumn::WicketsTaken, 1.0)]),
        ]);
        let result = player_trajectory(&data, &TrajectoryConfig::default())
            .into_ready()
            .unwrap();
        assert_eq!(
            result.peak,
            Some(PeakSeason {
                season: 2013,
                value: 973.0
            })
        );
        let seasons: Vec<i32> = result.points.iter().map(|p| p.season).collect();
        assert_eq!(seasons, vec![2011, 2013, 2016, 2020]);
        assert_eq!(result.points[0].secondary, 0.0);
        assert_eq!(result.points[3].value, None);
        assert_eq!(result.phases[1].seasons, 2);
        assert_eq!(result.phases[1].total, 1946.0);
    }

    #[test]
    fn missing_player_is_no_data() {
        let data = dataset(vec![record("MS Dhoni", 2015, &[(StatColumn::RunsScored, 1.0)])]);
        assert!(!player_trajectory(&data, &TrajectoryConfig::default()).is_ready());
    }

    #[test]
    fn peak_is_none_when_window_has_no_values() {
        let data = dataset(vec![record("Virat Kohli", 2009, &[(StatColumn::RunsScored, 10.0)])]);
        let result = player_trajectory(&data, &TrajectoryConfig::default())
            .into_ready()
            .unwrap();
        assert_eq!(result.peak, None);
    }

    #[test]
    fn windows_must_be_contiguous() {
        let config = TrajectoryConfig {
            peak: SeasonWindow::new(2014, 2018),
            ..TrajectoryConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(TrajectoryConfig::default().validate().is_ok());
    }
}
