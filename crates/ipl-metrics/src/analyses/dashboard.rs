//! Composite view that re-runs the first five analyses.

use serde::{Deserialize, Serialize};

use ipl_model::SeasonDataset;

use crate::analyses::checkpoints::{CheckpointConfig, Checkpoints, batting_average_checkpoints};
use crate::analyses::correlation::{CorrelationConfig, CorrelationResult, wickets_vs_average};
use crate::analyses::distribution::{
    DistributionConfig, ScoringDistribution, scoring_distribution,
};
use crate::analyses::radar::{Radar, RadarConfig, player_radar};
use crate::analyses::trajectory::{Trajectory, TrajectoryConfig, player_trajectory};
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// The dashboard's distribution panel uses coarser bins than the
    /// standalone chart.
    pub distribution_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            distribution_bins: 20,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.distribution_bins == 0 {
            return Err(ConfigError::ZeroCount {
                analysis: "dashboard",
                field: "distribution_bins",
            });
        }
        Ok(())
    }
}

/// Borrowed configurations of the delegated analyses.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInputs<'a> {
    pub dashboard: &'a DashboardConfig,
    pub distribution: &'a DistributionConfig,
    pub correlation: &'a CorrelationConfig,
    pub trajectory: &'a TrajectoryConfig,
    pub checkpoints: &'a CheckpointConfig,
    pub radar: &'a RadarConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub distribution: Outcome<ScoringDistribution>,
    pub correlation: Outcome<CorrelationResult>,
    pub trajectory: Outcome<Trajectory>,
    pub checkpoints: Outcome<Checkpoints>,
    pub radar: Outcome<Radar>,
}

impl Summarize for Dashboard {
    fn summary(&self) -> Vec<SummaryStat> {
        let panels = [
            self.distribution.is_ready(),
            self.correlation.is_ready(),
            self.trajectory.is_ready(),
            self.checkpoints.is_ready(),
            self.radar.is_ready(),
        ];
        vec![
            SummaryStat::count("panels_ready", panels.iter().filter(|ready| **ready).count()),
            SummaryStat::count("panels", panels.len()),
        ]
    }
}

pub fn dashboard(dataset: &SeasonDataset, inputs: DashboardInputs<'_>) -> Outcome<Dashboard> {
    if dataset.is_empty() {
        return Outcome::no_data("dataset has no records");
    }
    let distribution = DistributionConfig {
        bins: inputs.dashboard.distribution_bins,
        ..inputs.distribution.clone()
    };
    Outcome::Ready(Dashboard {
        distribution: scoring_distribution(dataset, &distribution),
        correlation: wickets_vs_average(dataset, inputs.correlation),
        trajectory: player_trajectory(dataset, inputs.trajectory),
        checkpoints: batting_average_checkpoints(dataset, inputs.checkpoints),
        radar: player_radar(dataset, inputs.radar),
    })
}
