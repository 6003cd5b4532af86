//! Engine-wide configuration: one section per analysis.
//!
//! Every section has `#[serde(default)]`, so a partial JSON document only
//! overrides the fields it names:
//!
//! ```json
//! { "top_scorers": { "top_n": 10 }, "player_trajectory": { "player": "MS Dhoni" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::analyses::bands::BandConfig;
use crate::analyses::checkpoints::CheckpointConfig;
use crate::analyses::correlation::CorrelationConfig;
use crate::analyses::dashboard::{DashboardConfig, DashboardInputs};
use crate::analyses::density::DensityConfig;
use crate::analyses::distribution::DistributionConfig;
use crate::analyses::efficiency::EfficiencyConfig;
use crate::analyses::participation::ParticipationConfig;
use crate::analyses::quadrants::QuadrantConfig;
use crate::analyses::radar::RadarConfig;
use crate::analyses::regression::RegressionConfig;
use crate::analyses::roles::RoleConfig;
use crate::analyses::stability::StabilityConfig;
use crate::analyses::structure::StructureConfig;
use crate::analyses::top_scorers::TopScorersConfig;
use crate::analyses::trajectory::TrajectoryConfig;
use crate::catalog::AnalysisKind;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub scoring_distribution: DistributionConfig,
    pub wickets_vs_average: CorrelationConfig,
    pub player_trajectory: TrajectoryConfig,
    pub batting_average_checkpoints: CheckpointConfig,
    pub player_radar: RadarConfig,
    pub dashboard: DashboardConfig,
    pub match_efficiency: EfficiencyConfig,
    pub scoring_structure: StructureConfig,
    pub average_bands: BandConfig,
    pub top_scorers: TopScorersConfig,
    pub bowling_density: DensityConfig,
    pub season_participation: ParticipationConfig,
    pub career_stability: StabilityConfig,
    pub bowler_quadrants: QuadrantConfig,
    pub player_roles: RoleConfig,
    pub fielding_regression: RegressionConfig,
}

impl AnalysisConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every section, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        AnalysisKind::ALL
            .into_iter()
            .try_for_each(|kind| self.validate_for(kind))
    }

    /// Checks the sections `kind` reads. The dashboard reads its own section
    /// plus those of the five analyses it delegates to.
    pub fn validate_for(&self, kind: AnalysisKind) -> Result<(), ConfigError> {
        match kind {
            AnalysisKind::ScoringDistribution => self.scoring_distribution.validate(),
            AnalysisKind::WicketsVsAverage => self.wickets_vs_average.validate(),
            AnalysisKind::PlayerTrajectory => self.player_trajectory.validate(),
            AnalysisKind::BattingAverageCheckpoints => self.batting_average_checkpoints.validate(),
            AnalysisKind::PlayerRadar => self.player_radar.validate(),
            AnalysisKind::Dashboard => {
                self.dashboard.validate()?;
                self.scoring_distribution.validate()?;
                self.wickets_vs_average.validate()?;
                self.player_trajectory.validate()?;
                self.batting_average_checkpoints.validate()?;
                self.player_radar.validate()
            }
            AnalysisKind::MatchEfficiency => self.match_efficiency.validate(),
            AnalysisKind::ScoringStructure => self.scoring_structure.validate(),
            AnalysisKind::AverageBands => self.average_bands.validate(),
            AnalysisKind::TopScorers => self.top_scorers.validate(),
            AnalysisKind::BowlingDensity => self.bowling_density.validate(),
            AnalysisKind::SeasonParticipation => self.season_participation.validate(),
            AnalysisKind::CareerStability => self.career_stability.validate(),
            AnalysisKind::BowlerQuadrants => self.bowler_quadrants.validate(),
            AnalysisKind::PlayerRoles => self.player_roles.validate(),
            AnalysisKind::FieldingRegression => self.fielding_regression.validate(),
        }
    }

    pub fn dashboard_inputs(&self) -> DashboardInputs<'_> {
        DashboardInputs {
            dashboard: &self.dashboard,
            distribution: &self.scoring_distribution,
            correlation: &self.wickets_vs_average,
            trajectory: &self.player_trajectory,
            checkpoints: &self.batting_average_checkpoints,
            radar: &self.player_radar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipl_model::StatColumn;

    #[test]
    fn defaults_are_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = AnalysisConfig::from_json(
            r#"{ "top_scorers": { "top_n": 10 }, "average_bands": { "column": "Batting_Strike_Rate" } }"#,
        )
        .unwrap();
        assert_eq!(config.top_scorers.top_n, 10);
        assert_eq!(config.top_scorers.column, StatColumn::RunsScored);
        assert_eq!(config.average_bands.column, StatColumn::BattingStrikeRate);
        assert_eq!(config.average_bands.edges.len(), 7);
        assert_eq!(config.player_radar, RadarConfig::default());
    }

    #[test]
    fn invalid_values_and_unknown_sections_are_rejected() {
        assert!(matches!(
            AnalysisConfig::from_json(r#"{ "bowling_density": { "x_bins": 0 } }"#),
            Err(ConfigError::ZeroCount { field: "x_bins", .. })
        ));
        assert!(matches!(
            AnalysisConfig::from_json(r#"{ "pitch_report": {} }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn sections_are_checked_only_for_analyses_that_read_them() {
        let mut config = AnalysisConfig::default();
        config.batting_average_checkpoints.seasons.clear();
        assert!(config.validate_for(AnalysisKind::TopScorers).is_ok());
        assert!(matches!(
            config.validate_for(AnalysisKind::BattingAverageCheckpoints),
            Err(ConfigError::Empty { field: "seasons", .. })
        ));
        // The dashboard delegates to the checkpoints analysis.
        assert!(config.validate_for(AnalysisKind::Dashboard).is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_round_trip_through_json() {
        let json = AnalysisConfig::default().to_json_pretty().unwrap();
        assert_eq!(AnalysisConfig::from_json(&json).unwrap(), AnalysisConfig::default());
    }
}
