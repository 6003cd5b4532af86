use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetricsError;

/// The analysis catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    ScoringDistribution,
    WicketsVsAverage,
    PlayerTrajectory,
    BattingAverageCheckpoints,
    PlayerRadar,
    Dashboard,
    MatchEfficiency,
    ScoringStructure,
    AverageBands,
    TopScorers,
    BowlingDensity,
    SeasonParticipation,
    CareerStability,
    BowlerQuadrants,
    PlayerRoles,
    FieldingRegression,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 16] = [
        AnalysisKind::ScoringDistribution,
        AnalysisKind::WicketsVsAverage,
        AnalysisKind::PlayerTrajectory,
        AnalysisKind::BattingAverageCheckpoints,
        AnalysisKind::PlayerRadar,
        AnalysisKind::Dashboard,
        AnalysisKind::MatchEfficiency,
        AnalysisKind::ScoringStructure,
        AnalysisKind::AverageBands,
        AnalysisKind::TopScorers,
        AnalysisKind::BowlingDensity,
        AnalysisKind::SeasonParticipation,
        AnalysisKind::CareerStability,
        AnalysisKind::BowlerQuadrants,
        AnalysisKind::PlayerRoles,
        AnalysisKind::FieldingRegression,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnalysisKind::ScoringDistribution => "scoring_distribution",
            AnalysisKind::WicketsVsAverage => "wickets_vs_average",
            AnalysisKind::PlayerTrajectory => "player_trajectory",
            AnalysisKind::BattingAverageCheckpoints => "batting_average_checkpoints",
            AnalysisKind::PlayerRadar => "player_radar",
            AnalysisKind::Dashboard => "dashboard",
            AnalysisKind::MatchEfficiency => "match_efficiency",
            AnalysisKind::ScoringStructure => "scoring_structure",
            AnalysisKind::AverageBands => "average_bands",
            AnalysisKind::TopScorers => "top_scorers",
            AnalysisKind::BowlingDensity => "bowling_density",
            AnalysisKind::SeasonParticipation => "season_participation",
            AnalysisKind::CareerStability => "career_stability",
            AnalysisKind::BowlerQuadrants => "bowler_quadrants",
            AnalysisKind::PlayerRoles => "player_roles",
            AnalysisKind::FieldingRegression => "fielding_regression",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            AnalysisKind::ScoringDistribution => "Histogram of season runs with band shares",
            AnalysisKind::WicketsVsAverage => "Wickets against bowling average with a cohort rate",
            AnalysisKind::PlayerTrajectory => "One player's seasons split into career phases",
            AnalysisKind::BattingAverageCheckpoints => "Batting average box plots at fixed seasons",
            AnalysisKind::PlayerRadar => "Normalized multi-metric comparison of named players",
            AnalysisKind::Dashboard => "The first five analyses packaged together",
            AnalysisKind::MatchEfficiency => "Per-match batting and bowling efficiency",
            AnalysisKind::ScoringStructure => "Share of runs by scoring component per season",
            AnalysisKind::AverageBands => "Player counts and mean runs per batting-average band",
            AnalysisKind::TopScorers => "Top run scorers and their season totals",
            AnalysisKind::BowlingDensity => "Density grid of bowling average against wickets",
            AnalysisKind::SeasonParticipation => "Distinct players per season",
            AnalysisKind::CareerStability => "Variation of batting average by career length",
            AnalysisKind::BowlerQuadrants => "Bowlers split by median economy and strike rate",
            AnalysisKind::PlayerRoles => "Share of each player role per season",
            AnalysisKind::FieldingRegression => "Catches against a composite contribution score",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnalysisKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        AnalysisKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| MetricsError::UnknownAnalysis(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in AnalysisKind::ALL {
            assert_eq!(kind.name().parse::<AnalysisKind>().unwrap(), kind);
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.name())
            );
        }
    }

    #[test]
    fn parsing_accepts_dashes_and_case() {
        assert_eq!(
            "Top-Scorers".parse::<AnalysisKind>().unwrap(),
            AnalysisKind::TopScorers
        );
        assert!(matches!(
            "pitch_report".parse::<AnalysisKind>(),
            Err(MetricsError::UnknownAnalysis(name)) if name == "pitch_report"
        ));
    }
}
