//! Dispatch from catalogue names to analyses.

use serde::Serialize;
use tracing::{debug, info_span};

use ipl_model::SeasonDataset;

use crate::analyses::bands::{AverageBands, average_bands};
use crate::analyses::checkpoints::{Checkpoints, batting_average_checkpoints};
use crate::analyses::correlation::{CorrelationResult, wickets_vs_average};
use crate::analyses::dashboard::{Dashboard, dashboard};
use crate::analyses::density::{BowlingDensity, bowling_density};
use crate::analyses::distribution::{ScoringDistribution, scoring_distribution};
use crate::analyses::efficiency::{MatchEfficiency, match_efficiency};
use crate::analyses::participation::{Participation, season_participation};
use crate::analyses::quadrants::{BowlerQuadrants, bowler_quadrants};
use crate::analyses::radar::{Radar, player_radar};
use crate::analyses::regression::{FieldingRegression, fielding_regression};
use crate::analyses::roles::{PlayerRoles, player_roles};
use crate::analyses::stability::{CareerStability, career_stability};
use crate::analyses::structure::{ScoringStructure, scoring_structure};
use crate::analyses::top_scorers::{TopScorers, top_scorers};
use crate::analyses::trajectory::{Trajectory, player_trajectory};
use crate::catalog::AnalysisKind;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::outcome::{Outcome, SummaryStat, Summarize};

/// The typed outcome of any catalogue analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
    ScoringDistribution(Outcome<ScoringDistribution>),
    WicketsVsAverage(Outcome<CorrelationResult>),
    PlayerTrajectory(Outcome<Trajectory>),
    BattingAverageCheckpoints(Outcome<Checkpoints>),
    PlayerRadar(Outcome<Radar>),
    Dashboard(Outcome<Dashboard>),
    MatchEfficiency(Outcome<MatchEfficiency>),
    ScoringStructure(Outcome<ScoringStructure>),
    AverageBands(Outcome<AverageBands>),
    TopScorers(Outcome<TopScorers>),
    BowlingDensity(Outcome<BowlingDensity>),
    SeasonParticipation(Outcome<Participation>),
    CareerStability(Outcome<CareerStability>),
    BowlerQuadrants(Outcome<BowlerQuadrants>),
    PlayerRoles(Outcome<PlayerRoles>),
    FieldingRegression(Outcome<FieldingRegression>),
}

impl AnalysisOutput {
    pub fn is_ready(&self) -> bool {
        match self {
            AnalysisOutput::ScoringDistribution(o) => o.is_ready(),
            AnalysisOutput::WicketsVsAverage(o) => o.is_ready(),
            AnalysisOutput::PlayerTrajectory(o) => o.is_ready(),
            AnalysisOutput::BattingAverageCheckpoints(o) => o.is_ready(),
            AnalysisOutput::PlayerRadar(o) => o.is_ready(),
            AnalysisOutput::Dashboard(o) => o.is_ready(),
            AnalysisOutput::MatchEfficiency(o) => o.is_ready(),
            AnalysisOutput::ScoringStructure(o) => o.is_ready(),
            AnalysisOutput::AverageBands(o) => o.is_ready(),
            AnalysisOutput::TopScorers(o) => o.is_ready(),
            AnalysisOutput::BowlingDensity(o) => o.is_ready(),
            AnalysisOutput::SeasonParticipation(o) => o.is_ready(),
            AnalysisOutput::CareerStability(o) => o.is_ready(),
            AnalysisOutput::BowlerQuadrants(o) => o.is_ready(),
            AnalysisOutput::PlayerRoles(o) => o.is_ready(),
            AnalysisOutput::FieldingRegression(o) => o.is_ready(),
        }
    }
}

impl Summarize for AnalysisOutput {
    fn summary(&self) -> Vec<SummaryStat> {
        match self {
            AnalysisOutput::ScoringDistribution(o) => o.summary(),
            AnalysisOutput::WicketsVsAverage(o) => o.summary(),
            AnalysisOutput::PlayerTrajectory(o) => o.summary(),
            AnalysisOutput::BattingAverageCheckpoints(o) => o.summary(),
            AnalysisOutput::PlayerRadar(o) => o.summary(),
            AnalysisOutput::Dashboard(o) => o.summary(),
            AnalysisOutput::MatchEfficiency(o) => o.summary(),
            AnalysisOutput::ScoringStructure(o) => o.summary(),
            AnalysisOutput::AverageBands(o) => o.summary(),
            AnalysisOutput::TopScorers(o) => o.summary(),
            AnalysisOutput::BowlingDensity(o) => o.summary(),
            AnalysisOutput::SeasonParticipation(o) => o.summary(),
            AnalysisOutput::CareerStability(o) => o.summary(),
            AnalysisOutput::BowlerQuadrants(o) => o.summary(),
            AnalysisOutput::PlayerRoles(o) => o.summary(),
            AnalysisOutput::FieldingRegression(o) => o.summary(),
        }
    }
}

/// One analysis run: the numbers to state and the full result to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub analysis: AnalysisKind,
    pub summary: Vec<SummaryStat>,
    pub result: AnalysisOutput,
}

/// Runs a single analysis after checking the configuration sections it reads.
///
/// # Errors
///
/// Returns [`MetricsError::Config`](crate::MetricsError::Config) when one of
/// those sections is invalid.
pub fn run(
    kind: AnalysisKind,
    dataset: &SeasonDataset,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    config.validate_for(kind)?;
    Ok(execute(kind, dataset, config))
}

fn execute(kind: AnalysisKind, dataset: &SeasonDataset, config: &AnalysisConfig) -> AnalysisReport {
    let span = info_span!("analysis", name = kind.name(), rows = dataset.len());
    let _guard = span.enter();

    let result = match kind {
        AnalysisKind::ScoringDistribution => AnalysisOutput::ScoringDistribution(
            scoring_distribution(dataset, &config.scoring_distribution),
        ),
        AnalysisKind::WicketsVsAverage => AnalysisOutput::WicketsVsAverage(wickets_vs_average(
            dataset,
            &config.wickets_vs_average,
        )),
        AnalysisKind::PlayerTrajectory => AnalysisOutput::PlayerTrajectory(player_trajectory(
            dataset,
            &config.player_trajectory,
        )),
        AnalysisKind::BattingAverageCheckpoints => AnalysisOutput::BattingAverageCheckpoints(
            batting_average_checkpoints(dataset, &config.batting_average_checkpoints),
        ),
        AnalysisKind::PlayerRadar => {
            AnalysisOutput::PlayerRadar(player_radar(dataset, &config.player_radar))
        }
        AnalysisKind::Dashboard => {
            AnalysisOutput::Dashboard(dashboard(dataset, config.dashboard_inputs()))
        }
        AnalysisKind::MatchEfficiency => {
            AnalysisOutput::MatchEfficiency(match_efficiency(dataset, &config.match_efficiency))
        }
        AnalysisKind::ScoringStructure => AnalysisOutput::ScoringStructure(scoring_structure(
            dataset,
            &config.scoring_structure,
        )),
        AnalysisKind::AverageBands => {
            AnalysisOutput::AverageBands(average_bands(dataset, &config.average_bands))
        }
        AnalysisKind::TopScorers => {
            AnalysisOutput::TopScorers(top_scorers(dataset, &config.top_scorers))
        }
        AnalysisKind::BowlingDensity => {
            AnalysisOutput::BowlingDensity(bowling_density(dataset, &config.bowling_density))
        }
        AnalysisKind::SeasonParticipation => AnalysisOutput::SeasonParticipation(
            season_participation(dataset, &config.season_participation),
        ),
        AnalysisKind::CareerStability => {
            AnalysisOutput::CareerStability(career_stability(dataset, &config.career_stability))
        }
        AnalysisKind::BowlerQuadrants => {
            AnalysisOutput::BowlerQuadrants(bowler_quadrants(dataset, &config.bowler_quadrants))
        }
        AnalysisKind::PlayerRoles => {
            AnalysisOutput::PlayerRoles(player_roles(dataset, &config.player_roles))
        }
        AnalysisKind::FieldingRegression => AnalysisOutput::FieldingRegression(
            fielding_regression(dataset, &config.fielding_regression),
        ),
    };
    debug!(ready = result.is_ready(), "analysis finished");

    AnalysisReport {
        analysis: kind,
        summary: result.summary(),
        result,
    }
}

/// Runs every analysis in catalogue order. Each runs independently; a
/// no-data outcome in one never affects another.
pub fn run_all(dataset: &SeasonDataset, config: &AnalysisConfig) -> Result<Vec<AnalysisReport>> {
    run_many(&AnalysisKind::ALL, dataset, config)
}

/// Runs `kinds` in order. Every section they read is checked before the
/// first analysis starts.
pub fn run_many(
    kinds: &[AnalysisKind],
    dataset: &SeasonDataset,
    config: &AnalysisConfig,
) -> Result<Vec<AnalysisReport>> {
    for kind in kinds {
        config.validate_for(*kind)?;
    }
    Ok(kinds
        .iter()
        .map(|kind| execute(*kind, dataset, config))
        .collect())
}
