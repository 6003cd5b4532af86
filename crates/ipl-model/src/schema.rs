//! Schema catalog for the season performance table.
//!
//! Declares every recognized column together with its semantic kind. The
//! ingestor consults the catalog to decide how a cell is coerced, and the
//! metrics engine addresses numeric values through [`StatColumn`] instead of
//! raw header strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Header of the player identifier column.
pub const PLAYER_COLUMN: &str = "Player_Name";

/// Header of the season column.
pub const SEASON_COLUMN: &str = "Year";

/// Sentinel used by the source for "no statistics available".
pub const NO_STATS_SENTINEL: &str = "No stats";

/// Semantic kind of a declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// The player identifier.
    Identifier,
    /// The season (year) column.
    Season,
    /// A numeric performance field, coerced to `f64`.
    Numeric,
    /// A free-form descriptor that is never coerced.
    FreeText,
}

/// Numeric performance columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StatColumn {
    #[serde(rename = "Matches_Batted")]
    MatchesBatted,
    #[serde(rename = "Not_Outs")]
    NotOuts,
    #[serde(rename = "Runs_Scored")]
    RunsScored,
    #[serde(rename = "Batting_Average")]
    BattingAverage,
    #[serde(rename = "Balls_Faced")]
    BallsFaced,
    #[serde(rename = "Batting_Strike_Rate")]
    BattingStrikeRate,
    #[serde(rename = "Centuries")]
    Centuries,
    #[serde(rename = "Half_Centuries")]
    HalfCenturies,
    #[serde(rename = "Fours")]
    Fours,
    #[serde(rename = "Sixes")]
    Sixes,
    #[serde(rename = "Catches_Taken")]
    CatchesTaken,
    #[serde(rename = "Stumpings")]
    Stumpings,
    #[serde(rename = "Matches_Bowled")]
    MatchesBowled,
    #[serde(rename = "Balls_Bowled")]
    BallsBowled,
    #[serde(rename = "Runs_Conceded")]
    RunsConceded,
    #[serde(rename = "Wickets_Taken")]
    WicketsTaken,
    #[serde(rename = "Bowling_Average")]
    BowlingAverage,
    #[serde(rename = "Economy_Rate")]
    EconomyRate,
    #[serde(rename = "Bowling_Strike_Rate")]
    BowlingStrikeRate,
    #[serde(rename = "Four_Wicket_Hauls")]
    FourWicketHauls,
    #[serde(rename = "Five_Wicket_Hauls")]
    FiveWicketHauls,
}

impl StatColumn {
    /// Every numeric column in catalog order.
    pub const ALL: [StatColumn; 21] = [
        StatColumn::MatchesBatted,
        StatColumn::NotOuts,
        StatColumn::RunsScored,
        StatColumn::BattingAverage,
        StatColumn::BallsFaced,
        StatColumn::BattingStrikeRate,
        StatColumn::Centuries,
        StatColumn::HalfCenturies,
        StatColumn::Fours,
        StatColumn::Sixes,
        StatColumn::CatchesTaken,
        StatColumn::Stumpings,
        StatColumn::MatchesBowled,
        StatColumn::BallsBowled,
        StatColumn::RunsConceded,
        StatColumn::WicketsTaken,
        StatColumn::BowlingAverage,
        StatColumn::EconomyRate,
        StatColumn::BowlingStrikeRate,
        StatColumn::FourWicketHauls,
        StatColumn::FiveWicketHauls,
    ];

    /// Source header for this column.
    pub fn name(self) -> &'static str {
        match self {
            StatColumn::MatchesBatted => "Matches_Batted",
            StatColumn::NotOuts => "Not_Outs",
            StatColumn::RunsScored => "Runs_Scored",
            StatColumn::BattingAverage => "Batting_Average",
            StatColumn::BallsFaced => "Balls_Faced",
            StatColumn::BattingStrikeRate => "Batting_Strike_Rate",
            StatColumn::Centuries => "Centuries",
            StatColumn::HalfCenturies => "Half_Centuries",
            StatColumn::Fours => "Fours",
            StatColumn::Sixes => "Sixes",
            StatColumn::CatchesTaken => "Catches_Taken",
            StatColumn::Stumpings => "Stumpings",
            StatColumn::MatchesBowled => "Matches_Bowled",
            StatColumn::BallsBowled => "Balls_Bowled",
            StatColumn::RunsConceded => "Runs_Conceded",
            StatColumn::WicketsTaken => "Wickets_Taken",
            StatColumn::BowlingAverage => "Bowling_Average",
            StatColumn::EconomyRate => "Economy_Rate",
            StatColumn::BowlingStrikeRate => "Bowling_Strike_Rate",
            StatColumn::FourWicketHauls => "Four_Wicket_Hauls",
            StatColumn::FiveWicketHauls => "Five_Wicket_Hauls",
        }
    }

    /// Looks up a column by header, ignoring ASCII case.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(header))
    }
}

impl fmt::Display for StatColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatColumn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_header(s.trim()).ok_or_else(|| ModelError::UnknownColumn(s.to_string()))
    }
}

/// Free-text descriptor columns, kept verbatim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TextColumn {
    #[serde(rename = "Highest_Score")]
    HighestScore,
    #[serde(rename = "Best_Bowling_Match")]
    BestBowlingMatch,
}

impl TextColumn {
    pub const ALL: [TextColumn; 2] = [TextColumn::HighestScore, TextColumn::BestBowlingMatch];

    pub fn name(self) -> &'static str {
        match self {
            TextColumn::HighestScore => "Highest_Score",
            TextColumn::BestBowlingMatch => "Best_Bowling_Match",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(header))
    }
}

impl fmt::Display for TextColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A header resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredColumn {
    Player,
    Season,
    Stat(StatColumn),
    Text(TextColumn),
}

impl DeclaredColumn {
    pub fn kind(self) -> ColumnKind {
        match self {
            DeclaredColumn::Player => ColumnKind::Identifier,
            DeclaredColumn::Season => ColumnKind::Season,
            DeclaredColumn::Stat(_) => ColumnKind::Numeric,
            DeclaredColumn::Text(_) => ColumnKind::FreeText,
        }
    }
}

/// Resolves a raw header to a declared column.
///
/// Surrounding whitespace and a leading byte-order mark are ignored, and the
/// comparison is ASCII case-insensitive. Returns `None` for headers the
/// catalog does not declare.
pub fn resolve_header(raw: &str) -> Option<DeclaredColumn> {
    let header = raw.trim().trim_start_matches('\u{feff}').trim();
    if header.eq_ignore_ascii_case(PLAYER_COLUMN) {
        return Some(DeclaredColumn::Player);
    }
    if header.eq_ignore_ascii_case(SEASON_COLUMN) {
        return Some(DeclaredColumn::Season);
    }
    if let Some(stat) = StatColumn::from_header(header) {
        return Some(DeclaredColumn::Stat(stat));
    }
    TextColumn::from_header(header).map(DeclaredColumn::Text)
}
