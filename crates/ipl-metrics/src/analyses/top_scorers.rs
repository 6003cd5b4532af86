//! Top-N players by career total with their season-by-season sums.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopScorersConfig {
    pub column: StatColumn,
    pub top_n: usize,
}

impl Default for TopScorersConfig {
    fn default() -> Self {
        Self {
            column: StatColumn::RunsScored,
            top_n: 5,
        }
    }
}

impl TopScorersConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::ZeroCount {
                analysis: "top_scorers",
                field: "top_n",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonTotal {
    pub season: i32,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerSeries {
    pub player: String,
    pub total: f64,
    /// Per-season sums in ascending season order, not cumulative.
    pub seasons: Vec<SeasonTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopScorers {
    pub column: StatColumn,
    pub players: Vec<ScorerSeries>,
}

impl Summarize for TopScorers {
    fn summary(&self) -> Vec<SummaryStat> {
        self.players
            .iter()
            .enumerate()
            .map(|(rank, series)| {
                SummaryStat::number(format!("#{} {}", rank + 1, series.player), series.total)
            })
            .collect()
    }
}

pub fn top_scorers(dataset: &SeasonDataset, config: &TopScorersConfig) -> Outcome<TopScorers> {
    warn_absent("top_scorers", dataset, &[config.column]);
    if dataset.is_empty() {
        return Outcome::no_data("dataset has no records");
    }

    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in dataset.records() {
        *totals.entry(record.player()).or_default() += record.stat_or_zero(config.column);
    }
    // BTreeMap iteration is name-ascending, and the sort is stable.
    let mut ranked: Vec<(&str, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(config.top_n);

    let players = ranked
        .into_iter()
        .map(|(player, total)| {
            let mut by_season: BTreeMap<i32, f64> = BTreeMap::new();
            for record in dataset.records_for(player) {
                if let Some(season) = record.season() {
                    *by_season.entry(season).or_default() += record.stat_or_zero(config.column);
                }
            }
            ScorerSeries {
                player: player.to_string(),
                total,
                seasons: by_season
                    .into_iter()
                    .map(|(season, total)| SeasonTotal { season, total })
                    .collect(),
            }
        })
        .collect();
    Outcome::Ready(TopScorers {
        column: config.column,
        players,
    })
}
