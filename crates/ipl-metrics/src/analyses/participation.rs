//! Distinct players per season.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use ipl_model::SeasonDataset;

use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipationConfig {
    pub min_season: i32,
}

impl Default for ParticipationConfig {
    fn default() -> Self {
        Self { min_season: 2008 }
    }
}

impl ParticipationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_season < 0 {
            return Err(ConfigError::Invalid {
                analysis: "season_participation",
                message: format!("min_season {} is not a season", self.min_season),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonCount {
    pub season: i32,
    pub players: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participation {
    /// Ascending by season.
    pub seasons: Vec<SeasonCount>,
}

impl Summarize for Participation {
    fn summary(&self) -> Vec<SummaryStat> {
        let mut stats = vec![SummaryStat::count("seasons", self.seasons.len())];
        if let (Some(first), Some(last)) = (self.seasons.first(), self.seasons.last()) {
            stats.push(SummaryStat::count(format!("players_{}", first.season), first.players));
            stats.push(SummaryStat::count(format!("players_{}", last.season), last.players));
        }
        if let Some(busiest) = self.seasons.iter().max_by_key(|s| s.players) {
            stats.push(SummaryStat::count("max_players", busiest.players));
        }
        stats
    }
}

pub fn season_participation(
    dataset: &SeasonDataset,
    config: &ParticipationConfig,
) -> Outcome<Participation> {
    let mut players: BTreeMap<i32, BTreeSet<&str>> = BTreeMap::new();
    for (season, record) in dataset.seasonal_from(config.min_season) {
        players.entry(season).or_default().insert(record.player());
    }
    if players.is_empty() {
        return Outcome::no_data(format!("no seasons from {}", config.min_season));
    }
    Outcome::Ready(Participation {
        seasons: players
            .into_iter()
            .map(|(season, names)| SeasonCount {
                season,
                players: names.len(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dataset, record};

    #[test]
    fn negative_min_season_is_rejected() {
        assert!(ParticipationConfig::default().validate().is_ok());
        assert!(ParticipationConfig { min_season: -1 }.validate().is_err());
    }

    #[test]
    fn counts_distinct_players_in_season_order() {
        let data = dataset(vec![
            record("A", 2010, &[]),
            record("B", 2009, &[]),
            record("C", 2009, &[]),
            record("A", 2009, &[]),
            record("Z", 2007, &[]),
        ]);
        let result = season_participation(&data, &ParticipationConfig::default())
            .into_ready()
            .unwrap();
        assert_eq!(
            result.seasons,
            vec![
                SeasonCount {
                    season: 2009,
                    players: 3
                },
                SeasonCount {
                    season: 2010,
                    players: 1
                },
            ]
        );
    }

    #[test]
    fn empty_dataset_is_no_data() {
        assert!(
            !season_participation(&SeasonDataset::default(), &ParticipationConfig::default())
                .is_ready()
        );
    }
}
