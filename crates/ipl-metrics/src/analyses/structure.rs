//! Per-season share of a whole contributed by each component column.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::percent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    pub min_season: i32,
    pub components: Vec<StatColumn>,
    pub whole: StatColumn,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            min_season: 2010,
            components: vec![
                StatColumn::Centuries,
                StatColumn::HalfCenturies,
                StatColumn::Fours,
                StatColumn::Sixes,
            ],
            whole: StatColumn::RunsScored,
        }
    }
}

impl StructureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.components.is_empty() {
            return Err(ConfigError::Empty {
                analysis: "scoring_structure",
                field: "components",
            });
        }
        if self.components.contains(&self.whole) {
            return Err(ConfigError::Invalid {
                analysis: "scoring_structure",
                message: format!("{} cannot be both a component and the whole", self.whole),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentShare {
    pub column: StatColumn,
    pub total: f64,
    /// Percent of the season's whole.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonStructure {
    pub season: i32,
    pub whole: f64,
    pub components: Vec<ComponentShare>,
    /// Percent of the whole not covered by any component.
    pub remainder_share: f64,
}

impl SeasonStructure {
    /// Component shares plus the remainder; 100 whenever the whole is
    /// non-zero.
    pub fn share_sum(&self) -> f64 {
        self.components.iter().map(|c| c.share).sum::<f64>() + self.remainder_share
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringStructure {
    pub whole: StatColumn,
    pub seasons: Vec<SeasonStructure>,
}

impl Summarize for ScoringStructure {
    fn summary(&self) -> Vec<SummaryStat> {
        let mut stats = vec![SummaryStat::count("seasons", self.seasons.len())];
        if let Some(latest) = self.seasons.last() {
            stats.push(SummaryStat::number("latest_season", f64::from(latest.season)));
            for component in &latest.components {
                stats.push(SummaryStat::number(
                    format!("latest_{}_share_pct", component.column),
                    component.share,
                ));
            }
        }
        stats
    }
}

pub fn scoring_structure(
    dataset: &SeasonDataset,
    config: &StructureConfig,
) -> Outcome<ScoringStructure> {
    let mut required = config.components.clone();
    required.push(config.whole);
    warn_absent("scoring_structure", dataset, &required);

    // season -> (whole, component totals)
    let mut sums: BTreeMap<i32, (f64, Vec<f64>)> = BTreeMap::new();
    for (season, record) in dataset.seasonal_from(config.min_season) {
        let entry = sums
            .entry(season)
            .or_insert_with(|| (0.0, vec![0.0; config.components.len()]));
        entry.0 += record.stat_or_zero(config.whole);
        for (total, column) in entry.1.iter_mut().zip(&config.components) {
            *total += record.stat_or_zero(*column);
        }
    }
    if sums.is_empty() {
        return Outcome::no_data(format!("no seasons from {}", config.min_season));
    }

    let seasons = sums
        .into_iter()
        .map(|(season, (whole, totals))| {
            let covered: f64 = totals.iter().sum();
            SeasonStructure {
                season,
                whole,
                components: config
                    .components
                    .iter()
                    .zip(totals)
                    .map(|(column, total)| ComponentShare {
                        column: *column,
                        total,
                        share: percent(total, whole),
                    })
                    .collect(),
                remainder_share: percent(whole - covered, whole),
            }
        })
        .collect();
    Outcome::Ready(ScoringStructure {
        whole: config.whole,
        seasons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{close, dataset, record};

    #[test]
    fn shares_sum_to_one_hundred() {
        let data = dataset(vec![
            record(
                "A",
                2012,
                &[
                    (StatColumn::RunsScored, 200.0),
                    (StatColumn::Fours, 20.0),
                    (StatColumn::Sixes, 10.0),
                ],
            ),
            record("B", 2012, &[(StatColumn::RunsScored, 200.0), (StatColumn::Centuries, 1.0)]),
        ]);
        let result = scoring_structure(&data, &StructureConfig::default())
            .into_ready()
            .unwrap();
        let season = &result.seasons[0];
        assert_eq!(season.whole, 400.0);
        assert!(close(season.components[2].share, 5.0));
        assert!(close(season.components[0].share, 0.25));
        assert!(close(season.share_sum(), 100.0));
    }

    #[test]
    fn zero_whole_yields_zero_shares() {
        let data = dataset(vec![record("A", 2015, &[(StatColumn::Fours, 3.0)])]);
        let result = scoring_structure(&data, &StructureConfig::default())
            .into_ready()
            .unwrap();
        let season = &result.seasons[0];
        assert!(season.components.iter().all(|c| c.share == 0.0));
        assert_eq!(season.remainder_share, 0.0);
    }
}
