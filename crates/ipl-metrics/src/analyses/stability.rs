//! Career stability: coefficient of variation grouped by career length.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::{mean, median, sample_std, sorted};

/// Inclusive range of observation counts; `max: None` is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortRange {
    pub label: String,
    pub min: usize,
    pub max: Option<usize>,
}

impl CohortRange {
    fn new(label: &str, min: usize, max: Option<usize>) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
        }
    }

    pub fn contains(&self, observations: usize) -> bool {
        observations >= self.min && self.max.is_none_or(|max| observations <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    pub column: StatColumn,
    /// Players whose CV exceeds this are dropped as unreliable.
    pub max_cv: f64,
    pub cohorts: Vec<CohortRange>,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            column: StatColumn::BattingAverage,
            max_cv: 2.0,
            cohorts: vec![
                CohortRange::new("1-3", 1, Some(3)),
                CohortRange::new("4-6", 4, Some(6)),
                CohortRange::new("7-9", 7, Some(9)),
                CohortRange::new("10+", 10, None),
            ],
        }
    }
}

impl StabilityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cohorts.is_empty() {
            return Err(ConfigError::Empty {
                analysis: "career_stability",
                field: "cohorts",
            });
        }
        let mut floor = 0;
        for (idx, cohort) in self.cohorts.iter().enumerate() {
            let open = cohort.max.is_none();
            if (idx > 0 && cohort.min <= floor) || cohort.max.is_some_and(|max| max < cohort.min) {
                return Err(ConfigError::NotIncreasing {
                    analysis: "career_stability",
                    field: "cohorts",
                });
            }
            if open && idx + 1 != self.cohorts.len() {
                return Err(ConfigError::Invalid {
                    analysis: "career_stability",
                    message: "only the last cohort may be open-ended".to_string(),
                });
            }
            floor = cohort.max.unwrap_or(usize::MAX);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerVariation {
    pub player: String,
    pub observations: usize,
    pub mean: f64,
    pub cv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortVariation {
    pub range: CohortRange,
    /// Every CV in the cohort, ascending, for distribution plots.
    pub values: Vec<f64>,
    pub median: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerStability {
    pub column: StatColumn,
    pub players: Vec<PlayerVariation>,
    /// Players with a single positive value or a CV above `max_cv`.
    pub excluded: usize,
    pub cohorts: Vec<CohortVariation>,
}

impl Summarize for CareerStability {
    fn summary(&self) -> Vec<SummaryStat> {
        let mut stats = vec![
            SummaryStat::count("players", self.players.len()),
            SummaryStat::count("excluded", self.excluded),
        ];
        for cohort in &self.cohorts {
            stats.push(SummaryStat::count(
                format!("{}_count", cohort.range.label),
                cohort.values.len(),
            ));
            stats.push(SummaryStat::optional(
                format!("{}_median_cv", cohort.range.label),
                cohort.median,
            ));
        }
        stats
    }
}

pub fn career_stability(
    dataset: &SeasonDataset,
    config: &StabilityConfig,
) -> Outcome<CareerStability> {
    warn_absent("career_stability", dataset, &[config.column]);

    let mut by_player: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in dataset.records() {
        if let Some(value) = record.stat(config.column).filter(|v| *v > 0.0) {
            by_player.entry(record.player()).or_default().push(value);
        }
    }

    // Values are all positive here, so the mean is never zero.
    let mut excluded = 0usize;
    let players: Vec<PlayerVariation> = by_player
        .into_iter()
        .filter_map(|(player, values)| {
            let variation = sample_std(&values)
                .zip(mean(&values))
                .map(|(std, mean)| (mean, std / mean))
                .filter(|(_, cv)| *cv <= config.max_cv);
            let Some((mean, cv)) = variation else {
                excluded += 1;
                return None;
            };
            Some(PlayerVariation {
                player: player.to_string(),
                observations: values.len(),
                mean,
                cv,
            })
        })
        .collect();
    debug!(players = players.len(), excluded, "coefficients of variation computed");
    if players.is_empty() {
        return Outcome::no_data(format!(
            "no player has more than one positive {} value",
            config.column
        ));
    }

    let cohorts = config
        .cohorts
        .iter()
        .map(|range| {
            let cvs: Vec<f64> = players
                .iter()
                .filter(|p| range.contains(p.observations))
                .map(|p| p.cv)
                .collect();
            CohortVariation {
                range: range.clone(),
                median: median(&cvs),
                values: sorted(&cvs),
            }
        })
        .collect();
    Outcome::Ready(CareerStability {
        column: config.column,
        players,
        excluded,
        cohorts,
    })
}
