//! Rule-based role classification with per-season shares.
//!
//! Rules are evaluated in order and the first match wins; rows matching no
//! rule fall into the fallback category, so the categories are mutually
//! exclusive and cover every row.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use ipl_model::{SeasonDataset, SeasonRecord, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    GreaterThan,
    AtLeast,
    LessThan,
    AtMost,
}

impl Comparison {
    fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::GreaterThan => value > threshold,
            Comparison::AtLeast => value >= threshold,
            Comparison::LessThan => value < threshold,
            Comparison::AtMost => value <= threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub column: StatColumn,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl Condition {
    /// A null value fails every comparison.
    pub fn matches(&self, record: &SeasonRecord) -> bool {
        record
            .stat(self.column)
            .is_some_and(|value| self.comparison.holds(value, self.threshold))
    }
}

/// A category and the conditions that must all hold for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub category: String,
    pub conditions: Vec<Condition>,
}

impl ClassificationRule {
    fn above(category: &str, column: StatColumn, threshold: f64) -> Self {
        Self {
            category: category.to_string(),
            conditions: vec![Condition {
                column,
                comparison: Comparison::GreaterThan,
                threshold,
            }],
        }
    }

    pub fn matches(&self, record: &SeasonRecord) -> bool {
        self.conditions.iter().all(|condition| condition.matches(record))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    pub min_season: i32,
    pub rules: Vec<ClassificationRule>,
    pub fallback: String,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            min_season: 2010,
            rules: vec![
                ClassificationRule::above("batter", StatColumn::BattingAverage, 25.0),
                ClassificationRule::above("bowler", StatColumn::WicketsTaken, 5.0),
            ],
            fallback: "fringe".to_string(),
        }
    }
}

impl RoleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback.trim().is_empty() {
            return Err(ConfigError::Empty {
                analysis: "player_roles",
                field: "fallback",
            });
        }
        let mut seen = HashSet::new();
        for category in self.categories() {
            if !seen.insert(category) {
                return Err(ConfigError::Invalid {
                    analysis: "player_roles",
                    message: format!("category {category:?} is defined twice"),
                });
            }
        }
        if self.rules.iter().any(|rule| rule.conditions.is_empty()) {
            return Err(ConfigError::Invalid {
                analysis: "player_roles",
                message: "every rule needs at least one condition".to_string(),
            });
        }
        Ok(())
    }

    /// Categories in rule order, then the fallback.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .map(|rule| rule.category.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
    }

    /// Index into [`Self::categories`] for `record`.
    pub fn classify(&self, record: &SeasonRecord) -> usize {
        self.rules
            .iter()
            .position(|rule| rule.matches(record))
            .unwrap_or(self.rules.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Percent of the season's rows.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRoles {
    pub season: i32,
    pub rows: usize,
    pub shares: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRoles {
    pub categories: Vec<String>,
    pub seasons: Vec<SeasonRoles>,
}

impl Summarize for PlayerRoles {
    fn summary(&self) -> Vec<SummaryStat> {
        let mut stats = vec![SummaryStat::count("seasons", self.seasons.len())];
        if let Some(latest) = self.seasons.last() {
            for share in &latest.shares {
                stats.push(SummaryStat::number(
                    format!("{}_share_pct_{}", share.category, latest.season),
                    share.share,
                ));
            }
        }
        stats
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn player_roles(dataset: &SeasonDataset, config: &RoleConfig) -> Outcome<PlayerRoles> {
    let columns: Vec<StatColumn> = config
        .rules
        .iter()
        .flat_map(|rule| rule.conditions.iter().map(|c| c.column))
        .collect();
    warn_absent("player_roles", dataset, &columns);

    let categories: Vec<String> = config.categories().map(str::to_string).collect();
    let mut counts: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (season, record) in dataset.seasonal_from(config.min_season) {
        let row = counts
            .entry(season)
            .or_insert_with(|| vec![0; categories.len()]);
        row[config.classify(record)] += 1;
    }
    if counts.is_empty() {
        return Outcome::no_data(format!("no seasons from {}", config.min_season));
    }

    let seasons = counts
        .into_iter()
        .map(|(season, row)| {
            let rows: usize = row.iter().sum();
            SeasonRoles {
                season,
                rows,
                shares: categories
                    .iter()
                    .zip(row)
                    .map(|(category, count)| CategoryShare {
                        category: category.clone(),
                        count,
                        share: percent(count as f64, rows as f64),
                    })
                    .collect(),
            }
        })
        .collect();
    Outcome::Ready(PlayerRoles {
        categories,
        seasons,
    })
}
