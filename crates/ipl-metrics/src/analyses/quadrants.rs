//! Bowler quadrants: median split of economy against strike efficiency.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ipl_model::{SeasonDataset, StatColumn};

use crate::columns::warn_absent;
use crate::error::ConfigError;
use crate::outcome::{Outcome, SummaryStat, Summarize};
use crate::stats::{mean, median, ratio_or_zero};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadrantConfig {
    pub min_season: i32,
    /// Averaged per player; lower is better.
    pub economy: StatColumn,
    pub wickets: StatColumn,
    /// Rows need a positive value here to count.
    pub balls: StatColumn,
    /// Display-only point weight, summed per player.
    pub weight: StatColumn,
    /// Players at or above either ceiling are discarded.
    pub economy_ceiling: f64,
    pub strike_ceiling: f64,
}

impl Default for QuadrantConfig {
    fn default() -> Self {
        Self {
            min_season: 2020,
            economy: StatColumn::EconomyRate,
            wickets: StatColumn::WicketsTaken,
            balls: StatColumn::BallsBowled,
            weight: StatColumn::MatchesBowled,
            economy_ceiling: 15.0,
            strike_ceiling: 15.0,
        }
    }
}

impl QuadrantConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, ceiling) in [
            ("economy_ceiling", self.economy_ceiling),
            ("strike_ceiling", self.strike_ceiling),
        ] {
            if !(ceiling.is_finite() && ceiling > 0.0) {
                return Err(ConfigError::Invalid {
                    analysis: "bowler_quadrants",
                    message: format!("{field} must be positive"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// Economy below the median, strike efficiency at or above it.
    StrikeAndContain,
    /// Both at or above their medians.
    ExpensiveStrike,
    /// Both below their medians.
    ContainOnly,
    /// Economy at or above the median, strike efficiency below it.
    Struggling,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::StrikeAndContain,
        Quadrant::ExpensiveStrike,
        Quadrant::ContainOnly,
        Quadrant::Struggling,
    ];

    pub fn classify(economy: f64, strike: f64, economy_median: f64, strike_median: f64) -> Self {
        match (economy < economy_median, strike < strike_median) {
            (true, false) => Quadrant::StrikeAndContain,
            (false, false) => Quadrant::ExpensiveStrike,
            (true, true) => Quadrant::ContainOnly,
            (false, true) => Quadrant::Struggling,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quadrant::StrikeAndContain => "strike_and_contain",
            Quadrant::ExpensiveStrike => "expensive_strike",
            Quadrant::ContainOnly => "contain_only",
            Quadrant::Struggling => "struggling",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlerPoint {
    pub player: String,
    pub economy: f64,
    /// Wickets per hundred balls.
    pub strike: f64,
    pub weight: f64,
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlerQuadrants {
    pub economy_median: f64,
    pub strike_median: f64,
    pub bowlers: Vec<BowlerPoint>,
    /// Count per quadrant, every quadrant listed.
    pub counts: BTreeMap<Quadrant, usize>,
}

impl Summarize for BowlerQuadrants {
    fn summary(&self) -> Vec<SummaryStat> {
        let mut stats = vec![
            SummaryStat::count("bowlers", self.bowlers.len()),
            SummaryStat::number("economy_median", self.economy_median),
            SummaryStat::number("strike_median", self.strike_median),
        ];
        for (quadrant, count) in &self.counts {
            stats.push(SummaryStat::count(quadrant.name(), *count));
        }
        stats
    }
}

#[derive(Default)]
struct BowlerTotals {
    economies: Vec<f64>,
    wickets: f64,
    balls: f64,
    weight: f64,
}

pub fn bowler_quadrants(
    dataset: &SeasonDataset,
    config: &QuadrantConfig,
) -> Outcome<BowlerQuadrants> {
    warn_absent(
        "bowler_quadrants",
        dataset,
        &[config.economy, config.wickets, config.balls, config.weight],
    );

    let mut totals: BTreeMap<&str, BowlerTotals> = BTreeMap::new();
    for (_, record) in dataset.seasonal_from(config.min_season) {
        let balls = record.stat_or_zero(config.balls);
        if balls <= 0.0 {
            continue;
        }
        let entry = totals.entry(record.player()).or_default();
        entry.economies.push(record.stat_or_zero(config.economy));
        entry.wickets += record.stat_or_zero(config.wickets);
        entry.balls += balls;
        entry.weight += record.stat_or_zero(config.weight);
    }

    let mut bowlers: Vec<BowlerPoint> = totals
        .into_iter()
        .filter_map(|(player, totals)| {
            let economy = mean(&totals.economies)?;
            let strike = ratio_or_zero(totals.wickets, totals.balls) * 100.0;
            (economy < config.economy_ceiling && strike < config.strike_ceiling).then(|| {
                BowlerPoint {
                    player: player.to_string(),
                    economy,
                    strike,
                    weight: totals.weight,
                    quadrant: Quadrant::ContainOnly,
                }
            })
        })
        .collect();

    let economies: Vec<f64> = bowlers.iter().map(|b| b.economy).collect();
    let strikes: Vec<f64> = bowlers.iter().map(|b| b.strike).collect();
    let (Some(economy_median), Some(strike_median)) = (median(&economies), median(&strikes))
    else {
        return Outcome::no_data(format!(
            "no bowlers from {} within the sanity ceilings",
            config.min_season
        ));
    };

    let mut counts: BTreeMap<Quadrant, usize> = Quadrant::ALL.into_iter().map(|q| (q, 0)).collect();
    for bowler in &mut bowlers {
        bowler.quadrant =
            Quadrant::classify(bowler.economy, bowler.strike, economy_median, strike_median);
        *counts.entry(bowler.quadrant).or_default() += 1;
    }
    Outcome::Ready(BowlerQuadrants {
        economy_median,
        strike_median,
        bowlers,
        counts,
    })
}
