//! Analytical metrics engine over the canonical season dataset.
//!
//! Sixteen independent analyses, each a pure function of a
//! [`SeasonDataset`](ipl_model::SeasonDataset) and its configuration section.
//! Results separate the scalars to state ([`Summarize`]) from the series to
//! draw (the result fields), and an analysis whose filters leave nothing
//! returns [`Outcome::NoData`] instead of failing.
//!
//! ```no_run
//! use ipl_metrics::{AnalysisConfig, AnalysisKind, run};
//! # let dataset = ipl_model::SeasonDataset::default();
//! let report = run(AnalysisKind::TopScorers, &dataset, &AnalysisConfig::default())?;
//! for stat in &report.summary {
//!     println!("{}: {}", stat.label, stat.value);
//! }
//! # Ok::<(), ipl_metrics::MetricsError>(())
//! ```

pub mod analyses;
pub mod catalog;
mod columns;
pub mod config;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod overview;
pub mod stats;

#[cfg(test)]
mod testing;

pub use catalog::AnalysisKind;
pub use config::AnalysisConfig;
pub use engine::{AnalysisOutput, AnalysisReport, run, run_all, run_many};
pub use error::{ConfigError, MetricsError, Result};
pub use outcome::{NoData, Outcome, SummaryStat, SummaryValue, Summarize};
pub use overview::{DatasetOverview, dataset_overview};
