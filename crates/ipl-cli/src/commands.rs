//! Command implementations shared by the binary and the integration tests.
//!
//! Nothing here prints; callers decide how results are rendered.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, info, info_span};

use ipl_ingest::{
    CleanReport, DatasetCache, IngestOptions, SourceKey, UnparsedSeasons, preview_frame,
    read_source,
};
use ipl_metrics::{
    AnalysisConfig, AnalysisKind, AnalysisReport, DatasetOverview, dataset_overview, run_many,
};
use ipl_model::SeasonDataset;

/// Result of cleaning one source file.
#[derive(Debug)]
pub struct IngestRun {
    pub path: PathBuf,
    pub key: SourceKey,
    pub dataset: Arc<SeasonDataset>,
    pub report: CleanReport,
    pub overview: DatasetOverview,
    pub preview: Option<DataFrame>,
}

/// Overview of the cleaned source plus one report per requested analysis.
#[derive(Debug, Serialize)]
pub struct AnalyzeRun {
    pub overview: DatasetOverview,
    pub reports: Vec<AnalysisReport>,
}

/// Builds ingest options from the CLI switches.
pub fn ingest_options(strict: bool, keep_unparsed_seasons: bool) -> IngestOptions {
    let options = if strict {
        IngestOptions::strict()
    } else {
        IngestOptions::default()
    };
    if keep_unparsed_seasons {
        options.with_unparsed_seasons(UnparsedSeasons::Keep)
    } else {
        options
    }
}

/// Reads and cleans `path` through `cache`, optionally building a preview.
pub fn run_ingest(
    path: &Path,
    options: &IngestOptions,
    preview_rows: Option<usize>,
    cache: &mut DatasetCache,
) -> Result<IngestRun> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();

    let source = read_source(path)?;
    let key = SourceKey::derive(&source, options);
    let cached = cache
        .load_with_report(&source, options)
        .with_context(|| format!("clean {}", path.display()))?;
    let preview = preview_rows
        .map(|rows| preview_frame(&cached.dataset, rows))
        .transpose()
        .context("build preview frame")?;
    info!(
        key = %key,
        records = cached.dataset.len(),
        "source ingested"
    );
    Ok(IngestRun {
        path: path.to_path_buf(),
        key,
        overview: dataset_overview(&cached.dataset),
        dataset: cached.dataset,
        report: cached.report,
        preview,
    })
}

/// Parses analysis names, keeping first occurrences in order. No names
/// selects the whole catalogue.
pub fn resolve_analyses(names: &[String]) -> Result<Vec<AnalysisKind>> {
    if names.is_empty() {
        return Ok(AnalysisKind::ALL.to_vec());
    }
    let mut kinds: Vec<AnalysisKind> = Vec::with_capacity(names.len());
    for name in names {
        let kind: AnalysisKind = name.parse()?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

/// Loads a JSON configuration file, or the defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("read configuration {}", path.display()))?;
    let config = AnalysisConfig::from_json(&source)
        .with_context(|| format!("load configuration {}", path.display()))?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Cleans `path` and runs `kinds` against the result.
///
/// The configuration sections `kinds` read are checked before the source is
/// touched.
pub fn run_analyze(
    path: &Path,
    options: &IngestOptions,
    kinds: &[AnalysisKind],
    config: &AnalysisConfig,
    cache: &mut DatasetCache,
) -> Result<AnalyzeRun> {
    for kind in kinds {
        config
            .validate_for(*kind)
            .with_context(|| format!("configure {kind}"))?;
    }
    let ingest = run_ingest(path, options, None, cache)?;
    let reports = run_many(kinds, &ingest.dataset, config)?;
    let ready = reports.iter().filter(|r| r.result.is_ready()).count();
    info!(analyses = reports.len(), ready, "analyses complete");
    Ok(AnalyzeRun {
        overview: ingest.overview,
        reports,
    })
}

/// The default configuration as pretty JSON.
pub fn default_config_json() -> Result<String> {
    AnalysisConfig::default()
        .to_json_pretty()
        .context("serialize default configuration")
}

/// The overview and full reports as pretty JSON.
pub fn analyze_to_json(run: &AnalyzeRun) -> Result<String> {
    serde_json::to_string_pretty(run).context("serialize analysis reports")
}
