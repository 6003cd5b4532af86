//! Column presence checks shared by the analyses.

use ipl_model::{SeasonDataset, StatColumn};
use tracing::warn;

/// Logs every column in `required` that the source did not provide.
///
/// Absent columns read as null everywhere, so the analysis still runs; the
/// warning is emitted once per analysis run.
pub(crate) fn warn_absent(analysis: &str, dataset: &SeasonDataset, required: &[StatColumn]) {
    let mut reported: Vec<StatColumn> = Vec::new();
    for column in required {
        if !dataset.has_column(*column) && !reported.contains(column) {
            reported.push(*column);
        }
    }
    if !reported.is_empty() {
        let names: Vec<&str> = reported.iter().map(|column| column.name()).collect();
        warn!(
            analysis,
            columns = ?names,
            "columns absent from source; treating their values as null"
        );
    }
}
