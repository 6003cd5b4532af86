//! Polars export of the canonical dataset for tabular previews.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use ipl_model::{PLAYER_COLUMN, SEASON_COLUMN, SeasonDataset, SeasonRecord};

/// Builds a DataFrame with the identifier, season, every present numeric
/// column (catalog order), and the free-text columns.
pub fn dataset_to_frame(dataset: &SeasonDataset) -> PolarsResult<DataFrame> {
    let records = dataset.records();
    let mut columns: Vec<Column> =
        Vec::with_capacity(2 + dataset.columns().len() + dataset.text_columns().len());

    let players: Vec<&str> = records.iter().map(SeasonRecord::player).collect();
    columns.push(Series::new(PLAYER_COLUMN.into(), players).into_column());
    let seasons: Vec<Option<i32>> = records.iter().map(SeasonRecord::season).collect();
    columns.push(Series::new(SEASON_COLUMN.into(), seasons).into_column());

    for column in dataset.columns() {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.stat(*column)).collect();
        columns.push(Series::new(column.name().into(), values).into_column());
    }
    for column in dataset.text_columns() {
        let values: Vec<Option<&str>> = records.iter().map(|r| r.text(*column)).collect();
        columns.push(Series::new(column.name().into(), values).into_column());
    }
    DataFrame::new(columns)
}

/// First `rows` rows of [`dataset_to_frame`].
pub fn preview_frame(dataset: &SeasonDataset, rows: usize) -> PolarsResult<DataFrame> {
    Ok(dataset_to_frame(dataset)?.head(Some(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipl_model::StatColumn;

    #[test]
    fn frame_has_one_column_per_present_field() {
        let dataset = SeasonDataset::from_records(vec![
            SeasonRecord::new("A", Some(2020))
                .unwrap()
                .with_stat(StatColumn::RunsScored, 10.0),
            SeasonRecord::new("B", Some(2021))
                .unwrap()
                .with_stat(StatColumn::WicketsTaken, 4.0),
        ]);
        let frame = dataset_to_frame(&dataset).unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.width(), 4);
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Player_Name", "Year", "Runs_Scored", "Wickets_Taken"]
        );
        assert_eq!(preview_frame(&dataset, 1).unwrap().height(), 1);
    }
}
