//! Training dataset loading and cleaning

use crate::error::{AgroError, Result};
use crate::schema::{feature_fields, FeatureRecord, TARGET_FIELD};
use ndarray::Array1;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Load a training CSV into records + target vector.
///
/// Header names are normalized (trim, lowercase, spaces to underscores),
/// rows with any null are dropped, then the schema is checked: every
/// feature column and the target must be present and at least one row
/// must survive cleaning.
pub fn load_training_data(path: &Path) -> Result<(Vec<FeatureRecord>, Array1<f64>)> {
    let file = File::open(path)
        .map_err(|e| AgroError::Dataset(format!("cannot open {}: {}", path.display(), e)))?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(file)
        .finish()?;

    let normalized: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_header(name.as_str()))
        .collect();
    df.set_column_names(normalized)?;

    let df = drop_null_rows(&df)?;

    let present: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    for field in feature_fields().iter().chain(std::iter::once(&TARGET_FIELD)) {
        if !present.contains(field) {
            return Err(AgroError::Dataset(format!(
                "required column '{}' missing from {}",
                field,
                path.display()
            )));
        }
    }

    if df.height() == 0 {
        return Err(AgroError::Dataset(format!(
            "no usable rows in {} after dropping nulls",
            path.display()
        )));
    }

    rows_to_records(&df)
}

fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Keep only rows where every column is non-null.
fn drop_null_rows(df: &DataFrame) -> Result<DataFrame> {
    let mut mask: Option<BooleanChunked> = None;
    for column in df.get_columns() {
        let not_null = column.as_materialized_series().is_not_null();
        mask = Some(match mask {
            Some(m) => m & not_null,
            None => not_null,
        });
    }
    match mask {
        Some(m) => Ok(df.filter(&m)?),
        None => Ok(df.clone()),
    }
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let ca = df.column(name)?.as_materialized_series().str()?;
    ca.into_iter()
        .map(|v| {
            v.map(|s| s.to_string())
                .ok_or_else(|| AgroError::Dataset(format!("null value in column '{}'", name)))
        })
        .collect()
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let casted = df.column(name)?.cast(&DataType::Float64)?;
    let ca = casted.as_materialized_series().f64()?;
    ca.into_iter()
        .map(|v| {
            v.ok_or_else(|| AgroError::Dataset(format!("null value in column '{}'", name)))
        })
        .collect()
}

fn rows_to_records(df: &DataFrame) -> Result<(Vec<FeatureRecord>, Array1<f64>)> {
    let crop_type = string_column(df, "crop_type")?;
    let season = string_column(df, "season")?;
    let state = string_column(df, "state")?;
    let rainfall = numeric_column(df, "rainfall")?;
    let avg_temperature = numeric_column(df, "avg_temperature")?;
    let pesticide_usage = numeric_column(df, "pesticide_usage")?;
    let fertilizer = numeric_column(df, "fertilizer")?;
    let area = numeric_column(df, "area")?;
    let targets = numeric_column(df, TARGET_FIELD)?;

    let n = df.height();
    let mut records = Vec::with_capacity(n);
    for i in 0..n {
        records.push(FeatureRecord {
            crop_type: crop_type[i].clone(),
            season: season[i].clone(),
            state: state[i].clone(),
            rainfall: rainfall[i],
            avg_temperature: avg_temperature[i],
            pesticide_usage: pesticide_usage[i],
            fertilizer: fertilizer[i],
            area: area[i],
        });
    }

    tracing::info!(rows = n, "loaded training data");
    Ok((records, Array1::from_vec(targets)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    const HEADER: &str =
        "crop_type,season,state,rainfall,avg_temperature,pesticide_usage,fertilizer,area,crop_yield";

    #[test]
    fn test_loads_clean_rows() {
        let (_dir, path) = write_csv(&format!(
            "{}\nrice,kharif,punjab,800,28,2,50,2,3500\nwheat,rabi,haryana,400,18,1,60,3,4200\n",
            HEADER
        ));
        let (records, targets) = load_training_data(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].crop_type, "rice");
        assert_eq!(targets[1], 4200.0);
    }

    #[test]
    fn test_normalizes_header_names() {
        let (_dir, path) = write_csv(
            "Crop Type,Season,State,Rainfall,Avg Temperature,Pesticide Usage,Fertilizer,Area,Crop Yield\nrice,kharif,punjab,800,28,2,50,2,3500\n",
        );
        let (records, _) = load_training_data(&path).unwrap();
        assert_eq!(records[0].season, "kharif");
    }

    #[test]
    fn test_drops_rows_with_nulls() {
        let (_dir, path) = write_csv(&format!(
            "{}\nrice,kharif,punjab,800,28,2,50,2,3500\nwheat,rabi,,400,18,1,60,3,4200\n",
            HEADER
        ));
        let (records, targets) = load_training_data(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn test_missing_column_is_dataset_error() {
        let (_dir, path) = write_csv(
            "crop_type,season,state,rainfall,avg_temperature,pesticide_usage,fertilizer,area\nrice,kharif,punjab,800,28,2,50,2\n",
        );
        assert!(matches!(
            load_training_data(&path),
            Err(AgroError::Dataset(_))
        ));
    }

    #[test]
    fn test_all_rows_null_is_dataset_error() {
        let (_dir, path) = write_csv(&format!("{}\nrice,kharif,,800,28,2,50,2,3500\n", HEADER));
        assert!(matches!(
            load_training_data(&path),
            Err(AgroError::Dataset(_))
        ));
    }
}
