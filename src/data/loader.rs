use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type, UInt64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{CellValue, ColumnStats, Row};
use super::provider::{InMemoryDataset, SplitPartitions};
use crate::error::ExplorerError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – bundle `{ title?, columns, rows, stats, split? }`
/// * `.csv`     – header row plus data rows
/// * `.parquet` – one column per field
///
/// CSV and Parquet rows carry no profile; statistics and the split preview
/// are read from an optional `<stem>.profile.json` next to the file.
pub fn load_file(path: &Path) -> Result<InMemoryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let mut dataset = match ext.as_str() {
        "json" => load_bundle(path)?,
        "csv" => attach_profile(load_csv(path)?, path)?,
        "parquet" | "pq" => attach_profile(load_parquet(path)?, path)?,
        other => return Err(ExplorerError::UnsupportedFormat(other.to_string()).into()),
    };

    if dataset.title.is_empty() {
        dataset.title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("dataset")
            .to_string();
    }

    if let Err(e) = dataset.validate_shape() {
        log::warn!("{} violates the row shape contract: {e}", path.display());
        return Err(e).with_context(|| format!("loading {}", path.display()));
    }

    log::info!(
        "loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// JSON bundle
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// {
///   "title": "people",
///   "columns": ["age", "city"],
///   "rows": [[31, "Oslo"], [null, "Rome"]],
///   "stats": [{"column": "age", "type": "numeric", "count": 1, "missing": 1, "unique": 1}],
///   "split": {"training": [[31, "Oslo"]], "validation": [], "testing": []}
/// }
/// ```
fn load_bundle(path: &Path) -> Result<InMemoryDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing dataset bundle")
}

// ---------------------------------------------------------------------------
// Profile sidecar
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct Profile {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    stats: Vec<ColumnStats>,
    #[serde(default)]
    split: Option<SplitPartitions>,
}

/// `data/people.csv` → `data/people.profile.json`.
pub fn profile_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    path.with_file_name(format!("{stem}.profile.json"))
}

fn attach_profile(mut dataset: InMemoryDataset, path: &Path) -> Result<InMemoryDataset> {
    let sidecar = profile_path(path);
    if !sidecar.exists() {
        log::info!("no profile found at {}; statistics table is empty", sidecar.display());
        return Ok(dataset);
    }

    let text = std::fs::read_to_string(&sidecar)
        .with_context(|| format!("reading profile {}", sidecar.display()))?;
    let profile: Profile = serde_json::from_str(&text)
        .with_context(|| format!("parsing profile {}", sidecar.display()))?;

    if let Some(title) = profile.title {
        dataset.title = title;
    }
    dataset.stats = profile.stats;
    dataset.split = profile.split;
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row gives the columns; every field goes through [`CellValue::parse`].
fn load_csv(path: &Path) -> Result<InMemoryDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("reading CSV row {i}"))?;
        rows.push(record.iter().map(CellValue::parse).collect::<Row>());
    }

    Ok(InMemoryDataset::new(columns, rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path) -> Result<InMemoryDataset> {
    let file = File::open(path).context("opening Parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading Parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building Parquet reader")?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch.context("reading Parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect::<Row>(),
            );
        }
    }

    Ok(InMemoryDataset::new(columns, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Missing;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => CellValue::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::UInt32 => CellValue::Number(col.as_primitive::<UInt32Type>().value(row) as f64),
        DataType::UInt64 => CellValue::Number(col.as_primitive::<UInt64Type>().value(row) as f64),
        DataType::Float32 => CellValue::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Text(col.as_boolean().value(row).to_string()),
        _ => match array_value_to_string(col.as_ref(), row) {
            Ok(s) => CellValue::Text(s),
            Err(_) => CellValue::Missing,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_sits_next_to_the_data() {
        assert_eq!(
            profile_path(Path::new("data/people.csv")),
            PathBuf::from("data/people.profile.json")
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("table.xlsx")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ExplorerError>(),
            Some(&ExplorerError::UnsupportedFormat("xlsx".into()))
        );
    }
}
