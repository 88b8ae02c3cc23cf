//! Writes a sample dataset in every supported layout:
//! `sample.json` (bundle), `sample.csv` and `sample.parquet`, plus the
//! `sample.profile.json` sidecar used by the latter two.
//!
//! This binary plays the part of an external dataset provider, so it is the
//! one place that computes column statistics and the train/validation/test
//! split.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::json;

use panda_explorer::{CellValue, ColumnKind, ColumnStats, InMemoryDataset, Row, SplitPartitions};

const ROWS: usize = 500;
const SPLIT_SAMPLE: usize = 50;
const CITIES: [&str; 5] = ["Oslo", "Rome", "Lima", "Pune", "Kyiv"];
const SEGMENTS: [&str; 3] = ["retail", "wholesale", "online"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn gauss(&mut self, mean: f64, std: f64) -> f64 {
        let u1 = self.uniform().max(f64::MIN_POSITIVE);
        let u2 = self.uniform();
        mean + std * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }
}

fn columns() -> Vec<String> {
    ["age", "income", "score", "city", "segment", "comment"]
        .map(String::from)
        .to_vec()
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    (0..ROWS)
        .map(|_| {
            let age = rng.gauss(41.0, 12.0).clamp(18.0, 90.0).round();
            let income = (age * 900.0 + rng.gauss(20_000.0, 8_000.0)).max(0.0).round();
            let score = rng.gauss(0.6, 0.15).clamp(0.0, 1.0);
            let city = CellValue::Text(rng.pick(&CITIES).into());
            let segment = CellValue::Text(rng.pick(&SEGMENTS).into());
            let comment = CellValue::Text(format!("note {}", rng.next_u64() % 97));
            let maybe = |rng: &mut SimpleRng, v: CellValue, p: f64| {
                if rng.chance(p) {
                    CellValue::Missing
                } else {
                    v
                }
            };
            vec![
                maybe(rng, CellValue::Number(age), 0.05),
                maybe(rng, CellValue::Number(income), 0.08),
                // A few scores arrive as free text to exercise non-numeric handling.
                if rng.chance(0.03) {
                    CellValue::Text("n/a".into())
                } else {
                    maybe(rng, CellValue::Number(score), 0.02)
                },
                maybe(rng, city, 0.04),
                segment,
                maybe(rng, comment, 0.5),
            ]
        })
        .collect()
}

fn profile_column(name: &str, kind: ColumnKind, cells: &[&CellValue]) -> ColumnStats {
    let present: Vec<&CellValue> = cells.iter().copied().filter(|c| !c.is_missing()).collect();
    let unique: HashSet<String> = present.iter().map(|c| c.to_string()).collect();
    let numbers: Vec<f64> = present.iter().filter_map(|c| c.as_number()).collect();

    let (min, max, mean, std) = if kind == ColumnKind::Numeric && !numbers.is_empty() {
        let n = numbers.len() as f64;
        let mean = numbers.iter().sum::<f64>() / n;
        let var = numbers.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (
            numbers.iter().copied().reduce(f64::min),
            numbers.iter().copied().reduce(f64::max),
            Some(mean),
            Some(var.sqrt()),
        )
    } else {
        (None, None, None, None)
    };

    ColumnStats {
        column: name.to_string(),
        kind,
        count: present.len() as u64,
        missing: (cells.len() - present.len()) as u64,
        unique: unique.len() as u64,
        min,
        max,
        mean,
        std,
    }
}

fn profile(columns: &[String], rows: &[Row]) -> Vec<ColumnStats> {
    columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let kind = match name.as_str() {
                "age" | "income" | "score" => ColumnKind::Numeric,
                "city" | "segment" => ColumnKind::Categorical,
                _ => ColumnKind::Other("text".into()),
            };
            let cells: Vec<&CellValue> = rows.iter().map(|r| &r[i]).collect();
            profile_column(name, kind, &cells)
        })
        .collect()
}

/// 70 / 15 / 15 split over a deterministic shuffle, sampled per partition.
fn split(rows: &[Row], rng: &mut SimpleRng) -> SplitPartitions {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    for i in (1..order.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        order.swap(i, j);
    }
    let train_end = rows.len() * 70 / 100;
    let valid_end = rows.len() * 85 / 100;
    let sample = |idx: &[usize]| -> Vec<Row> {
        idx.iter().take(SPLIT_SAMPLE).map(|&i| rows[i].clone()).collect()
    };
    SplitPartitions {
        training: sample(&order[..train_end]),
        validation: sample(&order[train_end..valid_end]),
        testing: sample(&order[valid_end..]),
    }
}

fn write_csv(path: &Path, dataset: &InMemoryDataset) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(&dataset.columns)?;
    for row in &dataset.rows {
        writer.write_record(row.iter().map(|c| match c {
            CellValue::Missing => String::new(),
            CellValue::Number(v) => v.to_string(),
            CellValue::Text(s) => s.clone(),
        }))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, dataset: &InMemoryDataset) -> Result<()> {
    let mut fields = Vec::new();
    let mut arrays: Vec<ArrayRef> = Vec::new();

    for (i, name) in dataset.columns.iter().enumerate() {
        let numeric = dataset.stats.iter().any(|s| s.column == *name && s.is_numeric());
        if numeric {
            // Text cells in a numeric column are stored as nulls.
            let values: Vec<Option<f64>> = dataset.rows.iter().map(|r| r[i].as_number()).collect();
            fields.push(Field::new(name, DataType::Float64, true));
            arrays.push(Arc::new(Float64Array::from(values)));
        } else {
            let values: Vec<Option<String>> = dataset
                .rows
                .iter()
                .map(|r| (!r[i].is_missing()).then(|| r[i].to_string()))
                .collect();
            fields.push(Field::new(name, DataType::Utf8, true));
            arrays.push(Arc::new(StringArray::from(values)));
        }
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;
    let file = File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir).context("creating output directory")?;

    let mut rng = SimpleRng::new(42);
    let columns = columns();
    let rows = generate_rows(&mut rng);
    let stats = profile(&columns, &rows);
    let split = split(&rows, &mut rng);

    let dataset = InMemoryDataset::new(columns, rows)
        .with_title("Customer sample")
        .with_stats(stats)
        .with_split(split);

    let bundle_path = out_dir.join("sample.json");
    std::fs::write(&bundle_path, serde_json::to_string_pretty(&dataset)?)
        .context("writing dataset bundle")?;

    let profile_path = out_dir.join("sample.profile.json");
    let sidecar = json!({
        "title": dataset.title,
        "stats": dataset.stats,
        "split": dataset.split,
    });
    std::fs::write(&profile_path, serde_json::to_string_pretty(&sidecar)?)
        .context("writing profile sidecar")?;

    write_csv(&out_dir.join("sample.csv"), &dataset)?;
    write_parquet(&out_dir.join("sample.parquet"), &dataset)?;

    println!(
        "Wrote {} rows x {} columns to {}",
        dataset.len(),
        dataset.columns.len(),
        out_dir.display()
    );
    Ok(())
}
