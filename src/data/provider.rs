use serde::{Deserialize, Serialize};

use super::model::{ColumnStats, Preview, Row, SplitPreview};
use crate::error::ExplorerError;

// ---------------------------------------------------------------------------
// Provider contract
// ---------------------------------------------------------------------------

/// Source of a dataset for the exploration surface.
///
/// Accessors are synchronous and are expected to be pure for a given provider
/// instance: the explorer calls `preview` / `split_preview` once per loaded
/// dataset and keeps the result.
pub trait DatasetProvider {
    /// Human readable dataset name.
    fn title(&self) -> &str;

    /// Ordered, unique column names.
    fn columns(&self) -> &[String];

    /// One profile record per profiled column.
    fn stats(&self) -> &[ColumnStats];

    /// At most `max_rows` rows, each aligned to the returned column sequence.
    fn preview(&self, max_rows: usize) -> Preview;

    /// Optional training / validation / testing sample of up to `max_rows`
    /// rows per partition.
    fn split_preview(&self, _max_rows: usize) -> Option<SplitPreview> {
        None
    }
}

// ---------------------------------------------------------------------------
// InMemoryDataset – fully materialised provider
// ---------------------------------------------------------------------------

/// A dataset held entirely in memory, as produced by the loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryDataset {
    #[serde(default)]
    pub title: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub stats: Vec<ColumnStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitPartitions>,
}

/// Split rows as stored on disk; the column sequence is the dataset's own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitPartitions {
    #[serde(default)]
    pub training: Vec<Row>,
    #[serde(default)]
    pub validation: Vec<Row>,
    #[serde(default)]
    pub testing: Vec<Row>,
}

impl InMemoryDataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_stats(mut self, stats: Vec<ColumnStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_split(mut self, split: SplitPartitions) -> Self {
        self.split = Some(split);
        self
    }

    /// Number of materialised rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check that every row (split rows included) matches the column count.
    pub fn validate_shape(&self) -> Result<(), ExplorerError> {
        let expected = self.columns.len();
        let mut parts: Vec<(&'static str, &[Row])> = vec![("rows", self.rows.as_slice())];
        if let Some(split) = &self.split {
            parts.push(("training", split.training.as_slice()));
            parts.push(("validation", split.validation.as_slice()));
            parts.push(("testing", split.testing.as_slice()));
        }

        for (partition, rows) in parts {
            if let Some((row, cells)) = rows
                .iter()
                .enumerate()
                .find(|(_, cells)| cells.len() != expected)
            {
                return Err(ExplorerError::RowShape {
                    partition,
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(())
    }
}

impl DatasetProvider for InMemoryDataset {
    fn title(&self) -> &str {
        &self.title
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn stats(&self) -> &[ColumnStats] {
        &self.stats
    }

    fn preview(&self, max_rows: usize) -> Preview {
        Preview::new(
            self.columns.clone(),
            self.rows.iter().take(max_rows).cloned().collect(),
        )
    }

    fn split_preview(&self, max_rows: usize) -> Option<SplitPreview> {
        self.split.as_ref().map(|s| {
            SplitPreview {
                columns: self.columns.clone(),
                training: s.training.clone(),
                validation: s.validation.clone(),
                testing: s.testing.clone(),
            }
            .truncated(max_rows)
        })
    }
}
