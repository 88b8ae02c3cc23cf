use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a preview row
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. Rows mix numbers, text and gaps freely;
/// consumers pattern-match on the tag instead of probing types at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// The numeric value of the cell, if it is a finite number.
    ///
    /// `NaN` and infinities are treated like any other non-numeric cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Interpret a raw text field (CSV cell, etc.).
    ///
    /// Blank fields become `Missing`, anything that parses as a finite `f64`
    /// becomes `Number`, the rest stays `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl From<JsonValue> for CellValue {
    fn from(val: JsonValue) -> Self {
        match val {
            JsonValue::Number(n) => match n.as_f64() {
                Some(v) => CellValue::Number(v),
                None => CellValue::Text(n.to_string()),
            },
            JsonValue::String(s) => CellValue::Text(s),
            JsonValue::Null => CellValue::Missing,
            JsonValue::Bool(b) => CellValue::Text(b.to_string()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<CellValue> for JsonValue {
    fn from(val: CellValue) -> Self {
        match val {
            CellValue::Number(v) => serde_json::Number::from_f64(v)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            CellValue::Text(s) => JsonValue::String(s),
            CellValue::Missing => JsonValue::Null,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            CellValue::Number(v) => write!(f, "{v:.4}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "<null>"),
        }
    }
}

/// One row of cells, positionally aligned to a column sequence.
pub type Row = Vec<CellValue>;

// ---------------------------------------------------------------------------
// Preview – bounded row sample
// ---------------------------------------------------------------------------

/// A bounded sample of the dataset: ordered columns plus aligned rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Preview {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Position of `name` in the column sequence.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows in the sample.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SplitPreview – training / validation / testing samples
// ---------------------------------------------------------------------------

/// Which partition of a split preview a row sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitPartition {
    Training,
    Validation,
    Testing,
}

impl SplitPartition {
    pub const ALL: [SplitPartition; 3] = [
        SplitPartition::Training,
        SplitPartition::Validation,
        SplitPartition::Testing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SplitPartition::Training => "Training",
            SplitPartition::Validation => "Validation",
            SplitPartition::Testing => "Testing",
        }
    }
}

/// Three externally prepared row samples sharing one column sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitPreview {
    pub columns: Vec<String>,
    pub training: Vec<Row>,
    pub validation: Vec<Row>,
    pub testing: Vec<Row>,
}

impl SplitPreview {
    pub fn rows(&self, partition: SplitPartition) -> &[Row] {
        match partition {
            SplitPartition::Training => &self.training,
            SplitPartition::Validation => &self.validation,
            SplitPartition::Testing => &self.testing,
        }
    }

    /// Copy of this split with every partition cut to at most `max_rows`.
    pub fn truncated(&self, max_rows: usize) -> Self {
        let cut = |rows: &[Row]| rows.iter().take(max_rows).cloned().collect::<Vec<_>>();
        Self {
            columns: self.columns.clone(),
            training: cut(&self.training),
            validation: cut(&self.validation),
            testing: cut(&self.testing),
        }
    }
}

// ---------------------------------------------------------------------------
// Column statistics
// ---------------------------------------------------------------------------

/// Declared type of a profiled column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Other(String),
}

impl From<String> for ColumnKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "numeric" => ColumnKind::Numeric,
            "categorical" => ColumnKind::Categorical,
            _ => ColumnKind::Other(tag),
        }
    }
}

impl From<ColumnKind> for String {
    fn from(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Numeric => "numeric".to_string(),
            ColumnKind::Categorical => "categorical".to_string(),
            ColumnKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
            ColumnKind::Other(tag) => write!(f, "{tag}"),
        }
    }
}

/// Precomputed profile of one column, as supplied by the dataset provider.
///
/// `count` is the number of non-missing values; the numeric moments are only
/// present for numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub column: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    pub count: u64,
    pub missing: u64,
    pub unique: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
}

impl ColumnStats {
    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }
}

/// Names of the numeric columns, in statistics-table order.
pub fn numeric_columns(stats: &[ColumnStats]) -> Vec<String> {
    stats
        .iter()
        .filter(|s| s.is_numeric())
        .map(|s| s.column.clone())
        .collect()
}
