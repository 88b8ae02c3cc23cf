#![allow(dead_code)]

use std::sync::Arc;

use panda_explorer::{
    CellValue, ColumnKind, ColumnStats, ExplorationContext, ExplorerConfig, ExplorerHandlers,
    InMemoryDataset, Row,
};

pub fn stat(column: &str, kind: ColumnKind, count: u64, missing: u64) -> ColumnStats {
    ColumnStats {
        column: column.to_string(),
        kind,
        count,
        missing,
        unique: count,
        min: None,
        max: None,
        mean: None,
        std: None,
    }
}

/// Two-column preview `x`, `y` with the rows used throughout the tests:
/// `[[1, "a"], [2, null], ["z", 3]]`.
pub fn mixed_rows() -> Vec<Row> {
    use CellValue::{Missing, Number, Text};
    vec![
        vec![Number(1.0), Text("a".into())],
        vec![Number(2.0), Missing],
        vec![Text("z".into()), Number(3.0)],
    ]
}

pub fn xy_dataset(rows: Vec<Row>) -> InMemoryDataset {
    InMemoryDataset::new(vec!["x".into(), "y".into()], rows)
        .with_title("xy")
        .with_stats(vec![
            stat("x", ColumnKind::Numeric, 2, 1),
            stat("y", ColumnKind::Numeric, 1, 2),
        ])
}

pub fn explore(dataset: InMemoryDataset) -> ExplorationContext {
    ExplorationContext::new(
        Arc::new(dataset),
        &ExplorerConfig::default(),
        ExplorerHandlers::default(),
    )
}
