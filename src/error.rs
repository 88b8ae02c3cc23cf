use thiserror::Error;

/// Errors raised by the explorer library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    /// Exploration state was read before any context was established.
    #[error("no exploration context is established; mount the explorer only once a dataset is loaded")]
    ContextMissing,

    #[error("unsupported dataset format: .{0}")]
    UnsupportedFormat(String),

    /// `partition` is `rows` for the main table, otherwise the split
    /// partition name; `row` counts from zero within it.
    #[error("{partition} row {row} has {found} cells but the dataset has {expected} columns")]
    RowShape {
        partition: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },
}
