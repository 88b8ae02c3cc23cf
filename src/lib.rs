//! Interactive exploration of tabular datasets.
//!
//! The library holds the rendering-independent core: column selection,
//! memoised previews, chart projection, and the [`ExplorationContext`] that
//! composes them. The `panda-explorer` binary renders it with egui.

pub mod cache;
pub mod chart;
pub mod color;
pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod selection;
pub mod summary;

pub use cache::{DatasetVersion, PreviewCache};
pub use chart::{ChartProjector, HistogramBin, ScatterPoint};
pub use config::ExplorerConfig;
pub use context::{Action, ExplorationContext, ExplorerHandlers, ExplorerSlot};
pub use data::model::{CellValue, ColumnKind, ColumnStats, Preview, Row, SplitPartition, SplitPreview};
pub use data::provider::{DatasetProvider, InMemoryDataset, SplitPartitions};
pub use error::ExplorerError;
pub use selection::{HeaderKey, HeaderKeyEvent, SelectModifiers, SelectionModel};
pub use summary::DatasetSummary;
