/// Data layer: cell model, provider contract, and loading.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet (+ .profile.json)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → InMemoryDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ DatasetProvider  │  columns, stats, preview(n), split_preview(n)
///   └─────────────────┘
///        │
///        ▼
///   ExplorationContext (crate::context)
/// ```

pub mod loader;
pub mod model;
pub mod provider;
