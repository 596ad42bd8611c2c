/// Data layer: launch records, loading, and row filters.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, sites, payload bounds
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + payload predicates → matching records
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
