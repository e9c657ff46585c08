/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   Dataset     │  Vec<LaunchRecord>, site enumeration, bounds
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (selection, range) → aggregate / scatter projections
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
