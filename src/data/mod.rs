/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<LaunchRecord>, payload min/max, site list
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + open payload interval → borrowed rows
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  slice counts / scatter points
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
