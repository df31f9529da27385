/// Data layer: core types, loading, lookup and derived chart inputs.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table  (or LoadError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  lookup   │  company == query → Selection
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ insights  │  top-N by revenue / profit, profit histogram
///   └──────────┘
/// ```

pub mod insights;
pub mod loader;
pub mod lookup;
pub mod model;

#[cfg(test)]
pub(crate) mod fixtures;
