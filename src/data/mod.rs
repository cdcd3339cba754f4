/// Data layer: row types, loading, and validation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ RawTable  │  Vec<RawRow>, column order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate  │  required fields present → InputRow
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod validate;
