/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///   data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate header, parse rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, never empty, immutable after load
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
