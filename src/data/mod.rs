/// Data layer: index types and loading.
///
/// Architecture:
/// ```text
///  index.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Index
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ ClusterSizeSample │  one size per cluster, never empty
///   └───────────────────┘
/// ```

pub mod loader;
pub mod model;
