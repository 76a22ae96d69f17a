/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///    samples.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse document, normalize ids → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  names, metadata records, measurement records
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
