/// Data layer: record types, loading, caching, and querying.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Catalog (category derived per row)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache   │  one Arc<Catalog> per source path, never invalidated
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query   │  FilterSpec → stable subset → projected rows
///   └──────────┘
/// ```

pub mod cache;
pub mod category;
pub mod error;
pub mod loader;
pub mod model;
pub mod query;

pub use error::LoadError;
pub use model::{Catalog, TestRecord};
pub use query::{FilterSpec, query};
