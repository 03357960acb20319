/// Data layer: core types, upload decoding, and the dataset slot.
///
/// Architecture:
/// ```text
///  data URI  (<mime>;base64,<payload>)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  base64 → UTF-8 → CSV → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  one Arc<Dataset>, replaced per upload
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  typed columns, numeric views, preview
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod store;
