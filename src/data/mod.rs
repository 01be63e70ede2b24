/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///     13100768.csv
///          │
///          ▼
///    ┌──────────┐
///    │  loader   │  strip BOM, parse CSV → MortalityTable
///    └──────────┘
///          │
///          ▼
///    ┌───────────────┐
///    │ MortalityTable │  headers + typed rows, column index
///    └───────────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  filter   │  location/age/sex predicates → indices + Series
///    └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
