/// Data layer: records, loading, normalisation, filtering and aggregation.
///
/// Architecture:
/// ```text
///   Cars Datasets 2025.csv (Latin-1)
///        │
///        ▼
///   ┌──────────┐   ┌───────────┐
///   │  loader   │──▶│ normalize │  "300-450 hp" → 450, "$52,000" → 52000
///   └──────────┘   └───────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ CarDataset │  Vec<CarRecord>, read-only
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSpec (companies, fuel types) → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  counts, histogram, top-N, group means → DashboardSummary
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
