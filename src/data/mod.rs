/// Data layer: core types, loading, classification, filtering, aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawListing>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  text cells → Option<f64> / Option<NaiveDate>
///   └───────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ListingDataset │  allow-listed Vec<Listing> + season (via `season`)
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  country / suburb / season predicates → indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  mean per month, mean per season
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod season;
