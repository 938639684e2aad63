//! Statistics and chart building over the video catalog.
//!
//! This crate provides:
//! - `CategoricalSplitAggregator`, the frequency ranking over multi-valued
//!   columns (countries, genres, directors, cast)
//! - Group-by statistics over single-valued columns and dates
//! - Filter trait and implementations, composed with `FilterPipeline`
//! - `Figure` builders producing Plotly JSON
//!
//! ## Example Usage
//! ```ignore
//! use analytics::{CategoricalSplitAggregator, FilterPipeline};
//! use analytics::filters::CountryFilter;
//! use data_loader::Column;
//!
//! let french = FilterPipeline::new()
//!     .add_filter(CountryFilter::new("France"))
//!     .apply_all(index.titles());
//!
//! let top_directors = CategoricalSplitAggregator::new()
//!     .aggregate_column(french, Column::Director, Some(10));
//! ```

pub mod aggregator;
pub mod charts;
pub mod filter_pipeline;
pub mod filters;
pub mod stats;
pub mod traits;

// Re-export main types
pub use aggregator::{split_tags, CategoricalSplitAggregator, TagCount, DEFAULT_DELIMITER};
pub use charts::{AxisLabels, Figure, Orientation, PRIMARY_COLOR, SECONDARY_COLOR};
pub use filter_pipeline::FilterPipeline;
pub use stats::{MissingColumn, TypeCounts, UniqueValues};
pub use traits::Filter;
