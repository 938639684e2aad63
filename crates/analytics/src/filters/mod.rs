//! Filter implementations for the title pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod added_year;
pub mod content_type;
pub mod country;
pub mod release_year;

// Re-export for convenience
pub use added_year::AddedYearFilter;
pub use content_type::ContentTypeFilter;
pub use country::CountryFilter;
pub use release_year::ReleaseYearRangeFilter;
