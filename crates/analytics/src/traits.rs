//! Core trait for the title filtering pipeline.
//!
//! Filters narrow a set of titles before statistics are computed, e.g.
//! "only movies" or "only titles produced in France".

use data_loader::Title;

/// Core trait for filtering titles.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// Filters borrow titles from the `CatalogIndex`; they never clone or
/// mutate them. A filter holds nothing but its own parameters, so it is
/// `Send + Sync` and a built `FilterPipeline` is too.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep the titles this filter accepts, in input order
    fn apply<'a>(&self, titles: Vec<&'a Title>) -> Vec<&'a Title>;
}
