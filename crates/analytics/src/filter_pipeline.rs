//! Narrowing a set of titles with a chain of filters.
//!
//! Reports take their optional `--type`, `--country` and year flags and
//! turn each one into a filter; the pipeline runs them in order.

use crate::traits::Filter;
use data_loader::Title;

/// Ordered chain of title filters.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(ContentTypeFilter::new(ContentType::Movie))
///     .add_filter(CountryFilter::new("France"));
///
/// let french_movies = pipeline.apply_all(index.titles());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Pipeline that keeps every title
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a filter
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Add a filter only when one is given; handy for optional CLI flags
    pub fn add_optional(self, filter: Option<impl Filter + 'static>) -> Self {
        match filter {
            Some(filter) => self.add_filter(filter),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter in the order it was added
    pub fn apply<'a>(&self, titles: Vec<&'a Title>) -> Vec<&'a Title> {
        let mut current = titles;
        for filter in &self.filters {
            tracing::debug!(
                "Filter {}: {} titles in",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter {}: {} titles kept",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Collect the titles and apply all filters
    pub fn apply_all<'a, I>(&self, titles: I) -> Vec<&'a Title>
    where
        I: IntoIterator<Item = &'a Title>,
    {
        self.apply(titles.into_iter().collect())
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
