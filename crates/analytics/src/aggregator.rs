//! Frequency ranking over multi-valued categorical columns.
//!
//! Several catalog columns pack more than one value into a cell:
//! `"United States, France"` is two countries, `"Dramas, Comedies"` two
//! genres. The aggregator splits such cells into tags and counts each tag
//! on its own.
//!
//! ## Rules
//! - Missing cells are dropped.
//! - Every cell is split on the delimiter and each piece is trimmed. A cell
//!   without the delimiter is one tag (also trimmed).
//! - A piece that is empty after trimming still counts, as the tag `""`.
//!   Callers filter it out if they don't want it.
//! - Output is sorted by count, highest first. Equal counts keep the order
//!   in which the tags were first seen, so the result is deterministic.

use data_loader::{Column, Title};
use serde::Serialize;

use crate::stats::value_counts;

/// Delimiter used by every multi-valued column of the catalog file
pub const DEFAULT_DELIMITER: char = ',';

/// One row of a frequency ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

impl TagCount {
    pub fn new(tag: impl Into<String>, count: usize) -> Self {
        Self {
            tag: tag.into(),
            count,
        }
    }
}

/// Split one cell into trimmed tags
///
/// Example: `"  Drama ,  Comedy  "` -> `["Drama", "Comedy"]`
pub fn split_tags(cell: &str, delimiter: char) -> impl Iterator<Item = &str> {
    cell.split(delimiter).map(str::trim)
}

/// Counts individual tags across a column of delimited cells.
///
/// Stateless apart from the delimiter; one instance can be reused for any
/// number of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalSplitAggregator {
    delimiter: char,
}

impl CategoricalSplitAggregator {
    /// Aggregator splitting on a comma
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Split one cell into trimmed tags
    pub fn split<'a>(&self, cell: &'a str) -> impl Iterator<Item = &'a str> {
        split_tags(cell, self.delimiter)
    }

    /// Rank tags by frequency
    ///
    /// # Arguments
    /// * `cells` - Cell values; `None` marks a missing cell
    /// * `limit` - Keep only the first `limit` entries of the ranking
    pub fn aggregate<'a, I>(&self, cells: I, limit: Option<usize>) -> Vec<TagCount>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let delimiter = self.delimiter;
        let tags = cells
            .into_iter()
            .flatten()
            .flat_map(move |cell| split_tags(cell, delimiter));

        value_counts(tags, limit)
            .into_iter()
            .map(|(tag, count)| TagCount::new(tag, count))
            .collect()
    }

    /// Rank the tags of one column over a set of titles
    pub fn aggregate_column<'a, I>(&self, titles: I, column: Column, limit: Option<usize>) -> Vec<TagCount>
    where
        I: IntoIterator<Item = &'a Title>,
    {
        self.aggregate(titles.into_iter().map(|t| t.text(column)), limit)
    }
}

impl Default for CategoricalSplitAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_of(ranking: &[TagCount]) -> Vec<(&str, usize)> {
        ranking.iter().map(|t| (t.tag.as_str(), t.count)).collect()
    }

    #[test]
    fn test_countries_example() {
        let cells = vec![Some("USA, France"), Some("India"), None, Some("France")];
        let aggregator = CategoricalSplitAggregator::new();

        let all = aggregator.aggregate(cells.clone(), None);
        assert_eq!(counts_of(&all), vec![("France", 2), ("USA", 1), ("India", 1)]);

        let top2 = aggregator.aggregate(cells, Some(2));
        assert_eq!(counts_of(&top2), vec![("France", 2), ("USA", 1)]);
    }

    #[test]
    fn test_split_trims_whitespace() {
        let tags: Vec<&str> = split_tags("  Drama ,  Comedy  ", ',').collect();
        assert_eq!(tags, vec!["Drama", "Comedy"]);
    }

    #[test]
    fn test_single_value_cell_is_trimmed() {
        let aggregator = CategoricalSplitAggregator::new();
        let ranking = aggregator.aggregate(vec![Some(" India "), Some("India")], None);
        assert_eq!(counts_of(&ranking), vec![("India", 2)]);
    }

    #[test]
    fn test_empty_input() {
        let aggregator = CategoricalSplitAggregator::new();
        let empty: Vec<Option<&str>> = Vec::new();

        assert!(aggregator.aggregate(empty.clone(), None).is_empty());
        assert!(aggregator.aggregate(empty, Some(10)).is_empty());
    }

    #[test]
    fn test_all_missing() {
        let aggregator = CategoricalSplitAggregator::new();
        assert!(aggregator.aggregate(vec![None, None], Some(3)).is_empty());
    }

    #[test]
    fn test_empty_tags_are_counted() {
        let aggregator = CategoricalSplitAggregator::new();
        let ranking = aggregator.aggregate(vec![Some("Drama,"), Some("   ")], None);
        assert_eq!(counts_of(&ranking), vec![("", 2), ("Drama", 1)]);
    }

    #[test]
    fn test_limit_larger_than_distinct_tags() {
        let aggregator = CategoricalSplitAggregator::new();
        let ranking = aggregator.aggregate(vec![Some("A, B"), Some("B")], Some(10));
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn test_custom_delimiter() {
        let aggregator = CategoricalSplitAggregator::with_delimiter('|');
        let ranking = aggregator.aggregate(vec![Some("Action|Adventure"), Some("Action")], None);
        assert_eq!(counts_of(&ranking), vec![("Action", 2), ("Adventure", 1)]);
    }

    #[test]
    fn test_aggregate_column() {
        use data_loader::ContentType;

        let mut a = Title::new(ContentType::Movie, "A", 2020);
        a.listed_in = "Dramas, International Movies".to_string();
        let mut b = Title::new(ContentType::Movie, "B", 2021);
        b.listed_in = "Dramas".to_string();

        let aggregator = CategoricalSplitAggregator::new();
        let ranking = aggregator.aggregate_column(&[a, b], Column::ListedIn, Some(1));
        assert_eq!(ranking, vec![TagCount::new("Dramas", 2)]);
    }
}
