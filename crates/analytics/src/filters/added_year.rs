//! Filter on the year a title was added to the catalog.

use crate::traits::Filter;
use data_loader::Title;

/// Keeps titles added during one year.
///
/// Titles without a usable `date_added` never match.
pub struct AddedYearFilter {
    year: i32,
}

impl AddedYearFilter {
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

impl Filter for AddedYearFilter {
    fn name(&self) -> &str {
        "AddedYearFilter"
    }

    fn apply<'a>(&self, titles: Vec<&'a Title>) -> Vec<&'a Title> {
        titles
            .into_iter()
            .filter(|t| t.year_added() == Some(self.year))
            .collect()
    }
}
