//! Filter on release year.

use crate::traits::Filter;
use data_loader::Title;

/// Keeps titles released within an inclusive year range.
///
/// ## Algorithm
/// 1. A missing bound is open (`None..=2000` means "up to 2000")
/// 2. Keep titles with `from <= release_year <= to`
pub struct ReleaseYearRangeFilter {
    from: Option<u16>,
    to: Option<u16>,
}

impl ReleaseYearRangeFilter {
    pub fn new(from: Option<u16>, to: Option<u16>) -> Self {
        Self { from, to }
    }
}

impl Filter for ReleaseYearRangeFilter {
    fn name(&self) -> &str {
        "ReleaseYearRangeFilter"
    }

    fn apply<'a>(&self, titles: Vec<&'a Title>) -> Vec<&'a Title> {
        titles
            .into_iter()
            .filter(|t| {
                self.from.is_none_or(|from| t.release_year >= from)
                    && self.to.is_none_or(|to| t.release_year <= to)
            })
            .collect()
    }
}
