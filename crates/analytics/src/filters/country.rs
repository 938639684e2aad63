//! Filter on the production country.
//!
//! Matches a substring of the raw `country` cell, so a title produced in
//! "France, Belgium" is kept by a filter for "France".

use crate::traits::Filter;
use data_loader::Title;

/// Keeps titles whose country cell contains a given name.
///
/// Matching ignores case. Titles without a country are dropped.
pub struct CountryFilter {
    needle: String,
}

impl CountryFilter {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            needle: country.into().to_lowercase(),
        }
    }
}

impl Filter for CountryFilter {
    fn name(&self) -> &str {
        "CountryFilter"
    }

    fn apply<'a>(&self, titles: Vec<&'a Title>) -> Vec<&'a Title> {
        titles
            .into_iter()
            .filter(|t| {
                t.country
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&self.needle))
            })
            .collect()
    }
}
