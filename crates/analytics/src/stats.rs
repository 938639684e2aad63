//! Group-by statistics over catalog titles.
//!
//! Every function takes any iterator of `&Title`, so it works the same on
//! the whole catalog (`index.titles()`) and on the output of a
//! `FilterPipeline`.

use data_loader::{Column, ContentType, Title};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use crate::aggregator::{CategoricalSplitAggregator, TagCount};

/// Rank whole values by frequency
///
/// Sorted by count, highest first; equal counts keep first-seen order.
/// `limit` keeps only the first entries.
pub fn value_counts<K, I>(values: I, limit: Option<usize>) -> Vec<(K, usize)>
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = K>,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for value in values {
        match positions.get(&value) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some(limit) = limit {
        counts.truncate(limit);
    }
    counts
}

/// Movie and show tallies for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TypeCounts {
    pub movies: usize,
    pub tv_shows: usize,
}

impl TypeCounts {
    pub fn total(&self) -> usize {
        self.movies + self.tv_shows
    }

    pub fn get(&self, content_type: ContentType) -> usize {
        match content_type {
            ContentType::Movie => self.movies,
            ContentType::TvShow => self.tv_shows,
        }
    }

    fn add(&mut self, content_type: ContentType) {
        match content_type {
            ContentType::Movie => self.movies += 1,
            ContentType::TvShow => self.tv_shows += 1,
        }
    }
}

/// Number of titles added per year, ascending by year
///
/// Titles without a usable `date_added` are left out.
pub fn yearly_additions<'a, I>(titles: I) -> BTreeMap<i32, usize>
where
    I: IntoIterator<Item = &'a Title>,
{
    let mut by_year = BTreeMap::new();
    for year in titles.into_iter().filter_map(|t| t.year_added()) {
        *by_year.entry(year).or_insert(0) += 1;
    }
    by_year
}

/// Additions per year split by content type
pub fn yearly_additions_by_type<'a, I>(titles: I) -> BTreeMap<i32, TypeCounts>
where
    I: IntoIterator<Item = &'a Title>,
{
    let mut by_year: BTreeMap<i32, TypeCounts> = BTreeMap::new();
    for title in titles {
        if let Some(year) = title.year_added() {
            by_year.entry(year).or_default().add(title.content_type);
        }
    }
    by_year
}

/// Year in which the most titles of `content_type` were added
///
/// Ties go to the earliest year. `None` when no such title has a date.
pub fn peak_addition_year<'a, I>(titles: I, content_type: ContentType) -> Option<(i32, usize)>
where
    I: IntoIterator<Item = &'a Title>,
{
    let by_year = yearly_additions(titles.into_iter().filter(|t| t.content_type == content_type));

    let mut peak: Option<(i32, usize)> = None;
    for (year, count) in by_year {
        if peak.is_none_or(|(_, best)| count > best) {
            peak = Some((year, count));
        }
    }
    peak
}

/// Number of titles added per month, keyed `YYYY-MM`, ascending
pub fn monthly_additions<'a, I>(titles: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Title>,
{
    let mut by_month: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for month in titles.into_iter().filter_map(|t| t.month_added()) {
        *by_month.entry(month).or_insert(0) += 1;
    }
    by_month
        .into_iter()
        .map(|((year, month), count)| (format!("{:04}-{:02}", year, month), count))
        .collect()
}

/// Share of movies among the titles added each year, in `[0, 1]`
pub fn movie_share_by_year<'a, I>(titles: I) -> Vec<(i32, f64)>
where
    I: IntoIterator<Item = &'a Title>,
{
    yearly_additions_by_type(titles)
        .into_iter()
        .filter(|(_, counts)| counts.total() > 0)
        .map(|(year, counts)| (year, counts.movies as f64 / counts.total() as f64))
        .collect()
}

/// Title of `content_type` with the latest `date_added`
///
/// Ties go to the title that comes first.
pub fn most_recent<'a, I>(titles: I, content_type: ContentType) -> Option<&'a Title>
where
    I: IntoIterator<Item = &'a Title>,
{
    let mut latest: Option<&'a Title> = None;
    for title in titles.into_iter().filter(|t| t.content_type == content_type) {
        let Some(date) = title.date_added else {
            continue;
        };
        if latest.and_then(|l| l.date_added).is_none_or(|best| date > best) {
            latest = Some(title);
        }
    }
    latest
}

/// The `n` longest titles of `content_type`
///
/// Movies are ranked by minutes and shows by seasons. Titles without a
/// parsed duration are skipped. Equal durations keep catalog order.
pub fn longest<'a, I>(titles: I, content_type: ContentType, n: usize) -> Vec<&'a Title>
where
    I: IntoIterator<Item = &'a Title>,
{
    let mut ranked: Vec<(&'a Title, u32)> = titles
        .into_iter()
        .filter(|t| t.content_type == content_type)
        .filter_map(|t| t.duration.map(|d| (t, d.value())))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(n).map(|(t, _)| t).collect()
}

/// Duration values (minutes or seasons) of every title of `content_type`
pub fn duration_values<'a, I>(titles: I, content_type: ContentType) -> Vec<u32>
where
    I: IntoIterator<Item = &'a Title>,
{
    titles
        .into_iter()
        .filter(|t| t.content_type == content_type)
        .filter_map(|t| t.duration.map(|d| d.value()))
        .collect()
}

/// Missing cells of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingColumn {
    pub column: Column,
    pub missing: usize,
    /// Percentage of all rows, `0.0` for an empty catalog
    pub percent: f64,
}

/// Missing-value table over all columns, most incomplete first
pub fn missing_summary(titles: &[Title]) -> Vec<MissingColumn> {
    let rows = titles.len();
    let mut summary: Vec<MissingColumn> = Column::ALL
        .iter()
        .map(|&column| {
            let missing = titles.iter().filter(|t| t.is_missing(column)).count();
            let percent = if rows == 0 {
                0.0
            } else {
                100.0 * missing as f64 / rows as f64
            };
            MissingColumn {
                column,
                missing,
                percent,
            }
        })
        .collect();

    summary.sort_by(|a, b| b.percent.total_cmp(&a.percent));
    summary
}

/// Distinct values of the categorical columns
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UniqueValues {
    /// In order of first appearance
    pub content_types: Vec<ContentType>,
    /// In order of first appearance, missing ratings dropped
    pub ratings: Vec<String>,
    pub release_years: Vec<u16>,
    /// Distinct raw `country` cells (a multi-country cell counts as one value)
    pub distinct_country_cells: usize,
    pub genres: BTreeSet<String>,
}

pub fn unique_values<'a, I>(titles: I) -> UniqueValues
where
    I: IntoIterator<Item = &'a Title>,
{
    let mut unique = UniqueValues::default();
    let mut years = BTreeSet::new();
    let mut countries = BTreeSet::new();
    let aggregator = CategoricalSplitAggregator::new();

    for title in titles {
        if !unique.content_types.contains(&title.content_type) {
            unique.content_types.push(title.content_type);
        }
        if let Some(rating) = &title.rating {
            if !unique.ratings.contains(rating) {
                unique.ratings.push(rating.clone());
            }
        }
        if let Some(country) = &title.country {
            countries.insert(country.as_str());
        }
        years.insert(title.release_year);
        unique.genres.extend(
            aggregator
                .split(&title.listed_in)
                .filter(|g| !g.is_empty())
                .map(str::to_string),
        );
    }

    unique.release_years = years.into_iter().collect();
    unique.distinct_country_cells = countries.len();
    unique
}

/// Directors credited on more than one title, most prolific first
pub fn prolific_directors<'a, I>(titles: I, limit: Option<usize>) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a Title>,
{
    let mut ranking = CategoricalSplitAggregator::new().aggregate_column(titles, Column::Director, None);
    ranking.retain(|t| t.count > 1 && !t.tag.is_empty());
    if let Some(limit) = limit {
        ranking.truncate(limit);
    }
    ranking
}
