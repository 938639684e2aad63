//! Core domain types for the video catalog.
//!
//! One `Title` per CSV row. Multi-valued columns (director, cast, country,
//! listed_in) are kept as the raw delimited text; splitting them into tags
//! is the job of the analytics crate.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::DataLoadError;

// =============================================================================
// Title-related Types
// =============================================================================

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentType {
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Movie, ContentType::TvShow];

    /// Label used in the source file
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Movie" => Ok(ContentType::Movie),
            "TV Show" => Ok(ContentType::TvShow),
            other => Err(DataLoadError::InvalidValue {
                field: "type".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Running time of a title
///
/// Movies are measured in minutes ("90 min"), shows in seasons
/// ("1 Season", "3 Seasons").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Duration {
    Minutes(u32),
    Seasons(u32),
}

impl Duration {
    /// Parse the duration text of the source file
    ///
    /// Anything that is not a number followed by a known unit yields `None`.
    pub fn parse(s: &str) -> Option<Duration> {
        let s = s.trim();
        let digits_end = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let value: u32 = s[..digits_end].parse().ok()?;
        match s[digits_end..].trim() {
            "min" | "mins" => Some(Duration::Minutes(value)),
            "Season" | "Seasons" => Some(Duration::Seasons(value)),
            _ => None,
        }
    }

    /// Numeric part, whatever the unit
    pub fn value(&self) -> u32 {
        match *self {
            Duration::Minutes(v) | Duration::Seasons(v) => v,
        }
    }

    pub fn minutes(&self) -> Option<u32> {
        match *self {
            Duration::Minutes(v) => Some(v),
            Duration::Seasons(_) => None,
        }
    }

    pub fn seasons(&self) -> Option<u32> {
        match *self {
            Duration::Seasons(v) => Some(v),
            Duration::Minutes(_) => None,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Duration::Minutes(v) => write!(f, "{} min", v),
            Duration::Seasons(1) => write!(f, "1 Season"),
            Duration::Seasons(v) => write!(f, "{} Seasons", v),
        }
    }
}

/// Columns of the catalog file, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    ShowId,
    Type,
    Title,
    Director,
    Cast,
    Country,
    DateAdded,
    ReleaseYear,
    Rating,
    Duration,
    ListedIn,
    Description,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::ShowId,
        Column::Type,
        Column::Title,
        Column::Director,
        Column::Cast,
        Column::Country,
        Column::DateAdded,
        Column::ReleaseYear,
        Column::Rating,
        Column::Duration,
        Column::ListedIn,
        Column::Description,
    ];

    /// Header name in the CSV file
    pub fn name(&self) -> &'static str {
        match self {
            Column::ShowId => "show_id",
            Column::Type => "type",
            Column::Title => "title",
            Column::Director => "director",
            Column::Cast => "cast",
            Column::Country => "country",
            Column::DateAdded => "date_added",
            Column::ReleaseYear => "release_year",
            Column::Rating => "rating",
            Column::Duration => "duration",
            Column::ListedIn => "listed_in",
            Column::Description => "description",
        }
    }

    /// Whether a cell may hold several comma-separated tags
    pub fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            Column::Director | Column::Cast | Column::Country | Column::ListedIn
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub show_id: Option<String>,
    pub content_type: ContentType,
    pub title: String,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    /// `None` when the cell is empty or not a "Month day, year" date
    pub date_added: Option<NaiveDate>,
    /// Cell text as read, kept so missing and malformed dates can be told apart
    pub date_added_raw: Option<String>,
    pub release_year: u16,
    pub rating: Option<String>,
    pub duration: Option<Duration>,
    pub duration_raw: Option<String>,
    /// Comma-separated genres
    pub listed_in: String,
    pub description: Option<String>,
}

impl Title {
    /// Minimal title, mostly useful for building fixtures
    pub fn new(content_type: ContentType, title: impl Into<String>, release_year: u16) -> Self {
        Self {
            show_id: None,
            content_type,
            title: title.into(),
            director: None,
            cast: None,
            country: None,
            date_added: None,
            date_added_raw: None,
            release_year,
            rating: None,
            duration: None,
            duration_raw: None,
            listed_in: String::new(),
            description: None,
        }
    }

    pub fn year_added(&self) -> Option<i32> {
        self.date_added.map(|d| d.year())
    }

    /// `(year, month)` of the date added
    pub fn month_added(&self) -> Option<(i32, u32)> {
        self.date_added.map(|d| (d.year(), d.month()))
    }

    /// Text of a column as stored in the file, `None` when the cell is empty
    ///
    /// `release_year` is numeric and has no borrowed text; use
    /// [`Title::is_missing`] to test it.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::ShowId => self.show_id.as_deref(),
            Column::Type => Some(self.content_type.as_str()),
            Column::Title => Some(self.title.as_str()),
            Column::Director => self.director.as_deref(),
            Column::Cast => self.cast.as_deref(),
            Column::Country => self.country.as_deref(),
            Column::DateAdded => self.date_added_raw.as_deref(),
            Column::ReleaseYear => None,
            Column::Rating => self.rating.as_deref(),
            Column::Duration => self.duration_raw.as_deref(),
            Column::ListedIn => Some(self.listed_in.as_str()).filter(|s| !s.is_empty()),
            Column::Description => self.description.as_deref(),
        }
    }

    /// Whether the cell for `column` was empty in the file
    pub fn is_missing(&self, column: Column) -> bool {
        match column {
            Column::ReleaseYear => false,
            other => self.text(other).is_none(),
        }
    }
}

/// Scalar counts shown at the top of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogCounts {
    pub total: usize,
    pub movies: usize,
    pub tv_shows: usize,
}

// =============================================================================
// CatalogIndex - The In-Memory Dataset
// =============================================================================

/// All titles in file order plus lookup indices.
///
/// Built once at start-up and then only read. Indices store positions into
/// `titles`, so every lookup hands out borrowed `&Title`s.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    pub(crate) titles: Vec<Title>,

    /// Positions grouped by content type
    pub(crate) type_index: HashMap<ContentType, Vec<usize>>,
    /// Positions grouped by year added (titles without a date are left out)
    pub(crate) year_added_index: BTreeMap<i32, Vec<usize>>,
    /// Positions grouped by release year
    pub(crate) release_year_index: BTreeMap<u16, Vec<usize>>,
}

impl CatalogIndex {
    /// Creates a new, empty CatalogIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from already parsed titles, keeping their order
    pub fn from_titles(titles: impl IntoIterator<Item = Title>) -> Self {
        let mut index = Self::new();
        for title in titles {
            index.insert_title(title);
        }
        index
    }

    /// Append a title and update every index
    pub fn insert_title(&mut self, title: Title) {
        let pos = self.titles.len();

        self.type_index
            .entry(title.content_type)
            .or_default()
            .push(pos);

        if let Some(year) = title.year_added() {
            self.year_added_index.entry(year).or_default().push(pos);
        }

        self.release_year_index
            .entry(title.release_year)
            .or_default()
            .push(pos);

        self.titles.push(title);
    }

    /// Every title, in file order
    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn get_title(&self, pos: usize) -> Option<&Title> {
        self.titles.get(pos)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Titles of one content type, in file order
    pub fn titles_of_type(&self, content_type: ContentType) -> impl Iterator<Item = &Title> + '_ {
        self.positions(self.type_index.get(&content_type))
    }

    /// Titles added to the catalog during `year`
    pub fn titles_added_in(&self, year: i32) -> impl Iterator<Item = &Title> + '_ {
        self.positions(self.year_added_index.get(&year))
    }

    /// Titles released during `year`
    pub fn titles_released_in(&self, year: u16) -> impl Iterator<Item = &Title> + '_ {
        self.positions(self.release_year_index.get(&year))
    }

    /// Years in which at least one title was added, ascending
    pub fn years_added(&self) -> impl Iterator<Item = i32> + '_ {
        self.year_added_index.keys().copied()
    }

    /// Release years present in the catalog, ascending
    pub fn release_years(&self) -> impl Iterator<Item = u16> + '_ {
        self.release_year_index.keys().copied()
    }

    /// First title whose name matches exactly
    pub fn find_by_title(&self, name: &str) -> Option<&Title> {
        self.titles.iter().find(|t| t.title == name)
    }

    /// Case-insensitive substring search over title names
    pub fn search_titles(&self, query: &str) -> Vec<&Title> {
        let query = query.to_lowercase();
        self.titles
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&query))
            .collect()
    }

    /// Total, movie and show counts
    pub fn counts(&self) -> CatalogCounts {
        let count = |ct: ContentType| self.type_index.get(&ct).map(|v| v.len()).unwrap_or(0);
        CatalogCounts {
            total: self.titles.len(),
            movies: count(ContentType::Movie),
            tv_shows: count(ContentType::TvShow),
        }
    }

    fn positions<'a>(&'a self, positions: Option<&'a Vec<usize>>) -> impl Iterator<Item = &'a Title> + 'a {
        positions
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&pos| self.titles.get(pos))
    }
}
