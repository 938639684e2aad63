//! # Data Loader Crate
//!
//! This crate loads a video-catalog CSV file (one row per movie or TV show)
//! into an immutable in-memory index.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Title, ContentType, Duration, Column, CatalogIndex)
//! - **parser**: Parse CSV rows into Rust structs
//! - **index**: Load a file and build the lookup indices
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{CatalogIndex, ContentType};
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_file(Path::new("data/netflix_titles.csv"))?;
//!
//! let counts = index.counts();
//! println!("{} titles, {} movies", counts.total, counts.movies);
//!
//! for show in index.titles_of_type(ContentType::TvShow).take(5) {
//!     println!("{}", show.title);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{parse_date_added, parse_titles, DATE_ADDED_FORMAT};
pub use types::{
    CatalogCounts,
    CatalogIndex,
    Column,
    ContentType,
    Duration,
    Title,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_index_creation() {
        let index = CatalogIndex::new();
        let counts = index.counts();

        assert_eq!(counts.total, 0);
        assert_eq!(counts.movies, 0);
        assert_eq!(counts.tv_shows, 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_insert_title() {
        let mut index = CatalogIndex::new();

        let mut title = Title::new(ContentType::Movie, "Catch Me If You Can", 2002);
        title.director = Some("Steven Spielberg".to_string());
        title.duration = Some(Duration::Minutes(141));

        index.insert_title(title);

        let retrieved = index.get_title(0).unwrap();
        assert_eq!(retrieved.title, "Catch Me If You Can");
        assert_eq!(retrieved.duration.and_then(|d| d.minutes()), Some(141));
        assert_eq!(index.counts().movies, 1);
    }

    #[test]
    fn test_empty_queries() {
        let index = CatalogIndex::new();

        assert!(index.get_title(0).is_none());
        assert!(index.find_by_title("Anything").is_none());
        assert!(index.search_titles("any").is_empty());
        assert_eq!(index.titles_of_type(ContentType::Movie).count(), 0);
        assert_eq!(index.titles_added_in(2020).count(), 0);
        assert_eq!(index.titles_released_in(2020).count(), 0);
    }
}
