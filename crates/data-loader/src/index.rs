//! CatalogIndex loading.
//!
//! Opens the catalog file, hands it to the parser and builds the lookup
//! indices from the parsed rows.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

impl CatalogIndex {
    /// Load a comma-separated catalog file
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::load_with_delimiter(path, b',')
    }

    /// Load a catalog file that uses another field delimiter
    pub fn load_with_delimiter(path: &Path, delimiter: u8) -> Result<Self> {
        info!("Loading catalog from {}", path.display());
        let start = Instant::now();

        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DataLoadError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => DataLoadError::IoError(e),
        })?;

        let titles = parser::parse_titles(BufReader::new(file), delimiter)?;
        debug!("Parsed {} rows in {:?}", titles.len(), start.elapsed());

        let index = CatalogIndex::from_titles(titles);
        let counts = index.counts();
        info!(
            "Loaded {} titles ({} movies, {} TV shows) in {:?}",
            counts.total,
            counts.movies,
            counts.tv_shows,
            start.elapsed()
        );

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description\n\
             s1,Movie,Sankofa,Haile Gerima,,\"United States, Ghana, Burkina Faso\",\"September 24, 2021\",1993,TV-MA,125 min,\"Dramas, Independent Movies\",\n\
             s2,TV Show,Kota Factory,,,India,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, Romantic TV Shows\",\n\
             s3,Movie,Midnight Mass,,,,,2021,TV-MA,,TV Dramas,\n"
        )
        .unwrap();

        let index = CatalogIndex::load_from_file(file.path()).unwrap();
        let counts = index.counts();

        assert_eq!(counts.total, 3);
        assert_eq!(counts.movies, 2);
        assert_eq!(counts.tv_shows, 1);
        assert_eq!(index.titles_added_in(2021).count(), 2);
        assert_eq!(index.find_by_title("Kota Factory").unwrap().release_year, 2021);
    }

    #[test]
    fn test_missing_file() {
        let err = CatalogIndex::load_from_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_dataset() {
        // Place netflix_titles.csv in ../../data/ to run against the real file
        let path = Path::new("../../data/netflix_titles.csv");

        if path.exists() {
            let index = CatalogIndex::load_from_file(path).unwrap();
            let counts = index.counts();

            assert!(counts.total > 0);
            assert_eq!(counts.total, counts.movies + counts.tv_shows);
        }
    }
}
