//! Parser for the catalog CSV file.
//!
//! Expected header (column order does not matter):
//! `show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description`
//!
//! Only `type`, `title`, `release_year` and `listed_in` are required
//! columns. Empty cells become `None`. A date or duration that can't be
//! understood also becomes `None`.
//!
//! A row whose type, title or release year is unusable is skipped with a
//! warning naming its line. Only a file the CSV reader itself rejects
//! fails the load.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use chrono::NaiveDate;
use csv::StringRecord;
use rayon::prelude::*;
use serde::Deserialize;
use std::io::Read;
use tracing::warn;

/// Format of the `date_added` column, e.g. "September 25, 2021"
pub const DATE_ADDED_FORMAT: &str = "%B %d, %Y";

const REQUIRED_COLUMNS: [Column; 4] = [
    Column::Type,
    Column::Title,
    Column::ReleaseYear,
    Column::ListedIn,
];

/// One row exactly as the CSV reader hands it over
#[derive(Debug, Deserialize)]
struct RawTitle {
    #[serde(default)]
    show_id: Option<String>,
    #[serde(rename = "type")]
    content_type: Option<String>,
    title: Option<String>,
    #[serde(default)]
    director: Option<String>,
    #[serde(default)]
    cast: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    date_added: Option<String>,
    release_year: Option<String>,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    listed_in: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Parse a `date_added` cell
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is
/// not a "Month day, year" date.
///
/// Example: " August 4, 2017" -> Some(2017-08-04)
pub fn parse_date_added(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_ADDED_FORMAT).ok()
}

/// Read every title from a CSV source
///
/// Rows are decoded sequentially (the CSV format is inherently sequential),
/// then turned into `Title`s in parallel. File order is preserved. Rows
/// that can't become a `Title` are logged and left out.
pub fn parse_titles<R: Read>(source: R, delimiter: u8) -> Result<Vec<Title>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    check_required_columns(&headers)?;

    let mut raw_rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // records() starts after the header, and editors count from 1
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        match record.deserialize::<RawTitle>(Some(&headers)) {
            Ok(raw) => raw_rows.push((line, raw)),
            Err(e) => warn!("Skipping line {}: {}", line, e),
        }
    }

    let titles = raw_rows
        .into_par_iter()
        .filter_map(|(line, raw)| match convert_row(line, raw) {
            Ok(title) => Some(title),
            Err(e) => {
                warn!("Skipping row: {}", e);
                None
            }
        })
        .collect();
    Ok(titles)
}

fn check_required_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == column.name()) {
            return Err(DataLoadError::MissingColumn(column.name().to_string()));
        }
    }
    Ok(())
}

fn convert_row(line: usize, raw: RawTitle) -> Result<Title> {
    let content_type = raw
        .content_type
        .ok_or_else(|| DataLoadError::ParseError {
            line,
            reason: "Missing type".to_string(),
        })?
        .parse::<ContentType>()
        .map_err(|e| DataLoadError::ParseError {
            line,
            reason: e.to_string(),
        })?;

    let title = raw.title.ok_or_else(|| DataLoadError::ParseError {
        line,
        reason: "Missing title".to_string(),
    })?;

    let release_year = raw
        .release_year
        .ok_or_else(|| DataLoadError::ParseError {
            line,
            reason: "Missing release_year".to_string(),
        })?;
    let release_year = release_year
        .trim()
        .parse::<u16>()
        .map_err(|e| DataLoadError::ParseError {
            line,
            reason: format!("Invalid release_year '{}': {}", release_year, e),
        })?;

    let date_added = raw.date_added.as_deref().and_then(parse_date_added);
    let duration = raw.duration.as_deref().and_then(Duration::parse);

    Ok(Title {
        show_id: raw.show_id,
        content_type,
        title,
        director: raw.director,
        cast: raw.cast,
        country: raw.country,
        date_added,
        date_added_raw: raw.date_added,
        release_year,
        rating: raw.rating,
        duration,
        duration_raw: raw.duration,
        // empty reads back as missing through Title::text
        listed_in: raw.listed_in.unwrap_or_default(),
        description: raw.description,
    })
}
