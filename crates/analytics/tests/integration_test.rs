//! Integration tests for the analytics crate.
//!
//! These tests load a small catalog through the data-loader and check that
//! filters, the aggregator and the statistics agree with each other.

use analytics::filters::*;
use analytics::stats;
use analytics::{CategoricalSplitAggregator, FilterPipeline, TagCount};
use data_loader::{parse_titles, CatalogIndex, Column, ContentType};

const CATALOG: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description
s1,Movie,Les Misérables,Ladj Ly,,France,\"January 1, 2020\",2019,TV-MA,104 min,\"Dramas, International Movies\",
s2,TV Show,Lupin,,,France,\"January 8, 2021\",2021,TV-MA,2 Seasons,\"Crime TV Shows, International TV Shows\",
s3,Movie,Mustang,Deniz Gamze Ergüven,,\"France, Germany, Turkey\",\"April 1, 2019\",2015,TV-14,97 min,\"Dramas, Independent Movies, International Movies\",
s4,Movie,Roma,Alfonso Cuarón,,Mexico,\" December 14, 2018\",2018,R,135 min,\"Dramas, International Movies\",
s5,TV Show,Dark,,,Germany,\"December 1, 2017\",2020,TV-MA,3 Seasons,\"Crime TV Shows, International TV Shows, TV Mysteries\",
s6,Movie,Untitled,Ladj Ly,,,,2021,,,Dramas,
";

fn load() -> CatalogIndex {
    CatalogIndex::from_titles(parse_titles(CATALOG.as_bytes(), b',').unwrap())
}

#[test]
fn test_dashboard_counts() {
    let index = load();
    let counts = index.counts();

    assert_eq!(counts.total, 6);
    assert_eq!(counts.movies, 4);
    assert_eq!(counts.tv_shows, 2);
    assert_eq!(counts.total, counts.movies + counts.tv_shows);
}

#[test]
fn test_top_countries_and_genres() {
    let index = load();
    let aggregator = CategoricalSplitAggregator::new();

    let countries = aggregator.aggregate_column(index.titles(), Column::Country, Some(2));
    assert_eq!(
        countries,
        vec![TagCount::new("France", 3), TagCount::new("Germany", 2)]
    );

    let genres = aggregator.aggregate_column(index.titles(), Column::ListedIn, Some(10));
    assert_eq!(genres[0], TagCount::new("Dramas", 4));
    assert_eq!(genres[1], TagCount::new("International Movies", 3));
}

#[test]
fn test_french_directors() {
    let index = load();

    let french = FilterPipeline::new()
        .add_filter(CountryFilter::new("France"))
        .apply_all(index.titles());
    assert_eq!(french.len(), 3);

    let directors = CategoricalSplitAggregator::new().aggregate_column(french, Column::Director, Some(10));
    assert_eq!(
        directors,
        vec![
            TagCount::new("Ladj Ly", 1),
            TagCount::new("Deniz Gamze Ergüven", 1),
        ]
    );
}

#[test]
fn test_time_statistics() {
    let index = load();

    let yearly = stats::yearly_additions(index.titles());
    assert_eq!(
        yearly.into_iter().collect::<Vec<_>>(),
        vec![(2017, 1), (2018, 1), (2019, 1), (2020, 1), (2021, 1)]
    );

    let recent_movie = stats::most_recent(index.titles(), ContentType::Movie).unwrap();
    assert_eq!(recent_movie.title, "Les Misérables");

    let recent_show = stats::most_recent(index.titles(), ContentType::TvShow).unwrap();
    assert_eq!(recent_show.title, "Lupin");
}

#[test]
fn test_filtered_longest_shows() {
    let index = load();

    let shows = FilterPipeline::new()
        .add_filter(ContentTypeFilter::new(ContentType::TvShow))
        .add_filter(ReleaseYearRangeFilter::new(Some(2020), None))
        .apply_all(index.titles());

    let longest = stats::longest(shows, ContentType::TvShow, 5);
    let names: Vec<&str> = longest.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(names, vec!["Dark", "Lupin"]);
}

#[test]
fn test_missing_summary_on_loaded_catalog() {
    let index = load();
    let summary = stats::missing_summary(index.titles());

    let cast = summary.iter().find(|m| m.column == Column::Cast).unwrap();
    assert_eq!(cast.missing, 6);
    assert_eq!(summary[0].column, Column::Cast);

    let rating = summary.iter().find(|m| m.column == Column::Rating).unwrap();
    assert_eq!(rating.missing, 1);
}
