//! Report data and chart files behind the explorer subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use analytics::stats::{
    duration_values, longest, monthly_additions, movie_share_by_year, value_counts, yearly_additions,
};
use analytics::filters::CountryFilter;
use analytics::{AxisLabels, CategoricalSplitAggregator, FilterPipeline, Figure, Orientation, TagCount, PRIMARY_COLOR, SECONDARY_COLOR};
use anyhow::{Context, Result};
use data_loader::{CatalogIndex, Column, ContentType, Title};
use tracing::debug;

/// Qualitative palette for charts with many slices
const PALETTE: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5", "#d9d9d9",
    "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Upper bound of the movie duration histogram, in minutes
const MAX_MOVIE_MINUTES: f64 = 250.0;

/// A figure together with the file stem it is written under
#[derive(Debug, Clone)]
pub struct NamedFigure {
    pub name: &'static str,
    pub figure: Figure,
}

impl NamedFigure {
    fn new(name: &'static str, figure: Figure) -> Self {
        Self { name, figure }
    }
}

/// Value of one cell as a ranking key, `None` when missing
pub fn cell_value(title: &Title, column: Column) -> Option<String> {
    match column {
        Column::ReleaseYear => Some(title.release_year.to_string()),
        other => title.text(other).map(|s| s.trim().to_string()),
    }
}

/// Frequency ranking of a column
///
/// Multi-valued columns go through the tag aggregator, the others are
/// counted as whole cells.
pub fn distribution(titles: &[&Title], column: Column, top: Option<usize>) -> Vec<TagCount> {
    if column.is_multi_valued() {
        return CategoricalSplitAggregator::new().aggregate_column(titles.iter().copied(), column, top);
    }

    value_counts(titles.iter().filter_map(|t| cell_value(t, column)), top)
        .into_iter()
        .map(|(value, count)| TagCount::new(value, count))
        .collect()
}

/// Release year with the most titles, earliest year on ties
pub fn busiest_release_year(index: &CatalogIndex) -> Option<(u16, usize)> {
    let mut busiest: Option<(u16, usize)> = None;
    for year in index.release_years() {
        let count = index.titles_released_in(year).count();
        if busiest.is_none_or(|(_, best)| count > best) {
            busiest = Some((year, count));
        }
    }
    busiest
}

/// Titles added per year as `(year, movies, shows)`, ascending by year
pub fn additions_per_year(index: &CatalogIndex) -> Vec<(i32, usize, usize)> {
    index
        .years_added()
        .map(|year| {
            let movies = index
                .titles_added_in(year)
                .filter(|t| t.content_type == ContentType::Movie)
                .count();
            let total = index.titles_added_in(year).count();
            (year, movies, total - movies)
        })
        .collect()
}

/// Directors ranked by number of titles, unnamed directors dropped
pub fn top_directors(titles: &[&Title], limit: usize) -> Vec<TagCount> {
    let mut ranking =
        CategoricalSplitAggregator::new().aggregate_column(titles.iter().copied(), Column::Director, None);
    ranking.retain(|t| !t.tag.is_empty());
    ranking.truncate(limit);
    ranking
}

fn ranking_bar(title: &str, axis: AxisLabels<'_>, ranking: &[TagCount]) -> Figure {
    let tags: Vec<&str> = ranking.iter().map(|t| t.tag.as_str()).collect();
    let counts: Vec<usize> = ranking.iter().map(|t| t.count).collect();
    Figure::bar(title, axis, &tags, &counts, PRIMARY_COLOR, Orientation::Horizontal).largest_first()
}

fn longest_bar(title: &str, x_label: &str, titles: &[Title], content_type: ContentType) -> Figure {
    let top = longest(titles, content_type, 5);
    let names: Vec<&str> = top.iter().map(|t| t.title.as_str()).collect();
    let lengths: Vec<u32> = top.iter().filter_map(|t| t.duration.map(|d| d.value())).collect();
    Figure::bar(
        title,
        AxisLabels::new(x_label, "Title"),
        &names,
        &lengths,
        PRIMARY_COLOR,
        Orientation::Horizontal,
    )
    .largest_first()
}

/// Every chart of the exploratory analysis, in presentation order
pub fn notebook_figures(titles: &[Title]) -> Vec<NamedFigure> {
    let all: Vec<&Title> = titles.iter().collect();
    let mut figures = Vec::new();

    let types = value_counts(titles.iter().map(|t| t.content_type.as_str()), None);
    let (type_labels, type_counts): (Vec<&str>, Vec<usize>) = types.into_iter().unzip();
    figures.push(NamedFigure::new(
        "content_types",
        Figure::pie(
            "Distribution of Content Types",
            &type_labels,
            &type_counts,
            &[PRIMARY_COLOR, SECONDARY_COLOR],
        ),
    ));

    figures.push(NamedFigure::new(
        "top_countries",
        ranking_bar(
            "Top 10 Countries Producing Content",
            AxisLabels::new("Number of Titles", "Country"),
            &distribution(&all, Column::Country, Some(10)),
        ),
    ));

    let release_years: Vec<u16> = titles.iter().map(|t| t.release_year).collect();
    figures.push(NamedFigure::new(
        "release_years",
        Figure::histogram(
            "Distribution of Release Years",
            AxisLabels::new("Release Year", "Number of Titles"),
            &release_years,
            30,
            PRIMARY_COLOR,
        ),
    ));

    let (years, additions): (Vec<i32>, Vec<usize>) = yearly_additions(titles).into_iter().unzip();
    figures.push(NamedFigure::new(
        "years_added",
        Figure::bar(
            "Titles Added per Year",
            AxisLabels::new("Year Added", "Number of Titles"),
            &years,
            &additions,
            PRIMARY_COLOR,
            Orientation::Vertical,
        ),
    ));

    let ratings = distribution(&all, Column::Rating, None);
    let rating_labels: Vec<&str> = ratings.iter().map(|t| t.tag.as_str()).collect();
    let rating_counts: Vec<usize> = ratings.iter().map(|t| t.count).collect();
    figures.push(NamedFigure::new(
        "ratings",
        Figure::pie("Distribution of Ratings", &rating_labels, &rating_counts, &PALETTE),
    ));

    figures.push(NamedFigure::new(
        "movie_durations",
        Figure::histogram(
            "Distribution of Movie Durations",
            AxisLabels::new("Duration (minutes)", "Number of Movies"),
            &duration_values(titles, ContentType::Movie),
            20,
            PRIMARY_COLOR,
        )
        .x_range(0.0, MAX_MOVIE_MINUTES),
    ));

    let mut seasons = value_counts(duration_values(titles, ContentType::TvShow), None);
    seasons.sort_by_key(|&(n, _)| n);
    let (season_counts, shows): (Vec<u32>, Vec<usize>) = seasons.into_iter().unzip();
    figures.push(NamedFigure::new(
        "show_seasons",
        Figure::bar(
            "Distribution of Season Counts",
            AxisLabels::new("Number of Seasons", "Number of Shows"),
            &season_counts,
            &shows,
            PRIMARY_COLOR,
            Orientation::Vertical,
        ),
    ));

    figures.push(NamedFigure::new(
        "top_genres",
        ranking_bar(
            "Top 15 Genres",
            AxisLabels::new("Number of Titles", "Genre"),
            &distribution(&all, Column::ListedIn, Some(15)),
        ),
    ));

    figures.push(NamedFigure::new(
        "longest_shows",
        longest_bar("Top 5 Shows by Seasons", "Number of Seasons", titles, ContentType::TvShow),
    ));
    figures.push(NamedFigure::new(
        "longest_movies",
        longest_bar("Top 5 Longest Movies", "Duration (minutes)", titles, ContentType::Movie),
    ));

    let french = FilterPipeline::new()
        .add_filter(CountryFilter::new("France"))
        .apply(all.clone());
    figures.push(NamedFigure::new(
        "french_directors",
        ranking_bar(
            "Top 10 Directors of French Titles",
            AxisLabels::new("Number of Titles", "Director"),
            &top_directors(&french, 10),
        ),
    ));

    let (months, monthly): (Vec<String>, Vec<usize>) = monthly_additions(titles).into_iter().unzip();
    figures.push(NamedFigure::new(
        "monthly_additions",
        Figure::line(
            "Monthly Additions to the Catalog",
            AxisLabels::new("Month", "Titles Added"),
            &months,
            &monthly,
            PRIMARY_COLOR,
            false,
        ),
    ));

    let (share_years, shares): (Vec<i32>, Vec<f64>) = movie_share_by_year(titles).into_iter().unzip();
    figures.push(NamedFigure::new(
        "movie_share",
        Figure::line(
            "Share of Movies Among Yearly Additions",
            AxisLabels::new("Year Added", "Movie Share"),
            &share_years,
            &shares,
            PRIMARY_COLOR,
            false,
        )
        .with_reference_line(0.5, "Movie/show balance"),
    ));

    figures
}

/// Standalone HTML page rendering one figure with Plotly
pub fn viewer_html(named: &NamedFigure) -> serde_json::Result<String> {
    let json = named.figure.to_script_json()?;
    let title = named.figure.title().unwrap_or(named.name);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
const figure = {json};
Plotly.newPlot("chart", figure.data, figure.layout, {{ responsive: true }});
</script>
</body>
</html>
"#,
        title = html_escape(title),
        json = json,
    ))
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write `<name>.json` and `<name>.html` for every figure
///
/// Returns the paths written, JSON before HTML for each figure.
pub fn write_figures(out_dir: &Path, figures: &[NamedFigure]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(figures.len() * 2);
    for named in figures {
        let json_path = out_dir.join(format!("{}.json", named.name));
        let json = named
            .figure
            .to_json()
            .with_context(|| format!("Failed to serialize {}", named.name))?;
        fs::write(&json_path, json).with_context(|| format!("Failed to write {}", json_path.display()))?;

        let html_path = out_dir.join(format!("{}.html", named.name));
        let html = viewer_html(named).with_context(|| format!("Failed to render {}", named.name))?;
        fs::write(&html_path, html).with_context(|| format!("Failed to write {}", html_path.display()))?;

        debug!("Wrote {} and {}", json_path.display(), html_path.display());
        written.push(json_path);
        written.push(html_path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Duration;

    fn create_test_titles() -> Vec<Title> {
        let mut a = Title::new(ContentType::Movie, "Long Film", 2019);
        a.country = Some("France, Belgium".to_string());
        a.director = Some("Jane Roe".to_string());
        a.rating = Some("TV-MA".to_string());
        a.duration = Some(Duration::Minutes(180));
        a.listed_in = "Dramas".to_string();

        let mut b = Title::new(ContentType::Movie, "Short Film", 2019);
        b.country = Some("France".to_string());
        b.director = Some("Jane Roe, John Doe".to_string());
        b.rating = Some("TV-MA".to_string());
        b.duration = Some(Duration::Minutes(80));
        b.listed_in = "Comedies, Dramas".to_string();

        let mut c = Title::new(ContentType::TvShow, "Series", 2021);
        c.country = Some("United States".to_string());
        c.rating = Some("TV-14".to_string());
        c.duration = Some(Duration::Seasons(3));
        c.listed_in = "TV Dramas".to_string();

        vec![a, b, c]
    }

    #[test]
    fn test_distribution_multi_valued() {
        let titles = create_test_titles();
        let refs: Vec<&Title> = titles.iter().collect();

        let countries = distribution(&refs, Column::Country, Some(2));
        assert_eq!(countries, vec![TagCount::new("France", 2), TagCount::new("Belgium", 1)]);
    }

    #[test]
    fn test_distribution_single_valued() {
        let titles = create_test_titles();
        let refs: Vec<&Title> = titles.iter().collect();

        let ratings = distribution(&refs, Column::Rating, None);
        assert_eq!(ratings, vec![TagCount::new("TV-MA", 2), TagCount::new("TV-14", 1)]);

        let years = distribution(&refs, Column::ReleaseYear, Some(1));
        assert_eq!(years, vec![TagCount::new("2019", 2)]);
    }

    #[test]
    fn test_year_lookups() {
        use chrono::NaiveDate;

        let mut titles = create_test_titles();
        titles[0].date_added = NaiveDate::from_ymd_opt(2020, 1, 1);
        titles[1].date_added = NaiveDate::from_ymd_opt(2021, 6, 1);
        titles[2].date_added = NaiveDate::from_ymd_opt(2021, 7, 1);
        let index = CatalogIndex::from_titles(titles);

        assert_eq!(busiest_release_year(&index), Some((2019, 2)));
        assert_eq!(additions_per_year(&index), vec![(2020, 1, 0), (2021, 1, 1)]);
        assert_eq!(busiest_release_year(&CatalogIndex::new()), None);
    }

    #[test]
    fn test_top_directors() {
        let titles = create_test_titles();
        let refs: Vec<&Title> = titles.iter().collect();

        let directors = top_directors(&refs, 10);
        assert_eq!(directors, vec![TagCount::new("Jane Roe", 2), TagCount::new("John Doe", 1)]);
    }

    #[test]
    fn test_notebook_figures() {
        let figures = notebook_figures(&create_test_titles());
        let names: Vec<&str> = figures.iter().map(|f| f.name).collect();

        assert_eq!(names.len(), 13);
        assert_eq!(names[0], "content_types");
        assert!(names.contains(&"french_directors"));

        let longest_movies = figures.iter().find(|f| f.name == "longest_movies").unwrap();
        assert_eq!(longest_movies.figure.data[0]["y"], serde_json::json!(["Long Film", "Short Film"]));
        assert_eq!(longest_movies.figure.data[0]["x"], serde_json::json!([180, 80]));
    }

    #[test]
    fn test_french_directors_match_country_case_insensitively() {
        let mut titles = create_test_titles();
        let mut lower = Title::new(ContentType::Movie, "Lowercase Country", 2020);
        lower.country = Some("belgium, france".to_string());
        lower.director = Some("John Doe".to_string());
        titles.push(lower);

        let figures = notebook_figures(&titles);
        let directors = figures.iter().find(|f| f.name == "french_directors").unwrap();

        assert_eq!(directors.figure.data[0]["y"], serde_json::json!(["Jane Roe", "John Doe"]));
        assert_eq!(directors.figure.data[0]["x"], serde_json::json!([2, 2]));
    }

    #[test]
    fn test_viewer_escapes_script() {
        let named = NamedFigure::new(
            "x",
            Figure::pie("</script> & co", &["a"], &[1], &[PRIMARY_COLOR]),
        );
        let html = viewer_html(&named).unwrap();

        assert!(html.contains("<title>&lt;/script&gt; &amp; co</title>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_write_figures() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");
        let figures = notebook_figures(&create_test_titles());

        let written = write_figures(&out, &figures).unwrap();

        assert_eq!(written.len(), figures.len() * 2);
        let json = fs::read_to_string(out.join("top_genres.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["data"][0]["y"][0], "Dramas");
        assert!(out.join("top_genres.html").exists());
    }
}
