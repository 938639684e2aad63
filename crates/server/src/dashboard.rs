//! # Dashboard
//!
//! Builds the one-page catalog overview:
//! 1. Scalar counts (total titles, movies, TV shows)
//! 2. Content-type distribution (pie)
//! 3. Top countries (bar)
//! 4. Titles added per year (spline line)
//! 5. Top genres (bar)
//!
//! The summary is recomputed from the shared `CatalogIndex` on every
//! request; nothing is cached between requests.

use analytics::stats::{value_counts, yearly_additions};
use analytics::{AxisLabels, CategoricalSplitAggregator, Figure, Orientation, TagCount, PRIMARY_COLOR, SECONDARY_COLOR};
use data_loader::{CatalogIndex, Column};
use serde::Serialize;
use thiserror::Error;

/// How many countries and genres the bar charts show
pub const DEFAULT_TOP_N: usize = 10;

const TEMPLATE: &str = include_str!("../templates/index.html");

/// Errors that can occur while rendering the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A chart could not be turned into JSON
    #[error("Failed to serialize chart '{chart}': {source}")]
    Chart {
        chart: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The summary could not be turned into JSON
    #[error("Failed to serialize summary: {0}")]
    Summary(#[from] serde_json::Error),
}

/// Everything the dashboard page shows
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_titles: usize,
    pub movie_count: usize,
    pub tvshow_count: usize,
    pub chart_types: Figure,
    pub chart_countries: Figure,
    pub chart_additions: Figure,
    pub chart_genres: Figure,
}

impl DashboardSummary {
    /// Compute counts and charts from the catalog
    ///
    /// # Arguments
    /// * `index` - The loaded catalog
    /// * `top_n` - Number of bars in the country and genre charts
    pub fn build(index: &CatalogIndex, top_n: usize) -> Self {
        let counts = index.counts();
        let aggregator = CategoricalSplitAggregator::new();

        let content_types = value_counts(index.titles().iter().map(|t| t.content_type.as_str()), None);
        let (type_labels, type_values): (Vec<&str>, Vec<usize>) = content_types.into_iter().unzip();
        let chart_types = Figure::pie(
            "Distribution of Content Types",
            &type_labels,
            &type_values,
            &[PRIMARY_COLOR, SECONDARY_COLOR],
        );

        let countries = aggregator.aggregate_column(index.titles(), Column::Country, Some(top_n));
        let chart_countries = ranking_bar(
            &format!("Top {} Countries by Content", top_n),
            "Country",
            &countries,
        );

        let yearly = yearly_additions(index.titles());
        let (years, additions): (Vec<i32>, Vec<usize>) = yearly.into_iter().unzip();
        let chart_additions = Figure::line(
            "Content Added by Year",
            AxisLabels::new("Year", "Number of Titles"),
            &years,
            &additions,
            PRIMARY_COLOR,
            true,
        );

        let genres = aggregator.aggregate_column(index.titles(), Column::ListedIn, Some(top_n));
        let chart_genres = ranking_bar(&format!("Top {} Genres", top_n), "Genre", &genres);

        Self {
            total_titles: counts.total,
            movie_count: counts.movies,
            tvshow_count: counts.tv_shows,
            chart_types,
            chart_countries,
            chart_additions,
            chart_genres,
        }
    }

    pub fn to_json(&self) -> Result<String, DashboardError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn ranking_bar(title: &str, category: &str, ranking: &[TagCount]) -> Figure {
    let tags: Vec<&str> = ranking.iter().map(|t| t.tag.as_str()).collect();
    let counts: Vec<usize> = ranking.iter().map(|t| t.count).collect();
    Figure::bar(
        title,
        AxisLabels::new(category, "Number of Titles"),
        &tags,
        &counts,
        PRIMARY_COLOR,
        Orientation::Vertical,
    )
}

fn chart_json(chart: &'static str, figure: &Figure) -> Result<String, DashboardError> {
    figure
        .to_script_json()
        .map_err(|source| DashboardError::Chart { chart, source })
}

/// Substitute `{{ name }}` placeholders in one left-to-right pass
///
/// Inserted values are never searched again, so a value that itself looks
/// like a placeholder stays as it is.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut page = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        page.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(*key)) {
            Some((key, value)) => {
                page.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                page.push_str("{{");
                rest = &tail[2..];
            }
        }
    }
    page.push_str(rest);
    page
}

/// Render the dashboard HTML page
pub fn render_dashboard(summary: &DashboardSummary) -> Result<String, DashboardError> {
    let values = [
        ("{{ total_titles }}", summary.total_titles.to_string()),
        ("{{ movie_count }}", summary.movie_count.to_string()),
        ("{{ tvshow_count }}", summary.tvshow_count.to_string()),
        ("{{ chart_types }}", chart_json("types", &summary.chart_types)?),
        ("{{ chart_countries }}", chart_json("countries", &summary.chart_countries)?),
        ("{{ chart_additions }}", chart_json("additions", &summary.chart_additions)?),
        ("{{ chart_genres }}", chart_json("genres", &summary.chart_genres)?),
    ];
    Ok(fill_template(TEMPLATE, &values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use data_loader::{ContentType, Title};

    fn create_test_index() -> CatalogIndex {
        let mut index = CatalogIndex::new();

        let mut movie = Title::new(ContentType::Movie, "Rock & Roll </script>", 2019);
        movie.country = Some("United States, India".to_string());
        movie.listed_in = "Dramas, Comedies".to_string();
        movie.date_added = NaiveDate::from_ymd_opt(2020, 3, 1);
        index.insert_title(movie);

        let mut other = Title::new(ContentType::Movie, "Second", 2018);
        other.country = Some("India".to_string());
        other.listed_in = "Dramas".to_string();
        other.date_added = NaiveDate::from_ymd_opt(2021, 3, 1);
        index.insert_title(other);

        let mut show = Title::new(ContentType::TvShow, "Third", 2021);
        show.listed_in = "Kids' TV <Animated>".to_string();
        show.date_added = NaiveDate::from_ymd_opt(2021, 4, 1);
        index.insert_title(show);

        index
    }

    #[test]
    fn test_summary_counts() {
        let summary = DashboardSummary::build(&create_test_index(), DEFAULT_TOP_N);

        assert_eq!(summary.total_titles, 3);
        assert_eq!(summary.movie_count, 2);
        assert_eq!(summary.tvshow_count, 1);
    }

    #[test]
    fn test_summary_charts() {
        let summary = DashboardSummary::build(&create_test_index(), 1);

        assert_eq!(summary.chart_types.data[0]["labels"][0], "Movie");
        assert_eq!(summary.chart_types.data[0]["values"][0], 2);

        assert_eq!(summary.chart_countries.data[0]["x"], serde_json::json!(["India"]));
        assert_eq!(summary.chart_countries.title(), Some("Top 1 Countries by Content"));

        assert_eq!(summary.chart_additions.data[0]["x"], serde_json::json!([2020, 2021]));
        assert_eq!(summary.chart_additions.data[0]["y"], serde_json::json!([1, 2]));

        assert_eq!(summary.chart_genres.data[0]["x"][0], "Dramas");
    }

    #[test]
    fn test_empty_catalog() {
        let summary = DashboardSummary::build(&CatalogIndex::new(), DEFAULT_TOP_N);

        assert_eq!(summary.total_titles, 0);
        assert_eq!(summary.chart_countries.data[0]["x"], serde_json::json!([]));
        assert!(render_dashboard(&summary).is_ok());
    }

    #[test]
    fn test_render_fills_placeholders() {
        let summary = DashboardSummary::build(&create_test_index(), DEFAULT_TOP_N);
        let page = render_dashboard(&summary).unwrap();

        assert!(!page.contains("{{"));
        assert!(page.contains("Distribution of Content Types"));
        assert!(page.contains("\\u003cAnimated\\u003e"));
        assert!(!page.contains("<Animated>"));
    }

    #[test]
    fn test_placeholder_text_in_data_is_not_expanded() {
        let mut index = create_test_index();
        let mut odd = Title::new(ContentType::Movie, "Odd", 2020);
        odd.country = Some("{{ chart_genres }}".to_string());
        odd.listed_in = "Dramas".to_string();
        index.insert_title(odd);

        let summary = DashboardSummary::build(&index, DEFAULT_TOP_N);
        let page = render_dashboard(&summary).unwrap();

        let line = page
            .lines()
            .find(|l| l.contains("\"chart-countries\""))
            .unwrap();
        assert!(line.contains("{{ chart_genres }}"));
        assert!(!line.contains("Top 10 Genres"));
        assert_eq!(page.matches("Top 10 Genres").count(), 1);
    }

    #[test]
    fn test_fill_template() {
        let values = [("{{ a }}", "{{ b }}".to_string()), ("{{ b }}", "B".to_string())];
        assert_eq!(fill_template("x {{ a }} {{ b }} {{ c }}", &values), "x {{ b }} B {{ c }}");
    }

    #[test]
    fn test_summary_json() {
        let summary = DashboardSummary::build(&create_test_index(), DEFAULT_TOP_N);
        let parsed: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();

        assert_eq!(parsed["total_titles"], 3);
        assert_eq!(parsed["chart_genres"]["layout"]["title"]["text"], "Top 10 Genres");
    }
}
