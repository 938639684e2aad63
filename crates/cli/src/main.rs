mod reports;

use analytics::filters::{AddedYearFilter, ContentTypeFilter, CountryFilter, ReleaseYearRangeFilter};
use analytics::stats::{
    missing_summary, monthly_additions, most_recent, movie_share_by_year, peak_addition_year,
    prolific_directors, unique_values, yearly_additions_by_type,
};
use analytics::{FilterPipeline, TagCount};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{CatalogIndex, Column, ContentType, Title};
use std::path::PathBuf;
use std::time::Instant;

/// Catalog Explorer - streaming catalog analysis
#[derive(Parser)]
#[command(name = "catalog-explorer")]
#[command(about = "Exploratory analysis of a streaming catalog", long_about = None)]
struct Cli {
    /// Path to the catalog CSV file
    #[arg(short, long, default_value = "data/netflix_titles.csv")]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shape, columns, first and last rows, missing values
    Overview {
        /// Number of rows to show at each end
        #[arg(long, default_value = "5")]
        rows: usize,
    },

    /// Distinct values of the categorical columns
    Unique,

    /// Most recently added titles and peak addition years
    Recent,

    /// Frequency ranking of one column
    Distribution {
        #[arg(long, value_enum)]
        column: ColumnArg,

        /// Keep only the K most frequent values
        #[arg(long)]
        top: Option<usize>,

        /// Restrict to movies or shows
        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,

        /// Restrict to titles whose country contains this text
        #[arg(long)]
        country: Option<String>,

        /// Restrict to titles added in this year
        #[arg(long)]
        year_added: Option<i32>,

        /// Restrict to titles released in or after this year
        #[arg(long)]
        released_from: Option<u16>,

        /// Restrict to titles released in or before this year
        #[arg(long)]
        released_to: Option<u16>,
    },

    /// Longest movies (minutes) or shows (seasons)
    Longest {
        #[arg(long, value_enum)]
        kind: KindArg,

        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Directors ranked by number of titles
    Directors {
        /// Restrict to titles whose country contains this text
        #[arg(long)]
        country: Option<String>,

        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Monthly additions and yearly movie share
    Trends,

    /// Print one random title
    Random,

    /// Look up a title by name
    Show {
        /// Exact title, falling back to a case-insensitive substring match
        #[arg(long)]
        title: String,
    },

    /// Write every chart as JSON plus an HTML viewer
    Charts {
        #[arg(long, default_value = "charts")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Movie,
    Show,
}

impl From<KindArg> for ContentType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => ContentType::Movie,
            KindArg::Show => ContentType::TvShow,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "snake_case")]
enum ColumnArg {
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

impl From<ColumnArg> for Column {
    fn from(arg: ColumnArg) -> Self {
        match arg {
            ColumnArg::ShowId => Column::ShowId,
            ColumnArg::Type => Column::Type,
            ColumnArg::Title => Column::Title,
            ColumnArg::Director => Column::Director,
            ColumnArg::Cast => Column::Cast,
            ColumnArg::Country => Column::Country,
            ColumnArg::DateAdded => Column::DateAdded,
            ColumnArg::ReleaseYear => Column::ReleaseYear,
            ColumnArg::Rating => Column::Rating,
            ColumnArg::Duration => Column::Duration,
            ColumnArg::ListedIn => Column::ListedIn,
            ColumnArg::Description => Column::Description,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalog from {}...", cli.data_file.display());
    let start = Instant::now();
    let index = CatalogIndex::load_from_file(&cli.data_file).context("Failed to load catalog")?;
    println!(
        "{} Loaded {} titles in {:?}",
        "✓".green(),
        index.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Overview { rows } => handle_overview(&index, rows),
        Commands::Unique => handle_unique(&index),
        Commands::Recent => handle_recent(&index),
        Commands::Distribution {
            column,
            top,
            kind,
            country,
            year_added,
            released_from,
            released_to,
        } => {
            let release_range = (released_from.is_some() || released_to.is_some())
                .then(|| ReleaseYearRangeFilter::new(released_from, released_to));
            let pipeline = FilterPipeline::new()
                .add_optional(kind.map(|k| ContentTypeFilter::new(k.into())))
                .add_optional(country.map(CountryFilter::new))
                .add_optional(year_added.map(AddedYearFilter::new))
                .add_optional(release_range);
            handle_distribution(&index, column.into(), top, &pipeline)
        }
        Commands::Longest { kind, limit } => handle_longest(&index, kind.into(), limit),
        Commands::Directors { country, top } => handle_directors(&index, country, top),
        Commands::Trends => handle_trends(&index),
        Commands::Random => handle_random(&index)?,
        Commands::Show { title } => handle_show(&index, &title)?,
        Commands::Charts { out_dir } => handle_charts(&index, &out_dir)?,
    }

    Ok(())
}

/// Handle the 'overview' command
fn handle_overview(index: &CatalogIndex, rows: usize) {
    let counts = index.counts();
    println!("{}", "Catalog overview".bold().blue());
    println!("{}Shape: {} rows x {} columns", "• ".green(), counts.total, Column::ALL.len());
    println!("{}Movies: {}", "• ".green(), counts.movies);
    println!("{}TV shows: {}", "• ".green(), counts.tv_shows);

    let columns: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
    println!("{}Columns: {}", "• ".green(), columns.join(", "));

    let titles = index.titles();
    println!("\n{}", format!("First {} rows:", rows).bold());
    for title in titles.iter().take(rows) {
        print_row(title);
    }
    println!("\n{}", format!("Last {} rows:", rows).bold());
    for title in titles.iter().skip(titles.len().saturating_sub(rows)) {
        print_row(title);
    }

    println!("\n{}", "Missing values:".bold());
    for entry in missing_summary(titles) {
        println!(
            "  {:<14} {:>6} ({:.2}%)",
            entry.column.name(),
            entry.missing,
            entry.percent
        );
    }
}

/// Handle the 'unique' command
fn handle_unique(index: &CatalogIndex) {
    let unique = unique_values(index.titles());

    println!("{}", "Unique values".bold().blue());
    let types: Vec<&str> = unique.content_types.iter().map(|t| t.as_str()).collect();
    println!("{}type: {}", "• ".green(), types.join(", "));
    println!("{}rating: {}", "• ".green(), unique.ratings.join(", "));
    match (unique.release_years.first(), unique.release_years.last()) {
        (Some(first), Some(last)) => println!(
            "{}release_year: {} distinct, {} to {}",
            "• ".green(),
            unique.release_years.len(),
            first,
            last
        ),
        _ => println!("{}release_year: none", "• ".green()),
    }
    if let Some((year, count)) = reports::busiest_release_year(index) {
        println!("  most titles released in {} ({})", year, count);
    }
    println!("{}country: {} distinct values", "• ".green(), unique.distinct_country_cells);
    println!("{}listed_in: {} distinct genres", "• ".green(), unique.genres.len());
    for genre in unique.genres.iter().take(10) {
        println!("  - {}", genre);
    }

    let directors = prolific_directors(index.titles(), None);
    println!(
        "\n{}",
        format!("Directors with more than one title: {}", directors.len()).bold()
    );
    print_ranking(&directors[..directors.len().min(10)]);
}

/// Handle the 'recent' command
fn handle_recent(index: &CatalogIndex) {
    println!("{}", "Most recent additions".bold().blue());
    for content_type in ContentType::ALL {
        match most_recent(index.titles(), content_type) {
            Some(title) => println!(
                "{}{}: {} (added {})",
                "• ".green(),
                content_type,
                title.title,
                title.date_added_raw.as_deref().unwrap_or("?").trim()
            ),
            None => println!("{}{}: none", "• ".green(), content_type),
        }
    }

    println!("\n{}", "Peak addition years".bold().blue());
    for content_type in ContentType::ALL {
        match peak_addition_year(index.titles(), content_type) {
            Some((year, count)) => println!("{}{}: {} ({} titles)", "• ".green(), content_type, year, count),
            None => println!("{}{}: none", "• ".green(), content_type),
        }
    }

    println!("\n{}", "Additions per year".bold().blue());
    for (year, movies, shows) in reports::additions_per_year(index) {
        println!("  {}  movies {:>5}  shows {:>5}", year, movies, shows);
    }
}

/// Handle the 'distribution' command
fn handle_distribution(index: &CatalogIndex, column: Column, top: Option<usize>, pipeline: &FilterPipeline) {
    let titles = pipeline.apply_all(index.titles());

    let ranking = reports::distribution(&titles, column, top);
    println!(
        "{}",
        format!("Distribution of '{}' over {} titles:", column.name(), titles.len())
            .bold()
            .blue()
    );
    print_ranking(&ranking);
}

/// Handle the 'longest' command
fn handle_longest(index: &CatalogIndex, content_type: ContentType, limit: usize) {
    let titles = analytics::stats::longest(index.titles(), content_type, limit);
    println!(
        "{}",
        format!("Top {} longest ({}):", limit, content_type).bold().blue()
    );
    for (i, title) in titles.iter().enumerate() {
        let duration = title
            .duration
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!("{}. {} ({})", (i + 1).to_string().green(), title.title, duration);
    }
}

/// Handle the 'directors' command
fn handle_directors(index: &CatalogIndex, country: Option<String>, top: usize) {
    let label = country.clone();
    let pipeline = FilterPipeline::new().add_optional(country.map(CountryFilter::new));
    let titles = pipeline.apply_all(index.titles());

    let ranking = reports::top_directors(&titles, top);
    let heading = match label {
        Some(country) => format!("Top {} directors of titles from {}:", top, country),
        None => format!("Top {} directors:", top),
    };
    println!("{}", heading.bold().blue());
    print_ranking(&ranking);
}

/// Handle the 'trends' command
fn handle_trends(index: &CatalogIndex) {
    println!("{}", "Monthly additions".bold().blue());
    for (month, count) in monthly_additions(index.titles()) {
        println!("  {} {:>5} {}", month, count, "▇".repeat(count.min(60)).red());
    }

    println!("\n{}", "Yearly additions by type".bold().blue());
    let by_type = yearly_additions_by_type(index.titles());
    for (year, share) in movie_share_by_year(index.titles()) {
        let counts = by_type.get(&year).copied().unwrap_or_default();
        println!(
            "  {}  movies {:>5}  shows {:>5}  movie share {:.2}",
            year, counts.movies, counts.tv_shows, share
        );
    }
}

/// Handle the 'random' command
fn handle_random(index: &CatalogIndex) -> Result<()> {
    if index.is_empty() {
        return Err(anyhow!("The catalog is empty"));
    }
    let pos = (rand::random::<u64>() % index.len() as u64) as usize;
    let title = index
        .get_title(pos)
        .ok_or_else(|| anyhow!("Row {} not found", pos))?;

    println!("{}", format!("Random observation (row {}):", pos).bold().blue());
    print_title(title);
    Ok(())
}

/// Handle the 'show' command
fn handle_show(index: &CatalogIndex, name: &str) -> Result<()> {
    if let Some(title) = index.find_by_title(name) {
        print_title(title);
        return Ok(());
    }

    let matches = index.search_titles(name);
    if matches.is_empty() {
        return Err(anyhow!("No title matching '{}'", name));
    }
    println!("{}", format!("Titles matching '{}':", name).bold().blue());
    for title in matches.iter().take(20) {
        print_row(title);
    }
    Ok(())
}

/// Handle the 'charts' command
fn handle_charts(index: &CatalogIndex, out_dir: &std::path::Path) -> Result<()> {
    let figures = reports::notebook_figures(index.titles());
    let written = reports::write_figures(out_dir, &figures)?;
    println!(
        "{} Wrote {} files for {} charts to {}",
        "✓".green(),
        written.len(),
        figures.len(),
        out_dir.display()
    );
    Ok(())
}

fn print_ranking(ranking: &[TagCount]) {
    for (i, entry) in ranking.iter().enumerate() {
        let tag = if entry.tag.is_empty() { "(empty)" } else { entry.tag.as_str() };
        println!("{}. {} ({})", (i + 1).to_string().green(), tag, entry.count);
    }
}

fn print_row(title: &Title) {
    println!(
        "  {:<6} {:<8} {} ({})",
        title.show_id.as_deref().unwrap_or("-"),
        title.content_type,
        title.title,
        title.release_year
    );
}

fn print_title(title: &Title) {
    println!("{}", title.title.bold());
    for column in Column::ALL {
        let value = match column {
            Column::ReleaseYear => Some(title.release_year.to_string()),
            other => title.text(other).map(str::to_string),
        };
        println!(
            "  {:<14} {}",
            column.name().cyan(),
            value.as_deref().unwrap_or("-")
        );
    }
}
