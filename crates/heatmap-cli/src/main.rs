//! Command-line interface for the IMDB episode rating heatmap tool.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;

use heatmap_core::{render, ImdbScraper, ReportModel};

/// Scrape IMDB episode ratings and generate a heatmap report.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// IMDB show URL (e.g. https://www.imdb.com/title/tt0903747/)
    url: String,

    /// Output file path (default: {show-title}.html in the working directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let scraper = ImdbScraper::new().context("create scraper")?;
    let report = scraper.scrape(&cli.url).await.context("scrape show")?;

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.html", slug(&report.show.title))));
    std::fs::write(&output, render(&report))
        .with_context(|| format!("write report to {}", output.display()))?;

    print_summary(&report, &output);
    Ok(())
}

fn init_logging() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}

/// Turn a show title into a filesystem-friendly file stem.
fn slug(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for ch in text.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else if !slug.is_empty() {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "report".to_string()
    } else {
        slug
    }
}

fn print_summary(report: &ReportModel, output: &Path) {
    println!("{}", "=".repeat(50));
    println!("Show: {}", report.show.title);
    println!("Seasons: {}", report.seasons.len());
    println!(
        "Episodes: {} ({} rated)",
        report.overall.episode_count, report.overall.rated_count
    );

    if let Some(average) = report.overall.average {
        println!("Overall average: {:.2}/10", average);
    } else {
        println!("No ratings available.");
    }
    if let Some(best) = &report.overall.best {
        println!(
            "Highest rated: S{:02}E{:02} - {} ({:.1})",
            best.season_number, best.episode_number, best.title, best.rating
        );
    }
    if let Some(worst) = &report.overall.worst {
        println!(
            "Lowest rated: S{:02}E{:02} - {} ({:.1})",
            worst.season_number, worst.episode_number, worst.title, worst.rating
        );
    }

    println!("Report: {}", output.display());
    println!("{}", "=".repeat(50));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_declaration() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_url_and_output() {
        let cli = Cli::parse_from(["imdb-heatmap", "https://www.imdb.com/title/tt1/", "-o", "out.html"]);
        assert_eq!(cli.url, "https://www.imdb.com/title/tt1/");
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Breaking Bad"), "breaking-bad");
        assert_eq!(slug("The Wire: Season One!"), "the-wire-season-one");
        assert_eq!(slug("  Doctor Who (2005)  "), "doctor-who-2005");
        assert_eq!(slug("***"), "report");
        assert_eq!(slug(""), "report");
    }
}
