//! High-level scraping API
//!
//! Combines the HTTP client with the parsers, aggregator, and report
//! builder into the single entry point used by the CLI. A failure on the
//! main show page aborts the run; a failure on an individual season page
//! degrades that season to zero episodes with a warning.

use tracing::{info, warn};

use crate::client::ImdbClient;
use crate::error::{Result, ScrapeError};
use crate::parser::{extract_imdb_id, parse_episodes, parse_season_links, parse_show};
use crate::report::{build_report, ReportModel};
use crate::stats::{compute_overall_stats, compute_season_stats};
use crate::types::{Episode, SeasonRef};

/// Scraper for IMDB episode rating reports
///
/// # Example
/// ```no_run
/// use heatmap_core::ImdbScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = ImdbScraper::new()?;
///     let report = scraper.scrape("https://www.imdb.com/title/tt0903747/").await?;
///     println!("{} episodes", report.overall.episode_count);
///     Ok(())
/// }
/// ```
pub struct ImdbScraper {
    client: ImdbClient,
}

impl ImdbScraper {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = ImdbClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with a custom client.
    ///
    /// Useful for testing or custom client configuration.
    pub fn with_client(client: ImdbClient) -> Self {
        Self { client }
    }

    /// Scrape a show and assemble the render-ready report.
    ///
    /// # Errors
    /// - `ScrapeError::InvalidUrl` when the URL carries no IMDB title id
    /// - Fetch or extraction errors for the main show page
    ///
    /// Season page failures are not errors; the affected season is recorded
    /// with zero episodes and a warning is logged.
    pub async fn scrape(&self, url: &str) -> Result<ReportModel> {
        let imdb_id =
            extract_imdb_id(url).ok_or_else(|| ScrapeError::InvalidUrl(url.to_string()))?;
        info!(imdb_id = %imdb_id, "scraping show");

        let html = self.client.fetch(&format!("/title/{}/", imdb_id)).await?;
        let (show, mut seasons) = parse_show(&html, &imdb_id)?;
        info!(title = %show.title, seasons = seasons.len(), "show page parsed");

        if seasons.is_empty() {
            seasons = self.seasons_from_episodes_page(&imdb_id).await;
        }

        let mut collected: Vec<(SeasonRef, Vec<Episode>)> = Vec::new();
        for season in seasons {
            match self.season_episodes(&season).await {
                Ok(episodes) => {
                    info!(season = season.number, episodes = episodes.len(), "season parsed");
                    collected.push((season, episodes));
                }
                Err(err) => {
                    warn!(season = season.number, error = %err, "skipping season");
                    collected.push((season, Vec::new()));
                }
            }
        }

        // Re-sort by season number; fetch completion order must not leak
        // into the grid layout.
        collected.sort_by_key(|(season, _)| season.number);

        let season_stats = collected
            .iter()
            .map(|(season, episodes)| compute_season_stats(season.number, episodes))
            .collect();
        let all_episodes: Vec<Episode> = collected
            .iter()
            .flat_map(|(_, episodes)| episodes.iter().cloned())
            .collect();
        let overall = compute_overall_stats(&all_episodes);

        if all_episodes.is_empty() {
            warn!(error = %ScrapeError::EmptyData, "rendering degraded report");
        }

        Ok(build_report(show, collected, season_stats, overall))
    }

    /// Fetch and parse one season's episode list.
    pub async fn season_episodes(&self, season: &SeasonRef) -> Result<Vec<Episode>> {
        let html = self.client.fetch(&season.path).await?;
        parse_episodes(&html, season.number)
    }

    /// Secondary season enumeration: some show pages omit the season count
    /// from JSON-LD, but the episodes overview page carries a selector.
    async fn seasons_from_episodes_page(&self, imdb_id: &str) -> Vec<SeasonRef> {
        match self.client.fetch(&format!("/title/{}/episodes/", imdb_id)).await {
            Ok(html) => parse_season_links(&html, imdb_id),
            Err(err) => {
                warn!(error = %err, "episodes overview page unavailable");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_creation() {
        let scraper = ImdbScraper::new();
        assert!(scraper.is_ok());
    }

    #[tokio::test]
    async fn test_scrape_invalid_url() {
        let scraper = ImdbScraper::new().unwrap();
        let result = scraper.scrape("https://example.com/not-imdb/").await;

        match result {
            Err(ScrapeError::InvalidUrl(url)) => {
                assert!(url.contains("example.com"));
            }
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[tokio::test]
    async fn test_scrape_empty_url() {
        let scraper = ImdbScraper::new().unwrap();
        let result = scraper.scrape("").await;
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }
}
