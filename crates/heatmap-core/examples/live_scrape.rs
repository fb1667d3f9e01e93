use heatmap_core::ImdbScraper;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.imdb.com/title/tt0903747/".to_string());

    println!("Scraping {}...\n", url);

    let scraper = ImdbScraper::new()?;
    let report = scraper.scrape(&url).await?;

    println!("Show: {}", report.show.title);
    println!("Seasons: {}", report.seasons.len());
    println!(
        "Episodes: {} ({} rated)",
        report.overall.episode_count, report.overall.rated_count
    );

    if let Some(average) = report.overall.average {
        println!("Overall average: {:.2}/10", average);
    }

    for (grid, stats) in report.seasons.iter().zip(&report.season_stats) {
        let average = stats
            .average
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "-".to_string());
        println!("\nSeason {} (avg {}):", grid.season.number, average);

        for cell in &grid.episodes {
            let rating = cell
                .episode
                .rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string());
            println!("  {} {} [{}]", cell.episode.code(), cell.episode.title, rating);
        }
    }

    Ok(())
}
