//! Report assembly
//!
//! Combines show metadata, per-season episode lists, and aggregate
//! statistics into a single render-ready [`ReportModel`]. Assembly is a
//! pure function of its inputs: no timestamps, no randomness.

use serde::{Deserialize, Serialize};

use crate::types::{Episode, OverallStats, SeasonRef, SeasonStats, ShowMetadata};

/// Discrete color band assigned to a rating for heatmap rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingBand {
    /// [0.0, 4.0)
    Red,
    /// [4.0, 6.0)
    Amber,
    /// [6.0, 8.0)
    LightGreen,
    /// [8.0, 10.0]
    BrightGreen,
    /// No rating yet
    Unrated,
}

impl RatingBand {
    /// Classify a rating into its band. Bands are inclusive on the lower
    /// bound and exclusive on the upper bound, except the final band which
    /// includes 10.0.
    pub fn classify(rating: Option<f64>) -> Self {
        match rating {
            None => RatingBand::Unrated,
            Some(r) if r < 4.0 => RatingBand::Red,
            Some(r) if r < 6.0 => RatingBand::Amber,
            Some(r) if r < 8.0 => RatingBand::LightGreen,
            Some(_) => RatingBand::BrightGreen,
        }
    }

    /// Hex color used by the renderer.
    pub fn color(&self) -> &'static str {
        match self {
            RatingBand::Red => "#da3633",
            RatingBand::Amber => "#d29922",
            RatingBand::LightGreen => "#7ee787",
            RatingBand::BrightGreen => "#238636",
            RatingBand::Unrated => "#3d3d3d",
        }
    }
}

/// One heatmap cell: an episode plus its assigned band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeCell {
    pub episode: Episode,
    pub band: RatingBand,
}

/// One heatmap row: a season and its ordered episode cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonGrid {
    pub season: SeasonRef,
    pub episodes: Vec<EpisodeCell>,
}

/// The render-ready structure handed to the output step
///
/// Contains no further derived computation; the renderer only formats what
/// is already here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportModel {
    pub show: ShowMetadata,
    /// Season rows, ascending by season number
    pub seasons: Vec<SeasonGrid>,
    /// Per-season statistics, same order as `seasons`
    pub season_stats: Vec<SeasonStats>,
    pub overall: OverallStats,
    /// Largest per-season episode count (heatmap column count)
    pub max_episodes: usize,
}

impl ReportModel {
    /// Whether any episode of the show carries a rating.
    pub fn has_ratings(&self) -> bool {
        self.overall.rated_count > 0
    }
}

/// Assemble the render-ready report.
///
/// Seasons and episodes are re-sorted ascending so the grid layout is
/// stable regardless of input order.
pub fn build_report(
    show: ShowMetadata,
    seasons: Vec<(SeasonRef, Vec<Episode>)>,
    mut season_stats: Vec<SeasonStats>,
    overall: OverallStats,
) -> ReportModel {
    let mut seasons = seasons;
    seasons.sort_by_key(|(season, _)| season.number);
    season_stats.sort_by_key(|stats| stats.season_number);

    let max_episodes = seasons
        .iter()
        .map(|(_, episodes)| episodes.len())
        .max()
        .unwrap_or(0);

    let grids = seasons
        .into_iter()
        .map(|(season, mut episodes)| {
            episodes.sort_by_key(|e| e.episode_number);
            let cells = episodes
                .into_iter()
                .map(|episode| EpisodeCell {
                    band: RatingBand::classify(episode.rating),
                    episode,
                })
                .collect();
            SeasonGrid {
                season,
                episodes: cells,
            }
        })
        .collect();

    ReportModel {
        show,
        seasons: grids,
        season_stats,
        overall,
        max_episodes,
    }
}
