//! Data types for the IMDB heatmap pipeline
//!
//! All types implement Serialize and Deserialize so reports can be dumped
//! as JSON for debugging or downstream tooling.

use serde::{Deserialize, Serialize};

/// Show-level metadata extracted from the main title page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowMetadata {
    /// Canonical IMDB title id (e.g. "tt0903747")
    pub imdb_id: String,
    /// Display title of the show
    pub title: String,
    /// Poster image URL, when the page exposes one
    pub poster_url: Option<String>,
}

/// Reference to one season's episode listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonRef {
    /// Season number (1-based)
    pub number: u32,
    /// Relative URL of the season's episode list
    pub path: String,
}

impl SeasonRef {
    /// Build the reference for a season of the given show.
    pub fn new(imdb_id: &str, number: u32) -> Self {
        Self {
            number,
            path: format!("/title/{}/episodes/?season={}", imdb_id, number),
        }
    }
}

/// One episode as extracted from a season page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Season number (1-based)
    pub season_number: u32,
    /// Episode number within the season (1-based)
    pub episode_number: u32,
    /// Episode title; a placeholder when the page omits it
    pub title: String,
    /// Rating on the 0.0 - 10.0 scale, None when not yet rated
    pub rating: Option<f64>,
    /// Number of votes behind the rating, when shown
    pub vote_count: Option<u32>,
}

impl Episode {
    /// Episode code in SxxExx format (e.g. S01E05).
    pub fn code(&self) -> String {
        format!("S{:02}E{:02}", self.season_number, self.episode_number)
    }
}

/// Aggregate statistics for one season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonStats {
    /// Season number (1-based)
    pub season_number: u32,
    /// Mean rating over the season's rated episodes, None when none are rated
    pub average: Option<f64>,
    /// Number of rated episodes contributing to the average
    pub rated_count: usize,
}

/// A rated episode referenced by the overall statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRef {
    pub season_number: u32,
    pub episode_number: u32,
    pub title: String,
    pub rating: f64,
}

/// Aggregate statistics across the whole show
///
/// All fields are None when no episode has a rating; the report then
/// renders a "no ratings" notice instead of statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallStats {
    /// Highest-rated episode (ties: lowest season, then lowest episode)
    pub best: Option<EpisodeRef>,
    /// Lowest-rated episode (same tie-break)
    pub worst: Option<EpisodeRef>,
    /// Mean rating over every rated episode of the show
    pub average: Option<f64>,
    /// Number of rated episodes
    pub rated_count: usize,
    /// Total number of episodes, rated or not
    pub episode_count: usize,
    /// Season with the highest average rating
    pub best_season: Option<u32>,
    /// Season with the lowest average rating
    pub worst_season: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_ref_path() {
        let season = SeasonRef::new("tt0903747", 3);
        assert_eq!(season.number, 3);
        assert_eq!(season.path, "/title/tt0903747/episodes/?season=3");
    }

    #[test]
    fn test_episode_code() {
        let episode = Episode {
            season_number: 1,
            episode_number: 5,
            title: "Gray Matter".to_string(),
            rating: Some(8.3),
            vote_count: Some(12000),
        };
        assert_eq!(episode.code(), "S01E05");

        let late = Episode {
            season_number: 12,
            episode_number: 103,
            title: "Late".to_string(),
            rating: None,
            vote_count: None,
        };
        assert_eq!(late.code(), "S12E103");
    }

    #[test]
    fn test_episode_serialization_roundtrip() {
        let episode = Episode {
            season_number: 2,
            episode_number: 1,
            title: "Seven Thirty-Seven".to_string(),
            rating: Some(8.7),
            vote_count: None,
        };

        let json = serde_json::to_string(&episode).unwrap();
        let back: Episode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, episode);
    }

    #[test]
    fn test_unrated_episode_keeps_none() {
        let json = r#"{"season_number":1,"episode_number":1,"title":"Pilot","rating":null,"vote_count":null}"#;
        let episode: Episode = serde_json::from_str(json).unwrap();
        assert_eq!(episode.rating, None);
        assert_eq!(episode.vote_count, None);
    }
}
