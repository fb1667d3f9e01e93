//! Rating aggregation
//!
//! Derives per-season and overall statistics from extracted episode
//! records. Unrated episodes never contribute to averages or best/worst
//! selection. Best/worst ties resolve to the lowest season number, then
//! the lowest episode number, so results are deterministic.

use std::collections::BTreeMap;

use crate::types::{Episode, EpisodeRef, OverallStats, SeasonStats};

/// Compute the rating average for one season.
///
/// The average is absent (not zero) when the season has no rated episodes.
pub fn compute_season_stats(season_number: u32, episodes: &[Episode]) -> SeasonStats {
    let ratings: Vec<f64> = episodes.iter().filter_map(|e| e.rating).collect();

    SeasonStats {
        season_number,
        average: mean(&ratings),
        rated_count: ratings.len(),
    }
}

/// Compute show-wide statistics over all episodes of all seasons.
///
/// The overall average is the mean over every rated episode, not a mean of
/// per-season averages, so seasons with more episodes weigh more. On an
/// all-unrated dataset every optional field is absent.
pub fn compute_overall_stats(episodes: &[Episode]) -> OverallStats {
    let mut best: Option<EpisodeRef> = None;
    let mut worst: Option<EpisodeRef> = None;
    let mut sum = 0.0;
    let mut rated_count = 0usize;
    let mut by_season: BTreeMap<u32, Vec<f64>> = BTreeMap::new();

    for episode in episodes {
        let Some(rating) = episode.rating else {
            continue;
        };

        sum += rating;
        rated_count += 1;
        by_season
            .entry(episode.season_number)
            .or_default()
            .push(rating);

        let candidate = EpisodeRef {
            season_number: episode.season_number,
            episode_number: episode.episode_number,
            title: episode.title.clone(),
            rating,
        };

        best = Some(match best.take() {
            Some(current) if !beats(&candidate, &current, Extreme::Best) => current,
            _ => candidate.clone(),
        });
        worst = Some(match worst.take() {
            Some(current) if !beats(&candidate, &current, Extreme::Worst) => current,
            _ => candidate,
        });
    }

    let average = if rated_count > 0 {
        Some(sum / rated_count as f64)
    } else {
        None
    };

    let (best_season, worst_season) = season_extremes(&by_season);

    OverallStats {
        best,
        worst,
        average,
        rated_count,
        episode_count: episodes.len(),
        best_season,
        worst_season,
    }
}

enum Extreme {
    Best,
    Worst,
}

/// Whether `candidate` replaces `current` under the deterministic tie-break
/// (lowest season number, then lowest episode number).
fn beats(candidate: &EpisodeRef, current: &EpisodeRef, extreme: Extreme) -> bool {
    let stronger = match extreme {
        Extreme::Best => candidate.rating > current.rating,
        Extreme::Worst => candidate.rating < current.rating,
    };

    stronger
        || (candidate.rating == current.rating
            && (candidate.season_number, candidate.episode_number)
                < (current.season_number, current.episode_number))
}

/// Seasons with the highest and lowest average rating. Iteration is in
/// ascending season order, so ties keep the lowest season number.
fn season_extremes(by_season: &BTreeMap<u32, Vec<f64>>) -> (Option<u32>, Option<u32>) {
    let mut best: Option<(u32, f64)> = None;
    let mut worst: Option<(u32, f64)> = None;

    for (&season, ratings) in by_season {
        let Some(average) = mean(ratings) else {
            continue;
        };

        if best.is_none_or(|(_, a)| average > a) {
            best = Some((season, average));
        }
        if worst.is_none_or(|(_, a)| average < a) {
            worst = Some((season, average));
        }
    }

    (best.map(|(s, _)| s), worst.map(|(s, _)| s))
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
