//! Season page parser
//!
//! Parses one season's episode listing into [`Episode`] records. JSON-LD is
//! the primary source; the selector rules in [`shape`](super::shape) are the
//! fallback. Episode numbers are always read from the page's own numbering,
//! never inferred from list position, because IMDB occasionally omits or
//! renumbers entries.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::error::{Result, ScrapeError};
use crate::types::Episode;

use super::json_ld::{extract_json_ld, value_as_f64, value_as_u64};
use super::shape::{self, PageShape};

/// Parse the episode list from a season page.
///
/// Unrated episodes are kept with `rating: None`; an episode missing a
/// rating or vote count is still a real episode.
///
/// # Errors
/// `ScrapeError::ElementNotFound` only when the page carries neither
/// JSON-LD episode data nor any known episode container.
pub fn parse_episodes(html: &str, season_number: u32) -> Result<Vec<Episode>> {
    parse_episodes_with(&shape::CURRENT, html, season_number)
}

/// Parse a season page with an explicit selector rule set.
pub fn parse_episodes_with(
    page_shape: &PageShape,
    html: &str,
    season_number: u32,
) -> Result<Vec<Episode>> {
    let document = Html::parse_document(html);

    if let Some(json_ld) = extract_json_ld(&document) {
        if let Some(episodes) = episodes_from_json_ld(&json_ld, season_number) {
            return Ok(sort_and_dedup(episodes));
        }
    }

    episodes_from_markup(&document, page_shape, season_number).map(sort_and_dedup)
}

/// Read episodes from the JSON-LD `episode` array.
///
/// Returns None when the block has no `episode` array at all, so the caller
/// can fall back to markup extraction. Entries without a page-provided
/// episode number are dropped.
fn episodes_from_json_ld(value: &Value, season_number: u32) -> Option<Vec<Episode>> {
    let entries = value.get("episode")?.as_array()?;
    let mut episodes = Vec::new();

    for entry in entries {
        let Some(number) = entry.get("episodeNumber").and_then(value_as_u64) else {
            continue;
        };
        let Ok(episode_number) = u32::try_from(number) else {
            continue;
        };
        if episode_number == 0 {
            continue;
        }

        let title = entry
            .get("name")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("Episode {}", episode_number));

        let aggregate = entry.get("aggregateRating");
        let rating = aggregate
            .and_then(|a| a.get("ratingValue"))
            .and_then(value_as_f64)
            .filter(|r| (0.0..=10.0).contains(r));
        let vote_count = aggregate
            .and_then(|a| a.get("ratingCount"))
            .and_then(value_as_u64)
            .and_then(|c| u32::try_from(c).ok());

        episodes.push(Episode {
            season_number,
            episode_number,
            title,
            rating,
            vote_count,
        });
    }

    Some(episodes)
}

/// Fallback extraction over episode item containers.
fn episodes_from_markup(
    document: &Html,
    page_shape: &PageShape,
    season_number: u32,
) -> Result<Vec<Episode>> {
    for selector_str in page_shape.episode_items {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        let items: Vec<ElementRef> = document.select(&selector).collect();
        if items.is_empty() {
            continue;
        }

        let episodes = items
            .iter()
            .filter_map(|item| parse_episode_item(item, page_shape, season_number))
            .collect();
        return Ok(episodes);
    }

    Err(ScrapeError::ElementNotFound("episode list".to_string()))
}

/// Parse a single episode container. Returns None when the container does
/// not carry its own episode number.
fn parse_episode_item(
    item: &ElementRef,
    page_shape: &PageShape,
    season_number: u32,
) -> Option<Episode> {
    let heading_text = Selector::parse(page_shape.episode_heading)
        .ok()
        .and_then(|sel| item.select(&sel).next())
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let episode_number = episode_number_from_heading(&heading_text)?;

    let title = select_first_text(item, page_shape.episode_title)
        .or_else(|| title_from_heading(&heading_text))
        .unwrap_or_else(|| format!("Episode {}", episode_number));

    let rating = select_first_text(item, page_shape.episode_rating)
        .as_deref()
        .and_then(parse_rating);

    let vote_count = select_first_text(item, page_shape.episode_votes)
        .as_deref()
        .and_then(parse_vote_count);

    Some(Episode {
        season_number,
        episode_number,
        title,
        rating,
        vote_count,
    })
}

/// Parse a displayed rating token as a 0.0 - 10.0 value.
///
/// # Examples
/// ```
/// use heatmap_core::parser::parse_rating;
///
/// assert_eq!(parse_rating("8.3"), Some(8.3));
/// assert_eq!(parse_rating("8.3/10"), Some(8.3));
/// assert_eq!(parse_rating("no rating"), None);
/// ```
pub fn parse_rating(text: &str) -> Option<f64> {
    let re = regex_lite::Regex::new(r"(\d{1,2}(?:\.\d+)?)").ok()?;
    let caps = re.captures(text)?;
    let rating: f64 = caps.get(1)?.as_str().parse().ok()?;

    if (0.0..=10.0).contains(&rating) {
        Some(rating)
    } else {
        None
    }
}

/// Parse a displayed vote count, tolerating comma grouping and K/M suffixes.
///
/// # Examples
/// ```
/// use heatmap_core::parser::parse_vote_count;
///
/// assert_eq!(parse_vote_count("(1,234)"), Some(1234));
/// assert_eq!(parse_vote_count("(2.1K)"), Some(2100));
/// assert_eq!(parse_vote_count(""), None);
/// ```
pub fn parse_vote_count(text: &str) -> Option<u32> {
    let re = regex_lite::Regex::new(r"(\d[\d.,]*)\s*([KkMm])?").ok()?;
    let caps = re.captures(text)?;

    let number: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
    let scale = match caps.get(2).map(|m| m.as_str()) {
        Some("K") | Some("k") => 1_000.0,
        Some("M") | Some("m") => 1_000_000.0,
        _ => 1.0,
    };

    let count = number * scale;
    if (0.0..=u32::MAX as f64).contains(&count) {
        Some(count.round() as u32)
    } else {
        None
    }
}

/// Read the episode number from heading text like "S1.E5 ∙ Title".
fn episode_number_from_heading(text: &str) -> Option<u32> {
    let re = regex_lite::Regex::new(r"E(\d+)").ok()?;
    let caps = re.captures(text)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Read the title from heading text, stripping the "S1.E5 ∙ " prefix.
fn title_from_heading(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let re = regex_lite::Regex::new(r"[ES]\d+\.?[ES]?\d*\s*[∙·]\s*(.+)").ok()?;
    let title = match re.captures(trimmed) {
        Some(caps) => caps.get(1)?.as_str().trim().to_string(),
        None => trimmed.to_string(),
    };

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Return the first non-empty text content matched by the selector list.
fn select_first_text(item: &ElementRef, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(el) = item.select(&selector).next() {
                let text = el.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }

    None
}

/// Sort by episode number and drop duplicates, keeping the first occurrence.
fn sort_and_dedup(mut episodes: Vec<Episode>) -> Vec<Episode> {
    episodes.sort_by_key(|e| e.episode_number);
    episodes.dedup_by_key(|e| e.episode_number);
    episodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_ld_page(episodes: &str) -> String {
        format!(
            r#"<html><head>
            <script type="application/ld+json">{{"@type":"TVSeason","episode":[{}]}}</script>
            </head><body></body></html>"#,
            episodes
        )
    }

    #[test]
    fn test_parse_episodes_from_json_ld() {
        let html = json_ld_page(
            r#"{"episodeNumber":2,"name":"Cat's in the Bag...","aggregateRating":{"ratingValue":8.6,"ratingCount":1200}},
               {"episodeNumber":1,"name":"Pilot","aggregateRating":{"ratingValue":9.0,"ratingCount":2400}}"#,
        );

        let episodes = parse_episodes(&html, 1).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].episode_number, 1);
        assert_eq!(episodes[0].title, "Pilot");
        assert_eq!(episodes[0].rating, Some(9.0));
        assert_eq!(episodes[0].vote_count, Some(2400));
        assert_eq!(episodes[1].episode_number, 2);
        assert_eq!(episodes[1].season_number, 1);
    }

    #[test]
    fn test_unrated_episode_is_kept() {
        let html = json_ld_page(r#"{"episodeNumber":1,"name":"Unaired"}"#);

        let episodes = parse_episodes(&html, 3).unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].rating, None);
        assert_eq!(episodes[0].vote_count, None);
    }

    #[test]
    fn test_json_ld_numeric_strings() {
        let html = json_ld_page(
            r#"{"episodeNumber":"4","name":"Four","aggregateRating":{"ratingValue":"7.9","ratingCount":"321"}}"#,
        );

        let episodes = parse_episodes(&html, 1).unwrap();
        assert_eq!(episodes[0].episode_number, 4);
        assert_eq!(episodes[0].rating, Some(7.9));
        assert_eq!(episodes[0].vote_count, Some(321));
    }

    #[test]
    fn test_json_ld_entry_without_number_is_dropped() {
        let html = json_ld_page(
            r#"{"name":"No number"},{"episodeNumber":2,"name":"Two"}"#,
        );

        let episodes = parse_episodes(&html, 1).unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].episode_number, 2);
    }

    #[test]
    fn test_json_ld_missing_title_gets_placeholder() {
        let html = json_ld_page(r#"{"episodeNumber":7}"#);

        let episodes = parse_episodes(&html, 1).unwrap();
        assert_eq!(episodes[0].title, "Episode 7");
    }

    #[test]
    fn test_parse_episodes_markup_fallback() {
        let html = r#"
            <html><body>
                <article class="episode-item-wrapper">
                    <div class="ipc-title__text">S1.E1 ∙ Pilot</div>
                    <a data-testid="episode-title-link" href="/title/tt100/">Pilot</a>
                    <span class="ipc-rating-star--rating">8.3</span>
                    <span class="ipc-rating-star--voteCount">(1,234)</span>
                </article>
                <article class="episode-item-wrapper">
                    <div class="ipc-title__text">S1.E2 ∙ The Second One</div>
                    <a data-testid="episode-title-link" href="/title/tt101/">The Second One</a>
                </article>
            </body></html>
        "#;

        let episodes = parse_episodes(html, 1).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].episode_number, 1);
        assert_eq!(episodes[0].title, "Pilot");
        assert_eq!(episodes[0].rating, Some(8.3));
        assert_eq!(episodes[0].vote_count, Some(1234));
        assert_eq!(episodes[1].rating, None);
    }

    #[test]
    fn test_markup_title_from_heading_prefix() {
        let html = r#"
            <html><body>
                <article class="episode-item-wrapper">
                    <div class="ipc-title__text">S2.E3 ∙ Down</div>
                </article>
            </body></html>
        "#;

        let episodes = parse_episodes(html, 2).unwrap();
        assert_eq!(episodes[0].title, "Down");
        assert_eq!(episodes[0].episode_number, 3);
    }

    #[test]
    fn test_markup_item_without_own_number_is_dropped() {
        let html = r#"
            <html><body>
                <article class="episode-item-wrapper">
                    <div class="ipc-title__text">S1.E1 ∙ Pilot</div>
                </article>
                <article class="episode-item-wrapper">
                    <div class="ipc-title__text">Special without numbering</div>
                </article>
            </body></html>
        "#;

        let episodes = parse_episodes(html, 1).unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].episode_number, 1);
    }

    #[test]
    fn test_duplicate_episode_numbers_keep_first() {
        let html = json_ld_page(
            r#"{"episodeNumber":1,"name":"First"},{"episodeNumber":1,"name":"Duplicate"}"#,
        );

        let episodes = parse_episodes(&html, 1).unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].title, "First");
    }

    #[test]
    fn test_unrecognizable_page_is_error() {
        let result = parse_episodes("<html><body><p>nothing here</p></body></html>", 1);
        assert!(matches!(result, Err(ScrapeError::ElementNotFound(_))));
    }

    #[test]
    fn test_json_ld_with_empty_episode_array() {
        let html = json_ld_page("");
        let episodes = parse_episodes(&html, 1).unwrap();
        assert!(episodes.is_empty());
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("8.3"), Some(8.3));
        assert_eq!(parse_rating("10"), Some(10.0));
        assert_eq!(parse_rating("0"), Some(0.0));
        assert_eq!(parse_rating("8.3/10"), Some(8.3));
        assert_eq!(parse_rating("15"), None); // out of range
        assert_eq!(parse_rating("no rating"), None);
        assert_eq!(parse_rating(""), None);
    }

    #[test]
    fn test_parse_vote_count() {
        assert_eq!(parse_vote_count("(1,234)"), Some(1234));
        assert_eq!(parse_vote_count("123"), Some(123));
        assert_eq!(parse_vote_count("(2.1K)"), Some(2100));
        assert_eq!(parse_vote_count("1M"), Some(1_000_000));
        assert_eq!(parse_vote_count("votes"), None);
        assert_eq!(parse_vote_count(""), None);
    }

    #[test]
    fn test_episode_number_from_heading() {
        assert_eq!(episode_number_from_heading("S1.E5 ∙ Title"), Some(5));
        assert_eq!(episode_number_from_heading("S10.E103 ∙ Title"), Some(103));
        assert_eq!(episode_number_from_heading("no numbering"), None);
    }

    #[test]
    fn test_title_from_heading() {
        assert_eq!(
            title_from_heading("S1.E5 ∙ Gray Matter"),
            Some("Gray Matter".to_string())
        );
        assert_eq!(
            title_from_heading("Plain Title"),
            Some("Plain Title".to_string())
        );
        assert_eq!(title_from_heading("   "), None);
    }
}
