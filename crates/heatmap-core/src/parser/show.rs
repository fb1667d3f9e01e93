//! Show page parser
//!
//! Extracts show metadata (title, poster) and the season list from the
//! main title page. JSON-LD is the primary source; the selector rules in
//! [`shape`](super::shape) are the fallback.

use std::collections::BTreeSet;

use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::{Result, ScrapeError};
use crate::types::{SeasonRef, ShowMetadata};

use super::json_ld::{extract_json_ld, value_as_u64};
use super::shape::{self, PageShape};

/// Extract the IMDB title id from a URL.
///
/// # Examples
/// ```
/// use heatmap_core::parser::extract_imdb_id;
///
/// assert_eq!(
///     extract_imdb_id("https://www.imdb.com/title/tt0903747/"),
///     Some("tt0903747".to_string())
/// );
/// assert_eq!(extract_imdb_id("https://example.com/"), None);
/// ```
pub fn extract_imdb_id(url: &str) -> Option<String> {
    let re = regex_lite::Regex::new(r"tt\d+").ok()?;
    re.find(url).map(|m| m.as_str().to_string())
}

/// Parse show metadata and the season list from the main title page.
///
/// # Errors
/// `ScrapeError::ElementNotFound` when no title can be located; a page
/// without a recognizable title is not a show page.
pub fn parse_show(html: &str, imdb_id: &str) -> Result<(ShowMetadata, Vec<SeasonRef>)> {
    parse_show_with(&shape::CURRENT, html, imdb_id)
}

/// Parse the show page with an explicit selector rule set.
pub fn parse_show_with(
    page_shape: &PageShape,
    html: &str,
    imdb_id: &str,
) -> Result<(ShowMetadata, Vec<SeasonRef>)> {
    let document = Html::parse_document(html);
    let json_ld = extract_json_ld(&document);

    let title = json_ld
        .as_ref()
        .and_then(|v| v.get("name"))
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| select_first_text(&document, page_shape.show_title))
        .ok_or_else(|| ScrapeError::ElementNotFound("show title".to_string()))?;

    let poster_url = select_first_attr(&document, page_shape.show_poster, "src")
        .or_else(|| json_ld.as_ref().and_then(poster_from_json_ld));

    let seasons = match json_ld.as_ref().and_then(season_count_from_json_ld) {
        Some(count) => (1..=count).map(|n| SeasonRef::new(imdb_id, n)).collect(),
        None => season_refs_from_links(&document, page_shape, imdb_id),
    };

    let metadata = ShowMetadata {
        imdb_id: imdb_id.to_string(),
        title,
        poster_url,
    };

    Ok((metadata, seasons))
}

/// Parse season links from any page carrying a season selector.
///
/// Used as a secondary source when the main page's JSON-LD omits the season
/// count; the episodes overview page always carries the selector.
pub fn parse_season_links(html: &str, imdb_id: &str) -> Vec<SeasonRef> {
    let document = Html::parse_document(html);
    season_refs_from_links(&document, &shape::CURRENT, imdb_id)
}

/// Read the season count from JSON-LD, either directly or via partOfSeries.
fn season_count_from_json_ld(value: &Value) -> Option<u32> {
    let count = value
        .get("numberOfSeasons")
        .or_else(|| value.get("partOfSeries").and_then(|s| s.get("numberOfSeasons")))
        .and_then(value_as_u64)?;

    if count > 0 {
        u32::try_from(count).ok()
    } else {
        None
    }
}

/// Read the poster URL from JSON-LD; `image` is a string or an ImageObject.
fn poster_from_json_ld(value: &Value) -> Option<String> {
    match value.get("image")? {
        Value::String(url) => Some(url.clone()),
        Value::Object(obj) => obj.get("url").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Enumerate seasons from `episodes?season=` links, deduplicated ascending.
fn season_refs_from_links(
    document: &Html,
    page_shape: &PageShape,
    imdb_id: &str,
) -> Vec<SeasonRef> {
    let mut numbers = BTreeSet::new();

    if let Ok(selector) = Selector::parse(page_shape.season_links) {
        let re = regex_lite::Regex::new(r"season=(\d+)").unwrap();
        for link in document.select(&selector) {
            let href = link.value().attr("href").unwrap_or_default();
            if let Some(caps) = re.captures(href) {
                if let Ok(number) = caps[1].parse::<u32>() {
                    if number > 0 {
                        numbers.insert(number);
                    }
                }
            }
        }
    }

    numbers
        .into_iter()
        .map(|n| SeasonRef::new(imdb_id, n))
        .collect()
}

/// Return the first non-empty text content matched by the selector list.
fn select_first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(el) = document.select(&selector).next() {
                let text = el.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }

    None
}

/// Return the first non-empty attribute value matched by the selector list.
fn select_first_attr(document: &Html, selectors: &[&str], attr: &str) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(el) = document.select(&selector).next() {
                if let Some(value) = el.value().attr(attr) {
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
    }

    None
}
