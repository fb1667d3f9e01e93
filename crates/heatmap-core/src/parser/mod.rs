//! HTML parsers for IMDB pages
//!
//! This module contains parsers for extracting data from IMDB HTML pages:
//! - `show`: Parse the main title page (metadata + season list)
//! - `episodes`: Parse a season's episode listing
//! - `json_ld`: Shared JSON-LD extraction helpers
//! - `shape`: Named selector rule sets, one table per page layout version

pub mod episodes;
pub mod json_ld;
pub mod shape;
pub mod show;

// Re-export main parsing functions
pub use episodes::{parse_episodes, parse_episodes_with, parse_rating, parse_vote_count};
pub use json_ld::extract_json_ld;
pub use shape::PageShape;
pub use show::{extract_imdb_id, parse_season_links, parse_show, parse_show_with};
