//! IMDB Episode Rating Heatmap - Core Library
//!
//! This crate fetches a show's IMDB pages, extracts per-episode ratings,
//! derives summary statistics, and renders a standalone HTML heatmap
//! report.
//!
//! # Pipeline
//! raw markup -> episode records -> derived statistics -> render-ready
//! report -> HTML
//!
//! # Features
//! - Rate-limited HTTP client with retry to avoid server overload
//! - JSON-LD-first extraction with CSS selector fallback
//! - Per-season and overall rating statistics with deterministic tie-breaks
//! - Self-contained HTML heatmap output

pub mod client;
pub mod error;
pub mod parser;
pub mod render;
pub mod report;
pub mod scraper;
pub mod stats;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, ImdbClient, RateLimiter};
pub use error::{Result, ScrapeError};
pub use render::render;
pub use report::{build_report, EpisodeCell, RatingBand, ReportModel, SeasonGrid};
pub use scraper::ImdbScraper;
pub use stats::{compute_overall_stats, compute_season_stats};
pub use types::{Episode, EpisodeRef, OverallStats, SeasonRef, SeasonStats, ShowMetadata};
