//! Error types for the IMDB heatmap pipeline
//!
//! Fetch-boundary failures (network, 404, rate limiting) and structural
//! extraction failures are separate variants so callers can report them
//! differently.

use thiserror::Error;

/// Error type for scraping and report-building operations
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Requested page was not found (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Rate limited by the server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Page structure did not match any known layout
    #[error("Failed to extract data: {0}")]
    Extraction(String),

    /// Required HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The input URL does not contain an IMDB title id
    #[error("Invalid IMDB URL: {0}")]
    InvalidUrl(String),

    /// The show exposed no seasons or no episodes at all
    #[error("No episode data found")]
    EmptyData,
}

impl ScrapeError {
    /// Whether this error originated at the fetch boundary rather than
    /// during extraction.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ScrapeError::Http(_) | ScrapeError::NotFound(_) | ScrapeError::RateLimited
        )
    }
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_error_display_extraction() {
        let error = ScrapeError::Extraction("invalid HTML".to_string());
        assert_eq!(error.to_string(), "Failed to extract data: invalid HTML");
    }

    #[test]
    fn test_scrape_error_display_element_not_found() {
        let error = ScrapeError::ElementNotFound("show title".to_string());
        assert_eq!(error.to_string(), "Element not found: show title");
    }

    #[test]
    fn test_scrape_error_display_invalid_url() {
        let error = ScrapeError::InvalidUrl("not-a-url".to_string());
        assert_eq!(error.to_string(), "Invalid IMDB URL: not-a-url");
    }

    #[test]
    fn test_scrape_error_display_rate_limited() {
        let error = ScrapeError::RateLimited;
        assert_eq!(error.to_string(), "Rate limited - too many requests");
    }

    #[test]
    fn test_scrape_error_display_not_found() {
        let error = ScrapeError::NotFound("/title/tt0000000/".to_string());
        assert_eq!(error.to_string(), "Page not found: /title/tt0000000/");
    }

    #[test]
    fn test_scrape_error_display_empty_data() {
        let error = ScrapeError::EmptyData;
        assert_eq!(error.to_string(), "No episode data found");
    }

    #[test]
    fn test_fetch_error_classification() {
        assert!(ScrapeError::NotFound("x".to_string()).is_fetch_error());
        assert!(ScrapeError::RateLimited.is_fetch_error());
        assert!(!ScrapeError::Extraction("x".to_string()).is_fetch_error());
        assert!(!ScrapeError::ElementNotFound("x".to_string()).is_fetch_error());
        assert!(!ScrapeError::InvalidUrl("x".to_string()).is_fetch_error());
        assert!(!ScrapeError::EmptyData.is_fetch_error());
    }
}
