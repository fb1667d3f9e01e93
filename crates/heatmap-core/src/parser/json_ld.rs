//! JSON-LD extraction helpers
//!
//! IMDB embeds structured data in a `<script type="application/ld+json">`
//! block on show and season pages. That block is the primary extraction
//! source; CSS selectors are the fallback.

use scraper::{Html, Selector};
use serde_json::Value;

/// Extract the first parseable JSON-LD block from a page.
pub fn extract_json_ld(document: &Html) -> Option<Value> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;

    for script in document.select(&selector) {
        let text: String = script.text().collect();
        if let Ok(value) = serde_json::from_str::<Value>(&text) {
            return Some(value);
        }
    }

    None
}

/// Read a JSON value as f64, tolerating numeric strings ("8.3").
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a JSON value as u64, tolerating numeric strings ("12").
pub fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
