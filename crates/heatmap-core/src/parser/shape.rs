//! Named extraction rules for the IMDB page layout
//!
//! All CSS selectors the extractors depend on are collected here. When IMDB
//! changes its markup, this table is the only place that needs updating.
//! Each list is tried in order; the first selector that matches wins.

/// Selector rule set for one version of the IMDB page layout
#[derive(Debug, Clone, Copy)]
pub struct PageShape {
    /// Show title on the main title page
    pub show_title: &'static [&'static str],
    /// Poster image on the main title page
    pub show_poster: &'static [&'static str],
    /// Links carrying a `season=` query parameter
    pub season_links: &'static str,
    /// Per-episode containers on a season page
    pub episode_items: &'static [&'static str],
    /// Episode title link inside an episode container
    pub episode_title: &'static [&'static str],
    /// Heading carrying the "S1.E1" numbering inside an episode container
    pub episode_heading: &'static str,
    /// Rating value inside an episode container
    pub episode_rating: &'static [&'static str],
    /// Vote count inside an episode container
    pub episode_votes: &'static [&'static str],
}

/// Rule set for the IMDB layout as of late 2024
pub const CURRENT: PageShape = PageShape {
    show_title: &[r#"h1[data-testid="hero__pageTitle"] span"#, "h1"],
    show_poster: &[
        "img.ipc-image[srcset]",
        r#"div[data-testid="hero-media__poster"] img"#,
    ],
    season_links: r#"a[href*="episodes?season="], a[href*="episodes/?season="]"#,
    episode_items: &[
        "article.episode-item-wrapper",
        "div.list_item",
        r#"[data-testid="episodes-container"] > div"#,
    ],
    episode_title: &[
        r#"a[data-testid="episode-title-link"]"#,
        r#"a[itemprop="name"]"#,
        "strong a",
        r#"a[href*="/title/tt"]"#,
    ],
    episode_heading: "div.ipc-title__text",
    episode_rating: &[
        "span.ipc-rating-star--rating",
        "span.ipc-rating-star",
        ".ratingValue span",
        r#"[data-testid="ratingGroup--imdb-rating"]"#,
    ],
    episode_votes: &[
        "span.ipc-rating-star--voteCount",
        ".ipc-rating-star-group .voteCount",
    ],
};
