//! HTML report renderer
//!
//! Renders a [`ReportModel`] into a single standalone HTML document with
//! inlined styling. The output needs no other files alongside it.

use crate::report::{EpisodeCell, RatingBand, ReportModel, SeasonGrid};
use crate::types::{EpisodeRef, SeasonStats};

const STYLE: &str = "\
body { margin: 0; padding: 2rem; background: #0d1117; color: #e6edf3; font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; }
header { display: flex; align-items: center; gap: 1.5rem; margin-bottom: 1.5rem; }
header img { width: 92px; border-radius: 6px; }
h1 { margin: 0; font-size: 1.6rem; }
.sub { color: #8b949e; margin: 0.3rem 0 0; }
.summary { display: flex; flex-wrap: wrap; gap: 0.8rem; margin-bottom: 1.5rem; }
.stat { background: #161b22; border: 1px solid #30363d; border-radius: 6px; padding: 0.6rem 0.9rem; }
.stat .label { display: block; color: #8b949e; font-size: 0.75rem; text-transform: uppercase; }
.stat .value { font-size: 1.05rem; }
.no-data { color: #8b949e; font-style: italic; }
table { border-collapse: separate; border-spacing: 3px; }
th { color: #8b949e; font-size: 0.75rem; font-weight: normal; text-align: center; }
tbody th { text-align: right; padding-right: 0.5rem; }
td.cell { width: 34px; height: 34px; text-align: center; font-size: 0.75rem; border-radius: 4px; }
td.avg { color: #8b949e; font-size: 0.8rem; padding-left: 0.6rem; }
footer { margin-top: 1.5rem; color: #8b949e; font-size: 0.8rem; }
";

/// Render the report as a standalone HTML document.
pub fn render(report: &ReportModel) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!(
        "<title>{} - Episode Ratings</title>\n",
        escape_html(&report.show.title)
    ));
    out.push_str("<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");

    render_header(&mut out, report);
    render_summary(&mut out, report);
    render_heatmap(&mut out, report);

    out.push_str(&format!(
        "<footer>Episode ratings for {} ({})</footer>\n",
        escape_html(&report.show.title),
        escape_html(&report.show.imdb_id)
    ));
    out.push_str("</body>\n</html>\n");

    out
}

fn render_header(out: &mut String, report: &ReportModel) {
    out.push_str("<header>\n");
    if let Some(poster) = &report.show.poster_url {
        out.push_str(&format!(
            "  <img src=\"{}\" alt=\"Poster\">\n",
            escape_html(poster)
        ));
    }
    out.push_str("  <div>\n");
    out.push_str(&format!("    <h1>{}</h1>\n", escape_html(&report.show.title)));
    out.push_str(&format!(
        "    <p class=\"sub\">{} season(s) &middot; {} episode(s)</p>\n",
        report.seasons.len(),
        report.overall.episode_count
    ));
    out.push_str("  </div>\n</header>\n");
}

fn render_summary(out: &mut String, report: &ReportModel) {
    out.push_str("<section class=\"summary\">\n");

    if !report.has_ratings() {
        out.push_str("  <p class=\"no-data\">No ratings available</p>\n</section>\n");
        return;
    }

    if let Some(average) = report.overall.average {
        push_stat(out, "Overall average", &format!("{:.2} / 10", average));
    }
    if let Some(best) = &report.overall.best {
        push_stat(out, "Highest rated", &episode_stat(best));
    }
    if let Some(worst) = &report.overall.worst {
        push_stat(out, "Lowest rated", &episode_stat(worst));
    }
    if let Some(season) = report.overall.best_season {
        push_stat(out, "Best season", &format!("Season {}", season));
    }
    if let Some(season) = report.overall.worst_season {
        push_stat(out, "Worst season", &format!("Season {}", season));
    }
    push_stat(
        out,
        "Rated episodes",
        &format!(
            "{} of {}",
            report.overall.rated_count, report.overall.episode_count
        ),
    );

    out.push_str("</section>\n");
}

fn render_heatmap(out: &mut String, report: &ReportModel) {
    out.push_str("<section class=\"heatmap\">\n");

    if report.seasons.is_empty() {
        out.push_str("  <p class=\"no-data\">No episode data found</p>\n</section>\n");
        return;
    }

    out.push_str("<table>\n  <thead>\n    <tr><th></th>");
    for column in 1..=report.max_episodes {
        out.push_str(&format!("<th>{}</th>", column));
    }
    out.push_str("<th>Avg</th></tr>\n  </thead>\n  <tbody>\n");

    for grid in &report.seasons {
        let stats = report
            .season_stats
            .iter()
            .find(|s| s.season_number == grid.season.number);
        render_season_row(out, grid, stats);
    }

    out.push_str("  </tbody>\n</table>\n</section>\n");
}

fn render_season_row(out: &mut String, grid: &SeasonGrid, stats: Option<&SeasonStats>) {
    out.push_str(&format!("    <tr><th>S{}</th>", grid.season.number));

    for cell in &grid.episodes {
        let label = match cell.episode.rating {
            Some(rating) => format!("{:.1}", rating),
            None => "&middot;".to_string(),
        };
        out.push_str(&format!(
            "<td class=\"cell\" style=\"background:{};color:{};\" title=\"{}\">{}</td>",
            cell.band.color(),
            cell_text_color(cell.band),
            escape_html(&cell_tooltip(cell)),
            label
        ));
    }

    match stats.and_then(|s| s.average) {
        Some(average) => out.push_str(&format!("<td class=\"avg\">{:.2}</td>", average)),
        None => out.push_str("<td class=\"avg\">&middot;</td>"),
    }
    out.push_str("</tr>\n");
}

fn cell_tooltip(cell: &EpisodeCell) -> String {
    let mut tooltip = format!("{} \u{00b7} {}", cell.episode.code(), cell.episode.title);

    match cell.episode.rating {
        Some(rating) => {
            tooltip.push_str(&format!(" \u{00b7} {:.1}", rating));
            if let Some(votes) = cell.episode.vote_count {
                tooltip.push_str(&format!(" ({} votes)", group_thousands(votes)));
            }
        }
        None => tooltip.push_str(" \u{00b7} unrated"),
    }

    tooltip
}

/// Dark text on the light band, light text everywhere else.
fn cell_text_color(band: RatingBand) -> &'static str {
    match band {
        RatingBand::LightGreen => "#0d1117",
        _ => "#e6edf3",
    }
}

fn push_stat(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!(
        "  <div class=\"stat\"><span class=\"label\">{}</span><span class=\"value\">{}</span></div>\n",
        escape_html(label),
        escape_html(value)
    ));
}

fn episode_stat(episode: &EpisodeRef) -> String {
    format!(
        "{} \u{00b7} {} ({:.1})",
        format_code(episode),
        episode.title,
        episode.rating
    )
}

fn format_code(episode: &EpisodeRef) -> String {
    format!("S{:02}E{:02}", episode.season_number, episode.episode_number)
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::new();

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
