use super::ReportContext;
use crate::models::Statistics;
use anyhow::{Context, Result};
use askama::Template;

/// Renders `templates/report.html`. Values are HTML-escaped by askama.
#[derive(Template)]
#[template(path = "report.html")]
struct HtmlReport<'a> {
    stats: &'a Statistics,
    context: &'a ReportContext,
}

pub fn render_html(stats: &Statistics, context: &ReportContext) -> Result<String> {
    HtmlReport { stats, context }
        .render()
        .context("Failed to render HTML report")
}
