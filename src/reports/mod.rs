mod html;
mod json;

use crate::models::Statistics;
use crate::utils::config::Config;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use html::render_html;
pub use json::render_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Html,
    Json,
}

impl ReportFormat {
    /// `.json` outputs get JSON, everything else HTML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Html,
        }
    }
}

/// What a report says about the run besides the statistics themselves.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub repository: String,
    pub contributor: String,
    pub start_date: String,
    pub end_date: String,
}

impl ReportContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            repository: format!("{}/{}", config.owner, config.repo),
            contributor: config.contributor.clone(),
            start_date: config.window.start_date(),
            end_date: config.window.end_date(),
        }
    }
}

pub fn render(stats: &Statistics, context: &ReportContext, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Html => render_html(stats, context),
        ReportFormat::Json => render_json(stats),
    }
}

pub fn write_report(
    stats: &Statistics,
    context: &ReportContext,
    format: ReportFormat,
    path: &Path,
) -> Result<()> {
    let rendered = render(stats, context, format)?;
    std::fs::write(path, rendered)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}
