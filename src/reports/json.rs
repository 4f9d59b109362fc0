use crate::models::Statistics;
use anyhow::{Context, Result};

pub fn render_json(stats: &Statistics) -> Result<String> {
    serde_json::to_string_pretty(stats).context("Failed to serialize statistics")
}
