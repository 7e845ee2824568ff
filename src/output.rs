use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Cartoon of the day. Every field is present; misses are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartoonRecord {
    pub title: String,
    pub image_url: String,
    pub cartoonist: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    pub title: String,
    pub image_url: String,
    pub category: String,
    pub author: String,
}

/// The output document: exactly two top-level keys.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub cartoon: CartoonRecord,
    pub entertainment_articles: Vec<ArticleRecord>,
}

pub fn render(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

/// Overwrite `path` with the rendered report and return the rendered text.
pub fn write_report(path: &Path, report: &Report) -> Result<String> {
    let json = render(report)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    std::fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(json)
}
