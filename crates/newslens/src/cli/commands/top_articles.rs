use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use crate::models::ReportEnvelope;
use crate::report::{AnalyticsEngine, DEFAULT_TOP_ARTICLES_LIMIT};
use crate::utils::format::{section, views_line};

const SECTION_TITLE: &str = "Most popular articles:";

#[derive(Debug, Clone, Args)]
pub struct TopArticlesArgs {
    /// Maximum number of articles to return.
    #[arg(long, default_value_t = DEFAULT_TOP_ARTICLES_LIMIT)]
    pub limit: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &TopArticlesArgs, engine: &AnalyticsEngine) -> Result<()> {
    let articles = engine.top_articles(args.limit)?;

    if args.json {
        let envelope = ReportEnvelope::ok("top-articles", json!({ "rows": articles }))
            .with_meta("limit", json!(args.limit))
            .with_meta("row_count", json!(articles.len()));
        let encoded =
            serde_json::to_string(&envelope).context("failed to encode top articles envelope")?;
        println!("{encoded}");
        return Ok(());
    }

    let lines = articles
        .iter()
        .map(|row| views_line(&row.title, row.views))
        .collect::<Vec<_>>();
    print!("{}", section(SECTION_TITLE, &lines));
    Ok(())
}
