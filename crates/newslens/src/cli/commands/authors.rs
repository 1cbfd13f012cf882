use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use crate::models::ReportEnvelope;
use crate::report::AnalyticsEngine;
use crate::utils::format::{section, views_line};

const SECTION_TITLE: &str = "Most popular authors:";

#[derive(Debug, Clone, Args)]
pub struct AuthorsArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &AuthorsArgs, engine: &AnalyticsEngine) -> Result<()> {
    let authors = engine.popular_authors()?;

    if args.json {
        let envelope = ReportEnvelope::ok("authors", json!({ "rows": authors }))
            .with_meta("row_count", json!(authors.len()));
        let encoded =
            serde_json::to_string(&envelope).context("failed to encode authors envelope")?;
        println!("{encoded}");
        return Ok(());
    }

    let lines = authors
        .iter()
        .map(|row| views_line(&row.name, row.views))
        .collect::<Vec<_>>();
    print!("{}", section(SECTION_TITLE, &lines));
    Ok(())
}
