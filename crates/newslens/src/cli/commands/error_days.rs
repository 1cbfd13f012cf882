use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use crate::models::ReportEnvelope;
use crate::report::{AnalyticsEngine, DEFAULT_ERROR_THRESHOLD_PCT};
use crate::utils::format::{errors_line, section};

const SECTION_TITLE: &str = "Days with elevated error rates:";

#[derive(Debug, Clone, Args)]
pub struct ErrorDaysArgs {
    /// Minimum daily error percentage (inclusive) for a day to qualify.
    #[arg(long, default_value_t = DEFAULT_ERROR_THRESHOLD_PCT)]
    pub threshold: f64,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ErrorDaysArgs, engine: &AnalyticsEngine) -> Result<()> {
    let error_days = engine.error_days(args.threshold)?;

    if args.json {
        let envelope = ReportEnvelope::ok("error-days", json!({ "rows": error_days }))
            .with_meta("threshold_pct", json!(args.threshold))
            .with_meta("row_count", json!(error_days.len()));
        let encoded =
            serde_json::to_string(&envelope).context("failed to encode error days envelope")?;
        println!("{encoded}");
        return Ok(());
    }

    let lines = error_days
        .iter()
        .map(errors_line)
        .collect::<Result<Vec<_>>>()?;
    print!("{}", section(SECTION_TITLE, &lines));
    Ok(())
}
