use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use crate::models::{ArticleViews, AuthorViews, ErrorDay, ReportEnvelope};
use crate::report::{AnalyticsEngine, DEFAULT_ERROR_THRESHOLD_PCT, DEFAULT_TOP_ARTICLES_LIMIT};
use crate::utils::format::{errors_line, section, views_line};

// Section titles are part of the report's compatibility surface and stay
// fixed even when --limit or --threshold deviate from the defaults.
const TOP_ARTICLES_TITLE: &str = "1. What are the most popular three articles of all time?:";
const POPULAR_AUTHORS_TITLE: &str = "2. Who are the most popular authors of all time?:";
const ERROR_DAYS_TITLE: &str = "3. On which days did more than 1% of requests lead to errors?";

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Number of articles in the top-articles section.
    #[arg(long, default_value_t = DEFAULT_TOP_ARTICLES_LIMIT)]
    pub limit: usize,

    /// Minimum daily error percentage for the error-days section.
    #[arg(long, default_value_t = DEFAULT_ERROR_THRESHOLD_PCT)]
    pub threshold: f64,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TOP_ARTICLES_LIMIT,
            threshold: DEFAULT_ERROR_THRESHOLD_PCT,
            json: false,
        }
    }
}

pub fn run(args: &ReportArgs, engine: &AnalyticsEngine) -> Result<()> {
    let articles = engine.top_articles(args.limit)?;
    let authors = engine.popular_authors()?;
    let error_days = engine.error_days(args.threshold)?;

    if args.json {
        let envelope = ReportEnvelope::ok(
            "report",
            json!({
                "top_articles": articles,
                "popular_authors": authors,
                "error_days": error_days,
            }),
        )
        .with_meta("top_limit", json!(args.limit))
        .with_meta("error_threshold_pct", json!(args.threshold))
        .with_meta("top_articles_count", json!(articles.len()))
        .with_meta("popular_authors_count", json!(authors.len()))
        .with_meta("error_days_count", json!(error_days.len()));
        let encoded =
            serde_json::to_string(&envelope).context("failed to encode report envelope")?;
        println!("{encoded}");
        return Ok(());
    }

    print!("{}", render_report(&articles, &authors, &error_days)?);
    Ok(())
}

fn render_report(
    articles: &[ArticleViews],
    authors: &[AuthorViews],
    error_days: &[ErrorDay],
) -> Result<String> {
    let article_lines = articles
        .iter()
        .map(|row| views_line(&row.title, row.views))
        .collect::<Vec<_>>();
    let author_lines = authors
        .iter()
        .map(|row| views_line(&row.name, row.views))
        .collect::<Vec<_>>();
    let error_lines = error_days
        .iter()
        .map(errors_line)
        .collect::<Result<Vec<_>>>()?;

    let mut output = String::new();
    output.push_str(&section(TOP_ARTICLES_TITLE, &article_lines));
    output.push_str(&section(POPULAR_AUTHORS_TITLE, &author_lines));
    output.push_str(&section(ERROR_DAYS_TITLE, &error_lines));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::render_report;
    use crate::models::{ArticleViews, AuthorViews, ErrorDay};
    use time::{Date, Month};

    #[test]
    fn renders_three_sections_in_order_with_blank_separators() {
        let articles = vec![
            ArticleViews {
                title: "Candidate is jerk, alleges rival".to_string(),
                views: 338_647,
            },
            ArticleViews {
                title: "Bears love berries, alleges bear".to_string(),
                views: 253_801,
            },
        ];
        let authors = vec![AuthorViews {
            name: "Ursula La Multa".to_string(),
            views: 507_594,
        }];
        let error_days = vec![ErrorDay {
            day: Date::from_calendar_date(2016, Month::July, 17)
                .expect("calendar date should be valid"),
            percentage: 2.26,
        }];

        let rendered =
            render_report(&articles, &authors, &error_days).expect("report should render");
        let expected = "1. What are the most popular three articles of all time?:\n\
                        \t• Candidate is jerk, alleges rival — 338,647 views\n\
                        \t• Bears love berries, alleges bear — 253,801 views\n\
                        \n\
                        2. Who are the most popular authors of all time?:\n\
                        \t• Ursula La Multa — 507,594 views\n\
                        \n\
                        3. On which days did more than 1% of requests lead to errors?\n\
                        \t• 2016-07-17 — 2.26% errors\n\
                        \n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn empty_results_keep_headers_without_bullets() {
        let rendered = render_report(&[], &[], &[]).expect("empty report should render");
        let expected = "1. What are the most popular three articles of all time?:\n\
                        \n\
                        2. Who are the most popular authors of all time?:\n\
                        \n\
                        3. On which days did more than 1% of requests lead to errors?\n\
                        \n";
        assert_eq!(rendered, expected);
    }
}
