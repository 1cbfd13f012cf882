use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, params};
use time::Date;

use crate::db;
use crate::models::{ArticleViews, AuthorViews, DAY_FORMAT, ErrorDay};

pub const DEFAULT_TOP_ARTICLES_LIMIT: usize = 3;
pub const DEFAULT_ERROR_THRESHOLD_PCT: f64 = 1.0;

/// A view is a successful GET whose request path contains the article slug.
/// Slug substring matching mirrors the log format, which records only raw
/// paths; a slug that is a substring of another slug (or of an unrelated
/// path) would be over-counted. Ties on the view count break alphabetically
/// so the cutoff at `LIMIT` is deterministic.
const TOP_ARTICLES_SQL: &str = r#"
SELECT articles.title, COUNT(*) AS views
FROM articles
JOIN log ON log.path LIKE '%' || articles.slug || '%'
WHERE log.method = 'GET'
  AND log.status LIKE '200%'
GROUP BY articles.title
ORDER BY views DESC, articles.title ASC
LIMIT ?1
"#;

const POPULAR_AUTHORS_SQL: &str = r#"
SELECT authors.name, COUNT(*) AS views
FROM articles
JOIN authors ON authors.id = articles.author
JOIN log ON log.path LIKE '%' || articles.slug || '%'
WHERE log.method = 'GET'
  AND log.status LIKE '200%'
GROUP BY authors.name
ORDER BY views DESC, authors.name ASC
"#;

/// Any status other than 200 counts as an error. Timestamps are stored in
/// UTC, so truncating with `date()` yields the UTC calendar day. The
/// threshold comparison is inclusive and runs against the unrounded
/// percentage.
const ERROR_DAYS_SQL: &str = r#"
WITH daily AS (
    SELECT date(log.time) AS day,
           COUNT(*) AS total_requests,
           SUM(CASE WHEN log.status LIKE '200%' THEN 0 ELSE 1 END) AS error_requests
    FROM log
    GROUP BY date(log.time)
)
SELECT day, error_requests * 100.0 / total_requests AS error_pct
FROM daily
WHERE error_requests * 100.0 / total_requests >= ?1
ORDER BY error_pct DESC, day DESC
"#;

/// Read-only aggregate queries over the `articles`, `authors`, and `log`
/// relations. Each operation opens its own connection for one query and
/// releases it on drop, success or failure alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEngine {
    database_path: PathBuf,
}

impl AnalyticsEngine {
    #[must_use]
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// The most-viewed articles, descending by view count, at most `limit`
    /// rows. Articles with zero matching requests are absent.
    pub fn top_articles(&self, limit: usize) -> Result<Vec<ArticleViews>> {
        let connection = self.connect()?;
        let limit = i64::try_from(limit)
            .map_err(|_| anyhow!("top articles limit exceeds sqlite INTEGER range"))?;

        let mut statement = connection
            .prepare(TOP_ARTICLES_SQL)
            .context("failed to prepare top articles query")?;
        let rows = statement
            .query_map(params![limit], |row| {
                Ok((row.get::<usize, String>(0)?, row.get::<usize, i64>(1)?))
            })
            .context("failed to execute top articles query")?;

        let mut articles = Vec::new();
        for row in rows {
            let (title, views) = row.context("failed to decode top articles row")?;
            articles.push(ArticleViews {
                title,
                views: to_count(views)?,
            });
        }
        Ok(articles)
    }

    /// Every author with at least one matching view, descending by total
    /// views across all of their articles.
    pub fn popular_authors(&self) -> Result<Vec<AuthorViews>> {
        let connection = self.connect()?;

        let mut statement = connection
            .prepare(POPULAR_AUTHORS_SQL)
            .context("failed to prepare popular authors query")?;
        let rows = statement
            .query_map([], |row| {
                Ok((row.get::<usize, String>(0)?, row.get::<usize, i64>(1)?))
            })
            .context("failed to execute popular authors query")?;

        let mut authors = Vec::new();
        for row in rows {
            let (name, views) = row.context("failed to decode popular authors row")?;
            authors.push(AuthorViews {
                name,
                views: to_count(views)?,
            });
        }
        Ok(authors)
    }

    /// Calendar days whose share of non-200 responses reaches `threshold`
    /// percent, descending by error percentage.
    pub fn error_days(&self, threshold: f64) -> Result<Vec<ErrorDay>> {
        let connection = self.connect()?;

        let mut statement = connection
            .prepare(ERROR_DAYS_SQL)
            .context("failed to prepare error days query")?;
        let rows = statement
            .query_map(params![threshold], |row| {
                Ok((row.get::<usize, String>(0)?, row.get::<usize, f64>(1)?))
            })
            .context("failed to execute error days query")?;

        let mut days = Vec::new();
        for row in rows {
            let (day, percentage) = row.context("failed to decode error days row")?;
            days.push(ErrorDay {
                day: parse_day(&day)?,
                percentage: round_to_hundredths(percentage),
            });
        }
        Ok(days)
    }

    fn connect(&self) -> Result<Connection> {
        let connection = db::open_database(&self.database_path)?;
        db::verify_schema(&connection)?;
        Ok(connection)
    }
}

fn to_count(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("aggregate count is negative: {value}"))
}

fn parse_day(raw: &str) -> Result<Date> {
    Date::parse(raw, &DAY_FORMAT)
        .with_context(|| format!("failed to parse calendar day from log timestamp: {raw}"))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{parse_day, round_to_hundredths, to_count};
    use time::Month;

    #[test]
    fn parses_truncated_log_timestamp_into_date() {
        let day = parse_day("2016-07-01").expect("day should parse");
        assert_eq!(day.year(), 2016);
        assert_eq!(day.month(), Month::July);
        assert_eq!(day.day(), 1);
    }

    #[test]
    fn rejects_unparseable_day() {
        let err = parse_day("not-a-day").expect_err("garbage day must fail");
        assert!(
            err.to_string()
                .contains("failed to parse calendar day from log timestamp"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rounds_percentages_to_two_decimals() {
        assert_eq!(round_to_hundredths(2.0), 2.0);
        assert_eq!(round_to_hundredths(2.264_150), 2.26);
        assert_eq!(round_to_hundredths(2.265_000_1), 2.27);
        assert_eq!(round_to_hundredths(0.0), 0.0);
    }

    #[test]
    fn converts_non_negative_counts_only() {
        assert_eq!(to_count(0).expect("zero is a valid count"), 0);
        assert_eq!(to_count(42).expect("positive counts convert"), 42);
        assert!(to_count(-1).is_err());
    }
}
