use anyhow::{Context, Result};
use serde::{Serialize, Serializer};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Calendar-day format used everywhere a day crosses an interface: SQL
/// results, text bullets, and JSON payloads.
pub const DAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// One most-viewed-article row: successful GET requests whose path contains
/// the article slug, grouped by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleViews {
    pub title: String,
    pub views: u64,
}

/// One popular-author row: article views rolled up through the
/// `articles.author` foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorViews {
    pub name: String,
    pub views: u64,
}

/// One elevated-error-rate day. `percentage` is already rounded to two
/// decimals; the threshold comparison happens against the raw value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDay {
    #[serde(serialize_with = "serialize_day")]
    pub day: Date,
    pub percentage: f64,
}

pub fn format_day(day: Date) -> Result<String> {
    day.format(&DAY_FORMAT)
        .with_context(|| format!("failed to format calendar day: {day:?}"))
}

fn serialize_day<S: Serializer>(day: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted = day.format(&DAY_FORMAT).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}
