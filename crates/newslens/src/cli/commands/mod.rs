pub mod authors;
pub mod error_days;
pub mod report;
pub mod top_articles;
