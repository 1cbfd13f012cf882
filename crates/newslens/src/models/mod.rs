mod envelope;
mod report;

pub use envelope::{REPORT_ENVELOPE_SCHEMA_VERSION, ReportEnvelope, ReportEnvelopeMeta};
pub use report::{ArticleViews, AuthorViews, DAY_FORMAT, ErrorDay, format_day};
