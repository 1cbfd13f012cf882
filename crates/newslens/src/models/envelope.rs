use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const REPORT_ENVELOPE_SCHEMA_VERSION: &str = "newslens.report-envelope.v1";

pub type ReportEnvelopeMeta = BTreeMap<String, Value>;

/// Machine-readable wrapper around one command's results, printed in `--json`
/// mode. Row data lives in `data`; invocation parameters and counts in `meta`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEnvelope {
    pub ok: bool,
    pub command: String,
    pub generated_at_utc: String,
    pub data: Value,
    pub meta: ReportEnvelopeMeta,
}

impl ReportEnvelope {
    #[must_use]
    pub fn ok(command: impl Into<String>, data: Value) -> Self {
        let mut meta = ReportEnvelopeMeta::new();
        meta.insert(
            "schema_version".to_string(),
            json!(REPORT_ENVELOPE_SCHEMA_VERSION),
        );

        Self {
            ok: true,
            command: command.into(),
            generated_at_utc: generated_at_utc_now(),
            data,
            meta,
        }
    }

    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }
}

fn generated_at_utc_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}
