use std::path::Path;

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OpenFlags};

pub const ARTICLES_TABLE: &str = "articles";
pub const AUTHORS_TABLE: &str = "authors";
pub const LOG_TABLE: &str = "log";

/// Relations and columns the analytics queries depend on. The dataset is
/// externally owned; verifying up front turns a schema mismatch into a
/// named diagnostic instead of a failed aggregate query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredRelation {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const REQUIRED_RELATIONS: &[RequiredRelation] = &[
    RequiredRelation {
        name: ARTICLES_TABLE,
        columns: &["title", "slug", "author"],
    },
    RequiredRelation {
        name: AUTHORS_TABLE,
        columns: &["id", "name"],
    },
    RequiredRelation {
        name: LOG_TABLE,
        columns: &["path", "method", "status", "time"],
    },
];

/// Opens the news database read-only. The workload is pure read/aggregate,
/// so a missing file is a connection error rather than a cue to create one.
pub fn open_database(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("failed to open news database: {}", path.display()))
}

pub fn verify_schema(connection: &Connection) -> Result<()> {
    for relation in REQUIRED_RELATIONS {
        let columns = relation_columns(connection, relation.name)?;
        if columns.is_empty() {
            bail!(
                "required relation `{}` is missing from the database",
                relation.name
            );
        }
        for column in relation.columns {
            if !columns.iter().any(|name| name == column) {
                bail!(
                    "relation `{}` is missing required column `{}`",
                    relation.name,
                    column
                );
            }
        }
    }

    Ok(())
}

fn relation_columns(connection: &Connection, relation_name: &str) -> Result<Vec<String>> {
    let pragma_sql = format!("PRAGMA table_info({})", sqlite_single_quoted(relation_name));
    let mut statement = connection.prepare(&pragma_sql).with_context(|| {
        format!("failed to prepare column introspection for `{relation_name}`")
    })?;

    let rows = statement
        .query_map([], |row| row.get::<usize, String>(1))
        .with_context(|| {
            format!("failed to execute column introspection for `{relation_name}`")
        })?;

    rows.map(|row| row.context("failed to decode schema column row"))
        .collect()
}

fn sqlite_single_quoted(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
