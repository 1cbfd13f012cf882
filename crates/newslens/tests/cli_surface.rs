use std::path::PathBuf;
use std::process::Command;

use rusqlite::{Connection, params};
use serde_json::Value;

fn temp_db_path(label: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("newslens-{label}-{nanos}.sqlite"))
}

fn write_fixture_db(path: &PathBuf) {
    let connection = Connection::open(path).expect("fixture database should open");
    connection
        .execute_batch(
            r#"
            CREATE TABLE authors (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
            CREATE TABLE articles (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                author INTEGER NOT NULL REFERENCES authors(id)
            );
            CREATE TABLE log (
                id INTEGER PRIMARY KEY,
                path TEXT NOT NULL,
                method TEXT NOT NULL,
                status TEXT NOT NULL,
                time TEXT NOT NULL
            );
            INSERT INTO authors (id, name) VALUES (1, 'Ursula La Multa');
            INSERT INTO articles (id, title, slug, author)
            VALUES (1, 'Alpha', 'alpha-news', 1);
            "#,
        )
        .expect("fixture schema should apply");

    for _ in 0..3 {
        connection
            .execute(
                "INSERT INTO log (path, method, status, time) VALUES (?1, ?2, ?3, ?4)",
                params!["/article/alpha-news", "GET", "200 OK", "2016-07-01 10:00:00"],
            )
            .expect("log row should insert");
    }
    connection
        .execute(
            "INSERT INTO log (path, method, status, time) VALUES (?1, ?2, ?3, ?4)",
            params!["/missing", "GET", "404 NOT FOUND", "2016-07-01 11:00:00"],
        )
        .expect("log row should insert");
}

#[test]
fn help_exits_successfully() {
    let status = Command::new(env!("CARGO_BIN_EXE_newslens"))
        .arg("--help")
        .status()
        .expect("command should execute");

    assert_eq!(status.code(), Some(0));
}

#[test]
fn default_invocation_prints_full_report() {
    let db_path = temp_db_path("cli-default-report");
    write_fixture_db(&db_path);

    let output = Command::new(env!("CARGO_BIN_EXE_newslens"))
        .arg("--database")
        .arg(&db_path)
        .output()
        .expect("command should execute");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    let first = stdout
        .find("1. What are the most popular three articles of all time?:")
        .expect("top articles section should print");
    let second = stdout
        .find("2. Who are the most popular authors of all time?:")
        .expect("popular authors section should print");
    let third = stdout
        .find("3. On which days did more than 1% of requests lead to errors?")
        .expect("error days section should print");
    assert!(first < second && second < third);
    assert!(stdout.contains("\t• Alpha — 3 views"));
    assert!(stdout.contains("\t• Ursula La Multa — 3 views"));
    assert!(stdout.contains("\t• 2016-07-01 — 25.00% errors"));
}

#[test]
fn report_subcommand_matches_default_invocation() {
    let db_path = temp_db_path("cli-report-subcommand");
    write_fixture_db(&db_path);

    let default_output = Command::new(env!("CARGO_BIN_EXE_newslens"))
        .arg("--database")
        .arg(&db_path)
        .output()
        .expect("command should execute");
    let report_output = Command::new(env!("CARGO_BIN_EXE_newslens"))
        .arg("--database")
        .arg(&db_path)
        .arg("report")
        .output()
        .expect("command should execute");

    assert_eq!(default_output.status.code(), Some(0));
    assert_eq!(report_output.status.code(), Some(0));
    assert_eq!(default_output.stdout, report_output.stdout);
}

#[test]
fn top_articles_json_emits_ok_envelope() {
    let db_path = temp_db_path("cli-json-envelope");
    write_fixture_db(&db_path);

    let output = Command::new(env!("CARGO_BIN_EXE_newslens"))
        .arg("--database")
        .arg(&db_path)
        .args(["top-articles", "--json"])
        .output()
        .expect("command should execute");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    let envelope: Value =
        serde_json::from_str(stdout.trim()).expect("stdout should be a JSON envelope");

    assert_eq!(envelope["ok"], Value::Bool(true));
    assert_eq!(envelope["command"], Value::String("top-articles".to_string()));
    assert_eq!(envelope["meta"]["row_count"], Value::from(1));
    let rows = envelope["data"]["rows"]
        .as_array()
        .expect("data.rows should be an array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], Value::String("Alpha".to_string()));
    assert_eq!(rows[0]["views"], Value::from(3));
}

#[test]
fn error_days_honors_threshold_flag() {
    let db_path = temp_db_path("cli-threshold");
    write_fixture_db(&db_path);

    let output = Command::new(env!("CARGO_BIN_EXE_newslens"))
        .arg("--database")
        .arg(&db_path)
        .args(["error-days", "--threshold", "50.0"])
        .output()
        .expect("command should execute");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    assert!(stdout.contains("Days with elevated error rates:"));
    assert!(!stdout.contains("% errors"), "25% day must not pass a 50% threshold");
}
