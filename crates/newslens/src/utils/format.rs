use anyhow::Result;

use crate::models::{ErrorDay, format_day};

/// Renders one report section: title line, bullet lines, and a blank
/// separator line. An empty result keeps the title with no bullets.
#[must_use]
pub fn section(title: &str, lines: &[String]) -> String {
    let mut output = String::with_capacity(title.len() + 1 + lines.len() * 32);
    output.push_str(title);
    output.push('\n');
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
    output.push('\n');
    output
}

#[must_use]
pub fn views_line(label: &str, views: u64) -> String {
    format!("\t• {label} — {} views", format_count(views))
}

pub fn errors_line(row: &ErrorDay) -> Result<String> {
    let day = format_day(row.day)?;
    Ok(format!("\t• {day} — {:.2}% errors", row.percentage))
}

/// Groups digits with commas, e.g. 1505 -> "1,505".
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            output.push(',');
        }
        output.push(digit);
    }
    output
}
