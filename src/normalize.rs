//! Field normalization for scraped text.
//!
//! Pure functions that turn raw element text into the canonical forms stored
//! in an [`ArticleRecord`](crate::models::ArticleRecord):
//!
//! | Field    | Raw                            | Normalized                  |
//! |----------|--------------------------------|-----------------------------|
//! | headline | `Apple’s new phone—reviewed`   | `"Apple's new phone-reviewed"` |
//! | date     | `Updated Dec 1, 2023, 9:00pm`  | `12/01/2023`                |
//! | author   | `JANE DOE`                     | `Jane Doe`                  |

use crate::error::DateError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Month abbreviations and full names, indexed by month number minus one.
static MONTHS: [(&str, &str); 12] = [
    ("Jan", "January"),
    ("Feb", "February"),
    ("Mar", "March"),
    ("Apr", "April"),
    ("May", "May"),
    ("Jun", "June"),
    ("Jul", "July"),
    ("Aug", "August"),
    ("Sep", "September"),
    ("Oct", "October"),
    ("Nov", "November"),
    ("Dec", "December"),
];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

const UPDATED_MARKER: &str = "Updated";

/// Collapse whitespace runs into single spaces and trim the ends.
///
/// Element text collected from nested markup carries the source's
/// indentation and line breaks; this brings it back to what a browser shows.
pub fn clean_text(raw: &str) -> String {
    WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}

/// Swap typographic punctuation for ASCII and wrap the headline in quotes.
pub fn normalize_headline(raw: &str) -> String {
    let ascii = raw.replace('\u{2019}', "'").replace('\u{2014}', "-");
    format!("\"{ascii}\"")
}

/// Convert `[Updated] Month Day, Year, <time>` into `mm/dd/yyyy`.
///
/// Only the first two comma-separated segments are read. The month may be an
/// abbreviation (`Mar`) or a full name (`March`); the year must have four
/// digits.
pub fn normalize_date(raw: &str) -> Result<String, DateError> {
    let stripped = raw.replace(UPDATED_MARKER, "");
    let head = stripped
        .trim()
        .split(',')
        .take(2)
        .collect::<Vec<_>>()
        .join(" ");
    let tokens: Vec<&str> = head.split_whitespace().collect();

    let [month, day, year] = tokens.as_slice() else {
        return Err(DateError::Shape(raw.trim().to_string()));
    };

    let month_number = month_number(month).ok_or_else(|| DateError::Month(month.to_string()))?;
    let day_number = parse_digits(day, 1..=2).ok_or_else(|| DateError::Day(day.to_string()))?;
    let year_number = parse_digits(year, 4..=4).ok_or_else(|| DateError::Year(year.to_string()))?;

    let date = NaiveDate::from_ymd_opt(year_number as i32, month_number, day_number).ok_or(
        DateError::Calendar {
            month: month_number,
            day: day_number,
            year: year_number as i32,
        },
    )?;

    Ok(date.format("%m/%d/%Y").to_string())
}

/// Capitalize every whitespace-separated word: `JANE DOE` -> `Jane Doe`.
pub fn normalize_author(raw: &str) -> String {
    raw.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}

fn month_number(token: &str) -> Option<u32> {
    let token = token.trim_end_matches('.');
    MONTHS
        .iter()
        .position(|(abbr, full)| token == *abbr || token == *full)
        .map(|i| i as u32 + 1)
}

fn parse_digits(token: &str, len: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !len.contains(&token.len()) || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
