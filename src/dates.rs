use chrono::{Datelike, NaiveDate};

use crate::types::ArchivalYear;

/// Whole-string date layouts accepted for `<date>` values.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse the year of an EAD date value (a `normal` attribute or element text).
///
/// Accepts bare years (`1950`), ISO-like dates (`1950-03-01`, `19500301`, `1950-03`),
/// US numeric dates, spelled-out months (`March 3, 1950`, `3 March 1950`,
/// `March 1950`) and ranges (`1950/1960`, `1950-03-01/1951`, `1950-1960`) where the
/// first endpoint wins. Returns `None` when nothing matches.
pub fn parse_archival_year(value: &str) -> Option<ArchivalYear> {
    let trimmed = value.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    if let Some((start, _)) = trimmed.split_once('/') {
        if !looks_like_us_date(trimmed) {
            return parse_archival_year(start);
        }
    }
    if let Some(year) = parse_bare_year(trimmed) {
        return Some(year);
    }
    if let Some((start, end)) = trimmed.split_once('-') {
        if let (Some(year), Some(_)) = (parse_bare_year(start), parse_bare_year(end)) {
            return Some(year);
        }
    }
    if let Some(date) = parse_full_date(trimmed) {
        return Some(date.year());
    }
    parse_year_month(trimmed)
}

/// A bare four-digit year.
fn parse_bare_year(value: &str) -> Option<ArchivalYear> {
    let value = value.trim();
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        value.parse::<ArchivalYear>().ok()
    } else {
        None
    }
}

fn parse_full_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// `YYYY-MM` or `Month YYYY`, anchored to day 1.
fn parse_year_month(value: &str) -> Option<ArchivalYear> {
    let anchored = format!("{value}-01");
    if let Ok(date) = NaiveDate::parse_from_str(&anchored, "%Y-%m-%d") {
        return Some(date.year());
    }
    let mut parts = value.split_whitespace();
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() || month_token_to_number(month).is_none() {
        return None;
    }
    parse_bare_year(year)
}

fn looks_like_us_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%m/%d/%Y").is_ok()
}

/// Convert a month token (any case, optional trailing dot) to a month number (1-12).
fn month_token_to_number(token: &str) -> Option<u32> {
    match token.trim_end_matches('.').to_ascii_lowercase().as_str() {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_normal_attribute_shapes() {
        assert_eq!(parse_archival_year("1950"), Some(1950));
        assert_eq!(parse_archival_year("1950/1960"), Some(1950));
        assert_eq!(parse_archival_year("1950-03-01/1951-12-31"), Some(1950));
        assert_eq!(parse_archival_year("19500301"), Some(1950));
        assert_eq!(parse_archival_year("1950-03"), Some(1950));
    }

    #[test]
    fn parses_text_shapes() {
        assert_eq!(parse_archival_year("1950-1960"), Some(1950));
        assert_eq!(parse_archival_year("March 3, 1950"), Some(1950));
        assert_eq!(parse_archival_year("Mar 3, 1950"), Some(1950));
        assert_eq!(parse_archival_year("3 March 1950"), Some(1950));
        assert_eq!(parse_archival_year("March 1950"), Some(1950));
        assert_eq!(parse_archival_year("Sept. 1950"), Some(1950));
        assert_eq!(parse_archival_year("03/04/1950"), Some(1950));
        assert_eq!(parse_archival_year(" 1987. "), Some(1987));
    }

    #[test]
    fn rejects_unparsable_values() {
        assert_eq!(parse_archival_year(""), None);
        assert_eq!(parse_archival_year("undated"), None);
        assert_eq!(parse_archival_year("circa 1950"), None);
        assert_eq!(parse_archival_year("195"), None);
        assert_eq!(parse_archival_year("1950-13"), None);
        assert_eq!(parse_archival_year("Smarch 1950"), None);
    }
}
