use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::process::utils::MISSING_TEXT;

/// Written in place of a date that could not be parsed.
pub const NOT_A_TIME: &str = "NaT";

/// Marker for an unknown date component, e.g. `2021-XX-XX`.
const PARTIAL_MARKER: &str = "XX";

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Normalize a collection date to `YYYY-MM-DD`.
///
/// Text containing `XX` is returned unchanged. A missing value is treated as the
/// text `nan`, which like any other unparseable input becomes `NaT`.
pub fn normalize_date(raw: Option<&str>) -> String {
    let text = raw.unwrap_or(MISSING_TEXT);
    if text.contains(PARTIAL_MARKER) {
        return text.to_string();
    }
    match parse_permissive(text) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => NOT_A_TIME.to_string(),
    }
}

/// Best-effort calendar date from the common spreadsheet date shapes.
///
/// - RFC 3339 timestamps, and any date followed by `HH:MM[:SS[.fff]]` after a
///   space or `T`, with an optional trailing `Z`;
/// - numeric dates split on `-`, `/`, `.` or spaces: `Y-M-D`, `M/D/Y`
///   (or `D/M/Y` when the first number cannot be a month), `Y-M`, `M/Y`;
/// - compact `YYYYMMDD` and bare `YYYY`;
/// - a month name with a year, and optionally a day, in any order.
///
/// Years are four digits, except `M/D/YY` where `00`–`68` map to the 2000s and
/// `69`–`99` to the 1900s. Missing month or day fill in as 1.
pub fn parse_permissive(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    let (date_part, time_part) = split_time(strip_utc_suffix(s));
    if let Some(t) = time_part {
        if !TIME_FORMATS
            .iter()
            .any(|f| NaiveTime::parse_from_str(t, f).is_ok())
        {
            return None;
        }
    }
    parse_date_tokens(date_part)
}

fn strip_utc_suffix(s: &str) -> &str {
    match s.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        Some(rest) if rest.ends_with(|c: char| c.is_ascii_digit()) => rest,
        _ => s,
    }
}

/// Split at the space or `T` preceding the first `:`.
fn split_time(s: &str) -> (&str, Option<&str>) {
    let Some(colon) = s.find(':') else {
        return (s, None);
    };
    match s[..colon].rfind(|c: char| c == ' ' || c == 'T') {
        Some(sep) => (s[..sep].trim_end(), Some(&s[sep + 1..])),
        None => (s, None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    /// ASCII digits only.
    Num(&'a str),
    Month(u32),
}

fn tokenize(s: &str) -> Option<Vec<Token<'_>>> {
    s.split(|c: char| matches!(c, '-' | '/' | '.' | ' ' | ','))
        .filter(|t| !t.is_empty())
        .map(|t| {
            if t.bytes().all(|b| b.is_ascii_digit()) {
                Some(Token::Num(t))
            } else {
                month_number(t).map(Token::Month)
            }
        })
        .collect()
}

/// Full month name or any prefix of at least three letters, case-insensitive.
fn month_number(name: &str) -> Option<u32> {
    if name.len() < 3 {
        return None;
    }
    let lower = name.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| m.starts_with(&lower))
        .map(|i| i as u32 + 1)
}

fn parse_date_tokens(s: &str) -> Option<NaiveDate> {
    let tokens = tokenize(s)?;
    let mut months = Vec::new();
    let mut nums = Vec::new();
    for t in tokens {
        match t {
            Token::Month(m) => months.push(m),
            Token::Num(n) => nums.push(n),
        }
    }
    match months.as_slice() {
        [] => from_numbers(&nums),
        [month] => from_named_month(*month, &nums),
        _ => None,
    }
}

fn from_numbers(nums: &[&str]) -> Option<NaiveDate> {
    match nums {
        [one] => compact(one),
        [y, m] if y.len() == 4 => ymd(year_value(y)?, m, "1"),
        [m, y] if y.len() == 4 => ymd(year_value(y)?, m, "1"),
        [y, m, d] if y.len() == 4 => ymd(year_value(y)?, m, d),
        [a, b, y] if y.len() == 4 || y.len() == 2 => {
            let year = year_value(y)?;
            let (a, b): (u32, u32) = (a.parse().ok()?, b.parse().ok()?);
            let (month, day) = if a > 12 && b <= 12 { (b, a) } else { (a, b) };
            NaiveDate::from_ymd_opt(year, month, day)
        }
        _ => None,
    }
}

fn from_named_month(month: u32, nums: &[&str]) -> Option<NaiveDate> {
    match nums {
        [y] if y.len() == 4 => NaiveDate::from_ymd_opt(y.parse().ok()?, month, 1),
        [d, y] if y.len() == 4 && d.len() <= 2 => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, month, d.parse().ok()?)
        }
        [y, d] if y.len() == 4 && d.len() <= 2 => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, month, d.parse().ok()?)
        }
        _ => None,
    }
}

/// `YYYYMMDD` or `YYYY`; the token is known to be ASCII digits.
fn compact(s: &str) -> Option<NaiveDate> {
    match s.len() {
        8 => NaiveDate::from_ymd_opt(
            s[0..4].parse().ok()?,
            s[4..6].parse().ok()?,
            s[6..8].parse().ok()?,
        ),
        4 => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        _ => None,
    }
}

fn ymd(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn year_value(y: &str) -> Option<i32> {
    let v: i32 = y.parse().ok()?;
    match y.len() {
        4 => Some(v),
        2 if v < 69 => Some(2000 + v),
        2 => Some(1900 + v),
        _ => None,
    }
}
