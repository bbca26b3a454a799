//! Conversion of Bengali date strings to ISO-8601.
//!
//! Each source prints publication times its own way:
//!
//! | Source | Example |
//! |--------|---------|
//! | Jamuna TV | `22nd June 2024, 6:30 PM`, `২২ জুন ২০২৪, ০৬:৩০ অপরাহ্ন` |
//! | DBC News | `শুক্রবার ৯ই মে ২০২৫ ০১:০৫:৫১ অপরাহ্ন`, `৩ ঘন্টা আগে` |
//! | Prothom Alo | `প্রকাশ: ২২ জুন, ২০২৪, ০৬:৩০ PM` |
//!
//! All rules produce a local date-time without offset (`YYYY-MM-DDTHH:MM:SS`),
//! matching what the sites display. Failures are reported as
//! [`DateParseError`]; callers turn that into an empty field.

use crate::error::DateParseError;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)(st|nd|rd|th)\b").expect("static regex"));
static SPACE_IN_CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d):\s+(\d)").expect("static regex"));

/// Month names as printed by the sources, Bengali spellings first.
const MONTHS: &[(&str, u32)] = &[
    ("জানুয়ারি", 1),
    ("জানুয়ারী", 1),
    ("ফেব্রুয়ারি", 2),
    ("ফেব্রুয়ারী", 2),
    ("মার্চ", 3),
    ("এপ্রিল", 4),
    ("মে", 5),
    ("জুন", 6),
    ("জুলাই", 7),
    ("আগস্ট", 8),
    ("আগষ্ট", 8),
    ("সেপ্টেম্বর", 9),
    ("অক্টোবর", 10),
    ("নভেম্বর", 11),
    ("ডিসেম্বর", 12),
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Replace Bengali digits (০-৯) with ASCII digits, leaving everything else.
pub fn bengali_to_ascii_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '০'..='৯' => char::from(b'0' + (c as u32 - '০' as u32) as u8),
            _ => c,
        })
        .collect()
}

/// `য়` may arrive precomposed (U+09DF) or as `য` + nukta; fold to one form.
fn fold_nukta(s: &str) -> String {
    s.replace("\u{09AF}\u{09BC}", "\u{09DF}")
}

fn month_number(name: &str) -> Option<u32> {
    let name = fold_nukta(name.trim_matches(|c: char| c == ',' || c == '.')).to_lowercase();
    MONTHS
        .iter()
        .find(|(m, _)| {
            fold_nukta(m) == name || (m.is_ascii() && name.len() == 3 && m.starts_with(&name))
        })
        .map(|&(_, n)| n)
}

fn parse_meridiem(token: &str) -> Option<Meridiem> {
    match token.trim_matches('.').to_lowercase().replace('.', "").as_str() {
        "am" | "পূর্বাহ্ন" | "এএম" => Some(Meridiem::Am),
        "pm" | "অপরাহ্ন" | "পিএম" => Some(Meridiem::Pm),
        _ => None,
    }
}

/// Keep only the digits of a token (`"৯ই"` → `9`).
fn leading_number(token: &str) -> Option<u32> {
    let digits: String = bengali_to_ascii_digits(token)
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn parse_clock(token: &str) -> Option<(u32, u32, u32)> {
    let mut parts = token.split(':').map(|p| p.parse::<u32>().ok());
    let hour = parts.next()??;
    let minute = parts.next()??;
    let second = match parts.next() {
        Some(s) => s?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((hour, minute, second))
}

fn to_24_hour(hour: u32, meridiem: Option<Meridiem>) -> Option<u32> {
    match meridiem {
        None => Some(hour),
        // 24-hour clocks are sometimes printed with a PM marker anyway.
        Some(Meridiem::Pm) if (13..=23).contains(&hour) => Some(hour),
        Some(_) if !(1..=12).contains(&hour) => None,
        Some(Meridiem::Am) => Some(hour % 12),
        Some(Meridiem::Pm) => Some(hour % 12 + 12),
    }
}

/// Parse `[weekday/label ...] day month year h:mm[:ss] [AM|PM]`.
///
/// Commas are ignored and leading tokens without digits (weekday names,
/// `প্রকাশ:` labels) are skipped.
fn parse_absolute(raw: &str) -> Result<String, DateParseError> {
    let cleaned = bengali_to_ascii_digits(raw).replace(',', " ");
    let cleaned = SPACE_IN_CLOCK.replace_all(&cleaned, "$1:$2");
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .skip_while(|t| !t.chars().any(|c| c.is_ascii_digit()))
        .collect();

    let [day, month, year, clock, rest @ ..] = tokens.as_slice() else {
        return Err(DateParseError::new(raw, "expected day, month, year and time"));
    };
    let day = leading_number(day).ok_or_else(|| DateParseError::new(raw, "bad day"))?;
    let month = month_number(month).ok_or_else(|| DateParseError::new(raw, "unknown month"))?;
    let year: i32 = year
        .parse()
        .map_err(|_| DateParseError::new(raw, "bad year"))?;
    let (hour, minute, second) =
        parse_clock(clock).ok_or_else(|| DateParseError::new(raw, "bad time"))?;
    let meridiem = match rest {
        [] => None,
        [token, ..] => Some(
            parse_meridiem(token).ok_or_else(|| DateParseError::new(raw, "bad AM/PM marker"))?,
        ),
    };
    let hour = to_24_hour(hour, meridiem).ok_or_else(|| DateParseError::new(raw, "bad hour"))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .map(|dt| dt.format(ISO_FORMAT).to_string())
        .ok_or_else(|| DateParseError::new(raw, "date out of range"))
}

/// Parse `"<n> <unit> আগে"` relative to `now`.
fn parse_relative(raw: &str, now: NaiveDateTime) -> Result<String, DateParseError> {
    let amount = raw
        .split_whitespace()
        .next()
        .and_then(leading_number)
        .ok_or_else(|| DateParseError::new(raw, "missing amount"))? as i64;

    let delta = if raw.contains("সেকেন্ড") {
        TimeDelta::try_seconds(amount)
    } else if raw.contains("মিনিট") {
        TimeDelta::try_minutes(amount)
    } else if raw.contains("ঘন্টা") || raw.contains("ঘণ্টা") {
        TimeDelta::try_hours(amount)
    } else if raw.contains("দিন") {
        TimeDelta::try_days(amount)
    } else if raw.contains("সপ্তাহ") {
        TimeDelta::try_weeks(amount)
    } else {
        return Err(DateParseError::new(raw, "unknown relative unit"));
    };

    delta
        .and_then(|d| now.checked_sub_signed(d))
        .map(|dt| dt.format(ISO_FORMAT).to_string())
        .ok_or_else(|| DateParseError::new(raw, "relative offset out of range"))
}

/// Jamuna TV: `22nd June 2024, 6:30 PM`; Bengali digits and month names
/// are accepted too.
pub fn parse_jamuna_date(raw: &str) -> Result<String, DateParseError> {
    let raw = raw.trim();
    let without_ordinals = ORDINAL_SUFFIX.replace_all(raw, "$1");
    parse_absolute(&without_ordinals).map_err(|e| DateParseError::new(raw, e.reason))
}

/// DBC News: either absolute (`শুক্রবার ৯ই মে ২০২৫ ০১:০৫:৫১ অপরাহ্ন`) or
/// relative to `now` (`৩ ঘন্টা আগে`).
pub fn parse_dbcnews_date(raw: &str, now: NaiveDateTime) -> Result<String, DateParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DateParseError::new(raw, "empty"));
    }
    if raw.contains("আগে") {
        parse_relative(raw, now)
    } else {
        parse_absolute(raw)
    }
}

/// Prothom Alo: `প্রকাশ: ২২ জুন, ২০২৪, ০৬:৩০ PM`. Without an AM/PM marker
/// the clock is read as 24-hour.
pub fn parse_prothomalo_date(raw: &str) -> Result<String, DateParseError> {
    parse_absolute(raw.trim())
}
