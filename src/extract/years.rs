//! Years-of-experience resolution.
//!
//! Explicit "N years of experience" claims win over inferred durations; when
//! absent, per-entry durations are parsed across the supported notation
//! families and summed. Unparsed formats contribute zero, and the fallback
//! never goes below zero.

use chrono::{Datelike, Local};
use regex::Regex;
use std::sync::LazyLock;

use crate::extract::patterns::{month_number, MONTH_NAME};
use crate::models::ExperienceEntry;

/// Reference "today" feeding open-ended ranges and two-digit-year expansion.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceDate {
    pub year: i32,
    pub month: u32,
}

impl ReferenceDate {
    #[must_use]
    pub fn today() -> Self {
        let now = Local::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }
}

static EXPLICIT_YEARS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs)\s+of\s+experience\b",
        r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs)\s+experience\b",
        r"(?i)(\d+(?:\.\d+)?)\s*\+\s*(?:years?|yrs)\b",
    ]
    .iter()
    .map(|pat| Regex::new(pat).expect("explicit years pattern"))
    .collect()
});

static RANGE_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+to\s+").expect("to separator pattern"));

static YEAR_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\s*-\s*(present|current|now|\d{4})").expect("year range"));

static MONTH_SLASH_YEAR4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})/(\d{4})\s*-\s*(present|current|now|(\d{1,2})/(\d{4}))")
        .expect("mm/yyyy range")
});

static MONTH_SLASH_YEAR2: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})/(\d{2})\s*-\s*(present|current|now|(\d{1,2})/(\d{2}))")
        .expect("mm/yy range")
});

static MONTH_NAME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    // Four-digit years only; "Jun 19 - May 21" is not a month-name duration.
    Regex::new(&format!(
        r"(?i)(?P<sm>{m}\.?\s+\d{{4}})\s*-\s*(?:(?P<em>{m}\.?\s+\d{{4}})|(?P<now>present|current|now))",
        m = MONTH_NAME,
    ))
    .expect("month name range")
});

/// Maximum N across explicit "N years (of) experience" phrases, if any.
#[must_use]
pub fn explicit_years(text: &str) -> Option<f64> {
    let mut max: Option<f64> = None;
    for re in EXPLICIT_YEARS.iter() {
        for caps in re.captures_iter(text) {
            if let Ok(n) = caps[1].parse::<f64>() {
                max = Some(max.map_or(n, |m: f64| m.max(n)));
            }
        }
    }
    max
}

/// Resolve years of experience: explicit claims first, else the floored sum
/// of per-entry duration estimates. Entries are not checked for date overlap,
/// so concurrent roles both count.
#[must_use]
pub fn resolve(text: &str, entries: &[ExperienceEntry], today: ReferenceDate) -> f64 {
    if let Some(explicit) = explicit_years(text) {
        return explicit;
    }
    let sum: f64 = entries
        .iter()
        .filter_map(|e| years_from_duration(&e.duration, today))
        .filter(|y| *y > 0.0)
        .sum();
    // An empty sum is -0.0 on current rustc; + 0.0 canonicalizes the sign so
    // the JSON output reads 0.0, and leaves every other value unchanged.
    sum.floor() + 0.0
}

/// Approximate elapsed years for one duration string, or None for formats
/// outside the supported families.
#[must_use]
pub fn years_from_duration(duration: &str, today: ReferenceDate) -> Option<f64> {
    if duration.is_empty() {
        return None;
    }

    let s = duration.to_lowercase().replace(['–', '—'], "-");
    let s = RANGE_TO.replace_all(&s, " - ");

    // Plain year ranges: "2014-2018", "2018 - Present".
    if let Some(caps) = YEAR_RANGE.captures(&s) {
        let start: i32 = caps[1].parse().ok()?;
        let end = match caps[2].parse::<i32>() {
            Ok(year) => year,
            Err(_) => today.year,
        };
        if end >= start {
            return Some(f64::from(end - start));
        }
    }

    // Numeric month/year ranges: "02/2019 to 08/2020", "08/2020 - Present".
    if let Some(caps) = MONTH_SLASH_YEAR4.captures(&s) {
        let start_month: u32 = caps[1].parse().ok()?;
        let start_year: i32 = caps[2].parse().ok()?;
        let (end_month, end_year) = match (caps.get(4), caps.get(5)) {
            (Some(m), Some(y)) => (m.as_str().parse().ok()?, y.as_str().parse().ok()?),
            _ => (today.month, today.year),
        };
        return month_span_years(start_year, start_month, end_year, end_month);
    }

    // Two-digit-year numeric ranges: "3/15-present", "12/14 - 3/15".
    if let Some(caps) = MONTH_SLASH_YEAR2.captures(&s) {
        let start_month: u32 = caps[1].parse().ok()?;
        let start_two: i32 = caps[2].parse().ok()?;
        let (end_month, end_two) = match (caps.get(4), caps.get(5)) {
            (Some(m), Some(y)) => (m.as_str().parse().ok()?, y.as_str().parse().ok()?),
            _ => (today.month, today.year.rem_euclid(100)),
        };
        let start_year = expand_two_digit_year(start_two, today);
        let end_year = expand_two_digit_year(end_two, today);
        return month_span_years(start_year, start_month, end_year, end_month);
    }

    // Month-name ranges: "June 2019 - May 2021", "September 2020 - Current".
    if let Some(caps) = MONTH_NAME_RANGE.captures(&s) {
        let (start_month, start_year) = split_month_year(&caps["sm"])?;
        let (end_month, end_year) = if caps.name("now").is_some() {
            (today.month, today.year)
        } else {
            split_month_year(caps.name("em")?.as_str())?
        };
        return month_span_years(start_year, start_month, end_year, end_month);
    }

    None
}

/// Expand a two-digit year with a sliding pivot around the reference year:
/// values above `(year mod 100) + 5` are assumed to be the previous century.
fn expand_two_digit_year(two_digit: i32, today: ReferenceDate) -> i32 {
    let pivot = today.year.rem_euclid(100) + 5;
    let century = today.year - today.year.rem_euclid(100);
    let mut year = century + two_digit;
    if two_digit > pivot {
        year -= 100;
    }
    year
}

/// Month-granularity elapsed years; None for invalid months or reversed ranges.
fn month_span_years(start_year: i32, start_month: u32, end_year: i32, end_month: u32) -> Option<f64> {
    if !(1..=12).contains(&start_month) || !(1..=12).contains(&end_month) {
        return None;
    }
    let start_total = start_year * 12 + (start_month as i32 - 1);
    let end_total = end_year * 12 + (end_month as i32 - 1);
    if end_total < start_total {
        return None;
    }
    Some(f64::from(end_total - start_total) / 12.0)
}

/// Split a "MonthName YYYY" token into (month number, year).
fn split_month_year(token: &str) -> Option<(u32, i32)> {
    let mut parts = token.split_whitespace();
    let name = parts.next()?;
    let year: i32 = parts.next()?.trim_end_matches('.').parse().ok()?;
    Some((month_number(name)?, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: ReferenceDate = ReferenceDate {
        year: 2026,
        month: 8,
    };

    fn entry(duration: &str) -> ExperienceEntry {
        ExperienceEntry {
            title: "x".into(),
            duration: duration.into(),
            ..Default::default()
        }
    }

    #[test]
    fn explicit_phrase_takes_maximum() {
        let text = "3 years of experience in support. Later gained 7+ years experience in ops.";
        assert_eq!(explicit_years(text), Some(7.0));
    }

    #[test]
    fn explicit_phrase_allows_fractions() {
        assert_eq!(explicit_years("2.5 years of experience"), Some(2.5));
    }

    #[test]
    fn explicit_beats_durations() {
        let entries = vec![entry("2014-2018"), entry("2018-2020")];
        let years = resolve("10 years of experience", &entries, TODAY);
        assert_eq!(years, 10.0);
    }

    #[test]
    fn plain_year_range_is_integer_difference() {
        assert_eq!(years_from_duration("2014-2018", TODAY), Some(4.0));
        assert_eq!(years_from_duration("2018 - Present", TODAY), Some(8.0));
    }

    #[test]
    fn numeric_month_year_range_has_month_granularity() {
        let y = years_from_duration("02/2019 to 08/2020", TODAY).unwrap();
        assert!((y - 1.5).abs() < 1e-9);
    }

    #[test]
    fn two_digit_years_resolve_via_pivot() {
        // 03/18 - 05/20 -> March 2018 to May 2020 -> 26 months.
        let y = years_from_duration("03/18 - 05/20", TODAY).unwrap();
        assert!((y - 26.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn two_digit_years_above_pivot_are_previous_century() {
        // Pivot is (2026 mod 100) + 5 = 31, so "98" means 1998.
        let y = years_from_duration("01/98 - 01/02", TODAY).unwrap();
        assert!((y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn month_name_range_uses_name_table() {
        let y = years_from_duration("June 2019 - May 2021", TODAY).unwrap();
        assert!((y - 23.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn month_name_open_range_ends_today() {
        let y = years_from_duration("September 2020 - Current", TODAY).unwrap();
        // Sep 2020 to Aug 2026 is 71 months.
        assert!((y - 71.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn month_name_range_needs_four_digit_years() {
        assert_eq!(years_from_duration("Jun 19 - May 21", TODAY), None);
    }

    #[test]
    fn unparsed_formats_contribute_zero() {
        assert_eq!(years_from_duration("circa the nineties", TODAY), None);
        assert_eq!(years_from_duration("", TODAY), None);
        let years = resolve("no claims here", &[entry("circa the nineties")], TODAY);
        assert_eq!(years, 0.0);
    }

    #[test]
    fn fallback_sums_and_floors() {
        let entries = vec![entry("2014-2016"), entry("03/18 - 05/20")];
        // 2.0 + 2.1667 = 4.1667 -> 4.
        let years = resolve("no explicit claim", &entries, TODAY);
        assert_eq!(years, 4.0);
    }

    #[test]
    fn reversed_ranges_are_rejected() {
        assert_eq!(years_from_duration("2020 - 2018", TODAY), None);
    }
}
