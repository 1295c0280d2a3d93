//! Shared date pattern and month vocabulary tables.
//!
//! Everything here is constructed once and read-only afterwards, so the
//! engine is safe to call concurrently across independent resumes.

use regex::Regex;
use std::sync::LazyLock;

/// Month-name token followed by a 2-4 digit year, e.g. "Jan 2019", "September 2020".
pub const MONTH_YEAR: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?\s+\d{2,4}";

/// Numeric month/year, e.g. "03/2018" or "3/18".
pub const NUMERIC_DATE: &str = r"\d{1,2}/\d{2,4}";

/// Bare month-name token without a year.
pub const MONTH_NAME: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";

const YEAR: &str = r"\d{4}";
const RANGE_SEP: &str = r"\s*(?:to|-)\s*";

/// Recognizes the date notations that anchor an experience entry:
/// month-name or numeric ranges, plain year ranges, and bare month/numeric
/// dates. Open ends accept Present/Current/Now.
pub static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:(?:{m}|{n}){sep}(?:Present|Current|Now|{m}|{n}|{y})|{y}{sep}(?:Present|Current|Now|{y})|{m}|{n})",
        m = MONTH_YEAR,
        n = NUMERIC_DATE,
        y = YEAR,
        sep = RANGE_SEP,
    ))
    .expect("date range pattern")
});

/// Compound summer-range form: "MonthA - MonthB YYYY, YYYY" (seasonal roles
/// repeated across two years).
pub static MULTI_SUMMER_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?P<start>{m})\s*[–—-]\s*(?P<end>{m})\s+(?P<y1>\d{{4}})\s*,\s*(?P<y2>\d{{4}})",
        m = MONTH_NAME,
    ))
    .expect("summer range pattern")
});

/// Lowercase month names and abbreviations.
pub const MONTH_NAMES: &[&str] = &[
    "jan",
    "january",
    "feb",
    "february",
    "mar",
    "march",
    "apr",
    "april",
    "may",
    "jun",
    "june",
    "jul",
    "july",
    "aug",
    "august",
    "sep",
    "sept",
    "september",
    "oct",
    "october",
    "nov",
    "november",
    "dec",
    "december",
];

/// Map a month-name prefix (first three letters, lowercase) to its number.
#[must_use]
pub fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.to_lowercase().chars().take(3).collect();
    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_matches_five_families() {
        for line in [
            "Jan 2019 - Dec 2020",
            "June 2019 to Present",
            "2014-2018",
            "2018 - Present",
            "03/2018 - 05/2020",
            "08/2020 to Current",
            "03/18 - 05/20",
            "May 2023",
        ] {
            assert!(DATE_RANGE.is_match(line), "should match: {line}");
        }
    }

    #[test]
    fn date_range_ignores_prose() {
        assert!(!DATE_RANGE.is_match("Built a scheduling system"));
        assert!(!DATE_RANGE.is_match("Acme Corp - Springfield"));
    }

    #[test]
    fn summer_range_captures_both_years() {
        let caps = MULTI_SUMMER_RANGE.captures("May - Aug 2019, 2020").unwrap();
        assert_eq!(&caps["start"], "May");
        assert_eq!(&caps["end"], "Aug");
        assert_eq!(&caps["y1"], "2019");
        assert_eq!(&caps["y2"], "2020");
    }

    #[test]
    fn month_number_accepts_full_and_short_names() {
        assert_eq!(month_number("September"), Some(9));
        assert_eq!(month_number("sep"), Some(9));
        assert_eq!(month_number("May"), Some(5));
        assert_eq!(month_number("notamonth"), None);
    }
}
