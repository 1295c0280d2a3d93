//! Experience entry extraction anchored on date-range lines.
//!
//! Every line matching a date-range pattern inside the experience span opens
//! an entry. Title and company are inferred from the anchor line and a
//! six-line lookback window by a fixed chain of rules; each rule guards
//! itself and only fills what it is confident about, so rule order encodes
//! precedence. Bullets run from the anchor to the next anchor, re-joining
//! visually wrapped lines and dropping location/company echo lines.

use regex::Regex;
use std::sync::LazyLock;

use crate::extract::patterns::{DATE_RANGE, MULTI_SUMMER_RANGE};
use crate::extract::sections::{
    find_section_span, looks_like_heading, HEADING_EXPERIENCE, HEADING_VOLUNTEER,
};
use crate::extract::{is_month_or_year_token, starts_with_bullet_marker, strip_bullet};
use crate::models::ExperienceEntry;

/// "Title (dates)" folded onto one line.
static INLINE_TITLE_PAREN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>[A-Za-z][A-Za-z /&\-]{3,60})\s*\((?P<dates>[^)]+)\)$")
        .expect("inline paren title")
});

/// "Title | dates" folded onto one line.
static INLINE_TITLE_PIPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>[A-Za-z][A-Za-z /&\-]{3,60})\s*\|\s*(?P<dates>.+)$")
        .expect("inline pipe title")
});

/// Separators between a title and company on one line.
static TITLE_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:—|–)\s*|\s+-\s+|\s*\|\s*").expect("title split pattern")
});

/// Dash/pipe separator with trailing space, as in "Company - City".
static DASH_PIPE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:-|\|)\s+").expect("dash pipe split"));

static US_STATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(AL|AK|AZ|AR|CA|CO|CT|DE|FL|GA|HI|ID|IL|IN|IA|KS|KY|LA|ME|MD|MA|MI|MN|MS|MO|MT|NE|NV|NH|NJ|NM|NY|NC|ND|OH|OK|OR|PA|RI|SC|SD|TN|TX|UT|VT|VA|WA|WV|WI|WY)\b")
        .expect("us state pattern")
});

/// Comma followed by a two-letter state code, case-sensitive on purpose.
static COMMA_STATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*[A-Z]{2}\b").expect("comma state pattern"));

static ORG_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(inc|llc|ltd|company|schools?|university|college|hospital|clinic|department|county|city|state|agency|association|foundation|center|centre|district|public|government)\b")
        .expect("org words pattern")
});

/// Org vocabulary for next-role-header detection; slightly wider than
/// [`ORG_WORDS`].
static HEADER_ORG_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(inc|llc|ltd|company|schools?|university|college|hospital|clinic|department|county|city|state|agency|association|foundation|center|centre|district|public|government|group|garden)\b")
        .expect("header org words pattern")
});

static TITLE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(manager|director|engineer|developer|analyst|specialist|coordinator|assistant|teacher|counselor|consultant|intern|lead|supervisor|officer|administrator|facilitator)\b")
        .expect("title words pattern")
});

static PRESENT_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(present|current|now)$").expect("present only pattern"));

static BAD_TITLE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(graduated|relevant coursework)\b").expect("bad title words")
});

static DASH_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\s+").expect("dash space pattern"));

/// Role-header line wrapped into the bullet stream, e.g. "Manager - Acme 2019".
static ROLE_HEADER_WRAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9 /&().'-]{3,80}[–—-].*\b(19|20)\d{2}\b").expect("role header wrap")
});

const COMPANY_SUFFIXES: &[&str] = &[
    " inc",
    " llc",
    " ltd",
    " technologies",
    " labs",
    " analytics",
    " corp",
    " company",
];

const LOOKBACK: usize = 6;

#[derive(Debug, Default)]
struct TitleCompany {
    title: String,
    company: String,
}

/// Anchor line split around its date match, plus the lookback window.
struct AnchorContext<'a> {
    scoped: &'a [String],
    date_idx: usize,
    prefix: String,
    suffix: String,
}

impl<'a> AnchorContext<'a> {
    fn new(scoped: &'a [String], date_idx: usize) -> Self {
        let line = scoped[date_idx].trim();
        let (prefix, suffix) = match DATE_RANGE.find(line) {
            Some(m) => (
                trim_separators(&line[..m.start()]).to_string(),
                trim_separators(&line[m.end()..]).to_string(),
            ),
            None => (String::new(), String::new()),
        };
        Self {
            scoped,
            date_idx,
            prefix,
            suffix,
        }
    }

    fn anchor_line(&self) -> &'a str {
        self.scoped[self.date_idx].trim()
    }

    /// Non-empty lines in the six lines above the anchor.
    fn window(&self) -> Vec<&'a str> {
        let start = self.date_idx.saturating_sub(LOOKBACK);
        self.scoped[start..self.date_idx]
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect()
    }

    fn below(&self) -> Option<&'a str> {
        self.scoped.get(self.date_idx + 1).map(|l| l.trim())
    }
}

fn trim_separators(s: &str) -> &str {
    s.trim_matches(|c: char| matches!(c, ' ' | '-' | '|'))
}

type Rule = fn(&AnchorContext<'_>, &mut TitleCompany);

/// Order encodes precedence; later rules may refine or, for the ALL-CAPS
/// title, overwrite earlier answers.
const TITLE_COMPANY_RULES: &[(&str, Rule)] = &[
    ("inline-title", rule_inline_title),
    ("anchor-line-split", rule_anchor_line_split),
    ("line-below", rule_line_below),
    ("lookback-pair", rule_lookback_pair),
    ("all-caps-title", rule_all_caps_title),
    ("company-keywords", rule_company_keywords),
    ("company-fallback", rule_company_fallback),
];

fn infer_title_company(ctx: &AnchorContext<'_>) -> TitleCompany {
    let mut out = TitleCompany::default();
    for (name, rule) in TITLE_COMPANY_RULES {
        rule(ctx, &mut out);
        tracing::trace!(
            rule = *name,
            title = %out.title,
            company = %out.company,
            "title/company inference"
        );
    }
    if is_bad_title_candidate(&out.title) {
        out.title.clear();
    }
    if is_bad_title_candidate(&out.company) {
        out.company.clear();
    }
    out
}

/// "Title (Jan 2019 - Dec 2020)" or "Title | Jan 2019 - Dec 2020" on the
/// anchor line itself.
fn rule_inline_title(ctx: &AnchorContext<'_>, out: &mut TitleCompany) {
    let line = ctx.anchor_line();
    if let Some(caps) = INLINE_TITLE_PAREN.captures(line) {
        out.title = caps["title"].trim().to_string();
    } else if let Some(caps) = INLINE_TITLE_PIPE.captures(line) {
        out.title = caps["title"].trim().to_string();
    }
}

/// Split the non-date remainder of the anchor line into title and company.
fn rule_anchor_line_split(ctx: &AnchorContext<'_>, out: &mut TitleCompany) {
    if !out.title.is_empty() && !out.company.is_empty() {
        return;
    }
    let candidate = if ctx.prefix.is_empty() {
        ctx.suffix.as_str()
    } else {
        ctx.prefix.as_str()
    };
    if candidate.is_empty() {
        return;
    }
    let mut parts = TITLE_SPLIT.splitn(candidate, 2);
    let first = parts.next().unwrap_or("").trim();
    match parts.next() {
        Some(second) => {
            if out.title.is_empty() {
                out.title = first.to_string();
            }
            if out.company.is_empty() {
                out.company = split_company_location(second.trim());
            }
        }
        None => {
            if out.title.is_empty() {
                out.title = candidate.trim().to_string();
            }
        }
    }
}

/// The line under the anchor, layouts where the date comes first.
fn rule_line_below(ctx: &AnchorContext<'_>, out: &mut TitleCompany) {
    let Some(below) = ctx.below() else { return };
    if below.is_empty() || looks_like_heading(below) || starts_with_bullet_marker(below) {
        return;
    }
    // When the anchor line already names the company, the next line is the title.
    if !ctx.prefix.is_empty()
        && out.title.is_empty()
        && !is_bad_title_candidate(below)
        && !DATE_RANGE.is_match(below)
    {
        out.title = below.to_string();
        if out.company.is_empty() {
            out.company = split_company_location(&ctx.prefix);
        }
    } else if looks_like_title_line(below) && !is_bad_title_candidate(below) {
        if out.title.is_empty() {
            out.title = below.to_string();
        }
        if out.company.is_empty() {
            for look_ahead in 2..5 {
                let Some(candidate) = ctx.scoped.get(ctx.date_idx + look_ahead) else {
                    break;
                };
                let candidate = candidate.trim();
                if candidate.is_empty()
                    || looks_like_heading(candidate)
                    || starts_with_bullet_marker(candidate)
                    || DATE_RANGE.is_match(candidate)
                    || looks_like_title_line(candidate)
                {
                    continue;
                }
                let company = split_company_location(candidate);
                if !company.is_empty() {
                    out.company = company;
                    break;
                }
            }
        }
    } else if out.company.is_empty() {
        out.company = split_company_location(below);
    }
}

/// Adjacent title/company pair at the bottom of the lookback window, in
/// either order.
fn rule_lookback_pair(ctx: &AnchorContext<'_>, out: &mut TitleCompany) {
    let window = ctx.window();
    if window.len() < 2 {
        return;
    }
    let last = window[window.len() - 1];
    let prev = window[window.len() - 2];
    for line in [last, prev] {
        if looks_like_heading(line) || starts_with_bullet_marker(line) || DATE_RANGE.is_match(line)
        {
            return;
        }
    }
    if out.title.is_empty()
        && looks_like_title_line(last)
        && (looks_like_company_line(prev) || out.company.is_empty())
    {
        out.title = last.to_string();
        if out.company.is_empty() {
            out.company = split_company_location(prev);
        }
    }
    if out.title.is_empty() && looks_like_company_line(last) && looks_like_title_line(prev) {
        out.title = prev.to_string();
        if out.company.is_empty() {
            out.company = split_company_location(last);
        }
    }
}

/// A short ALL-CAPS line in the window is the role title in shouting layouts;
/// it overwrites whatever earlier rules guessed.
fn rule_all_caps_title(ctx: &AnchorContext<'_>, out: &mut TitleCompany) {
    for candidate in ctx.window().into_iter().rev() {
        if is_upper(candidate)
            && candidate.split_whitespace().count() <= 8
            && !looks_like_heading(candidate)
            && !is_bad_title_candidate(candidate)
        {
            out.title = title_case(candidate);
            return;
        }
    }
}

fn rule_company_keywords(ctx: &AnchorContext<'_>, out: &mut TitleCompany) {
    if !out.company.is_empty() {
        return;
    }
    for candidate in ctx.window().into_iter().rev() {
        if looks_like_heading(candidate) {
            continue;
        }
        let lower = candidate.to_lowercase();
        if COMPANY_SUFFIXES.iter().any(|s| lower.contains(s)) || candidate.contains(" - ") {
            let company = split_company_location(candidate);
            if !company.is_empty() {
                out.company = company;
            }
            return;
        }
    }
}

fn rule_company_fallback(ctx: &AnchorContext<'_>, out: &mut TitleCompany) {
    if !out.company.is_empty() {
        return;
    }
    for candidate in ctx.window().into_iter().rev() {
        if looks_like_heading(candidate)
            || is_bad_title_candidate(candidate)
            || candidate.contains(':')
            || starts_with_bullet_marker(candidate)
            || candidate.len() > 80
            || candidate.split_whitespace().count() > 12
        {
            continue;
        }
        let company = split_company_location(candidate);
        if !company.is_empty() {
            out.company = company;
            return;
        }
    }
}

/// Company name from a "Company - Location" or "Company, Location" line.
/// The part after a dash/pipe is dropped; a comma tail is dropped only when
/// it reads like a location (US state code or at most four words).
pub(crate) fn split_company_location(line: &str) -> String {
    let cleaned = line
        .trim()
        .trim_matches(|c: char| matches!(c, ' ' | '-' | '|' | '•'));
    if cleaned.is_empty() {
        return String::new();
    }
    let left = DASH_PIPE_SPLIT
        .splitn(cleaned, 2)
        .next()
        .unwrap_or("")
        .trim();
    if let Some((company, location)) = left.split_once(',') {
        let location = location.trim();
        if US_STATE.is_match(location) || location.split_whitespace().count() <= 4 {
            return company.trim().to_string();
        }
    }
    left.to_string()
}

/// "City, ST"-shaped line: comma, a US state code, and at most five words.
fn looks_like_location_line(line: &str) -> bool {
    let s = line.trim();
    s.contains(',') && US_STATE.is_match(s) && s.split_whitespace().count() <= 5
}

fn looks_like_company_line(s: &str) -> bool {
    DASH_SPACE.is_match(s) || s.contains('|') || COMMA_STATE.is_match(s) || ORG_WORDS.is_match(s)
}

fn looks_like_title_line(s: &str) -> bool {
    s.contains('/') || TITLE_WORDS.is_match(s)
}

/// Dates, bare months/years, and filler lines never work as titles.
pub(crate) fn is_bad_title_candidate(line: &str) -> bool {
    let s = line.trim();
    s.is_empty()
        || DATE_RANGE.is_match(s)
        || is_month_or_year_token(s)
        || PRESENT_ONLY.is_match(s)
        || BAD_TITLE_WORDS.is_match(s)
}

/// At least one cased character and no lowercase ones.
fn is_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Every run of cased characters starts uppercase and continues lowercase.
fn is_title_case(s: &str) -> bool {
    let mut cased = false;
    let mut prev_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            cased = true;
            prev_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            cased = true;
        } else {
            prev_cased = false;
        }
    }
    cased
}

/// Capitalize the first letter of each alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut start_of_run = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if start_of_run {
                out.extend(c.to_uppercase());
                start_of_run = false;
            } else {
                out.extend(c.to_lowercase());
            }
        } else {
            out.push(c);
            start_of_run = true;
        }
    }
    out
}

fn collect_date_anchors(scoped: &[String]) -> Vec<usize> {
    scoped
        .iter()
        .enumerate()
        .filter(|(_, line)| DATE_RANGE.is_match(line))
        .map(|(idx, _)| idx)
        .collect()
}

/// Duration text for an anchor line. The seasonal compound form "May - Aug
/// 2019, 2020" is rewritten as "May 2019 - Aug 2020".
fn extract_duration(line: &str) -> String {
    if let Some(caps) = MULTI_SUMMER_RANGE.captures(line) {
        return format!(
            "{} {} - {} {}",
            caps["start"].trim(),
            &caps["y1"],
            caps["end"].trim(),
            &caps["y2"]
        );
    }
    DATE_RANGE
        .find(line)
        .map_or_else(String::new, |m| m.as_str().trim().to_string())
}

/// Extract experience entries from the experience span (or the whole document
/// when no heading exists). Entries with no title, company, and bullets are
/// discarded.
#[must_use]
pub fn parse_experience(lines: &[String]) -> Vec<ExperienceEntry> {
    let scoped = match find_section_span(lines, &HEADING_EXPERIENCE) {
        Some((start, end)) => &lines[start..end],
        None => lines,
    };
    let anchors = collect_date_anchors(scoped);
    let mut entries = Vec::new();

    for (k, &date_idx) in anchors.iter().enumerate() {
        let ctx = AnchorContext::new(scoped, date_idx);
        let duration = extract_duration(ctx.anchor_line());
        let mut inferred = infer_title_company(&ctx);

        // The text after the date sometimes holds the title: "Jan 2019 -
        // Dec 2020 Software Developer".
        if inferred.title.is_empty() && !duration.is_empty() {
            let remainder = ctx.suffix.trim();
            if !remainder.is_empty() && !looks_like_heading(remainder) {
                inferred.title = title_case(remainder);
            }
        }

        if inferred.company.is_empty() {
            for look_ahead in 1..3 {
                let Some(candidate) = scoped.get(date_idx + look_ahead) else {
                    break;
                };
                let candidate = candidate.trim();
                if candidate.is_empty()
                    || looks_like_heading(candidate)
                    || starts_with_bullet_marker(candidate)
                    || DATE_RANGE.is_match(candidate)
                {
                    continue;
                }
                if candidate.contains(" | ") || candidate.contains(',') || candidate.contains(" - ")
                {
                    let company = split_company_location(candidate);
                    if !company.is_empty() {
                        inferred.company = company;
                        break;
                    }
                }
            }
        }

        let end_idx = anchors.get(k + 1).copied().unwrap_or(scoped.len());
        let bullets = collect_bullets(scoped, date_idx, end_idx, &inferred.company);

        if inferred.title.is_empty() && inferred.company.is_empty() && bullets.is_empty() {
            continue;
        }
        entries.push(ExperienceEntry {
            title: inferred.title,
            company: inferred.company,
            duration,
            bullets,
        });
    }
    entries
}

/// Bullet lines between an anchor and the next, with wrapped lines re-joined
/// and location/company echo lines dropped. Non-bulleted paragraphs still
/// count as bullet text.
fn collect_bullets(
    scoped: &[String],
    date_idx: usize,
    end_idx: usize,
    company: &str,
) -> Vec<String> {
    let company_lower = company.trim().to_lowercase();
    let compact_company: String = company_lower.split_whitespace().collect();
    let mut bullets: Vec<String> = Vec::new();

    for i in date_idx + 1..end_idx {
        let line = scoped[i].trim();
        if looks_like_heading(line) {
            break;
        }
        // A short ALL-CAPS line opens the next role.
        if is_upper(line) && line.split_whitespace().count() <= 8 && !starts_with_bullet_marker(line)
        {
            break;
        }
        if !line.is_empty()
            && !starts_with_bullet_marker(line)
            && !DATE_RANGE.is_match(line)
            && next_role_header_follows(scoped, i, end_idx, line)
        {
            break;
        }

        if starts_with_bullet_marker(line) {
            let cleaned = strip_bullet(line);
            if !cleaned.is_empty() && cleaned != "-" && !looks_like_location_line(&cleaned) {
                bullets.push(cleaned);
            }
            continue;
        }

        if line.is_empty() || line == "-" || DATE_RANGE.is_match(line) {
            continue;
        }
        if looks_like_location_line(line) {
            continue;
        }
        // Company echo lines right after the date line are not bullets.
        let lower = line.to_lowercase();
        if !company_lower.is_empty() && lower == company_lower {
            continue;
        }
        if !compact_company.is_empty() {
            let compact_line: String = lower.split_whitespace().collect();
            if compact_line.contains(&compact_company) {
                continue;
            }
        }

        if bullets.is_empty() {
            bullets.push(line.to_string());
            continue;
        }
        let prev_ends_open = bullets.last().is_some_and(|prev| {
            let p = prev.trim_end();
            p.ends_with(',')
                || p.ends_with("and")
                || p.ends_with('&')
                || p.ends_with('+')
                || p.ends_with('/')
        });
        let is_wrap = line.chars().next().is_some_and(char::is_lowercase)
            || prev_ends_open
            || ROLE_HEADER_WRAP.is_match(line);
        if is_wrap {
            let last = bullets.last_mut().expect("non-empty bullets");
            last.push(' ');
            last.push_str(line);
        } else {
            bullets.push(line.to_string());
        }
    }
    bullets
}

/// True when `line` reads like the header of the next role whose date line
/// has not arrived yet: short, header-shaped, followed by a non-date line and
/// then a date line.
fn next_role_header_follows(scoped: &[String], i: usize, end_idx: usize, line: &str) -> bool {
    let header_shaped = line.split_whitespace().count() <= 6
        && (line.contains('/')
            || is_upper(line)
            || is_title_case(line)
            || HEADER_ORG_WORDS.is_match(line)
            || TITLE_WORDS.is_match(line));
    if !header_shaped {
        return false;
    }
    let upper = (end_idx + 1).min(scoped.len());
    let mut following = scoped[i + 1..upper]
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty());
    let Some(next_line) = following.next() else {
        return false;
    };
    let Some(next_next) = following.next() else {
        return false;
    };
    !starts_with_bullet_marker(next_line)
        && !DATE_RANGE.is_match(next_line)
        && DATE_RANGE.is_match(next_next)
}

/// Volunteer roles: no date anchors, so each block is "title / company /
/// bullets" separated by blank lines. Durations stay empty.
#[must_use]
pub fn parse_volunteer(lines: &[String]) -> Vec<ExperienceEntry> {
    let Some((start, end)) = find_section_span(lines, &HEADING_VOLUNTEER) else {
        return Vec::new();
    };
    let scoped = &lines[start..end];
    let mut entries = Vec::new();

    let mut i = 0;
    while i < scoped.len() {
        let line = scoped[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }
        if looks_like_heading(line) {
            break;
        }

        let title = line.to_string();
        let mut company = String::new();

        let mut j = i + 1;
        while j < scoped.len() && scoped[j].trim().is_empty() {
            j += 1;
        }
        if let Some(next_line) = scoped.get(j) {
            let next_line = next_line.trim();
            if !next_line.is_empty()
                && !starts_with_bullet_marker(next_line)
                && !looks_like_heading(next_line)
            {
                company = split_company_location(next_line);
                j += 1;
            }
        }

        let mut bullets: Vec<String> = Vec::new();
        while j < scoped.len() {
            let current = scoped[j].trim();
            if current.is_empty() || looks_like_heading(current) {
                break;
            }
            if starts_with_bullet_marker(current) {
                let cleaned = strip_bullet(current);
                if !cleaned.is_empty() {
                    bullets.push(cleaned);
                }
            } else if let Some(last) = bullets.last_mut() {
                last.push(' ');
                last.push_str(current);
            } else {
                bullets.push(current.to_string());
            }
            j += 1;
        }

        entries.push(ExperienceEntry {
            title,
            company,
            duration: String::new(),
            bullets,
        });
        i = j + 1;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(|l| l.trim().to_string()).collect()
    }

    #[test]
    fn inline_paren_title_on_anchor_line() {
        let doc = lines("Experience\nResearch Assistant (Jan 2019 - May 2020)");
        let entries = parse_experience(&doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Research Assistant");
        assert_eq!(entries[0].duration, "Jan 2019 - May 2020");
    }

    #[test]
    fn inline_pipe_title_on_anchor_line() {
        let doc = lines("Experience\nData Analyst | Jun 2020 - Present");
        let entries = parse_experience(&doc);
        assert_eq!(entries[0].title, "Data Analyst");
    }

    #[test]
    fn anchor_line_split_yields_title_and_company() {
        let doc = lines("Experience\nSenior Developer — Globex Corp | Jan 2019 - Dec 2020");
        let entries = parse_experience(&doc);
        assert_eq!(entries[0].title, "Senior Developer");
        assert_eq!(entries[0].company, "Globex Corp");
    }

    #[test]
    fn title_below_date_with_company_lookahead() {
        let doc = lines(
            "Experience\nJan 2019 - Dec 2020\nMarketing Manager\n\nBright Agency, Portland, OR\n- Ran campaigns",
        );
        let entries = parse_experience(&doc);
        assert_eq!(entries[0].title, "Marketing Manager");
        assert_eq!(entries[0].company, "Bright Agency");
    }

    #[test]
    fn lookback_pair_and_all_caps_title() {
        let doc = lines(
            "Experience\nJUNIOR ENGINEER\nAcme Corp - Springfield, IL\nJan 2019 - Dec 2020\n- Built X",
        );
        let entries = parse_experience(&doc);
        assert_eq!(entries[0].title, "Junior Engineer");
        assert_eq!(entries[0].company, "Acme Corp");
        assert_eq!(entries[0].bullets, vec!["Built X"]);
    }

    #[test]
    fn company_keyword_rule_fires_without_title_words() {
        let doc = lines("Experience\nBarista\nBeanery LLC\n2019 - 2020\n- Poured");
        let entries = parse_experience(&doc);
        assert_eq!(entries[0].company, "Beanery LLC");
    }

    #[test]
    fn split_company_location_drops_location_tails() {
        assert_eq!(split_company_location("Acme Corp - Springfield, IL"), "Acme Corp");
        assert_eq!(split_company_location("Initech, Austin TX"), "Initech");
        assert_eq!(split_company_location("Contoso Ltd"), "Contoso Ltd");
        assert_eq!(split_company_location(""), "");
    }

    #[test]
    fn bad_title_candidates_rejected() {
        assert!(is_bad_title_candidate("Jan 2019 - Dec 2020"));
        assert!(is_bad_title_candidate("September"));
        assert!(is_bad_title_candidate("Present"));
        assert!(is_bad_title_candidate("Graduated with honors"));
        assert!(is_bad_title_candidate(""));
        assert!(!is_bad_title_candidate("Engineer"));
    }

    #[test]
    fn wrapped_bullet_lines_are_rejoined() {
        let doc = lines(
            "Experience\nEngineer\nAcme Inc\nJan 2019 - Dec 2020\n- Led a team across\nmultiple regions\n- Shipped",
        );
        let entries = parse_experience(&doc);
        assert_eq!(
            entries[0].bullets,
            vec!["Led a team across multiple regions", "Shipped"]
        );
    }

    #[test]
    fn location_and_company_echo_lines_are_not_bullets() {
        let doc = lines(
            "Experience\nEngineer\nAcme Inc\nJan 2019 - Dec 2020\nAcme Inc\nSpringfield, IL\n- Built X",
        );
        let entries = parse_experience(&doc);
        assert_eq!(entries[0].bullets, vec!["Built X"]);
    }

    #[test]
    fn bullets_stop_at_next_role_header() {
        let doc = lines(
            "Experience\nCashier\nTarget Inc\nJan 2019 - Dec 2020\n- Rang registers\nStore Manager\nMegamart, Minneapolis, MN\nJun 2021 - Dec 2022\n- Managed",
        );
        let entries = parse_experience(&doc);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].bullets, vec!["Rang registers"]);
        assert_eq!(entries[1].title, "Store Manager");
        assert_eq!(entries[1].bullets, vec!["Managed"]);
    }

    #[test]
    fn seasonal_compound_duration_is_rewritten() {
        let doc = lines("Experience\nCamp Counselor\nPine Camp Company\nMay - Aug 2019, 2020\n- Led hikes");
        let entries = parse_experience(&doc);
        assert_eq!(entries[0].duration, "May 2019 - Aug 2020");
    }

    #[test]
    fn entries_without_any_content_are_discarded() {
        let doc = lines("Experience\n2019 - 2020\n\nSkills\nPython");
        assert!(parse_experience(&doc).is_empty());
    }

    #[test]
    fn volunteer_blocks_parse_without_dates() {
        let doc = lines(
            "Volunteer Experience\nMentor\nBig Brothers, Chicago IL\n- Guided students\n- Ran workshops\n\nFood Bank Volunteer\nGreater Food Depository\nSorted donations",
        );
        let entries = parse_volunteer(&doc);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Mentor");
        assert_eq!(entries[0].company, "Big Brothers");
        assert_eq!(entries[0].bullets, vec!["Guided students", "Ran workshops"]);
        assert_eq!(entries[1].title, "Food Bank Volunteer");
        assert_eq!(entries[1].company, "Greater Food Depository");
        assert_eq!(entries[1].bullets, vec!["Sorted donations"]);
        assert!(entries.iter().all(|e| e.duration.is_empty()));
    }

    #[test]
    fn volunteer_absent_section_is_empty() {
        assert!(parse_volunteer(&lines("Experience\nEngineer")).is_empty());
    }

    #[test]
    fn case_helpers_match_expected_shapes() {
        assert!(is_upper("JUNIOR ENGINEER"));
        assert!(!is_upper("Junior Engineer"));
        assert!(!is_upper("2019 - 2020"));
        assert!(is_title_case("Store Manager"));
        assert!(!is_title_case("multiple regions"));
        assert_eq!(title_case("JUNIOR ENGINEER"), "Junior Engineer");
        assert_eq!(title_case("store/floor LEAD"), "Store/Floor Lead");
    }
}
