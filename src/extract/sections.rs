//! Section segmentation over normalized lines.
//!
//! A heading line is "clean" only if the entire line (after stripping trailing
//! punctuation) matches a canonical heading regex. That keeps job titles that
//! merely start with a heading word ("Experience with distributed systems")
//! from being misread as section breaks.

use regex::Regex;
use std::sync::LazyLock;

pub static HEADING_EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(professional\s+experience|work\s+experience|relevant\s+experience|experience|work\s+history)\b",
    )
    .expect("experience heading")
});

pub static HEADING_SKILLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(skills\s+summary|technical\s+skills|relevant\s+skills|clinical\s+skills|skills|technologies|tools)\b",
    )
    .expect("skills heading")
});

pub static HEADING_EDUCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^education\b").expect("education heading"));

pub static HEADING_PROJECTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^projects?\b").expect("projects heading"));

pub static HEADING_CERTIFICATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(licensure\s*&\s*certifications|licensure|licenses?\s*&\s*certifications|certifications?)\b",
    )
    .expect("certifications heading")
});

pub static HEADING_VOLUNTEER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^volunteer\s+experience\b").expect("volunteer heading"));

/// Every heading the segmenter knows about; terminates any section span.
pub static MASTER_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(professional\s+summary|summary|skills\s+summary|technical\s+skills|clinical\s+skills|skills|technologies|tools|relevant\s+skills|professional\s+experience|work\s+experience|relevant\s+experience|experience|work\s+history|education|projects?|(licensure\s*&\s*certifications|licensure|licenses?\s*&\s*certifications|certifications?)|publications?|volunteer\s+experience|additional\s+information)\b",
    )
    .expect("master heading")
});

/// True when the whole line is one known heading (trailing " :|-" ignored).
#[must_use]
pub fn is_clean_heading_line(line: &str, heading: &Regex) -> bool {
    let stripped = line.trim();
    match heading.find(stripped) {
        Some(m) if m.start() == 0 => stripped[m.end()..]
            .trim_matches(|c| matches!(c, ' ' | ':' | '|' | '-'))
            .is_empty(),
        _ => false,
    }
}

/// True only for *section* headings, never for job titles.
#[must_use]
pub fn looks_like_heading(line: &str) -> bool {
    let stripped = line.trim();
    !stripped.is_empty() && is_clean_heading_line(stripped, &MASTER_HEADING)
}

/// Line span of a section: from just after the first clean `heading` match to
/// the next clean master heading, or end of text. Returns None when the
/// heading is absent (callers then fall back to the whole document).
///
/// Only the first occurrence of a heading is used; a second block under the
/// same heading later in the document is not merged in.
#[must_use]
pub fn find_section_span(lines: &[String], heading: &Regex) -> Option<(usize, usize)> {
    let start = lines
        .iter()
        .position(|line| is_clean_heading_line(line, heading))?
        + 1;

    let end = lines[start..]
        .iter()
        .position(|line| is_clean_heading_line(line, &MASTER_HEADING))
        .map_or(lines.len(), |offset| start + offset);

    Some((start, end))
}
