//! Education, projects, certifications, and clearance extraction.
//!
//! These are keyword scanners rather than structured parsers. Education keeps
//! degree/institution lines plus one continuation line; certifications prefer
//! the dedicated section and fall back to "Credentials:" label lines anywhere
//! in the document; clearances run over raw text so the matched phrase keeps
//! its original casing.

use regex::Regex;
use std::sync::LazyLock;

use crate::extract::sections::{
    find_section_span, looks_like_heading, HEADING_CERTIFICATIONS, HEADING_EDUCATION,
    HEADING_PROJECTS,
};
use crate::extract::skills::tokenize_list_content;
use crate::extract::{strip_bullet, unique_preserve_order};

static DEGREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(b\.?a\.?|b\.?s\.?|b\.tech|bachelor|bs|ba|ms|m\.?s\.?|m\.sc|master|mba|ph\.?d|phd|associate|beng|meng|jd|md)\b",
    )
    .expect("degree pattern")
});

static INSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(university|college|institute|school|academy|polytechnic|tech)\b")
        .expect("institution pattern")
});

static CREDENTIALS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcredentials?\b").expect("credentials pattern"));

static CERT_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(cert|certified|certification|license|licensed|licensure|credential|registered)\b")
        .expect("cert keywords pattern")
});

/// Parenthesized credential acronym like "(CPR)" or "(PMP)".
static CERT_ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([A-Z]{2,6}\)").expect("cert acronym pattern"));

/// Non-certification prose that trails certification lines in flowing text.
static CERT_TRAILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(systems?\s+exposure|other\s+notes|eligible\s+to\s+work|available\s+for|professional\s+interests)\b",
    )
    .expect("cert trailing pattern")
});

static CLEARANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(clearance|secret|ts/sci|public trust|us citizen|citizenship|work authorization|authorized to work)\b",
    )
    .expect("clearance pattern")
});

static LIST_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;,|/\\]").expect("list separator probe"));

/// Degree and institution lines, each with at most one continuation line,
/// joined with newlines. Without an Education heading the whole document is
/// scanned.
#[must_use]
pub fn parse_education(lines: &[String]) -> String {
    let scoped = match find_section_span(lines, &HEADING_EDUCATION) {
        Some((start, end)) => &lines[start..end],
        None => lines,
    };

    let mut found = Vec::new();
    for (i, line) in scoped.iter().enumerate() {
        let cleaned = strip_bullet(line);
        if cleaned.is_empty() || CREDENTIALS_LABEL.is_match(&cleaned) {
            continue;
        }
        if DEGREE.is_match(&cleaned) || INSTITUTION.is_match(&cleaned) {
            let mut item = cleaned;
            if let Some(next) = scoped.get(i + 1) {
                let next = next.trim();
                if !next.is_empty() && next.len() < 140 && !looks_like_heading(next) {
                    item.push(' ');
                    item.push_str(next);
                }
            }
            found.push(item);
        }
    }
    unique_preserve_order(found).join("\n")
}

/// Non-heading lines of the Projects section, bullet markers stripped.
#[must_use]
pub fn parse_projects(lines: &[String]) -> Vec<String> {
    let Some((start, end)) = find_section_span(lines, &HEADING_PROJECTS) else {
        return Vec::new();
    };
    let items = lines[start..end]
        .iter()
        .map(|line| strip_bullet(line))
        .filter(|line| !line.is_empty() && !looks_like_heading(line));
    unique_preserve_order(items)
}

/// Certification names from the dedicated section, or from "Credentials:"
/// label lines anywhere in the document when no section exists.
#[must_use]
pub fn parse_certifications(lines: &[String]) -> Vec<String> {
    let mut found = Vec::new();

    if let Some((start, end)) = find_section_span(lines, &HEADING_CERTIFICATIONS) {
        for line in &lines[start..end] {
            let mut cleaned = strip_bullet(line);
            if cleaned.is_empty() {
                continue;
            }
            // Flowing text often runs past the certifications into other
            // notes; cut at the first trailing-prose marker.
            if let Some(m) = CERT_TRAILING.find(&cleaned) {
                cleaned.truncate(m.start());
                let trimmed = cleaned.trim_end().len();
                cleaned.truncate(trimmed);
            }
            if cleaned.is_empty() {
                continue;
            }
            if LIST_SEPARATORS.is_match(&cleaned) {
                found.extend(
                    tokenize_list_content(&cleaned)
                        .into_iter()
                        .filter(|item| looks_like_cert_line(item)),
                );
            } else if looks_like_cert_line(&cleaned) {
                found.push(cleaned);
            }
        }
    }

    if found.is_empty() {
        found = credentials_label_fallback(lines);
    }
    unique_preserve_order(found)
}

/// Scan the whole document for "Credentials: ..." label lines, joining wrapped
/// continuation lines until a blank line, heading, or bullet.
fn credentials_label_fallback(lines: &[String]) -> Vec<String> {
    let mut found = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let cleaned = strip_bullet(&lines[i]);
        if !CREDENTIALS_LABEL.is_match(&cleaned) {
            i += 1;
            continue;
        }
        let mut content = match cleaned.split_once(':') {
            Some((_, rest)) => rest.trim().to_string(),
            None => cleaned,
        };
        let mut j = i + 1;
        while j < lines.len() {
            let next = lines[j].trim();
            if next.is_empty() || looks_like_heading(next) || crate::extract::starts_with_bullet_marker(next) {
                break;
            }
            content.push(' ');
            content.push_str(next);
            j += 1;
        }
        found.extend(
            tokenize_list_content(&content)
                .into_iter()
                .filter(|item| looks_like_cert_line(item)),
        );
        i = j;
    }
    found
}

fn looks_like_cert_line(line: &str) -> bool {
    CERT_KEYWORDS.is_match(line) || CERT_ACRONYM.is_match(line)
}

/// First clearance/work-authorization phrase in the raw text, or empty.
/// Runs over unnormalized text to preserve the source casing.
#[must_use]
pub fn parse_clearances(text: &str) -> String {
    CLEARANCE
        .find(text)
        .map_or_else(String::new, |m| m.as_str().to_string())
}
