//! Deterministic, offline resume information extraction.
//!
//! Converts unstructured, artifact-laden resume text (already extracted from
//! PDF/DOCX upstream) into a structured [`ParsedResume`] through layered
//! heuristics: normalize glyphs and layout, segment sections by heading,
//! anchor experience entries on date-range lines, and scan the remaining
//! sections with keyword/pattern rules. No extractor fails on malformed
//! input; every field defaults to empty when no confident answer exists.
//!
//! Extraction is skill-section-scoped on purpose: skills are parsed only
//! inside the skills span and experience only inside the experience span,
//! which keeps summary/contact noise out of the output.

pub mod education;
pub mod evaluate;
pub mod experience;
pub mod normalize;
pub mod patterns;
pub mod sections;
pub mod skills;
pub mod years;

pub use evaluate::{evaluate_jsonl, EvalReport};
pub use years::ReferenceDate;

use regex::Regex;
use std::sync::LazyLock;

use crate::models::ParsedResume;

static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*]\s+)+").expect("bullet prefix pattern"));

/// Strip leading bullet markers ("- ", "* ", possibly stacked) from a line.
pub(crate) fn strip_bullet(line: &str) -> String {
    BULLET_PREFIX.replace(line, "").trim().to_string()
}

/// True when the line opens with a bullet marker character.
pub(crate) fn starts_with_bullet_marker(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('-') || trimmed.starts_with('*')
}

/// Case-insensitive deduplication keeping first-seen order.
pub(crate) fn unique_preserve_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    let mut ordered = Vec::new();
    for item in items {
        let key = item.trim().to_lowercase();
        if !key.is_empty() && seen.insert(key) {
            ordered.push(item.trim().to_string());
        }
    }
    ordered
}

/// Bare month name or four-digit year; useless as a title or skill.
pub(crate) fn is_month_or_year_token(s: &str) -> bool {
    let token: String = s
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    patterns::MONTH_NAMES.contains(&token.as_str())
        || (token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()))
}

/// Parse resume text into a structured record, using today's date for
/// open-ended ranges.
#[must_use]
pub fn parse_resume(text: &str) -> ParsedResume {
    parse_resume_at(text, ReferenceDate::today())
}

/// Like [`parse_resume`] but with an explicit reference date, so duration
/// arithmetic is reproducible.
#[must_use]
pub fn parse_resume_at(text: &str, today: ReferenceDate) -> ParsedResume {
    let lines = normalize::normalized_lines(text);

    let mut experience = experience::parse_experience(&lines);
    experience.extend(experience::parse_volunteer(&lines));

    let years_experience = years::resolve(text, &experience, today);
    let education = education::parse_education(&lines);
    let projects = education::parse_projects(&lines);
    let certifications = education::parse_certifications(&lines);
    let clearances_or_work_auth = education::parse_clearances(text);
    let skills_by_category = skills::parse_skill_categories(&lines);
    let skills = skills::flatten(&skills_by_category);

    let resume = ParsedResume {
        years_experience,
        education,
        skills,
        skills_by_category,
        experience,
        projects,
        certifications,
        clearances_or_work_auth,
    };

    let empty = resume.empty_fields();
    if !empty.is_empty() {
        tracing::debug!("no confident answer for: {}", empty.join(", "));
    }
    resume
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Experience\nJUNIOR ENGINEER\nAcme Corp — Springfield, IL\nJan 2019 - Dec 2020\n- Built X\n- Shipped Y\n\nEducation\nB.S. Computer Science, State University\n";

    #[test]
    fn sample_resume_extracts_one_entry() {
        let parsed = parse_resume(SAMPLE);
        assert_eq!(parsed.experience.len(), 1);
        let entry = &parsed.experience[0];
        assert_eq!(entry.title, "Junior Engineer");
        assert_eq!(entry.company, "Acme Corp");
        assert_eq!(entry.duration, "Jan 2019 - Dec 2020");
        assert_eq!(entry.bullets, vec!["Built X", "Shipped Y"]);
    }

    #[test]
    fn sample_resume_extracts_education() {
        let parsed = parse_resume(SAMPLE);
        assert!(parsed.education.contains("B.S. Computer Science"));
        assert!(parsed.education.contains("State University"));
    }

    #[test]
    fn text_without_headings_returns_empty_record() {
        let parsed = parse_resume("just some prose\nwith nothing resume-like\n");
        assert_eq!(parsed.years_experience, 0.0);
        assert!(parsed.experience.is_empty());
        assert!(parsed.skills.is_empty());
        assert!(parsed.projects.is_empty());
        assert!(parsed.certifications.is_empty());
        assert!(parsed.education.is_empty());
    }

    #[test]
    fn empty_input_returns_empty_record() {
        let parsed = parse_resume("");
        assert!(parsed.experience.is_empty());
        assert_eq!(parsed.years_experience, 0.0);
    }

    #[test]
    fn every_entry_has_some_content() {
        let text = "Experience\n2019 - 2020\n\n2021 - 2022\nStaff Engineer\nInitech, Austin TX\n- Did things\n";
        let parsed = parse_resume(text);
        for entry in &parsed.experience {
            assert!(
                !entry.is_empty(),
                "entry with only a duration should be discarded: {entry:?}"
            );
        }
    }

    #[test]
    fn explicit_years_beat_inferred_durations() {
        let text = "Summary\n10 years of experience in QA.\n\nExperience\nTester\nAcme - Springfield, IL\n2019 - 2020\n- Tested\n";
        let parsed = parse_resume(text);
        assert_eq!(parsed.years_experience, 10.0);
    }

    #[test]
    fn strip_bullet_removes_stacked_markers() {
        assert_eq!(strip_bullet("- - Built X"), "Built X");
        assert_eq!(strip_bullet("* Shipped"), "Shipped");
        assert_eq!(strip_bullet("no marker"), "no marker");
    }

    #[test]
    fn unique_preserve_order_is_case_insensitive() {
        let out = unique_preserve_order(vec![
            "Python".to_string(),
            "python".into(),
            " SQL ".into(),
            "sql".into(),
        ]);
        assert_eq!(out, vec!["Python", "SQL"]);
    }

    #[test]
    fn month_or_year_tokens_detected() {
        assert!(is_month_or_year_token("September"));
        assert!(is_month_or_year_token(" 2019 "));
        assert!(!is_month_or_year_token("Python"));
        assert!(!is_month_or_year_token("19"));
    }
}
