//! Skill categorization inside the skills span.
//!
//! Lines are first re-joined where the source visually wrapped them, then
//! bucketed under `Label:` categories (or the default "Skills" bucket),
//! stripped of lead-in prose, tokenized on list separators, and filtered
//! down to plausible list items.

use regex::Regex;
use std::sync::LazyLock;

use crate::extract::sections::{self, HEADING_SKILLS};
use crate::extract::{is_month_or_year_token, starts_with_bullet_marker, unique_preserve_order};
use crate::models::SkillCategories;

/// Fallback bucket for unlabeled skill lines.
const DEFAULT_BUCKET: &str = "Skills";

const STOPWORDS: &[&str] = &[
    "and", "or", "of", "in", "for", "the", "with", "to", "on", "at", "a", "an", "by", "from",
    "as", "&",
];

static LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][A-Za-z0-9 &/+\-]{0,60}):\s*(\S.*)$").expect("label line pattern")
});

/// "Label: content" probe used when deciding whether two lines may merge.
static LABEL_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*\S").expect("label content pattern"));

/// Introductory phrases before a skills list, stripped prior to tokenization.
static LEAD_INS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bwell-versed in(?: the use of)?\b",
        r"\bexperienced in\b",
        r"\bexperience in\b",
        r"\bproficient in\b",
        r"\bskilled in\b",
        r"\bknowledge of\b",
        r"\bfamiliar with\b",
        r"\bexpertise in\b",
        r"\busing\b",
        r"\butilizing\b",
        r"\bincluding\b",
    ]
    .iter()
    .map(|pat| Regex::new(&format!("(?i){pat}")).expect("lead-in pattern"))
    .collect()
});

/// The remainder after a lead-in must itself read as a list.
static LIST_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[;,]|\band\b").expect("list hint pattern"));

static LIST_SEP_PROBE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;,|/\\]").expect("list separator probe"));
static LIST_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[,;|/\\]\s*").expect("list split pattern"));
static AND_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\band\b").expect("and pattern"));
static LEADING_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(and|&)\s+").expect("leading and pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}[\s.-]?\d{3}[\s.-]?\d{4}\b").expect("phone pattern"));
static PRESENT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(present|current)\b").expect("present pattern"));
static CONTACT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(location|phone|email|linkedin|github)\b").expect("contact prefix")
});

/// Tokenize the skills span into a category map. "Skills" is the default
/// bucket; a `Label: content` line switches the active category until the
/// next label or heading reset.
#[must_use]
pub fn parse_skill_categories(lines: &[String]) -> SkillCategories {
    let scoped: &[String] = match sections::find_section_span(lines, &HEADING_SKILLS) {
        Some((start, end)) => &lines[start..end],
        None => &[],
    };
    let mut categories = SkillCategories::new();
    if scoped.is_empty() {
        return categories;
    }

    let merged = merge_wrapped_lines(scoped);

    let mut current_label: Option<String> = None;
    for line in &merged {
        let s = line.trim();
        if s.is_empty() || sections::looks_like_heading(s) {
            current_label = None;
            continue;
        }

        if let Some(caps) = LABEL_LINE.captures(s) {
            let label = caps[1].trim().to_string();
            let content = strip_lead_in(caps[2].trim());
            push_tokens(&mut categories, &label, &content);
            current_label = Some(label);
            continue;
        }

        let label = current_label.as_deref().unwrap_or(DEFAULT_BUCKET);
        push_tokens(&mut categories, label, &strip_lead_in(s));
    }

    for (_, items) in categories.iter_mut() {
        let deduped = unique_preserve_order(items.drain(..));
        *items = deduped;
    }
    categories
}

/// Flatten a category map into one first-seen-order-deduplicated list.
#[must_use]
pub fn flatten(categories: &SkillCategories) -> Vec<String> {
    unique_preserve_order(
        categories
            .iter()
            .flat_map(|(_, items)| items.iter().cloned()),
    )
}

fn push_tokens(categories: &mut SkillCategories, label: &str, content: &str) {
    for token in tokenize_list_content(content) {
        if is_plausible_skill_item(&token) {
            categories.entry_mut(label).push(token);
        }
    }
}

/// Re-join lines the source visually wrapped: a line ending in a comma,
/// "and", or "&" continued by a lowercase-starting line. Headings, bullets,
/// and "Label:" lines never merge.
fn merge_wrapped_lines(scoped: &[String]) -> Vec<String> {
    let mut merged = Vec::new();
    let mut buffer = String::new();
    for line in scoped {
        let s = line.trim();
        if s.is_empty() || sections::looks_like_heading(s) {
            if !buffer.is_empty() {
                merged.push(std::mem::take(&mut buffer));
            }
            continue;
        }
        if !buffer.is_empty() && should_merge_skill_lines(&buffer, s) {
            buffer.push(' ');
            buffer.push_str(s);
            continue;
        }
        if !buffer.is_empty() {
            merged.push(std::mem::take(&mut buffer));
        }
        buffer = s.to_string();
    }
    if !buffer.is_empty() {
        merged.push(buffer);
    }
    merged
}

fn should_merge_skill_lines(prev: &str, next: &str) -> bool {
    let prev = prev.trim();
    let next = next.trim();
    if prev.is_empty() || next.is_empty() {
        return false;
    }
    if sections::looks_like_heading(prev) || sections::looks_like_heading(next) {
        return false;
    }
    if LABEL_CONTENT.is_match(prev) || LABEL_CONTENT.is_match(next) {
        return false;
    }
    if starts_with_bullet_marker(prev) || starts_with_bullet_marker(next) {
        return false;
    }
    if prev.contains(',') && next.chars().next().is_some_and(char::is_lowercase) {
        return true;
    }
    prev.ends_with("and") || prev.ends_with('&')
}

/// Remove lead-in phrases ("proficient in", "including", ...) so prose
/// degrades to a list. Applies only when the remainder still reads list-like.
pub(crate) fn strip_lead_in(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let mut last_end = None;
    for re in LEAD_INS.iter() {
        for m in re.find_iter(s) {
            last_end = Some(m.end());
        }
    }
    if let Some(end) = last_end {
        let mut remainder = s[end..]
            .trim_matches(|c| matches!(c, ' ' | ':' | ';' | '-'))
            .to_string();
        if let Some(pos) = remainder.find('.') {
            remainder = remainder[..pos].trim().to_string();
        }
        if LIST_HINT.is_match(&remainder) {
            return remainder;
        }
    }
    s.to_string()
}

/// Split comma/semicolon/pipe/slash lists and repair the "Name (Sub1"
/// artifacts that splitting "Name (Sub1, Sub2)" produces.
pub(crate) fn tokenize_list_content(s: &str) -> Vec<String> {
    let mut s = s.to_string();
    if LIST_SEP_PROBE.is_match(&s) {
        s = AND_WORD.replace_all(&s, ",").into_owned();
    }

    let mut out = Vec::new();
    for part in LIST_SPLIT.split(&s) {
        let trimmed = part
            .trim()
            .trim_matches(|c| matches!(c, '•' | '*' | ' ' | '-'));
        let mut cleaned = WHITESPACE.replace_all(trimmed, " ").into_owned();
        cleaned = LEADING_AND.replace(&cleaned, "").into_owned();
        cleaned = cleaned
            .trim_matches(|c| matches!(c, ' ' | '.' | ';' | ':'))
            .to_string();
        if cleaned.is_empty() {
            continue;
        }

        if cleaned.contains(" (") && cleaned.matches('(').count() == 1 && !cleaned.contains(')') {
            if let Some((left, right)) = cleaned.split_once(" (") {
                let left = left.trim();
                let right = right.trim();
                if !left.is_empty() {
                    out.push(left.to_string());
                }
                if !right.is_empty() {
                    out.push(right.to_string());
                }
            }
            continue;
        }

        // Only strip orphan parentheses produced by splitting.
        if cleaned.starts_with('(') && !cleaned.contains(')') {
            cleaned = cleaned[1..].trim().to_string();
        }
        if cleaned.ends_with(')') && !cleaned.contains('(') {
            cleaned.pop();
            cleaned = cleaned.trim().to_string();
        }

        out.push(cleaned);
    }
    out
}

/// Heuristic filter for list-like skill/tool items (industry-agnostic).
fn is_plausible_skill_item(token: &str) -> bool {
    let trimmed = token.trim_matches(|c| matches!(c, ' ' | '\t' | '-' | '•' | '*'));
    let t = WHITESPACE.replace_all(trimmed, " ").trim().to_string();
    if t.is_empty() {
        return false;
    }
    if looks_like_contact_or_noise(&t) {
        return false;
    }
    // Reject headings/labels accidentally tokenized as items.
    if t.ends_with(':') || sections::looks_like_heading(&t) {
        return false;
    }

    let lower = t.to_lowercase();
    if STOPWORDS.contains(&lower.as_str()) {
        return false;
    }
    if t.chars().count() < 2 {
        return false;
    }
    // Reject long sentences, obviously not a list item.
    if t.chars().count() > 70 || t.split_whitespace().count() > 7 {
        return false;
    }
    // Reject bare contact labels and "Location: ..." fragments.
    if CONTACT_PREFIX.is_match(&lower) {
        if matches!(
            lower.as_str(),
            "location" | "phone" | "email" | "linkedin" | "github"
        ) {
            return false;
        }
        if lower.contains(':') {
            return false;
        }
    }
    !is_month_or_year_token(&t)
}

/// Contact details, URLs, phone numbers, and standalone date words.
pub(crate) fn looks_like_contact_or_noise(token: &str) -> bool {
    let lower = token.to_lowercase();
    if token.contains('@') || lower.contains("http") || lower.contains("www.") {
        return true;
    }
    if PHONE.is_match(token) {
        return true;
    }
    if PRESENT_WORD.is_match(token) {
        return true;
    }
    if crate::extract::patterns::MONTH_NAMES.contains(&lower.trim()) {
        return true;
    }
    let letters = token.chars().filter(|c| c.is_alphabetic()).count();
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    digits > letters && digits >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(|l| l.trim().to_string()).collect()
    }

    #[test]
    fn labeled_lines_become_categories() {
        let doc = lines("Skills\nProgramming Languages: Python, Java, C++\nTools: Git, Docker");
        let cats = parse_skill_categories(&doc);
        assert_eq!(cats.len(), 2);
        assert_eq!(
            cats.get("Programming Languages"),
            Some(&["Python".into(), "Java".into(), "C++".into()][..])
        );
        assert_eq!(cats.get("Tools"), Some(&["Git".into(), "Docker".into()][..]));

        let flat = flatten(&cats);
        assert_eq!(flat, vec!["Python", "Java", "C++", "Git", "Docker"]);
    }

    #[test]
    fn unlabeled_lines_fall_into_default_bucket() {
        let doc = lines("Skills\nPython, SQL, Excel");
        let cats = parse_skill_categories(&doc);
        assert_eq!(
            cats.get("Skills"),
            Some(&["Python".into(), "SQL".into(), "Excel".into()][..])
        );
    }

    #[test]
    fn label_persists_until_next_label() {
        let doc = lines("Skills\nTools: Git\nDocker, Kubernetes\nLanguages: Rust");
        let cats = parse_skill_categories(&doc);
        assert_eq!(
            cats.get("Tools"),
            Some(&["Git".into(), "Docker".into(), "Kubernetes".into()][..])
        );
        assert_eq!(cats.get("Languages"), Some(&["Rust".into()][..]));
    }

    #[test]
    fn lead_in_prose_degrades_to_list() {
        let doc = lines("Skills\nProficient in Python, SQL, and Tableau.");
        let cats = parse_skill_categories(&doc);
        assert_eq!(
            cats.get("Skills"),
            Some(&["Python".into(), "SQL".into(), "Tableau".into()][..])
        );
    }

    #[test]
    fn strip_lead_in_keeps_non_list_prose() {
        assert_eq!(
            strip_lead_in("Experienced in leadership"),
            "Experienced in leadership"
        );
    }

    #[test]
    fn wrapped_lines_merge_before_tokenizing() {
        let doc = lines("Skills\nPython, SQL,\nand Tableau");
        let cats = parse_skill_categories(&doc);
        assert_eq!(
            cats.get("Skills"),
            Some(&["Python".into(), "SQL".into(), "Tableau".into()][..])
        );
    }

    #[test]
    fn parenthetical_split_artifacts_are_repaired() {
        let tokens = tokenize_list_content("AWS (EC2, S3, Lambda)");
        assert_eq!(tokens, vec!["AWS", "EC2", "S3", "Lambda"]);
    }

    #[test]
    fn duplicates_deduplicated_case_insensitively() {
        let doc = lines("Skills\nPython, python, SQL\nTools: sql, Git");
        let cats = parse_skill_categories(&doc);
        assert_eq!(cats.get("Skills"), Some(&["Python".into(), "SQL".into()][..]));
        let flat = flatten(&cats);
        assert_eq!(flat, vec!["Python", "SQL", "Git"]);
    }

    #[test]
    fn contact_noise_and_long_sentences_rejected() {
        assert!(!is_plausible_skill_item("jane@example.com"));
        assert!(!is_plausible_skill_item("555-123-4567"));
        assert!(!is_plausible_skill_item("September"));
        assert!(!is_plausible_skill_item(
            "responsible for building and maintaining the entire platform while coordinating"
        ));
        assert!(is_plausible_skill_item("PostgreSQL"));
    }

    #[test]
    fn no_skills_section_means_no_skills() {
        let doc = lines("Experience\nEngineer\n2019 - 2020");
        assert!(parse_skill_categories(&doc).is_empty());
    }
}
