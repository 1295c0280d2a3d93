//! Glyph and layout normalization for PDF-extracted resume text.
//!
//! Extraction tools mangle bullet glyphs, wrap words across lines with a
//! hyphen, and glue section headings to the content that follows them. All
//! downstream extractors assume this pass has already run; it is idempotent,
//! so running it again over its own output changes nothing.

use regex::Regex;
use std::sync::LazyLock;

/// Bullet/dash variants and PDF-mangled markers, all unified to "-".
const GLYPH_TO_DASH: &[&str] = &["?", "·", "\u{f0b7}", "●", "•", "–", "—", "Š", "Œ"];

/// Headings that extraction tools glue to the content following them.
/// Order matters: longer variants must be tried before their prefixes
/// ("SKILLS SUMMARY" before "SKILLS").
const INLINE_HEADINGS: &[&str] = &[
    "PROFESSIONAL SUMMARY",
    "SUMMARY",
    "SKILLS SUMMARY",
    "SKILLS",
    "WORK HISTORY",
    "EXPERIENCE",
    "PROFESSIONAL EXPERIENCE",
    "WORK EXPERIENCE",
    "RELEVANT EXPERIENCE",
    "EDUCATION",
    "PROJECTS",
    "CERTIFICATIONS",
    "LICENSURE & CERTIFICATIONS",
    "LICENSES & CERTIFICATIONS",
    "TECHNICAL SKILLS",
    "RELEVANT SKILLS",
    "CLINICAL SKILLS",
    "TOOLS",
    "TECHNOLOGIES",
    "ADDITIONAL INFORMATION",
    "PUBLICATIONS",
    "VOLUNTEER EXPERIENCE",
];

static HYPHEN_WRAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)-\n(\w)").expect("hyphen wrap pattern"));

/// Headings stacked across two lines by column extraction, e.g.
/// "PROFESSIONAL\nSUMMARY".
static STACKED_HEADINGS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"(?i)\bPROFESSIONAL\s*\n\s*SUMMARY\b").expect("stacked heading"),
            "PROFESSIONAL SUMMARY",
        ),
        (
            Regex::new(r"(?i)\bSKILLS\s*\n\s*SUMMARY\b").expect("stacked heading"),
            "SKILLS SUMMARY",
        ),
        (
            Regex::new(r"(?i)\bWORK\s*\n\s*HISTORY\b").expect("stacked heading"),
            "WORK HISTORY",
        ),
    ]
});

static TAB_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t\x0c\r]+").expect("tab pattern"));
static REPEAT_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").expect("space pattern"));

/// Normalize bullets, dashes, and whitespace in PDF-extracted text.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut text = text.to_string();
    for glyph in GLYPH_TO_DASH {
        text = text.replace(glyph, "-");
    }
    text = text.replace('\u{a0}', " ");

    // De-hyphenate line breaks: "co-\nmputer" -> "computer".
    text = HYPHEN_WRAP.replace_all(&text, "${1}${2}").into_owned();

    for (re, joined) in STACKED_HEADINGS.iter() {
        text = re.replace_all(&text, *joined).into_owned();
    }

    text = isolate_inline_headings(&text);

    let text = TAB_LIKE.replace_all(&text, " ");
    REPEAT_SPACES.replace_all(&text, " ").into_owned()
}

/// Normalize and split into trimmed lines; the unit all extractors consume.
#[must_use]
pub fn normalized_lines(text: &str) -> Vec<String> {
    normalize(text)
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect()
}

/// If a known heading shares a line with content, split it onto its own line,
/// e.g. "SKILLS Python, SQL" -> "SKILLS\nPython, SQL". "SKILLS" must not fire
/// when followed by "SUMMARY" ("SKILLS SUMMARY" is its own heading).
fn isolate_inline_headings(text: &str) -> String {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    for heading in INLINE_HEADINGS {
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            match split_inline_heading(&line, heading) {
                Some((head, rest)) => {
                    out.push(head);
                    out.push(rest);
                }
                None => out.push(line),
            }
        }
        lines = out;
    }
    lines.join("\n")
}

fn split_inline_heading(line: &str, heading: &str) -> Option<(String, String)> {
    let hlen = heading.len();
    if line.len() <= hlen || !line.is_char_boundary(hlen) {
        return None;
    }
    let (head, rest) = line.split_at(hlen);
    if !head.eq_ignore_ascii_case(heading) {
        return None;
    }
    // The heading must be followed by whitespace and then content.
    let trimmed = rest.trim_start();
    if trimmed.is_empty() || trimmed.len() == rest.len() {
        return None;
    }
    if heading.eq_ignore_ascii_case("SKILLS")
        && trimmed
            .get(..7)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("SUMMARY"))
    {
        return None;
    }
    Some((head.to_string(), trimmed.to_string()))
}
