//! Field-coverage evaluation over a JSONL corpus of resume texts.
//!
//! Each input line is a JSON object with a `text` field. The report carries
//! aggregate coverage rates rather than per-resume output, which is enough to
//! spot a heuristic regression across a corpus.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{IntakeError, Result};
use crate::extract::parse_resume;

#[derive(Debug, Deserialize)]
struct ResumeRecord {
    #[serde(default)]
    text: String,
}

/// Aggregate extraction coverage over a corpus.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub resumes: usize,
    pub pct_nonempty_experience: f64,
    pub pct_nonempty_skills: f64,
    pub pct_nonempty_education: f64,
    pub avg_experience_entries: f64,
}

/// Parse up to `sample_size` records from a JSONL file and report coverage.
/// A malformed line is an error, not a skip; corpus files are expected to be
/// machine-written.
pub fn evaluate_jsonl(path: &Path, sample_size: Option<usize>) -> Result<EvalReport> {
    let reader = BufReader::new(File::open(path)?);

    let mut resumes = 0usize;
    let mut nonempty_experience = 0usize;
    let mut nonempty_skills = 0usize;
    let mut nonempty_education = 0usize;
    let mut total_entries = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        if sample_size.is_some_and(|limit| resumes >= limit) {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ResumeRecord =
            serde_json::from_str(&line).map_err(|e| IntakeError::Record {
                line: lineno + 1,
                detail: e.to_string(),
            })?;

        let parsed = parse_resume(&record.text);
        resumes += 1;
        if !parsed.experience.is_empty() {
            nonempty_experience += 1;
        }
        if !parsed.skills.is_empty() {
            nonempty_skills += 1;
        }
        if !parsed.education.is_empty() {
            nonempty_education += 1;
        }
        total_entries += parsed.experience.len();
    }

    tracing::info!(resumes, "evaluated corpus");

    let denom = resumes.max(1) as f64;
    Ok(EvalReport {
        resumes,
        pct_nonempty_experience: nonempty_experience as f64 / denom,
        pct_nonempty_skills: nonempty_skills as f64 / denom,
        pct_nonempty_education: nonempty_education as f64 / denom,
        avg_experience_entries: total_entries as f64 / denom,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn evaluates_a_small_corpus() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let resume = "Experience\nEngineer\nAcme Inc\n2019 - 2020\n- Built X\n\nSkills\nPython, SQL\n\nEducation\nB.S. Computer Science, State University\n";
        writeln!(file, "{}", serde_json::json!({ "text": resume })).unwrap();
        writeln!(file, "{}", serde_json::json!({ "text": "nothing here" })).unwrap();

        let report = evaluate_jsonl(file.path(), None).unwrap();
        assert_eq!(report.resumes, 2);
        assert!((report.pct_nonempty_experience - 0.5).abs() < 1e-9);
        assert!((report.pct_nonempty_skills - 0.5).abs() < 1e-9);
        assert!((report.avg_experience_entries - 0.5).abs() < 1e-9);
    }

    #[test]
    fn sample_size_limits_the_scan() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        for _ in 0..5 {
            writeln!(file, "{}", serde_json::json!({ "text": "" })).unwrap();
        }
        let report = evaluate_jsonl(file.path(), Some(2)).unwrap();
        assert_eq!(report.resumes, 2);
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "{}", serde_json::json!({ "text": "" })).unwrap();
        writeln!(file, "not json").unwrap();
        let err = evaluate_jsonl(file.path(), None).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn missing_text_field_defaults_to_empty() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "{{}}").unwrap();
        let report = evaluate_jsonl(file.path(), None).unwrap();
        assert_eq!(report.resumes, 1);
        assert_eq!(report.pct_nonempty_experience, 0.0);
    }
}
