use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One employment (or volunteer) entry, anchored to a date-range line.
///
/// All fields are optional in the sense that they may be empty; an entry is
/// kept only if at least one of title/company/bullets carries content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub bullets: Vec<String>,
}

impl ExperienceEntry {
    /// True when title, company, and bullets are all empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.company.is_empty() && self.bullets.is_empty()
    }
}

/// Category label to skill items, iterated in first-seen order.
///
/// Serializes as a JSON object whose keys keep insertion order, so the
/// category layout of the source resume survives the round trip to JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillCategories {
    entries: Vec<(String, Vec<String>)>,
}

impl SkillCategories {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable item list for `label`, creating the category on first use.
    pub fn entry_mut(&mut self, label: &str) -> &mut Vec<String> {
        let pos = match self.entries.iter().position(|(k, _)| k == label) {
            Some(pos) => pos,
            None => {
                self.entries.push((label.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == label)
            .map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<String>)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Serialize for SkillCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, items) in &self.entries {
            map.serialize_entry(label, items)?;
        }
        map.end()
    }
}

/// Structured record produced by one parse call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedResume {
    /// Explicit "N years of experience" claim, or summed entry durations.
    pub years_experience: f64,
    /// Degree/institution lines, newline-joined.
    pub education: String,
    /// Flattened, first-seen-order-deduplicated skill list.
    pub skills: Vec<String>,
    pub skills_by_category: SkillCategories,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
    /// First clearance/work-authorization phrase found, if any.
    pub clearances_or_work_auth: String,
}

impl ParsedResume {
    /// Names of output fields that came back empty, for diagnostics.
    #[must_use]
    pub fn empty_fields(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        if self.years_experience == 0.0 {
            empty.push("years_experience");
        }
        if self.education.is_empty() {
            empty.push("education");
        }
        if self.skills.is_empty() {
            empty.push("skills");
        }
        if self.experience.is_empty() {
            empty.push("experience");
        }
        if self.projects.is_empty() {
            empty.push("projects");
        }
        if self.certifications.is_empty() {
            empty.push("certifications");
        }
        if self.clearances_or_work_auth.is_empty() {
            empty.push("clearances_or_work_auth");
        }
        empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_categories_keep_insertion_order() {
        let mut cats = SkillCategories::new();
        cats.entry_mut("Tools").push("Git".into());
        cats.entry_mut("Languages").push("Python".into());
        cats.entry_mut("Tools").push("Docker".into());

        let labels: Vec<&str> = cats.iter().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["Tools", "Languages"]);
        assert_eq!(cats.get("Tools"), Some(&["Git".into(), "Docker".into()][..]));

        let json = serde_json::to_string(&cats).unwrap();
        let tools = json.find("Tools").unwrap();
        let langs = json.find("Languages").unwrap();
        assert!(tools < langs, "serialized keys must keep insertion order");
    }

    #[test]
    fn entry_mut_creates_each_label_once() {
        let mut cats = SkillCategories::new();
        cats.entry_mut("Skills").push("a".into());
        cats.entry_mut("Skills").push("b".into());
        assert_eq!(cats.len(), 1);
    }

    #[test]
    fn experience_entry_is_empty_ignores_duration() {
        let entry = ExperienceEntry {
            duration: "2019 - 2020".into(),
            ..Default::default()
        };
        assert!(entry.is_empty());
    }

    #[test]
    fn empty_fields_lists_all_on_default() {
        let resume = ParsedResume::default();
        let empty = resume.empty_fields();
        assert!(empty.contains(&"years_experience"));
        assert!(empty.contains(&"experience"));
        assert!(empty.contains(&"clearances_or_work_auth"));
    }

    #[test]
    fn parsed_resume_serializes_all_fields() {
        let resume = ParsedResume {
            years_experience: 3.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&resume).unwrap();
        assert!(json.contains("\"years_experience\":3.0"));
        assert!(json.contains("\"skills_by_category\":{}"));
        assert!(json.contains("\"clearances_or_work_auth\":\"\""));
    }
}
