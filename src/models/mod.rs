pub mod resume;

pub use resume::{ExperienceEntry, ParsedResume, SkillCategories};
