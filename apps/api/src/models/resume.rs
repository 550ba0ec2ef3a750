use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scalar contact fields. `website`, `linkedin`, and `github` are optional:
/// blank input is stored as `None`, and the renderer emits a contact line
/// only for fields that are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    /// Free-text "YYYY-MM" tokens. Not validated as calendar dates.
    pub start_date: String,
    pub end_date: String,
    pub gpa: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl EducationEntry {
    /// A fresh entry with the given id and every field at its default.
    pub fn blank(id: Uuid) -> Self {
        EducationEntry {
            id,
            institution: String::new(),
            degree: String::new(),
            field_of_study: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            gpa: None,
            achievements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    /// A current job has no end date: the renderer substitutes "Present"
    /// and ignores whatever `end_date` holds.
    #[serde(default)]
    pub current: bool,
    /// Ordered bullet strings. Blank lines are kept in the record and
    /// filtered at render time.
    #[serde(default)]
    pub description: Vec<String>,
}

impl ExperienceEntry {
    pub fn blank(id: Uuid) -> Self {
        ExperienceEntry {
            id,
            company: String::new(),
            position: String::new(),
            location: None,
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Language,
    Soft,
}

impl SkillCategory {
    /// Fixed render order for skill groups.
    pub const ALL: [SkillCategory; 3] = [
        SkillCategory::Technical,
        SkillCategory::Language,
        SkillCategory::Soft,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical Skills",
            SkillCategory::Language => "Languages",
            SkillCategory::Soft => "Soft Skills",
        }
    }
}

/// Stored and echoed through the API, but not rendered by any current
/// template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillProficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub id: Uuid,
    pub name: String,
    pub category: SkillCategory,
    pub level: Option<SkillProficiency>,
}

impl SkillEntry {
    pub fn blank(id: Uuid) -> Self {
        SkillEntry {
            id,
            name: String::new(),
            // The form's default group for a new skill.
            category: SkillCategory::Technical,
            level: None,
        }
    }
}

/// The canonical in-memory resume record. Lists keep insertion order; entry
/// ids are assigned once at append time and never reused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    /// Free-text summary; empty is equivalent to absent.
    #[serde(default)]
    pub summary: String,
}
