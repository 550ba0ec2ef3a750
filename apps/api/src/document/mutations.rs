//! Mutation API for the resume document.
//!
//! Every operation is pure: it takes the current document by reference and
//! returns the next document value. The session store is the single caller
//! that installs the result, so no handler ever holds a mutable document.
//!
//! Unknown entry ids on update/remove are silent no-ops — the client may
//! race a removal against an in-flight edit, and that race must not fail
//! the session.

use serde::Deserialize;
use uuid::Uuid;

use crate::models::resume::{
    EducationEntry, ExperienceEntry, ResumeDocument, SkillCategory, SkillEntry, SkillProficiency,
};

// ────────────────────────────────────────────────────────────────────────────
// Field patches
// ────────────────────────────────────────────────────────────────────────────

/// One personal-info field overwrite, e.g. `{"field": "email", "value": "…"}`.
/// Values are stored as given; required-field markers in a form UI are
/// hints, not invariants enforced here.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PersonalField {
    FullName(String),
    Email(String),
    Phone(String),
    Address(String),
    Website(String),
    Linkedin(String),
    Github(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum EducationField {
    Institution(String),
    Degree(String),
    FieldOfStudy(String),
    StartDate(String),
    EndDate(String),
    Gpa(String),
    Achievements(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ExperienceField {
    Company(String),
    Position(String),
    Location(String),
    StartDate(String),
    EndDate(String),
    Current(bool),
    Description(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SkillField {
    Name(String),
    Category(SkillCategory),
    Level(Option<SkillProficiency>),
}

// ────────────────────────────────────────────────────────────────────────────
// List helpers
// ────────────────────────────────────────────────────────────────────────────

/// Blank input on an optional field means "absent": stored as `None` so the
/// renderer has a single notion of missing.
fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

trait ListEntry: Clone {
    fn entry_id(&self) -> Uuid;
}

impl ListEntry for EducationEntry {
    fn entry_id(&self) -> Uuid {
        self.id
    }
}

impl ListEntry for ExperienceEntry {
    fn entry_id(&self) -> Uuid {
        self.id
    }
}

impl ListEntry for SkillEntry {
    fn entry_id(&self) -> Uuid {
        self.id
    }
}

/// Applies `apply` to the entry with `id`, if it is still present. Sibling
/// entries are carried over as-is; a missing id returns the list unchanged.
fn patch_entry<T: ListEntry>(entries: &[T], id: Uuid, apply: impl FnOnce(&mut T)) -> Vec<T> {
    let mut next = entries.to_vec();
    if let Some(entry) = next.iter_mut().find(|e| e.entry_id() == id) {
        apply(entry);
    }
    next
}

/// Drops the entry with `id`. Siblings keep their ids and relative order;
/// a missing id returns the list unchanged.
fn drop_entry<T: ListEntry>(entries: &[T], id: Uuid) -> Vec<T> {
    entries.iter().filter(|e| e.entry_id() != id).cloned().collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Document mutations
// ────────────────────────────────────────────────────────────────────────────

impl ResumeDocument {
    pub fn with_personal_field(&self, patch: PersonalField) -> Self {
        let mut next = self.clone();
        match patch {
            PersonalField::FullName(v) => next.personal_info.full_name = v,
            PersonalField::Email(v) => next.personal_info.email = v,
            PersonalField::Phone(v) => next.personal_info.phone = v,
            PersonalField::Address(v) => next.personal_info.address = v,
            PersonalField::Website(v) => next.personal_info.website = blank_to_none(v),
            PersonalField::Linkedin(v) => next.personal_info.linkedin = blank_to_none(v),
            PersonalField::Github(v) => next.personal_info.github = blank_to_none(v),
        }
        next
    }

    pub fn with_summary(&self, text: String) -> Self {
        let mut next = self.clone();
        next.summary = text;
        next
    }

    /// Appends a blank education entry and returns the next document plus
    /// the id assigned to the new entry. Ids are random v4 UUIDs: rapid
    /// successive appends cannot collide the way wall-clock keys do.
    pub fn with_new_education(&self) -> (Self, Uuid) {
        let id = Uuid::new_v4();
        let mut next = self.clone();
        next.education.push(EducationEntry::blank(id));
        (next, id)
    }

    pub fn with_education_field(&self, entry_id: Uuid, patch: EducationField) -> Self {
        let mut next = self.clone();
        next.education = patch_entry(&self.education, entry_id, |entry| match patch {
            EducationField::Institution(v) => entry.institution = v,
            EducationField::Degree(v) => entry.degree = v,
            EducationField::FieldOfStudy(v) => entry.field_of_study = v,
            EducationField::StartDate(v) => entry.start_date = v,
            EducationField::EndDate(v) => entry.end_date = v,
            EducationField::Gpa(v) => entry.gpa = blank_to_none(v),
            EducationField::Achievements(v) => entry.achievements = v,
        });
        next
    }

    pub fn without_education(&self, entry_id: Uuid) -> Self {
        let mut next = self.clone();
        next.education = drop_entry(&self.education, entry_id);
        next
    }

    pub fn with_new_experience(&self) -> (Self, Uuid) {
        let id = Uuid::new_v4();
        let mut next = self.clone();
        next.experience.push(ExperienceEntry::blank(id));
        (next, id)
    }

    pub fn with_experience_field(&self, entry_id: Uuid, patch: ExperienceField) -> Self {
        let mut next = self.clone();
        next.experience = patch_entry(&self.experience, entry_id, |entry| match patch {
            ExperienceField::Company(v) => entry.company = v,
            ExperienceField::Position(v) => entry.position = v,
            ExperienceField::Location(v) => entry.location = blank_to_none(v),
            ExperienceField::StartDate(v) => entry.start_date = v,
            ExperienceField::EndDate(v) => entry.end_date = v,
            ExperienceField::Current(v) => entry.current = v,
            ExperienceField::Description(v) => entry.description = v,
        });
        next
    }

    pub fn without_experience(&self, entry_id: Uuid) -> Self {
        let mut next = self.clone();
        next.experience = drop_entry(&self.experience, entry_id);
        next
    }

    pub fn with_new_skill(&self) -> (Self, Uuid) {
        let id = Uuid::new_v4();
        let mut next = self.clone();
        next.skills.push(SkillEntry::blank(id));
        (next, id)
    }

    pub fn with_skill_field(&self, entry_id: Uuid, patch: SkillField) -> Self {
        let mut next = self.clone();
        next.skills = patch_entry(&self.skills, entry_id, |entry| match patch {
            SkillField::Name(v) => entry.name = v,
            SkillField::Category(v) => entry.category = v,
            SkillField::Level(v) => entry.level = v,
        });
        next
    }

    pub fn without_skill(&self, entry_id: Uuid) -> Self {
        let mut next = self.clone();
        next.skills = drop_entry(&self.skills, entry_id);
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
