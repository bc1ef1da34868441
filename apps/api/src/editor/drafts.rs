//! Uncommitted entries for the five repeatable sections.
//!
//! Experience and education carry a "currently here" checkbox: while it is
//! set the end date is cleared and not editable, and the committed entry
//! records `Present` as its end date. Projects, skills and languages have no
//! such coupling, so their records double as their own drafts.

use serde::Deserialize;

use crate::catalog;
use crate::models::resume::{
    Education, Experience, Language, Profile, Project, Skill, PRESENT,
};
use crate::validation;

/// Something the editor can validate and append to one of the profile lists.
pub trait Draft {
    type Entry;

    fn commit(self) -> Result<Self::Entry, String>;

    fn list(profile: &mut Profile) -> &mut Vec<Self::Entry>;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceDraft {
    pub company: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub is_present: bool,
    pub description: String,
}

/// Drafts with a "currently here" checkbox that locks the end date.
pub trait Tenure {
    fn is_present(&self) -> bool;

    fn period_mut(&mut self) -> (&mut bool, &mut String);

    fn set_present(&mut self, present: bool) {
        let (is_present, end_date) = self.period_mut();
        *is_present = present;
        if present {
            end_date.clear();
        }
    }

    fn end_date_enabled(&self) -> bool {
        !self.is_present()
    }

    /// Ignored while the entry is marked present.
    fn set_end_date(&mut self, value: impl Into<String>) {
        if self.end_date_enabled() {
            *self.period_mut().1 = value.into();
        }
    }

    /// Replays the submitted checkbox and end date through the setters and
    /// returns the end date to store.
    fn closing_date(&mut self) -> String {
        let submitted = std::mem::take(self.period_mut().1);
        self.set_present(self.is_present());
        self.set_end_date(submitted);
        if self.end_date_enabled() {
            self.period_mut().1.clone()
        } else {
            PRESENT.to_string()
        }
    }
}

impl Tenure for ExperienceDraft {
    fn is_present(&self) -> bool {
        self.is_present
    }

    fn period_mut(&mut self) -> (&mut bool, &mut String) {
        (&mut self.is_present, &mut self.end_date)
    }
}

impl Draft for ExperienceDraft {
    type Entry = Experience;

    fn commit(mut self) -> Result<Experience, String> {
        let end_date = self.closing_date();
        let entry = Experience {
            end_date,
            company: self.company,
            role: self.role,
            location: self.location,
            start_date: self.start_date,
            is_present: self.is_present,
            description: self.description,
        };
        validation::validate_experience(&entry)?;
        Ok(entry)
    }

    fn list(profile: &mut Profile) -> &mut Vec<Experience> {
        &mut profile.experiences
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationDraft {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub is_present: bool,
    pub description: String,
}

impl Tenure for EducationDraft {
    fn is_present(&self) -> bool {
        self.is_present
    }

    fn period_mut(&mut self) -> (&mut bool, &mut String) {
        (&mut self.is_present, &mut self.end_date)
    }
}

impl Draft for EducationDraft {
    type Entry = Education;

    fn commit(mut self) -> Result<Education, String> {
        let end_date = self.closing_date();
        let entry = Education {
            end_date,
            institution: self.institution,
            degree: self.degree,
            field_of_study: self.field_of_study,
            start_date: self.start_date,
            is_present: self.is_present,
            description: self.description,
        };
        validation::validate_education(&entry)?;
        Ok(entry)
    }

    fn list(profile: &mut Profile) -> &mut Vec<Education> {
        &mut profile.education
    }
}

impl Draft for Project {
    type Entry = Project;

    fn commit(self) -> Result<Project, String> {
        validation::validate_project(&self)?;
        Ok(self)
    }

    fn list(profile: &mut Profile) -> &mut Vec<Project> {
        &mut profile.projects
    }
}

impl Draft for Skill {
    type Entry = Skill;

    /// Picker values (`nextjs`) are stored as their labels (`Next.js`).
    fn commit(mut self) -> Result<Skill, String> {
        if let Some(label) = catalog::skill_label(&self.name) {
            self.name = label.to_string();
        }
        validation::validate_skill(&self)?;
        Ok(self)
    }

    fn list(profile: &mut Profile) -> &mut Vec<Skill> {
        &mut profile.skills
    }
}

impl Draft for Language {
    type Entry = Language;

    fn commit(self) -> Result<Language, String> {
        validation::validate_language(&self)?;
        Ok(self)
    }

    fn list(profile: &mut Profile) -> &mut Vec<Language> {
        &mut profile.languages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience_draft() -> ExperienceDraft {
        ExperienceDraft {
            company: "Acme".into(),
            role: "Engineer".into(),
            start_date: "2021-03".into(),
            end_date: "2023-06".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_present_clears_and_disables_end_date() {
        let mut draft = experience_draft();
        assert!(draft.end_date_enabled());

        draft.set_present(true);
        assert!(draft.end_date.is_empty());
        assert!(!draft.end_date_enabled());

        draft.set_end_date("2024-01");
        assert!(draft.end_date.is_empty());
    }

    #[test]
    fn test_unchecking_present_reenables_end_date() {
        let mut draft = experience_draft();
        draft.set_present(true);
        draft.set_present(false);
        assert!(draft.end_date_enabled());
        assert!(draft.end_date.is_empty());

        draft.set_end_date("2024-01");
        assert_eq!(draft.end_date, "2024-01");
    }

    #[test]
    fn test_present_entry_commits_with_present_end_date() {
        let mut draft = experience_draft();
        draft.set_present(true);
        let entry = draft.commit().unwrap();
        assert_eq!(entry.end_date, PRESENT);
        assert!(entry.is_present);
    }

    #[test]
    fn test_present_flag_from_wire_ignores_stale_end_date() {
        let draft: ExperienceDraft = serde_json::from_str(
            r#"{"company":"Acme","role":"Dev","startDate":"2020","endDate":"2022","isPresent":true}"#,
        )
        .unwrap();
        assert_eq!(draft.commit().unwrap().end_date, PRESENT);
    }

    #[test]
    fn test_closing_date_replays_submitted_values() {
        let mut draft = experience_draft();
        assert_eq!(draft.closing_date(), "2023-06");
        assert!(draft.end_date_enabled());

        draft.is_present = true;
        draft.end_date = "2022".into();
        assert_eq!(draft.closing_date(), PRESENT);
        assert!(draft.end_date.is_empty());
    }

    #[test]
    fn test_past_entry_keeps_end_date() {
        let entry = experience_draft().commit().unwrap();
        assert_eq!(entry.end_date, "2023-06");
    }

    #[test]
    fn test_education_present_toggle() {
        let mut draft = EducationDraft {
            institution: "MIT".into(),
            degree: "BSc".into(),
            start_date: "2019".into(),
            end_date: "2023".into(),
            ..Default::default()
        };
        draft.set_present(true);
        assert!(!draft.end_date_enabled());
        assert!(draft.end_date.is_empty());
        assert_eq!(draft.commit().unwrap().end_date, PRESENT);
    }

    #[test]
    fn test_commit_rejects_missing_required_fields() {
        let draft = ExperienceDraft {
            company: "Acme".into(),
            ..Default::default()
        };
        assert!(draft.commit().is_err());
        assert!(Skill::default().commit().is_err());
    }

    #[test]
    fn test_skill_picker_value_becomes_label() {
        let skill = Skill {
            name: "nextjs".into(),
            proficiency: 4,
        };
        assert_eq!(skill.commit().unwrap().name, "Next.js");
    }
}
