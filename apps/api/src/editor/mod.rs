//! In-memory form state for one resume.
//!
//! An `Editor` owns the loaded document, applies field edits with live
//! validation, appends and removes section entries, and on submit writes the
//! whole document back with a single store update.

pub mod drafts;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;
use crate::models::resume::{Profile, Resume};
use crate::store::ResumeStore;
use crate::validation::{self, FieldErrors};

pub use drafts::{Draft, EducationDraft, ExperienceDraft};

/// The five repeatable lists of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Experiences,
    Projects,
    Education,
    Skills,
    Languages,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Experiences,
        Section::Projects,
        Section::Education,
        Section::Skills,
        Section::Languages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Experiences => "experiences",
            Section::Projects => "projects",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Languages => "languages",
        }
    }

    pub fn len(&self, profile: &Profile) -> usize {
        match self {
            Section::Experiences => profile.experiences.len(),
            Section::Projects => profile.projects.len(),
            Section::Education => profile.education.len(),
            Section::Skills => profile.skills.len(),
            Section::Languages => profile.languages.len(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| EditorError::UnknownSection(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    #[error("{0}")]
    InvalidEntry(String),

    #[error("No {section} entry at index {index} (have {len})")]
    IndexOutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::IndexOutOfRange { .. } => AppError::NotFound(err.to_string()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

pub struct Editor {
    resume: Resume,
    errors: FieldErrors,
}

impl Editor {
    pub fn new(resume: Resume) -> Self {
        Self {
            resume,
            errors: FieldErrors::new(),
        }
    }

    pub fn resume(&self) -> &Resume {
        &self.resume
    }

    /// Messages from the most recent field edits or submit attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Updates one flat field and returns its live validation message.
    pub fn set_field(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<Option<String>, EditorError> {
        let value = value.into();
        let message = validation::validate_field(field, &value);
        if !self.resume.profile.set_field(field, value) {
            return Err(EditorError::UnknownField(field.to_string()));
        }
        match &message {
            Some(msg) => self.errors.insert(field.to_string(), msg.clone()),
            None => self.errors.remove(field),
        };
        Ok(message)
    }

    /// Swaps in a complete profile, as when the client posts the whole form.
    pub fn replace_profile(&mut self, profile: Profile) {
        self.resume.profile = profile;
    }

    /// Validates the draft and appends it to the end of its section.
    /// Returns the index of the new entry.
    pub fn add<D: Draft>(&mut self, draft: D) -> Result<usize, EditorError> {
        let entry = draft.commit().map_err(EditorError::InvalidEntry)?;
        let list = D::list(&mut self.resume.profile);
        list.push(entry);
        Ok(list.len() - 1)
    }

    /// Removes exactly the entry at `index`; the rest keep their order.
    pub fn remove(&mut self, section: Section, index: usize) -> Result<(), EditorError> {
        let profile = &mut self.resume.profile;
        match section {
            Section::Experiences => remove_at(&mut profile.experiences, section, index),
            Section::Projects => remove_at(&mut profile.projects, section, index),
            Section::Education => remove_at(&mut profile.education, section, index),
            Section::Skills => remove_at(&mut profile.skills, section, index),
            Section::Languages => remove_at(&mut profile.languages, section, index),
        }
    }

    /// Re-validates every flat field. If anything fails, nothing is written
    /// and the errors come back; otherwise the current document is saved
    /// with one store update.
    pub async fn submit(&mut self, store: &dyn ResumeStore) -> Result<Resume, AppError> {
        self.errors = validation::validate_profile(&self.resume.profile);
        if !self.errors.is_empty() {
            return Err(AppError::InvalidFields(self.errors.clone()));
        }
        let saved = store.update(&self.resume).await?;
        self.resume = saved.clone();
        Ok(saved)
    }
}

fn remove_at<T>(list: &mut Vec<T>, section: Section, index: usize) -> Result<(), EditorError> {
    if index >= list.len() {
        return Err(EditorError::IndexOutOfRange {
            section,
            index,
            len: list.len(),
        });
    }
    list.remove(index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::models::resume::{ResumeSummary, Skill};
    use crate::store::MemoryResumeStore;

    /// Wraps the memory store and records every update it receives.
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryResumeStore,
        updates: Mutex<Vec<Resume>>,
    }

    #[async_trait]
    impl ResumeStore for RecordingStore {
        async fn create(&self, owner_id: &str, name: &str) -> Result<Resume, AppError> {
            self.inner.create(owner_id, name).await
        }

        async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
            self.inner.get(id).await
        }

        async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ResumeSummary>, AppError> {
            self.inner.list_by_owner(owner_id).await
        }

        async fn update(&self, resume: &Resume) -> Result<Resume, AppError> {
            self.updates.lock().unwrap().push(resume.clone());
            self.inner.update(resume).await
        }

        async fn touch(&self, id: Uuid) -> Result<(), AppError> {
            self.inner.touch(id).await
        }
    }

    fn skill(name: &str) -> Skill {
        Skill {
            name: name.into(),
            proficiency: 3,
        }
    }

    fn fill_required(editor: &mut Editor) {
        for (field, value) in [
            ("fullName", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("phone", "1234567890"),
            ("address", "London"),
            ("jobTitle", "Analyst"),
            ("summary", "Wrote the first program."),
        ] {
            assert_eq!(editor.set_field(field, value).unwrap(), None);
        }
    }

    #[test]
    fn test_set_field_reports_live_error() {
        let mut editor = Editor::new(Resume::new("u", "cv"));
        let msg = editor.set_field("email", "not-an-email").unwrap();
        assert_eq!(msg.as_deref(), Some("Invalid email address"));
        assert_eq!(editor.resume().profile.email, "not-an-email");
        assert!(editor.errors().contains_key("email"));

        assert_eq!(editor.set_field("email", "a@b.io").unwrap(), None);
        assert!(editor.errors().is_empty());
    }

    #[test]
    fn test_set_unknown_field() {
        let mut editor = Editor::new(Resume::new("u", "cv"));
        assert_eq!(
            editor.set_field("skills", "x"),
            Err(EditorError::UnknownField("skills".into()))
        );
    }

    #[test]
    fn test_remove_by_index_keeps_order() {
        let mut editor = Editor::new(Resume::new("u", "cv"));
        for name in ["Rust", "Go", "Zig", "C"] {
            editor.add(skill(name)).unwrap();
        }

        editor.remove(Section::Skills, 1).unwrap();

        let names: Vec<&str> = editor
            .resume()
            .profile
            .skills
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Rust", "Zig", "C"]);
    }

    #[test]
    fn test_remove_out_of_range_leaves_list() {
        let mut editor = Editor::new(Resume::new("u", "cv"));
        editor.add(skill("Rust")).unwrap();
        let err = editor.remove(Section::Skills, 5).unwrap_err();
        assert!(matches!(err, EditorError::IndexOutOfRange { len: 1, .. }));
        assert_eq!(editor.resume().profile.skills.len(), 1);
    }

    #[test]
    fn test_add_appends_at_end() {
        let mut editor = Editor::new(Resume::new("u", "cv"));
        assert_eq!(editor.add(skill("Rust")).unwrap(), 0);
        assert_eq!(editor.add(skill("Go")).unwrap(), 1);
        assert_eq!(editor.resume().profile.skills[1].name, "Go");
    }

    #[test]
    fn test_add_invalid_entry_rejected() {
        let mut editor = Editor::new(Resume::new("u", "cv"));
        let err = editor.add(ExperienceDraft::default()).unwrap_err();
        assert!(matches!(err, EditorError::InvalidEntry(_)));
        assert!(editor.resume().profile.experiences.is_empty());
    }

    #[test]
    fn test_section_parse() {
        assert_eq!("education".parse::<Section>().unwrap(), Section::Education);
        assert!("hobbies".parse::<Section>().is_err());
    }

    #[tokio::test]
    async fn test_valid_submit_issues_exactly_one_update() {
        let store = RecordingStore::default();
        let resume = store.create("u", "cv").await.unwrap();
        let mut editor = Editor::new(resume);
        fill_required(&mut editor);
        editor.add(skill("Rust")).unwrap();
        let expected = editor.resume().clone();

        let saved = editor.submit(&store).await.unwrap();

        let updates = store.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0], expected);
        assert_eq!(saved.profile, expected.profile);
    }

    #[tokio::test]
    async fn test_invalid_submit_never_reaches_store() {
        let store = RecordingStore::default();
        let resume = store.create("u", "cv").await.unwrap();
        let mut editor = Editor::new(resume);
        fill_required(&mut editor);
        editor.set_field("phone", "12").unwrap();

        let err = editor.submit(&store).await.unwrap_err();

        match err {
            AppError::InvalidFields(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields["phone"], "Phone must be 10-15 digits");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.updates.lock().unwrap().is_empty());
    }
}
