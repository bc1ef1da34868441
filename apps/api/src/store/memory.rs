use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{not_found, ResumeStore};
use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeSummary};

/// Process-local store for development and tests. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryResumeStore {
    docs: RwLock<HashMap<Uuid, Resume>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document as-is, bypassing validation like any direct caller.
    pub fn insert(&self, resume: Resume) {
        self.write().insert(resume.id, resume);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, Resume>> {
        self.docs.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Resume>> {
        self.docs.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn create(&self, owner_id: &str, name: &str) -> Result<Resume, AppError> {
        let resume = Resume::new(owner_id, name);
        self.insert(resume.clone());
        Ok(resume)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(self.read().get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ResumeSummary>, AppError> {
        let docs = self.read();
        let mut owned: Vec<&Resume> = docs.values().filter(|r| r.is_owned_by(owner_id)).collect();
        owned.sort_by_key(|r| r.created_at);
        Ok(owned.into_iter().map(Resume::summary).collect())
    }

    async fn update(&self, resume: &Resume) -> Result<Resume, AppError> {
        let mut docs = self.write();
        let slot = docs.get_mut(&resume.id).ok_or_else(|| not_found(resume.id))?;
        *slot = Resume {
            updated_at: Some(Utc::now()),
            ..resume.clone()
        };
        Ok(slot.clone())
    }

    async fn touch(&self, id: Uuid) -> Result<(), AppError> {
        let mut docs = self.write();
        let slot = docs.get_mut(&id).ok_or_else(|| not_found(id))?;
        slot.updated_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let store = MemoryResumeStore::new();
        store.create("alice", "one").await.unwrap();
        store.create("bob", "two").await.unwrap();
        store.create("alice", "three").await.unwrap();

        let names: Vec<String> = store
            .list_by_owner("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"one".to_string()));
        assert!(names.contains(&"three".to_string()));
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let store = MemoryResumeStore::new();
        let base = Utc::now();
        for (name, age_minutes) in [("middle", 20), ("newest", 10), ("oldest", 30)] {
            let mut resume = Resume::new("alice", name);
            resume.created_at = base - chrono::Duration::minutes(age_minutes);
            store.insert(resume);
        }

        let names: Vec<String> = store
            .list_by_owner("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["oldest", "middle", "newest"]);
    }

    #[tokio::test]
    async fn test_update_overwrites_whole_document() {
        let store = MemoryResumeStore::new();
        let mut resume = store.create("alice", "cv").await.unwrap();
        resume.profile.full_name = "Alice".into();

        let saved = store.update(&resume).await.unwrap();
        assert!(saved.updated_at.is_some());

        let loaded = store.get(resume.id).await.unwrap().unwrap();
        assert_eq!(loaded.profile.full_name, "Alice");
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let store = MemoryResumeStore::new();
        let base = store.create("alice", "cv").await.unwrap();

        let mut first = base.clone();
        first.profile.summary = "first".into();
        let mut second = base.clone();
        second.profile.summary = "second".into();

        store.update(&first).await.unwrap();
        store.update(&second).await.unwrap();

        let loaded = store.get(base.id).await.unwrap().unwrap();
        assert_eq!(loaded.profile.summary, "second");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryResumeStore::new();
        let ghost = Resume::new("alice", "ghost");
        assert!(matches!(
            store.update(&ghost).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.touch(ghost.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
