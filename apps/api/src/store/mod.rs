//! Resume document store.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`, picked at startup from
//! `STORE_BACKEND`. Every write is a full-document overwrite; there is no
//! version check, so concurrent saves are last-writer-wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeSummary};

pub use memory::MemoryResumeStore;
pub use postgres::PgResumeStore;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Creates an empty resume for `owner_id`.
    async fn create(&self, owner_id: &str, name: &str) -> Result<Resume, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError>;

    /// Owner-id equality filter, oldest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ResumeSummary>, AppError>;

    /// Overwrites the stored document and stamps `updated_at`.
    async fn update(&self, resume: &Resume) -> Result<Resume, AppError>;

    /// Stamps `updated_at` without changing content.
    async fn touch(&self, id: Uuid) -> Result<(), AppError>;
}

pub(crate) fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}
