use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use super::{not_found, ResumeStore};
use crate::errors::AppError;
use crate::models::resume::{Profile, Resume, ResumeSummary};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS resumes (
        id          UUID PRIMARY KEY,
        owner_id    TEXT NOT NULL,
        name        TEXT NOT NULL,
        profile     JSONB NOT NULL DEFAULT '{}'::jsonb,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ
    )
    "#,
    "CREATE INDEX IF NOT EXISTS resumes_owner_id_idx ON resumes (owner_id)",
];

#[derive(Debug, FromRow)]
struct ResumeRow {
    id: Uuid,
    owner_id: String,
    name: String,
    profile: Json<Profile>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Resume {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            profile: row.profile.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Resumes held as JSONB documents in a single PostgreSQL table.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and makes sure the table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        info!("PostgreSQL connection pool established ({max_connections} max)");

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Creates the `resumes` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed to bootstrap resumes schema")?;
        }
        info!("Resume schema ready");
        Ok(())
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, owner_id: &str, name: &str) -> Result<Resume, AppError> {
        let resume = Resume::new(owner_id, name);
        sqlx::query(
            "INSERT INTO resumes (id, owner_id, name, profile, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(resume.id)
        .bind(&resume.owner_id)
        .bind(&resume.name)
        .bind(Json(&resume.profile))
        .bind(resume.created_at)
        .execute(&self.pool)
        .await?;

        info!("Created resume {} for owner {owner_id}", resume.id);
        Ok(resume)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Resume::from))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ResumeSummary>, AppError> {
        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            "SELECT id, name FROM resumes WHERE owner_id = $1 ORDER BY created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| ResumeSummary { id, name })
            .collect())
    }

    async fn update(&self, resume: &Resume) -> Result<Resume, AppError> {
        let row: Option<ResumeRow> = sqlx::query_as(
            r#"
            UPDATE resumes
            SET owner_id = $2, name = $3, profile = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(resume.id)
        .bind(&resume.owner_id)
        .bind(&resume.name)
        .bind(Json(&resume.profile))
        .fetch_optional(&self.pool)
        .await?;

        let saved = row.ok_or_else(|| not_found(resume.id))?;
        info!("Saved resume {}", saved.id);
        Ok(saved.into())
    }

    async fn touch(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE resumes SET updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
