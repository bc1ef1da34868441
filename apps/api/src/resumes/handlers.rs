use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::catalog::{self, Catalog};
use crate::editor::{Editor, EducationDraft, ExperienceDraft, Section};
use crate::errors::AppError;
use crate::identity::Owner;
use crate::models::resume::{Language, Profile, Project, Resume, ResumeSummary, Skill};
use crate::render::{self, pdf_filename};
use crate::state::AppState;
use crate::validation::{self, FieldErrors};

#[derive(Deserialize)]
pub struct CreateResumeRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeSummary>,
}

#[derive(Serialize)]
pub struct ShareResponse {
    pub url: String,
}

#[derive(Serialize)]
pub struct EntryAddedResponse {
    pub index: usize,
    pub resume: Resume,
}

#[derive(Deserialize)]
pub struct FieldCheckRequest {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Serialize)]
pub struct FieldCheckResponse {
    pub field: String,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct FieldUpdateResponse {
    pub field: String,
    pub error: Option<String>,
    pub errors: FieldErrors,
    pub resume: Resume,
}

async fn load(state: &AppState, id: Uuid) -> Result<Resume, AppError> {
    state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

async fn load_owned(state: &AppState, owner: &Owner, id: Uuid) -> Result<Resume, AppError> {
    let resume = load(state, id).await?;
    owner.authorize(&resume)?;
    Ok(resume)
}

fn decode_draft<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::Validation(format!("Malformed entry: {e}")))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    owner: Owner,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = state.store.list_by_owner(owner.as_str()).await?;
    Ok(Json(ResumeListResponse { resumes }))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    owner: Owner,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    validation::validate_resume_name(&req.name, state.config.name_max_chars)
        .map_err(AppError::Validation)?;
    let resume = state.store.create(owner.as_str(), &req.name).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(load(&state, id).await?))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_save_resume(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
    Json(profile): Json<Profile>,
) -> Result<Json<Resume>, AppError> {
    let resume = load_owned(&state, &owner, id).await?;
    let mut editor = Editor::new(resume);
    editor.replace_profile(profile);
    let saved = editor.submit(state.store.as_ref()).await?;
    Ok(Json(saved))
}

/// PATCH /api/v1/resumes/:id/fields
///
/// Autosaves one flat field and reports its live validation message. An
/// invalid value is still stored; only the full save refuses it.
pub async fn handle_update_field(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
    Json(req): Json<FieldCheckRequest>,
) -> Result<Json<FieldUpdateResponse>, AppError> {
    let resume = load_owned(&state, &owner, id).await?;
    let mut editor = Editor::new(resume);
    let error = editor.set_field(&req.field, req.value)?;
    let errors = editor.errors().clone();

    let saved = state.store.update(editor.resume()).await?;
    Ok(Json(FieldUpdateResponse {
        field: req.field,
        error,
        errors,
        resume: saved,
    }))
}

/// POST /api/v1/resumes/:id/touch
pub async fn handle_touch_resume(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    load_owned(&state, &owner, id).await?;
    state.store.touch(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:id/share
pub async fn handle_share_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShareResponse>, AppError> {
    let resume = load(&state, id).await?;
    Ok(Json(ShareResponse {
        url: format!("{}/resume/{}", state.config.public_base_url, resume.id),
    }))
}

/// POST /api/v1/resumes/:id/sections/:section
///
/// Entries are saved as soon as they are added; the flat fields are only
/// checked on a full save.
pub async fn handle_add_entry(
    State(state): State<AppState>,
    owner: Owner,
    Path((id, section)): Path<(Uuid, String)>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<EntryAddedResponse>), AppError> {
    let section: Section = section.parse()?;
    let resume = load_owned(&state, &owner, id).await?;
    let mut editor = Editor::new(resume);

    let index = match section {
        Section::Experiences => editor.add(decode_draft::<ExperienceDraft>(body)?)?,
        Section::Education => editor.add(decode_draft::<EducationDraft>(body)?)?,
        Section::Projects => editor.add(decode_draft::<Project>(body)?)?,
        Section::Skills => editor.add(decode_draft::<Skill>(body)?)?,
        Section::Languages => editor.add(decode_draft::<Language>(body)?)?,
    };

    let saved = state.store.update(editor.resume()).await?;
    info!("Added {section} entry {index} to resume {id}");
    Ok((
        StatusCode::CREATED,
        Json(EntryAddedResponse {
            index,
            resume: saved,
        }),
    ))
}

/// DELETE /api/v1/resumes/:id/sections/:section/:index
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    owner: Owner,
    Path((id, section, index)): Path<(Uuid, String, usize)>,
) -> Result<Json<Resume>, AppError> {
    let section: Section = section.parse()?;
    let resume = load_owned(&state, &owner, id).await?;
    let mut editor = Editor::new(resume);
    editor.remove(section, index)?;

    let saved = state.store.update(editor.resume()).await?;
    info!(
        "Removed {section} entry {index} from resume {id} ({} left)",
        section.len(&saved.profile)
    );
    Ok(Json(saved))
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let resume = load(&state, id).await?;
    Ok(Html(render::render_html(&resume.profile)))
}

/// GET /api/v1/resumes/:id/pdf
pub async fn handle_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let resume = load(&state, id).await?;
    let filename = pdf_filename(&resume.profile);
    let disposition = render::content_disposition(&resume.profile);
    let config = state.config.pdf;

    let bytes = tokio::task::spawn_blocking(move || render::render_pdf(&resume.profile, &config))
        .await
        .map_err(|e| AppError::Render(format!("PDF task failed: {e}")))??;

    info!("Exported {filename} ({} bytes) for resume {id}", bytes.len());
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}

/// POST /api/v1/validate
///
/// Live check for a single form field; `name` checks a new resume's name.
pub async fn handle_validate_field(
    State(state): State<AppState>,
    Json(req): Json<FieldCheckRequest>,
) -> Json<FieldCheckResponse> {
    let error = if req.field == "name" {
        validation::validate_resume_name(&req.value, state.config.name_max_chars).err()
    } else {
        validation::validate_field(&req.field, &req.value)
    };
    Json(FieldCheckResponse {
        field: req.field,
        error,
    })
}

/// GET /api/v1/catalog
pub async fn handle_catalog() -> Json<Catalog> {
    Json(catalog::catalog())
}
