use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{Embedder, TextGenerator};
use crate::recommend::parse_id;
use crate::resume::pipeline::{extract_skills, ResumeSettings};
use crate::resume::skills::SkillsReport;
use crate::state::AppState;
use crate::store::MarketplaceStore;

const RESUME_FIELD: &str = "resume";
const URL_FIELD: &str = "url";

#[derive(Debug, Default)]
pub struct ResumeUpload {
    pub pdf: Option<Bytes>,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttachResumeResponse {
    pub freelancer_id: Uuid,
    pub resume_url: Option<String>,
    pub skills: Vec<String>,
}

/// Reads the `resume` file part and optional `url` text part.
pub async fn read_resume_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut upload = ResumeUpload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some(RESUME_FIELD) => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                upload.pdf = Some(data);
            }
            Some(URL_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read url: {e}")))?;
                let text = text.trim();
                if !text.is_empty() {
                    upload.url = Some(text.to_string());
                }
            }
            _ => {}
        }
    }
    Ok(upload)
}

/// Extracts skills from a resume and stores them on the freelancer's profile.
pub async fn attach_resume(
    store: &dyn MarketplaceStore,
    generator: &dyn TextGenerator,
    embedder: &dyn Embedder,
    settings: ResumeSettings,
    freelancer_id: Uuid,
    pdf: Bytes,
    resume_url: Option<String>,
) -> Result<AttachResumeResponse, AppError> {
    if store.find_student(freelancer_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Freelancer with ID {freelancer_id} not found"
        )));
    }

    let report = extract_skills(pdf, generator, embedder, settings).await?;

    let saved = store
        .save_resume_skills(freelancer_id, resume_url.as_deref(), &report.skills)
        .await?;
    if !saved {
        return Err(AppError::NotFound(format!(
            "Freelancer with ID {freelancer_id} not found"
        )));
    }

    Ok(AttachResumeResponse {
        freelancer_id,
        resume_url,
        skills: report.skills,
    })
}

/// POST /api/v1/resume/skills
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SkillsReport>, AppError> {
    let upload = read_resume_upload(multipart?).await?;
    let pdf = upload
        .pdf
        .ok_or_else(|| AppError::Validation(format!("Missing '{RESUME_FIELD}' file field")))?;

    let report = extract_skills(
        pdf,
        state.generator.as_ref(),
        state.embedder.as_ref(),
        ResumeSettings::from(&state.config),
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/v1/freelancers/:id/resume
pub async fn handle_attach_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AttachResumeResponse>, AppError> {
    let freelancer_id = parse_id(&id, "freelancer")?;
    let upload = read_resume_upload(multipart?).await?;
    let pdf = upload
        .pdf
        .ok_or_else(|| AppError::Validation(format!("Missing '{RESUME_FIELD}' file field")))?;

    let response = attach_resume(
        state.store.as_ref(),
        state.generator.as_ref(),
        state.embedder.as_ref(),
        ResumeSettings::from(&state.config),
        freelancer_id,
        pdf,
        upload.url,
    )
    .await?;
    Ok(Json(response))
}
