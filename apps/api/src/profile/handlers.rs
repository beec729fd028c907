//! Axum route handlers for resume upload and application tracking.
//!
//! `/upload-resume` accepts either a JSON body with the extracted text or a
//! multipart form with a PDF / plain-text file. Oversized or wrong-type
//! uploads are rejected with a descriptive reason before any processing.

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::user::{Application, ApplicationStatus};
use crate::state::AppState;

/// Upload bound, checked synchronously before extraction or storage.
const MAX_RESUME_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub user_id: String,
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub user_id: String,
    pub job_id: String,
    pub status: ApplicationStatus,
}

/// POST /upload-resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<UploadResponse>, AppError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (user_id, resume_text) = if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?;
        read_multipart_upload(multipart).await?
    } else {
        let Json(body) = Json::<UploadRequest>::from_request(request, &())
            .await
            .map_err(|e| AppError::Validation(format!("invalid JSON body: {e}")))?;
        ensure_within_limit(body.resume_text.len())?;
        (body.user_id, body.resume_text)
    };

    if user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id cannot be empty".to_string()));
    }
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume contains no text".to_string(),
        ));
    }

    state.store.set_resume(&user_id, resume_text).await?;
    info!(%user_id, "resume stored");
    Ok(Json(UploadResponse { success: true }))
}

/// POST /apply
///
/// Appends one application event. The prior history for the job is kept:
/// status changes are new entries, never edits. The response echoes the
/// stored entry; on a storage error the mutation is not applied.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(request): Json<ApplyRequest>,
) -> Result<Json<Application>, AppError> {
    if request.user_id.trim().is_empty() || request.job_id.trim().is_empty() {
        return Err(AppError::Validation(
            "user_id and job_id cannot be empty".to_string(),
        ));
    }

    let application = Application {
        job_id: request.job_id,
        status: request.status,
        timestamp: Utc::now(),
    };
    let stored = state
        .store
        .append_application(&request.user_id, application)
        .await?;
    Ok(Json(stored))
}

/// GET /applications/:user_id
///
/// The full history, oldest first. Unknown users get an empty list.
pub async fn handle_applications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = state.store.applications(&user_id).await?;
    Ok(Json(applications))
}

// ── Multipart plumbing ──────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
enum ResumeKind {
    Pdf,
    Text,
}

/// Decides how to read an uploaded file, or rejects it. Content type wins;
/// the file extension is the fallback for clients that send octet-stream.
fn resume_kind(file_name: &str, content_type: Option<&str>) -> Result<ResumeKind, AppError> {
    match content_type {
        Some("application/pdf") => return Ok(ResumeKind::Pdf),
        Some(ct) if ct.starts_with("text/") => return Ok(ResumeKind::Text),
        _ => {}
    }
    let lower = file_name.to_lowercase();
    if lower.ends_with(".pdf") {
        Ok(ResumeKind::Pdf)
    } else if lower.ends_with(".txt") || lower.ends_with(".md") {
        Ok(ResumeKind::Text)
    } else {
        Err(AppError::Validation(format!(
            "unsupported resume type for {file_name:?}: upload a PDF or a plain-text file"
        )))
    }
}

fn ensure_within_limit(len: usize) -> Result<(), AppError> {
    if len > MAX_RESUME_BYTES {
        return Err(AppError::Validation(format!(
            "resume is {len} bytes; the limit is {MAX_RESUME_BYTES}"
        )));
    }
    Ok(())
}

async fn read_multipart_upload(mut multipart: Multipart) -> Result<(String, String), AppError> {
    let mut user_id: Option<String> = None;
    let mut resume_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart field: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("user_id") => {
                user_id = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("unreadable user_id field: {e}"))
                })?);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(str::to_string);
                let kind = resume_kind(&file_name, content_type.as_deref())?;
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("unreadable file field: {e}"))
                })?;
                ensure_within_limit(data.len())?;
                resume_text = Some(extract_resume_text(kind, data).await?);
            }
            _ => {}
        }
    }

    let user_id =
        user_id.ok_or_else(|| AppError::Validation("missing user_id field".to_string()))?;
    let resume_text =
        resume_text.ok_or_else(|| AppError::Validation("missing file field".to_string()))?;
    Ok((user_id, resume_text))
}

async fn extract_resume_text(kind: ResumeKind, data: Bytes) -> Result<String, AppError> {
    match kind {
        ResumeKind::Text => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Validation("resume file is not valid UTF-8".to_string())),
        ResumeKind::Pdf => {
            // pdf-extract is CPU-bound; keep it off the runtime threads.
            let extracted = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&data)
            })
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?;
            extracted.map_err(|e| {
                AppError::Validation(format!("could not extract text from PDF: {e}"))
            })
        }
    }
}
